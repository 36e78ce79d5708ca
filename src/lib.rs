//! Triage bench library
//!
//! Core library for the Manchester triage bench: a sequential case runner
//! that records timings to CSV, and the diagnostic service it targets.

pub mod catalog;
pub mod client;
pub mod error;
pub mod logging;
pub mod report;
pub mod service;
pub mod storage;
pub mod types;
