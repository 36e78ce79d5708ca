//! Shared type definitions
//!
//! This module contains the data types shared by the client, the report
//! writer and the diagnostic service.

pub mod case;
pub mod outcome;

pub use case::{Case, PatientData, PATIENT_FIELD_KEYS};
pub use outcome::{Outcome, OutcomeStatus, Run};
