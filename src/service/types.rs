//! Wire types of the diagnostic service
//!
//! Shared by the axum handlers and the client.

use serde::{Deserialize, Serialize};

/// Body of a successful `POST /diagnostico`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticResponse {
    /// Generated text, trimmed
    pub diagnostico: String,
    /// Display name of the model
    #[serde(default)]
    pub modelo: String,
    /// Fixed disclaimer
    #[serde(default)]
    pub aviso: String,
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub modelo: String,
}

/// Body of every 4xx/5xx reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub erro: String,
}
