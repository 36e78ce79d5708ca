//! Diagnostic service
//!
//! HTTP front for the completion backend, built on axum.
//!
//! ## Endpoints
//!
//! - `POST /diagnostico` - Render the Manchester prompt and return the generated text
//! - `GET /health` - Liveness probe
//!
//! ## Example
//!
//! ```rust,ignore
//! use triage_bench::service::{create_router, AppState};
//!
//! let state = AppState::new(backend, &settings.server);
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod backend;
pub mod prompt;
pub mod types;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use thiserror::Error;

use crate::storage::settings::ServerSettings;
use crate::types::{PatientData, PATIENT_FIELD_KEYS};
use backend::{CompletionBackend, GenerationParams, OpenAiCompletionBackend};
use prompt::render_prompt;
use types::{DiagnosticResponse, ErrorResponse, HealthResponse};

/// Disclaimer attached to every generated diagnostic
pub const DISCLAIMER: &str =
    "Este é um diagnóstico preliminar gerado por IA e não substitui a avaliação de um profissional médico.";

const INCOMPLETE_PAYLOAD: &str = "Dados do paciente incompletos ou inválidos.";

/// Service errors
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or malformed patient payload
    #[error("{0}")]
    Validation(String),
    /// Anything that went wrong while generating; echoed verbatim to the caller
    #[error("Erro interno: {0}")]
    Inference(String),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorResponse { erro: self.to_string() })).into_response()
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Completion backend, created once at startup
    backend: Arc<dyn CompletionBackend>,
    params: GenerationParams,
    /// Display name reported in `modelo`
    model_name: Arc<str>,
}

impl AppState {
    pub fn new(backend: Arc<dyn CompletionBackend>, settings: &ServerSettings) -> Self {
        Self {
            backend,
            params: GenerationParams::from(settings),
            model_name: Arc::from(settings.model_name.as_str()),
        }
    }
}

/// Build the service router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/diagnostico", post(diagnostico_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Bind `settings.bind_addr` and serve until the process is stopped.
pub async fn serve(settings: &ServerSettings) -> Result<(), Box<dyn std::error::Error>> {
    let backend = OpenAiCompletionBackend::from_settings(settings)?;
    match backend.check().await {
        Ok(()) => tracing::info!("Completion backend reachable at {}", settings.backend_url),
        Err(e) => tracing::warn!(
            "Completion backend at {} not reachable yet: {}",
            settings.backend_url,
            e
        ),
    }

    let state = AppState::new(Arc::new(backend), settings);
    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("Diagnostic service listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

async fn diagnostico_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DiagnosticResponse>, ServiceError> {
    let start = Instant::now();
    let patient = parse_patient(&body)?;

    let prompt = render_prompt(&patient);
    let generated = state
        .backend
        .complete(&prompt, &state.params)
        .await
        .map_err(|e| {
            tracing::error!("Failed to generate diagnostic with {}: {}", state.backend.name(), e);
            ServiceError::Inference(e.to_string())
        })?;

    tracing::info!("Processing time: {:.2} seconds", start.elapsed().as_secs_f64());

    Ok(Json(DiagnosticResponse {
        diagnostico: generated.trim().to_string(),
        modelo: state.model_name.to_string(),
        aviso: DISCLAIMER.to_string(),
    }))
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "online".to_string(),
        modelo: state.model_name.to_string(),
    })
}

/// Validate the request body: a JSON object carrying all six patient keys.
fn parse_patient(body: &[u8]) -> Result<PatientData, ServiceError> {
    let invalid = || ServiceError::Validation(INCOMPLETE_PAYLOAD.to_string());

    let value: Value = serde_json::from_slice(body).map_err(|_| invalid())?;
    let object = value.as_object().ok_or_else(invalid)?;
    if let Some(missing) = PATIENT_FIELD_KEYS.iter().find(|key| !object.contains_key(**key)) {
        tracing::debug!("Rejected payload without '{}'", missing);
        return Err(invalid());
    }

    let field = |key: &str| match &object[key] {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };

    Ok(PatientData {
        age: field("idade"),
        sex: field("sexo"),
        symptoms: field("sintomas"),
        vital_signs: field("sinais_vitais"),
        history: field("historico"),
        symptom_onset: field("tempo_inicio"),
    })
}
