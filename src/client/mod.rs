//! Diagnostic client
//!
//! Submits cases to the diagnostic service one at a time and turns every
//! reply (or failure) into an [`Outcome`].

pub mod console;
pub mod runner;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use thiserror::Error;

use crate::error::describe_error_chain;
use crate::service::types::{DiagnosticResponse, HealthResponse};
use crate::storage::settings::ClientSettings;
use crate::types::{Case, Outcome, PatientData};

pub use runner::{run_all, AlwaysContinue, CaseRunner, ContinuePolicy, RunObserver, SilentObserver};

/// Prefix of the report text for a non-2xx reply
pub const STATUS_ERROR_PREFIX: &str = "Erro";
/// Prefix of the report text for a transport failure
pub const TRANSPORT_ERROR_PREFIX: &str = "Erro na requisição";

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Timeout, refused connection, DNS failure, undecodable body
    #[error("{}", describe_error_chain(.0))]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-2xx status
    #[error("HTTP {0}")]
    Status(StatusCode),
    #[error("Invalid service URL '{0}'")]
    InvalidUrl(String),
}

/// HTTP client for the `/diagnostico` endpoint
pub struct DiagnosticClient {
    http: reqwest::Client,
    api_url: Url,
    health_url: Url,
}

impl DiagnosticClient {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let api_url = Url::parse(api_url).map_err(|_| ClientError::InvalidUrl(api_url.to_string()))?;
        let health_url = api_url
            .join("/health")
            .map_err(|_| ClientError::InvalidUrl(api_url.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("triage-bench/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_url,
            health_url,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        Self::new(&settings.api_url, settings.timeout())
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_str()
    }

    /// Send one payload and return the `diagnostico` field of the reply.
    pub async fn submit(&self, patient: &PatientData) -> Result<String, ClientError> {
        let response = self.http.post(self.api_url.clone()).json(patient).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        let body: DiagnosticResponse = response.json().await?;
        Ok(body.diagnostico)
    }

    /// Liveness probe against `GET /health` on the same host.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self.http.get(self.health_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl CaseRunner for DiagnosticClient {
    async fn run_case(&self, case: &Case, model_label: &str) -> Outcome {
        tracing::debug!(case_id = case.id, model = model_label, "Submitting case");
        let start = Instant::now();

        match self.submit(&case.patient).await {
            Ok(diagnostic) => Outcome::success(case, start.elapsed().as_secs_f64(), diagnostic),
            Err(ClientError::Status(status)) => {
                tracing::warn!(case_id = case.id, %status, "Service returned an error status");
                Outcome::error(
                    case,
                    start.elapsed().as_secs_f64(),
                    format!("{}: {}", STATUS_ERROR_PREFIX, status.as_u16()),
                )
            }
            // Transport failures are recorded with zero elapsed time, unlike
            // status errors above which keep the measured duration.
            Err(e) => {
                tracing::warn!(case_id = case.id, "Request failed: {}", e);
                Outcome::error(case, 0.0, format!("{}: {}", TRANSPORT_ERROR_PREFIX, e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::types::OutcomeStatus;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout: Duration) -> DiagnosticClient {
        DiagnosticClient::new(&format!("{}/diagnostico", server.uri()), timeout)
            .expect("failed to create client")
    }

    #[tokio::test]
    async fn test_success_returns_diagnostic_text() {
        let server = MockServer::start().await;
        let case = &catalog::cases()[0];

        Mock::given(method("POST"))
            .and(path("/diagnostico"))
            .and(body_json(&case.patient))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"diagnostico": "VERMELHO"}))
                    .set_delay(Duration::from_millis(300)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let outcome = client.run_case(case, "llama3").await;

        assert_eq!(outcome.status, OutcomeStatus::Success);
        assert_eq!(outcome.response_text, "VERMELHO");
        assert_eq!(outcome.case_id, case.id);
        assert_eq!(outcome.label, case.label);
        assert!(outcome.elapsed_seconds >= 0.3, "elapsed {}", outcome.elapsed_seconds);
        assert!(outcome.elapsed_seconds < 5.0);
        // Two decimal places
        assert_eq!(outcome.elapsed_seconds, (outcome.elapsed_seconds * 100.0).round() / 100.0);
    }

    #[tokio::test]
    async fn test_status_error_embeds_code_and_keeps_elapsed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/diagnostico"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"erro": "Dados do paciente incompletos ou inválidos."}))
                    .set_delay(Duration::from_millis(50)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let case = &catalog::cases()[1];
        let outcome = client.run_case(case, "llama3").await;

        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert_eq!(outcome.response_text, "Erro: 400");
        assert!(outcome.elapsed_seconds >= 0.05);
    }

    #[tokio::test]
    async fn test_server_error_is_recorded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let outcome = client.run_case(&catalog::cases()[2], "llama3").await;
        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert!(outcome.response_text.contains("500"));
    }

    // Transport failures report zero elapsed time while status errors keep
    // the measured duration. This asymmetry is carried over on purpose.
    #[tokio::test]
    async fn test_timeout_reports_zero_elapsed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"diagnostico": "tarde demais"}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_millis(200));
        let outcome = client.run_case(&catalog::cases()[0], "llama3").await;

        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert_eq!(outcome.elapsed_seconds, 0.0);
        assert!(outcome.response_text.starts_with("Erro na requisição: "));
        assert!(outcome.response_text.len() > "Erro na requisição: ".len());
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"modelo": "LLaMA 3"})))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let outcome = client.run_case(&catalog::cases()[0], "llama3").await;

        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert_eq!(outcome.elapsed_seconds, 0.0);
        assert!(outcome.response_text.starts_with(TRANSPORT_ERROR_PREFIX));
    }

    #[tokio::test]
    async fn test_connection_refused_is_a_transport_failure() {
        // Reserve a port, then release it so nothing is listening there.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let client =
            DiagnosticClient::new(&format!("http://127.0.0.1:{}/diagnostico", port), Duration::from_secs(2)).unwrap();
        let outcome = client.run_case(&catalog::cases()[0], "llama3").await;

        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert_eq!(outcome.elapsed_seconds, 0.0);
        assert!(outcome.response_text.starts_with(TRANSPORT_ERROR_PREFIX));
    }

    #[tokio::test]
    async fn test_health_probe() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "online", "modelo": "LLaMA 3"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let health = client.health().await.unwrap();
        assert_eq!(health.status, "online");
        assert_eq!(health.modelo, "LLaMA 3");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let result = DiagnosticClient::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }
}
