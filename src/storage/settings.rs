//! Settings storage
//!
//! Manages persistence of client and service settings.

use crate::storage::{get_data_dir, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default diagnostic endpoint the client targets
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/diagnostico";
/// Per-request ceiling for the client, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_RESULTS_DIR: &str = "resultados";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_MODEL_NAME: &str = "LLaMA 3";

/// Client-side settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Full URL of the diagnostic endpoint
    pub api_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Directory where CSV reports are written
    pub results_dir: PathBuf,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
        }
    }
}

impl ClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Service-side settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Socket address the service listens on
    pub bind_addr: String,
    /// Base URL of the OpenAI-compatible completion server
    pub backend_url: String,
    /// Model identifier sent to the completion server
    #[serde(default = "default_backend_model")]
    pub backend_model: String,
    /// Display name reported in `modelo`
    pub model_name: String,
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
    /// Temperature parameter for text generation (0.0 - 2.0)
    pub temperature: f32,
    /// Top-p (nucleus sampling) parameter (0.0 - 1.0)
    pub top_p: f32,
    /// Repetition penalty (1.0 = disabled)
    pub repeat_penalty: f32,
    /// Timeout for one completion call, in seconds
    #[serde(default = "default_backend_timeout")]
    pub backend_timeout_secs: u64,
}

fn default_backend_model() -> String {
    "llama-3-8b".to_string()
}

fn default_backend_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            backend_model: default_backend_model(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            max_tokens: 400,
            temperature: 0.1,
            top_p: 0.9,
            repeat_penalty: 1.1,
            backend_timeout_secs: default_backend_timeout(),
        }
    }
}

impl ServerSettings {
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }
}

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub client: ClientSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

impl Settings {
    /// Validate settings values
    ///
    /// Ensures generation parameters are within acceptable ranges and that
    /// no address is left blank.
    pub fn validate(&mut self) {
        let server = &mut self.server;
        server.temperature = server.temperature.clamp(0.0, 2.0);
        server.top_p = server.top_p.clamp(0.0, 1.0);
        server.repeat_penalty = server.repeat_penalty.clamp(0.0, 2.0);
        server.max_tokens = server.max_tokens.clamp(1, 8192);

        if server.backend_timeout_secs == 0 {
            server.backend_timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
        if server.bind_addr.trim().is_empty() {
            server.bind_addr = DEFAULT_BIND_ADDR.to_string();
        }
        if server.backend_url.trim().is_empty() {
            server.backend_url = DEFAULT_BACKEND_URL.to_string();
        }
        if server.model_name.trim().is_empty() {
            server.model_name = DEFAULT_MODEL_NAME.to_string();
        }

        let client = &mut self.client;
        if client.api_url.trim().is_empty() {
            client.api_url = DEFAULT_API_URL.to_string();
        }
        if client.timeout_secs == 0 {
            client.timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
        if client.results_dir.as_os_str().is_empty() {
            client.results_dir = PathBuf::from(DEFAULT_RESULTS_DIR);
        }
    }

    /// Apply `TRIAGE_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("TRIAGE_API_URL") {
            self.client.api_url = url;
        }
        if let Some(dir) = non_empty("TRIAGE_RESULTS_DIR") {
            self.client.results_dir = PathBuf::from(dir);
        }
        if let Some(url) = non_empty("TRIAGE_BACKEND_URL") {
            self.server.backend_url = url;
        }
        if let Some(addr) = non_empty("TRIAGE_BIND_ADDR") {
            self.server.bind_addr = addr;
        }
    }
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from disk, then apply environment overrides
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> Settings {
    let mut settings = match get_settings_path().and_then(|p| load_settings_from(&p)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            Settings::default()
        }
    };
    settings.apply_env_overrides();
    settings.validate();
    settings
}

/// Load settings from a specific file
pub fn load_settings_from(path: &Path) -> Result<Settings, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(Settings::default());
    }

    let json = fs::read_to_string(path)?;
    let mut settings: Settings = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Save settings to disk
pub fn save_settings(settings: &Settings) -> Result<(), StorageError> {
    save_settings_to(settings, &get_settings_path()?)
}

/// Save settings to a specific file
pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<(), StorageError> {
    // Ensure the parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to {}", path.display());
    Ok(())
}
