//! Report writer
//!
//! Persists a (possibly partial) run as a timestamped CSV file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use thiserror::Error;

use crate::types::Run;

/// Header row, in column order
pub const REPORT_HEADER: [&str; 4] = ["ID", "Descrição", "Tempo Resposta (s)", "Resposta"];

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const FALLBACK_LABEL: &str = "modelo";

/// Report errors
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Cannot write report at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes reports under a fixed results directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    results_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Write `run` stamped with the local clock.
    pub fn write(&self, run: &Run, model_label: &str) -> Result<PathBuf, ReportError> {
        self.write_at(run, model_label, Local::now())
    }

    /// Write `run` to `teste_<label>_<YYYYMMDD_HHMMSS>.csv`.
    pub fn write_at<Tz>(&self, run: &Run, model_label: &str, timestamp: DateTime<Tz>) -> Result<PathBuf, ReportError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        fs::create_dir_all(&self.results_dir).map_err(|source| ReportError::Io {
            path: self.results_dir.clone(),
            source,
        })?;

        let path = self.report_path(model_label, &timestamp);
        let file = fs::File::create(&path).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;

        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(file);
        writer.write_record(REPORT_HEADER)?;
        for outcome in run.outcomes() {
            writer.write_record([
                outcome.case_id.to_string(),
                outcome.label.clone(),
                outcome.elapsed_seconds.to_string(),
                outcome.response_text.clone(),
            ])?;
        }
        writer.flush().map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!("Report written to {} ({} rows)", path.display(), run.len());
        Ok(path)
    }

    /// Artifact path for a given label and timestamp.
    pub fn report_path<Tz>(&self, model_label: &str, timestamp: &DateTime<Tz>) -> PathBuf
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let file_name = format!(
            "teste_{}_{}.csv",
            sanitize_label(model_label),
            timestamp.format(TIMESTAMP_FORMAT)
        );
        self.results_dir.join(file_name)
    }
}

/// Make an operator-typed label safe to embed in a file name.
pub fn sanitize_label(label: &str) -> String {
    let mut sanitized: String = label
        .trim()
        .chars()
        .map(|ch| {
            let invalid = matches!(ch, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*');
            if invalid || ch.is_control() {
                '_'
            } else {
                ch
            }
        })
        .collect();

    while sanitized.ends_with('.') || sanitized.ends_with(' ') {
        sanitized.pop();
    }

    if sanitized.is_empty() {
        return FALLBACK_LABEL.to_string();
    }
    sanitized
}
