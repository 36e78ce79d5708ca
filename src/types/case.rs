//! Case types
//!
//! Defines the clinical vignette submitted to the diagnostic service.

use serde::{Deserialize, Serialize};

/// The six structured fields describing a patient.
///
/// Serialized with the Portuguese wire names the diagnostic service expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientData {
    /// Age in years
    #[serde(rename = "idade")]
    pub age: String,
    /// Sex ("M" / "F")
    #[serde(rename = "sexo")]
    pub sex: String,
    /// Main complaints
    #[serde(rename = "sintomas")]
    pub symptoms: String,
    /// Blood pressure, heart rate, temperature, saturation
    #[serde(rename = "sinais_vitais")]
    pub vital_signs: String,
    /// Relevant medical history
    #[serde(rename = "historico")]
    pub history: String,
    /// Time since symptom onset
    #[serde(rename = "tempo_inicio")]
    pub symptom_onset: String,
}

/// Wire names of the patient fields, in payload order.
pub const PATIENT_FIELD_KEYS: [&str; 6] = [
    "idade",
    "sexo",
    "sintomas",
    "sinais_vitais",
    "historico",
    "tempo_inicio",
];

/// One fixed clinical vignette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    /// 1-based position in the catalog
    pub id: u32,
    /// Short description shown to the operator and written to the report
    pub label: String,
    pub patient: PatientData,
}
