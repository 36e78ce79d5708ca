//! Manchester triage prompt
//!
//! Renders patient data into the fixed ChatML prompt sent to the completion
//! backend.

use crate::types::PatientData;

const SYSTEM_SECTION: &str = r#"<|im_start|>system
Você é um médico especialista em emergências com vasta experiência em triagem e classificação de risco.
Sua tarefa é analisar os dados do paciente e fornecer:

1. Classificação de Risco pelo Protocolo Manchester:
   - VERMELHO (emergência): atendimento imediato
   - LARANJA (muito urgente): atendimento em até 10 minutos
   - AMARELO (urgente): atendimento em até 60 minutos
   - VERDE (pouco urgente): atendimento em até 120 minutos
   - AZUL (não urgente): atendimento em até 240 minutos

2. Sugestão de conduta médica inicial específica para este caso, incluindo exames e intervenções.

3. Cinco hipóteses diagnósticas em ordem de probabilidade.

Base sua análise exclusivamente nos dados fornecidos. Seja conciso e objetivo.
<|im_end|>
"#;

const CLOSING_REQUEST: &str =
    "Por favor, forneça a classificação Manchester, conduta imediata e hipóteses diagnósticas.";

/// Value used in place of an empty field
fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

/// Build the complete prompt for one patient.
pub fn render_prompt(patient: &PatientData) -> String {
    format!(
        "{system}
<|im_start|>user
Dados do Paciente:
- Idade: {age} anos
- Sexo: {sex}
- Sintomas principais: {symptoms}
- Sinais vitais: {vital_signs}
- Histórico relevante: {history}
- Tempo de início dos sintomas: {symptom_onset}

{closing}
<|im_end|>

<|im_start|>assistant
",
        system = SYSTEM_SECTION,
        age = or_default(&patient.age, "Não informada"),
        sex = or_default(&patient.sex, "Não informado"),
        symptoms = or_default(&patient.symptoms, "Não informados"),
        vital_signs = or_default(&patient.vital_signs, "Não informados"),
        history = or_default(&patient.history, "Não informado"),
        symptom_onset = or_default(&patient.symptom_onset, "Não informado"),
        closing = CLOSING_REQUEST,
    )
}
