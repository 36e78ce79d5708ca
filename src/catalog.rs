//! Case catalog
//!
//! The fixed, ordered set of clinical vignettes sent to the diagnostic
//! service. Compiled into the binary; ids are 1-based and sequential.

use crate::types::{Case, PatientData};

struct Vignette {
    label: &'static str,
    age: &'static str,
    sex: &'static str,
    symptoms: &'static str,
    vital_signs: &'static str,
    history: &'static str,
    symptom_onset: &'static str,
}

const VIGNETTES: [Vignette; 10] = [
    Vignette {
        label: "Dor Torácica Aguda",
        age: "58",
        sex: "M",
        symptoms: "Dor torácica opressiva de forte intensidade com irradiação para membro superior esquerdo, sudorese, náusea",
        vital_signs: "PA 165/90 mmHg, FC 102 bpm, Temp 36.5°C, SatO2 94%",
        history: "Hipertensão, diabetes tipo 2, ex-tabagista (30 maços/ano)",
        symptom_onset: "2 horas",
    },
    Vignette {
        label: "Dispneia Progressiva",
        age: "72",
        sex: "F",
        symptoms: "Falta de ar progressiva há 3 dias, tosse seca, ortopneia, edema em membros inferiores",
        vital_signs: "PA 150/95 mmHg, FC 110 bpm, Temp 37.1°C, SatO2 88% em ar ambiente",
        history: "Insuficiência cardíaca, fibrilação atrial, uso de furosemida (suspendeu há 5 dias)",
        symptom_onset: "3 dias, com piora nas últimas 12 horas",
    },
    Vignette {
        label: "Sintomas Neurológicos Agudos",
        age: "67",
        sex: "M",
        symptoms: "Hemiparesia à direita de início súbito, disartria, desvio de rima labial à esquerda",
        vital_signs: "PA 190/105 mmHg, FC 88 bpm, Temp 36.8°C, SatO2 96%",
        history: "Hipertensão mal controlada, dislipidemia",
        symptom_onset: "45 minutos",
    },
    Vignette {
        label: "Trauma Múltiplo",
        age: "22",
        sex: "M",
        symptoms: "Dor abdominal intensa após acidente de moto, escoriações múltiplas, deformidade em membro inferior direito",
        vital_signs: "PA 90/60 mmHg, FC 125 bpm, Temp 36.2°C, SatO2 93%",
        history: "Sem comorbidades conhecidas",
        symptom_onset: "30 minutos (tempo do acidente)",
    },
    Vignette {
        label: "Febre e Letargia em Criança",
        age: "3",
        sex: "F",
        symptoms: "Febre alta (39.8°C), irritabilidade, sonolência, rigidez de nuca, vômitos, exantema petequial",
        vital_signs: "PA 85/50 mmHg, FC 150 bpm, Temp 39.8°C, SatO2 95%",
        history: "Vacinação em dia, sem comorbidades",
        symptom_onset: "12 horas",
    },
    Vignette {
        label: "Dor Abdominal Aguda",
        age: "45",
        sex: "F",
        symptoms: "Dor em quadrante inferior direito, náuseas, febre baixa, anorexia",
        vital_signs: "PA 125/75 mmHg, FC 92 bpm, Temp 37.8°C, SatO2 98%",
        history: "Colecistectomia prévia, apendicectomia negada",
        symptom_onset: "24 horas, com piora nas últimas 6 horas",
    },
    Vignette {
        label: "Crise Psiquiátrica",
        age: "32",
        sex: "M",
        symptoms: "Agitação psicomotora, discurso incoerente, alucinações auditivas, agressividade, insônia há 3 dias",
        vital_signs: "PA 150/90 mmHg, FC 105 bpm, Temp 36.9°C, SatO2 98%",
        history: "Esquizofrenia diagnosticada, não faz uso regular da medicação há 2 semanas",
        symptom_onset: "Piora gradual há 1 semana",
    },
    Vignette {
        label: "Dispneia Súbita",
        age: "48",
        sex: "F",
        symptoms: "Falta de ar súbita, dor torácica pleurítica, taquipneia",
        vital_signs: "PA 110/70 mmHg, FC 115 bpm, Temp 37.0°C, SatO2 89%",
        history: "Pós-operatório de artroplastia de joelho há 10 dias, em uso de anticoagulante",
        symptom_onset: "2 horas",
    },
    Vignette {
        label: "Crise Convulsiva",
        age: "28",
        sex: "F",
        symptoms: "Convulsão tônico-clônica generalizada, período pós-ictal com confusão mental",
        vital_signs: "PA 140/85 mmHg, FC 108 bpm, Temp 36.7°C, SatO2 94%",
        history: "Epilepsia conhecida, gravidez de 18 semanas",
        symptom_onset: "Crise há 15 minutos, duração aproximada de 3 minutos",
    },
    Vignette {
        label: "Intoxicação",
        age: "17",
        sex: "F",
        symptoms: "Sonolência, vômitos, pupilas mióticas, bradicardia",
        vital_signs: "PA 90/50 mmHg, FC 52 bpm, Temp 35.8°C, SatO2 91%",
        history: "Histórico de depressão, encontrada em casa com frascos vazios de benzodiazepínicos",
        symptom_onset: "Desconhecido, encontrada há aproximadamente 1 hora",
    },
];

/// Build the catalog in its fixed order.
pub fn cases() -> Vec<Case> {
    VIGNETTES
        .iter()
        .zip(1u32..)
        .map(|(v, id)| Case {
            id,
            label: v.label.to_string(),
            patient: PatientData {
                age: v.age.to_string(),
                sex: v.sex.to_string(),
                symptoms: v.symptoms.to_string(),
                vital_signs: v.vital_signs.to_string(),
                history: v.history.to_string(),
                symptom_onset: v.symptom_onset.to_string(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_sequential() {
        let catalog = cases();
        assert_eq!(catalog.len(), 10);
        for (index, case) in catalog.iter().enumerate() {
            assert_eq!(case.id as usize, index + 1);
        }
    }

    #[test]
    fn test_catalog_fields_are_filled() {
        for case in cases() {
            assert!(!case.label.is_empty());
            let p = &case.patient;
            for field in [&p.age, &p.sex, &p.symptoms, &p.vital_signs, &p.history, &p.symptom_onset] {
                assert!(!field.trim().is_empty(), "case {} has an empty field", case.id);
            }
        }
    }

    #[test]
    fn test_catalog_order_is_stable() {
        let catalog = cases();
        assert_eq!(catalog[0].label, "Dor Torácica Aguda");
        assert_eq!(catalog[9].label, "Intoxicação");
        assert_eq!(catalog, cases());
    }
}
