//! Wire types for ticket classification

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::engine::FactSet;

/// Symptom value reported when no flag is set.
pub const NO_SYMPTOM: &str = "Ninguno";

/// Explanation description when no rule matched.
pub const NO_MATCH_DESCRIPTION: &str = "Ninguna regla coincidió";

/// Boolean symptom flags submitted with a ticket
///
/// Field order is the canonical flag order: when several flags are set, the
/// first one in this order is reported as the ticket's symptom. Unknown JSON
/// keys are ignored; missing flags default to false.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TicketFacts {
    #[serde(default)]
    pub pc_no_enciende: bool,
    #[serde(default)]
    pub periferico_roto: bool,
    #[serde(default)]
    pub tarjeta_video_falla: bool,
    #[serde(default)]
    pub ram_falla: bool,
    #[serde(default)]
    pub disco_falla: bool,
    #[serde(default)]
    pub monitor_sin_senal: bool,
    #[serde(default)]
    pub psu_falla: bool,
    #[serde(default)]
    pub sobrecalentamiento: bool,
    #[serde(default)]
    pub no_puede_conectar_wifi: bool,
    #[serde(default)]
    pub sin_acceso_internet: bool,
    #[serde(default)]
    pub programa_se_cierra: bool,
    #[serde(default)]
    pub lentitud_sistema: bool,
    #[serde(default)]
    pub actualizaciones_fallidas: bool,
    #[serde(default)]
    pub incompatibilidad_software: bool,
    #[serde(default)]
    pub acceso_denegado: bool,
    #[serde(default)]
    pub no_puede_instalar: bool,
    #[serde(default)]
    pub email_sospechoso: bool,
    #[serde(default)]
    pub software_corporativo_falla: bool,
    #[serde(default)]
    pub malware_detectado: bool,
    /// The cause is outside the symptom list; routes to remote support.
    #[serde(default)]
    pub otra_causa: bool,
    /// Free-text description accompanying `otra_causa`.
    #[serde(default)]
    pub otra_descripcion: Option<String>,
}

impl TicketFacts {
    /// Symptom flags in canonical order (`otra_causa` is not a symptom).
    fn flags(&self) -> [(&'static str, bool); 19] {
        [
            ("pc_no_enciende", self.pc_no_enciende),
            ("periferico_roto", self.periferico_roto),
            ("tarjeta_video_falla", self.tarjeta_video_falla),
            ("ram_falla", self.ram_falla),
            ("disco_falla", self.disco_falla),
            ("monitor_sin_senal", self.monitor_sin_senal),
            ("psu_falla", self.psu_falla),
            ("sobrecalentamiento", self.sobrecalentamiento),
            ("no_puede_conectar_wifi", self.no_puede_conectar_wifi),
            ("sin_acceso_internet", self.sin_acceso_internet),
            ("programa_se_cierra", self.programa_se_cierra),
            ("lentitud_sistema", self.lentitud_sistema),
            ("actualizaciones_fallidas", self.actualizaciones_fallidas),
            ("incompatibilidad_software", self.incompatibilidad_software),
            ("acceso_denegado", self.acceso_denegado),
            ("no_puede_instalar", self.no_puede_instalar),
            ("email_sospechoso", self.email_sospechoso),
            ("software_corporativo_falla", self.software_corporativo_falla),
            ("malware_detectado", self.malware_detectado),
        ]
    }

    /// First active symptom flag in canonical order.
    ///
    /// Independent of which flag a matching rule actually tested; the rule
    /// table has its own order.
    pub fn active_symptom(&self) -> Option<&'static str> {
        self.flags()
            .into_iter()
            .find(|(_, active)| *active)
            .map(|(name, _)| name)
    }

    /// Facts map consumed by the inference engine.
    pub fn to_fact_set(&self) -> FactSet {
        let mut facts = FactSet::new();
        for (name, active) in self.flags() {
            facts.set(name, active);
        }
        facts.with("otra_causa", self.otra_causa)
    }

    /// The free-text description, if it carries any content.
    pub fn other_description(&self) -> Option<&str> {
        self.otra_descripcion
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Rule metadata echoed with a classification so the user sees why
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RuleExplanation {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: String,
    /// The matched rule's single-line remediation note.
    pub solution: Option<String>,
}

impl RuleExplanation {
    /// Fixed explanation when no rule matched.
    pub fn no_match() -> Self {
        Self {
            id: None,
            title: None,
            description: NO_MATCH_DESCRIPTION.to_string(),
            solution: None,
        }
    }
}

/// Response of the single-shot classification endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClassifyResponse {
    pub category: String,
    pub technician: String,
    /// First active symptom flag, or "Ninguno" when none was set.
    pub symptom: String,
    /// Echo of the submitted free-text description, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_description: Option<String>,
    pub explanation: RuleExplanation,
    /// Up to two suggestions from the solution catalog.
    pub suggested_solutions: Vec<String>,
    /// First entry of `suggested_solutions`, kept for older clients.
    pub suggested_solution: Option<String>,
}

/// Request body of the iterative classification endpoint
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IterativeClassifyRequest {
    pub facts: TicketFacts,
    /// Rule ids already offered in earlier rounds.
    #[serde(default)]
    pub history: Vec<String>,
}

/// Slim rule reference echoed by the iterative endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IterativeExplanation {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: String,
}

/// Response of the iterative classification endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IterativeClassifyResponse {
    pub category: String,
    pub technician: String,
    pub symptom: String,
    pub rule_id: Option<String>,
    pub explanation: IterativeExplanation,
    /// Full remediation list of the offered rule.
    pub solutions: Vec<String>,
    pub future_suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_symptom_follows_canonical_order() {
        let facts = TicketFacts {
            psu_falla: true,
            pc_no_enciende: true,
            ..Default::default()
        };
        // pc_no_enciende is declared first even though the PSU rule would
        // match first in the rule table.
        assert_eq!(facts.active_symptom(), Some("pc_no_enciende"));
    }

    #[test]
    fn test_no_active_symptom_when_only_other_cause() {
        let facts = TicketFacts {
            otra_causa: true,
            otra_descripcion: Some("la impresora hace ruidos".to_string()),
            ..Default::default()
        };
        assert_eq!(facts.active_symptom(), None);
    }

    #[test]
    fn test_deserializes_with_missing_and_unknown_fields() {
        let facts: TicketFacts =
            serde_json::from_str(r#"{"ram_falla": true, "campo_desconocido": true}"#).unwrap();
        assert!(facts.ram_falla);
        assert!(!facts.pc_no_enciende);
        assert_eq!(facts.active_symptom(), Some("ram_falla"));
    }

    #[test]
    fn test_fact_set_carries_all_flags() {
        let facts = TicketFacts {
            sin_acceso_internet: true,
            otra_causa: true,
            ..Default::default()
        };
        let set = facts.to_fact_set();
        assert!(set.get("sin_acceso_internet"));
        assert!(set.get("otra_causa"));
        assert!(!set.get("psu_falla"));
    }

    #[test]
    fn test_blank_other_description_reads_as_absent() {
        let facts = TicketFacts {
            otra_descripcion: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(facts.other_description(), None);
    }
}
