//! Ticket classification service
//!
//! Wires the inference engine to the authored knowledge base and shapes the
//! outcome into the response envelopes. The "other cause" flag overrides the
//! category and technician after inference; the matched rule still drives the
//! explanation and the suggestion lookup.

use crate::engine::{self, Classification, RuleSet, RuleSetError, UNCLASSIFIED_CATEGORY};
use crate::knowledge::{
    classification_rules, SolutionCatalog, TechnicianDirectory, OTHER_CAUSE_CATEGORY,
    REMOTE_SUPPORT_TECHNICIAN,
};
use crate::model::triage::{
    ClassifyResponse, IterativeClassifyResponse, IterativeExplanation, RuleExplanation,
    TicketFacts, NO_SYMPTOM,
};

/// Classification pipeline shared by the web handlers
pub struct TriageService {
    rules: RuleSet,
    technicians: TechnicianDirectory,
    solutions: SolutionCatalog,
}

impl TriageService {
    pub fn new() -> Result<Self, RuleSetError> {
        let rules = classification_rules()?;
        tracing::info!(rules = rules.len(), "Classification rule table loaded");

        Ok(Self {
            rules,
            technicians: TechnicianDirectory::standard(),
            solutions: SolutionCatalog::standard(),
        })
    }

    /// Single-shot classification of a ticket
    pub fn classify(&self, facts: &TicketFacts) -> ClassifyResponse {
        let symptom = facts.active_symptom();

        // Without any symptom flag the rule table is not consulted at all.
        let classification = match symptom {
            Some(_) => engine::classify(&facts.to_fact_set(), &self.rules),
            None => Classification {
                category: UNCLASSIFIED_CATEGORY,
                rule: None,
            },
        };

        let (category, technician) = if facts.otra_causa {
            (
                OTHER_CAUSE_CATEGORY.to_string(),
                REMOTE_SUPPORT_TECHNICIAN.to_string(),
            )
        } else {
            (
                classification.category.to_string(),
                self.technicians.assign(classification.category).to_string(),
            )
        };

        let explanation = match classification.rule {
            Some(rule) => RuleExplanation {
                id: Some(rule.id.clone()),
                title: Some(rule.title.clone()),
                description: rule.description.clone(),
                solution: rule.solution.clone(),
            },
            None => RuleExplanation::no_match(),
        };

        // The suggestion lookup sees the final category but the matched
        // rule's id, and the rule id takes precedence inside the catalog.
        let suggested_solutions = self
            .solutions
            .suggest_solutions(&category, explanation.id.as_deref());
        let suggested_solution = suggested_solutions.first().cloned();

        ClassifyResponse {
            category,
            technician,
            symptom: symptom.unwrap_or(NO_SYMPTOM).to_string(),
            other_description: facts.other_description().map(str::to_string),
            explanation,
            suggested_solutions,
            suggested_solution,
        }
    }

    /// One round of iterative classification, skipping rules already offered
    pub fn classify_iterative(
        &self,
        facts: &TicketFacts,
        history: &[String],
    ) -> IterativeClassifyResponse {
        let symptom = facts.active_symptom();
        let outcome = engine::classify_iterative(&facts.to_fact_set(), &self.rules, history);

        let (category, technician) = if facts.otra_causa {
            (
                OTHER_CAUSE_CATEGORY.to_string(),
                REMOTE_SUPPORT_TECHNICIAN.to_string(),
            )
        } else {
            let technician = self.technicians.assign(&outcome.category).to_string();
            (outcome.category.clone(), technician)
        };

        IterativeClassifyResponse {
            category,
            technician,
            symptom: symptom.unwrap_or(NO_SYMPTOM).to_string(),
            rule_id: outcome.rule_id.clone(),
            explanation: IterativeExplanation {
                id: outcome.rule_id,
                title: outcome.title,
                description: outcome.description,
            },
            solutions: outcome.solutions,
            future_suggestions: outcome.future_suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EXHAUSTED_DESCRIPTION;
    use crate::model::triage::NO_MATCH_DESCRIPTION;

    fn service() -> TriageService {
        TriageService::new().unwrap()
    }

    #[test]
    fn test_no_flags_is_unclassified_with_coordinator() {
        let response = service().classify(&TicketFacts::default());

        assert_eq!(response.category, "Sin clasificar (General)");
        assert_eq!(response.technician, "Coordinador de Soporte");
        assert_eq!(response.symptom, "Ninguno");
        assert_eq!(response.explanation.id, None);
        assert_eq!(response.explanation.description, NO_MATCH_DESCRIPTION);
        assert_eq!(
            response.suggested_solutions,
            [
                "Solicitar más detalle del síntoma.",
                "Registrar nuevo síntoma para mejorar el sistema.",
            ]
        );
        assert_eq!(
            response.suggested_solution.as_deref(),
            Some("Solicitar más detalle del síntoma.")
        );
    }

    #[test]
    fn test_power_failure_routes_to_hardware_specialist() {
        let facts = TicketFacts {
            pc_no_enciende: true,
            ..Default::default()
        };
        let response = service().classify(&facts);

        assert_eq!(response.category, "Hardware");
        assert_eq!(
            response.technician,
            "Técnico Juan (Especialista en HW/Periféricos)"
        );
        assert_eq!(response.symptom, "pc_no_enciende");
        assert_eq!(response.explanation.id.as_deref(), Some("R-HW-01"));
        assert_eq!(response.explanation.title.as_deref(), Some("PC no enciende"));
        assert_eq!(
            response.explanation.solution.as_deref(),
            Some("Revisar fuente de alimentación, conexiones y realizar diagnóstico de hardware.")
        );
        assert_eq!(
            response.suggested_solutions[0],
            "Revisar/medir PSU y conexiones internas."
        );
    }

    #[test]
    fn test_connectivity_flags_share_the_network_rule() {
        for flag in ["no_puede_conectar_wifi", "sin_acceso_internet"] {
            let facts = TicketFacts {
                no_puede_conectar_wifi: flag == "no_puede_conectar_wifi",
                sin_acceso_internet: flag == "sin_acceso_internet",
                ..Default::default()
            };
            let response = service().classify(&facts);

            assert_eq!(response.category, "Red");
            assert_eq!(
                response.technician,
                "Técnica María (Especialista en Redes/Conectividad)"
            );
            assert_eq!(response.explanation.id.as_deref(), Some("R-RED-01"));
            assert_eq!(response.symptom, flag);
        }
    }

    #[test]
    fn test_rule_order_and_flag_order_diverge() {
        // The PSU rule sits above the generic power rule in the table, but
        // pc_no_enciende is declared first among the flags.
        let facts = TicketFacts {
            pc_no_enciende: true,
            psu_falla: true,
            ..Default::default()
        };
        let response = service().classify(&facts);

        assert_eq!(response.explanation.id.as_deref(), Some("R-HW-PSU-01"));
        assert_eq!(response.symptom, "pc_no_enciende");
    }

    #[test]
    fn test_other_cause_alone_routes_to_remote_support() {
        let facts = TicketFacts {
            otra_causa: true,
            otra_descripcion: Some("la impresora hace un ruido raro".to_string()),
            ..Default::default()
        };
        let response = service().classify(&facts);

        assert_eq!(response.category, "Otra causa");
        assert_eq!(response.technician, "Técnico en línea (Soporte Remoto)");
        assert_eq!(response.symptom, "Ninguno");
        assert_eq!(response.explanation.id, None);
        assert_eq!(
            response.other_description.as_deref(),
            Some("la impresora hace un ruido raro")
        );
        assert_eq!(
            response.suggested_solutions[0],
            "Derivar a soporte remoto para triage."
        );
    }

    #[test]
    fn test_other_cause_overrides_category_but_keeps_matched_rule() {
        let facts = TicketFacts {
            pc_no_enciende: true,
            otra_causa: true,
            ..Default::default()
        };
        let response = service().classify(&facts);

        assert_eq!(response.category, "Otra causa");
        assert_eq!(response.technician, "Técnico en línea (Soporte Remoto)");
        // The explanation still names the matched rule, and the rule id
        // keeps precedence in the suggestion catalog.
        assert_eq!(response.explanation.id.as_deref(), Some("R-HW-01"));
        assert_eq!(
            response.suggested_solutions[0],
            "Revisar/medir PSU y conexiones internas."
        );
    }

    #[test]
    fn test_iterative_rounds_end_in_terminal_outcome() {
        let svc = service();
        let facts = TicketFacts {
            pc_no_enciende: true,
            ..Default::default()
        };

        let first = svc.classify_iterative(&facts, &[]);
        assert_eq!(first.rule_id.as_deref(), Some("R-HW-01"));
        assert_eq!(first.category, "Hardware");
        assert!(!first.solutions.is_empty());

        let history = vec!["R-HW-01".to_string()];
        let second = svc.classify_iterative(&facts, &history);
        assert_eq!(second.rule_id, None);
        assert_eq!(second.category, "Sin clasificar (General)");
        assert_eq!(second.technician, "Coordinador de Soporte");
        assert_eq!(second.explanation.description, EXHAUSTED_DESCRIPTION);
        assert!(second.solutions.is_empty());
        assert_eq!(second.future_suggestions.len(), 2);
        // The symptom keeps reporting the active flag even when exhausted.
        assert_eq!(second.symptom, "pc_no_enciende");
    }

    #[test]
    fn test_iterative_other_cause_override_keeps_rule_id() {
        let facts = TicketFacts {
            ram_falla: true,
            otra_causa: true,
            ..Default::default()
        };
        let response = service().classify_iterative(&facts, &[]);

        assert_eq!(response.category, "Otra causa");
        assert_eq!(response.technician, "Técnico en línea (Soporte Remoto)");
        assert_eq!(response.rule_id.as_deref(), Some("R-HW-RAM-01"));
        assert_eq!(response.explanation.id.as_deref(), Some("R-HW-RAM-01"));
    }
}
