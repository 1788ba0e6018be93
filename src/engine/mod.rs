//! Forward-chaining inference over an ordered rule table
//!
//! Both engines are pure functions: the rule table is passed in explicitly,
//! nothing is cached, and the same facts against the same table always give
//! the same answer. A rule whose predicate cannot be evaluated is skipped
//! with a warning so one malformed rule never blocks the rest of the table.

pub mod predicate;
pub mod rule;

use std::collections::HashSet;

pub use predicate::{FactSet, Predicate, PredicateError};
pub use rule::{Rule, RuleSet, RuleSetError};

/// Category assigned when no rule matches.
pub const UNCLASSIFIED_CATEGORY: &str = "Sin clasificar (General)";

/// Terminal description once the iterative engine has nothing left to offer.
pub const EXHAUSTED_DESCRIPTION: &str =
    "No se encontró coincidencia con las reglas actuales o ya se agotaron.";

/// Fixed follow-ups accompanying the terminal iterative outcome.
pub const EXHAUSTED_FUTURE_SUGGESTIONS: [&str; 2] = [
    "Describa un nuevo síntoma o causa en texto libre.",
    "Puede registrar el nuevo síntoma desde el menú de 'Sugerencias' para mejorar el sistema.",
];

/// Result of a single-shot classification
#[derive(Debug, Clone, PartialEq)]
pub struct Classification<'a> {
    /// Matched rule's category, or [`UNCLASSIFIED_CATEGORY`].
    pub category: &'a str,
    /// The matching rule, when one matched.
    pub rule: Option<&'a Rule>,
}

/// One round of iterative classification
#[derive(Debug, Clone, PartialEq)]
pub struct IterativeOutcome {
    pub category: String,
    pub rule_id: Option<String>,
    pub title: Option<String>,
    pub description: String,
    pub solutions: Vec<String>,
    pub future_suggestions: Vec<String>,
}

impl IterativeOutcome {
    /// Terminal outcome: no rule left to offer.
    fn exhausted() -> Self {
        Self {
            category: UNCLASSIFIED_CATEGORY.to_string(),
            rule_id: None,
            title: None,
            description: EXHAUSTED_DESCRIPTION.to_string(),
            solutions: Vec::new(),
            future_suggestions: EXHAUSTED_FUTURE_SUGGESTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Whether this is the terminal no-rule-left outcome.
    pub fn is_exhausted(&self) -> bool {
        self.rule_id.is_none()
    }
}

/// First matching rule in table order wins.
///
/// Returns the unclassified fallback when nothing matches. Predicate faults
/// skip the offending rule and continue down the table.
pub fn classify<'a>(facts: &FactSet, rules: &'a RuleSet) -> Classification<'a> {
    for rule in rules.iter() {
        match rule.predicate.eval(facts) {
            Ok(true) => {
                return Classification {
                    category: &rule.category,
                    rule: Some(rule),
                }
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(rule_id = %rule.id, error = %e, "Skipping rule with faulty predicate");
            }
        }
    }

    Classification {
        category: UNCLASSIFIED_CATEGORY,
        rule: None,
    }
}

/// Like [`classify`], but rules whose id is in `excluded_ids` are passed over
/// before their predicate is even evaluated.
///
/// The exclusion set is owned by the caller; the engine keeps no state
/// between rounds. When no rule remains, the fixed terminal outcome invites
/// the user to describe or register a new symptom.
pub fn classify_iterative(
    facts: &FactSet,
    rules: &RuleSet,
    excluded_ids: &[String],
) -> IterativeOutcome {
    let excluded: HashSet<&str> = excluded_ids.iter().map(String::as_str).collect();

    for rule in rules.iter() {
        if excluded.contains(rule.id.as_str()) {
            continue;
        }
        match rule.predicate.eval(facts) {
            Ok(true) => {
                return IterativeOutcome {
                    category: rule.category.clone(),
                    rule_id: Some(rule.id.clone()),
                    title: Some(rule.title.clone()),
                    description: rule.description.clone(),
                    solutions: rule.solutions.clone(),
                    future_suggestions: rule.future_suggestions.clone(),
                }
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(rule_id = %rule.id, error = %e, "Skipping rule with faulty predicate");
            }
        }
    }

    IterativeOutcome::exhausted()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RuleSet {
        RuleSet::new(vec![
            Rule::new("R-A", "A", "first", Predicate::flag("shared"), "Hardware")
                .with_solutions(["step a1", "step a2"])
                .with_future_suggestions(["later a"]),
            Rule::new("R-B", "B", "second", Predicate::flag("shared"), "Red"),
            Rule::new("R-C", "C", "third", Predicate::flag("only_c"), "Software"),
        ])
        .unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let facts = FactSet::new().with("shared", true);
        let result = classify(&facts, &table());
        assert_eq!(result.category, "Hardware");
        assert_eq!(result.rule.map(|r| r.id.as_str()), Some("R-A"));
    }

    #[test]
    fn test_no_match_falls_back_to_unclassified() {
        let result = classify(&FactSet::new(), &table());
        assert_eq!(result.category, UNCLASSIFIED_CATEGORY);
        assert!(result.rule.is_none());
    }

    #[test]
    fn test_faulty_rule_is_skipped_not_fatal() {
        let rules = RuleSet::new(vec![
            Rule::new("R-BAD", "bad", "broken", Predicate::AnyOf(vec![]), "Hardware"),
            Rule::new("R-OK", "ok", "fine", Predicate::flag("hit"), "Red"),
        ])
        .unwrap();

        let facts = FactSet::new().with("hit", true);
        let result = classify(&facts, &rules);
        assert_eq!(result.rule.map(|r| r.id.as_str()), Some("R-OK"));

        // A table with only the broken rule still terminates cleanly.
        let broken_only = RuleSet::new(vec![Rule::new(
            "R-BAD",
            "bad",
            "broken",
            Predicate::AnyOf(vec![]),
            "Hardware",
        )])
        .unwrap();
        let result = classify(&facts, &broken_only);
        assert_eq!(result.category, UNCLASSIFIED_CATEGORY);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let facts = FactSet::new().with("shared", true).with("only_c", true);
        let first = classify(&facts, &table());
        for _ in 0..10 {
            let again = classify(&facts, &table());
            assert_eq!(again.category, first.category);
            assert_eq!(
                again.rule.map(|r| r.id.as_str()),
                first.rule.map(|r| r.id.as_str())
            );
        }
    }

    #[test]
    fn test_iterative_skips_excluded_ids() {
        let facts = FactSet::new().with("shared", true);

        let first = classify_iterative(&facts, &table(), &[]);
        assert_eq!(first.rule_id.as_deref(), Some("R-A"));
        assert_eq!(first.solutions, ["step a1", "step a2"]);
        assert_eq!(first.future_suggestions, ["later a"]);

        let second = classify_iterative(&facts, &table(), &["R-A".to_string()]);
        assert_eq!(second.rule_id.as_deref(), Some("R-B"));
        assert_eq!(second.category, "Red");
        // R-B carries no solutions of its own.
        assert!(second.solutions.is_empty());
    }

    #[test]
    fn test_iterative_exhaustion_returns_terminal_outcome() {
        let facts = FactSet::new().with("shared", true);
        let history = vec!["R-A".to_string(), "R-B".to_string()];

        let outcome = classify_iterative(&facts, &table(), &history);
        assert!(outcome.is_exhausted());
        assert_eq!(outcome.category, UNCLASSIFIED_CATEGORY);
        assert_eq!(outcome.description, EXHAUSTED_DESCRIPTION);
        assert!(outcome.solutions.is_empty());
        assert_eq!(outcome.future_suggestions.len(), 2);
        assert_eq!(
            outcome.future_suggestions[0],
            "Describa un nuevo síntoma o causa en texto libre."
        );
    }

    #[test]
    fn test_iterative_on_empty_facts_is_terminal() {
        let outcome = classify_iterative(&FactSet::new(), &table(), &[]);
        assert!(outcome.is_exhausted());
    }
}
