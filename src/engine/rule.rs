//! Classification rules and the ordered rule table

use serde::{Deserialize, Serialize};

use super::Predicate;

/// A single classification rule
///
/// Position in the table is significant: earlier rules win ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Stable identifier, unique within a table (e.g. "R-HW-01").
    pub id: String,
    pub title: String,
    pub description: String,
    /// Condition over the ticket facts.
    pub predicate: Predicate,
    /// Category assigned when the predicate holds.
    pub category: String,
    /// Single-line remediation note shown with the rule explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    /// Ordered remediation steps for the iterative flow.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub solutions: Vec<String>,
    /// Follow-up actions once the immediate steps are exhausted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub future_suggestions: Vec<String>,
}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        predicate: Predicate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            predicate,
            category: category.into(),
            solution: None,
            solutions: Vec::new(),
            future_suggestions: Vec::new(),
        }
    }

    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = Some(solution.into());
        self
    }

    pub fn with_solutions<I, S>(mut self, solutions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.solutions = solutions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_future_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.future_suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }
}

/// Table construction error
#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    #[error("duplicate rule id: {0}")]
    DuplicateId(String),
}

/// Ordered, validated rule table
///
/// Construction rejects duplicate ids so that exclusion by id and the
/// explanation metadata stay unambiguous. The table is immutable afterwards.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleSetError> {
        let mut seen = std::collections::HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(RuleSetError::DuplicateId(rule.id.clone()));
            }
        }
        Ok(Self { rules })
    }

    /// Rules in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str) -> Rule {
        Rule::new(id, "t", "d", Predicate::flag("x"), "Hardware")
    }

    #[test]
    fn test_ruleset_preserves_order() {
        let set = RuleSet::new(vec![rule("R-1"), rule("R-2"), rule("R-3")]).unwrap();
        let ids: Vec<&str> = set.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["R-1", "R-2", "R-3"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_ruleset_rejects_duplicate_ids() {
        let err = RuleSet::new(vec![rule("R-1"), rule("R-1")]).unwrap_err();
        assert!(matches!(err, RuleSetError::DuplicateId(id) if id == "R-1"));
    }

    #[test]
    fn test_empty_ruleset_is_valid() {
        let set = RuleSet::new(Vec::new()).unwrap();
        assert!(set.is_empty());
    }
}
