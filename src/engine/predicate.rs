//! Predicate expression trees evaluated against ticket facts
//!
//! Predicates are plain data, so a rule table can be serialized, inspected,
//! and validated without executing anything. Evaluation is fallible: a
//! malformed tree (empty combinator group, runaway nesting) reports an error
//! instead of panicking, and the engine decides what to do with it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maximum nesting depth accepted during evaluation.
const MAX_DEPTH: usize = 16;

/// Boolean ticket facts keyed by symptom flag name.
///
/// Missing keys read as `false`; unknown keys are inert unless a predicate
/// names them.
#[derive(Debug, Clone, Default)]
pub struct FactSet {
    flags: BTreeMap<String, bool>,
}

impl FactSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: bool) {
        self.flags.insert(key.into(), value);
    }

    /// Builder-style `set`, convenient for tests and conversions.
    pub fn with(mut self, key: impl Into<String>, value: bool) -> Self {
        self.set(key, value);
        self
    }

    /// Value of a flag; absent flags read as `false`.
    pub fn get(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }
}

/// Evaluation fault for a malformed predicate tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredicateError {
    #[error("empty predicate group")]
    EmptyGroup,

    #[error("predicate nesting deeper than {MAX_DEPTH} levels")]
    TooDeep,
}

/// A boolean condition over a [`FactSet`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// True when the named flag is set.
    Flag(String),
    /// True when at least one child is true.
    AnyOf(Vec<Predicate>),
    /// True when every child is true.
    AllOf(Vec<Predicate>),
    /// Negation of the child.
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn flag(name: impl Into<String>) -> Self {
        Predicate::Flag(name.into())
    }

    pub fn any_of(children: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::AnyOf(children.into_iter().collect())
    }

    pub fn all_of(children: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::AllOf(children.into_iter().collect())
    }

    pub fn not(inner: Predicate) -> Self {
        Predicate::Not(Box::new(inner))
    }

    /// Evaluate against the given facts.
    ///
    /// Missing flags are not a fault, they read as `false`. Structural
    /// problems are: an empty `any_of`/`all_of` group has no defined truth
    /// value here, and trees nested beyond [`MAX_DEPTH`] are rejected.
    pub fn eval(&self, facts: &FactSet) -> Result<bool, PredicateError> {
        self.eval_at(facts, 0)
    }

    fn eval_at(&self, facts: &FactSet, depth: usize) -> Result<bool, PredicateError> {
        if depth >= MAX_DEPTH {
            return Err(PredicateError::TooDeep);
        }

        match self {
            Predicate::Flag(name) => Ok(facts.get(name)),
            Predicate::AnyOf(children) => {
                if children.is_empty() {
                    return Err(PredicateError::EmptyGroup);
                }
                for child in children {
                    if child.eval_at(facts, depth + 1)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Predicate::AllOf(children) => {
                if children.is_empty() {
                    return Err(PredicateError::EmptyGroup);
                }
                for child in children {
                    if !child.eval_at(facts, depth + 1)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Predicate::Not(inner) => Ok(!inner.eval_at(facts, depth + 1)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_flag_reads_false() {
        let facts = FactSet::new();
        assert_eq!(Predicate::flag("pc_no_enciende").eval(&facts), Ok(false));
    }

    #[test]
    fn test_flag_value() {
        let facts = FactSet::new()
            .with("psu_falla", true)
            .with("ram_falla", false);
        assert_eq!(Predicate::flag("psu_falla").eval(&facts), Ok(true));
        assert_eq!(Predicate::flag("ram_falla").eval(&facts), Ok(false));
    }

    #[test]
    fn test_any_of() {
        let facts = FactSet::new().with("sin_acceso_internet", true);
        let predicate = Predicate::any_of([
            Predicate::flag("no_puede_conectar_wifi"),
            Predicate::flag("sin_acceso_internet"),
        ]);
        assert_eq!(predicate.eval(&facts), Ok(true));
        assert_eq!(predicate.eval(&FactSet::new()), Ok(false));
    }

    #[test]
    fn test_all_of_and_not() {
        let facts = FactSet::new().with("a", true).with("b", true);
        let both = Predicate::all_of([Predicate::flag("a"), Predicate::flag("b")]);
        assert_eq!(both.eval(&facts), Ok(true));

        let negated = Predicate::not(Predicate::flag("a"));
        assert_eq!(negated.eval(&facts), Ok(false));
        assert_eq!(negated.eval(&FactSet::new()), Ok(true));
    }

    #[test]
    fn test_empty_group_is_a_fault() {
        let facts = FactSet::new();
        assert_eq!(
            Predicate::AnyOf(vec![]).eval(&facts),
            Err(PredicateError::EmptyGroup)
        );
        assert_eq!(
            Predicate::AllOf(vec![]).eval(&facts),
            Err(PredicateError::EmptyGroup)
        );
    }

    #[test]
    fn test_nesting_depth_guard() {
        let mut predicate = Predicate::flag("x");
        for _ in 0..MAX_DEPTH {
            predicate = Predicate::not(predicate);
        }
        assert_eq!(
            predicate.eval(&FactSet::new()),
            Err(PredicateError::TooDeep)
        );
    }

    #[test]
    fn test_predicate_deserializes_from_json() {
        let json = r#"{"any_of": [{"flag": "no_puede_conectar_wifi"}, {"flag": "sin_acceso_internet"}]}"#;
        let predicate: Predicate = serde_json::from_str(json).unwrap();
        let facts = FactSet::new().with("no_puede_conectar_wifi", true);
        assert_eq!(predicate.eval(&facts), Ok(true));
    }
}
