//! Append-only user feedback log
//!
//! Feedback bodies are schemaless: whatever object the UI sends is stored
//! as-is, plus a source marker. Metrics compare the predicted and corrected
//! category per record, treating a missing key and an explicit null alike.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

const FEEDBACK_FILE_NAME: &str = "feedback.jsonl";
const SOURCE_KEY: &str = "source";
const SOURCE_UI: &str = "ui";
const PREDICTED_KEY: &str = "predicted_category";
const CORRECT_KEY: &str = "correct_category";

#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("Feedback log I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Feedback log serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Aggregated agreement counts over the feedback log
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedbackMetrics {
    /// Raw line count, parseable or not.
    pub total: usize,
    pub matches: usize,
    pub mismatches: usize,
}

/// Feedback log stored as one JSON object per line
#[derive(Clone)]
pub struct FeedbackLog {
    path: PathBuf,
}

impl FeedbackLog {
    /// Open the log, touching the file so reads never race its creation.
    pub fn open(data_dir: &Path) -> Result<Self, FeedbackError> {
        let path = data_dir.join(FEEDBACK_FILE_NAME);
        OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path })
    }

    /// Append one feedback record, tagged with the UI source marker
    pub fn append(&self, mut record: Map<String, Value>) -> Result<(), FeedbackError> {
        record.insert(SOURCE_KEY.to_string(), Value::String(SOURCE_UI.to_string()));

        let line = serde_json::to_string(&record)?;
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// Agreement counts between predicted and corrected categories
    pub fn metrics(&self) -> Result<FeedbackMetrics, FeedbackError> {
        let mut total = 0usize;
        let mut matches = 0usize;
        let mut mismatches = 0usize;

        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            for line in content.lines() {
                total += 1;
                let record: Value = match serde_json::from_str(line) {
                    Ok(v) => v,
                    Err(_) => continue,
                };
                let object = match record.as_object() {
                    Some(o) => o,
                    None => continue,
                };

                // Null and absent are the same thing here.
                let predicted = object.get(PREDICTED_KEY).filter(|v| !v.is_null());
                let correct = object.get(CORRECT_KEY).filter(|v| !v.is_null());
                if predicted == correct {
                    matches += 1;
                } else {
                    mismatches += 1;
                }
            }
        }

        Ok(FeedbackMetrics {
            total,
            matches,
            mismatches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_feedback_log() -> (TempDir, FeedbackLog) {
        let dir = tempfile::tempdir().unwrap();
        let log = FeedbackLog::open(dir.path()).unwrap();
        (dir, log)
    }

    fn object(json: &str) -> Map<String, Value> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_append_adds_source_marker() {
        let (dir, log) = test_feedback_log();
        log.append(object(r#"{"predicted_category": "Hardware"}"#))
            .unwrap();

        let content = std::fs::read_to_string(dir.path().join(FEEDBACK_FILE_NAME)).unwrap();
        let record: Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(record["source"], "ui");
        assert_eq!(record["predicted_category"], "Hardware");
    }

    #[test]
    fn test_metrics_on_fresh_log_are_zero() {
        let (_dir, log) = test_feedback_log();
        let metrics = log.metrics().unwrap();
        assert_eq!(metrics.total, 0);
        assert_eq!(metrics.matches, 0);
        assert_eq!(metrics.mismatches, 0);
    }

    #[test]
    fn test_metrics_counts_matches_and_mismatches() {
        let (dir, log) = test_feedback_log();
        log.append(object(
            r#"{"predicted_category": "Hardware", "correct_category": "Hardware"}"#,
        ))
        .unwrap();
        log.append(object(
            r#"{"predicted_category": "Hardware", "correct_category": "Red"}"#,
        ))
        .unwrap();
        // Neither key present counts as agreement.
        log.append(object(r#"{"observation": "sin categoría"}"#))
            .unwrap();

        // An unparseable line raises the total but neither counter.
        let mut file = OpenOptions::new()
            .append(true)
            .open(dir.path().join(FEEDBACK_FILE_NAME))
            .unwrap();
        writeln!(file, "not json").unwrap();

        let metrics = log.metrics().unwrap();
        assert_eq!(metrics.total, 4);
        assert_eq!(metrics.matches, 2);
        assert_eq!(metrics.mismatches, 1);
    }

    #[test]
    fn test_metrics_treats_null_as_missing() {
        let (_dir, log) = test_feedback_log();
        log.append(object(r#"{"predicted_category": null}"#)).unwrap();
        log.append(object(
            r#"{"predicted_category": null, "correct_category": "Red"}"#,
        ))
        .unwrap();

        let metrics = log.metrics().unwrap();
        assert_eq!(metrics.matches, 1);
        assert_eq!(metrics.mismatches, 1);
    }
}
