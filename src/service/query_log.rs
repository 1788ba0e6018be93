//! Append-only query log with daily file rotation
//!
//! Every classification is recorded as one JSON line in the UTC day file
//! `queries-YYYY-MM-DD.jsonl`. Listing and metrics read the files back
//! tolerantly: unparseable lines still count toward the raw total of a
//! listing but are skipped everywhere else.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::model::triage::{ClassifyResponse, IterativeClassifyResponse, TicketFacts};

const QUERY_FILE_PREFIX: &str = "queries-";
const QUERY_FILE_EXT: &str = ".jsonl";
/// Un-rotated log written by early deployments, deleted on startup.
const LEGACY_QUERY_FILE: &str = "queries.jsonl";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Metrics bucket for records without a category.
const UNKNOWN_CATEGORY_BUCKET: &str = "(desconocida)";
/// Metrics bucket for records without a symptom.
const NO_SYMPTOM_BUCKET: &str = "(ninguno)";

#[derive(Debug, thiserror::Error)]
pub enum QueryLogError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Query log I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Query log serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Which day files a read or purge operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuerySelection {
    /// Today's file only (the default).
    Today,
    /// The file of one specific day.
    Date(NaiveDate),
    /// Every day file present.
    All,
}

impl QuerySelection {
    /// Resolve the `date`/`all` query parameters; `all` wins over `date`.
    ///
    /// The date is validated here so it can never smuggle path separators
    /// into the file name.
    pub fn from_params(date: Option<&str>, all: bool) -> Result<Self, QueryLogError> {
        if all {
            return Ok(Self::All);
        }
        match date.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => {
                let parsed = NaiveDate::parse_from_str(raw, DATE_FORMAT)
                    .map_err(|_| QueryLogError::InvalidDate(raw.to_string()))?;
                Ok(Self::Date(parsed))
            }
            None => Ok(Self::Today),
        }
    }
}

/// One recorded classification, as written to the day file
#[derive(Debug, Clone, Serialize)]
pub struct QueryRecord {
    pub timestamp: DateTime<Utc>,
    /// Echo of the submitted facts.
    pub facts: Value,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub iterative: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<String>,
    pub result: QueryOutcome,
}

/// The part of a response worth keeping for later analysis
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    pub category: String,
    pub technician: String,
    pub symptom: String,
    pub rule_id: Option<String>,
}

impl QueryRecord {
    pub fn single_shot(facts: &TicketFacts, response: &ClassifyResponse) -> Self {
        Self {
            timestamp: Utc::now(),
            facts: serde_json::to_value(facts).unwrap_or_default(),
            iterative: false,
            history: Vec::new(),
            result: QueryOutcome {
                category: response.category.clone(),
                technician: response.technician.clone(),
                symptom: response.symptom.clone(),
                rule_id: response.explanation.id.clone(),
            },
        }
    }

    pub fn iterative(
        facts: &TicketFacts,
        history: &[String],
        response: &IterativeClassifyResponse,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            facts: serde_json::to_value(facts).unwrap_or_default(),
            iterative: true,
            history: history.to_vec(),
            result: QueryOutcome {
                category: response.category.clone(),
                technician: response.technician.clone(),
                symptom: response.symptom.clone(),
                rule_id: response.rule_id.clone(),
            },
        }
    }
}

/// Projection of one record for listings
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct QueryListItem {
    pub timestamp: Option<String>,
    pub category: Option<String>,
    pub symptom: Option<String>,
    pub rule_id: Option<String>,
}

/// A page of query records, newest first
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QueryPage {
    pub items: Vec<QueryListItem>,
    /// Raw line count across the selected files, parseable or not.
    pub total: usize,
}

/// Aggregated counts over the selected files
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QueryMetrics {
    /// Count of parseable records only.
    pub total: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_symptom: BTreeMap<String, usize>,
}

/// Query log rooted at the data directory
#[derive(Clone)]
pub struct QueryLog {
    data_dir: PathBuf,
}

impl QueryLog {
    /// Open the log: touch today's file and drop the legacy un-rotated one.
    pub fn open(data_dir: &Path) -> Result<Self, QueryLogError> {
        let log = Self {
            data_dir: data_dir.to_path_buf(),
        };

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(log.file_for(today()))?;

        let legacy = log.data_dir.join(LEGACY_QUERY_FILE);
        if legacy.exists() {
            fs::remove_file(&legacy)?;
            tracing::info!(path = %legacy.display(), "Removed legacy un-rotated query log");
        }

        Ok(log)
    }

    /// Append one record to today's file
    pub fn append(&self, record: &QueryRecord) -> Result<(), QueryLogError> {
        let line = serde_json::to_string(record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.file_for(today()))?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// Tail of the selected files, newest record first
    pub fn list(&self, selection: QuerySelection, limit: usize) -> Result<QueryPage, QueryLogError> {
        let mut lines = Vec::new();
        for path in self.selected_files(selection)? {
            if !path.exists() {
                continue;
            }
            let content = fs::read_to_string(&path)?;
            lines.extend(content.lines().map(str::to_string));
        }

        let total = lines.len();
        let start = total.saturating_sub(limit);
        let mut items: Vec<QueryListItem> =
            lines[start..].iter().filter_map(|l| parse_item(l)).collect();
        items.reverse();

        Ok(QueryPage { items, total })
    }

    /// Per-category and per-symptom counts over the selected files
    pub fn metrics(&self, selection: QuerySelection) -> Result<QueryMetrics, QueryLogError> {
        let mut total = 0usize;
        let mut by_category: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_symptom: BTreeMap<String, usize> = BTreeMap::new();

        for path in self.selected_files(selection)? {
            if !path.exists() {
                continue;
            }
            for line in fs::read_to_string(&path)?.lines() {
                let record: Value = match serde_json::from_str(line) {
                    Ok(v) => v,
                    Err(_) => continue,
                };
                if !record.is_object() {
                    continue;
                }
                total += 1;

                let result = record.get("result");
                let category = non_empty_str(result.and_then(|r| r.get("category")))
                    .unwrap_or(UNKNOWN_CATEGORY_BUCKET);
                let symptom = non_empty_str(result.and_then(|r| r.get("symptom")))
                    .unwrap_or(NO_SYMPTOM_BUCKET);

                *by_category.entry(category.to_string()).or_insert(0) += 1;
                *by_symptom.entry(symptom.to_string()).or_insert(0) += 1;
            }
        }

        Ok(QueryMetrics {
            total,
            by_category,
            by_symptom,
        })
    }

    /// Names of the existing day files, oldest first
    pub fn file_names(&self) -> Result<Vec<String>, QueryLogError> {
        Ok(self
            .existing_files()?
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
            .collect())
    }

    /// Delete the selected day files, returning how many were removed
    pub fn purge(&self, selection: QuerySelection) -> Result<usize, QueryLogError> {
        let mut deleted = 0;
        for path in self.selected_files(selection)? {
            if path.exists() {
                fs::remove_file(&path)?;
                deleted += 1;
            }
        }
        tracing::info!(deleted = deleted, "Purged query log files");
        Ok(deleted)
    }

    fn file_for(&self, date: NaiveDate) -> PathBuf {
        self.data_dir.join(format!(
            "{}{}{}",
            QUERY_FILE_PREFIX,
            date.format(DATE_FORMAT),
            QUERY_FILE_EXT
        ))
    }

    fn selected_files(&self, selection: QuerySelection) -> Result<Vec<PathBuf>, QueryLogError> {
        match selection {
            QuerySelection::Today => Ok(vec![self.file_for(today())]),
            QuerySelection::Date(date) => Ok(vec![self.file_for(date)]),
            QuerySelection::All => self.existing_files(),
        }
    }

    fn existing_files(&self) -> Result<Vec<PathBuf>, QueryLogError> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                if name.starts_with(QUERY_FILE_PREFIX) && name.ends_with(QUERY_FILE_EXT) {
                    files.push(entry.path());
                }
            }
        }
        files.sort();
        Ok(files)
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn parse_item(line: &str) -> Option<QueryListItem> {
    let record: Value = serde_json::from_str(line).ok()?;
    if !record.is_object() {
        return None;
    }
    let result = record.get("result");
    Some(QueryListItem {
        timestamp: owned_str(record.get("timestamp")),
        category: owned_str(result.and_then(|r| r.get("category"))),
        symptom: owned_str(result.and_then(|r| r.get("symptom"))),
        rule_id: owned_str(result.and_then(|r| r.get("rule_id"))),
    })
}

fn owned_str(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}
