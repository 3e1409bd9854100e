use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Employee record as it flows through ingestion and search.
///
/// # Invariants
/// - Records handed to the repository have a positive `employee_id` and a
///   non-blank `name` (the ingest validator enforces this).
/// - `date_created` is assigned by the persistence layer and never accepted
///   from callers.
/// - `error` is a rejection annotation for failed-batch reporting; it is
///   never persisted and is omitted from serialized output when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default)]
    pub employee_id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub department: String,
    /// Soft-delete flag, kept for historical analysis. Read paths filter on
    /// it; the ingest pipeline never sets it.
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(skip)]
    pub date_created: Option<DateTime<Utc>>,
    /// `None` means no skill list was supplied; `Some(vec![])` is an
    /// explicitly empty list. The validator branches on presence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<Skill>>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Employee {
    /// Annotates this record with a rejection reason.
    pub fn with_error(mut self, reason: impl Into<String>) -> Self {
        self.error = Some(reason.into());
        self
    }
}

/// A single skill attached to an employee.
///
/// `skill_id` is assigned by the persistence layer, not the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_id: Option<i32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
}
