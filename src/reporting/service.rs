use std::sync::Arc;

use serde::Serialize;

use crate::domain::employee::Employee;
use crate::domain::repositories::EmployeeRepository;
use crate::domain::search::{SearchCriteria, SortPolicy};
use crate::domain::sinks::{Email, ExportSink};

use super::cache::QueryCache;
use super::errors::{ReportError, ReportResult};

/// Cache-key schema tag for the search-by-skill read path.
pub const SEARCH_KEY_PREFIX: &str = "skill-search";
/// Cache-key schema tag for the skill-gap read path.
pub const SKILL_GAP_KEY_PREFIX: &str = "skill-gap";

/// Confirmation returned when a result set was turned into an artifact.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReceipt {
    pub message: String,
    pub location: String,
}

/// Result of a search or report request: either the raw employee list or a
/// receipt for the generated artifact.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Employees(Vec<Employee>),
    Artifact(ExportReceipt),
}

/// Composes the query cache, the repository read operations, and the
/// export/notify sink for the two skill-based read flows.
pub struct SearchService {
    repo: Arc<dyn EmployeeRepository>,
    cache: Arc<QueryCache>,
    sink: Arc<dyn ExportSink>,
    search_policy: SortPolicy,
    gap_policy: SortPolicy,
}

impl SearchService {
    pub fn new(
        repo: Arc<dyn EmployeeRepository>,
        cache: Arc<QueryCache>,
        sink: Arc<dyn ExportSink>,
        search_policy: SortPolicy,
        gap_policy: SortPolicy,
    ) -> Self {
        Self {
            repo,
            cache,
            sink,
            search_policy,
            gap_policy,
        }
    }

    /// Employees that have the requested skill, served cache-aside.
    ///
    /// With `export` set, the result set (cached or fresh) is handed to the
    /// export sink and a receipt is returned instead of the list.
    pub async fn employees_by_skill(
        &self,
        criteria: SearchCriteria,
        export: bool,
    ) -> ReportResult<SearchOutcome> {
        let criteria = self.search_policy.normalize(criteria);
        let key = criteria.cache_key(SEARCH_KEY_PREFIX);

        let repo = Arc::clone(&self.repo);
        let loader_criteria = criteria.clone();
        let (employees, from_cache) = self
            .cache
            .get_or_load(&key, move || async move {
                repo.search_by_skill(&loader_criteria).await
            })
            .await?;
        tracing::debug!(from_cache, results = employees.len(), "skill search served");

        if !export {
            return Ok(SearchOutcome::Employees(employees));
        }

        let location = self.sink.export(&employees).await?;
        Ok(SearchOutcome::Artifact(ExportReceipt {
            message: "Employee export generated.".to_string(),
            location,
        }))
    }

    /// Employees that lack the requested skill, served cache-aside through
    /// the skill-gap key schema.
    ///
    /// With `generate_report` set, the result set is exported and the
    /// recipient is notified with the artifact location. A cache hit must
    /// not bypass the export.
    pub async fn skill_gap_report(
        &self,
        criteria: SearchCriteria,
        recipient: Option<Email>,
        generate_report: bool,
    ) -> ReportResult<SearchOutcome> {
        let criteria = self.gap_policy.normalize(criteria);
        let key = criteria.cache_key(SKILL_GAP_KEY_PREFIX);

        let repo = Arc::clone(&self.repo);
        let loader_criteria = criteria.clone();
        let (employees, from_cache) = self
            .cache
            .get_or_load(&key, move || async move {
                repo.search_missing_skill(&loader_criteria).await
            })
            .await?;
        tracing::debug!(from_cache, results = employees.len(), "skill gap search served");

        if !generate_report {
            return Ok(SearchOutcome::Employees(employees));
        }

        let recipient = recipient.ok_or(ReportError::MissingRecipient)?;
        let location = self.sink.export_and_notify(&employees, &recipient).await?;
        Ok(SearchOutcome::Artifact(ExportReceipt {
            message: format!("Skill gap report generated and sent to {recipient}."),
            location,
        }))
    }
}
