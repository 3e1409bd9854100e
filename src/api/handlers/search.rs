use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::domain::search::criteria::{default_page_number, default_page_size};
use crate::domain::search::SearchCriteria;
use crate::domain::sinks::Email;
use crate::reporting::SearchOutcome;

/// Query parameters for the search-by-skill endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub skill_name: Option<String>,
    pub skill_category: Option<String>,
    pub department: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_page_number")]
    pub page_number: u32,
    pub sorting: Option<String>,
    pub sort_order: Option<String>,
    /// When set, the result set is exported and a receipt is returned
    /// instead of the employee list.
    #[serde(default)]
    pub export: bool,
}

impl SearchParams {
    fn into_criteria(self) -> (SearchCriteria, bool) {
        let export = self.export;
        let criteria = SearchCriteria {
            skill_name: self.skill_name,
            skill_category: self.skill_category,
            department: self.department,
            page_size: self.page_size,
            page_number: self.page_number,
            sorting: self.sorting,
            sort_order: self.sort_order,
        };
        (criteria, export)
    }
}

/// Query parameters for the skill-gap endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapParams {
    pub skill_name: Option<String>,
    pub skill_category: Option<String>,
    pub department: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_page_number")]
    pub page_number: u32,
    pub sorting: Option<String>,
    pub sort_order: Option<String>,
    /// Recipient for the report notification; required when
    /// `generateReport` is set.
    pub email: Option<String>,
    #[serde(default)]
    pub generate_report: bool,
}

fn outcome_response(outcome: SearchOutcome) -> Response {
    match outcome {
        SearchOutcome::Employees(employees) => Json(employees).into_response(),
        SearchOutcome::Artifact(receipt) => Json(receipt).into_response(),
    }
}

/// Employees that have the requested skill
///
/// GET /api/employees/search
pub async fn search_by_skill(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let (criteria, export) = params.into_criteria();
    let outcome = state.search.employees_by_skill(criteria, export).await?;
    Ok(outcome_response(outcome))
}

/// Employees that lack the requested skill, optionally delivered as a
/// report with a notification to the requester
///
/// GET /api/employees/skill-gap
pub async fn skill_gap_report(
    State(state): State<AppState>,
    Query(params): Query<SkillGapParams>,
) -> Result<Response, ApiError> {
    // The address is only needed (and only validated) when a report is
    // actually generated.
    let recipient = if params.generate_report {
        match &params.email {
            Some(raw) => Some(Email::new(raw.clone()).map_err(ApiError::bad_request)?),
            None => {
                return Err(ApiError::bad_request(
                    "An email address is required when generating a report",
                ));
            }
        }
    } else {
        None
    };

    let criteria = SearchCriteria {
        skill_name: params.skill_name,
        skill_category: params.skill_category,
        department: params.department,
        page_size: params.page_size,
        page_number: params.page_number,
        sorting: params.sorting,
        sort_order: params.sort_order,
    };

    let outcome = state
        .search
        .skill_gap_report(criteria, recipient, params.generate_report)
        .await?;
    Ok(outcome_response(outcome))
}
