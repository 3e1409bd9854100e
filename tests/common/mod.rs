//! Shared test doubles: an in-memory repository and a recording export sink.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use skilltracker_api::domain::employee::{Employee, Skill};
use skilltracker_api::domain::repositories::{
    BatchUpsert, EmployeeRepository, RepositoryError, UpsertOutcome, REASON_NAME_CONFLICT,
};
use skilltracker_api::domain::search::NormalizedCriteria;
use skilltracker_api::domain::sinks::{Email, EmailNotifier, ExportSink, SinkError};

pub fn employee(id: i32, name: &str) -> Employee {
    Employee {
        employee_id: id,
        name: name.to_string(),
        department: "General".to_string(),
        is_deleted: false,
        date_created: None,
        skills: None,
        error: None,
    }
}

pub fn employee_with_skills(id: i32, name: &str, skills: Vec<(&str, &str)>) -> Employee {
    let mut record = employee(id, name);
    record.skills = Some(
        skills
            .into_iter()
            .map(|(name, category)| Skill {
                skill_id: None,
                name: name.to_string(),
                category: category.to_string(),
            })
            .collect(),
    );
    record
}

/// In-memory repository with the same observable contract as the Postgres
/// adapter: conflict detection on mismatched names, per-batch failure
/// injection, and skill-filtered reads.
pub struct InMemoryEmployeeRepository {
    store: Mutex<HashMap<i32, Employee>>,
    pub batch_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub gap_calls: AtomicUsize,
    fail_batches_containing: Option<i32>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
            batch_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            gap_calls: AtomicUsize::new(0),
            fail_batches_containing: None,
        }
    }

    pub fn with_employees(employees: Vec<Employee>) -> Self {
        let repo = Self::new();
        {
            let mut store = repo.store.try_lock().expect("fresh repository");
            for employee in employees {
                store.insert(employee.employee_id, employee);
            }
        }
        repo
    }

    /// Makes any batch containing `id` fail with a storage error.
    pub fn failing_on(mut self, id: i32) -> Self {
        self.fail_batches_containing = Some(id);
        self
    }

    pub async fn contains(&self, id: i32) -> bool {
        self.store.lock().await.contains_key(&id)
    }

    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    fn matches_skill(employee: &Employee, criteria: &NormalizedCriteria) -> bool {
        let Some(skills) = employee.skills.as_deref() else {
            return false;
        };
        skills.iter().any(|skill| {
            criteria
                .skill_name
                .as_deref()
                .map_or(true, |name| skill.name.eq_ignore_ascii_case(name))
                && criteria
                    .skill_category
                    .as_deref()
                    .map_or(true, |category| skill.category.eq_ignore_ascii_case(category))
        })
    }

    fn matches_department(employee: &Employee, criteria: &NormalizedCriteria) -> bool {
        criteria
            .department
            .as_deref()
            .map_or(true, |department| {
                employee.department.eq_ignore_ascii_case(department)
            })
    }

    fn paginate(mut employees: Vec<Employee>, criteria: &NormalizedCriteria) -> Vec<Employee> {
        employees.sort_by_key(|e| e.employee_id);
        employees
            .into_iter()
            .skip(((criteria.page_number - 1) * criteria.page_size) as usize)
            .take(criteria.page_size as usize)
            .collect()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn upsert_one(&self, employee: &Employee) -> Result<UpsertOutcome, RepositoryError> {
        let mut store = self.store.lock().await;
        if let Some(existing) = store.get(&employee.employee_id) {
            if existing.name != employee.name {
                return Ok(UpsertOutcome {
                    validation_error: true,
                    message: REASON_NAME_CONFLICT.to_string(),
                });
            }
        }
        store.insert(employee.employee_id, employee.clone());
        Ok(UpsertOutcome {
            validation_error: false,
            message: "Operation completed successfully.".to_string(),
        })
    }

    async fn upsert_batch(&self, employees: Vec<Employee>) -> Result<BatchUpsert, RepositoryError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(poison) = self.fail_batches_containing {
            if employees.iter().any(|e| e.employee_id == poison) {
                return Err(RepositoryError::Database("connection reset".to_string()));
            }
        }

        let mut store = self.store.lock().await;
        let mut result = BatchUpsert::default();
        for employee in employees {
            match store.get(&employee.employee_id) {
                Some(existing) if existing.name != employee.name => {
                    result.conflicts.push(employee);
                }
                Some(_) => {
                    store.insert(employee.employee_id, employee);
                    result.updated += 1;
                }
                None => {
                    store.insert(employee.employee_id, employee);
                    result.added += 1;
                }
            }
        }
        Ok(result)
    }

    async fn search_by_skill(
        &self,
        criteria: &NormalizedCriteria,
    ) -> Result<Vec<Employee>, RepositoryError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let store = self.store.lock().await;
        let matches = store
            .values()
            .filter(|e| !e.is_deleted)
            .filter(|e| Self::matches_department(e, criteria))
            .filter(|e| Self::matches_skill(e, criteria))
            .cloned()
            .collect();
        Ok(Self::paginate(matches, criteria))
    }

    async fn search_missing_skill(
        &self,
        criteria: &NormalizedCriteria,
    ) -> Result<Vec<Employee>, RepositoryError> {
        self.gap_calls.fetch_add(1, Ordering::SeqCst);
        let store = self.store.lock().await;
        let matches = store
            .values()
            .filter(|e| !e.is_deleted)
            .filter(|e| Self::matches_department(e, criteria))
            .filter(|e| !Self::matches_skill(e, criteria))
            .cloned()
            .collect();
        Ok(Self::paginate(matches, criteria))
    }
}

/// Export sink that records what was exported and who was notified.
pub struct RecordingSink {
    pub exports: Mutex<Vec<usize>>,
    pub notifications: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            exports: Mutex::new(Vec::new()),
            notifications: Mutex::new(Vec::new()),
        }
    }

    pub async fn export_count(&self) -> usize {
        self.exports.lock().await.len()
    }

    pub async fn notified(&self) -> Vec<String> {
        self.notifications.lock().await.clone()
    }
}

#[async_trait]
impl ExportSink for RecordingSink {
    async fn export(&self, employees: &[Employee]) -> Result<String, SinkError> {
        if employees.is_empty() {
            return Err(SinkError::EmptyExport);
        }
        let mut exports = self.exports.lock().await;
        exports.push(employees.len());
        Ok(format!(
            "https://storage.example.com/exports/report-{}.csv",
            exports.len()
        ))
    }

    async fn export_and_notify(
        &self,
        employees: &[Employee],
        recipient: &Email,
    ) -> Result<String, SinkError> {
        let location = self.export(employees).await?;
        self.notifications.lock().await.push(recipient.to_string());
        Ok(location)
    }
}

/// Notifier that always fails, for exercising best-effort delivery.
pub struct FailingNotifier;

#[async_trait]
impl EmailNotifier for FailingNotifier {
    async fn send(&self, _: &Email, _: &str, _: &str) -> Result<(), SinkError> {
        Err(SinkError::Notify("relay unavailable".to_string()))
    }
}
