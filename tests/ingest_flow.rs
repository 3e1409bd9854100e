//! End-to-end ingestion pipeline tests over an in-memory repository:
//! validation, batching, conflict handling, and partial-failure accounting.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::{employee, employee_with_skills, InMemoryEmployeeRepository};
use skilltracker_api::domain::repositories::{EmployeeRepository, REASON_NAME_CONFLICT};
use skilltracker_api::ingest::{IngestError, IngestPipeline, ValidationPolicy};

fn pipeline(repo: Arc<InMemoryEmployeeRepository>, batch_size: usize) -> IngestPipeline {
    let repo: Arc<dyn EmployeeRepository> = repo;
    IngestPipeline::new(repo, ValidationPolicy::default(), batch_size)
}

#[tokio::test]
async fn mixed_validity_batch_is_fully_accounted_for() {
    let repo = Arc::new(InMemoryEmployeeRepository::new());

    // One valid record with an empty skill list, one bad id, one blank
    // skill name.
    let records = vec![
        employee_with_skills(101, "John", vec![]),
        employee(0, "Bad"),
        employee_with_skills(102, "Jane", vec![("", "Tools")]),
    ];

    let summary = pipeline(repo.clone(), 100).ingest_bulk(records).await;

    assert_eq!(summary.employees_added, 1);
    assert_eq!(summary.employees_updated, 0);
    assert_eq!(summary.failed_records.len(), 2);

    let reasons: Vec<&str> = summary
        .failed_records
        .iter()
        .map(|e| e.error.as_deref().unwrap())
        .collect();
    assert!(reasons.contains(&"Invalid EmployeeId or Name is missing"));
    assert!(reasons.contains(&"Skill name is required"));

    // Exactly one batch call, containing only the valid record.
    assert_eq!(repo.batch_calls.load(Ordering::SeqCst), 1);
    assert!(repo.contains(101).await);
    assert!(!repo.contains(102).await);
}

#[tokio::test]
async fn empty_input_performs_zero_repository_calls() {
    let repo = Arc::new(InMemoryEmployeeRepository::new());

    let summary = pipeline(repo.clone(), 100).ingest_bulk(vec![]).await;

    assert_eq!(summary.employees_added, 0);
    assert_eq!(summary.employees_updated, 0);
    assert!(summary.failed_records.is_empty());
    assert_eq!(repo.batch_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn all_invalid_input_performs_zero_repository_calls() {
    let repo = Arc::new(InMemoryEmployeeRepository::new());

    let summary = pipeline(repo.clone(), 100)
        .ingest_bulk(vec![employee(0, "A"), employee(-1, "B")])
        .await;

    assert_eq!(summary.failed_records.len(), 2);
    assert_eq!(repo.batch_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn conflicts_are_rejected_and_updates_counted() {
    let repo = Arc::new(InMemoryEmployeeRepository::with_employees(vec![
        employee(1, "Alice"),
        employee(2, "Bob"),
    ]));

    let summary = pipeline(repo.clone(), 100)
        .ingest_bulk(vec![
            employee(1, "Alicia"), // name mismatch: conflict
            employee(2, "Bob"),    // same name: update
            employee(3, "Cara"),   // new: add
        ])
        .await;

    assert_eq!(summary.employees_added, 1);
    assert_eq!(summary.employees_updated, 1);
    assert_eq!(summary.failed_records.len(), 1);
    assert_eq!(summary.failed_records[0].employee_id, 1);
    assert_eq!(
        summary.failed_records[0].error.as_deref(),
        Some(REASON_NAME_CONFLICT)
    );
}

#[tokio::test]
async fn storage_failure_in_one_batch_spares_the_others() {
    let repo = Arc::new(InMemoryEmployeeRepository::new().failing_on(3));

    let records: Vec<_> = (1..=6).map(|id| employee(id, &format!("E{id}"))).collect();
    let summary = pipeline(repo.clone(), 2).ingest_bulk(records).await;

    // Batch [3, 4] fails; [1, 2] and [5, 6] land.
    assert_eq!(repo.batch_calls.load(Ordering::SeqCst), 3);
    assert_eq!(summary.employees_added, 4);
    assert_eq!(summary.failed_records.len(), 2);
    assert!(summary
        .failed_records
        .iter()
        .all(|e| e.error.as_deref().unwrap().starts_with("Storage error:")));
    assert!(repo.contains(1).await && repo.contains(6).await);
    assert!(!repo.contains(3).await);
}

#[tokio::test]
async fn added_updated_and_rejected_partition_the_input() {
    let repo = Arc::new(InMemoryEmployeeRepository::with_employees(vec![
        employee(5, "Existing"),
        employee(6, "Conflicted"),
    ]));

    let mut records: Vec<_> = (1..=10).map(|id| employee(id, &format!("E{id}"))).collect();
    records[4] = employee(5, "Existing"); // update
    records.push(employee(0, "Invalid")); // validation reject
    let total = records.len() as u64;

    let summary = pipeline(repo, 3).ingest_bulk(records).await;

    assert_eq!(
        summary.employees_added
            + summary.employees_updated
            + summary.failed_records.len() as u64,
        total
    );
}

#[tokio::test]
async fn ingest_one_rejects_invalid_record_locally() {
    let repo = Arc::new(InMemoryEmployeeRepository::new());

    let result = pipeline(repo.clone(), 100)
        .ingest_one(employee(0, "Bad"))
        .await;

    match result {
        Err(IngestError::Validation(reason)) => {
            assert_eq!(reason, "Invalid EmployeeId or Name is missing");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(repo.len().await, 0);
}

#[tokio::test]
async fn ingest_one_surfaces_storage_conflict_as_validation() {
    let repo = Arc::new(InMemoryEmployeeRepository::with_employees(vec![employee(
        1, "Alice",
    )]));

    let result = pipeline(repo, 100).ingest_one(employee(1, "Alicia")).await;

    match result {
        Err(IngestError::Validation(reason)) => assert_eq!(reason, REASON_NAME_CONFLICT),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn ingest_one_normalizes_and_stores_valid_record() {
    let repo = Arc::new(InMemoryEmployeeRepository::new());

    let message = pipeline(repo.clone(), 100)
        .ingest_one(employee_with_skills(7, "Grace", vec![("Rust", "")]))
        .await
        .expect("valid record");

    assert_eq!(message, "Operation completed successfully.");
    assert!(repo.contains(7).await);
}
