// Repository contracts (ports) for durable storage

pub mod employee_repository;

pub use employee_repository::{
    BatchUpsert, EmployeeRepository, RepositoryError, UpsertOutcome, REASON_NAME_CONFLICT,
};
