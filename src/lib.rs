//! Skill Tracker API Library
//!
//! This library provides the core functionality for the employee skill
//! tracker: the bulk ingestion pipeline, the cache-aside query and
//! reporting flows, and the persistence and export adapters around them.

pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod ingest;
pub mod reporting;
