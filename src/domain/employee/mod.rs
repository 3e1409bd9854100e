// Employee aggregate: the record shapes shared by ingestion and search

pub mod record;

pub use record::{Employee, Skill};
