// Search criteria normalization and cache-key derivation

pub mod criteria;

pub use criteria::{NormalizedCriteria, SearchCriteria, SortField, SortOrder, SortPolicy};
