// Request handlers (adapters for the boundary layer)

pub mod employees;
pub mod search;
