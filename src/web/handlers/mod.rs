pub mod analyses;
pub mod analyze;
pub mod search;
