// Handler modules
pub mod check;
pub mod schema;

// Re-export all handler functions
pub use check::{CheckOptions, CheckReport, handle_check};
pub use schema::{handle_group_versions, handle_resource};
