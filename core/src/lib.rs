//! acceptance-core: per-country payment acceptance reporting.
//!
//! Pipeline stages live in their own modules and are wired together
//! by `report::build_report`.

pub mod config;
pub mod counter;
pub mod country;
pub mod dedup;
pub mod error;
pub mod failure;
pub mod filter;
pub mod loader;
pub mod record;
pub mod render;
pub mod report;
pub mod summary;
pub mod types;
