//! git2-backed entity sources.
//!
//! - `repository`: `GitRepository` handle, shared commit/signature conversions
//! - `branches`: local branch listing, lookup, creation and `BranchSource`
//! - `log`: paged history via `LogCommandBuilder`, `LogSource`
//! - `cache`: per-ref log cache behind the history queries

pub mod branches;
pub mod cache;
pub mod log;
pub mod repository;

#[cfg(test)]
pub mod test_support;

pub use branches::BranchSource;
pub use log::{ensure_history_order, LogCommandBuilder, LogSource};
pub use repository::{GitRepository, SharedRepo};
