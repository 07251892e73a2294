//! Paged hypermedia (HAL) collections over a git repository.
//!
//! - `paging`: validated page requests, page results, the `PageSource` contract
//! - `hal`: link sets and the collection mappers that build responses
//! - `git`: git2-backed sources for branches and changesets
//! - `models`: entities and their DTOs
//! - `routes`: axum handlers wiring the above together
//! - `error`: `AppError` and its HTTP mapping

pub mod error;
pub mod git;
pub mod hal;
pub mod models;
pub mod paging;
pub mod routes;
