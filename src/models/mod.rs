//! Domain entities and the DTOs they are projected to.
//!
//! Entities come out of the git layer; DTOs are what the routes serialize,
//! wrapped in `HalItem` to carry their links.
//! - `branch`: Branch, BranchDto, BranchRequest
//! - `changeset`: Changeset, Person, ChangesetDto, PersonDto
//! - `repository`: RepositoryDto

pub mod branch;
pub mod changeset;
pub mod repository;

pub use branch::*;
pub use changeset::*;
pub use repository::*;
