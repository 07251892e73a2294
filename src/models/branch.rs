use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Person, PersonDto};

/// A local branch and the commit it points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    pub revision: String,
    pub default_branch: bool,
    pub last_commit_date: Option<DateTime<Utc>>,
    pub last_committer: Option<Person>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchDto {
    pub name: String,
    pub revision: String,
    pub default_branch: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_commit_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_committer: Option<PersonDto>,
}

impl From<&Branch> for BranchDto {
    fn from(branch: &Branch) -> Self {
        Self {
            name: branch.name.clone(),
            revision: branch.revision.clone(),
            default_branch: branch.default_branch,
            last_commit_date: branch.last_commit_date,
            last_committer: branch.last_committer.as_ref().map(PersonDto::from),
        }
    }
}

/// Body of a branch creation request. Without `parent` the new branch starts
/// at HEAD.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchRequest {
    pub name: String,
    pub parent: Option<String>,
}
