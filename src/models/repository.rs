use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDto {
    pub name: String,
    pub path: String,
    pub default_branch: Option<String>,
    pub head_revision: Option<String>,
    pub is_bare: bool,
    pub is_empty: bool,
}
