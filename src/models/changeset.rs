use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A commit as handed out by the log source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changeset {
    pub id: String,
    pub author: Person,
    pub date: DateTime<Utc>,
    pub description: String,
    pub parents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub mail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangesetDto {
    pub id: String,
    pub author: PersonDto,
    pub date: DateTime<Utc>,
    pub description: String,
    pub parent_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonDto {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail: Option<String>,
}

impl From<&Person> for PersonDto {
    fn from(person: &Person) -> Self {
        Self {
            name: person.name.clone(),
            mail: person.mail.clone(),
        }
    }
}

impl From<&Changeset> for ChangesetDto {
    fn from(changeset: &Changeset) -> Self {
        Self {
            id: changeset.id.clone(),
            author: PersonDto::from(&changeset.author),
            date: changeset.date,
            description: changeset.description.clone(),
            parent_count: changeset.parents.len(),
        }
    }
}
