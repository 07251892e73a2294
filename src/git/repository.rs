use chrono::{DateTime, Utc};
use git2::Repository;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::{AppError, Result};
use crate::git::cache::LogCache;
use crate::models::{Changeset, Person, RepositoryDto};

pub struct GitRepository {
    pub repo: Mutex<Repository>,
    pub path: String,
    log_cache: Mutex<LogCache>,
}

impl GitRepository {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let repo = Repository::discover(&path).map_err(|_| AppError::RepoNotFound(path_str.clone()))?;

        Ok(Self {
            repo: Mutex::new(repo),
            path: path_str,
            log_cache: Mutex::new(LogCache::new()),
        })
    }

    pub fn info(&self) -> Result<RepositoryDto> {
        self.with_repo(|repo| {
            let name = Path::new(&self.path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "Unknown".to_string());

            let head_revision = repo
                .head()
                .ok()
                .and_then(|h| h.peel_to_commit().ok())
                .map(|c| c.id().to_string());

            Ok(RepositoryDto {
                name,
                path: self.path.clone(),
                default_branch: head_branch_name(repo),
                head_revision,
                is_bare: repo.is_bare(),
                is_empty: repo.is_empty().unwrap_or(true),
            })
        })
    }

    pub fn with_repo<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Repository) -> Result<T>,
    {
        let repo = self.repo.lock().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        f(&repo)
    }

    /// Runs `f` with the log cache and the repository; the repository lock is
    /// always taken first.
    pub fn with_cache<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut LogCache, &Repository) -> Result<T>,
    {
        let repo = self.repo.lock().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        let mut cache = self
            .log_cache
            .lock()
            .map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        f(&mut cache, &repo)
    }
}

/// Short name of the branch HEAD points to, `None` for a detached HEAD.
///
/// An unborn HEAD (empty repository) still names its branch.
pub fn head_branch_name(repo: &Repository) -> Option<String> {
    match repo.head() {
        Ok(head) if head.is_branch() => head.shorthand().map(|s| s.to_string()),
        Ok(_) => None,
        Err(_) => repo
            .find_reference("HEAD")
            .ok()
            .and_then(|r| r.symbolic_target().map(|t| t.to_string()))
            .and_then(|t| t.strip_prefix("refs/heads/").map(|s| s.to_string())),
    }
}

pub fn signature_to_person(signature: &git2::Signature) -> Person {
    Person {
        name: signature.name().unwrap_or("Unknown").to_string(),
        mail: signature
            .email()
            .filter(|email| !email.is_empty())
            .map(|email| email.to_string()),
    }
}

pub fn commit_date(commit: &git2::Commit) -> DateTime<Utc> {
    DateTime::from_timestamp(commit.time().seconds(), 0).unwrap_or_default()
}

pub fn commit_to_changeset(commit: &git2::Commit) -> Changeset {
    Changeset {
        id: commit.id().to_string(),
        author: signature_to_person(&commit.author()),
        date: commit_date(commit),
        description: commit.message().unwrap_or("").trim().to_string(),
        parents: commit.parent_ids().map(|id| id.to_string()).collect(),
    }
}

pub type SharedRepo = Arc<GitRepository>;
