//! Local branches: listing, lookup, creation and the paged branch source.

use git2::{BranchType, Repository};
use std::cmp::Ordering;

use crate::error::{AppError, Result};
use crate::git::repository::{
    commit_date, head_branch_name, signature_to_person, GitRepository,
};
use crate::models::Branch;
use crate::paging::{PageRequest, PageResult, PageSource};

impl GitRepository {
    /// All local branches, sorted by name.
    pub fn list_branches(&self) -> Result<Vec<Branch>> {
        self.with_repo(|repo| {
            let default_branch = head_branch_name(repo);
            let mut branches = Vec::new();

            for entry in repo.branches(Some(BranchType::Local))? {
                let (branch, _) = entry?;
                let Some(name) = branch.name()?.map(|n| n.to_string()) else {
                    tracing::warn!("Skipping branch with a non UTF-8 name");
                    continue;
                };
                branches.push(to_branch(&branch, name, default_branch.as_deref())?);
            }

            branches.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(branches)
        })
    }

    pub fn branch(&self, name: &str) -> Result<Branch> {
        self.with_repo(|repo| find_branch(repo, name))
    }

    /// Creates `name` at `parent` (a branch name or revision), or at HEAD.
    pub fn create_branch(&self, name: &str, parent: Option<&str>) -> Result<Branch> {
        let branch = self.with_repo(|repo| {
            if !git2::Branch::name_is_valid(name)? {
                return Err(AppError::InvalidBranchName(name.to_string()));
            }
            if repo.find_branch(name, BranchType::Local).is_ok() {
                return Err(AppError::BranchAlreadyExists(name.to_string()));
            }

            let start = match parent {
                Some(parent) => resolve_parent(repo, parent)?,
                None => repo
                    .head()
                    .and_then(|head| head.peel_to_commit())
                    .map_err(|_| AppError::BranchNotFound("HEAD".to_string()))?,
            };

            repo.branch(name, &start, false)?;
            tracing::info!("Created branch {} at {}", name, start.id());
            find_branch(repo, name)
        })?;

        self.with_cache(|cache, _| {
            cache.invalidate(&format!("refs/heads/{}", name));
            Ok(())
        })?;

        Ok(branch)
    }
}

fn find_branch(repo: &Repository, name: &str) -> Result<Branch> {
    let branch = repo
        .find_branch(name, BranchType::Local)
        .map_err(|_| AppError::BranchNotFound(name.to_string()))?;
    let default_branch = head_branch_name(repo);
    to_branch(&branch, name.to_string(), default_branch.as_deref())
}

fn resolve_parent<'r>(repo: &'r Repository, parent: &str) -> Result<git2::Commit<'r>> {
    if let Ok(branch) = repo.find_branch(parent, BranchType::Local) {
        return Ok(branch.get().peel_to_commit()?);
    }
    repo.revparse_single(parent)
        .and_then(|obj| obj.peel_to_commit())
        .map_err(|_| AppError::BranchNotFound(parent.to_string()))
}

fn to_branch(branch: &git2::Branch, name: String, default_branch: Option<&str>) -> Result<Branch> {
    let commit = branch.get().peel_to_commit()?;

    Ok(Branch {
        default_branch: default_branch == Some(name.as_str()),
        name,
        revision: commit.id().to_string(),
        last_commit_date: Some(commit_date(&commit)),
        last_committer: Some(signature_to_person(&commit.committer())),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchSortKey {
    Name,
    LastCommitDate,
}

impl BranchSortKey {
    pub fn parse(key: Option<&str>) -> Result<Self> {
        match key {
            None | Some("name") => Ok(Self::Name),
            Some("lastCommitDate") => Ok(Self::LastCommitDate),
            Some(other) => Err(AppError::InvalidPageRequest(format!(
                "cannot sort branches by '{}', expected 'name' or 'lastCommitDate'",
                other
            ))),
        }
    }

    fn compare(self, a: &Branch, b: &Branch) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::LastCommitDate => a
                .last_commit_date
                .cmp(&b.last_commit_date)
                .then_with(|| a.name.cmp(&b.name)),
        }
    }
}

/// Pages over the local branches of a repository.
pub struct BranchSource<'a> {
    repo: &'a GitRepository,
}

impl<'a> BranchSource<'a> {
    pub fn new(repo: &'a GitRepository) -> Self {
        Self { repo }
    }
}

impl PageSource<Branch> for BranchSource<'_> {
    fn fetch_page(&self, request: &PageRequest) -> Result<PageResult<Branch>> {
        let key = BranchSortKey::parse(request.sort_by())?;
        let mut branches = self.repo.list_branches()?;

        branches.sort_by(|a, b| {
            let ordering = key.compare(a, b);
            if request.descending() { ordering.reverse() } else { ordering }
        });

        Ok(PageResult::slice(branches, request))
    }
}
