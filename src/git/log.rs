//! Changeset history with paging.
//!
//! `LogCommandBuilder` picks where the walk starts (a branch or HEAD) and
//! which window of the walk is returned. The walk itself comes from the log
//! cache, so paging through a long history only walks it once per tip.

use git2::{BranchType, ErrorCode, Oid, Repository};

use crate::error::{AppError, Result};
use crate::git::repository::{commit_to_changeset, head_branch_name, GitRepository};
use crate::models::Changeset;
use crate::paging::{PageRequest, PageResult, PageSource};

pub const DEFAULT_PAGING_LIMIT: usize = 20;

#[derive(Debug, Clone)]
pub struct ChangesetPagingResult {
    pub changesets: Vec<Changeset>,
    /// Length of the whole history, not just of this window.
    pub total: usize,
    /// Branch the history was read from, if any.
    pub branch_name: Option<String>,
}

impl ChangesetPagingResult {
    pub fn into_page_result(self) -> PageResult<Changeset> {
        PageResult::new(self.changesets, self.total)
    }
}

pub struct LogCommandBuilder<'a> {
    repo: &'a GitRepository,
    branch: Option<String>,
    paging_start: usize,
    paging_limit: usize,
}

impl<'a> LogCommandBuilder<'a> {
    pub fn new(repo: &'a GitRepository) -> Self {
        Self {
            repo,
            branch: None,
            paging_start: 0,
            paging_limit: DEFAULT_PAGING_LIMIT,
        }
    }

    /// Reads the history of a local branch instead of HEAD.
    pub fn branch(mut self, name: impl Into<String>) -> Self {
        self.branch = Some(name.into());
        self
    }

    pub fn paging_start(mut self, start: usize) -> Self {
        self.paging_start = start;
        self
    }

    pub fn paging_limit(mut self, limit: usize) -> Self {
        self.paging_limit = limit;
        self
    }

    /// Selects the window of one page: starts at `page * pageSize` and
    /// returns at most `pageSize` changesets.
    pub fn paged(self, request: &PageRequest) -> Self {
        self.paging_start(request.offset())
            .paging_limit(request.limit())
    }

    pub fn changesets(&self) -> Result<ChangesetPagingResult> {
        self.repo.with_cache(|cache, repo| {
            let (key, tip, branch_name) = self.resolve_start(repo)?;

            let Some(tip) = tip else {
                return Ok(ChangesetPagingResult {
                    changesets: Vec::new(),
                    total: 0,
                    branch_name,
                });
            };

            let log = cache.log_for(repo, &key, tip)?;
            let changesets = log
                .changesets
                .iter()
                .skip(self.paging_start)
                .take(self.paging_limit)
                .cloned()
                .collect();

            Ok(ChangesetPagingResult {
                changesets,
                total: log.changesets.len(),
                branch_name,
            })
        })
    }

    /// Cache key, tip commit (none for an unborn HEAD) and branch name.
    fn resolve_start(&self, repo: &Repository) -> Result<(String, Option<Oid>, Option<String>)> {
        if let Some(name) = &self.branch {
            let branch = repo
                .find_branch(name, BranchType::Local)
                .map_err(|_| AppError::BranchNotFound(name.clone()))?;
            let tip = branch.get().peel_to_commit()?.id();
            return Ok((format!("refs/heads/{}", name), Some(tip), Some(name.clone())));
        }

        let tip = match repo.head() {
            Ok(head) => Some(head.peel_to_commit()?.id()),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
            Err(e) => return Err(e.into()),
        };
        Ok(("HEAD".to_string(), tip, head_branch_name(repo)))
    }
}

/// History is always newest first; a request asking for another order is
/// rejected instead of being echoed into navigation links.
pub fn ensure_history_order(request: &PageRequest) -> Result<()> {
    if let Some(key) = request.sort_by() {
        return Err(AppError::InvalidPageRequest(format!(
            "cannot sort changesets by '{}', history is ordered newest first",
            key
        )));
    }
    if request.descending() {
        return Err(AppError::InvalidPageRequest(
            "changesets cannot be listed in descending order".to_string(),
        ));
    }
    Ok(())
}

/// Pages over the history of a branch, or of HEAD.
pub struct LogSource<'a> {
    repo: &'a GitRepository,
    branch: Option<String>,
}

impl<'a> LogSource<'a> {
    pub fn head(repo: &'a GitRepository) -> Self {
        Self { repo, branch: None }
    }

    pub fn for_branch(repo: &'a GitRepository, branch: impl Into<String>) -> Self {
        Self {
            repo,
            branch: Some(branch.into()),
        }
    }

    pub fn command(&self) -> LogCommandBuilder<'a> {
        let command = LogCommandBuilder::new(self.repo);
        match &self.branch {
            Some(branch) => command.branch(branch.clone()),
            None => command,
        }
    }
}

impl PageSource<Changeset> for LogSource<'_> {
    fn fetch_page(&self, request: &PageRequest) -> Result<PageResult<Changeset>> {
        ensure_history_order(request)?;
        Ok(self.command().paged(request).changesets()?.into_page_result())
    }
}

impl GitRepository {
    pub fn changeset(&self, id: &str) -> Result<Changeset> {
        self.with_repo(|repo| {
            let commit = find_commit(repo, id)?;
            Ok(commit_to_changeset(&commit))
        })
    }

    /// Parents of a changeset, in parent order.
    pub fn parents(&self, id: &str) -> Result<Vec<Changeset>> {
        self.with_repo(|repo| {
            let commit = find_commit(repo, id)?;
            commit
                .parents()
                .map(|parent| Ok(commit_to_changeset(&parent)))
                .collect()
        })
    }
}

fn find_commit<'r>(repo: &'r Repository, id: &str) -> Result<git2::Commit<'r>> {
    repo.revparse_single(id)
        .and_then(|obj| obj.peel_to_commit())
        .map_err(|_| AppError::ChangesetNotFound(id.to_string()))
}
