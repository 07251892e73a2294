//! Log cache for fast paged history queries.
//!
//! Walking history is the expensive part of serving a changeset page, and a
//! client paging through a log asks for the same walk over and over. The cache
//! keeps the walked changesets per tip commit:
//! - Each ref asked about (`HEAD` or a branch ref) is tracked with its tip
//! - Refs sharing a tip share one walk
//! - A moved tip walks again; walks no tracked ref points at are dropped
//! - Refs deleted behind the server's back are forgotten on the next query
//!
//! Paging then slices the cached list in memory.
//!
//! Used by: `LogCommandBuilder::changesets()` in log.rs

use git2::{Oid, Repository, Sort};
use std::collections::HashMap;
use std::time::Instant;

use crate::error::{AppError, Result};
use crate::git::repository::commit_to_changeset;
use crate::models::Changeset;

/// Walked history from one tip, newest first.
#[derive(Debug, Clone)]
pub struct CachedLog {
    pub tip: Oid,
    pub changesets: Vec<Changeset>,
    pub created_at: Instant,
}

impl CachedLog {
    pub fn build(repo: &Repository, tip: Oid) -> Result<Self> {
        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push(tip)?;

        let mut changesets = Vec::new();
        for oid in revwalk {
            let commit = repo.find_commit(oid?)?;
            changesets.push(commit_to_changeset(&commit));
        }

        Ok(Self {
            tip,
            changesets,
            created_at: Instant::now(),
        })
    }
}

/// Walked histories keyed by tip, plus the tip each tracked ref last
/// resolved to. Refs at the same commit share one walk.
#[derive(Debug, Default)]
pub struct LogCache {
    refs: HashMap<String, Oid>,
    logs: HashMap<Oid, CachedLog>,
}

impl LogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the history of `tip`, walking it only when no tracked ref
    /// already points there.
    ///
    /// Refs that no longer resolve are dropped first, and with them every walk
    /// no remaining ref points at.
    pub fn log_for(&mut self, repo: &Repository, key: &str, tip: Oid) -> Result<&CachedLog> {
        self.refs.insert(key.to_string(), tip);
        self.prune(repo);

        if !self.logs.contains_key(&tip) {
            tracing::info!("Building log cache for {} at {}", key, tip);
            let start = Instant::now();
            let log = CachedLog::build(repo, tip)?;
            tracing::info!(
                "Log cache built: {} changesets in {:?}",
                log.changesets.len(),
                start.elapsed()
            );
            self.logs.insert(tip, log);
            tracing::debug!(stats = ?self.stats(), "Log cache updated");
        }

        self.logs
            .get(&tip)
            .ok_or_else(|| AppError::Internal(format!("log cache lost entry {}", key)))
    }

    pub fn invalidate(&mut self, key: &str) {
        self.refs.remove(key);
        self.drop_unreferenced();
    }

    fn prune(&mut self, repo: &Repository) {
        let before = self.refs.len();
        self.refs.retain(|key, _| repo.find_reference(key).is_ok());
        if self.refs.len() != before {
            tracing::debug!("Dropped {} vanished refs from log cache", before - self.refs.len());
        }
        self.drop_unreferenced();
    }

    fn drop_unreferenced(&mut self) {
        let refs = &self.refs;
        self.logs.retain(|tip, _| refs.values().any(|t| t == tip));
    }

    /// Get cache statistics for debugging
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            cached_refs: self.refs.len(),
            cached_logs: self.logs.len(),
            cached_changesets: self.logs.values().map(|log| log.changesets.len()).sum(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct CacheStats {
    pub cached_refs: usize,
    pub cached_logs: usize,
    pub cached_changesets: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::test_support::TestRepo;

    #[test]
    fn walks_history_newest_first() {
        let fixture = TestRepo::new();
        let first = fixture.commit("first", 1_000);
        let second = fixture.commit("second", 2_000);

        let repo = fixture.open_raw();
        let log = CachedLog::build(&repo, second).unwrap();
        let ids: Vec<String> = log.changesets.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids, vec![second.to_string(), first.to_string()]);
    }

    #[test]
    fn rebuilds_when_tip_moves() {
        let fixture = TestRepo::new();
        let first = fixture.commit("first", 1_000);
        let repo = fixture.open_raw();
        let mut cache = LogCache::new();

        assert_eq!(cache.log_for(&repo, "HEAD", first).unwrap().changesets.len(), 1);

        let second = fixture.commit("second", 2_000);
        let log = cache.log_for(&repo, "HEAD", second).unwrap();
        assert_eq!(log.tip, second);
        assert_eq!(log.changesets.len(), 2);
        assert_eq!(
            cache.stats(),
            CacheStats {
                cached_refs: 1,
                cached_logs: 1,
                cached_changesets: 2
            }
        );
    }

    #[test]
    fn reuses_entry_for_same_tip() {
        let fixture = TestRepo::new();
        let tip = fixture.commit("only", 1_000);
        let repo = fixture.open_raw();
        let mut cache = LogCache::new();

        let built_at = cache.log_for(&repo, "HEAD", tip).unwrap().created_at;
        let again = cache.log_for(&repo, "HEAD", tip).unwrap().created_at;
        assert_eq!(built_at, again);

        cache.invalidate("HEAD");
        assert_eq!(cache.stats().cached_refs, 0);
    }

    #[test]
    fn refs_at_the_same_tip_share_one_walk() {
        let fixture = TestRepo::new();
        fixture.commits(3);
        let repo = fixture.open_raw();
        let tip = repo.head().unwrap().target().unwrap();
        let mut cache = LogCache::new();

        cache.log_for(&repo, "HEAD", tip).unwrap();
        cache.log_for(&repo, "refs/heads/main", tip).unwrap();
        assert_eq!(
            cache.stats(),
            CacheStats {
                cached_refs: 2,
                cached_logs: 1,
                cached_changesets: 3
            }
        );

        cache.invalidate("HEAD");
        assert_eq!(cache.stats().cached_logs, 1);
        cache.invalidate("refs/heads/main");
        assert_eq!(cache.stats().cached_logs, 0);
    }

    #[test]
    fn forgets_deleted_branches() {
        let fixture = TestRepo::new();
        let root = fixture.commit("root", 1_000);
        let repo = fixture.open_raw();
        let mut cache = LogCache::new();

        for n in 0..5 {
            let name = format!("topic-{n}");
            fixture.branch(&name, root);
            let tip = fixture.commit_on(&name, &name, 2_000 + n);
            cache.log_for(&repo, &format!("refs/heads/{name}"), tip).unwrap();
        }
        assert_eq!(cache.stats().cached_refs, 5);
        assert_eq!(cache.stats().cached_logs, 5);

        for n in 0..5 {
            fixture.delete_branch(&format!("topic-{n}"));
        }
        cache.log_for(&repo, "HEAD", root).unwrap();

        assert_eq!(
            cache.stats(),
            CacheStats {
                cached_refs: 1,
                cached_logs: 1,
                cached_changesets: 1
            }
        );
    }
}
