//! Throwaway repositories for tests.

use git2::{BranchType, Commit, Oid, Repository, RepositoryInitOptions, Signature, Time};
use tempfile::TempDir;

use crate::git::GitRepository;

pub struct TestRepo {
    pub dir: TempDir,
}

impl TestRepo {
    /// An empty repository whose HEAD points at the unborn `main` branch.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        Repository::init_opts(dir.path(), &opts).unwrap();
        Self { dir }
    }

    pub fn open_raw(&self) -> Repository {
        Repository::open(self.dir.path()).unwrap()
    }

    pub fn open(&self) -> GitRepository {
        GitRepository::open(self.dir.path()).unwrap()
    }

    /// Commits on top of HEAD, authored at `seconds` since the epoch.
    pub fn commit(&self, message: &str, seconds: i64) -> Oid {
        self.commit_to("HEAD", message, seconds)
    }

    /// Commits on top of the local branch `branch`, which must exist.
    pub fn commit_on(&self, branch: &str, message: &str, seconds: i64) -> Oid {
        self.commit_to(&format!("refs/heads/{}", branch), message, seconds)
    }

    pub fn branch(&self, name: &str, target: Oid) {
        let repo = self.open_raw();
        let commit = repo.find_commit(target).unwrap();
        repo.branch(name, &commit, false).unwrap();
    }

    pub fn delete_branch(&self, name: &str) {
        let repo = self.open_raw();
        repo.find_branch(name, BranchType::Local)
            .unwrap()
            .delete()
            .unwrap();
    }

    pub fn has_branch(&self, name: &str) -> bool {
        self.open_raw().find_branch(name, BranchType::Local).is_ok()
    }

    /// Commits `count` changesets on HEAD, one second apart, returning their
    /// ids oldest first.
    pub fn commits(&self, count: usize) -> Vec<Oid> {
        (0..count)
            .map(|n| self.commit(&format!("commit {}", n), 1_000 + n as i64))
            .collect()
    }

    fn commit_to(&self, reference: &str, message: &str, seconds: i64) -> Oid {
        let repo = self.open_raw();
        let sig = Signature::new("Tester", "tester@example.com", &Time::new(seconds, 0)).unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo
            .revparse_single(reference)
            .ok()
            .and_then(|obj| obj.peel_to_commit().ok());
        let parents: Vec<&Commit> = parent.iter().collect();
        repo.commit(Some(reference), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }
}
