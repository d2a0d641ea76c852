use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::tree;
use crate::types::{ContentId, OpenOptions, Signature, TreeEntry};

/// Adapter over the git object database backing the wiki.
///
/// Writes blobs, trees and commits and moves `HEAD`. It knows nothing about
/// pages; [`PageStore`](crate::PageStore) owns one and serializes access.
pub struct ObjectStore {
    repo: git2::Repository,
    path: PathBuf,
    signature: Signature,
}

impl ObjectStore {
    /// Open (or create) the repository at `path`.
    ///
    /// A new repository is initialised bare.
    pub fn open(path: impl AsRef<Path>, options: OpenOptions) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let signature = Signature {
            name: options.author.unwrap_or_else(|| Signature::default().name),
            email: options.email.unwrap_or_else(|| Signature::default().email),
        };

        let repo = if path.exists() {
            git2::Repository::open(&path).map_err(Error::git)?
        } else if options.create {
            std::fs::create_dir_all(&path).map_err(|e| Error::io(&path, e))?;
            log::info!("initialising bare repository at {}", path.display());
            git2::Repository::init_bare(&path).map_err(Error::git)?
        } else {
            return Err(Error::not_found(format!(
                "repository not found: {}",
                path.display()
            )));
        };

        Ok(ObjectStore {
            repo,
            path,
            signature,
        })
    }

    /// Path the repository was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The git directory (the repository itself when bare).
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// The identity used for author and committer.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Direct access to the underlying repository.
    pub fn repo(&self) -> &git2::Repository {
        &self.repo
    }

    /// `true` while no commit exists yet.
    pub fn is_empty(&self) -> Result<bool> {
        self.repo.is_empty().map_err(Error::git)
    }

    pub fn write_blob(&self, data: &[u8]) -> Result<ContentId> {
        self.repo.blob(data).map_err(Error::git)
    }

    pub fn read_blob(&self, oid: ContentId) -> Result<Vec<u8>> {
        let blob = self.repo.find_blob(oid).map_err(Error::git)?;
        Ok(blob.content().to_vec())
    }

    /// The commit `HEAD` points at, or `None` while `HEAD` is unborn.
    ///
    /// `HEAD` can be unborn in a repository that has other refs, so this
    /// checks the reference itself rather than [`is_empty`](Self::is_empty).
    pub fn head_commit(&self) -> Result<Option<ContentId>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                return Ok(None)
            }
            Err(e) => return Err(Error::git(e)),
        };
        let commit = head.peel_to_commit().map_err(Error::git)?;
        Ok(Some(commit.id()))
    }

    /// The tree of `HEAD`'s commit, or `None` while `HEAD` is unborn.
    pub fn current_tree(&self) -> Result<Option<ContentId>> {
        match self.head_commit()? {
            Some(commit_oid) => self.commit_tree(commit_oid).map(Some),
            None => Ok(None),
        }
    }

    /// The tree a commit points at.
    pub fn commit_tree(&self, commit_oid: ContentId) -> Result<ContentId> {
        let commit = self.repo.find_commit(commit_oid).map_err(Error::git)?;
        Ok(commit.tree_id())
    }

    /// Entries of `HEAD`'s tree, in tree order. Empty on an empty repository.
    pub fn current_entries(&self) -> Result<Vec<TreeEntry>> {
        match self.current_tree()? {
            Some(tree_oid) => tree::list_tree(&self.repo, tree_oid),
            None => Ok(Vec::new()),
        }
    }

    /// Look up `name` in `HEAD`'s tree.
    pub fn find_entry(&self, name: &str) -> Result<Option<TreeEntry>> {
        match self.current_tree()? {
            Some(tree_oid) => tree::entry_by_name(&self.repo, tree_oid, name),
            None => Ok(None),
        }
    }

    /// Write a tree equal to `base` with `upserts` applied.
    pub fn build_tree(
        &self,
        base: Option<ContentId>,
        upserts: &[TreeEntry],
    ) -> Result<ContentId> {
        tree::upsert_entries(&self.repo, base, upserts)
    }

    /// Write a commit of `tree` on top of `parents` and move `HEAD` to it.
    ///
    /// Author and committer are the store's signature stamped with the
    /// current time. `HEAD` is only updated once the commit object exists.
    pub fn create_commit(
        &self,
        tree_oid: ContentId,
        parents: &[ContentId],
        message: &str,
    ) -> Result<ContentId> {
        let sig = git2::Signature::now(&self.signature.name, &self.signature.email)
            .map_err(Error::git)?;
        let tree = self.repo.find_tree(tree_oid).map_err(Error::git)?;

        let parent_commits = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).map_err(Error::git))
            .collect::<Result<Vec<_>>>()?;
        let parent_refs: Vec<&git2::Commit<'_>> = parent_commits.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .map_err(Error::git)
    }
}

impl std::fmt::Debug for ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStore")
            .field("path", &self.path)
            .field("signature", &self.signature)
            .finish()
    }
}
