use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::lock::with_repo_lock;
use crate::markdown::{CommonMark, Markdown};
use crate::names;
use crate::page::Page;
use crate::store::ObjectStore;
use crate::tree;
use crate::types::{ContentId, LinkClass, OpenOptions, WikiConfig};

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Outcome of resolving a page name against the current tree.
#[derive(Debug, Clone)]
pub enum Lookup {
    Found(Page),
    /// No entry for the requested name; carries that name.
    Absent(String),
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The page, if found.
    pub fn page(self) -> Option<Page> {
        match self {
            Self::Found(page) => Some(page),
            Self::Absent(_) => None,
        }
    }

    /// Convert `Absent(name)` into [`Error::NotFound`] carrying `name`.
    pub fn into_result(self) -> Result<Page> {
        match self {
            Self::Found(page) => Ok(page),
            Self::Absent(name) => Err(Error::NotFound(name)),
        }
    }
}

// ---------------------------------------------------------------------------
// PageStore
// ---------------------------------------------------------------------------

/// Internal state shared via `Arc`.
pub(crate) struct PageStoreInner {
    pub(crate) store: Mutex<ObjectStore>,
    pub(crate) config: WikiConfig,
}

/// Resolves page names to blobs in `HEAD`'s tree and turns edits into commits.
///
/// Cheap to clone (`Arc` internally). Every clone shares one repository
/// handle; all commits go through [`PageStore::commit`], which holds the
/// handle and the repository lock for the whole read-HEAD / write / move-HEAD
/// sequence.
#[derive(Clone)]
pub struct PageStore {
    pub(crate) inner: Arc<PageStoreInner>,
    pub(crate) markdown: Arc<dyn Markdown>,
}

impl PageStore {
    /// Open (or create) the repository at `path` and wrap it as a page store.
    ///
    /// # Errors
    /// Returns [`Error::Misconfigured`] if `config` has an empty extension
    /// or homepage.
    pub fn open(
        path: impl AsRef<Path>,
        options: OpenOptions,
        config: WikiConfig,
    ) -> Result<Self> {
        config.validate()?;
        let store = ObjectStore::open(path, options)?;
        Self::from_store(store, config)
    }

    /// Wrap an already opened object store.
    pub fn from_store(store: ObjectStore, config: WikiConfig) -> Result<Self> {
        config.validate()?;
        Ok(PageStore {
            inner: Arc::new(PageStoreInner {
                store: Mutex::new(store),
                config,
            }),
            markdown: Arc::new(CommonMark),
        })
    }

    /// Replace the Markdown renderer used by [`Page::render_to_html`].
    pub fn with_markdown(mut self, markdown: impl Markdown + 'static) -> Self {
        self.markdown = Arc::new(markdown);
        self
    }

    pub fn config(&self) -> &WikiConfig {
        &self.inner.config
    }

    pub fn extension(&self) -> &str {
        &self.inner.config.extension
    }

    pub fn homepage(&self) -> &str {
        &self.inner.config.homepage
    }

    /// Helper: lock the store mutex and call `f` with the object store.
    pub(crate) fn with_store<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&ObjectStore) -> Result<T>,
    {
        let store = self
            .inner
            .store
            .lock()
            .map_err(|e| Error::git_msg(e.to_string()))?;
        f(&store)
    }

    /// Path to the repository on disk.
    pub fn path(&self) -> Result<std::path::PathBuf> {
        self.with_store(|store| Ok(store.path().to_path_buf()))
    }

    /// The commit `HEAD` points at, or `None` before the first edit.
    pub fn head(&self) -> Result<Option<ContentId>> {
        self.with_store(|store| store.head_commit())
    }

    pub(crate) fn read_blob(&self, oid: ContentId) -> Result<Vec<u8>> {
        self.with_store(|store| store.read_blob(oid))
    }

    // -- Read ---------------------------------------------------------------

    /// Every page in `HEAD`'s tree, in tree order.
    ///
    /// A snapshot taken at call time; later commits are not reflected.
    /// Subtrees are skipped. Empty before the first commit.
    pub fn find_all(&self) -> Result<Vec<Page>> {
        let entries = self.with_store(|store| store.current_entries())?;
        Ok(entries
            .into_iter()
            .filter(|e| e.file_type().map_or(false, |t| t.is_file()))
            .map(|e| {
                let name = names::page_name(&e.name, self.extension()).to_string();
                Page::new(self.clone(), name, Some(e.oid))
            })
            .collect())
    }

    /// Resolve `name` against `HEAD`'s tree.
    ///
    /// Only file entries back a page; a subtree of the same name is absent,
    /// as in [`find_all`](Self::find_all).
    pub fn find(&self, name: &str) -> Result<Lookup> {
        let file_name = names::file_name(name, self.extension());
        let entry = self
            .with_store(|store| store.find_entry(&file_name))?
            .filter(|e| e.file_type().map_or(false, |t| t.is_file()));
        log::debug!(
            "find {:?}: {}",
            file_name,
            if entry.is_some() { "found" } else { "absent" }
        );
        Ok(match entry {
            Some(e) => {
                Lookup::Found(Page::new(self.clone(), name.to_string(), Some(e.oid)))
            }
            None => Lookup::Absent(name.to_string()),
        })
    }

    /// Resolve `name`, or return a virtual page with no backing blob.
    ///
    /// Nothing is written for a virtual page until its content is updated.
    pub fn find_or_create(&self, name: &str) -> Result<Page> {
        match self.find(name)? {
            Lookup::Found(page) => Ok(page),
            Lookup::Absent(name) => Ok(Page::new(self.clone(), name, None)),
        }
    }

    /// Classify `name` for link rendering. Read-only and infallible: a lookup
    /// error is logged and classified as unknown.
    pub fn classify(&self, name: &str) -> LinkClass {
        match self.find(name) {
            Ok(Lookup::Found(_)) => LinkClass::Exists,
            Ok(Lookup::Absent(_)) => LinkClass::Unknown,
            Err(e) => {
                log::warn!("classify {:?} failed: {}", name, e);
                LinkClass::Unknown
            }
        }
    }

    // -- Write --------------------------------------------------------------

    /// Commit `content` as the new body of page `name`.
    ///
    /// Writes a blob, upserts `name + extension` into `HEAD`'s tree as a
    /// regular file, commits that tree with the current `HEAD` as sole parent
    /// (none on an empty repository) and moves `HEAD`. Returns the blob id.
    ///
    /// Always creates a commit; skipping unchanged content is the caller's
    /// job (see [`Page::update_content`]).
    ///
    /// # Errors
    /// Returns [`Error::InvalidPageName`] for names that cannot be stored and
    /// [`Error::IsADirectory`] when `name + extension` is a subtree, which is
    /// never replaced. Object-store failures leave `HEAD` where it was.
    pub fn commit(&self, name: &str, content: &[u8]) -> Result<ContentId> {
        names::validate_page_name(name)?;
        let file_name = names::file_name(name, self.extension());

        self.with_store(|store| {
            with_repo_lock(store.git_dir(), || {
                let blob_oid = store.write_blob(content)?;

                let parent = store.head_commit()?;
                let base_tree = match parent {
                    Some(commit_oid) => Some(store.commit_tree(commit_oid)?),
                    None => None,
                };
                let existing = match base_tree {
                    Some(tree_oid) => tree::entry_by_name(store.repo(), tree_oid, &file_name)?,
                    None => None,
                };
                if let Some(entry) = &existing {
                    if entry.file_type().map_or(true, |t| !t.is_file()) {
                        return Err(Error::is_a_directory(file_name.as_str()));
                    }
                }
                let created = existing.is_none();

                let upsert = tree::blob_entry(file_name.as_str(), blob_oid);
                let tree_oid = store.build_tree(base_tree, &[upsert])?;
                let message = names::format_commit_message(created, name);
                let parents: Vec<ContentId> = parent.into_iter().collect();
                let commit_oid = store.create_commit(tree_oid, &parents, &message)?;

                log::info!(
                    "{} (blob {}, commit {})",
                    message,
                    blob_oid,
                    commit_oid
                );
                Ok(blob_oid)
            })
        })
    }
}

impl std::fmt::Debug for PageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageStore")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
