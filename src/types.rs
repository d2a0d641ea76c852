use std::fmt;

/// Hash-derived identifier of a blob, tree or commit.
pub type ContentId = git2::Oid;

// ---------------------------------------------------------------------------
// Mode constants
// ---------------------------------------------------------------------------

pub const MODE_BLOB: u32 = 0o100644;
pub const MODE_BLOB_EXEC: u32 = 0o100755;
pub const MODE_LINK: u32 = 0o120000;
pub const MODE_TREE: u32 = 0o040000;

// ---------------------------------------------------------------------------
// FileType
// ---------------------------------------------------------------------------

/// The type of a git tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Blob,
    Executable,
    Link,
    Tree,
}

impl FileType {
    /// Convert a raw git mode to a `FileType`.
    pub fn from_mode(mode: u32) -> Option<Self> {
        match mode {
            MODE_BLOB => Some(Self::Blob),
            MODE_BLOB_EXEC => Some(Self::Executable),
            MODE_LINK => Some(Self::Link),
            MODE_TREE => Some(Self::Tree),
            _ => None,
        }
    }

    /// Whether this type can back a page (blob or executable).
    pub fn is_file(self) -> bool {
        matches!(self, Self::Blob | Self::Executable)
    }
}

// ---------------------------------------------------------------------------
// TreeEntry
// ---------------------------------------------------------------------------

/// One `(name, object id, mode)` entry of a tree snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: String,
    pub oid: ContentId,
    pub mode: u32,
}

impl TreeEntry {
    pub fn file_type(&self) -> Option<FileType> {
        FileType::from_mode(self.mode)
    }
}

// ---------------------------------------------------------------------------
// LinkClass
// ---------------------------------------------------------------------------

/// Existence classification of a page name, used as a CSS class on links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkClass {
    Exists,
    Unknown,
}

impl LinkClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exists => "exists",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LinkClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Signature / CommitInfo
// ---------------------------------------------------------------------------

/// Author/committer identity.
#[derive(Debug, Clone)]
pub struct Signature {
    pub name: String,
    pub email: String,
}

impl Default for Signature {
    fn default() -> Self {
        Self {
            name: "gitwiki".into(),
            email: "gitwiki@localhost".into(),
        }
    }
}

/// A commit as seen when walking history.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    pub id: ContentId,
    /// Commit message (trailing newline stripped).
    pub message: String,
    /// Author timestamp, seconds since epoch.
    pub time: i64,
    pub author_name: String,
    pub author_email: String,
    pub parents: Vec<ContentId>,
}

// ---------------------------------------------------------------------------
// Options / config
// ---------------------------------------------------------------------------

/// Options for opening or creating the backing repository.
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    /// Create a bare repository if none exists at the path.
    pub create: bool,
    /// Commit author name.
    pub author: Option<String>,
    /// Commit author email.
    pub email: Option<String>,
}

/// Wiki-level settings: the page-file extension and the home page name.
#[derive(Debug, Clone)]
pub struct WikiConfig {
    pub extension: String,
    pub homepage: String,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            extension: ".md".into(),
            homepage: "Home".into(),
        }
    }
}

impl WikiConfig {
    pub fn new(extension: impl Into<String>, homepage: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            homepage: homepage.into(),
        }
    }

    /// Fail with [`Error::Misconfigured`](crate::Error::Misconfigured) when a
    /// required setting is empty.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.extension.is_empty() {
            return Err(crate::error::Error::misconfigured(
                "page extension must not be empty",
            ));
        }
        if self.homepage.is_empty() {
            return Err(crate::error::Error::misconfigured(
                "homepage name must not be empty",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub limit: Option<usize>,
    /// Only include commits that changed this page.
    pub page: Option<String>,
}
