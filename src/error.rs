use std::path::PathBuf;

/// All errors produced by gitwiki.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested page (or repository) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A page name resolves to a subtree rather than a blob.
    #[error("is a directory: {0}")]
    IsADirectory(String),

    #[error("misconfigured: {0}")]
    Misconfigured(String),

    #[error("invalid page name: {0}")]
    InvalidPageName(String),

    #[error("lock error: {0}")]
    Lock(String),

    #[error("invalid UTF-8: {0}")]
    Utf8(String),

    #[error("git error: {0}")]
    Git(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

impl Error {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn is_a_directory(name: impl Into<String>) -> Self {
        Self::IsADirectory(name.into())
    }

    pub fn misconfigured(msg: impl Into<String>) -> Self {
        Self::Misconfigured(msg.into())
    }

    pub fn invalid_page_name(msg: impl Into<String>) -> Self {
        Self::InvalidPageName(msg.into())
    }

    pub fn lock(msg: impl Into<String>) -> Self {
        Self::Lock(msg.into())
    }

    pub fn git(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Git(Box::new(err))
    }

    pub fn git_msg(msg: impl Into<String>) -> Self {
        Self::Git(msg.into().into())
    }

    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io(std::io::Error::new(
            err.kind(),
            format!("{}: {}", path.into().display(), err),
        ))
    }

    /// `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
