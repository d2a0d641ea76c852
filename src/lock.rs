use std::fs::OpenOptions;
use std::path::Path;
use std::time::{Duration, Instant};

use fs2::FileExt;

use crate::error::{Error, Result};

const LOCK_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_BACKOFF: Duration = Duration::from_millis(200);

/// Acquire an advisory file lock on the repository, execute `f`, then release.
///
/// Creates `<gitdir>/gitwiki.lock` and takes an exclusive `fs2` lock on it,
/// retrying with exponential backoff for up to 30 seconds. Serializes HEAD
/// updates across processes sharing the repository.
///
/// # Arguments
/// * `gitdir` - Path to the repository's git directory.
/// * `f` - Closure to execute while the lock is held.
///
/// # Errors
/// Returns [`Error::Lock`] if the lock cannot be acquired within the timeout.
pub fn with_repo_lock<F, T>(gitdir: &Path, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let lock_path = gitdir.join("gitwiki.lock");
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .map_err(|e| Error::io(&lock_path, e))?;

    let started = Instant::now();
    let mut backoff = Duration::from_millis(10);
    loop {
        match file.try_lock_exclusive() {
            Ok(()) => break,
            Err(_) if started.elapsed() < LOCK_TIMEOUT => {
                std::thread::sleep(backoff);
                backoff = (backoff * 2).min(MAX_BACKOFF);
            }
            Err(e) => {
                return Err(Error::lock(format!(
                    "{}: timed out after {:?}: {}",
                    lock_path.display(),
                    LOCK_TIMEOUT,
                    e
                )));
            }
        }
    }

    let result = f();
    if let Err(e) = FileExt::unlock(&file) {
        log::warn!("failed to release {}: {}", lock_path.display(), e);
    }
    result
}
