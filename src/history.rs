use crate::error::{Error, Result};
use crate::names;
use crate::pages::PageStore;
use crate::store::ObjectStore;
use crate::tree;
use crate::types::{CommitInfo, ContentId, LogOptions};

impl PageStore {
    /// Walk history from `HEAD` along first parents, newest first.
    ///
    /// With `opts.page` set, only commits whose entry for that page differs
    /// from their parent's are returned. Empty before the first commit.
    pub fn log(&self, opts: LogOptions) -> Result<Vec<CommitInfo>> {
        let limit = opts.limit.unwrap_or(usize::MAX);
        let filter = opts
            .page
            .as_deref()
            .map(|name| names::file_name(name, self.extension()));

        self.with_store(|store| {
            let mut results = Vec::new();
            let mut next = store.head_commit()?;

            while let Some(commit_oid) = next {
                if results.len() >= limit {
                    break;
                }
                let info = commit_info(store, commit_oid)?;
                next = info.parents.first().copied();

                let include = match filter {
                    Some(ref file_name) => {
                        touches(store, commit_oid, next, file_name)?
                    }
                    None => true,
                };
                if include {
                    results.push(info);
                }
            }

            Ok(results)
        })
    }
}

fn commit_info(store: &ObjectStore, commit_oid: ContentId) -> Result<CommitInfo> {
    let commit = store.repo().find_commit(commit_oid).map_err(Error::git)?;
    let author = commit.author();
    Ok(CommitInfo {
        id: commit_oid,
        message: String::from_utf8_lossy(commit.message_bytes())
            .trim_end_matches('\n')
            .to_string(),
        time: author.when().seconds(),
        author_name: String::from_utf8_lossy(author.name_bytes()).into_owned(),
        author_email: String::from_utf8_lossy(author.email_bytes()).into_owned(),
        parents: commit.parent_ids().collect(),
    })
}

/// Whether `file_name` has a different entry in `commit_oid` than in `parent`.
fn touches(
    store: &ObjectStore,
    commit_oid: ContentId,
    parent: Option<ContentId>,
    file_name: &str,
) -> Result<bool> {
    let this_tree = store.commit_tree(commit_oid)?;
    let this_entry = tree::entry_by_name(store.repo(), this_tree, file_name)?;
    let parent_entry = match parent {
        Some(pid) => {
            let parent_tree = store.commit_tree(pid)?;
            tree::entry_by_name(store.repo(), parent_tree, file_name)?
        }
        None => None,
    };
    Ok(this_entry.map(|e| e.oid) != parent_entry.map(|e| e.oid))
}
