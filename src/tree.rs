use crate::error::{Error, Result};
use crate::types::{ContentId, TreeEntry, MODE_BLOB};

/// Convert a tree entry's raw filemode to our u32 representation.
pub(crate) fn mode_to_u32(mode: i32) -> u32 {
    mode as u32
}

/// Convert our u32 mode to the filemode libgit2 expects.
pub(crate) fn u32_to_mode(mode: u32) -> i32 {
    mode as i32
}

/// List the entries of a tree, in tree order.
pub fn list_tree(repo: &git2::Repository, tree_oid: ContentId) -> Result<Vec<TreeEntry>> {
    let tree = repo.find_tree(tree_oid).map_err(Error::git)?;
    Ok(tree
        .iter()
        .map(|e| TreeEntry {
            name: String::from_utf8_lossy(e.name_bytes()).into_owned(),
            oid: e.id(),
            mode: mode_to_u32(e.filemode()),
        })
        .collect())
}

/// Return the entry named exactly `name`, or `None` if missing.
///
/// Scans the entries of the single tree level at `tree_oid`; names are
/// compared byte for byte.
pub fn entry_by_name(
    repo: &git2::Repository,
    tree_oid: ContentId,
    name: &str,
) -> Result<Option<TreeEntry>> {
    let tree = repo.find_tree(tree_oid).map_err(Error::git)?;
    let found = tree
        .iter()
        .find(|e| e.name_bytes() == name.as_bytes())
        .map(|e| TreeEntry {
            name: name.to_string(),
            oid: e.id(),
            mode: mode_to_u32(e.filemode()),
        });
    Ok(found)
}

/// Build a new tree from `base_tree` with each `(name, oid, mode)` inserted,
/// replacing any entry of the same name.
///
/// `base_tree` of `None` starts from an empty tree. Entries of the base that
/// are not upserted are shared by id.
///
/// # Returns
/// OID of the new tree.
pub fn upsert_entries(
    repo: &git2::Repository,
    base_tree: Option<ContentId>,
    upserts: &[TreeEntry],
) -> Result<ContentId> {
    let base = match base_tree {
        Some(oid) => Some(repo.find_tree(oid).map_err(Error::git)?),
        None => None,
    };

    let mut builder = repo.treebuilder(base.as_ref()).map_err(Error::git)?;
    for entry in upserts {
        builder
            .insert(entry.name.as_str(), entry.oid, u32_to_mode(entry.mode))
            .map_err(Error::git)?;
    }
    let tree_oid = builder.write().map_err(Error::git)?;
    log::debug!(
        "built tree {} ({} upserts, {} entries)",
        tree_oid,
        upserts.len(),
        builder.len()
    );
    Ok(tree_oid)
}

/// A regular-file entry pointing `name` at `oid`.
pub fn blob_entry(name: impl Into<String>, oid: ContentId) -> TreeEntry {
    TreeEntry {
        name: name.into(),
        oid,
        mode: MODE_BLOB,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_repo() -> (tempfile::TempDir, git2::Repository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = git2::Repository::init_bare(dir.path().join("t.git")).unwrap();
        (dir, repo)
    }

    #[test]
    fn upsert_into_empty_tree() {
        let (_dir, repo) = bare_repo();
        let blob = repo.blob(b"hello").unwrap();
        let tree = upsert_entries(&repo, None, &[blob_entry("a.md", blob)]).unwrap();

        let entries = list_tree(&repo, tree).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "a.md");
        assert_eq!(entries[0].oid, blob);
        assert_eq!(entries[0].mode, MODE_BLOB);
    }

    #[test]
    fn upsert_replaces_and_keeps_siblings() {
        let (_dir, repo) = bare_repo();
        let a1 = repo.blob(b"a1").unwrap();
        let b = repo.blob(b"b").unwrap();
        let base = upsert_entries(
            &repo,
            None,
            &[blob_entry("a.md", a1), blob_entry("b.md", b)],
        )
        .unwrap();

        let a2 = repo.blob(b"a2").unwrap();
        let next = upsert_entries(&repo, Some(base), &[blob_entry("a.md", a2)]).unwrap();

        assert_eq!(entry_by_name(&repo, next, "a.md").unwrap().unwrap().oid, a2);
        assert_eq!(entry_by_name(&repo, next, "b.md").unwrap().unwrap().oid, b);
        assert_eq!(list_tree(&repo, next).unwrap().len(), 2);
    }

    #[test]
    fn entry_by_name_is_exact() {
        let (_dir, repo) = bare_repo();
        let blob = repo.blob(b"x").unwrap();
        let tree = upsert_entries(&repo, None, &[blob_entry("Foo.md", blob)]).unwrap();

        assert!(entry_by_name(&repo, tree, "Foo.md").unwrap().is_some());
        assert!(entry_by_name(&repo, tree, "Foo").unwrap().is_none());
        assert!(entry_by_name(&repo, tree, "foo.md").unwrap().is_none());
    }
}
