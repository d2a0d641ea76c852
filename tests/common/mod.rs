use std::path::Path;

use gitwiki::*;

pub fn create_wiki(dir: &Path) -> PageStore {
    PageStore::open(
        dir.join("wiki.git"),
        OpenOptions {
            create: true,
            ..Default::default()
        },
        WikiConfig::default(),
    )
    .unwrap()
}

#[allow(dead_code)]
pub fn wiki_with_pages(dir: &Path) -> PageStore {
    let wiki = create_wiki(dir);
    wiki.commit("HomePage", b"Welcome to the WikiSandbox.").unwrap();
    wiki.commit("WikiSandbox", b"play here").unwrap();
    wiki.commit("Notes", b"# Notes").unwrap();
    wiki
}

/// Number of commits reachable from HEAD, asserting each has at most one parent.
#[allow(dead_code)]
pub fn chain_length(wiki: &PageStore) -> usize {
    let repo = git2::Repository::open(wiki.path().unwrap()).unwrap();
    if repo.is_empty().unwrap() {
        return 0;
    }
    let mut commit = repo.head().unwrap().peel_to_commit().unwrap();
    let mut n = 1;
    loop {
        assert!(commit.parent_count() <= 1, "commit {} is a merge", commit.id());
        let parent = commit.parents().next();
        match parent {
            Some(parent) => {
                commit = parent;
                n += 1;
            }
            None => return n,
        }
    }
}
