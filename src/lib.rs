//! A minimal wiki stored in a git repository.
//!
//! Pages are not files on disk: each page is a blob in `HEAD`'s tree, each
//! edit is a commit, and page existence is read off the current tree.
//!
//! # Key types
//!
//! - [`PageStore`] — owns the repository; finds, lists and classifies pages
//!   and commits edits.
//! - [`Page`] — one resolved or virtual page; reads, renders and updates its
//!   content.
//! - [`Lookup`] — outcome of [`PageStore::find`]: `Found(Page)` or
//!   `Absent(name)`.
//! - [`ObjectStore`] — thin adapter over the git object database.
//!
//! # Quick example
//!
//! ```rust,no_run
//! use gitwiki::{OpenOptions, PageStore, WikiConfig};
//!
//! let opts = OpenOptions { create: true, ..Default::default() };
//! let wiki = PageStore::open("/tmp/wiki.git", opts, WikiConfig::default()).unwrap();
//!
//! let mut page = wiki.find_or_create("HomePage").unwrap();
//! page.update_content("Welcome! See SandBox.").unwrap();
//!
//! // "SandBox" is rendered as <a class="unknown" href="/SandBox">SandBox</a>
//! let html = wiki.find("HomePage").unwrap().into_result().unwrap().render_to_html().unwrap();
//! ```

pub mod error;
pub mod history;
pub mod link;
pub mod lock;
pub mod markdown;
pub mod names;
pub mod page;
pub mod pages;
pub mod store;
pub mod tree;
pub mod types;

// Re-export primary public types at crate root.
pub use error::{Error, Result};
pub use markdown::{CommonMark, Markdown};
pub use page::Page;
pub use pages::{Lookup, PageStore};
pub use store::ObjectStore;
pub use types::*;
