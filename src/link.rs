//! Existence-aware auto-linking of CamelCase page references.
//!
//! The pass runs over already-rendered HTML. Every non-overlapping match of
//! the wiki-word pattern, scanning left to right, is replaced by an anchor
//! whose `href` is `/<word>` and whose `class` tells whether the page exists.
//! Matches inside tags or attribute values are linked too.

use regex::Captures;

use crate::names::WIKI_WORD;
use crate::types::LinkClass;

/// Replace every wiki word in `html` with an anchor classified by `classify`.
///
/// `classify` is called once per match, in order of appearance.
pub fn wiki_link<F>(html: &str, mut classify: F) -> String
where
    F: FnMut(&str) -> LinkClass,
{
    WIKI_WORD
        .replace_all(html, |caps: &Captures<'_>| {
            let word = &caps[0];
            anchor(word, classify(word))
        })
        .into_owned()
}

/// The anchor element for a page reference.
pub fn anchor(word: &str, class: LinkClass) -> String {
    format!(r#"<a class="{}" href="/{}">{}</a>"#, class, word, word)
}
