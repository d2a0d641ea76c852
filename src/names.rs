use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// A CamelCase page reference: two or more capitalised words run together.
pub(crate) static WIKI_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Z][a-z]+[A-Z][A-Za-z0-9]+").expect("wiki word pattern is valid")
});

/// The tree entry name backing page `name`.
pub fn file_name(name: &str, extension: &str) -> String {
    format!("{}{}", name, extension)
}

/// The logical page name for a stored entry name.
///
/// Strips one trailing occurrence of `extension`; names without it are
/// returned unchanged.
pub fn page_name<'a>(file_name: &'a str, extension: &str) -> &'a str {
    if extension.is_empty() {
        return file_name;
    }
    file_name.strip_suffix(extension).unwrap_or(file_name)
}

/// Validate a page name before it is written into a tree.
///
/// Rejects empty names, `.`/`..`, path separators and control characters.
///
/// # Errors
/// Returns [`Error::InvalidPageName`] if the name violates any rule.
pub fn validate_page_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_page_name("page name must not be empty"));
    }

    if name == "." || name == ".." {
        return Err(Error::invalid_page_name(format!(
            "page name '{}' is not allowed",
            name,
        )));
    }

    for ch in name.chars() {
        if ch == '/' || ch == '\\' || ch.is_control() {
            return Err(Error::invalid_page_name(format!(
                "page name contains invalid character: {:?}",
                ch,
            )));
        }
    }

    Ok(())
}

/// Commit message for an edit of `name`.
pub fn format_commit_message(created: bool, name: &str) -> String {
    if created {
        format!("Created {}", name)
    } else {
        format!("Updated {}", name)
    }
}
