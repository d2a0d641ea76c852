use crate::error::{Error, Result};
use crate::link;
use crate::pages::PageStore;
use crate::types::ContentId;

/// One page, resolved to a blob or virtual (requested but never committed).
///
/// Built per request by [`PageStore`]; holds the logical name (extension
/// stripped) and the blob id it resolved to.
#[derive(Clone)]
pub struct Page {
    store: PageStore,
    name: String,
    blob_id: Option<ContentId>,
}

impl Page {
    pub(crate) fn new(store: PageStore, name: String, blob_id: Option<ContentId>) -> Self {
        Self {
            store,
            name,
            blob_id,
        }
    }

    /// The logical page name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The backing blob id; `None` for a virtual page.
    pub fn blob_id(&self) -> Option<ContentId> {
        self.blob_id
    }

    /// `true` when no blob backs this page yet.
    pub fn is_new(&self) -> bool {
        self.blob_id.is_none()
    }

    /// Raw page content. Empty for a virtual page.
    pub fn content(&self) -> Result<Vec<u8>> {
        match self.blob_id {
            Some(oid) => self.store.read_blob(oid),
            None => Ok(Vec::new()),
        }
    }

    /// Page content as UTF-8 text.
    pub fn content_text(&self) -> Result<String> {
        let data = self.content()?;
        String::from_utf8(data).map_err(|e| Error::Utf8(format!("{}: {}", self.name, e)))
    }

    /// Render the content to HTML, then auto-link wiki words in the result.
    ///
    /// Each link's class comes from [`PageStore::classify`]; nothing is
    /// created as a side effect.
    pub fn render_to_html(&self) -> Result<String> {
        let data = self.content()?;
        let source = String::from_utf8_lossy(&data);
        let html = self.store.markdown.to_html(&source);
        Ok(link::wiki_link(&html, |word| self.store.classify(word)))
    }

    /// Commit `new_content` unless it equals the current content.
    ///
    /// Returns the new blob id, or `None` when nothing was committed. On
    /// success this page points at the new blob.
    pub fn update_content(&mut self, new_content: impl AsRef<[u8]>) -> Result<Option<ContentId>> {
        let new_content = new_content.as_ref();
        if new_content == self.content()?.as_slice() {
            log::debug!("{}: content unchanged, skipping commit", self.name);
            return Ok(None);
        }
        let oid = self.store.commit(&self.name, new_content)?;
        self.blob_id = Some(oid);
        Ok(Some(oid))
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("name", &self.name)
            .field("blob_id", &self.blob_id)
            .finish()
    }
}
