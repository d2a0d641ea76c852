mod common;

use gitwiki::*;

// ---------------------------------------------------------------------------
// content / is_new
// ---------------------------------------------------------------------------

#[test]
fn virtual_page_is_new_and_empty() {
    let dir = tempfile::tempdir().unwrap();
    let wiki = common::create_wiki(dir.path());
    let page = wiki.find_or_create("Draft").unwrap();
    assert!(page.is_new());
    assert!(page.blob_id().is_none());
    assert_eq!(page.content().unwrap(), Vec::<u8>::new());
    assert_eq!(page.content_text().unwrap(), "");
}

#[test]
fn content_text_rejects_invalid_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let wiki = common::create_wiki(dir.path());
    wiki.commit("Binary", &[0xff, 0xfe, 0x00]).unwrap();
    let page = wiki.find("Binary").unwrap().into_result().unwrap();
    assert_eq!(page.content().unwrap(), vec![0xff, 0xfe, 0x00]);
    assert!(matches!(page.content_text(), Err(Error::Utf8(_))));
}

// ---------------------------------------------------------------------------
// update_content
// ---------------------------------------------------------------------------

#[test]
fn update_virtual_page_commits() {
    let dir = tempfile::tempdir().unwrap();
    let wiki = common::create_wiki(dir.path());
    let mut page = wiki.find_or_create("Draft").unwrap();
    let oid = page.update_content("first words").unwrap();

    assert!(oid.is_some());
    assert!(!page.is_new());
    assert_eq!(page.blob_id(), oid);
    assert_eq!(wiki.classify("Draft"), LinkClass::Exists);
    assert_eq!(
        wiki.find("Draft").unwrap().into_result().unwrap().content_text().unwrap(),
        "first words"
    );
}

#[test]
fn update_with_same_content_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let wiki = common::wiki_with_pages(dir.path());
    let head = wiki.head().unwrap();

    let mut page = wiki.find("WikiSandbox").unwrap().into_result().unwrap();
    assert_eq!(page.update_content("play here").unwrap(), None);
    assert_eq!(wiki.head().unwrap(), head);
    assert_eq!(common::chain_length(&wiki), 3);
}

#[test]
fn update_virtual_page_with_empty_content_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let wiki = common::create_wiki(dir.path());
    let mut page = wiki.find_or_create("Empty").unwrap();
    assert_eq!(page.update_content("").unwrap(), None);
    assert!(wiki.head().unwrap().is_none());
    assert!(page.is_new());
}

#[test]
fn update_with_new_content_moves_head() {
    let dir = tempfile::tempdir().unwrap();
    let wiki = common::wiki_with_pages(dir.path());
    let head = wiki.head().unwrap();

    let mut page = wiki.find("Notes").unwrap().into_result().unwrap();
    let old_blob = page.blob_id();
    let new_blob = page.update_content("# Notes\n\nmore").unwrap();

    assert_ne!(new_blob, old_blob);
    assert_ne!(wiki.head().unwrap(), head);
    assert_eq!(page.content_text().unwrap(), "# Notes\n\nmore");
    assert_eq!(common::chain_length(&wiki), 4);
}

#[test]
fn repeated_update_after_commit_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let wiki = common::create_wiki(dir.path());
    let mut page = wiki.find_or_create("Twice").unwrap();
    assert!(page.update_content("same").unwrap().is_some());
    let head = wiki.head().unwrap();
    assert!(page.update_content("same").unwrap().is_none());
    assert_eq!(wiki.head().unwrap(), head);
}

// ---------------------------------------------------------------------------
// render_to_html
// ---------------------------------------------------------------------------

#[test]
fn render_classifies_links() {
    let dir = tempfile::tempdir().unwrap();
    let wiki = common::create_wiki(dir.path());
    wiki.commit("HomePage", b"home").unwrap();
    wiki.commit("LinkTest", b"Go to HomePage or MissingPage.").unwrap();

    let html = wiki
        .find("LinkTest")
        .unwrap()
        .into_result()
        .unwrap()
        .render_to_html()
        .unwrap();
    assert!(html.contains(r#"<a class="exists" href="/HomePage">HomePage</a>"#));
    assert!(html.contains(r#"<a class="unknown" href="/MissingPage">MissingPage</a>"#));
}

#[test]
fn render_runs_markdown_before_linking() {
    let dir = tempfile::tempdir().unwrap();
    let wiki = common::create_wiki(dir.path());
    wiki.commit("Styled", b"**SeeAlso** here").unwrap();
    let html = wiki.find("Styled").unwrap().into_result().unwrap().render_to_html().unwrap();
    assert_eq!(
        html,
        "<p><strong><a class=\"unknown\" href=\"/SeeAlso\">SeeAlso</a></strong> here</p>\n"
    );
}

#[test]
fn render_virtual_page_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let wiki = common::create_wiki(dir.path());
    let page = wiki.find_or_create("NothingYet").unwrap();
    assert_eq!(page.render_to_html().unwrap(), "");
}

#[test]
fn render_does_not_create_pages() {
    let dir = tempfile::tempdir().unwrap();
    let wiki = common::create_wiki(dir.path());
    wiki.commit("Linker", b"PhantomPage PhantomPage").unwrap();
    let head = wiki.head().unwrap();
    wiki.find("Linker").unwrap().into_result().unwrap().render_to_html().unwrap();
    assert_eq!(wiki.head().unwrap(), head);
    assert!(!wiki.find("PhantomPage").unwrap().is_found());
}

struct Verbatim;

impl Markdown for Verbatim {
    fn to_html(&self, source: &str) -> String {
        source.to_string()
    }
}

#[test]
fn custom_markdown_renderer() {
    let dir = tempfile::tempdir().unwrap();
    let wiki = common::create_wiki(dir.path()).with_markdown(Verbatim);
    wiki.commit("Raw", b"*RawText*").unwrap();
    let html = wiki.find("Raw").unwrap().into_result().unwrap().render_to_html().unwrap();
    assert_eq!(html, r#"*<a class="unknown" href="/RawText">RawText</a>*"#);
}

#[test]
fn display_is_name() {
    let dir = tempfile::tempdir().unwrap();
    let wiki = common::create_wiki(dir.path());
    let page = wiki.find_or_create("ShowMe").unwrap();
    assert_eq!(format!("{}", page), "ShowMe");
}
