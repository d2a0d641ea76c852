use pulldown_cmark::{html, Options, Parser};

/// Converts page source text to HTML.
pub trait Markdown: Send + Sync {
    fn to_html(&self, source: &str) -> String;
}

/// CommonMark rendering via pulldown-cmark, with tables, strikethrough and
/// task lists enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonMark;

impl Markdown for CommonMark {
    fn to_html(&self, source: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        let parser = Parser::new_ext(source, options);
        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}
