//! HTML page chrome: layout, show, edit, list and history views.

use std::fmt::Write;

use gitwiki::CommitInfo;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Percent-encode a page name for use as one URL path segment.
pub fn encode_segment(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                let _ = write!(out, "%{:02X}", byte);
            }
        }
    }
    out
}

fn page_href(name: &str) -> String {
    format!("/{}", encode_segment(name))
}

/// Wrap `content` in the common page layout.
pub fn layout(homepage: &str, title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
  </head>
  <body>
    <ul>
      <li><a href="{home}">Home</a></li>
      <li><a href="/pages">All pages</a></li>
    </ul>
    <div id="content">
{content}
    </div>
  </body>
</html>
"#,
        title = escape_html(title),
        home = page_href(homepage),
        content = content,
    )
}

/// A rendered page. `body_html` is inserted as is.
pub fn show(homepage: &str, name: &str, body_html: &str) -> String {
    let href = page_href(name);
    let content = format!(
        r#"<div id="edit">
  <a href="{href}/edit">Edit this page</a> | <a href="{href}/history">History</a>
</div>
<h1>{title}</h1>
<div id="content">
{body}
</div>"#,
        href = href,
        title = escape_html(name),
        body = body_html,
    );
    layout(homepage, name, &content)
}

/// The edit form for a page, prefilled with `content`.
pub fn edit(homepage: &str, name: &str, content: &str) -> String {
    let title = format!("Editing {}", name);
    let href = page_href(name);
    let form = format!(
        r#"<h1>{title}</h1>
<form method="POST" action="{href}">
  <p>
    <textarea name="body" rows="30" style="width: 100%">{content}</textarea>
  </p>
  <p>
    <input class="submit" type="submit" value="Save as the newest version">
    or
    <a class="cancel" href="{href}">cancel</a>
  </p>
</form>"#,
        title = escape_html(&title),
        href = href,
        content = escape_html(content),
    );
    layout(homepage, &title, &form)
}

/// The list of all pages.
pub fn list(homepage: &str, names: &[String]) -> String {
    let mut content = String::from("<h1>All pages</h1>\n");
    if names.is_empty() {
        content.push_str("<p>No pages found.</p>");
    } else {
        content.push_str("<ul id=\"list\">\n");
        for name in names {
            let _ = writeln!(
                content,
                r#"  <li><a class="page_name" href="{}">{}</a></li>"#,
                page_href(name),
                escape_html(name)
            );
        }
        content.push_str("</ul>");
    }
    layout(homepage, "Listing pages", &content)
}

/// Commits that touched a page, newest first.
pub fn history(homepage: &str, name: &str, commits: &[CommitInfo]) -> String {
    let title = format!("History of {}", name);
    let mut content = format!("<h1>{}</h1>\n", escape_html(&title));
    if commits.is_empty() {
        content.push_str("<p>No history yet.</p>");
    } else {
        content.push_str("<ul id=\"history\">\n");
        for commit in commits {
            let id = commit.id.to_string();
            let _ = writeln!(
                content,
                r#"  <li><code>{}</code> {} by {} at {}</li>"#,
                &id[..id.len().min(7)],
                escape_html(&commit.message),
                escape_html(&commit.author_name),
                format_time(commit.time)
            );
        }
        content.push_str("</ul>");
    }
    layout(homepage, &title, &content)
}

fn format_time(secs: i64) -> String {
    match chrono::DateTime::from_timestamp(secs, 0) {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => secs.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn encodes_segments() {
        assert_eq!(encode_segment("HomePage"), "HomePage");
        assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
        assert_eq!(encode_segment("café"), "caf%C3%A9");
    }

    #[test]
    fn layout_has_navigation() {
        let html = layout("Home", "T", "<p>x</p>");
        assert!(html.contains(r#"<a href="/Home">Home</a>"#));
        assert!(html.contains(r#"<a href="/pages">All pages</a>"#));
        assert!(html.contains("<title>T</title>"));
        assert!(html.contains("<p>x</p>"));
    }

    #[test]
    fn show_keeps_body_markup() {
        let html = show("Home", "HomePage", "<p><strong>hi</strong></p>");
        assert!(html.contains("<p><strong>hi</strong></p>"));
        assert!(html.contains(r#"<a href="/HomePage/edit">Edit this page</a>"#));
        assert!(html.contains("<h1>HomePage</h1>"));
    }

    #[test]
    fn edit_escapes_content() {
        let html = edit("Home", "Page", "</textarea><script>");
        assert!(html.contains("&lt;/textarea&gt;&lt;script&gt;"));
        assert!(html.contains(r#"action="/Page""#));
        assert!(html.contains("<title>Editing Page</title>"));
    }

    #[test]
    fn list_empty_and_full() {
        assert!(list("Home", &[]).contains("No pages found."));
        let html = list("Home", &["A".to_string(), "B<".to_string()]);
        assert!(html.contains(r#"<a class="page_name" href="/A">A</a>"#));
        assert!(html.contains(r#"<a class="page_name" href="/B%3C">B&lt;</a>"#));
    }

    #[test]
    fn formats_times() {
        assert_eq!(format_time(0), "1970-01-01 00:00:00 UTC");
    }
}
