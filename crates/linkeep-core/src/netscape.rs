//! Netscape bookmark HTML import/export
//!
//! The interchange format browsers use for bookmark files: one anchor tag
//! per bookmark carrying `HREF`, `ADD_DATE` (epoch seconds) and `TAGS`
//! (comma-joined), with the display name as the anchor text.
//!
//! Import is a forgiving scan: anything that doesn't look like an anchor is
//! ignored, so messy real-world exports never fail outright. `ADD_DATE` is
//! recognized but discarded on import; the store stamps creation time.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{Bookmark, NewBookmark};

/// Render bookmarks as a Netscape bookmark file
pub fn export_html(bookmarks: &[Bookmark]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE NETSCAPE-Bookmark-file-1>\n");
    out.push_str("<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\n");
    out.push_str("<TITLE>Bookmarks</TITLE>\n");
    out.push_str("<H1>Bookmarks</H1>\n");
    out.push_str("<DL><p>\n");

    for bookmark in bookmarks {
        out.push_str(&format!(
            "    <DT><A HREF=\"{}\" ADD_DATE=\"{}\" TAGS=\"{}\">{}</A>\n",
            bookmark.url,
            bookmark.created_at.timestamp(),
            bookmark.tags.join(","),
            bookmark.name
        ));
    }

    out.push_str("</DL><p>\n");
    out
}

/// Extract bookmark entries from a Netscape bookmark file
///
/// A missing or empty anchor text falls back to the URL as the name.
pub fn import_html(content: &str) -> Vec<NewBookmark> {
    anchor_pattern()
        .captures_iter(content)
        .map(|caps| {
            let url = caps[1].to_string();
            let name = caps
                .get(4)
                .map(|m| m.as_str().trim())
                .filter(|text| !text.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| url.clone());
            let tags = caps
                .get(3)
                .map(|m| split_tags(m.as_str()))
                .unwrap_or_default();

            NewBookmark { url, name, tags }
        })
        .collect()
}

/// Anchor shape written by browsers and by [`export_html`]
///
/// `ADD_DATE` and `TAGS` are optional; attribute matching is
/// case-insensitive.
fn anchor_pattern() -> &'static Regex {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    ANCHOR.get_or_init(|| {
        Regex::new(
            r#"(?i)<A HREF="([^"]+)"(?:[^>]*ADD_DATE="([^"]*)")?(?:[^>]*TAGS="([^"]*)")?[^>]*>([^<]*)</A>"#,
        )
        .expect("anchor pattern is valid")
    })
}

/// Split a comma-joined TAGS attribute, dropping empty segments
fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn bookmark(id: i64, url: &str, name: &str, tags: &[&str], created: i64) -> Bookmark {
        Bookmark {
            id,
            url: url.to_string(),
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: DateTime::from_timestamp(created, 0).unwrap(),
        }
    }

    #[test]
    fn test_export_format() {
        let bookmarks = vec![
            bookmark(1, "https://a.example", "A", &["rust", "blog"], 1_700_000_000),
            bookmark(2, "https://b.example", "B", &[], 1_700_000_100),
        ];

        let html = export_html(&bookmarks);

        assert!(html.starts_with("<!DOCTYPE NETSCAPE-Bookmark-file-1>\n"));
        assert!(html.contains("<TITLE>Bookmarks</TITLE>"));
        assert!(html.contains(
            r#"    <DT><A HREF="https://a.example" ADD_DATE="1700000000" TAGS="rust,blog">A</A>"#
        ));
        assert!(html
            .contains(r#"    <DT><A HREF="https://b.example" ADD_DATE="1700000100" TAGS="">B</A>"#));
        assert!(html.ends_with("</DL><p>\n"));
    }

    #[test]
    fn test_import_basic_anchor() {
        let html = r#"<DT><A HREF="https://a.example" ADD_DATE="1700000000" TAGS="rust,blog">A</A>"#;

        let entries = import_html(html);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "https://a.example");
        assert_eq!(entries[0].name, "A");
        assert_eq!(entries[0].tags, vec!["rust", "blog"]);
    }

    #[test]
    fn test_import_without_optional_attributes() {
        let html = r#"<DT><A HREF="https://a.example">A</A>"#;

        let entries = import_html(html);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "A");
        assert!(entries[0].tags.is_empty());
    }

    #[test]
    fn test_import_empty_name_falls_back_to_url() {
        let html = r#"<DT><A HREF="https://a.example" TAGS=""></A>"#;

        let entries = import_html(html);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "https://a.example");
    }

    #[test]
    fn test_import_is_case_insensitive() {
        let html = r#"<dt><a href="https://a.example" tags="x">A</a>"#;

        let entries = import_html(html);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tags, vec!["x"]);
    }

    #[test]
    fn test_import_ignores_noise() {
        let html = r#"
            <!DOCTYPE NETSCAPE-Bookmark-file-1>
            <H1>Bookmarks</H1>
            <DL><p>
                <DT><H3>Some folder</H3>
                <DT><A HREF="https://a.example">A</A>
            </DL><p>
        "#;

        let entries = import_html(html);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "https://a.example");
    }

    #[test]
    fn test_import_reads_back_export() {
        let original = vec![
            bookmark(1, "https://a.example", "A", &["rust"], 1_700_000_000),
            bookmark(2, "https://b.example", "B", &[], 1_700_000_100),
        ];

        let entries = import_html(&export_html(&original));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].url, original[0].url);
        assert_eq!(entries[0].name, original[0].name);
        assert_eq!(entries[0].tags, original[0].tags);
        assert_eq!(entries[1].tags, Vec::<String>::new());
    }
}
