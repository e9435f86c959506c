//! Directory listing module
//!
//! Renders an HTML index for directories that have no index file.
//! The format is this server's own minimal page, not a clone of any
//! other handler's markup.

use std::path::Path;
use tokio::fs;

/// One entry in a rendered listing
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListingEntry {
    name: String,
    is_dir: bool,
}

/// Render the listing page for `dir`, shown as `request_path`.
///
/// Entries are sorted directories first, then files, both
/// case-insensitively. Unreadable entries are skipped.
pub async fn render_directory(dir: &Path, request_path: &str) -> std::io::Result<String> {
    let mut entries = Vec::new();
    let mut reader = fs::read_dir(dir).await?;
    while let Some(entry) = reader.next_entry().await? {
        let Ok(file_type) = entry.file_type().await else {
            continue;
        };
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: file_type.is_dir(),
        });
    }

    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    Ok(render_page(request_path, &entries))
}

fn render_page(request_path: &str, entries: &[ListingEntry]) -> String {
    let title = escape_html(request_path);
    let mut items = String::new();

    if request_path != "/" {
        items.push_str("        <li><a href=\"../\">../</a></li>\n");
    }

    for entry in entries {
        let suffix = if entry.is_dir { "/" } else { "" };
        items.push_str(&format!(
            "        <li><a href=\"{}{suffix}\">{}{suffix}</a></li>\n",
            encode_href(&entry.name),
            escape_html(&entry.name),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Index of {title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            margin: 40px auto;
            max-width: 720px;
            padding: 0 16px;
            color: #222;
        }}
        h1 {{ font-size: 1.4em; word-break: break-all; }}
        ul {{ list-style: none; padding: 0; line-height: 1.8; }}
        a {{ text-decoration: none; color: #0366d6; }}
        a:hover {{ text-decoration: underline; }}
    </style>
</head>
<body>
    <h1>Index of {title}</h1>
    <hr>
    <ul>
{items}    </ul>
    <hr>
</body>
</html>
"#
    )
}

/// Escape text for safe embedding in HTML
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Percent-encode a file name for use in an href
fn encode_href(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for &b in name.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(char::from(b));
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use std::path::PathBuf;

    fn test_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("quickserve-listing-{tag}-{}", std::process::id()));
        let _ = std_fs::remove_dir_all(&dir);
        std_fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn html_escaping() {
        assert_eq!(escape_html("a&b"), "a&amp;b");
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("say \"hi\""), "say &quot;hi&quot;");
    }

    #[test]
    fn href_encoding() {
        assert_eq!(encode_href("plain.txt"), "plain.txt");
        assert_eq!(encode_href("with space.txt"), "with%20space.txt");
        assert_eq!(encode_href("50%.txt"), "50%25.txt");
        assert_eq!(encode_href("q?.txt"), "q%3F.txt");
    }

    #[tokio::test]
    async fn directories_sort_before_files() {
        let dir = test_dir("sort");
        std_fs::write(dir.join("Alpha.txt"), "").unwrap();
        std_fs::write(dir.join("beta.txt"), "").unwrap();
        std_fs::create_dir(dir.join("zulu")).unwrap();

        let html = render_directory(&dir, "/files/").await.unwrap();
        let zulu = html.find("zulu/").unwrap();
        let alpha = html.find("Alpha.txt").unwrap();
        let beta = html.find("beta.txt").unwrap();
        assert!(zulu < alpha, "directories come first");
        assert!(alpha < beta, "files sort case-insensitively");
    }

    #[tokio::test]
    async fn listing_has_title_and_parent_link() {
        let dir = test_dir("title");
        std_fs::write(dir.join("a.txt"), "").unwrap();

        let html = render_directory(&dir, "/files/").await.unwrap();
        assert!(html.contains("<title>Index of /files/</title>"));
        assert!(html.contains("<h1>Index of /files/</h1>"));
        assert!(html.contains("<a href=\"../\">../</a>"));
    }

    #[tokio::test]
    async fn root_listing_has_no_parent_link() {
        let dir = test_dir("root");
        let html = render_directory(&dir, "/").await.unwrap();
        assert!(!html.contains("href=\"../\""));
    }

    #[tokio::test]
    async fn names_are_escaped_and_encoded() {
        let dir = test_dir("escape");
        std_fs::write(dir.join("a b.txt"), "").unwrap();

        let html = render_directory(&dir, "/").await.unwrap();
        assert!(html.contains("href=\"a%20b.txt\""));
        assert!(html.contains(">a b.txt<"));
    }
}
