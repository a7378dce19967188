//! Rendering snippets to text, HTML and Markdown documents.
//!
//! The `render_*` functions are pure: they take the snippets in display order and the
//! export time, and return the whole document. [`run`] picks the format, renders, and
//! writes the result atomically.

use crate::commands::{snippets_word, CmdResult};
use crate::error::{Result, SnipzError};
use crate::model::Snippet;
use crate::store::fs_backend::write_atomic;
use chrono::NaiveDateTime;
use pulldown_cmark::{html, Event, Options, Parser};
use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Html,
    Markdown,
}

impl ExportFormat {
    /// Detects the format from a file extension, if it is one we write.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "txt" => Some(ExportFormat::Text),
            "html" | "htm" => Some(ExportFormat::Html),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            _ => None,
        }
    }

    /// Short upper-case name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Text => "TXT",
            ExportFormat::Html => "HTML",
            ExportFormat::Markdown => "MD",
        }
    }

    pub fn render(&self, snippets: &[Snippet], exported_at: NaiveDateTime) -> String {
        match self {
            ExportFormat::Text => render_text(snippets),
            ExportFormat::Html => render_html(snippets, exported_at),
            ExportFormat::Markdown => render_markdown(snippets, exported_at),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = SnipzError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Text),
            "html" | "htm" => Ok(ExportFormat::Html),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            other => Err(SnipzError::Validation(format!(
                "Unknown export format '{}' (expected txt, html or md)",
                other
            ))),
        }
    }
}

/// Writes `snippets` to `path`. An explicit `format` wins over the file extension.
pub fn run(
    snippets: &[Snippet],
    path: &Path,
    format: Option<ExportFormat>,
    exported_at: NaiveDateTime,
) -> Result<CmdResult<usize>> {
    let format = format
        .or_else(|| ExportFormat::from_path(path))
        .ok_or_else(|| {
            SnipzError::Validation(format!(
                "Cannot tell the export format of {} (use .txt, .html or .md)",
                path.display()
            ))
        })?;

    let document = format.render(snippets, exported_at);
    write_atomic(path, &document)?;

    let count = snippets.len();
    info!(count, path = %path.display(), format = format.name(), "exported snippets");
    Ok(CmdResult::success(
        count,
        format!(
            "Exported {} {} to {} file",
            count,
            snippets_word(count),
            format.name()
        ),
    ))
}

pub fn render_text(snippets: &[Snippet]) -> String {
    let mut out = String::new();
    for snippet in snippets {
        if !snippet.label.is_empty() {
            let _ = writeln!(out, "[{}]", snippet.label);
        }
        if !snippet.tags.is_empty() {
            let _ = writeln!(out, "Tags: {}", snippet.tags.join(", "));
        }
        if snippet.is_template {
            out.push_str("[TEMPLATE]\n");
        }
        if snippet.is_markdown {
            out.push_str("[MARKDOWN]\n");
        }
        let _ = write!(out, "{}\n\n", snippet.text);
    }
    out
}

const HTML_STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; }
.snippet { border: 1px solid #ccc; padding: 10px; margin-bottom: 20px; border-radius: 5px; }
.label { font-weight: bold; color: #333; margin-bottom: 5px; }
.tags { color: #0066cc; font-style: italic; margin-bottom: 5px; }
.badge { display: inline-block; background-color: #f0f0f0; padding: 2px 5px; border-radius: 3px; margin-right: 5px; font-size: 0.8em; }
.text { white-space: pre-wrap; }
.text.markdown-content { white-space: normal; }
.markdown { border-left: 3px solid #2979ff; padding-left: 10px; }
.template { border-left: 3px solid #4caf50; padding-left: 10px; }
";

/// Renders a self-contained HTML page. All snippet text is escaped; markdown bodies are
/// rendered to HTML here, with any raw HTML in them shown as text.
pub fn render_html(snippets: &[Snippet], exported_at: NaiveDateTime) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>Exported Snippets</title>\n");
    let _ = write!(out, "<style>\n{}</style>\n</head>\n<body>\n", HTML_STYLE);
    out.push_str("<h1>Exported Snippets</h1>\n");
    let _ = writeln!(
        out,
        "<p>Exported on {}</p>",
        exported_at.format(TIMESTAMP_FORMAT)
    );

    for (i, snippet) in snippets.iter().enumerate() {
        let mut classes = vec!["snippet"];
        if snippet.is_markdown {
            classes.push("markdown");
        }
        if snippet.is_template {
            classes.push("template");
        }

        let _ = writeln!(out, "<div class=\"{}\">", classes.join(" "));
        let _ = writeln!(
            out,
            "<div class=\"label\">#{}: {}</div>",
            i + 1,
            escape_html(&snippet.label)
        );
        if !snippet.tags.is_empty() {
            out.push_str("<div class=\"tags\">Tags: ");
            for tag in &snippet.tags {
                let _ = write!(out, "<span class=\"badge\">{}</span>", escape_html(tag));
            }
            out.push_str("</div>\n");
        }
        if snippet.is_markdown {
            let _ = writeln!(
                out,
                "<div class=\"text markdown-content\">\n{}</div>",
                markdown_to_html(&snippet.text)
            );
        } else {
            let _ = writeln!(out, "<div class=\"text\">{}</div>", escape_html(&snippet.text));
        }
        out.push_str("</div>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

pub fn render_markdown(snippets: &[Snippet], exported_at: NaiveDateTime) -> String {
    let mut out = String::from("# Exported Snippets\n\n");
    let _ = write!(
        out,
        "Exported on {}\n\n",
        exported_at.format(TIMESTAMP_FORMAT)
    );

    for (i, snippet) in snippets.iter().enumerate() {
        let _ = write!(out, "## {}. {}\n\n", i + 1, snippet.label);
        if !snippet.tags.is_empty() {
            let _ = write!(out, "**Tags**: {}\n\n", snippet.tags.join(", "));
        }
        if snippet.is_template {
            out.push_str("**Template**\n\n");
        }
        if snippet.is_markdown {
            out.push_str("**Markdown Content**\n\n");
            let _ = write!(out, "{}\n\n", snippet.text);
        } else {
            let fence = code_fence(&snippet.text);
            let _ = write!(out, "{}\n{}\n{}\n\n", fence, snippet.text, fence);
        }
    }
    out
}

/// A backtick fence longer than any backtick run inside `body`.
fn code_fence(body: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in body.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}

fn markdown_to_html(source: &str) -> String {
    let events = Parser::new_ext(source, Options::all()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut rendered = String::new();
    html::push_html(&mut rendered, events);
    rendered
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::tempdir;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap()
    }

    fn sample() -> Vec<Snippet> {
        vec![
            Snippet::new("user: admin")
                .with_label("WordPress Login")
                .with_tags(["credentials", "web"]),
            Snippet::new("# Agenda\n\n- item")
                .with_label("Meeting Notes")
                .markdown(true)
                .template(true),
        ]
    }

    #[test]
    fn text_layout() {
        let text = render_text(&sample());
        assert_eq!(
            text,
            "[WordPress Login]\nTags: credentials, web\nuser: admin\n\n\
             [Meeting Notes]\n[TEMPLATE]\n[MARKDOWN]\n# Agenda\n\n- item\n\n"
        );
    }

    #[test]
    fn text_omits_empty_label_and_tags() {
        assert_eq!(render_text(&[Snippet::new("bare")]), "bare\n\n");
    }

    #[test]
    fn html_escapes_plain_text() {
        let snippets = vec![Snippet::new("<script>alert(1)</script>").with_label("a & b")];
        let html = render_html(&snippets, at());
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("#1: a &amp; b"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("Exported on 2024-03-09 14:05:00"));
    }

    #[test]
    fn html_renders_markdown_without_raw_html() {
        let snippets = vec![Snippet::new("**bold**\n\n<img src=x onerror=alert(1)>").markdown(true)];
        let html = render_html(&snippets, at());
        assert!(html.contains("<strong>bold</strong>"));
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img"));
        assert!(html.contains("class=\"snippet markdown\""));
    }

    #[test]
    fn html_tag_badges() {
        let html = render_html(&sample(), at());
        assert!(html.contains("<span class=\"badge\">credentials</span><span class=\"badge\">web</span>"));
        assert!(html.contains("class=\"snippet markdown template\""));
    }

    #[test]
    fn markdown_layout() {
        let md = render_markdown(&sample(), at());
        assert!(md.starts_with("# Exported Snippets\n\nExported on 2024-03-09 14:05:00\n\n"));
        assert!(md.contains("## 1. WordPress Login\n\n**Tags**: credentials, web\n\n```\nuser: admin\n```\n\n"));
        assert!(md.contains("## 2. Meeting Notes\n\n**Template**\n\n**Markdown Content**\n\n# Agenda"));
    }

    #[test]
    fn fence_outgrows_backticks_in_body() {
        assert_eq!(code_fence("plain"), "```");
        assert_eq!(code_fence("```rust\nx\n```"), "````");
        assert_eq!(code_fence("a ````` b"), "``````");
    }

    #[test]
    fn format_detection() {
        assert_eq!(ExportFormat::from_path(Path::new("a.TXT")), Some(ExportFormat::Text));
        assert_eq!(ExportFormat::from_path(Path::new("a.htm")), Some(ExportFormat::Html));
        assert_eq!(ExportFormat::from_path(Path::new("a.markdown")), Some(ExportFormat::Markdown));
        assert_eq!(ExportFormat::from_path(Path::new("a.pdf")), None);
        assert_eq!("MD".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn run_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.md");
        let result = run(&sample(), &path, None, at()).unwrap();
        assert_eq!(result.message.content, "Exported 2 snippets to MD file");
        assert!(fs::read_to_string(&path).unwrap().starts_with("# Exported Snippets"));

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn run_rejects_unknown_extension() {
        let dir = tempdir().unwrap();
        assert!(run(&sample(), &dir.path().join("out.pdf"), None, at()).is_err());
        let forced = run(&sample(), &dir.path().join("out.pdf"), Some(ExportFormat::Text), at());
        assert!(forced.is_ok());
    }
}
