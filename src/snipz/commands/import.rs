//! Reading snippets from external files.
//!
//! `.json` files must hold an array of records (objects or bare strings), normalized
//! the same way the store normalizes legacy data. Any other file is read as plain text,
//! one snippet per non-blank line. Import never writes: the caller decides whether to
//! commit the result with [`crate::commands::create::run`].

use crate::commands::CmdResult;
use crate::error::{Result, SnipzError};
use crate::model::Snippet;
use crate::schema::normalize_import;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Json,
    Text,
}

impl ImportKind {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ImportKind::Json,
            _ => ImportKind::Text,
        }
    }
}

pub fn run(path: &Path) -> Result<CmdResult<Vec<Snippet>>> {
    let content = std::fs::read_to_string(path)?;
    let kind = ImportKind::for_path(path);
    let snippets = match kind {
        ImportKind::Json => parse_json(&content)?,
        ImportKind::Text => parse_text(&content),
    };

    debug!(path = %path.display(), ?kind, count = snippets.len(), "parsed import file");
    let source = match kind {
        ImportKind::Json => "JSON",
        ImportKind::Text => "text file",
    };
    let message = format!("Imported {} snippets from {}", snippets.len(), source);
    Ok(CmdResult::success(snippets, message))
}

pub fn parse_json(content: &str) -> Result<Vec<Snippet>> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(records) = value else {
        return Err(SnipzError::Validation(
            "Imported file must contain a JSON array".to_string(),
        ));
    };

    let total = records.len();
    let snippets: Vec<_> = records.into_iter().filter_map(normalize_import).collect();
    if snippets.len() < total {
        warn!(skipped = total - snippets.len(), "skipped non-record import entries");
    }
    Ok(snippets)
}

pub fn parse_text(content: &str) -> Vec<Snippet> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Snippet::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn text_lines_become_snippets() {
        let snippets = parse_text("one\n\n  two  \n\t\nthree\n");
        let texts: Vec<_> = snippets.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
        assert!(snippets.iter().all(|s| s.label.is_empty() && s.tags.is_empty()));
    }

    #[test]
    fn json_records_are_normalized_with_fresh_ids() {
        let id = "0b6f8ddc-5fd6-4d0e-9d0e-1f0a3c2e9a11";
        let content = format!(
            r#"["bare", {{"id": "{}", "text": "t", "label": "L", "tags": "bad", "x": 1}}, 42]"#,
            id
        );
        let snippets = parse_json(&content).unwrap();
        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets[0].text, "bare");
        assert_eq!(snippets[1].label, "L");
        assert!(snippets[1].tags.is_empty());
        assert_ne!(snippets[1].id.to_string(), id);
        assert!(snippets[1].extra.is_empty());
    }

    #[test]
    fn json_must_be_an_array() {
        let err = parse_json(r#"{"text": "x"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Imported file must contain a JSON array");
        assert!(matches!(parse_json("[oops"), Err(SnipzError::Serialization(_))));
    }

    #[test]
    fn kind_follows_extension() {
        assert_eq!(ImportKind::for_path(Path::new("a.JSON")), ImportKind::Json);
        assert_eq!(ImportKind::for_path(Path::new("a.txt")), ImportKind::Text);
        assert_eq!(ImportKind::for_path(Path::new("notes")), ImportKind::Text);
    }

    #[test]
    fn reads_files_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("list.txt");
        fs::write(&path, "alpha\nbeta\n").unwrap();

        let result = run(&path).unwrap();
        assert_eq!(result.value.len(), 2);
        assert_eq!(result.message.content, "Imported 2 snippets from text file");

        let json = dir.path().join("list.json");
        fs::write(&json, r#"["alpha"]"#).unwrap();
        assert_eq!(run(&json).unwrap().message.content, "Imported 1 snippets from JSON");

        assert!(matches!(
            run(&dir.path().join("missing.json")),
            Err(SnipzError::Io(_))
        ));
    }
}
