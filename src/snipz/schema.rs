//! # Schema Normalization
//!
//! Snippet files have gone through several shapes over time:
//!
//! 1. A bare array of strings (`["first", "second"]`).
//! 2. Objects with `text` and `label` only.
//! 3. Objects with `tags`, `is_markdown` and `is_template`.
//! 4. The current shape, which adds a stable `id`.
//!
//! Anything read from disk or from an import goes through [`normalize_record`], which
//! turns any of these into a canonical [`Snippet`]. Individual records are repaired,
//! never rejected:
//!
//! - Bare string → a snippet with that text and every other field defaulted.
//! - Object → canonical fields are taken when present with the right type and defaulted
//!   otherwise. `tags` that is not an array becomes `[]` (no coercion of scalars);
//!   non-string entries inside it are dropped. A missing or malformed `id` is replaced.
//!   Every other key is carried through in [`Snippet::extra`].
//! - Anything else (numbers, `null`, nested arrays) is not a record and is skipped.

use crate::model::{Snippet, SnippetPatch, CANONICAL_KEYS};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::warn;
use uuid::Uuid;

/// Outcome of normalizing a single raw value.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub snippet: Snippet,
    /// True when the raw value was not already canonical and had to be repaired.
    pub migrated: bool,
}

/// Counters for a batch normalization.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeReport {
    pub migrated: usize,
    pub skipped: usize,
}

pub fn normalize_record(raw: Value) -> Option<Normalized> {
    match raw {
        Value::String(text) => Some(Normalized {
            snippet: Snippet::new(text),
            migrated: true,
        }),
        Value::Object(map) => Some(normalize_object(map)),
        _ => None,
    }
}

/// Normalizes a whole document. A record whose id was already taken by an earlier one
/// gets a fresh id and counts as migrated, so every loaded id is unique.
pub fn normalize_records(raw: Vec<Value>) -> (Vec<Snippet>, NormalizeReport) {
    let mut report = NormalizeReport::default();
    let mut snippets = Vec::with_capacity(raw.len());
    let mut seen = HashSet::with_capacity(raw.len());

    for (position, value) in raw.into_iter().enumerate() {
        match normalize_record(value) {
            Some(mut n) => {
                if !seen.insert(n.snippet.id) {
                    warn!(position, id = %n.snippet.id, "reassigning duplicate snippet id");
                    n.snippet.id = Uuid::new_v4();
                    seen.insert(n.snippet.id);
                    n.migrated = true;
                }
                if n.migrated {
                    report.migrated += 1;
                }
                snippets.push(n.snippet);
            }
            None => {
                warn!(position, "skipping record that is neither an object nor a string");
                report.skipped += 1;
            }
        }
    }

    (snippets, report)
}

fn normalize_object(mut map: Map<String, Value>) -> Normalized {
    let mut migrated = false;

    let id = match map.remove("id") {
        Some(Value::String(s)) => match Uuid::parse_str(&s) {
            Ok(id) => id,
            Err(_) => {
                migrated = true;
                Uuid::new_v4()
            }
        },
        _ => {
            migrated = true;
            Uuid::new_v4()
        }
    };

    let text = take_string(&mut map, "text", &mut migrated);
    let label = take_string(&mut map, "label", &mut migrated);

    let tags = match map.remove("tags") {
        Some(Value::Array(items)) => {
            let total = items.len();
            let tags: Vec<String> = items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect();
            if tags.len() != total {
                migrated = true;
            }
            tags
        }
        _ => {
            migrated = true;
            Vec::new()
        }
    };

    let is_markdown = take_bool(&mut map, "is_markdown", &mut migrated);
    let is_template = take_bool(&mut map, "is_template", &mut migrated);

    Normalized {
        snippet: Snippet {
            id,
            text,
            label,
            tags,
            is_markdown,
            is_template,
            extra: map,
        },
        migrated,
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str, migrated: &mut bool) -> String {
    match map.remove(key) {
        Some(Value::String(s)) => s,
        _ => {
            *migrated = true;
            String::new()
        }
    }
}

fn take_bool(map: &mut Map<String, Value>, key: &str, migrated: &mut bool) -> bool {
    match map.remove(key) {
        Some(Value::Bool(b)) => b,
        _ => {
            *migrated = true;
            false
        }
    }
}

/// Normalizes a record coming from an external file.
///
/// Imported records only keep the canonical fields and always get a fresh id, so an
/// import can never collide with (or silently replace) a snippet already in the store.
pub fn normalize_import(raw: Value) -> Option<Snippet> {
    normalize_record(raw).map(|n| Snippet {
        id: Uuid::new_v4(),
        extra: Map::new(),
        ..n.snippet
    })
}

/// Merges `patch` into `snippet`. Patch keys win; the id is never replaced.
pub fn apply_patch(snippet: &Snippet, patch: &SnippetPatch) -> Snippet {
    let mut object = to_object(snippet);
    for (key, value) in patch.fields() {
        if key == "id" {
            continue;
        }
        object.insert(key.clone(), value.clone());
    }
    // The id was copied from a valid Uuid, so this always yields an object record.
    match normalize_record(Value::Object(object)) {
        Some(n) => n.snippet,
        None => snippet.clone(),
    }
}

fn to_object(snippet: &Snippet) -> Map<String, Value> {
    let mut object = snippet.extra.clone();
    object.insert("id".into(), Value::String(snippet.id.to_string()));
    object.insert("text".into(), Value::String(snippet.text.clone()));
    object.insert("label".into(), Value::String(snippet.label.clone()));
    object.insert(
        "tags".into(),
        Value::Array(snippet.tags.iter().cloned().map(Value::String).collect()),
    );
    object.insert("is_markdown".into(), Value::Bool(snippet.is_markdown));
    object.insert("is_template".into(), Value::Bool(snippet.is_template));
    debug_assert!(CANONICAL_KEYS.iter().all(|k| object.contains_key(*k)));
    object
}
