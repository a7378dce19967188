//! # Domain Model
//!
//! [`Snippet`] is the only persisted entity. On disk a snippet is a flat JSON object:
//!
//! ```text
//! {
//!   "id": "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
//!   "text": "Password: hunter2",
//!   "label": "WordPress Login",
//!   "tags": ["credentials", "web"],
//!   "is_markdown": false,
//!   "is_template": false
//! }
//! ```
//!
//! Keys the current schema does not know about are kept in [`Snippet::extra`] and
//! written back untouched, so a file produced by a newer version survives a round trip
//! through an older one.
//!
//! ## Identity
//!
//! Older files had no `id`: a snippet was whatever sat at a given array position. Every
//! snippet now carries a UUID assigned when it is created (or when a legacy record is
//! first normalized, see [`crate::schema`]). Positions are still used for display and
//! for [`crate::index::Selector::Index`], but only ever against a freshly loaded snapshot.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Label every snippet falls back to when its category is deleted.
pub const DEFAULT_LABEL: &str = "default";

/// Canonical keys of a persisted snippet. Anything else lands in `extra`.
pub const CANONICAL_KEYS: [&str; 6] = ["id", "text", "label", "tags", "is_markdown", "is_template"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: Uuid,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_markdown: bool,
    #[serde(default)]
    pub is_template: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Snippet {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            label: String::new(),
            tags: Vec::new(),
            is_markdown: false,
            is_template: false,
            extra: Map::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn markdown(mut self, is_markdown: bool) -> Self {
        self.is_markdown = is_markdown;
        self
    }

    pub fn template(mut self, is_template: bool) -> Self {
        self.is_template = is_template;
        self
    }

    /// A copy of this snippet under a fresh id, e.g. when instantiating a template.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }

    /// Adds `tag` unless already present. Returns whether the tags changed.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if tag.is_empty() || self.has_tag(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Removes every occurrence of `tag`. Returns whether the tags changed.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// First non-empty line of the body, used for one-line listings.
    pub fn preview(&self) -> &str {
        self.text
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("")
    }
}

/// A set of keys to merge into selected snippets.
///
/// A patch is an open JSON object rather than a struct with optional fields: bulk
/// updates accept unknown keys (they end up in [`Snippet::extra`]), and values of the
/// wrong type are repaired by the normalizer after merging, like any other record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnippetPatch {
    fields: Map<String, Value>,
}

impl SnippetPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.set("text", Value::String(text.into()))
    }

    pub fn label(self, label: impl Into<String>) -> Self {
        self.set("label", Value::String(label.into()))
    }

    pub fn tags<I, T>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let tags = tags.into_iter().map(|t| Value::String(t.into())).collect();
        self.set("tags", Value::Array(tags))
    }

    pub fn markdown(self, is_markdown: bool) -> Self {
        self.set("is_markdown", Value::Bool(is_markdown))
    }

    pub fn template(self, is_template: bool) -> Self {
        self.set("is_template", Value::Bool(is_template))
    }

    /// Sets an arbitrary key. The `id` key is ignored when the patch is applied.
    pub fn set(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for SnippetPatch {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

const SEED_CREDENTIALS: &str = "Site name: Example Blog
URL: https://example.com/wp-admin
Username: admin
Password: change-me-2024";

const SEED_MEETING_NOTES: &str = "# Meeting Notes Template

## Meeting Information
- **Date**: [Date]
- **Time**: [Time]
- **Location**: [Location]
- **Attendees**: [Names]

## Agenda
1. [Topic 1]
2. [Topic 2]
3. [Topic 3]

## Discussion Points
*

## Action Items
- [ ] [Task 1] - Assigned to: [Name]
- [ ] [Task 2] - Assigned to: [Name]
- [ ] [Task 3] - Assigned to: [Name]

## Next Meeting
- **Date**: [Date]
- **Time**: [Time]
- **Location**: [Location]";

/// Content written on first run, when no snippet file exists yet.
pub fn default_snippets() -> Vec<Snippet> {
    vec![
        Snippet::new(SEED_CREDENTIALS)
            .with_label("WordPress Login")
            .with_tags(["credentials", "web"]),
        Snippet::new(SEED_MEETING_NOTES)
            .with_label("Meeting Notes")
            .with_tags(["template", "business"])
            .markdown(true)
            .template(true),
    ]
}
