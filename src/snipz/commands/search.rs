use crate::commands::load::snapshot;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::{indexed, IndexedSnippet};
use crate::model::Snippet;
use crate::store::{SnippetStore, StorageBackend};

/// Filter criteria. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Case-insensitive substring of the label or the text.
    pub query: Option<String>,
    /// Exact category label.
    pub category: Option<String>,
    /// Exact tag.
    pub tag: Option<String>,
}

impl SearchFilter {
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.category.is_none() && self.tag.is_none()
    }

    pub fn matches(&self, snippet: &Snippet) -> bool {
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            let needle = query.to_lowercase();
            let hit = snippet.label.to_lowercase().contains(&needle)
                || snippet.text.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &snippet.label != category {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !snippet.has_tag(tag) {
                return false;
            }
        }
        true
    }
}

/// Matching snippets with their positions in the full collection.
pub fn run<B: StorageBackend>(
    store: &SnippetStore<B>,
    filter: &SearchFilter,
) -> Result<CmdResult<Vec<IndexedSnippet>>> {
    let total = snapshot(store)?;
    let count = total.len();
    let matches: Vec<_> = indexed(total)
        .into_iter()
        .filter(|item| filter.matches(&item.snippet))
        .collect();

    let message = if filter.is_empty() {
        format!("{} snippets", count)
    } else {
        format!("{} of {} snippets match", matches.len(), count)
    };
    Ok(CmdResult::info(matches, message))
}
