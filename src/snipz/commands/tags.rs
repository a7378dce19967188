use crate::commands::load::snapshot;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Snippet;
use crate::store::{SnippetStore, StorageBackend};
use std::collections::BTreeSet;

/// Every tag in use, sorted, without repeats.
pub fn all_tags<B: StorageBackend>(store: &SnippetStore<B>) -> Result<CmdResult<Vec<String>>> {
    let tags = collect_tags(&snapshot(store)?);
    let message = if tags.is_empty() {
        "No tags in use".to_string()
    } else {
        format!("{} tags in use", tags.len())
    };
    Ok(CmdResult::info(tags, message))
}

pub fn templates<B: StorageBackend>(store: &SnippetStore<B>) -> Result<CmdResult<Vec<Snippet>>> {
    let templates: Vec<_> = snapshot(store)?
        .into_iter()
        .filter(|s| s.is_template)
        .collect();
    let message = if templates.is_empty() {
        "No templates found".to_string()
    } else {
        format!("Found {} templates", templates.len())
    };
    Ok(CmdResult::info(templates, message))
}

pub fn collect_tags(snippets: &[Snippet]) -> Vec<String> {
    snippets
        .iter()
        .flat_map(|s| s.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    #[test]
    fn collects_sorted_unique_tags() {
        let snippets = vec![
            Snippet::new("a").with_tags(["web", "alpha"]),
            Snippet::new("b").with_tags(["web", "zeta"]),
            Snippet::new("c"),
        ];
        assert_eq!(collect_tags(&snippets), vec!["alpha", "web", "zeta"]);
    }

    #[test]
    fn seeds_provide_tags_and_a_template() {
        let store = InMemoryStore::new();
        let tags = all_tags(&store).unwrap().value;
        assert_eq!(tags, vec!["business", "credentials", "template", "web"]);

        let templates = templates(&store).unwrap().value;
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].label, "Meeting Notes");
    }

    #[test]
    fn empty_store_has_no_tags() {
        let mut store = InMemoryStore::new();
        store.save(&[]).unwrap();
        let result = all_tags(&store).unwrap();
        assert!(result.value.is_empty());
        assert_eq!(result.message.content, "No tags in use");
    }
}
