//! Batch update and delete.
//!
//! Both operations load their own snapshot, resolve every selector to an id against it,
//! and only then mutate. Deletion is by id, so the order indexes are given in cannot
//! shift which records are removed.

use crate::commands::load::snapshot;
use crate::commands::{snippets_word, CmdResult};
use crate::error::{Result, SnipzError};
use crate::index::{resolve_selectors, Selector};
use crate::model::SnippetPatch;
use crate::schema::apply_patch;
use crate::store::{SnippetStore, StorageBackend};
use std::collections::HashSet;
use tracing::{debug, info};

pub fn update<B: StorageBackend>(
    store: &mut SnippetStore<B>,
    selectors: &[Selector],
    patch: &SnippetPatch,
) -> Result<CmdResult<usize>> {
    let mut snippets = snapshot(store)?;
    if snippets.is_empty() {
        return Err(SnipzError::Validation("No snippets to update".to_string()));
    }

    let ids: HashSet<_> = resolve_selectors(&snippets, selectors).into_iter().collect();
    debug!(requested = selectors.len(), resolved = ids.len(), "resolved update selectors");
    if ids.is_empty() {
        return Err(SnipzError::Validation("No snippets were updated".to_string()));
    }

    for snippet in snippets.iter_mut().filter(|s| ids.contains(&s.id)) {
        *snippet = apply_patch(snippet, patch);
    }
    store.save(&snippets)?;

    let count = ids.len();
    info!(count, "updated snippets");
    Ok(CmdResult::success(
        count,
        format!("Updated {} {}", count, snippets_word(count)),
    ))
}

pub fn delete<B: StorageBackend>(
    store: &mut SnippetStore<B>,
    selectors: &[Selector],
) -> Result<CmdResult<usize>> {
    let mut snippets = snapshot(store)?;
    if snippets.is_empty() {
        return Err(SnipzError::Validation("No snippets to delete".to_string()));
    }

    let ids: HashSet<_> = resolve_selectors(&snippets, selectors).into_iter().collect();
    debug!(requested = selectors.len(), resolved = ids.len(), "resolved delete selectors");
    if ids.is_empty() {
        return Err(SnipzError::Validation("No snippets were deleted".to_string()));
    }

    let before = snippets.len();
    snippets.retain(|s| !ids.contains(&s.id));
    let count = before - snippets.len();
    store.save(&snippets)?;

    info!(count, "deleted snippets");
    Ok(CmdResult::success(
        count,
        format!("Deleted {} {}", count, snippets_word(count)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Snippet;
    use crate::store::InMemoryStore;
    use serde_json::json;

    fn store_with(texts: &[&str]) -> (InMemoryStore, Vec<Snippet>) {
        let mut store = InMemoryStore::new();
        let snippets: Vec<_> = texts.iter().map(|t| Snippet::new(*t)).collect();
        store.save(&snippets).unwrap();
        (store, snippets)
    }

    fn texts(store: &InMemoryStore) -> Vec<String> {
        store
            .load()
            .unwrap()
            .snippets
            .into_iter()
            .map(|s| s.text)
            .collect()
    }

    #[test]
    fn update_merges_patch_into_selected() {
        let (mut store, _) = store_with(&["a", "b", "c"]);
        let patch = SnippetPatch::new().label("Work").markdown(true);
        let result = update(&mut store, &[Selector::Index(0), Selector::Index(2)], &patch).unwrap();
        assert_eq!(result.value, 2);

        let all = store.load().unwrap().snippets;
        assert_eq!(all[0].label, "Work");
        assert!(all[0].is_markdown);
        assert_eq!(all[1].label, "");
        assert_eq!(all[2].label, "Work");
    }

    #[test]
    fn update_keeps_ids_and_unknown_keys() {
        let (mut store, original) = store_with(&["a"]);
        let patch = SnippetPatch::new()
            .set("id", json!("not-a-uuid"))
            .set("color", json!("red"));
        update(&mut store, &[Selector::Index(0)], &patch).unwrap();

        let snippet = &store.load().unwrap().snippets[0];
        assert_eq!(snippet.id, original[0].id);
        assert_eq!(snippet.extra.get("color"), Some(&json!("red")));
    }

    #[test]
    fn update_repairs_bad_types() {
        let (mut store, _) = store_with(&["a"]);
        let patch = SnippetPatch::new().set("tags", json!("oops"));
        update(&mut store, &[Selector::Index(0)], &patch).unwrap();
        assert!(store.load().unwrap().snippets[0].tags.is_empty());
    }

    #[test]
    fn update_counts_distinct_records() {
        let (mut store, snippets) = store_with(&["a", "b"]);
        let selectors = [Selector::Index(1), Selector::Id(snippets[1].id), Selector::Index(1)];
        let result = update(&mut store, &selectors, &SnippetPatch::new().text("x")).unwrap();
        assert_eq!(result.value, 1);
    }

    #[test]
    fn update_out_of_range_fails_without_writing() {
        let (mut store, _) = store_with(&["a", "b", "c"]);
        let before = store.backend().snippets_raw();
        let err = update(&mut store, &[Selector::Index(5)], &SnippetPatch::new().text("x"))
            .unwrap_err();
        assert_eq!(err.to_string(), "No snippets were updated");
        assert_eq!(store.backend().snippets_raw(), before);
    }

    #[test]
    fn update_on_empty_store_fails() {
        let (mut store, _) = store_with(&[]);
        let err = update(&mut store, &[Selector::Index(0)], &SnippetPatch::new()).unwrap_err();
        assert_eq!(err.to_string(), "No snippets to update");
    }

    #[test]
    fn delete_order_does_not_matter() {
        for selectors in [
            [Selector::Index(0), Selector::Index(2)],
            [Selector::Index(2), Selector::Index(0)],
        ] {
            let (mut store, _) = store_with(&["a", "b", "c"]);
            let result = delete(&mut store, &selectors).unwrap();
            assert_eq!(result.value, 2);
            assert_eq!(texts(&store), vec!["b"]);
        }
    }

    #[test]
    fn delete_by_id() {
        let (mut store, snippets) = store_with(&["a", "b"]);
        delete(&mut store, &[Selector::Id(snippets[0].id)]).unwrap();
        assert_eq!(texts(&store), vec!["b"]);
    }

    #[test]
    fn delete_skips_unresolved_selectors() {
        let (mut store, _) = store_with(&["a", "b"]);
        let result = delete(&mut store, &[Selector::Index(1), Selector::Index(7)]).unwrap();
        assert_eq!(result.value, 1);
        assert_eq!(result.message.content, "Deleted 1 snippet");
    }

    #[test]
    fn delete_failures() {
        let (mut store, _) = store_with(&["a"]);
        let err = delete(&mut store, &[Selector::Index(3)]).unwrap_err();
        assert_eq!(err.to_string(), "No snippets were deleted");

        let (mut empty, _) = store_with(&[]);
        let err = delete(&mut empty, &[Selector::Index(0)]).unwrap_err();
        assert_eq!(err.to_string(), "No snippets to delete");
    }

    #[test]
    fn write_failure_propagates() {
        let (mut store, _) = store_with(&["a"]);
        store.backend().set_simulate_write_error(true);
        assert!(matches!(
            delete(&mut store, &[Selector::Index(0)]),
            Err(SnipzError::Io(_))
        ));
    }
}
