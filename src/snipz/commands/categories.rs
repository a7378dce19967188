//! Category registry commands.
//!
//! Rename and delete cascade over the stored snippets. The snippet file is written
//! first; a registry left behind by a failed second write only costs label colors.

use crate::category::CategoryRegistry;
use crate::commands::load::snapshot;
use crate::commands::{snippets_word, CmdResult};
use crate::error::Result;
use crate::store::{SnippetStore, StorageBackend};
use tracing::info;

pub fn list<B: StorageBackend>(store: &SnippetStore<B>) -> Result<CmdResult<CategoryRegistry>> {
    let registry = store.load_categories()?;
    let count = registry.len();
    Ok(CmdResult::info(registry, format!("{} categories", count)))
}

pub fn set<B: StorageBackend>(
    store: &mut SnippetStore<B>,
    name: &str,
    color: &str,
) -> Result<CmdResult<bool>> {
    let mut registry = store.load_categories()?;
    let created = registry.set(name, color)?;
    store.save_categories(&registry)?;

    let verb = if created { "Added" } else { "Updated" };
    info!(name, color, created, "set category");
    Ok(CmdResult::success(
        created,
        format!("{} category '{}'", verb, name.trim()),
    ))
}

pub fn rename<B: StorageBackend>(
    store: &mut SnippetStore<B>,
    old: &str,
    new: &str,
) -> Result<CmdResult<usize>> {
    let mut registry = store.load_categories()?;
    let mut snippets = snapshot(store)?;
    let relabeled = registry.rename(old, new, &mut snippets)?;

    if relabeled > 0 {
        store.save(&snippets)?;
    }
    store.save_categories(&registry)?;

    info!(old, new, relabeled, "renamed category");
    Ok(CmdResult::success(
        relabeled,
        format!(
            "Renamed category '{}' to '{}' ({} {} relabeled)",
            old,
            new.trim(),
            relabeled,
            snippets_word(relabeled)
        ),
    ))
}

pub fn delete<B: StorageBackend>(
    store: &mut SnippetStore<B>,
    name: &str,
) -> Result<CmdResult<usize>> {
    let mut registry = store.load_categories()?;
    let mut snippets = snapshot(store)?;
    let relabeled = registry.delete(name, &mut snippets)?;

    if relabeled > 0 {
        store.save(&snippets)?;
    }
    store.save_categories(&registry)?;

    info!(name, relabeled, "deleted category");
    Ok(CmdResult::success(
        relabeled,
        format!(
            "Deleted category '{}' ({} {} moved to default)",
            name,
            relabeled,
            snippets_word(relabeled)
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Snippet, DEFAULT_LABEL};
    use crate::store::InMemoryStore;

    fn store() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        store
            .save(&[
                Snippet::new("a").with_label("Password"),
                Snippet::new("b").with_label("Password"),
                Snippet::new("c").with_label("Facebook Page"),
            ])
            .unwrap();
        store
    }

    fn labels(store: &InMemoryStore) -> Vec<String> {
        store
            .load()
            .unwrap()
            .snippets
            .into_iter()
            .map(|s| s.label)
            .collect()
    }

    #[test]
    fn lists_defaults_when_nothing_saved() {
        let result = list(&store()).unwrap();
        assert_eq!(result.value, CategoryRegistry::default());
    }

    #[test]
    fn set_persists_new_category() {
        let mut store = store();
        assert!(set(&mut store, "Servers", "#112233").unwrap().value);
        assert!(!set(&mut store, "Servers", "#445566").unwrap().value);

        let registry = store.load_categories().unwrap();
        assert_eq!(registry.color_for("Servers"), "#445566");
    }

    #[test]
    fn set_rejects_bad_color_without_writing() {
        let mut store = store();
        assert!(set(&mut store, "Servers", "blue").is_err());
        assert!(store.backend().categories_raw().is_none());
    }

    #[test]
    fn rename_cascades() {
        let mut store = store();
        let result = rename(&mut store, "Password", "Secrets").unwrap();
        assert_eq!(result.value, 2);
        assert_eq!(labels(&store), vec!["Secrets", "Secrets", "Facebook Page"]);

        let registry = store.load_categories().unwrap();
        assert!(registry.get("Password").is_none());
        assert_eq!(registry.color_for("Secrets"), "#8A2BE2");
    }

    #[test]
    fn delete_cascades_to_default() {
        let mut store = store();
        let result = delete(&mut store, "Facebook Page").unwrap();
        assert_eq!(result.value, 1);
        assert_eq!(labels(&store), vec!["Password", "Password", DEFAULT_LABEL]);
        assert!(store.load_categories().unwrap().get("Facebook Page").is_none());
    }

    #[test]
    fn default_category_is_protected() {
        let mut store = store();
        assert!(delete(&mut store, DEFAULT_LABEL).is_err());
        assert!(rename(&mut store, DEFAULT_LABEL, "Other").is_err());
    }
}
