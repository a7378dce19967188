use crate::commands::{snippets_word, CmdResult};
use crate::error::Result;
use crate::model::Snippet;
use crate::store::{SnippetStore, StorageBackend};
use tracing::info;

/// Overwrites the store with `snippets`, in the given order.
pub fn run<B: StorageBackend>(
    store: &mut SnippetStore<B>,
    snippets: &[Snippet],
) -> Result<CmdResult<usize>> {
    let count = store.save(snippets)?;
    info!(count, "saved snippet collection");
    Ok(CmdResult::success(
        count,
        format!("Saved {} {}", count, snippets_word(count)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::load;
    use crate::store::InMemoryStore;

    #[test]
    fn saves_and_reports_count() {
        let mut store = InMemoryStore::new();
        let snippets = vec![Snippet::new("one"), Snippet::new("two")];
        let result = run(&mut store, &snippets).unwrap();
        assert_eq!(result.value, 2);
        assert_eq!(result.message.content, "Saved 2 snippets");

        let loaded = load::run(&store).unwrap();
        assert_eq!(loaded.value, snippets);
    }

    #[test]
    fn saving_empty_list_clears_store() {
        let mut store = InMemoryStore::new();
        run(&mut store, &[]).unwrap();
        let loaded = load::run(&store).unwrap();
        assert!(loaded.value.is_empty());
        assert_eq!(loaded.message.content, "No snippets found");
    }
}
