use crate::commands::load::snapshot;
use crate::commands::{snippets_word, CmdResult};
use crate::error::{Result, SnipzError};
use crate::index::{resolve_selectors, Selector};
use crate::model::Snippet;
use crate::store::{SnippetStore, StorageBackend};
use tracing::info;

/// Appends `new` to the stored collection.
///
/// This is how imported snippets get committed: the import itself never writes.
pub fn run<B: StorageBackend>(
    store: &mut SnippetStore<B>,
    new: Vec<Snippet>,
) -> Result<CmdResult<usize>> {
    if new.is_empty() {
        return Ok(CmdResult::info(0, "No snippets to add"));
    }

    let mut snippets = snapshot(store)?;
    let count = new.len();
    snippets.extend(new);
    store.save(&snippets)?;

    info!(count, total = snippets.len(), "added snippets");
    Ok(CmdResult::success(
        count,
        format!("Added {} {}", count, snippets_word(count)),
    ))
}

/// Creates a new snippet from a template: same text, label and markdown flag, a fresh
/// id, no tags, and not itself a template.
pub fn from_template<B: StorageBackend>(
    store: &mut SnippetStore<B>,
    selector: Selector,
) -> Result<CmdResult<Snippet>> {
    let mut snippets = snapshot(store)?;
    let id = resolve_selectors(&snippets, &[selector])
        .into_iter()
        .next()
        .ok_or_else(|| SnipzError::Validation(format!("No snippet at {}", selector)))?;

    let template = snippets
        .iter()
        .find(|s| s.id == id)
        .ok_or(SnipzError::SnippetNotFound(id))?;
    if !template.is_template {
        return Err(SnipzError::Validation(format!(
            "Snippet {} is not a template",
            selector
        )));
    }

    let mut created = template.duplicate().template(false);
    created.tags.clear();
    created.extra.clear();
    snippets.push(created.clone());
    store.save(&snippets)?;

    Ok(CmdResult::success(created, "Created snippet from template"))
}
