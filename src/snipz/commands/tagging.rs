use crate::commands::load::snapshot;
use crate::commands::{snippets_word, CmdResult};
use crate::error::{Result, SnipzError};
use crate::index::{resolve_selectors, Selector};
use crate::model::Snippet;
use crate::store::{SnippetStore, StorageBackend};
use std::collections::HashSet;
use tracing::info;

pub fn add_tag<B: StorageBackend>(
    store: &mut SnippetStore<B>,
    selectors: &[Selector],
    tag: &str,
) -> Result<CmdResult<usize>> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(SnipzError::Validation("Tag cannot be empty".to_string()));
    }

    let count = mutate_selected(store, selectors, |s| s.add_tag(tag))?;
    Ok(CmdResult::success(
        count,
        format!("Tagged {} {} with '{}'", count, snippets_word(count), tag),
    ))
}

pub fn remove_tag<B: StorageBackend>(
    store: &mut SnippetStore<B>,
    selectors: &[Selector],
    tag: &str,
) -> Result<CmdResult<usize>> {
    let tag = tag.trim();
    let count = mutate_selected(store, selectors, |s| s.remove_tag(tag))?;
    Ok(CmdResult::success(
        count,
        format!("Removed '{}' from {} {}", tag, count, snippets_word(count)),
    ))
}

/// Flips the markdown flag for the selection as a group. Returns the new state.
pub fn toggle_markdown<B: StorageBackend>(
    store: &mut SnippetStore<B>,
    selectors: &[Selector],
) -> Result<CmdResult<bool>> {
    let state = toggle(store, selectors, Flag::Markdown)?;
    let word = if state { "Enabled" } else { "Disabled" };
    Ok(CmdResult::success(state, format!("{} markdown", word)))
}

/// Flips the template flag for the selection as a group. Returns the new state.
pub fn toggle_template<B: StorageBackend>(
    store: &mut SnippetStore<B>,
    selectors: &[Selector],
) -> Result<CmdResult<bool>> {
    let state = toggle(store, selectors, Flag::Template)?;
    let word = if state { "Marked" } else { "Unmarked" };
    Ok(CmdResult::success(state, format!("{} as template", word)))
}

/// Applies `f` to every selected snippet, saving if anything changed.
/// Returns how many snippets `f` reported as changed.
fn mutate_selected<B, F>(store: &mut SnippetStore<B>, selectors: &[Selector], mut f: F) -> Result<usize>
where
    B: StorageBackend,
    F: FnMut(&mut Snippet) -> bool,
{
    let mut snippets = snapshot(store)?;
    let ids: HashSet<_> = resolve_selectors(&snippets, selectors).into_iter().collect();
    if ids.is_empty() {
        return Err(SnipzError::Validation("No snippets were updated".to_string()));
    }

    let mut changed = 0;
    for snippet in snippets.iter_mut().filter(|s| ids.contains(&s.id)) {
        if f(snippet) {
            changed += 1;
        }
    }
    if changed > 0 {
        store.save(&snippets)?;
        info!(changed, "retagged snippets");
    }
    Ok(changed)
}

#[derive(Debug, Clone, Copy)]
enum Flag {
    Markdown,
    Template,
}

impl Flag {
    fn get(self, snippet: &Snippet) -> bool {
        match self {
            Flag::Markdown => snippet.is_markdown,
            Flag::Template => snippet.is_template,
        }
    }

    fn set(self, snippet: &mut Snippet, value: bool) {
        match self {
            Flag::Markdown => snippet.is_markdown = value,
            Flag::Template => snippet.is_template = value,
        }
    }
}

fn toggle<B: StorageBackend>(
    store: &mut SnippetStore<B>,
    selectors: &[Selector],
    flag: Flag,
) -> Result<bool> {
    let mut snippets = snapshot(store)?;
    let ids: HashSet<_> = resolve_selectors(&snippets, selectors).into_iter().collect();
    if ids.is_empty() {
        return Err(SnipzError::Validation("No snippets were updated".to_string()));
    }

    let set = snippets
        .iter()
        .filter(|s| ids.contains(&s.id) && flag.get(s))
        .count();
    // Majority unset (or a tie) turns the flag on for everyone.
    let state = set * 2 <= ids.len();

    for snippet in snippets.iter_mut().filter(|s| ids.contains(&s.id)) {
        flag.set(snippet, state);
    }
    store.save(&snippets)?;
    info!(count = ids.len(), state, ?flag, "toggled flag");
    Ok(state)
}
