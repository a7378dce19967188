//! # API Facade
//!
//! [`SnipzApi`] is the single entry point for every snippet operation, whatever the UI.
//! It is a thin layer over [`crate::commands`]:
//!
//! - it **dispatches** to the command function,
//! - it supplies ambient inputs the commands take explicitly (the export timestamp),
//! - it is the **error boundary**: every `Err` from the layers below becomes a failed
//!   [`CmdResult`] carrying a user-facing message and an empty value.
//!
//! Nothing here prints or formats for a terminal; that is the CLI's job.
//!
//! ## Selectors
//!
//! Methods that act on existing snippets take [`Selector`]s, resolved inside each call
//! against a fresh load. UIs showing 1-based numbers parse user input with
//! [`crate::index::parse_selectors`] first.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `SnipzApi<FsBackend>`
//! - Testing: `SnipzApi<MemBackend>`

use crate::category::CategoryRegistry;
use crate::commands::{self, export::ExportFormat, search::SearchFilter, CmdResult};
use crate::error::{Result, SnipzError};
use crate::index::{IndexedSnippet, Selector};
use crate::model::{Snippet, SnippetPatch};
use crate::store::{SnippetStore, StorageBackend};
use std::path::Path;
use tracing::debug;

pub struct SnipzApi<B: StorageBackend> {
    store: SnippetStore<B>,
}

impl<B: StorageBackend> SnipzApi<B> {
    pub fn new(store: SnippetStore<B>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SnippetStore<B> {
        &self.store
    }

    /// Loads the collection. On failure the value is empty and the message says why.
    pub fn load(&self) -> CmdResult<Vec<Snippet>> {
        commands::load::run(&self.store).unwrap_or_else(|err| {
            debug!(%err, "load failed");
            CmdResult::failure(Vec::new(), commands::load::describe_error(&err))
        })
    }

    pub fn save(&mut self, snippets: &[Snippet]) -> CmdResult<usize> {
        settle(
            commands::save::run(&mut self.store, snippets),
            "Error saving snippets",
        )
    }

    pub fn add_snippets(&mut self, snippets: Vec<Snippet>) -> CmdResult<usize> {
        settle(
            commands::create::run(&mut self.store, snippets),
            "Error adding snippets",
        )
    }

    pub fn instantiate_template(&mut self, selector: Selector) -> CmdResult<Option<Snippet>> {
        let result = commands::create::from_template(&mut self.store, selector)
            .map(|r| CmdResult::new(Some(r.value), r.message));
        settle(result, "Error creating snippet")
    }

    /// Reads snippets from a file without storing them.
    pub fn import(&self, path: &Path) -> CmdResult<Vec<Snippet>> {
        settle(commands::import::run(path), "Import error")
    }

    /// Writes `snippets` to `path`, stamped with the current local time.
    pub fn export(
        &self,
        snippets: &[Snippet],
        path: &Path,
        format: Option<ExportFormat>,
    ) -> CmdResult<usize> {
        let now = chrono::Local::now().naive_local();
        settle(
            commands::export::run(snippets, path, format, now),
            "Export error",
        )
    }

    pub fn bulk_update(&mut self, selectors: &[Selector], patch: &SnippetPatch) -> CmdResult<usize> {
        settle(
            commands::bulk::update(&mut self.store, selectors, patch),
            "Error updating snippets",
        )
    }

    pub fn bulk_delete(&mut self, selectors: &[Selector]) -> CmdResult<usize> {
        settle(
            commands::bulk::delete(&mut self.store, selectors),
            "Error deleting snippets",
        )
    }

    pub fn all_tags(&self) -> CmdResult<Vec<String>> {
        settle(commands::tags::all_tags(&self.store), "Error reading tags")
    }

    pub fn template_snippets(&self) -> CmdResult<Vec<Snippet>> {
        settle(commands::tags::templates(&self.store), "Error reading templates")
    }

    pub fn add_tag(&mut self, selectors: &[Selector], tag: &str) -> CmdResult<usize> {
        settle(
            commands::tagging::add_tag(&mut self.store, selectors, tag),
            "Error tagging snippets",
        )
    }

    pub fn remove_tag(&mut self, selectors: &[Selector], tag: &str) -> CmdResult<usize> {
        settle(
            commands::tagging::remove_tag(&mut self.store, selectors, tag),
            "Error untagging snippets",
        )
    }

    pub fn toggle_markdown(&mut self, selectors: &[Selector]) -> CmdResult<bool> {
        settle(
            commands::tagging::toggle_markdown(&mut self.store, selectors),
            "Error updating snippets",
        )
    }

    pub fn toggle_template(&mut self, selectors: &[Selector]) -> CmdResult<bool> {
        settle(
            commands::tagging::toggle_template(&mut self.store, selectors),
            "Error updating snippets",
        )
    }

    pub fn search(&self, filter: &SearchFilter) -> CmdResult<Vec<IndexedSnippet>> {
        settle(
            commands::search::run(&self.store, filter),
            "Error searching snippets",
        )
    }

    pub fn categories(&self) -> CmdResult<CategoryRegistry> {
        settle(
            commands::categories::list(&self.store),
            "Error reading categories",
        )
    }

    pub fn set_category(&mut self, name: &str, color: &str) -> CmdResult<bool> {
        settle(
            commands::categories::set(&mut self.store, name, color),
            "Error saving category",
        )
    }

    pub fn rename_category(&mut self, old: &str, new: &str) -> CmdResult<usize> {
        settle(
            commands::categories::rename(&mut self.store, old, new),
            "Error renaming category",
        )
    }

    pub fn delete_category(&mut self, name: &str) -> CmdResult<usize> {
        settle(
            commands::categories::delete(&mut self.store, name),
            "Error deleting category",
        )
    }
}

/// Turns a command error into a failed result. Validation messages are already written
/// for users and pass through as-is; anything else is prefixed with `context`.
fn settle<T: Default>(result: Result<CmdResult<T>>, context: &str) -> CmdResult<T> {
    result.unwrap_or_else(|err| {
        debug!(%err, context, "command failed");
        let message = match err {
            SnipzError::Validation(message) => message,
            other => format!("{}: {}", context, other),
        };
        CmdResult::failure(T::default(), message)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::{InMemoryStore, MemBackend};

    fn api_with(snippets: &[Snippet]) -> SnipzApi<MemBackend> {
        let mut store = InMemoryStore::new();
        store.save(snippets).unwrap();
        SnipzApi::new(store)
    }

    #[test]
    fn load_failures_become_messages() {
        let api = SnipzApi::new(SnippetStore::with_backend(MemBackend::with_snippets(
            r#"{"text": "x"}"#,
        )));
        let result = api.load();
        assert!(result.value.is_empty());
        assert_eq!(result.message.level, MessageLevel::Error);
        assert_eq!(result.message.content, "Invalid snippet format");

        let api = SnipzApi::new(SnippetStore::with_backend(MemBackend::with_snippets("[{")));
        assert_eq!(api.load().message.content, "Error reading saved snippets file");

        let backend = MemBackend::with_snippets("[]");
        backend.set_simulate_read_error(true);
        let api = SnipzApi::new(SnippetStore::with_backend(backend));
        assert!(api.load().message.content.starts_with("Error loading snippets:"));
    }

    #[test]
    fn bulk_failures_keep_their_message() {
        let mut api = api_with(&[Snippet::new("a"), Snippet::new("b"), Snippet::new("c")]);
        let result = api.bulk_update(&[Selector::Index(5)], &SnippetPatch::new().text("x"));
        assert!(!result.is_success());
        assert_eq!(result.value, 0);
        assert_eq!(result.message.content, "No snippets were updated");
    }

    #[test]
    fn io_failures_get_context() {
        let mut api = api_with(&[Snippet::new("a")]);
        api.store().backend().set_simulate_write_error(true);
        let result = api.bulk_delete(&[Selector::Index(0)]);
        assert!(!result.is_success());
        assert!(result.message.content.starts_with("Error deleting snippets:"));
    }

    #[test]
    fn import_error_is_reported() {
        let api = api_with(&[]);
        let result = api.import(Path::new("/definitely/not/here.json"));
        assert!(result.value.is_empty());
        assert!(result.message.content.starts_with("Import error:"));
    }

    #[test]
    fn template_instantiation() {
        let mut api = api_with(&[Snippet::new("body").template(true)]);
        let result = api.instantiate_template(Selector::Index(0));
        assert!(result.value.is_some());
        assert_eq!(api.load().value.len(), 2);

        let missing = api.instantiate_template(Selector::Index(9));
        assert!(missing.value.is_none());
        assert!(!missing.is_success());
    }

    #[test]
    fn end_to_end_mutations() {
        let mut api = api_with(&[]);
        assert_eq!(api.add_snippets(vec![Snippet::new("one"), Snippet::new("two")]).value, 2);
        assert_eq!(api.add_tag(&[Selector::Index(1)], "x").value, 1);
        assert!(api.toggle_template(&[Selector::Index(0)]).value);
        assert_eq!(api.all_tags().value, vec!["x"]);
        assert_eq!(api.template_snippets().value.len(), 1);

        let hits = api.search(&SearchFilter::default().tag("x")).value;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 1);

        assert_eq!(api.bulk_delete(&[Selector::Index(0)]).value, 1);
        assert_eq!(api.load().value[0].text, "two");
    }
}
