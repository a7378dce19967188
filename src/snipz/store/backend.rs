use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
///
/// A backend moves whole documents around as strings: it knows nothing about JSON or
/// snippets. Parsing, format validation and normalization live in
/// [`super::snippet_store::SnippetStore`], so every backend reports malformed data the
/// same way.
pub trait StorageBackend {
    // --- Snippet document ---

    /// Read the snippet document.
    /// Returns Ok(None) if it does not exist yet (first run).
    fn read_snippets(&self) -> Result<Option<String>>;

    /// Replace the snippet document.
    /// MUST be atomic (e.g. write to tmp then rename) so readers never see a partial file.
    fn write_snippets(&self, content: &str) -> Result<()>;

    // --- Category registry document ---

    /// Read the category registry. Returns Ok(None) if it does not exist yet.
    fn read_categories(&self) -> Result<Option<String>>;

    /// Replace the category registry. Same atomicity requirement as snippets.
    fn write_categories(&self, content: &str) -> Result<()>;

    /// Where the snippet document lives, for messages and logs.
    /// For FsBackend this is the real path, for MemBackend a virtual one.
    fn location(&self) -> PathBuf;
}
