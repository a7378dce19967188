//! # Storage Layer
//!
//! Snippets live in a single JSON document holding an array of objects. The layer is
//! split in two, the same way for every backend:
//!
//! 1. [`backend::StorageBackend`] moves raw documents (strings) in and out: the "how".
//!    - [`fs_backend::FsBackend`]: files in a data directory, atomic tmp + rename writes.
//!    - [`mem_backend::MemBackend`]: in-memory, for tests; can simulate I/O failures.
//! 2. [`snippet_store::SnippetStore`] owns the "what": JSON parsing, the top-level array
//!    check, schema normalization and migration, first-run seeding, id uniqueness.
//!
//! ## Snapshots
//!
//! Every operation that needs the current data calls `load()` and works on the
//! returned snapshot; nothing is cached between calls. `save()` rewrites the whole
//! array. Mutations go through `&mut self`, so a single owner of the store is also its
//! single writer.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── snippets.json     # [ {id, text, label, tags, is_markdown, is_template, ...}, ... ]
//! ├── categories.json   # [ {name, color}, ... ]
//! └── config.json
//! ```

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod snippet_store;

pub use backend::StorageBackend;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
pub use snippet_store::{LoadOrigin, LoadedSnippets, SnippetStore};

/// Store over the filesystem backend, used by the CLI.
pub type FileStore = SnippetStore<FsBackend>;

/// Store over the in-memory backend, used by tests.
pub type InMemoryStore = SnippetStore<MemBackend>;

impl FileStore {
    pub fn open(root: std::path::PathBuf) -> Self {
        SnippetStore::with_backend(FsBackend::new(root))
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        SnippetStore::with_backend(MemBackend::new())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
