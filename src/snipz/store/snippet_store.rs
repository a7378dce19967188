use super::backend::StorageBackend;
use crate::category::CategoryRegistry;
use crate::error::{Result, SnipzError};
use crate::model::{default_snippets, Snippet};
use crate::schema::{normalize_records, NormalizeReport};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Where a loaded snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// No snippet file existed; the first-run content was synthesized.
    Seeded,
    /// Parsed from the existing snippet file.
    File,
}

#[derive(Debug, Clone)]
pub struct LoadedSnippets {
    pub snippets: Vec<Snippet>,
    pub origin: LoadOrigin,
    pub report: NormalizeReport,
}

pub struct SnippetStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> SnippetStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load a fresh snapshot of every snippet.
    ///
    /// First run (no file) yields the seed snippets, which are written out right away so
    /// their ids stay the same on the next load. Legacy records that had to be repaired
    /// are written back in canonical form for the same reason. Both write-backs are best
    /// effort: a read-only store still loads.
    pub fn load(&self) -> Result<LoadedSnippets> {
        let raw = match self.backend.read_snippets()? {
            Some(raw) => raw,
            None => {
                let seeds = default_snippets();
                debug!(location = %self.backend.location().display(), "no snippet file, seeding defaults");
                if let Err(e) = self.write(&seeds) {
                    warn!(error = %e, "could not persist default snippets");
                }
                return Ok(LoadedSnippets {
                    snippets: seeds,
                    origin: LoadOrigin::Seeded,
                    report: NormalizeReport::default(),
                });
            }
        };

        let value: Value = serde_json::from_str(&raw).map_err(SnipzError::Serialization)?;
        let records = match value {
            Value::Array(records) => records,
            other => {
                return Err(SnipzError::Format(format!(
                    "expected a JSON array at the top level, found {}",
                    json_kind(&other)
                )))
            }
        };

        let (snippets, report) = normalize_records(records);
        debug!(
            count = snippets.len(),
            migrated = report.migrated,
            skipped = report.skipped,
            "loaded snippets"
        );

        if report.migrated > 0 {
            match self.write(&snippets) {
                Ok(()) => info!(migrated = report.migrated, "migrated legacy snippet records"),
                Err(e) => warn!(error = %e, "could not write back migrated snippets"),
            }
        }

        Ok(LoadedSnippets {
            snippets,
            origin: LoadOrigin::File,
            report,
        })
    }

    /// Replace the whole snippet file with `snippets`. Returns the number saved.
    pub fn save(&mut self, snippets: &[Snippet]) -> Result<usize> {
        let mut seen = HashSet::with_capacity(snippets.len());
        for snippet in snippets {
            if !seen.insert(snippet.id) {
                return Err(SnipzError::Validation(format!(
                    "Duplicate snippet id {}; use Snippet::duplicate to copy a snippet",
                    snippet.id
                )));
            }
        }

        self.write(snippets)?;
        debug!(count = snippets.len(), "saved snippets");
        Ok(snippets.len())
    }

    fn write(&self, snippets: &[Snippet]) -> Result<()> {
        let content = serde_json::to_string_pretty(snippets).map_err(SnipzError::Serialization)?;
        self.backend.write_snippets(&content)
    }

    /// Load the category registry, falling back to the built-in defaults.
    pub fn load_categories(&self) -> Result<CategoryRegistry> {
        match self.backend.read_categories()? {
            Some(raw) => {
                let registry: CategoryRegistry =
                    serde_json::from_str(&raw).map_err(SnipzError::Serialization)?;
                Ok(registry)
            }
            None => Ok(CategoryRegistry::default()),
        }
    }

    pub fn save_categories(&mut self, registry: &CategoryRegistry) -> Result<()> {
        let content = serde_json::to_string_pretty(registry).map_err(SnipzError::Serialization)?;
        self.backend.write_categories(&content)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
