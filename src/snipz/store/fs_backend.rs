use super::backend::StorageBackend;
use crate::error::{Result, SnipzError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_SNIPPETS_FILE: &str = "snippets.json";
pub const CATEGORIES_FILE: &str = "categories.json";

/// Filesystem backend: two JSON documents side by side in one data directory.
///
/// ```text
/// <root>/
/// ├── snippets.json     # the snippet array
/// ├── categories.json   # category registry
/// └── config.json       # see crate::config
/// ```
pub struct FsBackend {
    root: PathBuf,
    snippets_file: String,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            snippets_file: DEFAULT_SNIPPETS_FILE.to_string(),
        }
    }

    pub fn with_snippets_file(mut self, name: &str) -> Self {
        self.snippets_file = name.to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn snippets_path(&self) -> PathBuf {
        self.root.join(&self.snippets_file)
    }

    pub fn categories_path(&self) -> PathBuf {
        self.root.join(CATEGORIES_FILE)
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(SnipzError::Io)?;
    Ok(Some(content))
}

/// Writes `content` to `path` through a temporary file in the same directory.
///
/// The rename is atomic on the same filesystem, so `path` holds either the old or the
/// new document, never a truncated one.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(SnipzError::Io)?;
    }

    let stem = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("snipz");
    let tmp_path = dir.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()));

    fs::write(&tmp_path, content).map_err(SnipzError::Io)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(SnipzError::Io(e));
    }
    Ok(())
}

impl StorageBackend for FsBackend {
    fn read_snippets(&self) -> Result<Option<String>> {
        read_optional(&self.snippets_path())
    }

    fn write_snippets(&self, content: &str) -> Result<()> {
        write_atomic(&self.snippets_path(), content)
    }

    fn read_categories(&self) -> Result<Option<String>> {
        read_optional(&self.categories_path())
    }

    fn write_categories(&self, content: &str) -> Result<()> {
        write_atomic(&self.categories_path(), content)
    }

    fn location(&self) -> PathBuf {
        self.snippets_path()
    }
}
