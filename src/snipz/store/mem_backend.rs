use super::backend::StorageBackend;
use crate::error::{Result, SnipzError};
use std::cell::RefCell;
use std::io;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since snipz is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    snippets: RefCell<Option<String>>,
    categories: RefCell<Option<String>>,
    simulate_read_error: RefCell<bool>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose snippet document already holds `content`.
    pub fn with_snippets(content: impl Into<String>) -> Self {
        let backend = Self::default();
        *backend.snippets.borrow_mut() = Some(content.into());
        backend
    }

    /// Raw snippet document as last written.
    pub fn snippets_raw(&self) -> Option<String> {
        self.snippets.borrow().clone()
    }

    pub fn categories_raw(&self) -> Option<String> {
        self.categories.borrow().clone()
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    fn check_read(&self) -> Result<()> {
        if *self.simulate_read_error.borrow() {
            return Err(SnipzError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "simulated read error",
            )));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(SnipzError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "simulated write error",
            )));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn read_snippets(&self) -> Result<Option<String>> {
        self.check_read()?;
        Ok(self.snippets.borrow().clone())
    }

    fn write_snippets(&self, content: &str) -> Result<()> {
        self.check_write()?;
        *self.snippets.borrow_mut() = Some(content.to_string());
        Ok(())
    }

    fn read_categories(&self) -> Result<Option<String>> {
        self.check_read()?;
        Ok(self.categories.borrow().clone())
    }

    fn write_categories(&self, content: &str) -> Result<()> {
        self.check_write()?;
        *self.categories.borrow_mut() = Some(content.to_string());
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://snippets.json")
    }
}
