//! # Configuration
//!
//! Stored as `config.json` in the data directory. A missing file means defaults; keys
//! missing from the file fall back to their defaults individually.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `snippets_file` | `snippets.json` | File name of the snippet document |
//! | `password_length` | `16` | Length used by `genpass` when none is given |
//! | `mask_sensitive` | `true` | Mask credential values when printing snippets |
//! | `export_format` | unset | Format used by `export` when the extension is unknown |
//!
//! `snipz config` shows every key, `snipz config <key>` one of them, and
//! `snipz config <key> <value>` sets one.

use crate::commands::export::ExportFormat;
use crate::error::{Result, SnipzError};
use crate::password::{DEFAULT_PASSWORD_LENGTH, PASSWORD_LENGTHS};
use crate::store::fs_backend::{write_atomic, DEFAULT_SNIPPETS_FILE};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE: &str = "config.json";

pub const KEYS: [&str; 4] = [
    "snippets_file",
    "password_length",
    "mask_sensitive",
    "export_format",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnipzConfig {
    pub snippets_file: String,
    pub password_length: usize,
    pub mask_sensitive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_format: Option<String>,
}

impl Default for SnipzConfig {
    fn default() -> Self {
        Self {
            snippets_file: DEFAULT_SNIPPETS_FILE.to_string(),
            password_length: DEFAULT_PASSWORD_LENGTH,
            mask_sensitive: true,
            export_format: None,
        }
    }
}

impl SnipzConfig {
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        write_atomic(&dir.join(CONFIG_FILE), &content)
    }

    pub fn export_format(&self) -> Result<Option<ExportFormat>> {
        self.export_format.as_deref().map(str::parse).transpose()
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "snippets_file" => self.snippets_file.clone(),
            "password_length" => self.password_length.to_string(),
            "mask_sensitive" => self.mask_sensitive.to_string(),
            "export_format" => self.export_format.clone().unwrap_or_default(),
            other => return Err(unknown_key(other)),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "snippets_file" => {
                let valid = !value.is_empty() && !value.contains(['/', '\\']);
                if !valid {
                    return Err(SnipzError::Validation(format!(
                        "snippets_file must be a plain file name, got '{}'",
                        value
                    )));
                }
                self.snippets_file = value.to_string();
            }
            "password_length" => {
                let length = value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| PASSWORD_LENGTHS.contains(n))
                    .ok_or_else(|| {
                        SnipzError::Validation(format!(
                            "password_length must be a number between {} and {}",
                            PASSWORD_LENGTHS.start(),
                            PASSWORD_LENGTHS.end()
                        ))
                    })?;
                self.password_length = length;
            }
            "mask_sensitive" => {
                self.mask_sensitive = value.parse::<bool>().map_err(|_| {
                    SnipzError::Validation("mask_sensitive must be true or false".to_string())
                })?;
            }
            "export_format" => {
                if value.is_empty() {
                    self.export_format = None;
                } else {
                    value.parse::<ExportFormat>()?;
                    self.export_format = Some(value.to_lowercase());
                }
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> SnipzError {
    SnipzError::Validation(format!(
        "Unknown config key '{}' (expected one of: {})",
        key,
        KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_when_missing() {
        let dir = tempdir().unwrap();
        assert_eq!(SnipzConfig::load(dir.path()).unwrap(), SnipzConfig::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{"mask_sensitive": false}"#).unwrap();
        let config = SnipzConfig::load(dir.path()).unwrap();
        assert!(!config.mask_sensitive);
        assert_eq!(config.password_length, 16);
        assert_eq!(config.snippets_file, "snippets.json");
    }

    #[test]
    fn save_and_reload() {
        let dir = tempdir().unwrap();
        let mut config = SnipzConfig::default();
        config.set("password_length", "24").unwrap();
        config.set("export_format", "HTML").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = SnipzConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.password_length, 24);
        assert_eq!(loaded.export_format().unwrap(), Some(ExportFormat::Html));
    }

    #[test]
    fn set_validates() {
        let mut config = SnipzConfig::default();
        assert!(config.set("password_length", "4").is_err());
        assert!(config.set("mask_sensitive", "maybe").is_err());
        assert!(config.set("export_format", "pdf").is_err());
        assert!(config.set("snippets_file", "../x.json").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, SnipzConfig::default());
    }

    #[test]
    fn get_every_key() {
        let config = SnipzConfig::default();
        let values: Vec<_> = KEYS.iter().map(|k| config.get(k).unwrap()).collect();
        assert_eq!(values, vec!["snippets.json", "16", "true", ""]);
    }
}
