//! Category registry.
//!
//! A category is a label name plus a display color. Snippets only store the name (in
//! `label`); the registry maps names to colors and is persisted on its own, next to the
//! snippet file. The registry is a plain value passed to whoever needs it, so the
//! rename/delete cascades below can be exercised without any storage at all.
//!
//! The sentinel category [`DEFAULT_LABEL`] always exists. It cannot be renamed or
//! deleted, since it is where snippets of a deleted category end up.

use crate::error::{Result, SnipzError};
use crate::model::{Snippet, DEFAULT_LABEL};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COLOR: &str = "#666666";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub color: String,
}

impl Category {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Ordered name → color registry. Serialized as a plain array of categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Category>", into = "Vec<Category>")]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::from(vec![
            Category::new("WordPress Login", "#21759b"),
            Category::new("Instagram Account", "#E1306C"),
            Category::new("Facebook Page", "#4267B2"),
            Category::new("Email Configuration", "#DB4437"),
            Category::new("Password", "#8A2BE2"),
        ])
    }
}

impl From<Vec<Category>> for CategoryRegistry {
    fn from(categories: Vec<Category>) -> Self {
        let mut registry = Self {
            categories: Vec::with_capacity(categories.len() + 1),
        };
        for category in categories {
            if registry.get(&category.name).is_none() {
                registry.categories.push(category);
            }
        }
        if registry.get(DEFAULT_LABEL).is_none() {
            registry
                .categories
                .push(Category::new(DEFAULT_LABEL, DEFAULT_COLOR));
        }
        registry
    }
}

impl From<CategoryRegistry> for Vec<Category> {
    fn from(registry: CategoryRegistry) -> Self {
        registry.categories
    }
}

impl CategoryRegistry {
    /// A registry holding only the sentinel category.
    pub fn empty() -> Self {
        Self::from(Vec::new())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Color for a label; unknown labels (including `""`) get the default color.
    pub fn color_for(&self, label: &str) -> &str {
        self.get(label)
            .or_else(|| self.get(DEFAULT_LABEL))
            .map(|c| c.color.as_str())
            .unwrap_or(DEFAULT_COLOR)
    }

    /// Adds a category or updates its color. Returns true if the category is new.
    pub fn set(&mut self, name: &str, color: &str) -> Result<bool> {
        let name = validate_name(name)?;
        let color = validate_color(color)?;
        match self.categories.iter_mut().find(|c| c.name == name) {
            Some(existing) => {
                existing.color = color;
                Ok(false)
            }
            None => {
                self.categories.push(Category::new(name, color));
                Ok(true)
            }
        }
    }

    /// Renames a category and relabels every snippet that used the old name.
    ///
    /// Returns the number of snippets relabeled.
    pub fn rename(&mut self, old: &str, new: &str, snippets: &mut [Snippet]) -> Result<usize> {
        if old == DEFAULT_LABEL {
            return Err(SnipzError::Validation(format!(
                "The '{}' category cannot be renamed",
                DEFAULT_LABEL
            )));
        }
        let new = validate_name(new)?;
        if old == new {
            return Ok(0);
        }
        if self.get(&new).is_some() {
            return Err(SnipzError::Validation(format!(
                "Category '{}' already exists",
                new
            )));
        }
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.name == old)
            .ok_or_else(|| SnipzError::Validation(format!("Category '{}' not found", old)))?;
        category.name = new.clone();

        Ok(relabel(snippets, old, &new))
    }

    /// Deletes a category; its snippets fall back to the default label.
    ///
    /// Returns the number of snippets relabeled.
    pub fn delete(&mut self, name: &str, snippets: &mut [Snippet]) -> Result<usize> {
        if name == DEFAULT_LABEL {
            return Err(SnipzError::Validation(format!(
                "The '{}' category cannot be deleted",
                DEFAULT_LABEL
            )));
        }
        let before = self.categories.len();
        self.categories.retain(|c| c.name != name);
        if self.categories.len() == before {
            return Err(SnipzError::Validation(format!(
                "Category '{}' not found",
                name
            )));
        }

        Ok(relabel(snippets, name, DEFAULT_LABEL))
    }
}

fn relabel(snippets: &mut [Snippet], from: &str, to: &str) -> usize {
    let mut count = 0;
    for snippet in snippets.iter_mut().filter(|s| s.label == from) {
        snippet.label = to.to_string();
        count += 1;
    }
    count
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SnipzError::Validation(
            "Category name cannot be empty".to_string(),
        ));
    }
    Ok(name.to_string())
}

/// Accepts `#rrggbb` (any case). Returns the color unchanged.
fn validate_color(color: &str) -> Result<String> {
    let color = color.trim();
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(SnipzError::Validation(format!(
            "Invalid color '{}': expected #rrggbb",
            color
        )));
    }
    Ok(color.to_string())
}
