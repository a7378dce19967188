//! # Selectors
//!
//! Snippets are addressed in two ways:
//!
//! - [`Selector::Index`]: a 0-based position in a snapshot. Convenient for UIs that show
//!   a numbered list, but only meaningful against the snapshot the numbers came from.
//! - [`Selector::Id`]: the snippet's stable UUID. Survives reordering and deletions.
//!
//! Bulk operations resolve selectors against the snapshot they load themselves
//! ([`resolve_selectors`]), turning every selector into an id before mutating anything.
//! Removing or editing by id means the order selectors were given in can never shift
//! the target of a later one.
//!
//! ## User input
//!
//! [`parse_selectors`] reads what people type on a command line, where numbering is
//! 1-based as displayed:
//!
//! - `3` → `Index(2)`
//! - `2-4` → `Index(1), Index(2), Index(3)`
//! - `1b4e28ba-2fa1-11d2-883f-0016d3cca427` → `Id(..)`

use crate::error::{Result, SnipzError};
use crate::model::Snippet;
use std::collections::HashSet;
use uuid::Uuid;

/// Largest number of snippets a single `N-M` range may name.
pub const MAX_RANGE_LEN: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    Index(usize),
    Id(Uuid),
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Index(i) => write!(f, "{}", i + 1),
            Selector::Id(id) => write!(f, "{}", id),
        }
    }
}

/// A snippet together with its 0-based position in the snapshot it was taken from.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedSnippet {
    pub index: usize,
    pub snippet: Snippet,
}

impl IndexedSnippet {
    /// 1-based number as shown to users.
    pub fn display_number(&self) -> usize {
        self.index + 1
    }
}

pub fn indexed(snippets: Vec<Snippet>) -> Vec<IndexedSnippet> {
    snippets
        .into_iter()
        .enumerate()
        .map(|(index, snippet)| IndexedSnippet { index, snippet })
        .collect()
}

/// Resolves selectors to ids against `snapshot`.
///
/// Out-of-range indexes and unknown ids are skipped; duplicates collapse while the first
/// occurrence keeps its place.
pub fn resolve_selectors(snapshot: &[Snippet], selectors: &[Selector]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for selector in selectors {
        let id = match selector {
            Selector::Index(i) => snapshot.get(*i).map(|s| s.id),
            Selector::Id(id) => snapshot.iter().find(|s| s.id == *id).map(|s| s.id),
        };
        if let Some(id) = id {
            if seen.insert(id) {
                ids.push(id);
            }
        }
    }

    ids
}

/// Parses one user token: a UUID, a 1-based number, or a 1-based range `N-M`.
pub fn parse_selector_or_range(s: &str) -> Result<Vec<Selector>> {
    let s = s.trim();

    // UUIDs contain dashes too, so they are tried before ranges.
    if let Ok(id) = Uuid::parse_str(s) {
        return Ok(vec![Selector::Id(id)]);
    }

    if let Some((start, end)) = s.split_once('-') {
        let start = parse_number(start)?;
        let end = parse_number(end)?;
        if start > end {
            return Err(SnipzError::Api(format!(
                "Invalid range: start ({}) must be <= end ({})",
                start, end
            )));
        }
        if end - start >= MAX_RANGE_LEN {
            return Err(SnipzError::Api(format!(
                "Range {}-{} is too large (at most {} snippets)",
                start, end, MAX_RANGE_LEN
            )));
        }
        return Ok((start..=end).map(|n| Selector::Index(n - 1)).collect());
    }

    Ok(vec![Selector::Index(parse_number(s)? - 1)])
}

/// Parses a list of user tokens, flattening ranges and dropping repeats.
pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<Selector>> {
    let mut seen = HashSet::new();
    let mut selectors = Vec::new();
    for input in inputs {
        for selector in parse_selector_or_range(input.as_ref())? {
            if seen.insert(selector) {
                selectors.push(selector);
            }
        }
    }
    Ok(selectors)
}

fn parse_number(s: &str) -> Result<usize> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err(SnipzError::Api(
            "Snippet numbers start at 1".to_string(),
        )),
        Ok(n) => Ok(n),
        Err(_) => Err(SnipzError::Api(format!("Invalid snippet selector: {}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Vec<Snippet> {
        vec![Snippet::new("a"), Snippet::new("b"), Snippet::new("c")]
    }

    #[test]
    fn resolves_indexes_and_ids() {
        let snap = snapshot();
        let ids = resolve_selectors(&snap, &[Selector::Index(2), Selector::Id(snap[0].id)]);
        assert_eq!(ids, vec![snap[2].id, snap[0].id]);
    }

    #[test]
    fn skips_out_of_range_and_unknown() {
        let snap = snapshot();
        let ids = resolve_selectors(
            &snap,
            &[Selector::Index(5), Selector::Id(Uuid::new_v4()), Selector::Index(1)],
        );
        assert_eq!(ids, vec![snap[1].id]);
    }

    #[test]
    fn collapses_duplicates_across_forms() {
        let snap = snapshot();
        let ids = resolve_selectors(
            &snap,
            &[Selector::Index(0), Selector::Id(snap[0].id), Selector::Index(0)],
        );
        assert_eq!(ids, vec![snap[0].id]);
    }

    #[test]
    fn parses_single_numbers_as_zero_based() {
        assert_eq!(parse_selector_or_range("1").unwrap(), vec![Selector::Index(0)]);
        assert_eq!(parse_selector_or_range(" 42 ").unwrap(), vec![Selector::Index(41)]);
    }

    #[test]
    fn parses_ranges() {
        assert_eq!(
            parse_selector_or_range("2-4").unwrap(),
            vec![Selector::Index(1), Selector::Index(2), Selector::Index(3)]
        );
        assert_eq!(parse_selector_or_range("3-3").unwrap(), vec![Selector::Index(2)]);
        assert!(parse_selector_or_range("4-2").is_err());
    }

    #[test]
    fn huge_ranges_are_rejected() {
        assert!(parse_selector_or_range("1-100000000000").is_err());
        let max = format!("1-{}", MAX_RANGE_LEN);
        assert_eq!(parse_selector_or_range(&max).unwrap().len(), MAX_RANGE_LEN);
        assert!(parse_selector_or_range(&format!("1-{}", MAX_RANGE_LEN + 1)).is_err());
    }

    #[test]
    fn parses_uuids() {
        let id = Uuid::new_v4();
        assert_eq!(
            parse_selector_or_range(&id.to_string()).unwrap(),
            vec![Selector::Id(id)]
        );
    }

    #[test]
    fn rejects_garbage_and_zero() {
        assert!(parse_selector_or_range("abc").is_err());
        assert!(parse_selector_or_range("0").is_err());
        assert!(parse_selector_or_range("-1").is_err());
        assert!(parse_selector_or_range("1-x").is_err());
    }

    #[test]
    fn parse_selectors_flattens_and_dedupes() {
        let selectors = parse_selectors(&["1-2", "2", "3"]).unwrap();
        assert_eq!(
            selectors,
            vec![Selector::Index(0), Selector::Index(1), Selector::Index(2)]
        );
    }

    #[test]
    fn display_is_one_based() {
        assert_eq!(Selector::Index(0).to_string(), "1");
        let item = IndexedSnippet {
            index: 4,
            snippet: Snippet::new("x"),
        };
        assert_eq!(item.display_number(), 5);
    }
}
