//! Read-only vocabulary catalog.

use crate::error::{ParseError, Result};
use crate::parser;
use crate::types::VocabularyItem;
use std::collections::{BTreeSet, HashSet};

/// Source of the vocabulary the engine drills.
pub trait VocabularyCatalog {
    /// Distinct category names, sorted.
    fn categories(&self) -> Vec<String>;

    /// Every item in the catalog.
    fn base_vocabulary(&self) -> &[VocabularyItem];
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<VocabularyItem>,
}

impl Catalog {
    pub fn new(items: Vec<VocabularyItem>) -> Self {
        Self { items }
    }

    /// Build from catalog text (see [`crate::parser`]).
    pub fn parse(content: &str) -> Result<Self> {
        parser::parse(content).map(Self::new)
    }

    /// Build from a JSON array of items. Errors name the 1-based array entry.
    pub fn from_json(content: &str) -> Result<Self> {
        let items: Vec<VocabularyItem> = serde_json::from_str(content)?;

        let mut seen = HashSet::new();
        for (index, item) in items.iter().enumerate() {
            if !seen.insert(item.id.as_str()) {
                return Err(ParseError::DuplicateEntry {
                    id: item.id.clone(),
                    entry: index + 1,
                });
            }
        }

        Ok(Self::new(items))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl VocabularyCatalog for Catalog {
    fn categories(&self) -> Vec<String> {
        categories(&self.items)
    }

    fn base_vocabulary(&self) -> &[VocabularyItem] {
        &self.items
    }
}

/// Distinct, sorted category names present in `items`.
pub fn categories(items: &[VocabularyItem]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
