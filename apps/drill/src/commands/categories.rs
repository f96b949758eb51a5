//! Category listing.

use anyhow::Result;
use std::io::Write;
use vocab_core::{Catalog, VocabularyCatalog};

pub fn run<W: Write>(catalog: &Catalog, mut out: W) -> Result<()> {
    let categories = catalog.categories();
    if categories.is_empty() {
        writeln!(out, "The catalog has no categories.")?;
    }
    for category in categories {
        let count = catalog
            .base_vocabulary()
            .iter()
            .filter(|item| item.category.as_deref() == Some(category.as_str()))
            .count();
        writeln!(out, "{category} ({count})")?;
    }
    Ok(())
}
