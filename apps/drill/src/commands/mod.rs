//! Subcommand implementations.
//!
//! Each command writes to a caller-supplied writer so it can be driven from
//! tests as well as from the terminal.

pub mod categories;
pub mod drill;
pub mod leaderboard;
pub mod reset;
pub mod stats;

use anyhow::{Context, Result};
use std::path::Path;
use vocab_core::Catalog;

/// Load a catalog file. `.json` files hold an array of items; anything else
/// uses the line-based entry format.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let catalog = if is_json {
        Catalog::from_json(&content)
    } else {
        Catalog::parse(&content)
    }
    .with_context(|| format!("invalid catalog {}", path.display()))?;

    tracing::info!(path = %path.display(), items = catalog.len(), "loaded catalog");
    Ok(catalog)
}
