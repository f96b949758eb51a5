//! Mastery and streak overview.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::io::Write;
use vocab_core::{Catalog, KeyValueStore, ProgressStore, VocabularyCatalog};

pub fn run<S, W>(catalog: &Catalog, progress: &ProgressStore<S>, now: DateTime<Utc>, mut out: W) -> Result<()>
where
    S: KeyValueStore,
    W: Write,
{
    let items = catalog.base_vocabulary();
    let stats = progress.get_mastery_stats(items);
    let due = progress.due_count(items, now);
    let user = progress.get_progress();

    writeln!(out, "Catalog:  {} items", items.len())?;
    writeln!(out, "Mastered: {}", stats.mastered)?;
    writeln!(out, "Learning: {}", stats.learning)?;
    writeln!(out, "New:      {}", stats.new_items)?;
    writeln!(out, "Due now:  {due}")?;

    match user.streak.last_played_date {
        Some(date) => writeln!(
            out,
            "Streak:   {} day(s), last played {}",
            user.streak.current_streak,
            date.format("%Y-%m-%d")
        )?,
        None => writeln!(out, "Streak:   not started")?,
    }
    Ok(())
}
