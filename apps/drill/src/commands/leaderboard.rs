//! Leaderboard display.

use anyhow::Result;
use std::io::Write;
use vocab_core::{KeyValueStore, Leaderboard, LeaderboardEntry};

pub fn run<S: KeyValueStore, W: Write>(board: &Leaderboard<S>, mut out: W) -> Result<()> {
    print_board(&mut out, &board.entries())
}

/// Print entries best first, one per line.
pub fn print_board<W: Write>(out: &mut W, entries: &[LeaderboardEntry]) -> Result<()> {
    if entries.is_empty() {
        writeln!(out, "No marathon scores yet.")?;
        return Ok(());
    }

    writeln!(out, "{:>3}  {:<20} {:>5} {:>5}  {}", "#", "Name", "Score", "Acc", "Date")?;
    for (rank, entry) in entries.iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {:<20} {:>5} {:>4}%  {}",
            rank + 1,
            entry.name,
            entry.score,
            entry.accuracy,
            entry.date.format("%Y-%m-%d")
        )?;
    }
    Ok(())
}
