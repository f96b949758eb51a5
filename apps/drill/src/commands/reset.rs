//! Progress reset.

use anyhow::Result;
use std::io::{BufRead, Write};
use vocab_core::{keys, KeyValueStore, ProgressStore};

/// Forget progress, streak and any saved round; optionally the leaderboard.
///
/// Asks for confirmation on `input` unless `confirmed` is set. Returns
/// whether anything was removed.
pub fn run<S, R, W>(
    progress: &ProgressStore<S>,
    include_leaderboard: bool,
    confirmed: bool,
    mut input: R,
    mut out: W,
) -> Result<bool>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    if !confirmed {
        write!(out, "This forgets all progress. Continue? [y/N] ")?;
        out.flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            writeln!(out, "Nothing changed.")?;
            return Ok(false);
        }
    }

    progress.reset()?;
    progress.store().remove(keys::CURRENT_SESSION)?;
    if include_leaderboard {
        progress.store().remove(keys::LEADERBOARD)?;
    }

    tracing::info!(include_leaderboard, "reset progress");
    writeln!(out, "Progress cleared.")?;
    Ok(true)
}
