//! Interactive review round.

use crate::cli::DrillArgs;
use crate::commands::leaderboard::print_board;
use anyhow::{bail, Result};
use std::io::{BufRead, Write};
use vocab_core::{
    AnswerOutcome, Feedback, KeyValueStore, Phase, RoundOutcome, Session, SessionError,
};

/// Typed instead of an answer to abandon the round.
pub const QUIT: &str = ":q";

/// Play rounds until the learner stops or input runs out.
///
/// Running out of input mid-round leaves the round saved for a later resume;
/// typing [`QUIT`] abandons it.
pub fn run<S, R, W>(session: &mut Session<S>, args: &DrillArgs, mut input: R, mut out: W) -> Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    if !args.fresh && session.resume() {
        writeln!(
            out,
            "Resuming your round at item {} of {}.",
            session.current_index() + 1,
            session.round_items().len()
        )?;
    } else {
        let prefs = session.preferences();
        let direction = args.direction.unwrap_or(prefs.direction);
        let size = args.size.unwrap_or(prefs.round_size);
        if size == 0 {
            bail!("round size must be at least 1");
        }
        let categories = if args.categories.is_empty() {
            prefs.selected_categories
        } else {
            args.categories.clone()
        };

        session.start(direction, size, categories)?;
        writeln!(out, "Streak: {} day(s). Type {QUIT} to quit.", session.streak())?;
    }

    loop {
        match session.phase() {
            Phase::InRound => {
                if !play_item(session, &mut input, &mut out)? {
                    return Ok(());
                }
            }
            Phase::RoundOverview => {
                if !overview(session, &mut input, &mut out)? {
                    session.exit();
                    return Ok(());
                }
                session.restart()?;
            }
            Phase::NotStarted => return Ok(()),
        }
    }
}

/// Handle one prompt. Returns `false` when the drill should stop.
fn play_item<S, R, W>(session: &mut Session<S>, input: &mut R, out: &mut W) -> Result<bool>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    if session.is_answered() {
        session.advance()?;
        return Ok(true);
    }

    if session.attempt_count() == 0 {
        let prompt = session.current_prompt().unwrap_or_default();
        let direction = session.direction().map(|d| d.as_str()).unwrap_or_default();
        writeln!(
            out,
            "\n[{}/{}] {prompt}  ({direction})",
            session.current_index() + 1,
            session.round_items().len()
        )?;
    }
    write!(out, "> ")?;
    out.flush()?;

    let Some(answer) = read_line(input)? else {
        writeln!(out, "\nRound saved. Run drill again to pick up where you left off.")?;
        return Ok(false);
    };
    if answer == QUIT {
        session.exit();
        writeln!(out, "Round abandoned.")?;
        return Ok(false);
    }

    match session.submit_answer(&answer) {
        Ok(outcome) => {
            print_feedback(out, &outcome)?;
            if !outcome.can_retry {
                session.advance()?;
            }
        }
        Err(SessionError::MissingTranslation { id, language }) => {
            writeln!(out, "'{id}' has no {language} translation, skipping.")?;
            session.advance()?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(true)
}

/// Print the round overview. Returns whether to play again.
fn overview<S, R, W>(session: &mut Session<S>, input: &mut R, out: &mut W) -> Result<bool>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    let Some(summary) = session.summary() else {
        return Ok(false);
    };
    if summary.total == 0 {
        writeln!(out, "Nothing to drill: the catalog has no matching items.")?;
        return Ok(false);
    }

    writeln!(
        out,
        "\nRound complete: {}/{} ({}%)",
        summary.score, summary.total, summary.accuracy_percent
    )?;
    writeln!(
        out,
        "  perfect {}, second try {}, missed {}",
        summary.perfect, summary.second_try, summary.missed
    )?;

    let source = session.direction().map(|d| d.source());
    for entry in session.history() {
        if entry.outcome() == RoundOutcome::Missed {
            let prompt = source.and_then(|s| entry.item.text(s)).unwrap_or_default();
            writeln!(out, "  - {prompt} = {}", entry.correct_translation)?;
        }
    }

    if summary.is_marathon {
        write!(out, "Name for the leaderboard: ")?;
        out.flush()?;
        let name = read_line(input)?.unwrap_or_default();
        let board = session.submit_to_leaderboard(&name)?;
        print_board(out, &board)?;
    }

    write!(out, "Play again? [y/N] ")?;
    out.flush()?;
    let again = read_line(input)?
        .is_some_and(|a| a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes"));
    Ok(again)
}

fn print_feedback<W: Write>(out: &mut W, outcome: &AnswerOutcome) -> Result<()> {
    match outcome.feedback {
        Feedback::Perfect => writeln!(out, "Perfect!")?,
        Feedback::CloseCall => writeln!(out, "Close call! Correct spelling: {}", outcome.correct_answer)?,
        Feedback::TryAgain => writeln!(out, "Not quite. Try again.")?,
        Feedback::Correct => writeln!(out, "Correct!")?,
        Feedback::Incorrect => writeln!(out, "Incorrect. The answer is: {}", outcome.correct_answer)?,
    }
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
