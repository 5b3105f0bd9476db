//! Command parsing and replay
//!
//! Each command maps onto exactly one engine gesture, so a command line
//! like `next toggle tick status` reads as a short input script.

use anyhow::{bail, Context, Result};

use tracker_engine::{Mode, TrackingList};

use crate::report;

/// One replayable gesture against the tracking list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Advance the selection cursor (circularly)
    Next(usize),
    /// Step the selection cursor back (circularly)
    Prev(usize),
    /// Toggle the selected node active / drive the pairing anchor
    Toggle,
    /// Merge around the active node, or sweep once
    Build,
    /// Merge everything the catalog can build
    BuildAll,
    /// Split the selected/active node, or sweep one level
    Break,
    /// Flatten everything down to leaves
    BreakAll,
    /// Switch the interaction mode
    Mode(Mode),
    /// Add seconds to the selection (or the accumulated pool)
    Add(i32),
    /// Subtract seconds from the selection (or the accumulated pool)
    Sub(i32),
    /// Swap back to the previously active node
    Restore,
    /// Move the selection onto the active node
    SelectActive,
    /// Clear the selection
    Deselect,
    /// Zero the selected node (or the accumulated pool)
    ResetSelected,
    /// Zero all nodes, folding the total into the accumulated pool
    Reset,
    /// Zero all nodes and the accumulated pool
    ResetAll,
    /// Flush accrual at the current instant
    Tick,
    /// Print the status report
    Status,
}

/// Parse a command line's trailing words into gestures
pub fn parse(words: &[String]) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    let mut iter = words.iter().peekable();

    while let Some(word) = iter.next() {
        let command = match word.as_str() {
            "next" => Command::Next(take_count(&mut iter)),
            "prev" => Command::Prev(take_count(&mut iter)),
            "toggle" => Command::Toggle,
            "build" => Command::Build,
            "build-all" => Command::BuildAll,
            "break" => Command::Break,
            "break-all" => Command::BreakAll,
            "mode" => {
                let name = iter
                    .next()
                    .with_context(|| "mode requires an argument: normal, build or freeze")?;
                Command::Mode(parse_mode(name)?)
            }
            "add" => Command::Add(take_seconds(&mut iter, "add")?),
            "sub" => Command::Sub(take_seconds(&mut iter, "sub")?),
            "restore" => Command::Restore,
            "select-active" => Command::SelectActive,
            "deselect" => Command::Deselect,
            "reset-selected" => Command::ResetSelected,
            "reset" => Command::Reset,
            "reset-all" => Command::ResetAll,
            "tick" => Command::Tick,
            "status" => Command::Status,
            other => bail!("unknown command: {other:?} (try --help)"),
        };
        commands.push(command);
    }

    Ok(commands)
}

fn take_count(iter: &mut std::iter::Peekable<std::slice::Iter<'_, String>>) -> usize {
    match iter.peek().and_then(|word| word.parse::<usize>().ok()) {
        Some(count) => {
            iter.next();
            count
        }
        None => 1,
    }
}

fn take_seconds(
    iter: &mut std::iter::Peekable<std::slice::Iter<'_, String>>,
    command: &str,
) -> Result<i32> {
    let word = iter
        .next()
        .with_context(|| format!("{command} requires a number of seconds"))?;
    word.parse::<i32>()
        .with_context(|| format!("{command}: not a number of seconds: {word:?}"))
}

fn parse_mode(name: &str) -> Result<Mode> {
    match name {
        "normal" => Ok(Mode::Normal),
        "build" | "build-break" => Ok(Mode::BuildBreak),
        "freeze" => Ok(Mode::Freeze),
        other => bail!("unknown mode: {other:?} (normal, build or freeze)"),
    }
}

/// Replay one gesture at wall-clock instant `now`
pub fn apply(list: &mut TrackingList, command: &Command, now: i64, json: bool) -> Result<()> {
    match command {
        Command::Next(steps) => {
            if !list.move_next(*steps) {
                log::warn!("nothing to select: the list is empty");
            }
        }
        Command::Prev(steps) => {
            if !list.move_prev(*steps) {
                log::warn!("nothing to select: the list is empty");
            }
        }
        Command::Toggle => {
            if !list.toggle_active(now) {
                log::info!("toggle ignored (no selection)");
            }
        }
        Command::Build => {
            if !list.merge_from_active() {
                log::info!("no pair could be built");
            }
        }
        Command::BuildAll => {
            list.merge_all();
        }
        Command::Break => {
            if !list.split_selection_or_active() {
                log::info!("nothing to break");
            }
        }
        Command::BreakAll => {
            list.split_all();
        }
        Command::Mode(mode) => list.set_mode(*mode, now),
        Command::Add(seconds) => list.add_delta(*seconds),
        Command::Sub(seconds) => list.add_delta(-seconds),
        Command::Restore => list.restore_previous_active(),
        Command::SelectActive => list.select_active(),
        Command::Deselect => list.reset_selection(),
        Command::ResetSelected => list.reset_selected_time(),
        Command::Reset => list.reset_time(false),
        Command::ResetAll => list.reset_time(true),
        Command::Tick => {
            if let Some(seconds) = list.update_accrual(now) {
                log::info!("active node at {seconds} seconds");
            }
        }
        Command::Status => report::print(list, json)?,
    }
    Ok(())
}
