use std::io::{BufRead, Write};

use anyhow::Result;

use super::terminal::Console;
use crate::models::{Programme, RecordDraft, RecordPatch};

/// Prompt for a student id. `Ok(None)` covers both exhausted input and a
/// value that is not a positive integer; the caller has already been told
/// which.
pub(crate) fn read_id<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    label: &str,
) -> Result<Option<u32>> {
    let Some(raw) = console.prompt(label)? else {
        return Ok(None);
    };
    match raw.trim().parse::<u32>() {
        Ok(id) if id > 0 => Ok(Some(id)),
        _ => {
            console.line("Invalid ID. Please enter a positive number.")?;
            Ok(None)
        }
    }
}

/// Ask for the remaining fields of a new record. Exhausted input leaves the
/// field blank so validation reports it.
pub(crate) fn read_draft_fields<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    id: String,
) -> Result<RecordDraft> {
    let name = console.prompt("Enter name: ")?.unwrap_or_default();
    let programme = console
        .prompt(&format!("Enter programme ({}): ", Programme::codes()))?
        .unwrap_or_default();
    let mark = console.prompt("Enter mark (1-100): ")?.unwrap_or_default();
    Ok(RecordDraft {
        id,
        name,
        programme,
        mark,
    })
}

/// Ask for replacement values; pressing Enter keeps the current one.
pub(crate) fn read_patch<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<RecordPatch> {
    Ok(RecordPatch {
        name: console.prompt("\nEnter new name (Enter = keep): ")?,
        programme: console.prompt(&format!(
            "Enter new programme ({}, Enter = keep): ",
            Programme::codes()
        ))?,
        mark: console.prompt("Enter new mark (Enter = keep): ")?,
    })
}

/// Only an answer starting with `y` or `Y` confirms.
pub(crate) fn confirm<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    label: &str,
) -> Result<bool> {
    let answer = console.prompt(label)?.unwrap_or_default();
    Ok(answer.trim_start().starts_with(['y', 'Y']))
}
