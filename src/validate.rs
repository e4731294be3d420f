//! Field validators shared by insert, update and file loading. Each returns
//! the typed value on success so callers never re-parse.

use crate::error::{Field, StoreError, StoreResult};
use crate::models::Programme;

pub const MIN_ID: u32 = 1_000_000;
pub const MAX_ID: u32 = 9_999_999;
/// Longest name or programme text a record accepts, in characters.
pub const MAX_TEXT_LEN: usize = 49;
pub const MIN_MARK: f64 = 1.0;
pub const MAX_MARK: f64 = 100.0;

/// Accept only a non-empty run of ASCII digits forming a 7-digit id.
/// Surrounding whitespace is not stripped.
pub fn parse_id(raw: &str) -> StoreResult<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StoreError::Validation(Field::Id));
    }
    match raw.parse::<u32>() {
        Ok(id) if (MIN_ID..=MAX_ID).contains(&id) => Ok(id),
        _ => Err(StoreError::Validation(Field::Id)),
    }
}

/// Names are ASCII letters and spaces, trimmed, non-empty.
pub fn parse_name(raw: &str) -> StoreResult<String> {
    let name = raw.trim();
    let valid = !name.is_empty()
        && name.chars().count() <= MAX_TEXT_LEN
        && name.chars().all(|ch| ch.is_ascii_alphabetic() || ch == ' ');
    if valid {
        Ok(name.to_string())
    } else {
        Err(StoreError::Validation(Field::Name))
    }
}

/// Typed programmes must be one of the codes, spelled exactly.
pub fn parse_programme(raw: &str) -> StoreResult<Programme> {
    Programme::from_code(raw).ok_or(StoreError::Validation(Field::Programme))
}

/// Digits with at most one decimal point, then range-checked.
pub fn parse_mark(raw: &str) -> StoreResult<f64> {
    let raw = raw.trim();
    if !is_numeric(raw) {
        return Err(StoreError::Validation(Field::Mark));
    }
    let mark = raw
        .parse::<f64>()
        .map_err(|_| StoreError::Validation(Field::Mark))?;
    check_mark(mark)
}

pub fn check_mark(mark: f64) -> StoreResult<f64> {
    if (MIN_MARK..=MAX_MARK).contains(&mark) {
        Ok(mark)
    } else {
        Err(StoreError::Validation(Field::Mark))
    }
}

fn is_numeric(raw: &str) -> bool {
    let mut digits = 0;
    let mut dots = 0;
    for ch in raw.chars() {
        match ch {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}
