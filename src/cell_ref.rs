//! Text form of references, ranges, labels and selections.
//!
//! Columns are base-26 letters with `A` = 0, rows are 1-based numbers and a
//! leading `$` marks an absolute component: `A1`, `$B$2`, `C:$E`, `3:7`.

use std::str::FromStr;

use crate::error::{Result, XlnavError};
use crate::types::{
    AxisRange, AxisReference, CellRange, CellReference, ColumnReference, Label, ReferenceKind,
    RowReference, Selection,
};

/// Longest run of column letters worth evaluating; anything longer is out of range.
const MAX_COLUMN_LETTERS: usize = 7;

/// Convert a 0-based column index to letters (A, B, ..., Z, AA, AB, ...)
pub fn column_to_letters(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = u64::from(col) + 1;
    while n > 0 {
        n -= 1;
        letters.push(b'A' + u8::try_from(n % 26).unwrap_or(0));
        n /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Convert column letters (any case) to a 0-based value.
///
/// Returns `None` for empty input or non-letters. The value may lie past the
/// last column; callers range check it.
pub fn letters_to_column(letters: &str) -> Option<i64> {
    if letters.is_empty() || letters.len() > MAX_COLUMN_LETTERS {
        return None;
    }
    let mut col: i64 = 0;
    for b in letters.bytes() {
        if !b.is_ascii_alphabetic() {
            return None;
        }
        col = col * 26 + i64::from(b.to_ascii_uppercase() - b'A') + 1;
    }
    Some(col - 1)
}

fn invalid(text: &str) -> XlnavError {
    XlnavError::InvalidReference(text.to_string())
}

fn split_kind(text: &str) -> (ReferenceKind, &str) {
    match text.strip_prefix('$') {
        Some(rest) => (ReferenceKind::Absolute, rest),
        None => (ReferenceKind::Relative, text),
    }
}

/// Parse `A` or `$A`.
///
/// # Errors
/// Returns [`XlnavError::InvalidReference`] for malformed text and
/// [`XlnavError::OutOfDomain`] past column `XFD`.
pub fn parse_column(text: &str) -> Result<ColumnReference> {
    let (kind, letters) = split_kind(text.trim());
    let value = letters_to_column(letters).ok_or_else(|| invalid(text))?;
    ColumnReference::with_value(value, kind)
}

/// Parse `1` or `$1` (1-based).
///
/// # Errors
/// Returns [`XlnavError::InvalidReference`] for malformed text or row `0`,
/// [`XlnavError::OutOfDomain`] past the last row.
pub fn parse_row(text: &str) -> Result<RowReference> {
    let (kind, digits) = split_kind(text.trim());
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(text));
    }
    let number: i64 = digits.parse().map_err(|_| invalid(text))?;
    if number == 0 {
        return Err(invalid(text));
    }
    RowReference::with_value(number - 1, kind)
}

/// Parse a cell such as `B7`, `$B7`, `B$7` or `$B$7`.
///
/// # Errors
/// Returns [`XlnavError::InvalidReference`] or [`XlnavError::OutOfDomain`].
pub fn parse_cell(text: &str) -> Result<CellReference> {
    let trimmed = text.trim();
    let (_, after_marker) = split_kind(trimmed);
    let letters_len = after_marker
        .bytes()
        .take_while(u8::is_ascii_alphabetic)
        .count();
    let split = trimmed.len() - after_marker.len() + letters_len;
    let (column, row) = (trimmed.get(..split), trimmed.get(split..));
    match (column, row) {
        (Some(column), Some(row)) if letters_len > 0 => {
            Ok(CellReference::new(parse_column(column)?, parse_row(row)?))
        }
        _ => Err(invalid(text)),
    }
}

/// Parse `A1:B2` or a single `A1`.
///
/// # Errors
/// Returns [`XlnavError::InvalidReference`] or [`XlnavError::OutOfDomain`].
pub fn parse_cell_range(text: &str) -> Result<CellRange> {
    match text.split_once(':') {
        Some((begin, end)) => Ok(CellRange::new(parse_cell(begin)?, parse_cell(end)?)),
        None => Ok(parse_cell(text)?.to_cell_range()),
    }
}

/// Parse `A:C`, `2:9` or a single column/row.
///
/// # Errors
/// Returns [`XlnavError::InvalidReference`] or [`XlnavError::OutOfDomain`].
pub fn parse_axis_range<R: AxisReference>(text: &str) -> Result<AxisRange<R>> {
    match text.split_once(':') {
        Some((begin, end)) => Ok(AxisRange::new(begin.parse()?, end.parse()?)),
        None => Ok(AxisRange::single(text.parse()?)),
    }
}

/// Parse a label name.
///
/// # Errors
/// Returns [`XlnavError::InvalidLabel`].
pub fn parse_label(text: &str) -> Result<Label> {
    Label::new(text.trim())
}

/// Parse any selection, trying in order: cell range, cell, row range, row,
/// column range, column and finally label.
///
/// Labels never read as a cell or column, so every label's text comes back
/// as the same label.
///
/// # Errors
/// Returns [`XlnavError::InvalidReference`] when nothing matches.
pub fn parse_selection(text: &str) -> Result<Selection> {
    let text = text.trim();
    if text.contains(':') {
        if let Ok(range) = parse_cell_range(text) {
            return Ok(Selection::CellRange(range));
        }
        if let Ok(range) = parse_axis_range::<RowReference>(text) {
            return Ok(Selection::RowRange(range));
        }
        return parse_axis_range::<ColumnReference>(text)
            .map(Selection::ColumnRange)
            .map_err(|_| invalid(text));
    }
    parse_cell(text)
        .map(Selection::Cell)
        .or_else(|_| parse_row(text).map(Selection::Row))
        .or_else(|_| parse_column(text).map(Selection::Column))
        .or_else(|_| parse_label(text).map(Selection::Label))
        .map_err(|_| invalid(text))
}

/// Parse a comma separated list such as `A1,B2:C3,Total`.
///
/// # Errors
/// Fails on the first entry that does not parse.
pub fn parse_selection_list(text: &str) -> Result<Vec<Selection>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(',').map(parse_selection).collect()
}

/// Comma separated text form, the reverse of [`parse_selection_list`].
pub fn format_selection_list(selections: &[Selection]) -> String {
    selections
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl FromStr for ColumnReference {
    type Err = XlnavError;

    fn from_str(text: &str) -> Result<Self> {
        parse_column(text)
    }
}

impl FromStr for RowReference {
    type Err = XlnavError;

    fn from_str(text: &str) -> Result<Self> {
        parse_row(text)
    }
}

impl FromStr for CellReference {
    type Err = XlnavError;

    fn from_str(text: &str) -> Result<Self> {
        parse_cell(text)
    }
}

impl FromStr for CellRange {
    type Err = XlnavError;

    fn from_str(text: &str) -> Result<Self> {
        parse_cell_range(text)
    }
}

impl<R: AxisReference> FromStr for AxisRange<R> {
    type Err = XlnavError;

    fn from_str(text: &str) -> Result<Self> {
        parse_axis_range(text)
    }
}

impl FromStr for Label {
    type Err = XlnavError;

    fn from_str(text: &str) -> Result<Self> {
        parse_label(text)
    }
}

impl FromStr for Selection {
    type Err = XlnavError;

    fn from_str(text: &str) -> Result<Self> {
        parse_selection(text)
    }
}
