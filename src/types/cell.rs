use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{AxisReference, CellRange, ColumnReference, ReferenceKind, RowReference};
use crate::error::{Result, XlnavError};

/// A reference to a single cell.
///
/// Strict ordering is column-major `(column, row)`. Use
/// [`CellReference::cmp_ignore_kind`] or [`RowMajorCell`] for the row-major
/// layout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CellReference {
    column: ColumnReference,
    row: RowReference,
}

impl CellReference {
    pub const fn new(column: ColumnReference, row: RowReference) -> Self {
        Self { column, row }
    }

    /// Relative cell from 0-based column and row values.
    ///
    /// # Errors
    /// Returns [`XlnavError::OutOfDomain`] when either value is out of range.
    pub fn from_values(column: u32, row: u32) -> Result<Self> {
        Ok(Self::new(ColumnReference::new(column)?, RowReference::new(row)?))
    }

    /// Cell `A1`.
    pub fn home() -> Self {
        Self::new(ColumnReference::first(), RowReference::first())
    }

    pub fn column(self) -> ColumnReference {
        self.column
    }

    pub fn row(self) -> RowReference {
        self.row
    }

    #[must_use]
    pub fn set_column(self, column: ColumnReference) -> Self {
        Self { column, ..self }
    }

    #[must_use]
    pub fn set_row(self, row: RowReference) -> Self {
        Self { row, ..self }
    }

    /// Add to both axes, failing if either leaves its domain.
    ///
    /// # Errors
    /// Returns [`XlnavError::OutOfDomain`].
    pub fn add(self, column_delta: i64, row_delta: i64) -> Result<Self> {
        Ok(Self::new(
            self.column.add(column_delta)?,
            self.row.add(row_delta)?,
        ))
    }

    #[must_use]
    pub fn add_saturated(self, column_delta: i64, row_delta: i64) -> Self {
        Self::new(
            self.column.add_saturated(column_delta),
            self.row.add_saturated(row_delta),
        )
    }

    /// Shift relative axes only, keeping absolute ones in place.
    #[must_use]
    pub fn add_if_relative(self, column_delta: i64, row_delta: i64) -> Self {
        Self::new(
            self.column.add_if_relative(column_delta),
            self.row.add_if_relative(row_delta),
        )
    }

    #[must_use]
    pub fn set_kind(self, kind: ReferenceKind) -> Self {
        Self::new(self.column.set_kind(kind), self.row.set_kind(kind))
    }

    #[must_use]
    pub fn to_relative(self) -> Self {
        self.set_kind(ReferenceKind::Relative)
    }

    #[must_use]
    pub fn to_absolute(self) -> Self {
        self.set_kind(ReferenceKind::Absolute)
    }

    pub fn is_first(self) -> bool {
        self.column.is_first() && self.row.is_first()
    }

    pub fn is_last(self) -> bool {
        self.column.is_last() && self.row.is_last()
    }

    pub fn eq_ignore_kind(self, other: Self) -> bool {
        self.column.eq_ignore_kind(other.column) && self.row.eq_ignore_kind(other.row)
    }

    /// Row-major order ignoring reference kinds.
    pub fn cmp_ignore_kind(self, other: Self) -> Ordering {
        self.row
            .cmp_ignore_kind(other.row)
            .then_with(|| self.column.cmp_ignore_kind(other.column))
    }

    /// Normalized range spanning `self` and `other`.
    pub fn range(self, other: Self) -> CellRange {
        CellRange::new(self, other)
    }

    /// Single cell range.
    pub fn to_cell_range(self) -> CellRange {
        CellRange::new(self, self)
    }
}

impl fmt::Display for CellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

impl From<CellReference> for String {
    fn from(cell: CellReference) -> Self {
        cell.to_string()
    }
}

impl TryFrom<String> for CellReference {
    type Error = XlnavError;

    fn try_from(text: String) -> Result<Self> {
        text.parse()
    }
}

impl ColumnReference {
    /// Cell at this column and `row`.
    pub fn set_row(self, row: RowReference) -> CellReference {
        CellReference::new(self, row)
    }
}

impl RowReference {
    /// Cell at `column` and this row.
    pub fn set_column(self, column: ColumnReference) -> CellReference {
        CellReference::new(column, self)
    }
}

/// Sorted-store key that orders cells row-major and ignores reference kinds.
///
/// `BTreeMap<RowMajorCell, V>` is the layout expected by
/// [`crate::navigation::SparseCells`].
#[derive(Debug, Clone, Copy)]
pub struct RowMajorCell(pub CellReference);

impl PartialEq for RowMajorCell {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_kind(other.0)
    }
}

impl Eq for RowMajorCell {}

impl PartialOrd for RowMajorCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RowMajorCell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp_ignore_kind(other.0)
    }
}

impl From<CellReference> for RowMajorCell {
    fn from(cell: CellReference) -> Self {
        Self(cell)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn cell(text: &str) -> CellReference {
        text.parse().unwrap()
    }

    #[test]
    fn test_strict_order_is_column_major() {
        assert!(cell("A2") < cell("B1"));
        assert_eq!(cell("A2").cmp_ignore_kind(cell("B1")), Ordering::Greater);
    }

    #[test]
    fn test_add_if_relative_mixed() {
        let moved = cell("$B3").add_if_relative(2, 2);
        assert_eq!(moved, cell("$B5"));
    }

    #[test]
    fn test_add_saturated_clamps_each_axis() {
        let moved = cell("C3").add_saturated(-100, 2_000_000);
        assert_eq!(moved.column(), ColumnReference::first());
        assert!(moved.row().is_last());
    }

    #[test]
    fn test_row_major_key_ignores_kind() {
        assert_eq!(RowMajorCell(cell("$A$1")), RowMajorCell(cell("A1")));
        assert!(RowMajorCell(cell("Z1")) < RowMajorCell(cell("A2")));
    }
}
