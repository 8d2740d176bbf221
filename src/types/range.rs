use std::cmp::Ordering;
use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use super::{AxisReference, CellReference, ColumnReference, ReferenceKind, RowReference};
use crate::error::{Result, XlnavError};

/// An inclusive `[begin, end]` range along one axis, `begin <= end` by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisRange<R> {
    begin: R,
    end: R,
}

/// A range of whole columns, e.g. `B:D`.
pub type ColumnRange = AxisRange<ColumnReference>;

/// A range of whole rows, e.g. `2:4`.
pub type RowRange = AxisRange<RowReference>;

impl<R: AxisReference> AxisRange<R> {
    /// Range spanning `a` and `b` in either order.
    pub fn new(a: R, b: R) -> Self {
        if a.value() <= b.value() {
            Self { begin: a, end: b }
        } else {
            Self { begin: b, end: a }
        }
    }

    /// One unit range.
    pub fn single(reference: R) -> Self {
        Self {
            begin: reference,
            end: reference,
        }
    }

    /// Every column (or row) on the axis.
    pub fn all() -> Self {
        Self::new(R::first(), R::last())
    }

    pub fn begin(self) -> R {
        self.begin
    }

    pub fn end(self) -> R {
        self.end
    }

    #[must_use]
    pub fn set_begin(self, begin: R) -> Self {
        Self::new(begin, self.end)
    }

    #[must_use]
    pub fn set_end(self, end: R) -> Self {
        Self::new(self.begin, end)
    }

    /// Number of columns (width) or rows (height).
    pub fn count(self) -> u32 {
        self.end.value() - self.begin.value() + 1
    }

    pub fn is_single(self) -> bool {
        self.begin.eq_ignore_kind(self.end)
    }

    pub fn is_all(self) -> bool {
        self.begin.is_first() && self.end.is_last()
    }

    /// The bare reference when this range covers a single unit.
    pub fn to_scalar(self) -> Option<R> {
        self.is_single().then_some(self.begin)
    }

    pub fn is_first(self) -> bool {
        self.begin.is_first()
    }

    pub fn is_last(self) -> bool {
        self.end.is_last()
    }

    /// True when `reference` lies inside this range.
    pub fn test(self, reference: R) -> bool {
        reference.value() >= self.begin.value() && reference.value() <= self.end.value()
    }

    /// True when the two ranges share at least one unit.
    pub fn test_range(self, other: Self) -> bool {
        self.begin.value() <= other.end.value() && other.begin.value() <= self.end.value()
    }

    /// True when `other` lies entirely inside this range.
    pub fn contains_range(self, other: Self) -> bool {
        self.test(other.begin) && self.test(other.end)
    }

    /// True when every unit in the range is hidden.
    pub fn is_hidden(self, hidden: impl Fn(R) -> bool) -> bool {
        self.iter().all(hidden)
    }

    /// Relative references from begin to end.
    pub fn iter(self) -> impl DoubleEndedIterator<Item = R> {
        (self.begin.value()..=self.end.value()).map(|v| R::clamped(v, ReferenceKind::Relative))
    }

    /// Shift both ends, clamping to the axis domain.
    #[must_use]
    pub fn add_saturated(self, delta: i64) -> Self {
        Self::new(self.begin.add_saturated(delta), self.end.add_saturated(delta))
    }

    #[must_use]
    pub fn add_if_relative(self, delta: i64) -> Self {
        Self::new(
            self.begin.add_if_relative(delta),
            self.end.add_if_relative(delta),
        )
    }

    pub fn eq_ignore_kind(self, other: Self) -> bool {
        self.begin.eq_ignore_kind(other.begin) && self.end.eq_ignore_kind(other.end)
    }

    pub fn cmp_ignore_kind(self, other: Self) -> Ordering {
        self.begin
            .cmp_ignore_kind(other.begin)
            .then_with(|| self.end.cmp_ignore_kind(other.end))
    }
}

impl ColumnRange {
    /// Cells where this column range crosses `rows`.
    pub fn set_rows(self, rows: RowRange) -> CellRange {
        CellRange::from_ranges(self, rows)
    }
}

impl RowRange {
    /// Cells where this row range crosses `columns`.
    pub fn set_columns(self, columns: ColumnRange) -> CellRange {
        CellRange::from_ranges(columns, self)
    }
}

impl<R: AxisReference> fmt::Display for AxisRange<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() && self.begin.kind() == self.end.kind() {
            write!(f, "{}", self.begin)
        } else {
            write!(f, "{}:{}", self.begin, self.end)
        }
    }
}

impl<R: AxisReference> Serialize for AxisRange<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, R: AxisReference> Deserialize<'de> for AxisRange<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// A rectangular range of cells.
///
/// `begin` is the top-left corner and `end` the bottom-right, whatever order
/// the corners were supplied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CellRange {
    begin: CellReference,
    end: CellReference,
}

impl CellRange {
    /// Range spanning two corners, normalized independently per axis.
    pub fn new(a: CellReference, b: CellReference) -> Self {
        Self::from_ranges(
            ColumnRange::new(a.column(), b.column()),
            RowRange::new(a.row(), b.row()),
        )
    }

    pub fn from_ranges(columns: ColumnRange, rows: RowRange) -> Self {
        Self {
            begin: CellReference::new(columns.begin(), rows.begin()),
            end: CellReference::new(columns.end(), rows.end()),
        }
    }

    /// Smallest range covering every cell.
    ///
    /// # Errors
    /// Returns [`XlnavError::EmptyCellSet`] when `cells` is empty.
    pub fn from_cells(cells: impl IntoIterator<Item = CellReference>) -> Result<Self> {
        let mut cells = cells.into_iter();
        let first = cells.next().ok_or(XlnavError::EmptyCellSet)?;
        Ok(cells.fold(first.to_cell_range(), |range, cell| {
            Self::new(
                CellReference::new(
                    min_value(range.begin.column(), cell.column()),
                    min_value(range.begin.row(), cell.row()),
                ),
                CellReference::new(
                    max_value(range.end.column(), cell.column()),
                    max_value(range.end.row(), cell.row()),
                ),
            )
        }))
    }

    /// Every cell in the sheet.
    pub fn all() -> Self {
        Self::from_ranges(ColumnRange::all(), RowRange::all())
    }

    pub fn begin(self) -> CellReference {
        self.begin
    }

    pub fn end(self) -> CellReference {
        self.end
    }

    pub fn top_left(self) -> CellReference {
        self.begin
    }

    pub fn top_right(self) -> CellReference {
        CellReference::new(self.end.column(), self.begin.row())
    }

    pub fn bottom_left(self) -> CellReference {
        CellReference::new(self.begin.column(), self.end.row())
    }

    pub fn bottom_right(self) -> CellReference {
        self.end
    }

    pub fn column_range(self) -> ColumnRange {
        ColumnRange::new(self.begin.column(), self.end.column())
    }

    pub fn row_range(self) -> RowRange {
        RowRange::new(self.begin.row(), self.end.row())
    }

    pub fn width(self) -> u32 {
        self.column_range().count()
    }

    pub fn height(self) -> u32 {
        self.row_range().count()
    }

    /// Number of cells.
    pub fn count(self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    pub fn is_single(self) -> bool {
        self.begin.eq_ignore_kind(self.end)
    }

    pub fn to_scalar(self) -> Option<CellReference> {
        self.is_single().then_some(self.begin)
    }

    pub fn is_first(self) -> bool {
        self.begin.is_first()
    }

    pub fn is_last(self) -> bool {
        self.end.is_last()
    }

    pub fn test_cell(self, cell: CellReference) -> bool {
        self.test_column(cell.column()) && self.test_row(cell.row())
    }

    pub fn test_column(self, column: ColumnReference) -> bool {
        self.column_range().test(column)
    }

    pub fn test_row(self, row: RowReference) -> bool {
        self.row_range().test(row)
    }

    /// True when both axis projections overlap.
    pub fn test_cell_range(self, other: Self) -> bool {
        self.column_range().test_range(other.column_range())
            && self.row_range().test_range(other.row_range())
    }

    pub fn contains_range(self, other: Self) -> bool {
        self.test_cell(other.begin) && self.test_cell(other.end)
    }

    /// True when every column or every row of the range is hidden.
    pub fn is_hidden(
        self,
        column_hidden: impl Fn(ColumnReference) -> bool,
        row_hidden: impl Fn(RowReference) -> bool,
    ) -> bool {
        self.column_range().is_hidden(column_hidden) || self.row_range().is_hidden(row_hidden)
    }

    #[must_use]
    pub fn add_saturated(self, column_delta: i64, row_delta: i64) -> Self {
        Self::new(
            self.begin.add_saturated(column_delta, row_delta),
            self.end.add_saturated(column_delta, row_delta),
        )
    }

    #[must_use]
    pub fn add_if_relative(self, column_delta: i64, row_delta: i64) -> Self {
        Self::new(
            self.begin.add_if_relative(column_delta, row_delta),
            self.end.add_if_relative(column_delta, row_delta),
        )
    }

    pub fn eq_ignore_kind(self, other: Self) -> bool {
        self.begin.eq_ignore_kind(other.begin) && self.end.eq_ignore_kind(other.end)
    }

    pub fn cmp_ignore_kind(self, other: Self) -> Ordering {
        self.begin
            .cmp_ignore_kind(other.begin)
            .then_with(|| self.end.cmp_ignore_kind(other.end))
    }
}

fn min_value<R: AxisReference>(a: R, b: R) -> R {
    if b.value() < a.value() {
        b
    } else {
        a
    }
}

fn max_value<R: AxisReference>(a: R, b: R) -> R {
    if b.value() > a.value() {
        b
    } else {
        a
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.begin == self.end {
            write!(f, "{}", self.begin)
        } else {
            write!(f, "{}:{}", self.begin, self.end)
        }
    }
}

impl From<CellRange> for String {
    fn from(range: CellRange) -> Self {
        range.to_string()
    }
}

impl TryFrom<String> for CellRange {
    type Error = XlnavError;

    fn try_from(text: String) -> Result<Self> {
        text.parse()
    }
}
