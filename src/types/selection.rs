use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    AxisReference, CellRange, CellReference, ColumnRange, ColumnReference, Label, LabelResolver,
    RowRange, RowReference,
};
use crate::error::{Result, XlnavError};

/// Everything a user can select: a cell, column or row, a range of any of
/// them, or a label naming one of those.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Selection {
    Cell(CellReference),
    CellRange(CellRange),
    Column(ColumnReference),
    ColumnRange(ColumnRange),
    Row(RowReference),
    RowRange(RowRange),
    Label(Label),
}

impl Selection {
    /// Kebab-case variant name, as used in the JSON `type` field.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Cell(_) => "cell",
            Self::CellRange(_) => "cell-range",
            Self::Column(_) => "column",
            Self::ColumnRange(_) => "column-range",
            Self::Row(_) => "row",
            Self::RowRange(_) => "row-range",
            Self::Label(_) => "label",
        }
    }

    pub fn is_label(&self) -> bool {
        matches!(self, Self::Label(_))
    }

    fn conversion(&self, target: &'static str) -> XlnavError {
        XlnavError::Conversion {
            selection: self.to_string(),
            target,
        }
    }

    /// The cell this selection starts at. Columns start on the first row and
    /// rows on the first column.
    ///
    /// # Errors
    /// Fails for labels.
    pub fn to_cell(&self) -> Result<CellReference> {
        match self {
            Self::Cell(cell) => Ok(*cell),
            Self::CellRange(range) => Ok(range.begin()),
            Self::Column(column) => Ok(column.set_row(RowReference::first())),
            Self::ColumnRange(range) => Ok(range.begin().set_row(RowReference::first())),
            Self::Row(row) => Ok(row.set_column(ColumnReference::first())),
            Self::RowRange(range) => Ok(range.begin().set_column(ColumnReference::first())),
            Self::Label(_) => Err(self.conversion("cell")),
        }
    }

    /// # Errors
    /// Fails for rows, row ranges and labels.
    pub fn to_column(&self) -> Result<ColumnReference> {
        match self {
            Self::Cell(cell) => Ok(cell.column()),
            Self::CellRange(range) => Ok(range.begin().column()),
            Self::Column(column) => Ok(*column),
            Self::ColumnRange(range) => Ok(range.begin()),
            Self::Row(_) | Self::RowRange(_) | Self::Label(_) => Err(self.conversion("column")),
        }
    }

    /// # Errors
    /// Fails for columns, column ranges and labels.
    pub fn to_row(&self) -> Result<RowReference> {
        match self {
            Self::Cell(cell) => Ok(cell.row()),
            Self::CellRange(range) => Ok(range.begin().row()),
            Self::Row(row) => Ok(*row),
            Self::RowRange(range) => Ok(range.begin()),
            Self::Column(_) | Self::ColumnRange(_) | Self::Label(_) => Err(self.conversion("row")),
        }
    }

    /// # Errors
    /// Fails for rows, row ranges and labels.
    pub fn to_column_range(&self) -> Result<ColumnRange> {
        match self {
            Self::Cell(cell) => Ok(ColumnRange::single(cell.column())),
            Self::CellRange(range) => Ok(range.column_range()),
            Self::Column(column) => Ok(ColumnRange::single(*column)),
            Self::ColumnRange(range) => Ok(*range),
            Self::Row(_) | Self::RowRange(_) | Self::Label(_) => {
                Err(self.conversion("column-range"))
            }
        }
    }

    /// # Errors
    /// Fails for columns, column ranges and labels.
    pub fn to_row_range(&self) -> Result<RowRange> {
        match self {
            Self::Cell(cell) => Ok(RowRange::single(cell.row())),
            Self::CellRange(range) => Ok(range.row_range()),
            Self::Row(row) => Ok(RowRange::single(*row)),
            Self::RowRange(range) => Ok(*range),
            Self::Column(_) | Self::ColumnRange(_) | Self::Label(_) => {
                Err(self.conversion("row-range"))
            }
        }
    }

    /// Cells covered by the selection. Columns span every row and rows every column.
    ///
    /// # Errors
    /// Fails for labels.
    pub fn to_cell_range(&self) -> Result<CellRange> {
        match self {
            Self::Cell(cell) => Ok(cell.to_cell_range()),
            Self::CellRange(range) => Ok(*range),
            Self::Column(column) => Ok(ColumnRange::single(*column).set_rows(RowRange::all())),
            Self::ColumnRange(range) => Ok(range.set_rows(RowRange::all())),
            Self::Row(row) => Ok(RowRange::single(*row).set_columns(ColumnRange::all())),
            Self::RowRange(range) => Ok(range.set_columns(ColumnRange::all())),
            Self::Label(_) => Err(self.conversion("cell-range")),
        }
    }

    /// Number of cells, columns or rows selected.
    ///
    /// # Errors
    /// Fails for labels.
    pub fn count(&self) -> Result<u64> {
        match self {
            Self::Cell(_) | Self::Column(_) | Self::Row(_) => Ok(1),
            Self::CellRange(range) => Ok(range.count()),
            Self::ColumnRange(range) => Ok(u64::from(range.count())),
            Self::RowRange(range) => Ok(u64::from(range.count())),
            Self::Label(_) => Err(self.conversion("count")),
        }
    }

    /// # Errors
    /// Fails for labels.
    pub fn is_first(&self) -> Result<bool> {
        match self {
            Self::Cell(cell) => Ok(cell.is_first()),
            Self::CellRange(range) => Ok(range.is_first()),
            Self::Column(column) => Ok(column.is_first()),
            Self::ColumnRange(range) => Ok(range.is_first()),
            Self::Row(row) => Ok(row.is_first()),
            Self::RowRange(range) => Ok(range.is_first()),
            Self::Label(_) => Err(self.conversion("first")),
        }
    }

    /// # Errors
    /// Fails for labels.
    pub fn is_last(&self) -> Result<bool> {
        match self {
            Self::Cell(cell) => Ok(cell.is_last()),
            Self::CellRange(range) => Ok(range.is_last()),
            Self::Column(column) => Ok(column.is_last()),
            Self::ColumnRange(range) => Ok(range.is_last()),
            Self::Row(row) => Ok(row.is_last()),
            Self::RowRange(range) => Ok(range.is_last()),
            Self::Label(_) => Err(self.conversion("last")),
        }
    }

    /// A cell is hidden when its column or row is; ranges when every column
    /// or every row is.
    ///
    /// # Errors
    /// Fails for labels.
    pub fn is_hidden(
        &self,
        column_hidden: impl Fn(ColumnReference) -> bool,
        row_hidden: impl Fn(RowReference) -> bool,
    ) -> Result<bool> {
        match self {
            Self::Cell(cell) => Ok(column_hidden(cell.column()) || row_hidden(cell.row())),
            Self::CellRange(range) => Ok(range.is_hidden(column_hidden, row_hidden)),
            Self::Column(column) => Ok(column_hidden(*column)),
            Self::ColumnRange(range) => Ok(range.is_hidden(column_hidden)),
            Self::Row(row) => Ok(row_hidden(*row)),
            Self::RowRange(range) => Ok(range.is_hidden(row_hidden)),
            Self::Label(_) => Err(self.conversion("hidden")),
        }
    }

    /// Shift relative components, leaving absolute ones in place.
    #[must_use]
    pub fn add_if_relative(&self, column_delta: i64, row_delta: i64) -> Self {
        match self {
            Self::Cell(cell) => Self::Cell(cell.add_if_relative(column_delta, row_delta)),
            Self::CellRange(range) => {
                Self::CellRange(range.add_if_relative(column_delta, row_delta))
            }
            Self::Column(column) => Self::Column(column.add_if_relative(column_delta)),
            Self::ColumnRange(range) => Self::ColumnRange(range.add_if_relative(column_delta)),
            Self::Row(row) => Self::Row(row.add_if_relative(row_delta)),
            Self::RowRange(range) => Self::RowRange(range.add_if_relative(row_delta)),
            Self::Label(label) => Self::Label(label.clone()),
        }
    }

    /// Follow label chains to a concrete selection. Non-labels resolve to themselves.
    ///
    /// Returns `None` when a label in the chain has no target or the chain loops.
    pub fn resolve<L: LabelResolver + ?Sized>(&self, resolver: &L) -> Option<Self> {
        self.resolve_or_fail(resolver).ok()
    }

    /// Like [`Selection::resolve`] but reports which label failed.
    ///
    /// # Errors
    /// Returns [`XlnavError::LabelNotFound`] for a missing target and
    /// [`XlnavError::LabelCycle`] when a label is reached twice.
    pub fn resolve_or_fail<L: LabelResolver + ?Sized>(&self, resolver: &L) -> Result<Self> {
        let mut current = self.clone();
        let mut seen = HashSet::new();
        while let Self::Label(label) = current {
            if !seen.insert(label.clone()) {
                return Err(XlnavError::LabelCycle(label));
            }
            current = resolver
                .resolve_label(&label)
                .ok_or(XlnavError::LabelNotFound(label))?;
        }
        Ok(current)
    }

    fn priority(&self) -> u8 {
        match self {
            Self::Cell(_) | Self::CellRange(_) => 0,
            Self::Column(_) | Self::ColumnRange(_) => 1,
            Self::Row(_) | Self::RowRange(_) => 2,
            Self::Label(_) => 3,
        }
    }

    /// Order across every variant ignoring reference kinds.
    ///
    /// Cells and cell ranges sort first (row-major), then columns, then rows,
    /// then labels (case-insensitive). A scalar sorts like its single range.
    pub fn cmp_ignore_kind(&self, other: &Self) -> Ordering {
        let by_priority = self.priority().cmp(&other.priority());
        if by_priority != Ordering::Equal {
            return by_priority;
        }
        match (self, other) {
            (Self::Label(a), Self::Label(b)) => a.cmp(b),
            _ => match (self.to_cell_range(), other.to_cell_range()) {
                (Ok(a), Ok(b)) => a.cmp_ignore_kind(b),
                _ => Ordering::Equal,
            },
        }
    }

    pub fn eq_ignore_kind(&self, other: &Self) -> bool {
        self.cmp_ignore_kind(other) == Ordering::Equal
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell(cell) => cell.fmt(f),
            Self::CellRange(range) => range.fmt(f),
            Self::Column(column) => column.fmt(f),
            Self::ColumnRange(range) => range.fmt(f),
            Self::Row(row) => row.fmt(f),
            Self::RowRange(range) => range.fmt(f),
            Self::Label(label) => label.fmt(f),
        }
    }
}

impl From<CellReference> for Selection {
    fn from(cell: CellReference) -> Self {
        Self::Cell(cell)
    }
}

impl From<CellRange> for Selection {
    fn from(range: CellRange) -> Self {
        Self::CellRange(range)
    }
}

impl From<ColumnReference> for Selection {
    fn from(column: ColumnReference) -> Self {
        Self::Column(column)
    }
}

impl From<ColumnRange> for Selection {
    fn from(range: ColumnRange) -> Self {
        Self::ColumnRange(range)
    }
}

impl From<RowReference> for Selection {
    fn from(row: RowReference) -> Self {
        Self::Row(row)
    }
}

impl From<RowRange> for Selection {
    fn from(range: RowRange) -> Self {
        Self::RowRange(range)
    }
}

impl From<Label> for Selection {
    fn from(label: Label) -> Self {
        Self::Label(label)
    }
}
