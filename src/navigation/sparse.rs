//! Row-sliced iteration over the populated cells of a range.
//!
//! The backing map is borrowed, never copied, and must not change while the
//! iterator is alive (the borrow checker enforces this for plain maps).

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::ops::Bound;

use crate::types::{
    AxisReference, CellRange, CellReference, ColumnReference, RowMajorCell, RowReference,
};

/// Populated cells of `range` in row-major order.
///
/// Each row is a single key-range query on the map; rows without entries are
/// skipped by seeking to the next populated key, so the cost follows the
/// number of populated rows rather than the height of the range.
pub fn sparse_cells<V>(cells: &BTreeMap<RowMajorCell, V>, range: CellRange) -> SparseCells<'_, V> {
    SparseCells {
        cells,
        range,
        row: Some(range.begin().row()),
        current: None,
    }
}

#[derive(Debug)]
pub struct SparseCells<'a, V> {
    cells: &'a BTreeMap<RowMajorCell, V>,
    range: CellRange,
    row: Option<RowReference>,
    current: Option<btree_map::Range<'a, RowMajorCell, V>>,
}

impl<V> SparseCells<'_, V> {
    fn row_query(&self, row: RowReference) -> (Bound<RowMajorCell>, Bound<RowMajorCell>) {
        let begin = CellReference::new(self.range.begin().column(), row);
        let end_column = self.range.end().column();
        let upper = if !end_column.is_last() {
            Bound::Excluded(RowMajorCell(CellReference::new(end_column.add_saturated(1), row)))
        } else if !row.is_last() {
            // No column past the last one: bound by the start of the next row.
            Bound::Excluded(RowMajorCell(CellReference::new(
                ColumnReference::first(),
                row.add_saturated(1),
            )))
        } else {
            Bound::Unbounded
        };
        (Bound::Included(RowMajorCell(begin)), upper)
    }

    /// Next row at or below `after + 1` that holds a key in the column span.
    fn next_populated_row(&self, after: RowReference) -> Option<RowReference> {
        if after.value() >= self.range.end().row().value() {
            return None;
        }
        let seek = CellReference::new(self.range.begin().column(), after.add_saturated(1));
        let (key, _) = self.cells.range(RowMajorCell(seek)..).next()?;
        let row = key.0.row();
        (row.value() <= self.range.end().row().value()).then_some(row)
    }
}

impl<'a, V> Iterator for SparseCells<'a, V> {
    type Item = (CellReference, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if let Some((key, value)) = current.next() {
                    return Some((key.0, value));
                }
                self.current = None;
                let next_row = self.row.and_then(|row| self.next_populated_row(row));
                self.row = next_row;
            }
            let row = self.row?;
            let query = self.row_query(row);
            self.current = Some(self.cells.range(query));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn store(cells: &[&str]) -> BTreeMap<RowMajorCell, String> {
        cells
            .iter()
            .map(|text| (RowMajorCell(text.parse().unwrap()), (*text).to_string()))
            .collect()
    }

    fn visit(store: &BTreeMap<RowMajorCell, String>, range: &str) -> Vec<String> {
        sparse_cells(store, range.parse().unwrap())
            .map(|(cell, _)| cell.to_string())
            .collect()
    }

    #[test]
    fn test_row_major_only_populated() {
        let cells = store(&["A3", "C1", "A1"]);
        assert_eq!(visit(&cells, "A1:C3"), ["A1", "C1", "A3"]);
    }

    #[test]
    fn test_excludes_cells_outside_columns() {
        let cells = store(&["A1", "B1", "D1", "B2", "E2", "B9"]);
        assert_eq!(visit(&cells, "B1:D2"), ["B1", "D1", "B2"]);
    }

    #[test]
    fn test_last_column_edge() {
        let cells = store(&["XFD1", "A2", "XFC2", "XFD3"]);
        assert_eq!(visit(&cells, "XFC1:XFD2"), ["XFD1", "XFC2"]);
    }

    #[test]
    fn test_last_row_and_column() {
        let cells = store(&["XFD1048576", "A1048576", "XFD1048575"]);
        assert_eq!(
            visit(&cells, "XFD1048575:XFD1048576"),
            ["XFD1048575", "XFD1048576"]
        );
    }

    #[test]
    fn test_empty_store() {
        let cells = store(&[]);
        assert!(visit(&cells, "A1:Z100").is_empty());
    }
}
