//! Anchor preserving extension: keyboard, pixel drag and shift-click.
//!
//! The anchor corner stays fixed and the opposite corner moves. When the
//! moving edge meets or crosses the fixed edge the anchor is re-derived for
//! that axis, so a single unit range always pins its left/top side.

use super::movement::{move_reference, move_reference_pixels, Direction};
use crate::error::Result;
use crate::layout::{ColumnRowGeometry, HiddenColumnsRows};
use crate::types::{
    Anchor, AnchoredSelection, AxisRange, AxisReference, CellRange, ColumnRange, ColumnReference,
    RowRange, RowReference, Selection,
};

/// Re-range from `fixed` to `moved` and report whether the fixed end is the
/// begin side.
fn rerange<R: AxisReference>(fixed: R, moved: R) -> (AxisRange<R>, bool) {
    (AxisRange::new(fixed, moved), moved.value() >= fixed.value())
}

fn anchored(selection: Selection, anchor: Anchor) -> AnchoredSelection {
    // Every anchor built here is declared for its variant.
    AnchoredSelection::new(selection.clone(), anchor)
        .unwrap_or_else(|_| selection.with_default_anchor())
}

/// Promote scalars to single unit ranges pinned at their begin side.
fn promote(anchored_selection: &AnchoredSelection) -> (Selection, Anchor) {
    match anchored_selection.selection() {
        Selection::Cell(cell) => (Selection::CellRange(cell.to_cell_range()), Anchor::TopLeft),
        Selection::Column(column) => (
            Selection::ColumnRange(ColumnRange::single(*column)),
            Anchor::Left,
        ),
        Selection::Row(row) => (Selection::RowRange(RowRange::single(*row)), Anchor::Top),
        other => (other.clone(), anchored_selection.anchor()),
    }
}

/// Shared extension walk. `move_column`/`move_row` advance the moving edge.
fn extend_with<H: HiddenColumnsRows + ?Sized>(
    current: &AnchoredSelection,
    direction: Direction,
    context: &H,
    move_column: impl Fn(ColumnReference) -> Result<Option<ColumnReference>>,
    move_row: impl Fn(RowReference) -> Result<Option<RowReference>>,
) -> Result<Option<AnchoredSelection>> {
    let horizontal = direction.is_horizontal();
    let (selection, anchor) = promote(current);

    let result = match selection {
        Selection::CellRange(range) if horizontal => {
            if range.row_range().is_hidden(|r| context.is_row_hidden(r)) {
                return Ok(Some(current.clone()));
            }
            let columns = range.column_range();
            let fixed = anchor.fixed_column(columns);
            let Some(moved) = move_column(anchor.moving_column(columns))? else {
                return Ok(None);
            };
            let (columns, pins_left) = rerange(fixed, moved);
            anchored(
                Selection::CellRange(CellRange::from_ranges(columns, range.row_range())),
                Anchor::corner(pins_left, !anchor.pins_bottom()),
            )
        }
        Selection::CellRange(range) => {
            if range.column_range().is_hidden(|c| context.is_column_hidden(c)) {
                return Ok(Some(current.clone()));
            }
            let rows = range.row_range();
            let fixed = anchor.fixed_row(rows);
            let Some(moved) = move_row(anchor.moving_row(rows))? else {
                return Ok(None);
            };
            let (rows, pins_top) = rerange(fixed, moved);
            anchored(
                Selection::CellRange(CellRange::from_ranges(range.column_range(), rows)),
                Anchor::corner(!anchor.pins_right(), pins_top),
            )
        }
        Selection::ColumnRange(columns) if horizontal => {
            let fixed = anchor.fixed_column(columns);
            let Some(moved) = move_column(anchor.moving_column(columns))? else {
                return Ok(None);
            };
            let (columns, pins_left) = rerange(fixed, moved);
            anchored(
                Selection::ColumnRange(columns),
                if pins_left { Anchor::Left } else { Anchor::Right },
            )
        }
        Selection::RowRange(rows) if !horizontal => {
            let fixed = anchor.fixed_row(rows);
            let Some(moved) = move_row(anchor.moving_row(rows))? else {
                return Ok(None);
            };
            let (rows, pins_top) = rerange(fixed, moved);
            anchored(
                Selection::RowRange(rows),
                if pins_top { Anchor::Top } else { Anchor::Bottom },
            )
        }
        _ => current.clone(),
    };
    Ok(Some(result))
}

/// Extend one visible column or row along `direction`.
///
/// Returns `None` when the moving edge is blocked by hidden columns/rows up
/// to the boundary. A cell range whose rows (for horizontal extension) or
/// columns (vertical) are all hidden is returned unchanged.
pub fn extend<H: HiddenColumnsRows + ?Sized>(
    current: &AnchoredSelection,
    direction: Direction,
    context: &H,
) -> Option<AnchoredSelection> {
    let step = direction.step();
    extend_with(
        current,
        direction,
        context,
        |c| Ok(move_reference(c, step, |c| context.is_column_hidden(c))),
        |r| Ok(move_reference(r, step, |r| context.is_row_hidden(r))),
    )
    .ok()
    .flatten()
}

/// Extend by a pixel distance along `direction`.
///
/// # Errors
/// Returns [`crate::XlnavError::NegativePixelBudget`].
pub fn extend_pixels<C: HiddenColumnsRows + ColumnRowGeometry + ?Sized>(
    current: &AnchoredSelection,
    direction: Direction,
    pixels: f64,
    context: &C,
) -> Result<Option<AnchoredSelection>> {
    let step = direction.step();
    extend_with(
        current,
        direction,
        context,
        |c| {
            move_reference_pixels(
                c,
                step,
                pixels,
                |c| context.is_column_hidden(c),
                |c| context.column_width(c),
            )
        },
        |r| {
            move_reference_pixels(
                r,
                step,
                pixels,
                |r| context.is_row_hidden(r),
                |r| context.row_height(r),
            )
        },
    )
}

/// Shift-click: span from the current fixed corner to `target`.
///
/// `target` must be a cell, column or row matching the current selection's
/// axis; anything else replaces the selection like a plain select.
pub fn extend_to(current: &AnchoredSelection, target: &Selection) -> AnchoredSelection {
    let anchor = current.anchor();
    match (current.selection(), target) {
        (Selection::Cell(_) | Selection::CellRange(_), Selection::Cell(clicked)) => {
            let fixed = match current.selection() {
                Selection::CellRange(range) => anchor.fixed_cell(*range),
                _ => match current.selection().to_cell() {
                    Ok(cell) => cell,
                    Err(_) => return target.clone().with_default_anchor(),
                },
            };
            let (columns, pins_left) = rerange(fixed.column(), clicked.column());
            let (rows, pins_top) = rerange(fixed.row(), clicked.row());
            anchored(
                Selection::CellRange(CellRange::from_ranges(columns, rows)),
                Anchor::corner(pins_left, pins_top),
            )
        }
        (Selection::Column(fixed), Selection::Column(clicked)) => {
            extend_columns_to(*fixed, *clicked)
        }
        (Selection::ColumnRange(range), Selection::Column(clicked)) => {
            extend_columns_to(anchor.fixed_column(*range), *clicked)
        }
        (Selection::Row(fixed), Selection::Row(clicked)) => extend_rows_to(*fixed, *clicked),
        (Selection::RowRange(range), Selection::Row(clicked)) => {
            extend_rows_to(anchor.fixed_row(*range), *clicked)
        }
        _ => target.clone().with_default_anchor(),
    }
}

fn extend_columns_to(fixed: ColumnReference, clicked: ColumnReference) -> AnchoredSelection {
    let (columns, pins_left) = rerange(fixed, clicked);
    anchored(
        Selection::ColumnRange(columns),
        if pins_left { Anchor::Left } else { Anchor::Right },
    )
}

fn extend_rows_to(fixed: RowReference, clicked: RowReference) -> AnchoredSelection {
    let (rows, pins_top) = rerange(fixed, clicked);
    anchored(
        Selection::RowRange(rows),
        if pins_top { Anchor::Top } else { Anchor::Bottom },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Default)]
    struct Hidden {
        columns: HashSet<u32>,
        rows: HashSet<u32>,
    }

    impl HiddenColumnsRows for Hidden {
        fn is_column_hidden(&self, column: ColumnReference) -> bool {
            self.columns.contains(&column.value())
        }

        fn is_row_hidden(&self, row: RowReference) -> bool {
            self.rows.contains(&row.value())
        }
    }

    impl ColumnRowGeometry for Hidden {
        fn column_width(&self, _column: ColumnReference) -> f64 {
            10.0
        }

        fn row_height(&self, _row: RowReference) -> f64 {
            10.0
        }
    }

    fn anchored_text(text: &str) -> AnchoredSelection {
        text.parse().unwrap()
    }

    #[test]
    fn test_extend_row_range_down_keeps_top() {
        let extended = extend(
            &anchored_text("2:4 top"),
            Direction::Down,
            &Hidden::default(),
        )
        .unwrap();
        assert_eq!(extended.to_string(), "2:5 top");
    }

    #[test]
    fn test_extend_column_range_left_anchored_right() {
        let extended = extend(
            &anchored_text("B:D right"),
            Direction::Left,
            &Hidden::default(),
        )
        .unwrap();
        assert_eq!(extended.to_string(), "A:D right");
    }

    #[test]
    fn test_extend_collapse_flips_anchor() {
        let extended = extend(
            &anchored_text("B:C right"),
            Direction::Right,
            &Hidden::default(),
        )
        .unwrap();
        assert_eq!(extended.to_string(), "C left");
        assert_eq!(extended.anchor(), Anchor::Left);
    }

    #[test]
    fn test_extend_cell_promotes() {
        let extended = extend(&anchored_text("B2"), Direction::Up, &Hidden::default()).unwrap();
        assert_eq!(extended.to_string(), "B1:B2 bottom-left");
    }

    #[test]
    fn test_extend_skips_hidden_columns() {
        let hidden = Hidden {
            columns: [2, 3].into_iter().collect(),
            ..Hidden::default()
        };
        let extended = extend(&anchored_text("A1:B2 top-left"), Direction::Right, &hidden).unwrap();
        assert_eq!(extended.to_string(), "A1:E2 top-left");
    }

    #[test]
    fn test_extend_hidden_orthogonal_is_noop() {
        let hidden = Hidden {
            rows: [0, 1].into_iter().collect(),
            ..Hidden::default()
        };
        let current = anchored_text("A1:B2 top-left");
        assert_eq!(extend(&current, Direction::Right, &hidden), Some(current));
    }

    #[test]
    fn test_extend_pixels() {
        let extended = extend_pixels(
            &anchored_text("A1:B2 top-left"),
            Direction::Down,
            25.0,
            &Hidden::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(extended.to_string(), "A1:B5 top-left");
    }

    #[test]
    fn test_extend_to_click() {
        let extended = extend_to(
            &anchored_text("C3:D4 top-left"),
            &"A1".parse::<Selection>().unwrap(),
        );
        assert_eq!(extended.to_string(), "A1:C3 bottom-right");

        let columns = extend_to(&anchored_text("C"), &"F".parse::<Selection>().unwrap());
        assert_eq!(columns.to_string(), "C:F left");
    }
}
