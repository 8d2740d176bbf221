//! Single step and pixel distance movement with hidden column/row skipping.

use crate::error::{Result, XlnavError};
use crate::layout::{ColumnRowGeometry, HiddenColumnsRows};
use crate::types::{AnchoredSelection, AxisReference, CellReference, Selection};

/// Direction of a keyboard or pixel command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// `-1` towards the first column/row, `+1` towards the last.
    pub fn step(self) -> i64 {
        match self {
            Self::Left | Self::Up => -1,
            Self::Right | Self::Down => 1,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Move one step, skipping hidden references.
///
/// Returns `None` when every candidate up to the boundary is hidden, or when
/// `start` already sits on the boundary and is hidden.
pub fn move_reference<R: AxisReference>(
    start: R,
    step: i64,
    hidden: impl Fn(R) -> bool,
) -> Option<R> {
    if start.is_boundary(step) {
        return (!hidden(start)).then_some(start);
    }
    let mut next = start.add_saturated(step);
    while hidden(next) && !next.is_boundary(step) {
        next = next.add_saturated(step);
    }
    (!hidden(next)).then_some(next)
}

/// Move until `pixels` worth of visible columns/rows have been passed.
///
/// Hidden references consume no budget. Any budget, 0 included, passes at
/// least the next visible reference. The result is the last visible
/// reference reached, never a hidden one; `None` when nothing visible was
/// reached and `start` itself is hidden.
///
/// # Errors
/// Returns [`XlnavError::NegativePixelBudget`] for negative or NaN budgets.
pub fn move_reference_pixels<R: AxisReference>(
    start: R,
    step: i64,
    pixels: f64,
    hidden: impl Fn(R) -> bool,
    size: impl Fn(R) -> f64,
) -> Result<Option<R>> {
    if pixels.is_nan() || pixels < 0.0 {
        return Err(XlnavError::NegativePixelBudget(pixels));
    }

    let mut moved = start;
    let mut last_visible = start;
    let mut budget = pixels;
    while !moved.is_boundary(step) {
        moved = moved.add_saturated(step);
        if hidden(moved) {
            continue;
        }
        last_visible = moved;
        budget -= size(moved);
        if budget < 0.0 {
            break;
        }
    }
    Ok((!hidden(last_visible)).then_some(last_visible))
}

/// Move a cell one step along `direction`, holding the other axis.
pub fn move_cell<H: HiddenColumnsRows + ?Sized>(
    cell: CellReference,
    direction: Direction,
    context: &H,
) -> Option<CellReference> {
    let step = direction.step();
    if direction.is_horizontal() {
        move_reference(cell.column(), step, |c| context.is_column_hidden(c))
            .map(|column| cell.set_column(column))
    } else {
        move_reference(cell.row(), step, |r| context.is_row_hidden(r)).map(|row| cell.set_row(row))
    }
}

/// Move a cell by a pixel distance along `direction`.
///
/// # Errors
/// Returns [`XlnavError::NegativePixelBudget`].
pub fn move_cell_pixels<C: HiddenColumnsRows + ColumnRowGeometry + ?Sized>(
    cell: CellReference,
    direction: Direction,
    pixels: f64,
    context: &C,
) -> Result<Option<CellReference>> {
    let step = direction.step();
    if direction.is_horizontal() {
        Ok(move_reference_pixels(
            cell.column(),
            step,
            pixels,
            |c| context.is_column_hidden(c),
            |c| context.column_width(c),
        )?
        .map(|column| cell.set_column(column)))
    } else {
        Ok(move_reference_pixels(
            cell.row(),
            step,
            pixels,
            |r| context.is_row_hidden(r),
            |r| context.row_height(r),
        )?
        .map(|row| cell.set_row(row)))
    }
}

/// Keyboard movement of a whole selection.
///
/// Ranges collapse onto their moving corner or edge first, so the result is
/// always a scalar. Columns ignore vertical steps and rows horizontal ones.
/// Labels must be resolved by the caller and are returned unchanged.
pub fn move_selection<H: HiddenColumnsRows + ?Sized>(
    anchored: &AnchoredSelection,
    direction: Direction,
    context: &H,
) -> Option<AnchoredSelection> {
    let step = direction.step();
    let moved = match anchored.focus() {
        Some(Selection::Cell(cell)) => Selection::Cell(move_cell(cell, direction, context)?),
        Some(Selection::Column(column)) if direction.is_horizontal() => Selection::Column(
            move_reference(column, step, |c| context.is_column_hidden(c))?,
        ),
        Some(Selection::Row(row)) if !direction.is_horizontal() => {
            Selection::Row(move_reference(row, step, |r| context.is_row_hidden(r))?)
        }
        Some(scalar) => scalar,
        None => return Some(anchored.clone()),
    };
    Some(moved.with_default_anchor())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::{ColumnReference, RowReference};

    fn column(text: &str) -> ColumnReference {
        text.parse().unwrap()
    }

    #[test]
    fn test_move_skips_hidden() {
        let hidden = |c: ColumnReference| c.value() == 1 || c.value() == 2;
        assert_eq!(move_reference(column("A"), 1, hidden), Some(column("D")));
        assert_eq!(move_reference(column("D"), -1, hidden), Some(column("A")));
    }

    #[test]
    fn test_move_all_hidden_to_boundary() {
        let hidden = |c: ColumnReference| c.value() >= 1;
        assert_eq!(move_reference(column("A"), 1, hidden), None);
    }

    #[test]
    fn test_move_at_boundary() {
        assert_eq!(
            move_reference(ColumnReference::first(), -1, |_| false),
            Some(ColumnReference::first())
        );
        assert_eq!(move_reference(ColumnReference::first(), -1, |_| true), None);
    }

    #[test]
    fn test_move_pixels_budget() {
        // 10 px columns: 25 px passes B and C and stops on D.
        let moved =
            move_reference_pixels(column("A"), 1, 25.0, |_| false, |_: ColumnReference| 10.0)
                .unwrap();
        assert_eq!(moved, Some(column("D")));
    }

    #[test]
    fn test_move_pixels_small_budget_advances_one() {
        for pixels in [0.0, 0.001, 9.999] {
            let moved =
                move_reference_pixels(column("A"), 1, pixels, |_| false, |_: ColumnReference| 10.0)
                    .unwrap();
            assert_eq!(moved, Some(column("B")), "{pixels}");
        }
        let hidden = |c: ColumnReference| c.value() == 1;
        let moved =
            move_reference_pixels(column("A"), 1, 0.0, hidden, |_: ColumnReference| 10.0).unwrap();
        assert_eq!(moved, Some(column("C")));
    }

    #[test]
    fn test_move_pixels_zero_at_boundary_stays() {
        let moved =
            move_reference_pixels(column("XFD"), 1, 0.0, |_| false, |_: ColumnReference| 10.0)
                .unwrap();
        assert_eq!(moved, Some(column("XFD")));
    }

    #[test]
    fn test_move_pixels_hidden_consume_nothing() {
        let hidden = |c: ColumnReference| c.value() == 1;
        let moved =
            move_reference_pixels(column("A"), 1, 15.0, hidden, |_: ColumnReference| 10.0)
                .unwrap();
        assert_eq!(moved, Some(column("D")));
    }

    #[test]
    fn test_move_pixels_rejects_negative() {
        let result = move_reference_pixels(
            RowReference::first(),
            1,
            -1.0,
            |_| false,
            |_: RowReference| 20.0,
        );
        assert!(matches!(result, Err(XlnavError::NegativePixelBudget(_))));
    }

    #[test]
    fn test_move_pixels_hidden_start_at_boundary() {
        let moved = move_reference_pixels(
            RowReference::first(),
            -1,
            100.0,
            |_| true,
            |_: RowReference| 20.0,
        )
        .unwrap();
        assert_eq!(moved, None);
    }
}
