//! Interfaces the navigation engine consults but does not own.

use super::{ViewportRectangle, Windows};
use crate::types::{AnchoredSelection, ColumnReference, LabelResolver, RowReference};

/// Hidden column and row lookups.
pub trait HiddenColumnsRows {
    fn is_column_hidden(&self, column: ColumnReference) -> bool;
    fn is_row_hidden(&self, row: RowReference) -> bool;
}

/// Column widths and row heights in pixels.
pub trait ColumnRowGeometry {
    fn column_width(&self, column: ColumnReference) -> f64;
    fn row_height(&self, row: RowReference) -> f64;
}

/// Visible cell ranges for a viewport rectangle.
pub trait ViewportWindows {
    /// Windows covering `rectangle`, plus the frozen panes when
    /// `include_frozen` is set. A `selection_hint` whose focus falls outside
    /// the result moves the windows onto it.
    fn windows(
        &self,
        rectangle: &ViewportRectangle,
        include_frozen: bool,
        selection_hint: Option<&AnchoredSelection>,
    ) -> Windows;
}

/// Everything [`super::Viewport::apply`] needs.
pub trait NavigationContext:
    HiddenColumnsRows + ColumnRowGeometry + ViewportWindows + LabelResolver
{
}

impl<T> NavigationContext for T where
    T: HiddenColumnsRows + ColumnRowGeometry + ViewportWindows + LabelResolver + ?Sized
{
}
