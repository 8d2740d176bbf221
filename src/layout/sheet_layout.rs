//! In-memory sheet layout: sizes, hidden columns/rows, frozen panes and labels.
//!
//! Only overrides are stored. Every column/row without an entry takes the
//! configured default size, so a layout covers the full sheet domain without
//! materialising it.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::context::{ColumnRowGeometry, HiddenColumnsRows, ViewportWindows};
use super::viewport::{ViewportRectangle, Windows};
use crate::types::{
    AnchoredSelection, AxisRange, AxisReference, CellRange, ColumnRange, ColumnReference, Label,
    LabelResolver, RowRange, RowReference, Selection,
};

/// Default column width in pixels (Excel default ~64px at 100% zoom)
pub const DEFAULT_COLUMN_WIDTH: f64 = 64.0;

/// Default row height in pixels (Excel default ~20px at 100% zoom)
pub const DEFAULT_ROW_HEIGHT: f64 = 20.0;

/// Sheet-wide layout settings. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub default_column_width: f64,
    pub default_row_height: f64,
    /// Number of frozen columns (0 = none)
    pub frozen_columns: u32,
    /// Number of frozen rows (0 = none)
    pub frozen_rows: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_column_width: DEFAULT_COLUMN_WIDTH,
            default_row_height: DEFAULT_ROW_HEIGHT,
            frozen_columns: 0,
            frozen_rows: 0,
        }
    }
}

/// Concrete navigation context backed by sparse overrides.
///
/// Override keys are stored relative, so `$B` and `B` address the same column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SheetLayoutFields")]
pub struct SheetLayout {
    #[serde(flatten)]
    config: LayoutConfig,
    column_widths: BTreeMap<ColumnReference, f64>,
    row_heights: BTreeMap<RowReference, f64>,
    hidden_columns: BTreeSet<ColumnReference>,
    hidden_rows: BTreeSet<RowReference>,
    labels: HashMap<Label, Selection>,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SheetLayoutFields {
    #[serde(flatten)]
    config: LayoutConfig,
    column_widths: BTreeMap<ColumnReference, f64>,
    row_heights: BTreeMap<RowReference, f64>,
    hidden_columns: BTreeSet<ColumnReference>,
    hidden_rows: BTreeSet<RowReference>,
    labels: HashMap<Label, Selection>,
}

impl From<SheetLayoutFields> for SheetLayout {
    fn from(fields: SheetLayoutFields) -> Self {
        let mut layout = Self::new(fields.config);
        for (column, width) in fields.column_widths {
            layout.set_column_width(column, width);
        }
        for (row, height) in fields.row_heights {
            layout.set_row_height(row, height);
        }
        for column in fields.hidden_columns {
            layout.hide_column(column);
        }
        for row in fields.hidden_rows {
            layout.hide_row(row);
        }
        layout.labels = fields.labels;
        layout
    }
}

impl SheetLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn set_frozen(&mut self, frozen_columns: u32, frozen_rows: u32) {
        self.config.frozen_columns = frozen_columns;
        self.config.frozen_rows = frozen_rows;
    }

    /// Negative and NaN widths are stored as 0.
    pub fn set_column_width(&mut self, column: ColumnReference, width: f64) {
        self.column_widths
            .insert(column.to_relative(), width.max(0.0));
    }

    /// Negative and NaN heights are stored as 0.
    pub fn set_row_height(&mut self, row: RowReference, height: f64) {
        self.row_heights.insert(row.to_relative(), height.max(0.0));
    }

    pub fn hide_column(&mut self, column: ColumnReference) {
        self.hidden_columns.insert(column.to_relative());
    }

    pub fn show_column(&mut self, column: ColumnReference) {
        self.hidden_columns.remove(&column.to_relative());
    }

    pub fn hide_row(&mut self, row: RowReference) {
        self.hidden_rows.insert(row.to_relative());
    }

    pub fn show_row(&mut self, row: RowReference) {
        self.hidden_rows.remove(&row.to_relative());
    }

    /// Define or replace a label. Returns the previous target.
    pub fn define_label(&mut self, label: Label, target: Selection) -> Option<Selection> {
        self.labels.insert(label, target)
    }

    pub fn remove_label(&mut self, label: &Label) -> Option<Selection> {
        self.labels.remove(label)
    }

    pub fn labels(&self) -> &HashMap<Label, Selection> {
        &self.labels
    }

    fn frozen_columns(&self) -> Option<ColumnRange> {
        frozen_range(self.config.frozen_columns)
    }

    fn frozen_rows(&self) -> Option<RowRange> {
        frozen_range(self.config.frozen_rows)
    }

    /// Total width of frozen columns (0 if none)
    pub fn frozen_columns_width(&self) -> f64 {
        self.frozen_columns()
            .map_or(0.0, |columns| columns.iter().map(|c| self.column_width(c)).sum())
    }

    /// Total height of frozen rows (0 if none)
    pub fn frozen_rows_height(&self) -> f64 {
        self.frozen_rows()
            .map_or(0.0, |rows| rows.iter().map(|r| self.row_height(r)).sum())
    }

    /// Windows for `rectangle` as laid out from its own home.
    fn windows_at(&self, rectangle: &ViewportRectangle, include_frozen: bool) -> Windows {
        let frozen_columns = self.frozen_columns();
        let frozen_rows = self.frozen_rows();
        let home = rectangle.home();

        let column_start = first_scrollable(home.column(), frozen_columns);
        let row_start = first_scrollable(home.row(), frozen_rows);
        let columns = span(
            column_start,
            rectangle.width() - self.frozen_columns_width(),
            |c| self.column_width(c),
        );
        let rows = span(
            row_start,
            rectangle.height() - self.frozen_rows_height(),
            |r| self.row_height(r),
        );

        let mut ranges = vec![CellRange::from_ranges(columns, rows)];
        if include_frozen {
            if let Some(frozen) = frozen_rows {
                ranges.push(CellRange::from_ranges(columns, frozen));
            }
            if let Some(frozen) = frozen_columns {
                ranges.push(CellRange::from_ranges(frozen, rows));
            }
            if let (Some(frozen_columns), Some(frozen_rows)) = (frozen_columns, frozen_rows) {
                ranges.push(CellRange::from_ranges(frozen_columns, frozen_rows));
            }
        }
        Windows::new(ranges)
    }
}

/// The leading `count` columns/rows, if any.
fn frozen_range<R: AxisReference>(count: u32) -> Option<AxisRange<R>> {
    let first = R::first();
    (count > 0).then(|| AxisRange::new(first, first.add_saturated(i64::from(count) - 1)))
}

/// `home` pushed past the frozen panes.
fn first_scrollable<R: AxisReference>(home: R, frozen: Option<AxisRange<R>>) -> R {
    match frozen {
        Some(frozen) if home.value() <= frozen.end().value() && !frozen.end().is_last() => {
            frozen.end().add_saturated(1)
        }
        _ => home,
    }
}

/// References from `start` until `pixels` are covered, including a last
/// partially visible one. Always at least `start`.
fn span<R: AxisReference>(start: R, pixels: f64, size: impl Fn(R) -> f64) -> AxisRange<R> {
    let mut end = start;
    let mut covered = size(start);
    while covered < pixels && !end.is_last() {
        end = end.add_saturated(1);
        covered += size(end);
    }
    AxisRange::new(start, end)
}

impl HiddenColumnsRows for SheetLayout {
    fn is_column_hidden(&self, column: ColumnReference) -> bool {
        self.hidden_columns.contains(&column.to_relative())
    }

    fn is_row_hidden(&self, row: RowReference) -> bool {
        self.hidden_rows.contains(&row.to_relative())
    }
}

impl ColumnRowGeometry for SheetLayout {
    /// Column width (0 for hidden columns)
    fn column_width(&self, column: ColumnReference) -> f64 {
        if self.is_column_hidden(column) {
            return 0.0;
        }
        self.column_widths
            .get(&column.to_relative())
            .copied()
            .unwrap_or(self.config.default_column_width)
    }

    /// Row height (0 for hidden rows)
    fn row_height(&self, row: RowReference) -> f64 {
        if self.is_row_hidden(row) {
            return 0.0;
        }
        self.row_heights
            .get(&row.to_relative())
            .copied()
            .unwrap_or(self.config.default_row_height)
    }
}

impl LabelResolver for SheetLayout {
    fn resolve_label(&self, label: &Label) -> Option<Selection> {
        self.labels.resolve_label(label)
    }
}

impl ViewportWindows for SheetLayout {
    fn windows(
        &self,
        rectangle: &ViewportRectangle,
        include_frozen: bool,
        selection_hint: Option<&AnchoredSelection>,
    ) -> Windows {
        let windows = self.windows_at(rectangle, include_frozen);
        match selection_hint.and_then(AnchoredSelection::focus) {
            Some(focus) if !windows.test(&focus) => {
                self.windows_at(&rectangle.reveal(&focus), include_frozen)
            }
            _ => windows,
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::CellReference;

    fn rectangle(home: &str, width: f64, height: f64) -> ViewportRectangle {
        ViewportRectangle::new(home.parse().unwrap(), width, height)
    }

    fn ranges(windows: &Windows) -> Vec<String> {
        windows.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_default_sizes() {
        let layout = SheetLayout::default();
        assert_eq!(layout.column_width("C".parse().unwrap()), DEFAULT_COLUMN_WIDTH);
        assert_eq!(layout.row_height("7".parse().unwrap()), DEFAULT_ROW_HEIGHT);
        assert_eq!(layout.frozen_columns_width(), 0.0);
    }

    #[test]
    fn test_hidden_have_no_size() {
        let mut layout = SheetLayout::default();
        layout.set_column_width("B".parse().unwrap(), 100.0);
        layout.hide_column("$B".parse().unwrap());
        assert!(layout.is_column_hidden("B".parse().unwrap()));
        assert_eq!(layout.column_width("B".parse().unwrap()), 0.0);

        layout.show_column("B".parse().unwrap());
        assert_eq!(layout.column_width("B".parse().unwrap()), 100.0);
    }

    #[test]
    fn test_windows_cover_rectangle() {
        let layout = SheetLayout::default();
        // 200px / 64px = 3.1 columns, 100px / 20px = 5 rows
        let windows = layout.windows(&rectangle("B2", 200.0, 100.0), true, None);
        assert_eq!(ranges(&windows), ["B2:E6"]);
    }

    #[test]
    fn test_windows_with_frozen_panes() {
        let mut layout = SheetLayout::default();
        layout.set_frozen(1, 2);
        let windows = layout.windows(&rectangle("A1", 128.0, 80.0), true, None);
        assert_eq!(ranges(&windows), ["B3:B4", "B1:B2", "A3:A4", "A1:A2"]);

        let windows = layout.windows(&rectangle("A1", 128.0, 80.0), false, None);
        assert_eq!(ranges(&windows), ["B3:B4"]);
    }

    #[test]
    fn test_windows_follow_selection_hint() {
        let layout = SheetLayout::default();
        let hint: AnchoredSelection = "Z100".parse().unwrap();
        let windows = layout.windows(&rectangle("A1", 64.0, 20.0), false, Some(&hint));
        assert!(windows.test_cell(CellReference::from_values(25, 99).unwrap()));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let layout: SheetLayout = serde_json::from_str(
            r#"{"defaultColumnWidth": 80, "frozenRows": 1, "hiddenColumns": ["$C"], "columnWidths": {"B": 10}}"#,
        )
        .unwrap();
        assert_eq!(layout.config().default_column_width, 80.0);
        assert_eq!(layout.config().default_row_height, DEFAULT_ROW_HEIGHT);
        assert_eq!(layout.config().frozen_rows, 1);
        assert!(layout.is_column_hidden("C".parse().unwrap()));
        assert_eq!(layout.column_width("B".parse().unwrap()), 10.0);
    }

    #[test]
    fn test_labels_resolve() {
        let mut layout = SheetLayout::default();
        layout.define_label("Total".parse().unwrap(), "B2:C3".parse().unwrap());
        let resolved = layout.resolve_label(&"TOTAL".parse().unwrap());
        assert_eq!(resolved, Some("B2:C3".parse().unwrap()));
    }
}
