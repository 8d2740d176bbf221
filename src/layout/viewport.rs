//! Viewport state and the navigation state machine.
//!
//! A [`Viewport`] is a value: [`Viewport::apply`] never mutates, it returns
//! the complete next state.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::context::NavigationContext;
use crate::error::{Result, XlnavError};
use crate::navigation::{
    extend, extend_pixels, extend_to, move_cell, move_cell_pixels, move_selection, Direction,
    Navigation,
};
use crate::types::{
    AnchoredSelection, CellRange, CellReference, ColumnReference, RowReference, Selection,
};

/// The visible rectangle: its top-left home cell and pixel size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RectangleFields")]
pub struct ViewportRectangle {
    home: CellReference,
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
struct RectangleFields {
    #[serde(default = "CellReference::home")]
    home: CellReference,
    width: f64,
    height: f64,
}

impl From<RectangleFields> for ViewportRectangle {
    fn from(fields: RectangleFields) -> Self {
        Self::new(fields.home, fields.width, fields.height)
    }
}

impl Default for ViewportRectangle {
    fn default() -> Self {
        Self::new(CellReference::home(), 800.0, 600.0)
    }
}

impl ViewportRectangle {
    /// `home` is stored relative; negative or NaN sizes become 0.
    pub fn new(home: CellReference, width: f64, height: f64) -> Self {
        Self {
            home: home.to_relative(),
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn home(&self) -> CellReference {
        self.home
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn with_home(&self, home: CellReference) -> Self {
        Self::new(home, self.width, self.height)
    }

    pub fn resize(&self, width: f64, height: f64) -> Self {
        Self::new(self.home, width, height)
    }

    /// Rectangle moved so `focus` becomes its home on the focus axes.
    pub fn reveal(&self, focus: &Selection) -> Self {
        let home = match focus {
            Selection::Cell(cell) => *cell,
            Selection::Column(column) => self.home.set_column(*column),
            Selection::Row(row) => self.home.set_row(*row),
            _ => self.home,
        };
        self.with_home(home)
    }
}

/// Visible cell ranges of a viewport, main window first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Windows {
    ranges: Vec<CellRange>,
}

impl Windows {
    pub fn new(ranges: Vec<CellRange>) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> &[CellRange] {
        &self.ranges
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellRange> {
        self.ranges.iter()
    }

    pub fn test_cell(&self, cell: CellReference) -> bool {
        self.ranges.iter().any(|range| range.test_cell(cell))
    }

    pub fn test_column(&self, column: ColumnReference) -> bool {
        self.ranges.iter().any(|range| range.test_column(column))
    }

    pub fn test_row(&self, row: RowReference) -> bool {
        self.ranges.iter().any(|range| range.test_row(row))
    }

    /// True when any part of `selection` is visible. Labels are never visible
    /// until resolved.
    pub fn test(&self, selection: &Selection) -> bool {
        match selection {
            Selection::Cell(cell) => self.test_cell(*cell),
            Selection::CellRange(range) => self.ranges.iter().any(|w| w.test_cell_range(*range)),
            Selection::Column(column) => self.test_column(*column),
            Selection::ColumnRange(columns) => self
                .ranges
                .iter()
                .any(|w| w.column_range().test_range(*columns)),
            Selection::Row(row) => self.test_row(*row),
            Selection::RowRange(rows) => {
                self.ranges.iter().any(|w| w.row_range().test_range(*rows))
            }
            Selection::Label(_) => false,
        }
    }
}

/// Viewport rectangle, current selection and pending navigation queue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    rectangle: ViewportRectangle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    anchored_selection: Option<AnchoredSelection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    navigations: Vec<Navigation>,
}

impl Viewport {
    pub fn new(
        rectangle: ViewportRectangle,
        anchored_selection: Option<AnchoredSelection>,
    ) -> Self {
        Self {
            rectangle,
            anchored_selection,
            navigations: Vec::new(),
        }
    }

    pub fn rectangle(&self) -> &ViewportRectangle {
        &self.rectangle
    }

    pub fn anchored_selection(&self) -> Option<&AnchoredSelection> {
        self.anchored_selection.as_ref()
    }

    pub fn navigations(&self) -> &[Navigation] {
        &self.navigations
    }

    pub fn resize(&self, width: f64, height: f64) -> Self {
        Self {
            rectangle: self.rectangle.resize(width, height),
            ..self.clone()
        }
    }

    fn with_state(
        &self,
        rectangle: ViewportRectangle,
        anchored_selection: Option<AnchoredSelection>,
    ) -> Self {
        Self {
            rectangle,
            anchored_selection,
            navigations: self.navigations.clone(),
        }
    }

    /// Queue a command for [`Viewport::apply_pending`]. Select commands
    /// discard whatever was queued before them.
    pub fn push_navigation(&mut self, navigation: Navigation) {
        if navigation.is_select() {
            self.navigations.clear();
        }
        self.navigations.push(navigation);
    }

    /// Apply and drain the queued commands in order.
    ///
    /// # Errors
    /// Propagates the first failing command's error; nothing is applied then.
    pub fn apply_pending<C: NavigationContext + ?Sized>(&self, context: &C) -> Result<Self> {
        let mut viewport = Self {
            navigations: Vec::new(),
            ..self.clone()
        };
        for navigation in &self.navigations {
            viewport = viewport.apply(navigation, context)?;
        }
        Ok(viewport)
    }

    /// Windows around the current selection, frozen panes included.
    pub fn windows<C: NavigationContext + ?Sized>(&self, context: &C) -> Windows {
        context.windows(&self.rectangle, true, self.anchored_selection.as_ref())
    }

    /// Whether the current selection's focus is inside the windows.
    ///
    /// # Errors
    /// Returns label resolution errors.
    pub fn is_selection_visible<C: NavigationContext + ?Sized>(&self, context: &C) -> Result<bool> {
        let Some(current) = self.resolved_selection(context)? else {
            return Ok(false);
        };
        Ok(self.is_focus_visible(&current, context))
    }

    /// Apply one command and return the next state.
    ///
    /// # Errors
    /// Returns [`crate::XlnavError::LabelNotFound`] when the selection is an
    /// unknown label and [`crate::XlnavError::NegativePixelBudget`] for
    /// negative pixel commands.
    pub fn apply<C: NavigationContext + ?Sized>(
        &self,
        navigation: &Navigation,
        context: &C,
    ) -> Result<Self> {
        let next = match navigation {
            Navigation::Select(anchored) => {
                let next = self.reveal(anchored.clone(), context)?;
                Self {
                    navigations: Vec::new(),
                    ..next
                }
            }
            Navigation::Extend(target) => {
                let extended = match self.resolved_selection(context)? {
                    Some(current) => extend_to(&current, target),
                    None => target.clone().with_default_anchor(),
                };
                self.reveal(extended, context)?
            }
            Navigation::LeftPixel(pixels)
            | Navigation::RightPixel(pixels)
            | Navigation::UpPixel(pixels)
            | Navigation::DownPixel(pixels) => {
                let direction = direction_of(navigation)?;
                self.scroll(direction, *pixels, context)?
            }
            Navigation::LeftColumn
            | Navigation::RightColumn
            | Navigation::UpRow
            | Navigation::DownRow => {
                let direction = direction_of(navigation)?;
                self.step(
                    context,
                    |current| Ok(move_selection(current, direction, context)),
                    |home| Ok(move_cell(home, direction, context)),
                )?
            }
            Navigation::ExtendLeftColumn
            | Navigation::ExtendRightColumn
            | Navigation::ExtendUpRow
            | Navigation::ExtendDownRow => {
                let direction = direction_of(navigation)?;
                self.step(
                    context,
                    |current| Ok(extend(current, direction, context)),
                    |home| Ok(move_cell(home, direction, context)),
                )?
            }
            Navigation::ExtendLeftPixel(pixels)
            | Navigation::ExtendRightPixel(pixels)
            | Navigation::ExtendUpPixel(pixels)
            | Navigation::ExtendDownPixel(pixels) => {
                let direction = direction_of(navigation)?;
                self.step(
                    context,
                    |current| extend_pixels(current, direction, *pixels, context),
                    |home| move_cell_pixels(home, direction, *pixels, context),
                )?
            }
        };

        debug!(
            navigation = %navigation,
            home = %next.rectangle.home,
            selection = ?next.anchored_selection.as_ref().map(ToString::to_string),
            "applied navigation"
        );
        Ok(next)
    }

    /// Labels are resolved against the context before any geometry.
    fn resolved_selection<C: NavigationContext + ?Sized>(
        &self,
        context: &C,
    ) -> Result<Option<AnchoredSelection>> {
        self.anchored_selection
            .as_ref()
            .map(|anchored| anchored.resolve(context))
            .transpose()
    }

    fn is_focus_visible<C: NavigationContext + ?Sized>(
        &self,
        anchored: &AnchoredSelection,
        context: &C,
    ) -> bool {
        match anchored.focus() {
            Some(focus) => context.windows(&self.rectangle, true, None).test(&focus),
            None => true,
        }
    }

    /// Replace the selection, moving home onto its focus when it is not
    /// visible. The stored selection keeps its label, if any.
    fn reveal<C: NavigationContext + ?Sized>(
        &self,
        anchored: AnchoredSelection,
        context: &C,
    ) -> Result<Self> {
        let resolved = anchored.resolve(context)?;
        let rectangle = match resolved.focus() {
            Some(focus) if !self.is_focus_visible(&resolved, context) => {
                trace!(focus = %focus, "moving home onto selection");
                self.rectangle.reveal(&focus)
            }
            _ => self.rectangle.clone(),
        };
        Ok(self.with_state(rectangle, Some(anchored)))
    }

    /// Scroll: relocate home only. The selection is kept even when it
    /// leaves the windows.
    fn scroll<C: NavigationContext + ?Sized>(
        &self,
        direction: Direction,
        pixels: f64,
        context: &C,
    ) -> Result<Self> {
        let rectangle = match move_cell_pixels(self.rectangle.home, direction, pixels, context)? {
            Some(home) => self.rectangle.with_home(home),
            None => {
                trace!(home = %self.rectangle.home, "scroll blocked by hidden boundary");
                self.rectangle.clone()
            }
        };
        let next = self.with_state(rectangle, self.anchored_selection.clone());
        if let Some(current) = next.resolved_selection(context)? {
            trace!(
                visible = next.is_focus_visible(&current, context),
                "selection after scroll"
            );
        }
        Ok(next)
    }

    /// Keyboard and drag commands: change the selection, then relocate home
    /// by the same step when its focus left the windows.
    fn step<C: NavigationContext + ?Sized>(
        &self,
        context: &C,
        change: impl Fn(&AnchoredSelection) -> Result<Option<AnchoredSelection>>,
        move_home: impl Fn(CellReference) -> Result<Option<CellReference>>,
    ) -> Result<Self> {
        let Some(current) = self.resolved_selection(context)? else {
            let rectangle = match move_home(self.rectangle.home)? {
                Some(home) => self.rectangle.with_home(home),
                None => self.rectangle.clone(),
            };
            return Ok(self.with_state(rectangle, None));
        };

        let Some(next) = change(&current)? else {
            trace!(selection = %current, "movement blocked, clearing selection");
            return Ok(self.with_state(self.rectangle.clone(), None));
        };

        if self.is_focus_visible(&next, context) {
            return Ok(self.with_state(self.rectangle.clone(), Some(next)));
        }

        match move_home(self.rectangle.home)? {
            Some(home) => {
                trace!(from = %self.rectangle.home, to = %home, "relocating home");
                Ok(self.with_state(self.rectangle.with_home(home), Some(next)))
            }
            None => {
                trace!(home = %self.rectangle.home, "home relocation blocked, clearing selection");
                Ok(self.with_state(self.rectangle.clone(), None))
            }
        }
    }
}

fn direction_of(navigation: &Navigation) -> Result<Direction> {
    navigation
        .direction()
        .ok_or_else(|| XlnavError::InvalidNavigation(navigation.to_string()))
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
    use crate::layout::SheetLayout;

    fn viewport(home: &str, selection: Option<&str>) -> Viewport {
        Viewport::new(
            ViewportRectangle::new(home.parse().unwrap(), 640.0, 200.0),
            selection.map(|text| text.parse().unwrap()),
        )
    }

    fn run(viewport: &Viewport, layout: &SheetLayout, command: &str) -> Viewport {
        viewport.apply(&command.parse().unwrap(), layout).unwrap()
    }

    fn selection_text(viewport: &Viewport) -> Option<String> {
        viewport.anchored_selection().map(ToString::to_string)
    }

    #[test]
    fn test_move_inside_windows_keeps_home() {
        let layout = SheetLayout::default();
        let next = run(&viewport("A1", Some("B2")), &layout, "right-column");
        assert_eq!(selection_text(&next).as_deref(), Some("C2"));
        assert_eq!(next.rectangle().home().to_string(), "A1");
    }

    #[test]
    fn test_move_out_of_windows_relocates_home() {
        let layout = SheetLayout::default();
        // 200px / 20px: rows 1..10 visible.
        let next = run(&viewport("A1", Some("A10")), &layout, "down-row");
        assert_eq!(selection_text(&next).as_deref(), Some("A11"));
        assert_eq!(next.rectangle().home().to_string(), "A2");
    }

    #[test]
    fn test_blocked_move_clears_selection() {
        let mut layout = SheetLayout::default();
        layout.hide_column("A".parse().unwrap());
        let next = run(&viewport("A1", Some("A1")), &layout, "left-column");
        assert_eq!(next.anchored_selection(), None);
    }

    #[test]
    fn test_move_without_selection_moves_home() {
        let layout = SheetLayout::default();
        let next = run(&viewport("C3", None), &layout, "up-row");
        assert_eq!(next.rectangle().home().to_string(), "C2");
        assert_eq!(next.anchored_selection(), None);
    }

    #[test]
    fn test_scroll_keeps_selection() {
        let layout = SheetLayout::default();
        let next = run(&viewport("A1", Some("B2")), &layout, "down-pixel 30");
        assert_eq!(selection_text(&next).as_deref(), Some("B2"));
        assert_eq!(next.rectangle().home().to_string(), "A3");
        assert!(!next.is_selection_visible(&layout).unwrap());
    }

    #[test]
    fn test_select_reveals_focus_and_clears_queue() {
        let layout = SheetLayout::default();
        let mut current = viewport("A1", Some("A1"));
        current.push_navigation(Navigation::DownRow);
        let next = run(&current, &layout, "select-cell $Z$50");
        assert_eq!(selection_text(&next).as_deref(), Some("$Z$50"));
        assert_eq!(next.rectangle().home().to_string(), "Z50");
        assert!(next.navigations().is_empty());
    }

    #[test]
    fn test_push_select_drops_history() {
        let mut current = viewport("A1", None);
        current.push_navigation(Navigation::DownRow);
        current.push_navigation(Navigation::RightColumn);
        current.push_navigation("select-cell C3".parse().unwrap());
        current.push_navigation(Navigation::ExtendRightColumn);
        assert_eq!(current.navigations().len(), 2);

        let next = current.apply_pending(&SheetLayout::default()).unwrap();
        assert_eq!(selection_text(&next).as_deref(), Some("C3:D3 top-left"));
        assert!(next.navigations().is_empty());
    }

    #[test]
    fn test_extend_from_label() {
        let mut layout = SheetLayout::default();
        layout.define_label("Block".parse().unwrap(), "B2:C3".parse().unwrap());
        let next = run(&viewport("A1", Some("Block")), &layout, "extend-down-row");
        assert_eq!(selection_text(&next).as_deref(), Some("B2:C4 top-left"));
    }

    #[test]
    fn test_unknown_label_is_an_error() {
        let layout = SheetLayout::default();
        let result = viewport("A1", Some("Missing")).apply(&Navigation::DownRow, &layout);
        assert!(matches!(result, Err(XlnavError::LabelNotFound(_))));
    }

    #[test]
    fn test_rectangle_home_is_relative() {
        let rectangle: ViewportRectangle =
            serde_json::from_str(r#"{"home":"$B$2","width":100,"height":50}"#).unwrap();
        assert_eq!(rectangle.home().to_string(), "B2");
    }
}
