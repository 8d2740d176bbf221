//! Anchors and anchored selections.
//!
//! The anchor names the corner or edge of a range that stays put while the
//! opposite one moves during extension.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{
    AxisRange, AxisReference, CellRange, CellReference, ColumnReference, Label, LabelResolver,
    RowReference, Selection,
};
use crate::error::{Result, XlnavError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    #[default]
    None,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

const SCALAR_ANCHORS: &[Anchor] = &[Anchor::None];
const CELL_RANGE_ANCHORS: &[Anchor] = &[
    Anchor::TopLeft,
    Anchor::TopRight,
    Anchor::BottomLeft,
    Anchor::BottomRight,
];
const COLUMN_RANGE_ANCHORS: &[Anchor] = &[Anchor::Left, Anchor::Right];
const ROW_RANGE_ANCHORS: &[Anchor] = &[Anchor::Top, Anchor::Bottom];
const ALL_ANCHORS: &[Anchor] = &[
    Anchor::None,
    Anchor::TopLeft,
    Anchor::TopRight,
    Anchor::BottomLeft,
    Anchor::BottomRight,
    Anchor::Top,
    Anchor::Bottom,
    Anchor::Left,
    Anchor::Right,
];

impl Anchor {
    pub fn is_none(&self) -> bool {
        *self == Self::None
    }

    /// Flip to the opposite corner or edge. `None` stays `None`.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
            Self::BottomLeft => Self::TopRight,
            Self::BottomRight => Self::TopLeft,
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Corner pinning the given sides.
    pub fn corner(pins_left: bool, pins_top: bool) -> Self {
        match (pins_left, pins_top) {
            (true, true) => Self::TopLeft,
            (false, true) => Self::TopRight,
            (true, false) => Self::BottomLeft,
            (false, false) => Self::BottomRight,
        }
    }

    /// True when the anchor pins the right edge rather than the left.
    pub fn pins_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight | Self::Right)
    }

    /// True when the anchor pins the bottom edge rather than the top.
    pub fn pins_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight | Self::Bottom)
    }

    fn fixed<R: AxisReference>(range: AxisRange<R>, pins_end: bool) -> R {
        if pins_end {
            range.end()
        } else {
            range.begin()
        }
    }

    /// Column that stays put.
    pub fn fixed_column(self, range: AxisRange<ColumnReference>) -> ColumnReference {
        Self::fixed(range, self.pins_right())
    }

    /// Column that moves.
    pub fn moving_column(self, range: AxisRange<ColumnReference>) -> ColumnReference {
        Self::fixed(range, !self.pins_right())
    }

    pub fn fixed_row(self, range: AxisRange<RowReference>) -> RowReference {
        Self::fixed(range, self.pins_bottom())
    }

    pub fn moving_row(self, range: AxisRange<RowReference>) -> RowReference {
        Self::fixed(range, !self.pins_bottom())
    }

    /// Corner pinned by the anchor.
    pub fn fixed_cell(self, range: CellRange) -> CellReference {
        CellReference::new(
            self.fixed_column(range.column_range()),
            self.fixed_row(range.row_range()),
        )
    }

    /// Corner a directional command advances.
    pub fn moving_cell(self, range: CellRange) -> CellReference {
        CellReference::new(
            self.moving_column(range.column_range()),
            self.moving_row(range.row_range()),
        )
    }

    pub fn kebab_name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kebab_name())
    }
}

impl FromStr for Anchor {
    type Err = XlnavError;

    fn from_str(text: &str) -> Result<Self> {
        ALL_ANCHORS
            .iter()
            .copied()
            .find(|anchor| anchor.kebab_name().eq_ignore_ascii_case(text.trim()))
            .ok_or_else(|| XlnavError::InvalidReference(format!("unknown anchor {text}")))
    }
}

impl Selection {
    /// Anchors this variant accepts.
    ///
    /// Labels accept any anchor; the anchor is checked again once resolved.
    pub fn anchors(&self) -> &'static [Anchor] {
        match self {
            Self::Cell(_) | Self::Column(_) | Self::Row(_) => SCALAR_ANCHORS,
            Self::CellRange(_) => CELL_RANGE_ANCHORS,
            Self::ColumnRange(_) => COLUMN_RANGE_ANCHORS,
            Self::RowRange(_) => ROW_RANGE_ANCHORS,
            Self::Label(_) => ALL_ANCHORS,
        }
    }

    pub fn default_anchor(&self) -> Anchor {
        match self {
            Self::Cell(_) | Self::Column(_) | Self::Row(_) | Self::Label(_) => Anchor::None,
            Self::CellRange(_) => Anchor::TopLeft,
            Self::ColumnRange(_) => Anchor::Left,
            Self::RowRange(_) => Anchor::Top,
        }
    }

    /// Pair with `anchor`.
    ///
    /// # Errors
    /// Returns [`XlnavError::InvalidAnchor`] when the anchor is not declared
    /// for this variant.
    pub fn set_anchor(self, anchor: Anchor) -> Result<AnchoredSelection> {
        AnchoredSelection::new(self, anchor)
    }

    /// Pair with [`Selection::default_anchor`].
    pub fn with_default_anchor(self) -> AnchoredSelection {
        let anchor = self.default_anchor();
        AnchoredSelection {
            selection: self,
            anchor,
        }
    }
}

/// A selection and the anchor that stays fixed while it is extended.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AnchoredSelectionFields")]
pub struct AnchoredSelection {
    selection: Selection,
    #[serde(default, skip_serializing_if = "Anchor::is_none")]
    anchor: Anchor,
}

#[derive(Deserialize)]
struct AnchoredSelectionFields {
    selection: Selection,
    #[serde(default)]
    anchor: Anchor,
}

impl TryFrom<AnchoredSelectionFields> for AnchoredSelection {
    type Error = XlnavError;

    fn try_from(fields: AnchoredSelectionFields) -> Result<Self> {
        Self::new(fields.selection, fields.anchor)
    }
}

impl AnchoredSelection {
    /// # Errors
    /// Returns [`XlnavError::InvalidAnchor`] when `anchor` is not one of
    /// [`Selection::anchors`].
    pub fn new(selection: Selection, anchor: Anchor) -> Result<Self> {
        if !selection.anchors().contains(&anchor) {
            return Err(XlnavError::InvalidAnchor {
                anchor: anchor.to_string(),
                selection: selection.to_string(),
            });
        }
        Ok(Self { selection, anchor })
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn into_selection(self) -> Selection {
        self.selection
    }

    /// Replace a label with its target, keeping the anchor when the target
    /// accepts it and falling back to the target's default anchor otherwise.
    ///
    /// # Errors
    /// Returns [`XlnavError::LabelNotFound`] or [`XlnavError::LabelCycle`].
    pub fn resolve<L: LabelResolver + ?Sized>(&self, resolver: &L) -> Result<Self> {
        if !self.selection.is_label() {
            return Ok(self.clone());
        }
        let selection = self.selection.resolve_or_fail(resolver)?;
        if selection.anchors().contains(&self.anchor) {
            Ok(Self {
                selection,
                anchor: self.anchor,
            })
        } else {
            Ok(selection.with_default_anchor())
        }
    }

    /// The scalar a directional command advances: the selection itself for
    /// scalars, the moving corner or edge for ranges. `None` for labels.
    pub fn focus(&self) -> Option<Selection> {
        match &self.selection {
            Selection::Cell(_) | Selection::Column(_) | Selection::Row(_) => {
                Some(self.selection.clone())
            }
            Selection::CellRange(range) => Some(Selection::Cell(self.anchor.moving_cell(*range))),
            Selection::ColumnRange(range) => {
                Some(Selection::Column(self.anchor.moving_column(*range)))
            }
            Selection::RowRange(range) => Some(Selection::Row(self.anchor.moving_row(*range))),
            Selection::Label(_) => None,
        }
    }
}

impl From<Selection> for AnchoredSelection {
    fn from(selection: Selection) -> Self {
        selection.with_default_anchor()
    }
}

impl fmt::Display for AnchoredSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.anchor.is_none() {
            write!(f, "{}", self.selection)
        } else {
            write!(f, "{} {}", self.selection, self.anchor)
        }
    }
}

impl FromStr for AnchoredSelection {
    type Err = XlnavError;

    /// Parses `A1:B2` or `A1:B2 bottom-right`.
    ///
    /// The anchor decides the variant, so a single unit range such as
    /// `C left` or `B2 top-left` reads back as a range rather than a scalar.
    /// Text that is not a reference of that variant is read as a label.
    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        let Some((selection, anchor)) = text.split_once(' ') else {
            return Ok(text.parse::<Selection>()?.with_default_anchor());
        };
        let anchor: Anchor = anchor.parse()?;
        let typed = match anchor {
            Anchor::None => selection.parse::<Selection>(),
            Anchor::Left | Anchor::Right => selection.parse().map(Selection::ColumnRange),
            Anchor::Top | Anchor::Bottom => selection.parse().map(Selection::RowRange),
            Anchor::TopLeft | Anchor::TopRight | Anchor::BottomLeft | Anchor::BottomRight => {
                selection.parse().map(Selection::CellRange)
            }
        };
        match typed {
            Ok(selection) => Self::new(selection, anchor),
            Err(error) => match selection.parse::<Label>() {
                Ok(label) => Self::new(Selection::Label(label), anchor),
                Err(_) => Err(error),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_round_trips() {
        for anchor in ALL_ANCHORS {
            assert_eq!(anchor.opposite().opposite(), *anchor);
        }
        assert_eq!(Anchor::Left.opposite(), Anchor::Right);
        assert_eq!(Anchor::TopLeft.opposite(), Anchor::BottomRight);
    }

    #[test]
    fn test_corners() {
        let range: CellRange = "B2:D4".parse().unwrap();
        assert_eq!(Anchor::TopLeft.fixed_cell(range).to_string(), "B2");
        assert_eq!(Anchor::TopLeft.moving_cell(range).to_string(), "D4");
        assert_eq!(Anchor::BottomLeft.fixed_cell(range).to_string(), "B4");
        assert_eq!(Anchor::BottomLeft.moving_cell(range).to_string(), "D2");
    }

    #[test]
    fn test_anchor_validation() {
        let columns: Selection = "B:D".parse().unwrap();
        assert!(AnchoredSelection::new(columns.clone(), Anchor::Left).is_ok());
        assert!(matches!(
            AnchoredSelection::new(columns, Anchor::Top),
            Err(XlnavError::InvalidAnchor { .. })
        ));
        let cell: Selection = "A1".parse().unwrap();
        assert!(AnchoredSelection::new(cell, Anchor::TopLeft).is_err());
    }

    #[test]
    fn test_focus_is_moving_edge() {
        let anchored = AnchoredSelection::new("2:4".parse().unwrap(), Anchor::Top).unwrap();
        assert_eq!(anchored.focus().unwrap().to_string(), "4");
    }

    #[test]
    fn test_anchor_picks_single_unit_range() {
        let columns: AnchoredSelection = "C left".parse().unwrap();
        assert_eq!(columns.selection(), &Selection::ColumnRange("C".parse().unwrap()));
        let rows: AnchoredSelection = "$4 bottom".parse().unwrap();
        assert_eq!(rows.selection(), &Selection::RowRange("$4".parse().unwrap()));
        let cells: AnchoredSelection = "B2 top-left".parse().unwrap();
        assert_eq!(cells.selection(), &Selection::CellRange("B2".parse().unwrap()));
        let label: AnchoredSelection = "Totals right".parse().unwrap();
        assert!(label.selection().is_label());
        assert!("B2 left".parse::<AnchoredSelection>().is_err());
    }

    #[test]
    fn test_parse_with_anchor() {
        let anchored: AnchoredSelection = "A1:B2 bottom-right".parse().unwrap();
        assert_eq!(anchored.anchor(), Anchor::BottomRight);
        assert_eq!(anchored.to_string(), "A1:B2 bottom-right");
    }
}
