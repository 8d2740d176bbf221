//! The eight orders a cell range can be walked in.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, XlnavError};
use crate::types::{AxisReference, CellRange, CellReference};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeTraversalOrder {
    #[default]
    LeftRightTopDown,
    RightLeftTopDown,
    LeftRightBottomUp,
    RightLeftBottomUp,
    TopDownLeftRight,
    TopDownRightLeft,
    BottomUpLeftRight,
    BottomUpRightLeft,
}

const ALL_ORDERS: [RangeTraversalOrder; 8] = [
    RangeTraversalOrder::LeftRightTopDown,
    RangeTraversalOrder::RightLeftTopDown,
    RangeTraversalOrder::LeftRightBottomUp,
    RangeTraversalOrder::RightLeftBottomUp,
    RangeTraversalOrder::TopDownLeftRight,
    RangeTraversalOrder::TopDownRightLeft,
    RangeTraversalOrder::BottomUpLeftRight,
    RangeTraversalOrder::BottomUpRightLeft,
];

impl RangeTraversalOrder {
    pub fn all() -> [Self; 8] {
        ALL_ORDERS
    }

    /// True when columns are walked fully before moving to the next row.
    pub fn x_first(self) -> bool {
        matches!(
            self,
            Self::LeftRightTopDown
                | Self::RightLeftTopDown
                | Self::LeftRightBottomUp
                | Self::RightLeftBottomUp
        )
    }

    /// `+1` left to right, `-1` right to left.
    pub fn x_sign(self) -> i64 {
        match self {
            Self::RightLeftTopDown
            | Self::RightLeftBottomUp
            | Self::TopDownRightLeft
            | Self::BottomUpRightLeft => -1,
            _ => 1,
        }
    }

    /// `+1` top down, `-1` bottom up.
    pub fn y_sign(self) -> i64 {
        match self {
            Self::LeftRightBottomUp
            | Self::RightLeftBottomUp
            | Self::BottomUpLeftRight
            | Self::BottomUpRightLeft => -1,
            _ => 1,
        }
    }

    /// Corner the walk starts from.
    pub fn first(self, range: CellRange) -> CellReference {
        let column = if self.x_sign() > 0 {
            range.begin().column()
        } else {
            range.end().column()
        };
        let row = if self.y_sign() > 0 {
            range.begin().row()
        } else {
            range.end().row()
        };
        CellReference::new(column, row)
    }

    /// Visit every cell of `range` once, in this order.
    pub fn cells(self, range: CellRange) -> RangeTraversal {
        RangeTraversal {
            order: self,
            origin: self.first(range),
            width: u64::from(range.width()),
            height: u64::from(range.height()),
            index: 0,
        }
    }

    /// Order two cells the way [`RangeTraversalOrder::cells`] visits them.
    pub fn compare(self, a: CellReference, b: CellReference) -> Ordering {
        self.key(a).cmp(&self.key(b))
    }

    fn key(self, cell: CellReference) -> (i64, i64) {
        let x = i64::from(cell.column().value()) * self.x_sign();
        let y = i64::from(cell.row().value()) * self.y_sign();
        if self.x_first() {
            (y, x)
        } else {
            (x, y)
        }
    }

    pub fn kebab_name(self) -> &'static str {
        match self {
            Self::LeftRightTopDown => "left-right-top-down",
            Self::RightLeftTopDown => "right-left-top-down",
            Self::LeftRightBottomUp => "left-right-bottom-up",
            Self::RightLeftBottomUp => "right-left-bottom-up",
            Self::TopDownLeftRight => "top-down-left-right",
            Self::TopDownRightLeft => "top-down-right-left",
            Self::BottomUpLeftRight => "bottom-up-left-right",
            Self::BottomUpRightLeft => "bottom-up-right-left",
        }
    }
}

impl fmt::Display for RangeTraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kebab_name())
    }
}

impl FromStr for RangeTraversalOrder {
    type Err = XlnavError;

    fn from_str(text: &str) -> Result<Self> {
        ALL_ORDERS
            .into_iter()
            .find(|order| order.kebab_name().eq_ignore_ascii_case(text.trim()))
            .ok_or_else(|| XlnavError::InvalidNavigation(format!("unknown order {text}")))
    }
}

/// Iterator returned by [`RangeTraversalOrder::cells`].
#[derive(Debug, Clone)]
pub struct RangeTraversal {
    order: RangeTraversalOrder,
    origin: CellReference,
    width: u64,
    height: u64,
    index: u64,
}

impl RangeTraversal {
    fn total(&self) -> u64 {
        self.width * self.height
    }
}

impl Iterator for RangeTraversal {
    type Item = CellReference;

    fn next(&mut self) -> Option<CellReference> {
        if self.index >= self.total() {
            return None;
        }
        let (x, y) = if self.order.x_first() {
            (self.index % self.width, self.index / self.width)
        } else {
            (self.index / self.height, self.index % self.height)
        };
        self.index += 1;
        let x = i64::try_from(x).ok()? * self.order.x_sign();
        let y = i64::try_from(y).ok()? * self.order.y_sign();
        Some(self.origin.add_saturated(x, y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.total() - self.index).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}
