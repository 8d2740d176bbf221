//! Navigation commands and their kebab-case text form.
//!
//! ```text
//! left-column  extend-down-row  right-pixel 120  extend-up-pixel 40
//! select-cell B2  select-cell-range A1:C3 bottom-right  extend-column F
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::movement::Direction;
use crate::error::{Result, XlnavError};
use crate::types::{AnchoredSelection, Selection};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Navigation {
    LeftColumn,
    RightColumn,
    UpRow,
    DownRow,
    ExtendLeftColumn,
    ExtendRightColumn,
    ExtendUpRow,
    ExtendDownRow,
    /// Scroll the viewport without touching the selection.
    LeftPixel(f64),
    RightPixel(f64),
    UpPixel(f64),
    DownPixel(f64),
    /// Drag the selection's moving edge.
    ExtendLeftPixel(f64),
    ExtendRightPixel(f64),
    ExtendUpPixel(f64),
    ExtendDownPixel(f64),
    /// Click: replace the selection.
    Select(AnchoredSelection),
    /// Shift-click on a cell, column or row.
    Extend(Selection),
}

const KEYBOARD_COMMANDS: [(&str, Navigation); 8] = [
    ("left-column", Navigation::LeftColumn),
    ("right-column", Navigation::RightColumn),
    ("up-row", Navigation::UpRow),
    ("down-row", Navigation::DownRow),
    ("extend-left-column", Navigation::ExtendLeftColumn),
    ("extend-right-column", Navigation::ExtendRightColumn),
    ("extend-up-row", Navigation::ExtendUpRow),
    ("extend-down-row", Navigation::ExtendDownRow),
];

impl Navigation {
    /// Select commands replace the selection and discard pending history.
    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select(_))
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::LeftColumn
            | Self::ExtendLeftColumn
            | Self::LeftPixel(_)
            | Self::ExtendLeftPixel(_) => Some(Direction::Left),
            Self::RightColumn
            | Self::ExtendRightColumn
            | Self::RightPixel(_)
            | Self::ExtendRightPixel(_) => Some(Direction::Right),
            Self::UpRow | Self::ExtendUpRow | Self::UpPixel(_) | Self::ExtendUpPixel(_) => {
                Some(Direction::Up)
            }
            Self::DownRow | Self::ExtendDownRow | Self::DownPixel(_) | Self::ExtendDownPixel(_) => {
                Some(Direction::Down)
            }
            Self::Select(_) | Self::Extend(_) => None,
        }
    }

    /// Pixel amount for pixel commands.
    pub fn pixels(&self) -> Option<f64> {
        match self {
            Self::LeftPixel(p)
            | Self::RightPixel(p)
            | Self::UpPixel(p)
            | Self::DownPixel(p)
            | Self::ExtendLeftPixel(p)
            | Self::ExtendRightPixel(p)
            | Self::ExtendUpPixel(p)
            | Self::ExtendDownPixel(p) => Some(*p),
            _ => None,
        }
    }

    /// Map a DOM `KeyboardEvent.key`. Page keys scroll by `page_pixels`.
    pub fn from_key(key: &str, shift: bool, page_pixels: f64) -> Option<Self> {
        let navigation = match (key, shift) {
            ("ArrowLeft", false) => Self::LeftColumn,
            ("ArrowRight", false) => Self::RightColumn,
            ("ArrowUp", false) => Self::UpRow,
            ("ArrowDown", false) => Self::DownRow,
            ("ArrowLeft", true) => Self::ExtendLeftColumn,
            ("ArrowRight", true) => Self::ExtendRightColumn,
            ("ArrowUp", true) => Self::ExtendUpRow,
            ("ArrowDown", true) => Self::ExtendDownRow,
            ("PageUp", false) => Self::UpPixel(page_pixels),
            ("PageDown", false) => Self::DownPixel(page_pixels),
            ("PageUp", true) => Self::ExtendUpPixel(page_pixels),
            ("PageDown", true) => Self::ExtendDownPixel(page_pixels),
            _ => return None,
        };
        Some(navigation)
    }

    fn pixel_command(name: &str, pixels: f64) -> Option<Self> {
        let navigation = match name {
            "left-pixel" => Self::LeftPixel(pixels),
            "right-pixel" => Self::RightPixel(pixels),
            "up-pixel" => Self::UpPixel(pixels),
            "down-pixel" => Self::DownPixel(pixels),
            "extend-left-pixel" => Self::ExtendLeftPixel(pixels),
            "extend-right-pixel" => Self::ExtendRightPixel(pixels),
            "extend-up-pixel" => Self::ExtendUpPixel(pixels),
            "extend-down-pixel" => Self::ExtendDownPixel(pixels),
            _ => return None,
        };
        Some(navigation)
    }

    fn name(&self) -> &'static str {
        match self {
            Self::LeftColumn => "left-column",
            Self::RightColumn => "right-column",
            Self::UpRow => "up-row",
            Self::DownRow => "down-row",
            Self::ExtendLeftColumn => "extend-left-column",
            Self::ExtendRightColumn => "extend-right-column",
            Self::ExtendUpRow => "extend-up-row",
            Self::ExtendDownRow => "extend-down-row",
            Self::LeftPixel(_) => "left-pixel",
            Self::RightPixel(_) => "right-pixel",
            Self::UpPixel(_) => "up-pixel",
            Self::DownPixel(_) => "down-pixel",
            Self::ExtendLeftPixel(_) => "extend-left-pixel",
            Self::ExtendRightPixel(_) => "extend-right-pixel",
            Self::ExtendUpPixel(_) => "extend-up-pixel",
            Self::ExtendDownPixel(_) => "extend-down-pixel",
            Self::Select(_) => "select",
            Self::Extend(_) => "extend",
        }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(anchored) => write!(
                f,
                "select-{} {}",
                anchored.selection().type_name(),
                anchored
            ),
            Self::Extend(target) => write!(f, "extend-{} {}", target.type_name(), target),
            other => match other.pixels() {
                Some(pixels) => write!(f, "{} {}", other.name(), pixels),
                None => f.write_str(other.name()),
            },
        }
    }
}

impl FromStr for Navigation {
    type Err = XlnavError;

    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        let invalid = || XlnavError::InvalidNavigation(text.to_string());
        let (name, argument) = match text.split_once(' ') {
            Some((name, argument)) => (name, Some(argument.trim())),
            None => (text, None),
        };

        if let Some((_, navigation)) = KEYBOARD_COMMANDS.iter().find(|(n, _)| *n == name) {
            return match argument {
                None => Ok(navigation.clone()),
                Some(_) => Err(invalid()),
            };
        }

        if name.ends_with("-pixel") {
            let pixels: f64 = argument
                .ok_or_else(invalid)?
                .parse()
                .map_err(|_| invalid())?;
            if pixels.is_nan() || pixels < 0.0 {
                return Err(XlnavError::NegativePixelBudget(pixels));
            }
            return Self::pixel_command(name, pixels).ok_or_else(invalid);
        }

        let argument = argument.ok_or_else(invalid)?;
        if let Some(type_name) = name.strip_prefix("select-") {
            let (selection, anchor) = match argument.split_once(' ') {
                Some((selection, anchor)) => (selection, Some(anchor)),
                None => (argument, None),
            };
            let selection = parse_typed_selection(type_name, selection)?;
            let anchored = match anchor {
                Some(anchor) => AnchoredSelection::new(selection, anchor.parse()?)?,
                None => selection.with_default_anchor(),
            };
            return Ok(Self::Select(anchored));
        }
        if let Some(type_name) = name.strip_prefix("extend-") {
            return Ok(Self::Extend(parse_typed_selection(type_name, argument)?));
        }
        Err(invalid())
    }
}

/// Parse `text` as the selection variant named by `type_name`.
fn parse_typed_selection(type_name: &str, text: &str) -> Result<Selection> {
    let selection = match type_name {
        "cell" => Selection::Cell(text.parse()?),
        "cell-range" => Selection::CellRange(text.parse()?),
        "column" => Selection::Column(text.parse()?),
        "column-range" => Selection::ColumnRange(text.parse()?),
        "row" => Selection::Row(text.parse()?),
        "row-range" => Selection::RowRange(text.parse()?),
        "label" => Selection::Label(text.parse()?),
        _ => return Err(XlnavError::InvalidNavigation(format!("{type_name} {text}"))),
    };
    Ok(selection)
}

impl From<Navigation> for String {
    fn from(navigation: Navigation) -> Self {
        navigation.to_string()
    }
}

impl TryFrom<String> for Navigation {
    type Error = XlnavError;

    fn try_from(text: String) -> Result<Self> {
        text.parse()
    }
}
