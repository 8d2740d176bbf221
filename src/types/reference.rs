//! Column and row references.
//!
//! Both axes share the [`AxisReference`] trait so movement, extension and
//! range code can be written once and used for either axis.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cell_ref::column_to_letters;
use crate::error::{Result, XlnavError};

/// Whether a reference is relative (`A1`) or absolute (`$A$1`).
///
/// The kind only affects text form, strict equality and copy semantics
/// (see [`AxisReference::add_if_relative`]). Ignore-kind comparisons never
/// look at it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceKind {
    #[default]
    Relative,
    Absolute,
}

impl ReferenceKind {
    /// Text prefix written before the column letters or row number.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Relative => "",
            Self::Absolute => "$",
        }
    }

    /// Column reference of this kind.
    ///
    /// # Errors
    /// Returns [`XlnavError::OutOfDomain`] if `value` is past the last column.
    pub fn column(self, value: u32) -> Result<ColumnReference> {
        ColumnReference::with_value(i64::from(value), self)
    }

    /// Row reference of this kind.
    ///
    /// # Errors
    /// Returns [`XlnavError::OutOfDomain`] if `value` is past the last row.
    pub fn row(self, value: u32) -> Result<RowReference> {
        RowReference::with_value(i64::from(value), self)
    }
}

/// Behaviour shared by [`ColumnReference`] and [`RowReference`].
pub trait AxisReference:
    Copy + Eq + Ord + fmt::Debug + fmt::Display + FromStr<Err = XlnavError>
{
    /// Axis name used in error messages.
    const AXIS: &'static str;
    /// Largest valid 0-based value.
    const MAX_VALUE: u32;

    /// 0-based value.
    fn value(self) -> u32;

    fn kind(self) -> ReferenceKind;

    /// Build a reference, clamping `value` to `MAX_VALUE`.
    fn clamped(value: u32, kind: ReferenceKind) -> Self;

    /// Build a reference, failing when `value` lies outside `[0, MAX_VALUE]`.
    ///
    /// # Errors
    /// Returns [`XlnavError::OutOfDomain`].
    fn with_value(value: i64, kind: ReferenceKind) -> Result<Self> {
        match u32::try_from(value) {
            Ok(v) if v <= Self::MAX_VALUE => Ok(Self::clamped(v, kind)),
            _ => Err(XlnavError::OutOfDomain {
                axis: Self::AXIS,
                value,
                max: Self::MAX_VALUE,
            }),
        }
    }

    /// First reference on this axis, relative.
    fn first() -> Self {
        Self::clamped(0, ReferenceKind::Relative)
    }

    /// Last reference on this axis, relative.
    fn last() -> Self {
        Self::clamped(Self::MAX_VALUE, ReferenceKind::Relative)
    }

    /// Add `delta`, failing if the result leaves the domain.
    ///
    /// # Errors
    /// Returns [`XlnavError::OutOfDomain`].
    fn add(self, delta: i64) -> Result<Self> {
        Self::with_value(i64::from(self.value()).saturating_add(delta), self.kind())
    }

    /// Add `delta`, clamping the result to `[0, MAX_VALUE]`.
    #[must_use]
    fn add_saturated(self, delta: i64) -> Self {
        if delta == 0 {
            return self;
        }
        let value = i64::from(self.value())
            .saturating_add(delta)
            .clamp(0, i64::from(Self::MAX_VALUE));
        Self::clamped(u32::try_from(value).unwrap_or(Self::MAX_VALUE), self.kind())
    }

    /// Saturating add for relative references; absolute ones are returned as is.
    #[must_use]
    fn add_if_relative(self, delta: i64) -> Self {
        match self.kind() {
            ReferenceKind::Relative => self.add_saturated(delta),
            ReferenceKind::Absolute => self,
        }
    }

    #[must_use]
    fn set_kind(self, kind: ReferenceKind) -> Self {
        Self::clamped(self.value(), kind)
    }

    #[must_use]
    fn to_relative(self) -> Self {
        self.set_kind(ReferenceKind::Relative)
    }

    #[must_use]
    fn to_absolute(self) -> Self {
        self.set_kind(ReferenceKind::Absolute)
    }

    fn is_first(self) -> bool {
        self.value() == 0
    }

    fn is_last(self) -> bool {
        self.value() == Self::MAX_VALUE
    }

    /// True when a step in the direction of `step` cannot move any further:
    /// first for negative steps, last otherwise.
    fn is_boundary(self, step: i64) -> bool {
        if step < 0 {
            self.is_first()
        } else {
            self.is_last()
        }
    }

    fn eq_ignore_kind(self, other: Self) -> bool {
        self.value() == other.value()
    }

    fn cmp_ignore_kind(self, other: Self) -> Ordering {
        self.value().cmp(&other.value())
    }

    /// Signed distance from `self` to `other`.
    fn distance(self, other: Self) -> i64 {
        i64::from(other.value()) - i64::from(self.value())
    }
}

/// A column reference. Domain `[0, 16383]` (`A` to `XFD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ColumnReference {
    value: u32,
    kind: ReferenceKind,
}

/// A row reference. Domain `[0, 1048575]`, displayed 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RowReference {
    value: u32,
    kind: ReferenceKind,
}

impl ColumnReference {
    pub const MAX: u32 = 16_383;

    /// Relative column.
    ///
    /// # Errors
    /// Returns [`XlnavError::OutOfDomain`] past column `XFD`.
    pub fn new(value: u32) -> Result<Self> {
        ReferenceKind::Relative.column(value)
    }

    /// Absolute column.
    ///
    /// # Errors
    /// Returns [`XlnavError::OutOfDomain`] past column `XFD`.
    pub fn absolute(value: u32) -> Result<Self> {
        ReferenceKind::Absolute.column(value)
    }
}

impl RowReference {
    pub const MAX: u32 = 1_048_575;

    /// Relative row from a 0-based value.
    ///
    /// # Errors
    /// Returns [`XlnavError::OutOfDomain`] past row `1048576`.
    pub fn new(value: u32) -> Result<Self> {
        ReferenceKind::Relative.row(value)
    }

    /// Absolute row from a 0-based value.
    ///
    /// # Errors
    /// Returns [`XlnavError::OutOfDomain`] past row `1048576`.
    pub fn absolute(value: u32) -> Result<Self> {
        ReferenceKind::Absolute.row(value)
    }
}

impl AxisReference for ColumnReference {
    const AXIS: &'static str = "Column";
    const MAX_VALUE: u32 = Self::MAX;

    fn value(self) -> u32 {
        self.value
    }

    fn kind(self) -> ReferenceKind {
        self.kind
    }

    fn clamped(value: u32, kind: ReferenceKind) -> Self {
        Self {
            value: value.min(Self::MAX),
            kind,
        }
    }
}

impl AxisReference for RowReference {
    const AXIS: &'static str = "Row";
    const MAX_VALUE: u32 = Self::MAX;

    fn value(self) -> u32 {
        self.value
    }

    fn kind(self) -> ReferenceKind {
        self.kind
    }

    fn clamped(value: u32, kind: ReferenceKind) -> Self {
        Self {
            value: value.min(Self::MAX),
            kind,
        }
    }
}

impl fmt::Display for ColumnReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), column_to_letters(self.value))
    }
}

impl fmt::Display for RowReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), u64::from(self.value) + 1)
    }
}

impl From<ColumnReference> for String {
    fn from(column: ColumnReference) -> Self {
        column.to_string()
    }
}

impl From<RowReference> for String {
    fn from(row: RowReference) -> Self {
        row.to_string()
    }
}

impl TryFrom<String> for ColumnReference {
    type Error = XlnavError;

    fn try_from(text: String) -> Result<Self> {
        text.parse()
    }
}

impl TryFrom<String> for RowReference {
    type Error = XlnavError;

    fn try_from(text: String) -> Result<Self> {
        text.parse()
    }
}
