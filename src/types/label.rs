use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::Selection;
use crate::cell_ref::{parse_cell, parse_column};
use crate::error::{Result, XlnavError};

/// Longest accepted label.
pub const MAX_LABEL_LENGTH: usize = 255;

/// A case-insensitive name that stands for another selection.
///
/// Labels start with a letter, `_` or `\`, continue with letters, digits,
/// `.` or `_`, and never read as a cell or column reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Label(String);

impl Label {
    /// Validate and wrap `name`.
    ///
    /// # Errors
    /// Returns [`XlnavError::InvalidLabel`] for malformed names and for names
    /// such as `A1` or `Sum` that are valid cell or column references.
    pub fn new(name: &str) -> Result<Self> {
        if name.is_empty() || name.len() > MAX_LABEL_LENGTH {
            return Err(XlnavError::InvalidLabel(name.to_string()));
        }
        let mut chars = name.chars();
        let initial_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '\\');
        let body_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
        if !initial_ok || !body_ok || parse_cell(name).is_ok() || parse_column(name).is_ok() {
            return Err(XlnavError::InvalidLabel(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    /// The name as written.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Label {}

impl Hash for Label {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .bytes()
            .map(|b| b.to_ascii_lowercase())
            .cmp(other.0.bytes().map(|b| b.to_ascii_lowercase()))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.0
    }
}

impl TryFrom<String> for Label {
    type Error = XlnavError;

    fn try_from(text: String) -> Result<Self> {
        Self::new(&text)
    }
}

/// Lookup from a label to the selection it names.
///
/// Targets may themselves be labels; [`Selection::resolve`] follows chains.
pub trait LabelResolver {
    fn resolve_label(&self, label: &Label) -> Option<Selection>;
}

impl LabelResolver for HashMap<Label, Selection> {
    fn resolve_label(&self, label: &Label) -> Option<Selection> {
        self.get(label).cloned()
    }
}

impl LabelResolver for BTreeMap<Label, Selection> {
    fn resolve_label(&self, label: &Label) -> Option<Selection> {
        self.get(label).cloned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_label_rules() {
        assert!(Label::new("Total").is_ok());
        assert!(Label::new("_tax.rate").is_ok());
        assert!(Label::new("\\path").is_ok());
        assert!(Label::new("1abc").is_err());
        assert!(Label::new("has space").is_err());
        assert!(Label::new("A1").is_err());
        assert!(Label::new("xfd1048576").is_err());
        assert!(Label::new("Sum").is_err());
        assert!(Label::new("XFE").is_ok());
        assert!(Label::new(&"x".repeat(MAX_LABEL_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_case_insensitive() {
        let a = Label::new("Sales").unwrap();
        let b = Label::new("SALES").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);

        let mut map = HashMap::new();
        map.insert(a, Selection::Cell("B2".parse().unwrap()));
        assert!(map.resolve_label(&b).is_some());
        assert_eq!(b.name(), "SALES");
    }
}
