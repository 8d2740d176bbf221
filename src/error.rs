//! Structured error types for xlnav.
//!
//! Hidden-skip movement that finds no visible target is not an error; those
//! operations return `Option` instead.

use crate::types::Label;

/// All errors that can occur in the selection algebra and navigation engine.
#[derive(Debug, thiserror::Error)]
pub enum XlnavError {
    /// Reference value outside its axis domain.
    #[error("{axis} {value} out of range 0..={max}")]
    OutOfDomain {
        axis: &'static str,
        value: i64,
        max: u32,
    },

    /// Anchor not declared for the selection variant.
    #[error("Invalid anchor {anchor} for {selection}")]
    InvalidAnchor { anchor: String, selection: String },

    /// Label has no target in the label store.
    #[error("Label not found: {0}")]
    LabelNotFound(Label),

    /// Label chain revisits a label.
    #[error("Label cycle at: {0}")]
    LabelCycle(Label),

    /// Range requested from zero cells.
    #[error("Cannot build a range from an empty set of cells")]
    EmptyCellSet,

    /// Pixel distances must be zero or more.
    #[error("Negative pixel budget: {0}")]
    NegativePixelBudget(f64),

    /// Invalid reference text.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Invalid label text.
    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    /// Invalid navigation command text.
    #[error("Invalid navigation: {0}")]
    InvalidNavigation(String),

    /// Selection cannot be converted to the requested kind.
    #[error("Cannot convert {selection} to {target}")]
    Conversion {
        selection: String,
        target: &'static str,
    },

    /// JSON encode/decode failure.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XlnavError>;

impl From<XlnavError> for wasm_bindgen::JsValue {
    fn from(e: XlnavError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
