//! Explicit JSON encoders and decoders.
//!
//! A [`Codec`] is a plain pair of functions. Callers pick the codec they need
//! and pass it around; nothing is registered globally.
//!
//! ```text
//! selection          {"type":"cell-range","value":"A1:B2"}
//! anchored_selection {"selection":{"type":"column","value":"C"}}
//! selection_text     "A1:B2"
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::cell_ref::{format_selection_list, parse_selection, parse_selection_list};
use crate::error::{Result, XlnavError};
use crate::layout::Viewport;
use crate::navigation::Navigation;
use crate::types::{AnchoredSelection, Selection};

/// Encode/decode function pair for one value type.
pub struct Codec<T> {
    encode: fn(&T) -> Result<Value>,
    decode: fn(Value) -> Result<T>,
}

impl<T> Clone for Codec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Codec<T> {}

impl<T> std::fmt::Debug for Codec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Codec")
    }
}

impl<T> Codec<T> {
    pub const fn new(encode: fn(&T) -> Result<Value>, decode: fn(Value) -> Result<T>) -> Self {
        Self { encode, decode }
    }

    /// # Errors
    /// Returns the encoder's error.
    pub fn encode(&self, value: &T) -> Result<Value> {
        (self.encode)(value)
    }

    /// # Errors
    /// Returns the decoder's error.
    pub fn decode(&self, value: Value) -> Result<T> {
        (self.decode)(value)
    }

    /// # Errors
    /// Returns the encoder's error.
    pub fn encode_string(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string(&self.encode(value)?)?)
    }

    /// # Errors
    /// Returns [`XlnavError::Json`] for malformed JSON or the decoder's error.
    pub fn decode_str(&self, text: &str) -> Result<T> {
        self.decode(serde_json::from_str(text)?)
    }
}

fn serde_encode<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

fn serde_decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

/// Typed form: `{"type": "...", "value": "..."}`. Lossless for every variant.
pub fn selection() -> Codec<Selection> {
    Codec::new(serde_encode::<Selection>, serde_decode::<Selection>)
}

/// `{"selection": ..., "anchor": "..."}`; the anchor is omitted when `none`.
pub fn anchored_selection() -> Codec<AnchoredSelection> {
    Codec::new(
        serde_encode::<AnchoredSelection>,
        serde_decode::<AnchoredSelection>,
    )
}

pub fn viewport() -> Codec<Viewport> {
    Codec::new(serde_encode::<Viewport>, serde_decode::<Viewport>)
}

pub fn navigation() -> Codec<Navigation> {
    Codec::new(serde_encode::<Navigation>, serde_decode::<Navigation>)
}

/// Reference text form. A single unit range reads back as its scalar.
pub fn selection_text() -> Codec<Selection> {
    Codec::new(
        |selection| Ok(Value::String(selection.to_string())),
        |value| parse_selection(expect_string(&value)?),
    )
}

/// Comma separated reference list as one JSON string.
pub fn selection_list_text() -> Codec<Vec<Selection>> {
    Codec::new(
        |selections| Ok(Value::String(format_selection_list(selections))),
        |value| parse_selection_list(expect_string(&value)?),
    )
}

fn expect_string(value: &Value) -> Result<&str> {
    value
        .as_str()
        .ok_or_else(|| XlnavError::InvalidReference(value.to_string()))
}
