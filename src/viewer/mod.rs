//! Main XlNav struct - the JavaScript entry point for navigation.
//!
//! This module provides the WASM-exported `XlNav` struct that handles:
//! - Configuring the sheet layout (sizes, hidden columns/rows, frozen panes, labels)
//! - Applying navigation commands from text or keyboard keys
//! - Reporting the viewport as JSON or a JS object
//!
//! Errors cross the boundary as `JsValue` strings.

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use js_sys::Function;

use crate::codec;
use crate::layout::{LayoutConfig, SheetLayout, Viewport, ViewportRectangle};
use crate::session::NavigationSession;
use crate::types::{CellReference, ColumnReference, Label, RowReference, Selection};

/// The navigation engine exported to JavaScript
#[wasm_bindgen]
pub struct XlNav {
    session: NavigationSession,
    #[cfg(target_arch = "wasm32")]
    change_callback: Option<Function>,
}

#[wasm_bindgen]
impl XlNav {
    /// Create an engine for a viewport of `width` x `height` pixels.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> XlNav {
        console_error_panic_hook::set_once();
        let rectangle = ViewportRectangle::new(CellReference::home(), width, height);
        XlNav {
            session: NavigationSession::new(
                SheetLayout::new(LayoutConfig::default()),
                Viewport::new(rectangle, None),
            ),
            #[cfg(target_arch = "wasm32")]
            change_callback: None,
        }
    }

    /// Replace the layout with one decoded from JSON (see `SheetLayout`).
    #[wasm_bindgen]
    pub fn set_layout_json(&mut self, json: &str) -> Result<(), JsValue> {
        let layout: SheetLayout =
            serde_json::from_str(json).map_err(crate::error::XlnavError::from)?;
        *self.session.layout_mut() = layout;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_frozen(&mut self, frozen_columns: u32, frozen_rows: u32) {
        self.session
            .layout_mut()
            .set_frozen(frozen_columns, frozen_rows);
    }

    /// Set a column width. `column` is letter text such as `"C"`.
    #[wasm_bindgen]
    pub fn set_column_width(&mut self, column: &str, width: f64) -> Result<(), JsValue> {
        let column: ColumnReference = column.parse()?;
        self.session.layout_mut().set_column_width(column, width);
        Ok(())
    }

    /// Set a row height. `row` is 1-based text such as `"12"`.
    #[wasm_bindgen]
    pub fn set_row_height(&mut self, row: &str, height: f64) -> Result<(), JsValue> {
        let row: RowReference = row.parse()?;
        self.session.layout_mut().set_row_height(row, height);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_column_hidden(&mut self, column: &str, hidden: bool) -> Result<(), JsValue> {
        let column: ColumnReference = column.parse()?;
        let layout = self.session.layout_mut();
        if hidden {
            layout.hide_column(column);
        } else {
            layout.show_column(column);
        }
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_row_hidden(&mut self, row: &str, hidden: bool) -> Result<(), JsValue> {
        let row: RowReference = row.parse()?;
        let layout = self.session.layout_mut();
        if hidden {
            layout.hide_row(row);
        } else {
            layout.show_row(row);
        }
        Ok(())
    }

    /// Define a label such as `Total` for a reference such as `B2:C9`.
    #[wasm_bindgen]
    pub fn define_label(&mut self, name: &str, target: &str) -> Result<(), JsValue> {
        let label: Label = name.parse()?;
        let target: Selection = target.parse()?;
        self.session.layout_mut().define_label(label, target);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, width: f64, height: f64) {
        self.session.resize(width, height);
        self.notify();
    }

    /// Apply a command such as `"extend-right-column"` or `"select-cell B2"`.
    #[wasm_bindgen]
    pub fn navigate(&mut self, command: &str) -> Result<(), JsValue> {
        self.session.navigate_text(command)?;
        self.notify();
        Ok(())
    }

    /// Handle a `KeyboardEvent.key`. Returns `true` when the key was consumed.
    #[wasm_bindgen]
    pub fn key_down(&mut self, key: &str, shift: bool) -> Result<bool, JsValue> {
        let handled = self.session.key_down(key, shift)?;
        if handled {
            self.notify();
        }
        Ok(handled)
    }

    /// Current selection in reference text, `undefined` when nothing is selected.
    #[wasm_bindgen]
    pub fn selection_text(&self) -> Option<String> {
        self.session
            .viewport()
            .anchored_selection()
            .map(|anchored| anchored.selection().to_string())
    }

    /// Current home cell, e.g. `"A1"`.
    #[wasm_bindgen]
    pub fn home_text(&self) -> String {
        self.session.viewport().rectangle().home().to_string()
    }

    /// Visible ranges as comma separated text.
    #[wasm_bindgen]
    pub fn windows_text(&self) -> String {
        self.session
            .windows()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    #[wasm_bindgen]
    pub fn viewport_json(&self) -> Result<String, JsValue> {
        Ok(codec::viewport().encode_string(self.session.viewport())?)
    }

    #[wasm_bindgen]
    pub fn set_viewport_json(&mut self, json: &str) -> Result<(), JsValue> {
        let viewport = codec::viewport().decode_str(json)?;
        self.session.set_viewport(viewport);
        self.notify();
        Ok(())
    }

    /// The viewport as a plain JS object.
    #[wasm_bindgen]
    pub fn viewport_js(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.session.viewport())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl XlNav {
    /// Register a JS callback invoked after every viewport change.
    #[wasm_bindgen]
    pub fn set_change_callback(&mut self, callback: Option<Function>) {
        self.change_callback = callback;
    }
}

impl XlNav {
    #[cfg(target_arch = "wasm32")]
    fn notify(&self) {
        if let Some(callback) = &self.change_callback {
            let _ = callback.call0(&JsValue::NULL);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn notify(&self) {}

    /// Native access to the underlying session.
    pub fn session(&self) -> &NavigationSession {
        &self.session
    }
}
