//! xlnav - spreadsheet selection algebra and viewport navigation
//!
//! Models cell, column, row, range and label references and drives the
//! interactive viewport as the user issues navigation commands:
//! - Relative/absolute references with saturating and checked arithmetic
//! - Anchored selections that grow and shrink around a fixed corner
//! - Arrow key, shift-extend, pixel scroll and drag movement skipping hidden columns/rows
//! - Frozen panes, label resolution, 8 traversal orders, sparse cell iteration
//!
//! # Usage (Rust)
//!
//! ```
//! use xlnav::layout::{SheetLayout, Viewport};
//! use xlnav::navigation::Navigation;
//!
//! let layout = SheetLayout::default();
//! let viewport = Viewport::default()
//!     .apply(&"select-cell B2".parse::<Navigation>()?, &layout)?
//!     .apply(&Navigation::ExtendRightColumn, &layout)?;
//! let text = viewport.anchored_selection().map(ToString::to_string);
//! assert_eq!(text.as_deref(), Some("B2:C2 top-left"));
//! # Ok::<(), xlnav::XlnavError>(())
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { XlNav } from 'xlnav';
//! await init();
//! const nav = new XlNav(800, 600);
//! nav.navigate('select-cell B2');
//! nav.key_down('ArrowRight', true);
//! nav.selection_text(); // "B2:C2"
//! ```

pub mod cell_ref;
pub mod codec;
pub mod error;
pub mod layout;
pub mod navigation;
pub mod session;
pub mod types;
pub mod viewer;

use wasm_bindgen::prelude::*;

// Re-export the main wasm struct
pub use viewer::XlNav;

pub use error::{Result, XlnavError};
pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
