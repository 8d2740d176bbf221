//! Layout collaborators and viewport state.
//!
//! This module handles:
//! - The lookup traits navigation consults (hidden state, sizes, windows, labels)
//! - An in-memory [`SheetLayout`] implementing all of them
//! - The [`Viewport`] state machine that applies navigation commands

mod context;
mod sheet_layout;
mod viewport;

pub use context::{ColumnRowGeometry, HiddenColumnsRows, NavigationContext, ViewportWindows};
pub use sheet_layout::{LayoutConfig, SheetLayout, DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT};
pub use viewport::{Viewport, ViewportRectangle, Windows};
