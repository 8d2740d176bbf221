//! Directional movement, extension, traversal and sparse iteration.

mod command;
mod extend;
mod movement;
mod sparse;
mod traversal;

pub use command::Navigation;
pub use extend::{extend, extend_pixels, extend_to};
pub use movement::{
    move_cell, move_cell_pixels, move_reference, move_reference_pixels, move_selection, Direction,
};
pub use sparse::{sparse_cells, SparseCells};
pub use traversal::{RangeTraversal, RangeTraversalOrder};
