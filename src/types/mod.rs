//! Reference, range, label and selection value types.

mod anchor;
mod cell;
mod label;
mod range;
mod reference;
mod selection;

pub use anchor::*;
pub use cell::*;
pub use label::*;
pub use range::*;
pub use reference::*;
pub use selection::*;
