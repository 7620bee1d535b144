//! Scales mapping data values to pixels and colors

pub mod linear;
pub mod ordinal;

pub use linear::{extent, LinearScale, EMPTY_DOMAIN};
pub use ordinal::{OrdinalScale, CATEGORY20};
