//! SVG rendering output
//!
//! The scene graph the chart draws into, and its markup serialization.

pub mod elements;
pub mod document;

pub use elements::*;
pub use document::*;
