//! Renderers module for the commit scatter chart
//!
//! This module contains the drawing logic that turns commit data into an
//! SVG scene graph: markers, axes and the optional author legend.

pub mod svg;
pub mod axis;
pub mod legend;
pub mod scatter;

// Re-export commonly used types
pub use svg::{Surface, SvgNode, MARKER_CLASS};
pub use axis::{Axis, AxisLabel, Orient};
pub use scatter::{marker_index, RenderStats, Scales, ScatterRenderer};
