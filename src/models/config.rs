//! Chart configuration
//!
//! Everything the renderer needs to know about sizes, styling and optional
//! features is carried by one `ChartConfig` value handed to the renderer at
//! construction. All fields default, so JavaScript may pass a partial object.

use serde::{Deserialize, Serialize};

use crate::errors::{ChartError, ChartResult};

/// Default outer width of the drawing surface in pixels
pub const DEFAULT_OUTER_WIDTH: f64 = 960.0;

/// Default outer height of the drawing surface in pixels
pub const DEFAULT_OUTER_HEIGHT: f64 = 500.0;

/// Default marker radius
pub const DEFAULT_RADIUS: f64 = 3.5;

/// Upper bound on requested tick counts per axis
pub const MAX_TICKS: usize = 1000;

/// Space between the surface edge and the plot area
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 30.0,
            left: 40.0,
        }
    }
}

/// How `render` treats markers already on the surface
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum RenderMode {
    /// Append one marker per record; repeated renders accumulate markers
    #[default]
    Append,
    /// Update markers by record index, append missing ones, drop surplus ones
    Reconcile,
}

/// Transform applied to counts before they reach the scales
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ValueTransform {
    #[default]
    Linear,
    /// `ln(1 + v)`, keeps zero-line commits plottable
    Log,
}

impl ValueTransform {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            ValueTransform::Linear => value,
            ValueTransform::Log => value.ln_1p(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    /// Plot-area width (surface width minus horizontal margins)
    pub width: f64,
    /// Plot-area height (surface height minus vertical margins)
    pub height: f64,
    pub margins: Margins,
    pub radius: f64,
    pub fill: String,
    pub x_ticks: usize,
    pub y_ticks: usize,
    pub x_label: String,
    pub y_label: String,
    pub mode: RenderMode,
    pub transform: ValueTransform,
    pub color_by_author: bool,
    pub show_legend: bool,
    pub tooltip: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let margins = Margins::default();
        Self {
            width: DEFAULT_OUTER_WIDTH - margins.left - margins.right,
            height: DEFAULT_OUTER_HEIGHT - margins.top - margins.bottom,
            margins,
            radius: DEFAULT_RADIUS,
            fill: "black".to_string(),
            x_ticks: 10,
            y_ticks: 5,
            x_label: "Additions".to_string(),
            y_label: "Deletions".to_string(),
            mode: RenderMode::Append,
            transform: ValueTransform::Linear,
            color_by_author: false,
            show_legend: false,
            tooltip: false,
        }
    }
}

impl ChartConfig {
    /// Outer surface width including margins
    pub fn outer_width(&self) -> f64 {
        self.width + self.margins.left + self.margins.right
    }

    /// Outer surface height including margins
    pub fn outer_height(&self) -> f64 {
        self.height + self.margins.top + self.margins.bottom
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [("width", self.width), ("height", self.height), ("radius", self.radius)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        let m = &self.margins;
        if [m.top, m.right, m.bottom, m.left].iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ChartError::InvalidConfig(
                "margins must be non-negative numbers".to_string(),
            ));
        }

        if self.x_ticks == 0 || self.y_ticks == 0 {
            return Err(ChartError::InvalidConfig(
                "tick counts must be at least 1".to_string(),
            ));
        }

        if self.x_ticks > MAX_TICKS || self.y_ticks > MAX_TICKS {
            return Err(ChartError::InvalidConfig(format!(
                "tick counts must be at most {}",
                MAX_TICKS
            )));
        }

        if self.show_legend && !self.color_by_author {
            log::warn!("legend requested without color-by-author; legend will not be drawn");
        }

        Ok(())
    }
}
