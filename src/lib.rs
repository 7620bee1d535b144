//! Commit Scatter WASM Module
//!
//! Renders a scatter plot of commit additions against deletions into an SVG
//! surface on a web page. Layout math (scales, ticks, markers, axes) is plain
//! Rust; the `api` module mounts the result and fetches the data.

pub mod errors;
pub mod models;
pub mod scale;
pub mod renderers;
pub mod api;

// Re-export commonly used types
pub use errors::{ChartError, ChartResult};
pub use models::commit::{CommitRecord, Dataset};
pub use models::config::{ChartConfig, Margins, RenderMode, ValueTransform};
pub use renderers::{RenderStats, Scales, ScatterRenderer, Surface};
pub use scale::LinearScale;
pub use api::ScatterChart;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        chart_warn!("logger already initialized");
    }

    log::info!("Commit scatter WASM module initialized");
}
