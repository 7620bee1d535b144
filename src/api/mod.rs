//! Commit scatter WASM API
//!
//! This module provides the JavaScript-facing API for the chart.
//!
//! # Module Structure
//!
//! - `helpers`: console logging macros, serialization and error conversion
//! - `fetch`: the asynchronous data request
//! - `chart`: the exported `ScatterChart` class

pub mod helpers;
pub mod fetch;
pub mod chart;

pub use chart::ScatterChart;
pub use fetch::{fetch_data, DEFAULT_ENDPOINT};
