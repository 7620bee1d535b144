//! Models module for the commit scatter chart
//!
//! Commit records as received from the data endpoint, and the chart
//! configuration object.

pub mod commit;
pub mod config;

// Re-export commonly used types
pub use commit::*;
pub use config::*;
