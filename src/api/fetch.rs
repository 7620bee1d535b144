//! Data endpoint access
//!
//! A single `GET` through the browser's `fetch`, awaited as a Rust future.
//! Failures are returned to the caller; there is no retry or timeout.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::api::helpers::js_message;
use crate::errors::{ChartError, ChartResult};
use crate::models::commit::Dataset;

/// Endpoint the chart reads when none is given
pub const DEFAULT_ENDPOINT: &str = "/data";

pub async fn fetch_data(endpoint: &str) -> ChartResult<Dataset> {
    let window = web_sys::window().ok_or_else(|| ChartError::Dom("no global window".to_string()))?;

    let response = JsFuture::from(window.fetch_with_str(endpoint))
        .await
        .map_err(|e| ChartError::Fetch(js_message(&e)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| ChartError::Fetch("fetch did not resolve to a Response".to_string()))?;

    if !response.ok() {
        return Err(ChartError::Http {
            status: response.status(),
            url: response.url(),
        });
    }

    let body = response
        .text()
        .map_err(|e| ChartError::Fetch(js_message(&e)))?;
    let body = JsFuture::from(body)
        .await
        .map_err(|e| ChartError::Fetch(js_message(&e)))?
        .as_string()
        .ok_or_else(|| ChartError::Payload("response body is not text".to_string()))?;

    Dataset::from_json(&body)
}
