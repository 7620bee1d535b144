//! Shared helpers for the WASM API
//!
//! Console logging, serialization across the JS boundary, and conversion of
//! `ChartError` into the `JsValue` errors exported functions return.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::ChartError;

// ============================================================================
// Console Logging Functions
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn info(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [chart] prefix
#[macro_export]
macro_rules! chart_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with [chart] prefix
#[macro_export]
macro_rules! chart_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log a warning message with [chart] prefix
#[macro_export]
macro_rules! chart_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error message with [chart] prefix
#[macro_export]
macro_rules! chart_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

pub fn log_debug(msg: &str) {
    log(&format!("[chart] {}", msg));
}

pub fn log_info(msg: &str) {
    info(&format!("[chart] {}", msg));
}

pub fn log_warn(msg: &str) {
    warn(&format!("[chart] ⚠️ {}", msg));
}

pub fn log_error(msg: &str) {
    error(&format!("[chart] ❌ {}", msg));
}

// ============================================================================
// Error Conversion
// ============================================================================

/// Log a chart error and turn it into a JS exception value
pub fn js_error(err: ChartError) -> JsValue {
    let msg = err.to_string();
    chart_error!("{}", msg);
    JsValue::from_str(&msg)
}

/// Best-effort message out of a thrown JS value
pub fn js_message(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(e) = value.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    format!("{:?}", value)
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}
