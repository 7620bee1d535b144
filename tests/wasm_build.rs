//! WASM browser tests
//!
//! Mounts the chart into a real document and checks the DOM it produces.
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use commit_scatter::ScatterChart;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{HtmlElement, MouseEvent};

wasm_bindgen_test_configure!(run_in_browser);

fn container(id: &str) {
    let document = web_sys::window().unwrap().document().unwrap();
    let div = document.create_element("div").unwrap();
    div.set_id(id);
    document.body().unwrap().append_child(&div).unwrap();
}

fn records() -> JsValue {
    js_sys::JSON::parse(
        r#"[{"additions": 10, "deletions": 2, "author": "a"},
            {"additions": 50, "deletions": 20, "author": "b"}]"#,
    )
    .unwrap()
}

#[wasm_bindgen_test]
fn test_chart_creation_with_default_config() {
    assert!(ScatterChart::new(JsValue::UNDEFINED).is_ok());
}

#[wasm_bindgen_test]
fn test_invalid_config_is_rejected() {
    let config = js_sys::JSON::parse(r#"{"width": -5}"#).unwrap();
    assert!(ScatterChart::new(config).is_err());
}

#[wasm_bindgen_test]
fn test_missing_container_is_an_error() {
    let mut chart = ScatterChart::new(JsValue::UNDEFINED).unwrap();
    let err = chart.initialize("#does-not-exist").unwrap_err();
    assert!(err.as_string().unwrap().contains("#does-not-exist"));
}

#[wasm_bindgen_test]
fn test_set_data_mounts_markers() {
    container("chart-set-data");
    let mut chart = ScatterChart::new(JsValue::UNDEFINED).unwrap();
    chart.initialize("#chart-set-data").unwrap();

    assert_eq!(chart.set_data(records()).unwrap(), 2);

    let document = web_sys::window().unwrap().document().unwrap();
    let dots = document.query_selector_all("#chart-set-data circle.dot").unwrap();
    assert_eq!(dots.length(), 2);

    let svg = document.query_selector("#chart-set-data svg").unwrap().unwrap();
    assert_eq!(svg.get_attribute("width").as_deref(), Some("960"));
}

#[wasm_bindgen_test]
fn test_render_before_initialize_fails() {
    let chart = ScatterChart::new(JsValue::UNDEFINED).unwrap();
    assert!(chart.render().is_err());
    assert_eq!(chart.marker_count(), 0);
}

#[wasm_bindgen_test]
fn test_clear_removes_markers() {
    container("chart-clear");
    let mut chart = ScatterChart::new(JsValue::UNDEFINED).unwrap();
    chart.initialize("#chart-clear").unwrap();
    chart.set_data(records()).unwrap();
    chart.render().unwrap();
    assert_eq!(chart.marker_count(), 4);

    assert_eq!(chart.clear().unwrap(), 4);
    assert_eq!(chart.marker_count(), 0);
}

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn tooltip_opacity() -> String {
    let tooltip: HtmlElement = document()
        .query_selector("div.tooltip")
        .unwrap()
        .expect("tooltip mounted")
        .dyn_into()
        .unwrap();
    tooltip.style().get_property_value("opacity").unwrap()
}

#[wasm_bindgen_test]
async fn test_load_rejects_on_http_error() {
    container("chart-load-404");
    let mut chart = ScatterChart::new(JsValue::UNDEFINED).unwrap();
    chart.initialize("#chart-load-404").unwrap();

    let result = JsFuture::from(chart.load(Some("/no-such-endpoint".to_string()))).await;

    let message = result.unwrap_err().as_string().unwrap();
    assert!(message.contains("HTTP 404"), "unexpected rejection: {}", message);
    assert_eq!(chart.marker_count(), 0);
}

#[wasm_bindgen_test]
fn test_tooltip_mounts_hidden() {
    container("chart-tooltip");
    let config = js_sys::JSON::parse(r#"{"tooltip": true}"#).unwrap();
    let mut chart = ScatterChart::new(config).unwrap();
    chart.initialize("#chart-tooltip").unwrap();

    assert_eq!(tooltip_opacity(), "0");
}

#[wasm_bindgen_test]
fn test_hover_reports_record_and_shows_tooltip() {
    container("chart-hover");
    let config = js_sys::JSON::parse(r#"{"tooltip": true}"#).unwrap();
    let mut chart = ScatterChart::new(config).unwrap();
    chart.initialize("#chart-hover").unwrap();
    chart.set_data(records()).unwrap();

    let hovered: Rc<RefCell<Option<JsValue>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&hovered);
    let callback = Closure::<dyn FnMut(JsValue)>::new(move |record: JsValue| {
        *sink.borrow_mut() = Some(record);
    });
    chart.on_hover(callback.as_ref().unchecked_ref::<js_sys::Function>().clone());

    let dot = document()
        .query_selector("#chart-hover circle.dot[data-index=\"1\"]")
        .unwrap()
        .expect("second marker drawn");
    let event: MouseEvent = document().create_event("MouseEvents").unwrap().dyn_into().unwrap();
    event.init_mouse_event_with_can_bubble_arg_and_cancelable_arg("mouseover", true, true);
    dot.dispatch_event(&event).unwrap();

    let record = hovered.borrow().clone().expect("hover callback fired");
    let author = js_sys::Reflect::get(&record, &JsValue::from_str("author")).unwrap();
    assert_eq!(author.as_string().as_deref(), Some("b"));
    assert_eq!(tooltip_opacity(), "0.9");
}

#[wasm_bindgen_test]
fn test_initialize_twice_replaces_surface() {
    container("chart-remount");
    let mut chart = ScatterChart::new(JsValue::UNDEFINED).unwrap();
    chart.initialize("#chart-remount").unwrap();
    chart.initialize("#chart-remount").unwrap();

    let svgs = document().query_selector_all("#chart-remount svg").unwrap();
    assert_eq!(svgs.length(), 1);
}
