//! `ScatterChart`: the JavaScript-facing chart object
//!
//! Owns one renderer, its drawing surface, the loaded dataset and the mounted
//! `<svg>`. The flow is initialize → load (fetch, scales, axes, markers). The
//! scene graph lives in Rust; after each change the plot group is written to
//! the mounted element in one `innerHTML` assignment.
//!
//! Hovering a marker is handled by delegated `mouseover`/`mouseout`
//! listeners on the `<svg>`, so markers can be rebuilt freely.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use crate::api::fetch::{fetch_data, DEFAULT_ENDPOINT};
use crate::api::helpers::{deserialize, js_error, js_message, serialize};
use crate::errors::{ChartError, ChartResult};
use crate::models::{ChartConfig, CommitRecord, Dataset};
use crate::renderers::svg::SVG_NAMESPACE;
use crate::renderers::{RenderStats, ScatterRenderer, Surface, MARKER_CLASS};
use crate::renderers::scatter::INDEX_ATTR;
use crate::{chart_info, chart_log, chart_warn};

type MouseListener = Closure<dyn FnMut(MouseEvent)>;

fn dom(e: JsValue) -> ChartError {
    ChartError::Dom(js_message(&e))
}

struct ChartState {
    renderer: ScatterRenderer,
    surface: Option<Surface>,
    dataset: Dataset,
    svg: Option<Element>,
    tooltip: Option<HtmlElement>,
    hover: Option<js_sys::Function>,
}

impl ChartState {
    fn surface(&self) -> ChartResult<&Surface> {
        self.surface.as_ref().ok_or(ChartError::NotInitialized)
    }

    /// Write the plot group into the mounted `<svg>`
    fn sync(&self) -> ChartResult<()> {
        let svg = self.svg.as_ref().ok_or(ChartError::NotInitialized)?;
        svg.set_inner_html(&self.surface()?.plot().to_markup());
        Ok(())
    }

    /// Replace the dataset and redraw scales, axes and markers
    fn show(&mut self, dataset: Dataset) -> ChartResult<RenderStats> {
        self.dataset = dataset;
        let surface = self.surface.as_mut().ok_or(ChartError::NotInitialized)?;
        let (scales, stats) = self.renderer.draw(surface, &self.dataset);
        chart_log!(
            "scales: x {:?} -> {:?}, y {:?} -> {:?}",
            scales.x.domain(),
            scales.x.range(),
            scales.y.domain(),
            scales.y.range()
        );
        self.sync()?;
        Ok(stats)
    }

    /// Draw the current dataset again against fresh scales
    fn rerender(&mut self) -> ChartResult<RenderStats> {
        let scales = self.renderer.compute_scales(&self.dataset);
        let surface = self.surface.as_mut().ok_or(ChartError::NotInitialized)?;
        let stats = self.renderer.render(surface, &self.dataset, &scales);
        self.sync()?;
        Ok(stats)
    }

    fn marker_count(&self) -> usize {
        self.surface.as_ref().map(Surface::marker_count).unwrap_or(0)
    }

    fn show_tooltip(&self, record: &CommitRecord, event: &MouseEvent) {
        let Some(tooltip) = &self.tooltip else {
            return;
        };
        tooltip.set_inner_html(&self.renderer.tooltip_html(record));
        let style = tooltip.style();
        let result = style
            .set_property("opacity", "0.9")
            .and_then(|_| style.set_property("left", &format!("{}px", event.page_x() + 5)))
            .and_then(|_| style.set_property("top", &format!("{}px", event.page_y() - 28)));
        if let Err(e) = result {
            chart_warn!("tooltip update failed: {}", js_message(&e));
        }
    }

    fn hide_tooltip(&self) {
        if let Some(tooltip) = &self.tooltip {
            if let Err(e) = tooltip.style().set_property("opacity", "0") {
                chart_warn!("tooltip update failed: {}", js_message(&e));
            }
        }
    }
}

/// Record index of the marker an event landed on
fn event_marker_index(event: &MouseEvent) -> Option<usize> {
    let target: Element = event.target()?.dyn_into().ok()?;
    let class = target.get_attribute("class")?;
    if !class.split_whitespace().any(|c| c == MARKER_CLASS) {
        return None;
    }
    target.get_attribute(INDEX_ATTR)?.parse().ok()
}

fn on_mouse_over(state: &Rc<RefCell<ChartState>>, event: &MouseEvent) {
    let Some(index) = event_marker_index(event) else {
        return;
    };

    // The callback may call back into the chart, so no borrow is held across it.
    let (record, callback) = {
        let state = state.borrow();
        let Some(record) = state.dataset.records().get(index).cloned() else {
            return;
        };
        state.show_tooltip(&record, event);
        (record, state.hover.clone())
    };

    if let Some(callback) = callback {
        if let Ok(value) = serialize(&record, "Hover record serialization error") {
            if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                chart_warn!("hover callback threw: {}", js_message(&e));
            }
        }
    }
}

fn on_mouse_out(state: &Rc<RefCell<ChartState>>, event: &MouseEvent) {
    if event_marker_index(event).is_some() {
        state.borrow().hide_tooltip();
    }
}

fn create_tooltip(document: &Document) -> ChartResult<HtmlElement> {
    let body = document
        .body()
        .ok_or_else(|| ChartError::MissingContainer("body".to_string()))?;
    let tooltip: HtmlElement = document
        .create_element("div")
        .map_err(dom)?
        .dyn_into()
        .map_err(|_| ChartError::Dom("tooltip is not an HTML element".to_string()))?;
    tooltip.set_class_name("tooltip");
    let style = tooltip.style();
    style.set_property("position", "absolute").map_err(dom)?;
    style.set_property("pointer-events", "none").map_err(dom)?;
    style.set_property("opacity", "0").map_err(dom)?;
    body.append_child(&tooltip).map_err(dom)?;
    Ok(tooltip)
}

#[wasm_bindgen]
pub struct ScatterChart {
    state: Rc<RefCell<ChartState>>,
    listeners: Vec<(&'static str, MouseListener)>,
}

#[wasm_bindgen]
impl ScatterChart {
    /// Create a chart; `config` is an optional partial `ChartConfig` object
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ScatterChart, JsValue> {
        let config: ChartConfig = if config.is_undefined() || config.is_null() {
            ChartConfig::default()
        } else {
            deserialize(config, "Invalid chart configuration")?
        };
        let renderer = ScatterRenderer::new(config).map_err(js_error)?;

        Ok(ScatterChart {
            state: Rc::new(RefCell::new(ChartState {
                renderer,
                surface: None,
                dataset: Dataset::default(),
                svg: None,
                tooltip: None,
                hover: None,
            })),
            listeners: Vec::new(),
        })
    }

    /// Mount a drawing surface into the element matching `selector`
    pub fn initialize(&mut self, selector: &str) -> Result<(), JsValue> {
        chart_info!("initialize: mounting into '{}'", selector);
        self.mount(selector).map_err(js_error)
    }

    /// Fetch `endpoint` (default `/data`) and draw it.
    ///
    /// Resolves to the number of markers on the surface.
    pub fn load(&self, endpoint: Option<String>) -> js_sys::Promise {
        let state = Rc::clone(&self.state);
        let endpoint = endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        future_to_promise(async move {
            chart_info!("load: GET {}", endpoint);
            let dataset = fetch_data(&endpoint).await.map_err(js_error)?;
            chart_log!("  received {} records", dataset.len());

            let mut state = state.borrow_mut();
            let stats = state.show(dataset).map_err(js_error)?;
            chart_info!("load completed: {} markers entered", stats.entered);
            Ok(JsValue::from(state.marker_count() as u32))
        })
    }

    /// Draw records supplied directly from JavaScript
    #[wasm_bindgen(js_name = setData)]
    pub fn set_data(&self, records: JsValue) -> Result<usize, JsValue> {
        let records: Vec<CommitRecord> = deserialize(records, "Invalid commit records")?;
        let dataset = Dataset::new(records).map_err(js_error)?;

        let mut state = self.state.borrow_mut();
        state.show(dataset).map_err(js_error)?;
        Ok(state.marker_count())
    }

    /// Draw the loaded dataset again.
    ///
    /// In append mode this adds a second copy of every marker.
    pub fn render(&self) -> Result<JsValue, JsValue> {
        let stats = self.state.borrow_mut().rerender().map_err(js_error)?;
        serialize(&stats, "Render stats serialization error")
    }

    /// Remove every marker; returns how many were removed
    pub fn clear(&self) -> Result<usize, JsValue> {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let surface = state
            .surface
            .as_mut()
            .ok_or_else(|| js_error(ChartError::NotInitialized))?;
        let removed = state.renderer.clear(surface);
        state.sync().map_err(js_error)?;
        Ok(removed)
    }

    #[wasm_bindgen(js_name = markerCount)]
    pub fn marker_count(&self) -> usize {
        self.state.borrow().marker_count()
    }

    /// Standalone SVG markup of the current surface
    #[wasm_bindgen(js_name = toSvg)]
    pub fn to_svg(&self) -> Result<String, JsValue> {
        let state = self.state.borrow();
        let surface = state.surface().map_err(js_error)?;
        Ok(surface.to_markup())
    }

    /// Scales derived from the loaded dataset
    pub fn scales(&self) -> Result<JsValue, JsValue> {
        let state = self.state.borrow();
        let scales = state.renderer.compute_scales(&state.dataset);
        serialize(&scales, "Scale serialization error")
    }

    /// Register `callback(record)` for marker hover
    #[wasm_bindgen(js_name = onHover)]
    pub fn on_hover(&self, callback: js_sys::Function) {
        self.state.borrow_mut().hover = Some(callback);
    }
}

impl ScatterChart {
    fn mount(&mut self, selector: &str) -> ChartResult<()> {
        let window = web_sys::window().ok_or_else(|| ChartError::Dom("no global window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| ChartError::Dom("no document".to_string()))?;
        let container = document
            .query_selector(selector)
            .map_err(dom)?
            .ok_or_else(|| ChartError::MissingContainer(selector.to_string()))?;

        self.unmount();

        let svg = document
            .create_element_ns(Some(SVG_NAMESPACE), "svg")
            .map_err(dom)?;
        {
            let mut state = self.state.borrow_mut();
            let surface = state.renderer.initialize();
            for (name, value) in surface.root().attrs() {
                if name != "xmlns" {
                    svg.set_attribute(name, value).map_err(dom)?;
                }
            }
            container.append_child(&svg).map_err(dom)?;
            state.svg = Some(svg.clone());
            state.surface = Some(surface);

            if state.renderer.config().tooltip {
                state.tooltip = Some(create_tooltip(&document)?);
            }
            state.sync()?;
        }

        self.attach_listeners(&svg)
    }

    fn attach_listeners(&mut self, svg: &Element) -> ChartResult<()> {
        let state = Rc::clone(&self.state);
        let over = MouseListener::new(move |event: MouseEvent| on_mouse_over(&state, &event));
        let state = Rc::clone(&self.state);
        let out = MouseListener::new(move |event: MouseEvent| on_mouse_out(&state, &event));

        for (kind, listener) in [("mouseover", over), ("mouseout", out)] {
            svg.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
                .map_err(dom)?;
            self.listeners.push((kind, listener));
        }
        Ok(())
    }

    /// Detach listeners and remove previously mounted elements
    fn unmount(&mut self) {
        let mut state = self.state.borrow_mut();
        if let Some(svg) = state.svg.take() {
            for (kind, listener) in self.listeners.drain(..) {
                if let Err(e) = svg.remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref()) {
                    chart_warn!("removing {} listener failed: {}", kind, js_message(&e));
                }
            }
            svg.remove();
        }
        if let Some(tooltip) = state.tooltip.take() {
            tooltip.remove();
        }
        state.surface = None;
    }
}

impl Drop for ScatterChart {
    fn drop(&mut self) {
        self.unmount();
    }
}
