use crate::constants::REDUCED_MOTION_QUERY;
use motion_core::MotionPreference;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn element_by_id(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::HtmlElement> {
    html_elements(document.query_selector_all(selector), selector)
}

/// Like [`query_all`], scoped to the descendants of `root`.
pub fn query_all_in(root: &web::Element, selector: &str) -> Vec<web::HtmlElement> {
    html_elements(root.query_selector_all(selector), selector)
}

fn html_elements(
    list: Result<web::NodeList, wasm_bindgen::JsValue>,
    selector: &str,
) -> Vec<web::HtmlElement> {
    let Ok(list) = list else {
        log::warn!("[dom] bad selector {}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

/// Layout viewport size in CSS pixels.
pub fn viewport_size() -> (u32, u32) {
    let Some(w) = web::window() else {
        return (0, 0);
    };
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    (read(w.inner_width()), read(w.inner_height()))
}

pub fn scroll_y() -> f32 {
    web::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0) as f32
}

/// Top edge of `el` in document coordinates.
pub fn document_top(el: &web::Element) -> f32 {
    el.get_bounding_client_rect().top() as f32 + scroll_y()
}

/// Size the canvas backing store to `width` x `height` CSS pixels.
///
/// The 2D context draws in CSS pixels, so the backing store matches the
/// viewport one to one and the grid coordinates need no scaling.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, width: u32, height: u32) {
    canvas.set_width(width.max(1));
    canvas.set_height(height.max(1));
}

#[inline]
pub fn set_style(el: &web::HtmlElement, prop: &str, value: &str) {
    _ = el.style().set_property(prop, value);
}

#[inline]
pub fn set_text(el: &web::HtmlElement, text: &str) {
    el.set_text_content(Some(text));
}

#[inline]
pub fn set_attr(el: &web::Element, name: &str, value: &str) {
    _ = el.set_attribute(name, value);
}

pub fn toggle_class(el: &web::Element, class: &str, on: bool) {
    _ = el.class_list().toggle_with_force(class, on);
}

/// `prefers-reduced-motion` read through `matchMedia`.
///
/// Every query asks the live `MediaQueryList`, so a change in system settings
/// is picked up on the next frame.
#[derive(Clone)]
pub struct MediaMotionPreference {
    query: Option<web::MediaQueryList>,
}

impl MediaMotionPreference {
    pub fn new() -> Self {
        let query = web::window().and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok().flatten());
        if query.is_none() {
            log::warn!("[dom] matchMedia unavailable; assuming full motion");
        }
        Self { query }
    }
}

impl MotionPreference for MediaMotionPreference {
    fn prefers_reduced_motion(&self) -> bool {
        self.query.as_ref().map(|q| q.matches()).unwrap_or(false)
    }
}
