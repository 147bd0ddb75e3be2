use crate::canvas::Canvas2dSurface;
use crate::constants::{FIELD_CANVAS_CLASS, FIELD_CANVAS_ID};
use crate::dom::{self, MediaMotionPreference};
use crate::events;
use crate::frame::RafScheduler;
use motion_core::field::{self, NodeFieldMount};
use motion_core::{NodeField, NodeFieldConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type GridMount = NodeFieldMount<Canvas2dSurface, MediaMotionPreference>;

/// Reuse the page's grid canvas, or append a fixed full-viewport one.
fn grid_canvas(document: &web::Document) -> Option<web::HtmlCanvasElement> {
    if let Some(el) = document.get_element_by_id(FIELD_CANVAS_ID) {
        return el.dyn_into::<web::HtmlCanvasElement>().ok();
    }
    let canvas = document
        .create_element("canvas")
        .ok()?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()?;
    canvas.set_id(FIELD_CANVAS_ID);
    canvas.set_class_name(FIELD_CANVAS_CLASS);
    for (prop, value) in [
        ("position", "fixed"),
        ("inset", "0"),
        ("pointer-events", "none"),
        ("z-index", "0"),
    ] {
        dom::set_style(&canvas, prop, value);
    }
    document.body()?.prepend_with_node_1(&canvas).ok()?;
    Some(canvas)
}

/// Mount the background node field. `None` when there is nothing to draw on.
pub fn mount(window: &web::Window, document: &web::Document) -> Option<GridMount> {
    let canvas = grid_canvas(document);
    let surface = canvas.as_ref().and_then(Canvas2dSurface::from_canvas);

    let (w, h) = dom::viewport_size();
    if let Some(c) = &canvas {
        dom::sync_canvas_backing_size(c, w, h);
    }
    let mut field = NodeField::new(NodeFieldConfig::default());
    field.initialize(w, h);
    let field = Rc::new(RefCell::new(field));

    let mut scheduler = RafScheduler::new();
    let mount = field::mount(
        &mut scheduler,
        field.clone(),
        surface,
        MediaMotionPreference::new(),
    )?;

    events::wire_pointer_field(window, field.clone(), mount.token());
    let resize_field = field;
    events::wire_resize(window, mount.token(), move |w, h| {
        if let Some(c) = &canvas {
            dom::sync_canvas_backing_size(c, w, h);
        }
        resize_field.borrow_mut().on_viewport_resize(w, h);
    });
    Some(mount)
}
