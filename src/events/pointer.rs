use super::listen;
use motion_core::{CancelToken, NodeField};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Feed window pointer moves into the node field.
///
/// The canvas itself ignores pointer events, so the listener sits on the
/// window and uses client coordinates, which match the fixed canvas.
pub fn wire_pointer_field(window: &web::Window, field: Rc<RefCell<NodeField>>, token: &CancelToken) {
    listen(window.as_ref(), "pointermove", token, move |ev: web::PointerEvent| {
        field
            .borrow_mut()
            .on_pointer_move(ev.client_x() as f32, ev.client_y() as f32);
    });
}
