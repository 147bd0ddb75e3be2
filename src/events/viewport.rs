use super::listen;
use crate::dom;
use motion_core::CancelToken;
use web_sys as web;

/// Call `on_resize(width, height)` with the new viewport size on every resize.
pub fn wire_resize(
    window: &web::Window,
    token: &CancelToken,
    mut on_resize: impl FnMut(u32, u32) + 'static,
) {
    listen(window.as_ref(), "resize", token, move |_ev: web::Event| {
        let (w, h) = dom::viewport_size();
        on_resize(w, h);
    });
}

/// Call `on_scroll(scroll_y)` on every window scroll.
pub fn wire_scroll(window: &web::Window, token: &CancelToken, mut on_scroll: impl FnMut(f32) + 'static) {
    listen(window.as_ref(), "scroll", token, move |_ev: web::Event| {
        on_scroll(dom::scroll_y());
    });
}
