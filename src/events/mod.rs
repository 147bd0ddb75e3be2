pub mod pointer;
pub mod viewport;

pub use pointer::wire_pointer_field;
pub use viewport::{wire_resize, wire_scroll};

use motion_core::CancelToken;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Add `handler` for `event` on `target` until `token` is cancelled.
///
/// The closure stays owned by the cancel hook instead of being leaked with
/// `forget`, so teardown both detaches and frees it.
pub fn listen<E>(
    target: &web::EventTarget,
    event: &'static str,
    token: &CancelToken,
    handler: impl FnMut(E) + 'static,
) where
    E: FromWasmAbi + 'static,
{
    if token.is_cancelled() {
        return;
    }
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("[events] could not listen for {}: {:?}", event, e);
        return;
    }
    let target = target.clone();
    token.on_cancel(move || {
        _ = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        drop(closure);
    });
}
