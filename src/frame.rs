use instant::Instant;
use motion_core::{CancelToken, FrameClient, FrameScheduler, FrameTime};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Drives frame clients from `requestAnimationFrame`.
#[derive(Default)]
pub struct RafScheduler;

impl RafScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl FrameScheduler for RafScheduler {
    fn run(&mut self, client: Rc<RefCell<dyn FrameClient>>, token: CancelToken) {
        start_loop(client, token);
    }
}

fn request(tick: &Tick, pending: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        pending.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
}

pub fn start_loop(client: Rc<RefCell<dyn FrameClient>>, token: CancelToken) {
    if token.is_cancelled() {
        return;
    }
    let tick: Tick = Rc::new(RefCell::new(None));
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let origin = Instant::now();
    let mut last = origin;

    let tick_clone = tick.clone();
    let pending_tick = pending.clone();
    let token_tick = token.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_tick.set(None);
        if token_tick.is_cancelled() {
            return;
        }
        let now = Instant::now();
        let time = FrameTime {
            now_sec: (now - origin).as_secs_f64(),
            dt_sec: (now - last).as_secs_f32(),
        };
        last = now;
        client.borrow_mut().frame(time);
        // the client may have torn itself down during this frame
        if !token_tick.is_cancelled() {
            request(&tick_clone, &pending_tick);
        }
    }) as Box<dyn FnMut()>));

    let tick_cancel = tick.clone();
    let pending_cancel = pending.clone();
    token.on_cancel(move || {
        if let (Some(id), Some(w)) = (pending_cancel.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // break the closure <-> Rc cycle once no frame can call it again
        tick_cancel.borrow_mut().take();
    });

    request(&tick, &pending);
}
