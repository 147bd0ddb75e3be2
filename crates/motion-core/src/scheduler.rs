//! Frame scheduling decoupled from what gets drawn.
//!
//! A [`FrameClient`] is "what to do each frame"; a [`FrameScheduler`] is
//! "how frames are requested". The browser build drives clients from
//! `requestAnimationFrame`, while tests and the headless runner step them by
//! hand with [`ManualFrameStepper`].

use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    pub now_sec: f64,
    pub dt_sec: f32,
}

pub trait FrameClient {
    fn frame(&mut self, time: FrameTime);
}

type CancelHook = Box<dyn FnOnce()>;

#[derive(Default)]
struct TokenInner {
    cancelled: Cell<bool>,
    hooks: RefCell<SmallVec<[CancelHook; 2]>>,
}

/// Shared cancellation flag for a frame loop or a set of listeners.
///
/// Clones observe the same flag. Hooks registered with [`CancelToken::on_cancel`]
/// run exactly once, synchronously, on the first `cancel`.
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Rc<TokenInner>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.get()
    }

    pub fn cancel(&self) {
        if self.inner.cancelled.replace(true) {
            return;
        }
        let hooks = std::mem::take(&mut *self.inner.hooks.borrow_mut());
        for hook in hooks {
            hook();
        }
    }

    /// Run `hook` on cancellation, or right away if already cancelled.
    pub fn on_cancel(&self, hook: impl FnOnce() + 'static) {
        if self.is_cancelled() {
            hook();
        } else {
            self.inner.hooks.borrow_mut().push(Box::new(hook));
        }
    }
}

impl std::fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

pub trait FrameScheduler {
    /// Call `client` once per frame until `token` is cancelled.
    fn run(&mut self, client: Rc<RefCell<dyn FrameClient>>, token: CancelToken);
}

/// Deterministic scheduler: frames happen only when [`step`](Self::step) is called.
#[derive(Default)]
pub struct ManualFrameStepper {
    now_sec: f64,
    loops: Vec<(Rc<RefCell<dyn FrameClient>>, CancelToken)>,
}

impl ManualFrameStepper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_sec(&self) -> f64 {
        self.now_sec
    }

    pub fn pending(&self) -> usize {
        self.loops.iter().filter(|(_, t)| !t.is_cancelled()).count()
    }

    /// Advance the clock by `dt_sec` and run one frame of every live loop.
    /// Returns how many clients were invoked.
    pub fn step(&mut self, dt_sec: f32) -> usize {
        self.now_sec += dt_sec as f64;
        self.loops.retain(|(_, t)| !t.is_cancelled());
        let time = FrameTime {
            now_sec: self.now_sec,
            dt_sec,
        };
        let live: Vec<_> = self.loops.clone();
        let mut ran = 0;
        for (client, token) in live {
            // A client earlier in this frame may have torn down a later one.
            if token.is_cancelled() {
                continue;
            }
            client.borrow_mut().frame(time);
            ran += 1;
        }
        self.loops.retain(|(_, t)| !t.is_cancelled());
        ran
    }

    pub fn step_n(&mut self, frames: usize, dt_sec: f32) {
        for _ in 0..frames {
            self.step(dt_sec);
        }
    }
}

impl FrameScheduler for ManualFrameStepper {
    fn run(&mut self, client: Rc<RefCell<dyn FrameClient>>, token: CancelToken) {
        if token.is_cancelled() {
            return;
        }
        self.loops.push((client, token));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(u32);
    impl FrameClient for Counter {
        fn frame(&mut self, _time: FrameTime) {
            self.0 += 1;
        }
    }

    #[test]
    fn cancel_hooks_run_once() {
        let token = CancelToken::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        token.on_cancel(move || h.set(h.get() + 1));
        token.cancel();
        token.cancel();
        assert_eq!(hits.get(), 1);
        let h = hits.clone();
        token.on_cancel(move || h.set(h.get() + 10));
        assert_eq!(hits.get(), 11);
    }

    #[test]
    fn stepper_stops_calling_after_cancel() {
        let mut stepper = ManualFrameStepper::new();
        let counter = Rc::new(RefCell::new(Counter(0)));
        let token = CancelToken::new();
        stepper.run(counter.clone(), token.clone());
        stepper.step_n(3, 1.0 / 60.0);
        token.cancel();
        assert_eq!(stepper.step(1.0 / 60.0), 0);
        assert_eq!(counter.borrow().0, 3);
        assert_eq!(stepper.pending(), 0);
    }
}
