use std::cell::Cell;
use std::rc::Rc;

/// Source of the user's "reduce motion" accessibility preference.
///
/// Components query it when mounted and again on every frame, so a
/// preference flipped at runtime takes effect without remounting.
pub trait MotionPreference {
    fn prefers_reduced_motion(&self) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StaticMotion(pub bool);

impl MotionPreference for StaticMotion {
    fn prefers_reduced_motion(&self) -> bool {
        self.0
    }
}

#[derive(Clone, Debug, Default)]
pub struct SharedMotion(Rc<Cell<bool>>);

impl SharedMotion {
    pub fn new(reduced: bool) -> Self {
        Self(Rc::new(Cell::new(reduced)))
    }

    pub fn set(&self, reduced: bool) {
        self.0.set(reduced);
    }
}

impl MotionPreference for SharedMotion {
    fn prefers_reduced_motion(&self) -> bool {
        self.0.get()
    }
}
