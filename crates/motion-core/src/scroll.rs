//! Scroll observation: pinned-region progress and range crossing events.

use crate::constants::{PIN_VIEWPORT_MULTIPLIER, SCRUB_LAG_SEC, SCRUB_SNAP_EPSILON};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollEvent {
    /// Normalized progress through the pinned region changed.
    Progress(f32),
    /// Range `i` was entered while scrolling forward.
    Enter(usize),
    /// Range `i` was left while scrolling forward.
    Leave(usize),
    /// Range `i` was entered while scrolling back up.
    EnterBack(usize),
    /// Range `i` was left while scrolling back up.
    LeaveBack(usize),
}

/// Produces normalized progress plus boundary crossings from raw scroll offsets.
pub trait ScrollProgressSource {
    /// Observe the scroll offset `scroll_y`; resulting events are appended to `out`.
    fn update(&mut self, scroll_y: f32, out: &mut Vec<ScrollEvent>);
    fn progress(&self) -> f32;
    /// Stop observing. Later updates produce no events.
    fn kill(&mut self);
    fn is_killed(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinGeometry {
    /// Scroll offset at which the container's top reaches the viewport top.
    pub start_px: f32,
    pub viewport_height: f32,
    /// Pinned scroll distance in viewport heights.
    pub multiplier: f32,
}

impl PinGeometry {
    pub fn new(start_px: f32, viewport_height: f32) -> Self {
        Self {
            start_px,
            viewport_height,
            multiplier: PIN_VIEWPORT_MULTIPLIER,
        }
    }

    pub fn span_px(&self) -> f32 {
        (self.viewport_height * self.multiplier).max(0.0)
    }

    pub fn progress_at(&self, scroll_y: f32) -> f32 {
        let span = self.span_px();
        if span <= 0.0 {
            return if scroll_y >= self.start_px { 1.0 } else { 0.0 };
        }
        ((scroll_y - self.start_px) / span).clamp(0.0, 1.0)
    }
}

/// Progress source for a region pinned over `multiplier` viewport heights.
#[derive(Clone, Debug)]
pub struct PinnedScroll {
    geometry: PinGeometry,
    ranges: Vec<(f32, f32)>,
    inside: Vec<bool>,
    last: Option<f32>,
    killed: bool,
}

impl PinnedScroll {
    pub fn new(geometry: PinGeometry) -> Self {
        Self {
            geometry,
            ranges: Vec::new(),
            inside: Vec::new(),
            last: None,
            killed: false,
        }
    }

    /// Watch progress sub-ranges `[start, end)` for crossings. A range ending
    /// at 1 also contains 1.
    pub fn with_ranges(mut self, ranges: impl IntoIterator<Item = (f32, f32)>) -> Self {
        self.ranges = ranges.into_iter().collect();
        self.inside = vec![false; self.ranges.len()];
        self
    }

    pub fn geometry(&self) -> PinGeometry {
        self.geometry
    }

    pub fn set_geometry(&mut self, geometry: PinGeometry) {
        self.geometry = geometry;
    }

    fn contains(range: (f32, f32), p: f32) -> bool {
        range.0 <= p && (p < range.1 || (range.1 >= 1.0 && p <= range.1))
    }
}

impl ScrollProgressSource for PinnedScroll {
    fn update(&mut self, scroll_y: f32, out: &mut Vec<ScrollEvent>) {
        if self.killed || !scroll_y.is_finite() {
            return;
        }
        let p = self.geometry.progress_at(scroll_y);
        if self.last == Some(p) {
            return;
        }
        // First observation counts as arriving from above.
        let forward = self.last.map_or(true, |prev| p > prev);
        self.last = Some(p);
        out.push(ScrollEvent::Progress(p));

        let now: Vec<bool> = self.ranges.iter().map(|&r| Self::contains(r, p)).collect();
        for (i, (&was, &is)) in self.inside.iter().zip(&now).enumerate() {
            if was && !is {
                out.push(if forward {
                    ScrollEvent::Leave(i)
                } else {
                    ScrollEvent::LeaveBack(i)
                });
            }
        }
        for (i, (&was, &is)) in self.inside.iter().zip(&now).enumerate() {
            if !was && is {
                out.push(if forward {
                    ScrollEvent::Enter(i)
                } else {
                    ScrollEvent::EnterBack(i)
                });
            }
        }
        self.inside = now;
    }

    fn progress(&self) -> f32 {
        self.last.unwrap_or(0.0)
    }

    fn kill(&mut self) {
        if !self.killed {
            log::debug!("[scroll] observer killed");
        }
        self.killed = true;
    }

    fn is_killed(&self) -> bool {
        self.killed
    }
}

/// Smoothed follower of a progress value, advanced by the frame clock.
#[derive(Clone, Debug)]
pub struct Scrub {
    lag_sec: f32,
    target: f32,
    current: Option<f32>,
}

impl Default for Scrub {
    fn default() -> Self {
        Self::new(SCRUB_LAG_SEC)
    }
}

impl Scrub {
    pub fn new(lag_sec: f32) -> Self {
        Self {
            lag_sec,
            target: 0.0,
            current: None,
        }
    }

    pub fn set_target(&mut self, progress: f32) {
        self.target = progress;
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Jump straight to the target (used when motion is reduced).
    pub fn snap(&mut self) -> f32 {
        self.current = Some(self.target);
        self.target
    }

    pub fn value(&self) -> f32 {
        self.current.unwrap_or(self.target)
    }

    pub fn is_settled(&self) -> bool {
        self.current == Some(self.target)
    }

    pub fn advance(&mut self, dt_sec: f32) -> f32 {
        let Some(current) = self.current else {
            return self.snap();
        };
        let alpha = if self.lag_sec > 0.0 {
            1.0 - (-dt_sec.max(0.0) / self.lag_sec).exp()
        } else {
            1.0
        };
        let mut next = current + (self.target - current) * alpha;
        if (self.target - next).abs() < SCRUB_SNAP_EPSILON {
            next = self.target;
        }
        self.current = Some(next);
        next
    }
}
