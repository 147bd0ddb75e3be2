//! Time-based property interpolation.
//!
//! A [`Timeline`] is a list of steps placed on a local time axis. The
//! [`TweenEngine`] plays timelines against a store of per-target property
//! values, advanced by the frame clock. Components hold only
//! [`TransitionHandle`]s, so they can cancel their own in-flight work.

use crate::ease::Ease;
use fnv::{FnvHashMap, FnvHashSet};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prop {
    Opacity,
    X,
    Y,
    Scale,
    /// Degrees around the vertical axis.
    RotationY,
    /// Free scalar, e.g. a counter's displayed number.
    Value,
}

impl Prop {
    /// Value a property has before anything touched it.
    #[inline]
    pub fn resting(self) -> f32 {
        match self {
            Prop::Opacity | Prop::Scale => 1.0,
            Prop::X | Prop::Y | Prop::RotationY | Prop::Value => 0.0,
        }
    }
}

pub type Pose = SmallVec<[(Prop, f32); 4]>;

#[inline]
pub fn pose(items: &[(Prop, f32)]) -> Pose {
    SmallVec::from_slice(items)
}

#[inline]
pub fn pose_get(pose: &[(Prop, f32)], prop: Prop) -> Option<f32> {
    pose.iter().find(|(p, _)| *p == prop).map(|(_, v)| *v)
}

fn pose_put(pose: &mut Pose, prop: Prop, value: f32) {
    match pose.iter_mut().find(|(p, _)| *p == prop) {
        Some(slot) => slot.1 = value,
        None => pose.push((prop, value)),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(Cow<'static, str>);

impl TargetId {
    pub const fn named(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn indexed(prefix: &str, index: usize) -> Self {
        Self(Cow::Owned(format!("{prefix}-{index}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
enum StepKind {
    Set(Pose),
    To {
        to: Pose,
        duration: f32,
        ease: Ease,
    },
    /// `from` is rendered as soon as the timeline starts playing.
    FromTo {
        from: Pose,
        to: Pose,
        duration: f32,
        ease: Ease,
    },
}

#[derive(Clone, Debug, PartialEq)]
struct Step {
    target: TargetId,
    start: f32,
    kind: StepKind,
}

impl Step {
    fn end(&self) -> f32 {
        match &self.kind {
            StepKind::Set(_) => self.start,
            StepKind::To { duration, .. } | StepKind::FromTo { duration, .. } => {
                self.start + duration.max(0.0)
            }
        }
    }
}

/// Ordered set of tweens on a local time axis.
///
/// Offsets passed to the builder methods are relative to the current end of
/// the timeline: positive values add a delay, negative values overlap the
/// previous tween.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    steps: Vec<Step>,
    default_ease: Ease,
}

impl Timeline {
    pub fn new(default_ease: Ease) -> Self {
        Self {
            steps: Vec::new(),
            default_ease,
        }
    }

    pub fn duration(&self) -> f32 {
        self.steps.iter().map(Step::end).fold(0.0, f32::max)
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn anchor(&self, offset: f32) -> f32 {
        (self.duration() + offset).max(0.0)
    }

    /// Jump `target` to `pose` at the current end of the timeline.
    pub fn set(mut self, target: TargetId, pose: Pose) -> Self {
        let start = self.anchor(0.0);
        self.steps.push(Step {
            target,
            start,
            kind: StepKind::Set(pose),
        });
        self
    }

    pub fn to(self, target: TargetId, to: Pose, duration: f32) -> Self {
        self.to_at(target, to, duration, 0.0)
    }

    pub fn to_at(mut self, target: TargetId, to: Pose, duration: f32, offset: f32) -> Self {
        let start = self.anchor(offset);
        let ease = self.default_ease;
        self.steps.push(Step {
            target,
            start,
            kind: StepKind::To { to, duration, ease },
        });
        self
    }

    /// Tween each target from `from` to `to`, starting `each` seconds apart.
    pub fn stagger_from_to(
        mut self,
        targets: &[TargetId],
        from: &Pose,
        to: &Pose,
        duration: f32,
        each: f32,
        ease: Ease,
    ) -> Self {
        let base = self.anchor(0.0);
        for (i, target) in targets.iter().enumerate() {
            self.steps.push(Step {
                target: target.clone(),
                start: base + each * i as f32,
                kind: StepKind::FromTo {
                    from: from.clone(),
                    to: to.clone(),
                    duration,
                    ease,
                },
            });
        }
        self
    }

    /// `(start, end)` of the first tween acting on `target`, ignoring sets.
    pub fn span_of(&self, target: &TargetId) -> Option<(f32, f32)> {
        self.steps
            .iter()
            .find(|s| &s.target == target && !matches!(s.kind, StepKind::Set(_)))
            .map(|s| (s.start, s.end()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionHandle(u64);

/// Interpolates named properties over time, with cancellation.
pub trait Transitioner {
    /// Start `timeline`; steps at time zero are applied before returning.
    fn play(&mut self, timeline: Timeline) -> TransitionHandle;
    fn set(&mut self, target: &TargetId, pose: &[(Prop, f32)]);
    /// Drop every pending or running tween on `target`, leaving its values as they are.
    fn kill_tweens_of(&mut self, target: &TargetId);
    fn cancel(&mut self, handle: TransitionHandle);
    fn cancel_all(&mut self);
    fn is_active(&self, handle: TransitionHandle) -> bool;
}

#[derive(Debug)]
struct RunningStep {
    step: Step,
    from: Option<Pose>,
    done: bool,
}

#[derive(Debug)]
struct Running {
    handle: TransitionHandle,
    elapsed: f32,
    steps: Vec<RunningStep>,
}

impl Running {
    fn finished(&self) -> bool {
        self.steps.iter().all(|s| s.done)
    }
}

#[derive(Debug, Default)]
struct ValueStore {
    values: FnvHashMap<TargetId, Pose>,
    dirty: FnvHashSet<TargetId>,
}

impl ValueStore {
    fn get(&self, target: &TargetId, prop: Prop) -> f32 {
        self.values
            .get(target)
            .and_then(|p| pose_get(p, prop))
            .unwrap_or_else(|| prop.resting())
    }

    fn write(&mut self, target: &TargetId, prop: Prop, value: f32) {
        let slot = self.values.entry(target.clone()).or_default();
        pose_put(slot, prop, value);
        if !self.dirty.contains(target) {
            self.dirty.insert(target.clone());
        }
    }

    fn write_pose(&mut self, target: &TargetId, pose: &[(Prop, f32)]) {
        for &(prop, value) in pose {
            self.write(target, prop, value);
        }
    }
}

// Float slack when summing frame deltas against step end times.
const END_EPSILON_SEC: f32 = 1e-5;

fn advance_run(run: &mut Running, store: &mut ValueStore) {
    let now = run.elapsed;
    for rs in run.steps.iter_mut().filter(|s| !s.done) {
        if now < rs.step.start {
            continue;
        }
        let target = &rs.step.target;
        match &rs.step.kind {
            StepKind::Set(pose) => {
                store.write_pose(target, pose);
                rs.done = true;
            }
            StepKind::To { to, duration, ease } | StepKind::FromTo { to, duration, ease, .. } => {
                // A plain `to` picks up wherever the target is when it starts.
                let from = rs.from.get_or_insert_with(|| {
                    to.iter()
                        .map(|&(prop, _)| (prop, store.get(target, prop)))
                        .collect()
                });
                // completion is judged on the clock, not on the ratio
                let finished = *duration <= 0.0 || now + END_EPSILON_SEC >= rs.step.end();
                let local = if finished {
                    1.0
                } else {
                    ((now - rs.step.start) / duration).min(1.0)
                };
                let k = ease.apply(local);
                for &(prop, end) in to.iter() {
                    let begin = pose_get(from, prop).unwrap_or_else(|| prop.resting());
                    let value = if finished {
                        end
                    } else {
                        begin + (end - begin) * k
                    };
                    store.write(target, prop, value);
                }
                if finished {
                    rs.done = true;
                }
            }
        }
    }
}

/// Default [`Transitioner`]: a per-component registry of running timelines.
#[derive(Debug, Default)]
pub struct TweenEngine {
    store: ValueStore,
    running: Vec<Running>,
    next_handle: u64,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move every running timeline forward by `dt_sec` and drop finished ones.
    pub fn advance(&mut self, dt_sec: f32) {
        let dt = dt_sec.max(0.0);
        for run in &mut self.running {
            run.elapsed += dt;
            advance_run(run, &mut self.store);
        }
        self.running.retain(|r| !r.finished());
    }

    pub fn value(&self, target: &TargetId, prop: Prop) -> f32 {
        self.store.get(target, prop)
    }

    pub fn pose_of(&self, target: &TargetId) -> Option<&Pose> {
        self.store.values.get(target)
    }

    /// Targets written since the last call, for the host to re-style.
    pub fn drain_dirty(&mut self) -> Vec<TargetId> {
        self.store.dirty.drain().collect()
    }

    pub fn active_count(&self) -> usize {
        self.running.len()
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }
}

impl Transitioner for TweenEngine {
    fn play(&mut self, timeline: Timeline) -> TransitionHandle {
        let handle = TransitionHandle(self.next_handle);
        self.next_handle += 1;
        let mut run = Running {
            handle,
            elapsed: 0.0,
            steps: timeline
                .steps
                .into_iter()
                .map(|step| {
                    let from = match &step.kind {
                        StepKind::FromTo { from, .. } => Some(from.clone()),
                        _ => None,
                    };
                    RunningStep {
                        step,
                        from,
                        done: false,
                    }
                })
                .collect(),
        };
        for rs in &run.steps {
            if let StepKind::FromTo { from, .. } = &rs.step.kind {
                self.store.write_pose(&rs.step.target, from);
            }
        }
        advance_run(&mut run, &mut self.store);
        if !run.finished() {
            self.running.push(run);
        }
        handle
    }

    fn set(&mut self, target: &TargetId, pose: &[(Prop, f32)]) {
        self.store.write_pose(target, pose);
    }

    fn kill_tweens_of(&mut self, target: &TargetId) {
        for run in &mut self.running {
            run.steps.retain(|s| &s.step.target != target);
        }
        self.running.retain(|r| !r.finished());
    }

    fn cancel(&mut self, handle: TransitionHandle) {
        self.running.retain(|r| r.handle != handle);
    }

    fn cancel_all(&mut self) {
        self.running.clear();
    }

    fn is_active(&self, handle: TransitionHandle) -> bool {
        self.running.iter().any(|r| r.handle == handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX: TargetId = TargetId::named("box");

    #[test]
    fn to_interpolates_from_current_value() {
        let mut engine = TweenEngine::new();
        engine.set(&BOX, &[(Prop::Y, 40.0)]);
        let tl = Timeline::new(Ease::Linear).to(BOX, pose(&[(Prop::Y, 0.0)]), 1.0);
        let handle = engine.play(tl);
        engine.advance(0.25);
        assert!((engine.value(&BOX, Prop::Y) - 30.0).abs() < 1e-4);
        engine.advance(1.0);
        assert_eq!(engine.value(&BOX, Prop::Y), 0.0);
        assert!(!engine.is_active(handle));
    }

    #[test]
    fn kill_leaves_value_in_place() {
        let mut engine = TweenEngine::new();
        let tl = Timeline::new(Ease::Linear).to(BOX, pose(&[(Prop::Opacity, 0.0)]), 2.0);
        engine.play(tl);
        engine.advance(1.0);
        engine.kill_tweens_of(&BOX);
        engine.advance(1.0);
        assert!((engine.value(&BOX, Prop::Opacity) - 0.5).abs() < 1e-4);
        assert!(engine.is_idle());
    }
}
