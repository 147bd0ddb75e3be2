//! Scroll-progress scene sequencer for the hero section.
//!
//! Progress in `[0, 1]` selects one scene out of a [`SceneSet`] and moves the
//! three parallax layers. Each crossing into a scene replays the content
//! entry timeline through a [`Transitioner`].

use crate::constants::*;
use crate::ease::Ease;
use crate::scene::{Scene, SceneSet};
use crate::scroll::ScrollEvent;
use crate::tween::{pose, Pose, Prop, TargetId, Timeline, TransitionHandle, Transitioner};
use smallvec::SmallVec;

pub const BACKGROUND: TargetId = TargetId::named("parallax-background");
pub const MIDGROUND: TargetId = TargetId::named("parallax-midground");
pub const FOREGROUND: TargetId = TargetId::named("parallax-foreground");
pub const HEADLINE: TargetId = TargetId::named("scene-headline");
pub const SUBHEADLINE: TargetId = TargetId::named("scene-subheadline");
pub const VISUAL: TargetId = TargetId::named("scene-visual");

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerTransform {
    pub y: f32,
    pub scale: f32,
    /// Degrees.
    pub rotation_y: f32,
}

impl LayerTransform {
    pub const IDENTITY: Self = Self {
        y: 0.0,
        scale: 1.0,
        rotation_y: 0.0,
    };

    pub fn pose(&self) -> Pose {
        pose(&[
            (Prop::Y, self.y),
            (Prop::Scale, self.scale),
            (Prop::RotationY, self.rotation_y),
        ])
    }
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerTransforms {
    pub background: LayerTransform,
    pub midground: LayerTransform,
    pub foreground: LayerTransform,
}

impl LayerTransforms {
    pub const IDENTITY: Self = Self {
        background: LayerTransform::IDENTITY,
        midground: LayerTransform::IDENTITY,
        foreground: LayerTransform::IDENTITY,
    };

    /// Parallax offsets for `progress`; linear, no easing.
    pub fn at(progress: f32, config: &SequencerConfig) -> Self {
        Self {
            background: LayerTransform {
                y: progress * config.background_y,
                scale: 1.0 + progress * config.background_scale,
                rotation_y: 0.0,
            },
            midground: LayerTransform {
                y: progress * config.midground_y,
                scale: 1.0,
                rotation_y: progress * config.midground_rotation_y,
            },
            foreground: LayerTransform {
                y: progress * config.foreground_y,
                scale: 1.0,
                rotation_y: 0.0,
            },
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

#[derive(Clone, Debug)]
pub struct SequencerConfig {
    pub background_y: f32,
    pub background_scale: f32,
    pub midground_y: f32,
    pub midground_rotation_y: f32,
    pub foreground_y: f32,
    pub headline_hidden_y: f32,
    pub subheadline_hidden_y: f32,
    pub visual_hidden_scale: f32,
    pub headline_delay: f32,
    pub headline_duration: f32,
    pub subheadline_duration: f32,
    pub subheadline_overlap: f32,
    pub visual_duration: f32,
    pub visual_overlap: f32,
    pub ease: Ease,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            background_y: BACKGROUND_Y_PER_PROGRESS,
            background_scale: BACKGROUND_SCALE_PER_PROGRESS,
            midground_y: MIDGROUND_Y_PER_PROGRESS,
            midground_rotation_y: MIDGROUND_ROTATION_Y_PER_PROGRESS,
            foreground_y: FOREGROUND_Y_PER_PROGRESS,
            headline_hidden_y: HEADLINE_HIDDEN_Y,
            subheadline_hidden_y: SUBHEADLINE_HIDDEN_Y,
            visual_hidden_scale: VISUAL_HIDDEN_SCALE,
            headline_delay: HEADLINE_DELAY_SEC,
            headline_duration: HEADLINE_DURATION_SEC,
            subheadline_duration: SUBHEADLINE_DURATION_SEC,
            subheadline_overlap: SUBHEADLINE_OVERLAP_SEC,
            visual_duration: VISUAL_DURATION_SEC,
            visual_overlap: VISUAL_OVERLAP_SEC,
            ease: Ease::Power2Out,
        }
    }
}

impl SequencerConfig {
    /// Reset content to hidden, then stagger it back in: headline first,
    /// subheadline and visual overlapping its tail.
    pub fn entry_timeline(&self) -> Timeline {
        Timeline::new(self.ease)
            .set(
                HEADLINE,
                pose(&[(Prop::Opacity, 0.0), (Prop::Y, self.headline_hidden_y)]),
            )
            .set(
                SUBHEADLINE,
                pose(&[(Prop::Opacity, 0.0), (Prop::Y, self.subheadline_hidden_y)]),
            )
            .set(
                VISUAL,
                pose(&[(Prop::Opacity, 0.0), (Prop::Scale, self.visual_hidden_scale)]),
            )
            .to_at(
                HEADLINE,
                pose(&[(Prop::Opacity, 1.0), (Prop::Y, 0.0)]),
                self.headline_duration,
                self.headline_delay,
            )
            .to_at(
                SUBHEADLINE,
                pose(&[(Prop::Opacity, 1.0), (Prop::Y, 0.0)]),
                self.subheadline_duration,
                -self.subheadline_overlap,
            )
            .to_at(
                VISUAL,
                pose(&[(Prop::Opacity, 1.0), (Prop::Scale, 1.0)]),
                self.visual_duration,
                -self.visual_overlap,
            )
    }
}

fn visible_content() -> [(TargetId, Pose); 3] {
    [
        (HEADLINE, pose(&[(Prop::Opacity, 1.0), (Prop::Y, 0.0)])),
        (SUBHEADLINE, pose(&[(Prop::Opacity, 1.0), (Prop::Y, 0.0)])),
        (VISUAL, pose(&[(Prop::Opacity, 1.0), (Prop::Scale, 1.0)])),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneChange {
    pub from: usize,
    pub to: usize,
}

pub struct SceneSequencer<T> {
    scenes: SceneSet,
    config: SequencerConfig,
    transitioner: T,
    current: usize,
    progress: Option<f32>,
    layers: LayerTransforms,
    reduced_motion: bool,
    in_flight: SmallVec<[TransitionHandle; 2]>,
    entries: Vec<u32>,
    torn_down: bool,
}

impl<T: Transitioner> SceneSequencer<T> {
    /// New sequencer resting on the first scene. Call [`start`](Self::start)
    /// to run the initial entry.
    pub fn new(
        scenes: SceneSet,
        config: SequencerConfig,
        transitioner: T,
        reduced_motion: bool,
    ) -> Self {
        let entries = vec![0; scenes.len()];
        Self {
            scenes,
            config,
            transitioner,
            current: 0,
            progress: None,
            layers: LayerTransforms::IDENTITY,
            reduced_motion,
            in_flight: SmallVec::new(),
            entries,
            torn_down: false,
        }
    }

    pub fn start(&mut self) {
        log::info!(
            "[hero] start scenes={} reduced_motion={}",
            self.scenes.len(),
            self.reduced_motion
        );
        self.apply_layers(LayerTransforms::IDENTITY);
        self.on_scene_enter(self.current);
    }

    /// Consume an event from a [`ScrollProgressSource`](crate::scroll::ScrollProgressSource).
    ///
    /// Scene crossings are derived from progress, so range events carry no
    /// extra information here.
    pub fn handle(&mut self, event: &ScrollEvent) -> Option<SceneChange> {
        match *event {
            ScrollEvent::Progress(p) => self.on_scroll_progress(p),
            _ => None,
        }
    }

    pub fn on_scroll_progress(&mut self, progress: f32) -> Option<SceneChange> {
        if self.torn_down || !progress.is_finite() {
            return None;
        }
        let p = progress.clamp(0.0, 1.0);
        if self.progress == Some(p) {
            return None;
        }
        self.progress = Some(p);

        let change = match self.scenes.index_at(p) {
            Some(next) if next != self.current => {
                let from = self.current;
                self.current = next;
                log::info!(
                    "[hero] scene {} -> {} ({}) at progress {:.3}",
                    from,
                    next,
                    self.scenes.get(next).map_or("?", |s| s.id),
                    p
                );
                self.on_scene_enter(next);
                Some(SceneChange { from, to: next })
            }
            // No match keeps the current scene.
            _ => None,
        };

        let layers = if self.reduced_motion {
            LayerTransforms::IDENTITY
        } else {
            LayerTransforms::at(p, &self.config)
        };
        self.apply_layers(layers);
        change
    }

    /// Replay the content entry for scene `index`, superseding any entry in flight.
    pub fn on_scene_enter(&mut self, index: usize) {
        if self.torn_down {
            return;
        }
        if let Some(n) = self.entries.get_mut(index) {
            *n += 1;
        }
        self.cancel_in_flight();
        if self.reduced_motion {
            for (target, pose) in visible_content() {
                self.transitioner.set(&target, &pose);
            }
            return;
        }
        let handle = self.transitioner.play(self.config.entry_timeline());
        if self.transitioner.is_active(handle) {
            self.in_flight.push(handle);
        }
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        if self.reduced_motion == reduced || self.torn_down {
            return;
        }
        self.reduced_motion = reduced;
        log::info!("[hero] reduced_motion={}", reduced);
        if reduced {
            self.cancel_in_flight();
            for (target, pose) in visible_content() {
                self.transitioner.set(&target, &pose);
            }
            self.apply_layers(LayerTransforms::IDENTITY);
        } else {
            let p = self.progress.unwrap_or(0.0);
            self.apply_layers(LayerTransforms::at(p, &self.config));
        }
    }

    /// Cancel everything in flight. Later calls are ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.cancel_in_flight();
        self.transitioner.cancel_all();
        self.torn_down = true;
        log::info!("[hero] teardown");
    }

    fn cancel_in_flight(&mut self) {
        for handle in self.in_flight.drain(..) {
            self.transitioner.cancel(handle);
        }
        for target in [HEADLINE, SUBHEADLINE, VISUAL] {
            self.transitioner.kill_tweens_of(&target);
        }
    }

    fn apply_layers(&mut self, layers: LayerTransforms) {
        self.layers = layers;
        self.transitioner.set(&BACKGROUND, &layers.background.pose());
        self.transitioner.set(&MIDGROUND, &layers.midground.pose());
        self.transitioner.set(&FOREGROUND, &layers.foreground.pose());
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_scene(&self) -> &Scene {
        &self.scenes.as_slice()[self.current]
    }

    pub fn scenes(&self) -> &SceneSet {
        &self.scenes
    }

    pub fn layers(&self) -> LayerTransforms {
        self.layers
    }

    pub fn progress(&self) -> Option<f32> {
        self.progress
    }

    pub fn is_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// How many times the entry for scene `index` has been triggered.
    pub fn entry_count(&self, index: usize) -> u32 {
        self.entries.get(index).copied().unwrap_or(0)
    }

    /// One flag per scene; only the current scene's dot is lit.
    pub fn indicator(&self) -> Vec<bool> {
        (0..self.scenes.len()).map(|i| i == self.current).collect()
    }

    pub fn has_transition_in_flight(&self) -> bool {
        self.in_flight
            .iter()
            .any(|h| self.transitioner.is_active(*h))
    }

    pub fn transitioner(&self) -> &T {
        &self.transitioner
    }

    pub fn transitioner_mut(&mut self) -> &mut T {
        &mut self.transitioner
    }
}
