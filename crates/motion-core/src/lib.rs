//! Platform-independent motion engine for the hero page.
//!
//! Nothing here touches the DOM: the web frontend and the headless runner
//! plug in a [`surface::Surface`], a [`scheduler::FrameScheduler`] and a
//! [`motion::MotionPreference`], and feed pointer and scroll input.

pub mod constants;
pub mod ease;
pub mod field;
pub mod motion;
pub mod reveal;
pub mod scene;
pub mod scheduler;
pub mod scroll;
pub mod sequencer;
pub mod surface;
pub mod tween;

pub use constants::*;
pub use ease::Ease;
pub use field::{FrameStats, GridNode, NodeField, NodeFieldConfig, NodeFieldLayer, NodeFieldMount};
pub use motion::{MotionPreference, SharedMotion, StaticMotion};
pub use reveal::{counter_text, CardGrid, CardGridConfig, CounterSet, RevealBatch, RevealConfig};
pub use scene::{Scene, SceneConfigError, SceneContent, SceneSet, Visual};
pub use scheduler::{CancelToken, FrameClient, FrameScheduler, FrameTime, ManualFrameStepper};
pub use scroll::{PinGeometry, PinnedScroll, ScrollEvent, ScrollProgressSource, Scrub};
pub use sequencer::{LayerTransform, LayerTransforms, SceneChange, SceneSequencer, SequencerConfig};
pub use surface::{DrawCommand, Glow, RecordingSurface, Rgba, Surface};
pub use tween::{Pose, Prop, TargetId, Timeline, TransitionHandle, Transitioner, TweenEngine};
