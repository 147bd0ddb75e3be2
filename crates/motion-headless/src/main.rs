use clap::Parser;
use glam::Vec2;
use motion_core::field;
use motion_core::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;

const FRAME_DT: f32 = 1.0 / 60.0;
const SETTLE_MAX_FRAMES: usize = 60 * 30;

/// Sweep a scroll and pointer path through the node field and hero sequencer.
#[derive(Parser, Debug)]
#[command(name = "motion-headless", version, about)]
struct Args {
    /// Viewport width in CSS pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,
    /// Viewport height in CSS pixels
    #[arg(long, default_value_t = 800)]
    height: u32,
    /// Frames to simulate at 60 fps
    #[arg(long, default_value_t = 600)]
    frames: usize,
    /// Behave as if the user asked for reduced motion
    #[arg(long)]
    reduced_motion: bool,
    /// Seed for the pointer path
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Scrolls linearly through the pinned span and wanders the pointer.
struct Sweep {
    field: Rc<RefCell<NodeField>>,
    source: PinnedScroll,
    scrub: Scrub,
    sequencer: SceneSequencer<TweenEngine>,
    rng: StdRng,
    pointer: Vec2,
    viewport: Vec2,
    frame: usize,
    frames: usize,
    events: Vec<ScrollEvent>,
    changes: Vec<SceneChange>,
}

impl Sweep {
    fn is_settled(&self) -> bool {
        self.scrub.is_settled() && !self.sequencer.has_transition_in_flight()
    }
}

impl FrameClient for Sweep {
    fn frame(&mut self, time: FrameTime) {
        self.frame += 1;
        let t = self.frame as f32 / self.frames.max(1) as f32;
        let scroll_y = t * self.source.geometry().span_px();

        let step = Vec2::new(self.rng.gen_range(-24.0..24.0), self.rng.gen_range(-24.0..24.0));
        self.pointer = (self.pointer + step).clamp(Vec2::ZERO, self.viewport);
        self.field
            .borrow_mut()
            .on_pointer_move(self.pointer.x, self.pointer.y);

        self.events.clear();
        self.source.update(scroll_y, &mut self.events);
        for ev in &self.events {
            if let ScrollEvent::Progress(p) = *ev {
                self.scrub.set_target(p);
            }
        }
        let p = if self.sequencer.is_reduced_motion() {
            self.scrub.snap()
        } else {
            self.scrub.advance(time.dt_sec)
        };
        if let Some(change) = self.sequencer.on_scroll_progress(p) {
            self.changes.push(change);
        }
        self.sequencer.transitioner_mut().advance(time.dt_sec);
        self.sequencer.transitioner_mut().drain_dirty();
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    let args = Args::parse();
    log::info!("{:?}", args);

    let mut stepper = ManualFrameStepper::new();
    let motion = StaticMotion(args.reduced_motion);

    let mut grid = NodeField::new(NodeFieldConfig::default());
    grid.initialize(args.width, args.height);
    let grid = Rc::new(RefCell::new(grid));
    let field_mount = field::mount(
        &mut stepper,
        grid.clone(),
        Some(RecordingSurface::new()),
        motion,
    )
    .ok_or_else(|| anyhow::anyhow!("node field did not mount"))?;

    let scenes = SceneSet::new(scene::default_scenes())?;
    let ranges: Vec<(f32, f32)> = scenes.iter().map(|s| (s.start, s.end)).collect();
    let source =
        PinnedScroll::new(PinGeometry::new(0.0, args.height as f32)).with_ranges(ranges);
    let mut sequencer = SceneSequencer::new(
        scenes,
        SequencerConfig::default(),
        TweenEngine::new(),
        motion.prefers_reduced_motion(),
    );
    sequencer.start();

    let viewport = Vec2::new(args.width as f32, args.height as f32);
    let sweep = Rc::new(RefCell::new(Sweep {
        field: grid.clone(),
        source,
        scrub: Scrub::default(),
        sequencer,
        rng: StdRng::seed_from_u64(args.seed),
        pointer: viewport * 0.5,
        viewport,
        frame: 0,
        frames: args.frames,
        events: Vec::new(),
        changes: Vec::new(),
    }));
    let hero_token = CancelToken::new();
    stepper.run(sweep.clone(), hero_token.clone());

    stepper.step_n(args.frames, FRAME_DT);
    let mut settle_frames = 0;
    while settle_frames < SETTLE_MAX_FRAMES && !sweep.borrow().is_settled() {
        stepper.step(FRAME_DT);
        settle_frames += 1;
    }
    if sweep.borrow().is_settled() {
        log::info!("[hero] settled {} frames after the sweep", settle_frames);
    } else {
        log::warn!("[hero] still moving after {} extra frames", settle_frames);
    }

    {
        let layer = field_mount.layer.borrow();
        let stats = layer.last_stats();
        log::info!(
            "[field] nodes={} spacing={} frames={} last_frame lines={} circles={} glows={}",
            grid.borrow().len(),
            grid.borrow().spacing(),
            layer.frames(),
            stats.lines,
            stats.nodes,
            stats.glows
        );
    }
    {
        let mut s = sweep.borrow_mut();
        let path: Vec<String> = s.changes.iter().map(|c| format!("{}->{}", c.from, c.to)).collect();
        log::info!("[hero] scene changes: {}", path.join(" "));
        let seq = &s.sequencer;
        for (i, scene) in seq.scenes().iter().enumerate() {
            log::info!("[hero] {:<10} entries={}", scene.id, seq.entry_count(i));
        }
        log::info!(
            "[hero] final scene={} progress={:.3}",
            seq.current_scene().id,
            seq.progress().unwrap_or(0.0)
        );
        s.source.kill();
        s.sequencer.teardown();
    }

    field_mount.teardown();
    hero_token.cancel();
    stepper.step(FRAME_DT);
    anyhow::ensure!(stepper.pending() == 0, "frame loops still running after teardown");
    Ok(())
}
