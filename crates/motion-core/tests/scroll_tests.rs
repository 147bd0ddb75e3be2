// Host-side tests for pinned scroll progress, range events and scrubbing.

use motion_core::*;

// Container top at 600px, 800px viewport: pinned span is 3200px.
fn make_source() -> PinnedScroll {
    let ranges: Vec<(f32, f32)> = SceneSet::hero().iter().map(|s| (s.start, s.end)).collect();
    PinnedScroll::new(PinGeometry::new(600.0, 800.0)).with_ranges(ranges)
}

fn scroll_for(progress: f32) -> f32 {
    600.0 + progress * 3200.0
}

#[test]
fn progress_spans_four_viewport_heights() {
    let g = PinGeometry::new(600.0, 800.0);
    assert_eq!(g.span_px(), 3200.0);
    assert_eq!(g.progress_at(0.0), 0.0);
    assert_eq!(g.progress_at(600.0), 0.0);
    assert_eq!(g.progress_at(2200.0), 0.5);
    assert_eq!(g.progress_at(3800.0), 1.0);
    assert_eq!(g.progress_at(9000.0), 1.0);
}

#[test]
fn degenerate_geometry_steps_at_start() {
    let g = PinGeometry::new(100.0, 0.0);
    assert_eq!(g.progress_at(99.0), 0.0);
    assert_eq!(g.progress_at(100.0), 1.0);
}

#[test]
fn crossings_are_reported_with_direction() {
    let mut src = make_source();
    let mut out = Vec::new();

    src.update(0.0, &mut out);
    assert_eq!(out, vec![ScrollEvent::Progress(0.0), ScrollEvent::Enter(0)]);

    out.clear();
    src.update(scroll_for(0.25), &mut out);
    assert_eq!(
        out,
        vec![
            ScrollEvent::Progress(0.25),
            ScrollEvent::Leave(0),
            ScrollEvent::Enter(1)
        ]
    );

    out.clear();
    src.update(scroll_for(0.3), &mut out);
    assert_eq!(out.len(), 1);

    out.clear();
    src.update(920.0, &mut out);
    assert_eq!(out[1..], [ScrollEvent::LeaveBack(1), ScrollEvent::EnterBack(0)]);

    out.clear();
    src.update(5000.0, &mut out);
    assert_eq!(
        out,
        vec![
            ScrollEvent::Progress(1.0),
            ScrollEvent::Leave(0),
            ScrollEvent::Enter(4)
        ]
    );
}

#[test]
fn same_offset_produces_nothing() {
    let mut src = make_source();
    let mut out = Vec::new();
    src.update(1400.0, &mut out);
    out.clear();
    src.update(1400.0, &mut out);
    assert!(out.is_empty());
    src.update(f32::NAN, &mut out);
    assert!(out.is_empty());
}

#[test]
fn killed_source_is_silent() {
    let mut src = make_source();
    let mut out = Vec::new();
    src.update(1000.0, &mut out);
    src.kill();
    out.clear();
    src.update(3000.0, &mut out);
    assert!(out.is_empty());
    assert!(src.is_killed());
    assert_eq!(src.progress(), 0.125);
}

#[test]
fn scrub_trails_then_settles_on_target() {
    let mut scrub = Scrub::new(1.0);
    scrub.set_target(0.0);
    assert_eq!(scrub.advance(0.016), 0.0);

    scrub.set_target(1.0);
    let after_one_lag = scrub.advance(1.0);
    assert!((after_one_lag - (1.0 - (-1.0f32).exp())).abs() < 1e-5);
    assert!(!scrub.is_settled());

    for _ in 0..600 {
        scrub.advance(1.0 / 60.0);
    }
    assert_eq!(scrub.value(), 1.0);
    assert!(scrub.is_settled());
}

#[test]
fn scrub_snap_skips_the_lag() {
    let mut scrub = Scrub::default();
    scrub.advance(0.0);
    scrub.set_target(0.6);
    assert_eq!(scrub.snap(), 0.6);
    assert_eq!(scrub.value(), 0.6);
}

#[test]
fn source_drives_sequencer_through_events() {
    let mut src = make_source();
    let mut seq = SceneSequencer::new(
        SceneSet::hero(),
        SequencerConfig::default(),
        TweenEngine::new(),
        false,
    );
    seq.start();
    let mut out = Vec::new();
    let mut changes = Vec::new();
    for y in [0.0, 900.0, 1400.0, 2200.0, 2300.0, 1400.0, 3800.0] {
        out.clear();
        src.update(y, &mut out);
        for ev in &out {
            if let Some(change) = seq.handle(ev) {
                changes.push(change.to);
            }
        }
    }
    assert_eq!(changes, vec![1, 2, 1, 4]);
    assert_eq!(seq.entry_count(1), 2);
}
