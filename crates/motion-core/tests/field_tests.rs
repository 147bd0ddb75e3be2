// Host-side tests for the pointer-reactive node field.

use glam::Vec2;
use motion_core::*;
use std::cell::RefCell;
use std::rc::Rc;

fn make_field(width: u32, height: u32) -> NodeField {
    let mut field = NodeField::new(NodeFieldConfig::default());
    field.initialize(width, height);
    field
}

#[test]
fn intensity_and_activation_follow_exact_formula() {
    let mut field = make_field(1200, 800);
    let pointer = Vec2::new(123.0, 77.0);
    field.on_pointer_move(pointer.x, pointer.y);
    for node in field.nodes() {
        let d = node.position().distance(pointer);
        assert_eq!(node.intensity, (1.0 - d / 150.0).max(0.0));
        assert_eq!(node.active, d < 100.0);
    }
    // moving away fully recomputes; nothing stale stays lit
    field.on_pointer_move(-10_000.0, -10_000.0);
    assert!(field.nodes().iter().all(|n| n.intensity == 0.0 && !n.active));
}

#[test]
fn spacing_depends_on_breakpoint() {
    let cfg = NodeFieldConfig::default();
    assert_eq!(cfg.spacing_for_width(767), 80);
    assert_eq!(cfg.spacing_for_width(768), 50);
    assert_eq!(cfg.spacing_for_width(1920), 50);
}

#[test]
fn resize_replaces_the_whole_grid() {
    let mut field = make_field(1000, 600);
    assert_eq!(field.len(), 20 * 12);

    field.on_viewport_resize(500, 300);
    assert_eq!(field.spacing(), 80);
    assert_eq!(field.len(), 7 * 4);
    assert!(field
        .nodes()
        .iter()
        .all(|n| n.position().x < 500.0 && n.position().y < 300.0));

    field.on_viewport_resize(1001, 601);
    assert_eq!(field.len(), 21 * 13);
}

#[test]
fn zero_sized_viewport_has_no_nodes() {
    let field = make_field(0, 900);
    assert!(field.is_empty());
}

#[test]
fn lone_active_node_draws_no_connections() {
    let mut field = NodeField::new(NodeFieldConfig {
        spacing_desktop: 200,
        ..NodeFieldConfig::default()
    });
    field.initialize(1000, 1000);
    field.on_pointer_move(200.0, 200.0);
    assert_eq!(field.nodes().iter().filter(|n| n.active).count(), 1);

    let mut surface = RecordingSurface::new();
    let stats = field.paint(&mut surface, false);
    assert_eq!(stats.lines, 0);
    assert_eq!(surface.line_count(), 0);
    assert_eq!(stats.nodes, 1);
    assert_eq!(stats.glows, 1);
}

#[test]
fn connections_link_only_nearby_active_pairs() {
    let mut field = make_field(800, 600);
    field.on_pointer_move(25.0, 0.0);
    let active: Vec<Vec2> = field
        .nodes()
        .iter()
        .filter(|n| n.active)
        .map(|n| n.position())
        .collect();
    let mut expected = 0;
    for (i, a) in active.iter().enumerate() {
        for b in &active[i + 1..] {
            if a.distance(*b) < 100.0 {
                expected += 1;
            }
        }
    }

    let mut surface = RecordingSurface::new();
    let stats = field.paint(&mut surface, false);
    assert!(expected > 0);
    assert_eq!(stats.lines, expected);
    for cmd in surface.last_frame() {
        if let DrawCommand::Line { from, to, .. } = cmd {
            assert!(active.contains(from) && active.contains(to));
            assert!(from.distance(*to) < 100.0);
        }
    }
}

#[test]
fn lit_nodes_use_intensity_for_radius_and_alpha() {
    let mut field = make_field(800, 600);
    field.on_pointer_move(310.0, 140.0);
    let mut surface = RecordingSurface::new();
    field.paint(&mut surface, false);

    let lit: Vec<&GridNode> = field.nodes().iter().filter(|n| n.intensity > 0.0).collect();
    let plain: Vec<&DrawCommand> = surface
        .last_frame()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Circle { glow: None, .. }))
        .collect();
    assert_eq!(plain.len(), lit.len());
    for (node, cmd) in lit.iter().zip(plain) {
        let DrawCommand::Circle { center, radius, color, .. } = cmd else {
            unreachable!()
        };
        assert_eq!(*center, node.position());
        assert_eq!(*radius, 2.0 + node.intensity * 3.0);
        assert_eq!(color.a, node.intensity * 0.8);
    }
    assert_eq!(
        surface.glow_count(),
        field.nodes().iter().filter(|n| n.active).count()
    );
}

#[test]
fn reduced_motion_only_clears() {
    let mut field = make_field(800, 600);
    field.on_pointer_move(400.0, 300.0);
    let mut surface = RecordingSurface::new();
    let stats = field.paint(&mut surface, true);
    assert_eq!(stats, FrameStats::default());
    assert_eq!(
        surface.last_frame(),
        &[DrawCommand::Clear {
            width: 800.0,
            height: 600.0
        }]
    );
    // tracking is not disabled
    assert!(field.nodes().iter().any(|n| n.active));
}

#[test]
fn mounted_layer_repaints_every_frame_until_teardown() {
    let mut stepper = ManualFrameStepper::new();
    let field = Rc::new(RefCell::new(make_field(800, 600)));
    let motion = SharedMotion::new(false);
    let mount = field::mount(
        &mut stepper,
        field.clone(),
        Some(RecordingSurface::new()),
        motion.clone(),
    )
    .expect("surface present");

    // painting continues even when the pointer is idle
    stepper.step_n(3, 1.0 / 60.0);
    assert_eq!(mount.layer.borrow().frames(), 3);

    field.borrow_mut().on_pointer_move(100.0, 100.0);
    stepper.step(1.0 / 60.0);
    assert!(mount.layer.borrow().last_stats().lines > 0);

    motion.set(true);
    stepper.step(1.0 / 60.0);
    assert_eq!(mount.layer.borrow().frames(), 5);
    assert_eq!(mount.layer.borrow().last_stats(), FrameStats::default());

    mount.teardown();
    assert!(!mount.is_running());
    assert_eq!(stepper.step(1.0 / 60.0), 0);
    assert_eq!(mount.layer.borrow().frames(), 5);
}

#[test]
fn missing_surface_is_a_silent_no_op() {
    let mut stepper = ManualFrameStepper::new();
    let field = Rc::new(RefCell::new(make_field(800, 600)));
    let mount = field::mount::<_, RecordingSurface, _>(
        &mut stepper,
        field,
        None,
        StaticMotion(false),
    );
    assert!(mount.is_none());
    assert_eq!(stepper.pending(), 0);
}

#[test]
fn teardown_runs_cleanup_hooks() {
    let mut stepper = ManualFrameStepper::new();
    let field = Rc::new(RefCell::new(make_field(200, 200)));
    let mount = field::mount(
        &mut stepper,
        field,
        Some(RecordingSurface::new()),
        StaticMotion(false),
    )
    .expect("surface present");
    let removed = Rc::new(RefCell::new(Vec::new()));
    for name in ["pointermove", "resize"] {
        let removed = removed.clone();
        mount
            .token()
            .on_cancel(move || removed.borrow_mut().push(name));
    }
    mount.teardown();
    mount.teardown();
    assert_eq!(*removed.borrow(), vec!["pointermove", "resize"]);
}
