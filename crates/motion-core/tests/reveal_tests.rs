// Host-side tests for section reveals and stat counters.

use motion_core::*;

#[test]
fn sections_reveal_once_in_batches() {
    let mut batch = RevealBatch::new(RevealConfig::default());
    let a = batch.push(300.0);
    let b = batch.push(700.0);
    let c = batch.push(2000.0);
    let mut engine = TweenEngine::new();

    let first = batch.on_scroll(900.0, false, &mut engine);
    assert_eq!(first, vec![a.clone(), b.clone()]);
    assert_eq!(batch.pending(), 1);
    // both start hidden; the second waits for its stagger slot
    assert_eq!(engine.value(&b, Prop::Y), 100.0);
    engine.advance(0.1);
    assert!(engine.value(&a, Prop::Opacity) > 0.0);
    assert_eq!(engine.value(&b, Prop::Opacity), 0.0);

    assert!(batch.on_scroll(900.0, false, &mut engine).is_empty());
    assert_eq!(batch.on_scroll(2100.0, false, &mut engine), vec![c.clone()]);

    engine.advance(2.0);
    for t in [&a, &b, &c] {
        assert_eq!(engine.value(t, Prop::Opacity), 1.0);
        assert_eq!(engine.value(t, Prop::Y), 0.0);
    }
    assert_eq!(batch.pending(), 0);
}

#[test]
fn reduced_motion_reveals_without_tweens() {
    let mut batch = RevealBatch::new(RevealConfig::default());
    let a = batch.push(10.0);
    batch.push(5000.0);
    let mut engine = TweenEngine::new();
    batch.on_scroll(800.0, true, &mut engine);
    assert!(engine.is_idle());
    assert_eq!(engine.value(&a, Prop::Opacity), 1.0);

    batch.show_all(&mut engine);
    assert_eq!(batch.pending(), 0);
    assert_eq!(engine.value(&TargetId::indexed("reveal", 1), Prop::Y), 0.0);
}

#[test]
fn counters_start_past_eighty_percent_of_viewport() {
    let mut counters = CounterSet::new(RevealConfig::default());
    let years = counters.push(15, 700.0);
    let projects = counters.push(500, 900.0);
    let mut engine = TweenEngine::new();

    // trigger line = 0 + 1000 * 0.8 = 800
    assert_eq!(
        counters.on_scroll(0.0, 1000.0, false, &mut engine),
        vec![years.clone()]
    );
    assert_eq!(engine.value(&years, Prop::Value), 0.0);
    engine.advance(1.0);
    let mid = engine.value(&years, Prop::Value);
    assert!(mid > 7.5 && mid < 15.0, "power2.out runs ahead of linear: {mid}");

    assert_eq!(
        counters.on_scroll(200.0, 1000.0, false, &mut engine),
        vec![projects.clone()]
    );
    engine.advance(3.0);
    assert_eq!(counter_text(engine.value(&years, Prop::Value)), "15");
    assert_eq!(counter_text(engine.value(&projects, Prop::Value)), "500");
}

#[test]
fn reduced_motion_counters_jump_to_goal() {
    let mut counters = CounterSet::new(RevealConfig::default());
    let t = counters.push(42, 0.0);
    let mut engine = TweenEngine::new();
    counters.on_scroll(0.0, 1000.0, true, &mut engine);
    assert!(engine.is_idle());
    assert_eq!(counter_text(engine.value(&t, Prop::Value)), "42");
}

#[test]
fn counter_text_rounds_to_nearest() {
    assert_eq!(counter_text(0.0), "0");
    assert_eq!(counter_text(1.49), "1");
    assert_eq!(counter_text(1.5), "2");
    assert_eq!(counter_text(499.6), "500");
}

#[test]
fn pending_sections_start_hidden() {
    let mut batch = RevealBatch::new(RevealConfig::default());
    let near = batch.push(100.0);
    let far = batch.push(3000.0);
    let mut engine = TweenEngine::new();
    batch.on_scroll(800.0, true, &mut engine);
    batch.hide_pending(&mut engine);
    assert_eq!(engine.value(&near, Prop::Opacity), 1.0);
    assert_eq!(engine.value(&far, Prop::Opacity), 0.0);
    assert_eq!(engine.value(&far, Prop::Y), 100.0);
}

#[test]
fn card_grid_waits_for_eighty_percent_then_staggers() {
    let mut grid = CardGrid::new(CardGridConfig::default(), 0, 900.0);
    let cards: Vec<TargetId> = (0..3).map(|_| grid.push()).collect();
    assert_eq!(cards[1].as_str(), "grid0-card-1");
    let mut engine = TweenEngine::new();
    grid.hide_pending(&mut engine);
    assert_eq!(engine.value(&cards[0], Prop::Y), 60.0);

    // trigger line = 0 + 1000 * 0.8 = 800, grid top still below it
    assert!(!grid.on_scroll(0.0, 1000.0, false, &mut engine));
    assert!(grid.on_scroll(150.0, 1000.0, false, &mut engine));
    assert!(grid.is_revealed());
    assert!(!grid.on_scroll(400.0, 1000.0, false, &mut engine));
    assert_eq!(engine.active_count(), 1);

    engine.advance(0.1);
    assert!(engine.value(&cards[0], Prop::Opacity) > 0.0);
    assert_eq!(engine.value(&cards[1], Prop::Opacity), 0.0);

    // second card starts 0.2 s in, the third 0.4 s in
    engine.advance(0.15);
    assert!(engine.value(&cards[1], Prop::Opacity) > 0.0);
    assert_eq!(engine.value(&cards[2], Prop::Opacity), 0.0);
    assert_eq!(engine.value(&cards[2], Prop::Y), 60.0);

    engine.advance(2.0);
    assert!(engine.is_idle());
    for c in &cards {
        assert_eq!(engine.value(c, Prop::Opacity), 1.0);
        assert_eq!(engine.value(c, Prop::Y), 0.0);
    }
}

#[test]
fn reduced_motion_card_grid_shows_at_once() {
    let mut grid = CardGrid::new(CardGridConfig::default(), 2, 0.0);
    let card = grid.push();
    let mut engine = TweenEngine::new();
    assert!(grid.on_scroll(0.0, 1000.0, true, &mut engine));
    assert!(engine.is_idle());
    assert_eq!(engine.value(&card, Prop::Opacity), 1.0);
    assert_eq!(card.as_str(), "grid2-card-0");
}
