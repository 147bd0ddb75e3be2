use crate::constants::*;
use crate::dom::{self, MediaMotionPreference};
use crate::events;
use crate::frame::RafScheduler;
use crate::style;
use motion_core::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

pub struct RevealClient {
    batch: RevealBatch,
    counters: CounterSet,
    grids: Vec<(CardGrid, web::HtmlElement)>,
    engine: TweenEngine,
    motion: MediaMotionPreference,
    sections: Vec<(TargetId, web::HtmlElement)>,
    cards: Vec<(TargetId, web::HtmlElement)>,
    counter_els: Vec<(TargetId, web::HtmlElement)>,
    scroll_y: Rc<Cell<f32>>,
    resized: Rc<Cell<bool>>,
}

impl RevealClient {
    fn measure(&mut self) {
        for (i, (_, el)) in self.sections.iter().enumerate() {
            self.batch.set_top(i, dom::document_top(el));
        }
        for (i, (_, el)) in self.counter_els.iter().enumerate() {
            self.counters.set_top(i, dom::document_top(el));
        }
        for (grid, el) in &mut self.grids {
            grid.set_top(dom::document_top(el));
        }
    }

    fn apply(&mut self) {
        for target in self.engine.drain_dirty() {
            if let Some((_, el)) = self.counter_els.iter().find(|(t, _)| *t == target) {
                dom::set_text(el, &counter_text(self.engine.value(&target, Prop::Value)));
                continue;
            }
            let el = self
                .sections
                .iter()
                .chain(&self.cards)
                .find(|(t, _)| *t == target)
                .map(|(_, el)| el);
            let (Some(el), Some(pose)) = (el, self.engine.pose_of(&target)) else {
                continue;
            };
            dom::set_style(el, "transform", &style::transform_css(pose, LAYER_PERSPECTIVE_PX));
            if let Some(o) = style::opacity_css(pose) {
                dom::set_style(el, "opacity", &o);
            }
        }
    }
}

impl FrameClient for RevealClient {
    fn frame(&mut self, time: FrameTime) {
        if self.resized.replace(false) {
            self.measure();
        }
        let reduced = self.motion.prefers_reduced_motion();
        let (_, vh) = dom::viewport_size();
        let (y, vh) = (self.scroll_y.get(), vh as f32);
        self.batch.on_scroll(y + vh, reduced, &mut self.engine);
        self.counters.on_scroll(y, vh, reduced, &mut self.engine);
        for (grid, _) in &mut self.grids {
            grid.on_scroll(y, vh, reduced, &mut self.engine);
        }
        if reduced {
            // finish anything that started before the preference flipped
            self.engine.advance(1.0e6);
        } else {
            self.engine.advance(time.dt_sec);
        }
        self.apply();
    }
}

pub struct RevealMount {
    token: CancelToken,
}

impl RevealMount {
    pub fn teardown(&self) {
        self.token.cancel();
    }
}

/// Mount section reveals, card grids and stat counters. `None` when the page has none.
pub fn mount(window: &web::Window, document: &web::Document) -> Option<RevealMount> {
    let section_els = dom::query_all(document, REVEAL_SELECTOR);
    let grid_els = dom::query_all(document, CARD_GRID_SELECTOR);
    let counter_els = dom::query_all(document, COUNTER_SELECTOR);
    if section_els.is_empty() && grid_els.is_empty() && counter_els.is_empty() {
        return None;
    }

    let mut batch = RevealBatch::new(RevealConfig::default());
    let sections: Vec<_> = section_els
        .into_iter()
        .map(|el| (batch.push(dom::document_top(&el)), el))
        .collect();

    let mut cards = Vec::new();
    let grids: Vec<_> = grid_els
        .into_iter()
        .enumerate()
        .map(|(i, el)| {
            let mut grid = CardGrid::new(CardGridConfig::default(), i, dom::document_top(&el));
            for card in dom::query_all_in(&el, CARD_SELECTOR) {
                cards.push((grid.push(), card));
            }
            (grid, el)
        })
        .collect();

    let mut counters = CounterSet::new(RevealConfig::default());
    let counter_els: Vec<_> = counter_els
        .into_iter()
        .filter_map(|el| {
            let raw = el.get_attribute(COUNTER_TARGET_ATTR)?;
            match raw.trim().parse::<u32>() {
                Ok(goal) => Some((counters.push(goal, dom::document_top(&el)), el)),
                Err(_) => {
                    log::warn!("[reveal] ignoring counter with {}={:?}", COUNTER_TARGET_ATTR, raw);
                    None
                }
            }
        })
        .collect();

    let motion = MediaMotionPreference::new();
    let mut engine = TweenEngine::new();
    if !motion.prefers_reduced_motion() {
        batch.hide_pending(&mut engine);
        for (grid, _) in &grids {
            grid.hide_pending(&mut engine);
        }
    }
    log::info!(
        "[reveal] sections={} grids={} cards={} counters={}",
        sections.len(),
        grids.len(),
        cards.len(),
        counter_els.len()
    );

    let scroll_y = Rc::new(Cell::new(dom::scroll_y()));
    let resized = Rc::new(Cell::new(false));
    let client = Rc::new(RefCell::new(RevealClient {
        batch,
        counters,
        grids,
        engine,
        motion,
        sections,
        cards,
        counter_els,
        scroll_y: scroll_y.clone(),
        resized: resized.clone(),
    }));

    let token = CancelToken::new();
    events::wire_scroll(window, &token, move |y| scroll_y.set(y));
    events::wire_resize(window, &token, move |_, _| resized.set(true));
    RafScheduler::new().run(client, token.clone());
    Some(RevealMount { token })
}
