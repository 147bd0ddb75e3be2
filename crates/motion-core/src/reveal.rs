//! Scroll-triggered entrances for page sections and stat counters.

use crate::constants::*;
use crate::ease::Ease;
use crate::tween::{pose, Prop, TargetId, Timeline, Transitioner};

#[derive(Clone, Debug)]
pub struct RevealConfig {
    pub from_y: f32,
    pub duration: f32,
    pub stagger: f32,
    pub ease: Ease,
    pub counter_duration: f32,
    pub counter_ease: Ease,
    /// Fraction of the viewport height a counter's top must scroll past.
    pub counter_trigger: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            from_y: REVEAL_FROM_Y,
            duration: REVEAL_DURATION_SEC,
            stagger: REVEAL_STAGGER_SEC,
            ease: Ease::Power3Out,
            counter_duration: COUNTER_DURATION_SEC,
            counter_ease: Ease::Power2Out,
            counter_trigger: COUNTER_TRIGGER_VIEWPORT_FRACTION,
        }
    }
}

#[derive(Clone, Debug)]
struct Section {
    target: TargetId,
    top_px: f32,
    revealed: bool,
}

/// Sections that slide up once, the first time they scroll into view.
///
/// Sections becoming visible on the same update animate as one staggered batch.
#[derive(Clone, Debug, Default)]
pub struct RevealBatch {
    config: RevealConfig,
    sections: Vec<Section>,
}

impl RevealBatch {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            sections: Vec::new(),
        }
    }

    pub fn push(&mut self, top_px: f32) -> TargetId {
        let target = TargetId::indexed("reveal", self.sections.len());
        self.sections.push(Section {
            target: target.clone(),
            top_px,
            revealed: false,
        });
        target
    }

    pub fn set_top(&mut self, index: usize, top_px: f32) {
        if let Some(s) = self.sections.get_mut(index) {
            s.top_px = top_px;
        }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.sections.iter().filter(|s| !s.revealed).count()
    }

    /// Reveal every pending section whose top is above `viewport_bottom_px`.
    /// Returns the targets that started animating.
    pub fn on_scroll<T: Transitioner + ?Sized>(
        &mut self,
        viewport_bottom_px: f32,
        reduced_motion: bool,
        tx: &mut T,
    ) -> Vec<TargetId> {
        let batch: Vec<TargetId> = self
            .sections
            .iter_mut()
            .filter(|s| !s.revealed && s.top_px < viewport_bottom_px)
            .map(|s| {
                s.revealed = true;
                s.target.clone()
            })
            .collect();
        if batch.is_empty() {
            return batch;
        }
        log::debug!("[reveal] batch of {}", batch.len());
        let shown = pose(&[(Prop::Opacity, 1.0), (Prop::Y, 0.0)]);
        if reduced_motion {
            for target in &batch {
                tx.set(target, &shown);
            }
        } else {
            let hidden = pose(&[(Prop::Opacity, 0.0), (Prop::Y, self.config.from_y)]);
            tx.play(Timeline::new(self.config.ease).stagger_from_to(
                &batch,
                &hidden,
                &shown,
                self.config.duration,
                self.config.stagger,
                self.config.ease,
            ));
        }
        batch
    }

    pub fn hide_pending<T: Transitioner + ?Sized>(&self, tx: &mut T) {
        let hidden = pose(&[(Prop::Opacity, 0.0), (Prop::Y, self.config.from_y)]);
        for s in self.sections.iter().filter(|s| !s.revealed) {
            tx.set(&s.target, &hidden);
        }
    }

    pub fn show_all<T: Transitioner + ?Sized>(&mut self, tx: &mut T) {
        let shown = pose(&[(Prop::Opacity, 1.0), (Prop::Y, 0.0)]);
        for s in &mut self.sections {
            s.revealed = true;
            tx.set(&s.target, &shown);
        }
    }
}

#[derive(Clone, Debug)]
pub struct CardGridConfig {
    pub from_y: f32,
    pub duration: f32,
    pub stagger: f32,
    pub ease: Ease,
    /// Fraction of the viewport height the grid's top must scroll past.
    pub trigger: f32,
}

impl Default for CardGridConfig {
    fn default() -> Self {
        Self {
            from_y: CARD_FROM_Y,
            duration: CARD_DURATION_SEC,
            stagger: CARD_STAGGER_SEC,
            ease: Ease::Power2Out,
            trigger: CARD_TRIGGER_VIEWPORT_FRACTION,
        }
    }
}

/// Cards that enter together, staggered, once their grid scrolls into view.
#[derive(Clone, Debug)]
pub struct CardGrid {
    config: CardGridConfig,
    prefix: String,
    top_px: f32,
    cards: Vec<TargetId>,
    revealed: bool,
}

impl CardGrid {
    /// `index` tells grids on the same page apart in their card targets.
    pub fn new(config: CardGridConfig, index: usize, top_px: f32) -> Self {
        Self {
            config,
            prefix: format!("grid{index}-card"),
            top_px,
            cards: Vec::new(),
            revealed: false,
        }
    }

    pub fn push(&mut self) -> TargetId {
        let target = TargetId::indexed(&self.prefix, self.cards.len());
        self.cards.push(target.clone());
        target
    }

    pub fn set_top(&mut self, top_px: f32) {
        self.top_px = top_px;
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn hide_pending<T: Transitioner + ?Sized>(&self, tx: &mut T) {
        if self.revealed {
            return;
        }
        let hidden = pose(&[(Prop::Opacity, 0.0), (Prop::Y, self.config.from_y)]);
        for target in &self.cards {
            tx.set(target, &hidden);
        }
    }

    /// Reveal every card once the grid's top passes the trigger line.
    /// Returns whether this call started the reveal.
    pub fn on_scroll<T: Transitioner + ?Sized>(
        &mut self,
        scroll_y: f32,
        viewport_height: f32,
        reduced_motion: bool,
        tx: &mut T,
    ) -> bool {
        let line = scroll_y + viewport_height * self.config.trigger;
        if self.revealed || self.cards.is_empty() || self.top_px >= line {
            return false;
        }
        self.revealed = true;
        log::debug!("[reveal] {} cards of {}", self.cards.len(), self.prefix);
        let shown = pose(&[(Prop::Opacity, 1.0), (Prop::Y, 0.0)]);
        if reduced_motion {
            for target in &self.cards {
                tx.set(target, &shown);
            }
        } else {
            let hidden = pose(&[(Prop::Opacity, 0.0), (Prop::Y, self.config.from_y)]);
            tx.play(Timeline::new(self.config.ease).stagger_from_to(
                &self.cards,
                &hidden,
                &shown,
                self.config.duration,
                self.config.stagger,
                self.config.ease,
            ));
        }
        true
    }
}

#[derive(Clone, Debug)]
struct Counter {
    target: TargetId,
    goal: u32,
    top_px: f32,
    started: bool,
}

/// Numbers that count up from zero once they scroll into view.
#[derive(Clone, Debug, Default)]
pub struct CounterSet {
    config: RevealConfig,
    counters: Vec<Counter>,
}

impl CounterSet {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            counters: Vec::new(),
        }
    }

    pub fn push(&mut self, goal: u32, top_px: f32) -> TargetId {
        let target = TargetId::indexed("counter", self.counters.len());
        self.counters.push(Counter {
            target: target.clone(),
            goal,
            top_px,
            started: false,
        });
        target
    }

    pub fn set_top(&mut self, index: usize, top_px: f32) {
        if let Some(c) = self.counters.get_mut(index) {
            c.top_px = top_px;
        }
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Start every counter whose top has passed the trigger line.
    pub fn on_scroll<T: Transitioner + ?Sized>(
        &mut self,
        scroll_y: f32,
        viewport_height: f32,
        reduced_motion: bool,
        tx: &mut T,
    ) -> Vec<TargetId> {
        let line = scroll_y + viewport_height * self.config.counter_trigger;
        let mut started = Vec::new();
        for c in self.counters.iter_mut().filter(|c| !c.started && c.top_px < line) {
            c.started = true;
            let goal = pose(&[(Prop::Value, c.goal as f32)]);
            if reduced_motion {
                tx.set(&c.target, &goal);
            } else {
                tx.play(
                    Timeline::new(self.config.counter_ease)
                        .set(c.target.clone(), pose(&[(Prop::Value, 0.0)]))
                        .to(c.target.clone(), goal, self.config.counter_duration),
                );
            }
            started.push(c.target.clone());
        }
        started
    }
}

pub fn counter_text(value: f32) -> String {
    format!("{}", value.round() as i64)
}
