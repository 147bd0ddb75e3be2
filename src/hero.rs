use crate::constants::*;
use crate::dom::{self, MediaMotionPreference};
use crate::events;
use crate::frame::RafScheduler;
use crate::style;
use motion_core::sequencer::{BACKGROUND, FOREGROUND, HEADLINE, MIDGROUND, SUBHEADLINE, VISUAL};
use motion_core::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

struct HeroElements {
    container: web::HtmlElement,
    // animated elements, looked up by the tween target that drives them
    animated: Vec<(TargetId, web::HtmlElement)>,
    headline: Option<web::HtmlElement>,
    subheadline: Option<web::HtmlElement>,
    visual: Option<web::HtmlElement>,
    dots: Vec<web::Element>,
}

impl HeroElements {
    fn find(document: &web::Document) -> Option<Self> {
        let container = dom::element_by_id(document, HERO_CONTAINER_ID)?;
        let headline = dom::element_by_id(document, HERO_HEADLINE_ID);
        let subheadline = dom::element_by_id(document, HERO_SUBHEADLINE_ID);
        let visual = dom::element_by_id(document, HERO_VISUAL_ID);
        let animated = [
            (BACKGROUND, dom::element_by_id(document, HERO_BACKGROUND_ID)),
            (MIDGROUND, dom::element_by_id(document, HERO_MIDGROUND_ID)),
            (FOREGROUND, dom::element_by_id(document, HERO_FOREGROUND_ID)),
            (HEADLINE, headline.clone()),
            (SUBHEADLINE, subheadline.clone()),
            (VISUAL, visual.clone()),
        ]
        .into_iter()
        .filter_map(|(t, el)| el.map(|el| (t, el)))
        .collect();
        let dots = document
            .get_element_by_id(HERO_INDICATOR_ID)
            .map(|ind| {
                let children = ind.children();
                (0..children.length()).filter_map(|i| children.item(i)).collect()
            })
            .unwrap_or_default();
        Some(Self {
            container,
            animated,
            headline,
            subheadline,
            visual,
            dots,
        })
    }

    fn element_for(&self, target: &TargetId) -> Option<&web::HtmlElement> {
        self.animated.iter().find(|(t, _)| t == target).map(|(_, el)| el)
    }

    fn show_scene(&self, scene: &Scene, indicator: &[bool]) {
        if let Some(el) = &self.headline {
            dom::set_text(el, scene.content.headline);
        }
        if let Some(el) = &self.subheadline {
            dom::set_text(el, scene.content.subheadline);
        }
        if let Some(el) = &self.visual {
            dom::set_attr(el, VISUAL_DATA_ATTR, scene.content.visual.tag());
        }
        for (dot, &on) in self.dots.iter().zip(indicator) {
            dom::toggle_class(dot, INDICATOR_ACTIVE_CLASS, on);
        }
    }

    /// Give the container room for the pinned span plus the stage itself.
    fn reserve_scroll_span(&self, viewport_height: f32) {
        let h = viewport_height * (PIN_VIEWPORT_MULTIPLIER + 1.0);
        dom::set_style(&self.container, "height", &format!("{}px", h.round()));
    }

    fn geometry(&self, viewport_height: f32) -> PinGeometry {
        PinGeometry::new(dom::document_top(&self.container), viewport_height)
    }
}

/// Host-side input collected by listeners between frames.
#[derive(Default)]
struct HeroInput {
    scroll_y: Cell<f32>,
    resized: Cell<bool>,
}

pub struct HeroClient {
    elements: HeroElements,
    source: PinnedScroll,
    scrub: Scrub,
    sequencer: SceneSequencer<TweenEngine>,
    motion: MediaMotionPreference,
    input: Rc<HeroInput>,
    events: Vec<ScrollEvent>,
}

impl HeroClient {
    fn render_scene(&self) {
        self.elements
            .show_scene(self.sequencer.current_scene(), &self.sequencer.indicator());
    }

    fn apply_styles(&mut self) {
        let engine = self.sequencer.transitioner_mut();
        let dirty = engine.drain_dirty();
        for target in dirty {
            let (Some(el), Some(pose)) = (self.elements.element_for(&target), engine.pose_of(&target))
            else {
                continue;
            };
            dom::set_style(el, "transform", &style::transform_css(pose, LAYER_PERSPECTIVE_PX));
            if let Some(o) = style::opacity_css(pose) {
                dom::set_style(el, "opacity", &o);
            }
        }
    }

    fn teardown(&mut self) {
        self.source.kill();
        self.sequencer.teardown();
    }
}

impl FrameClient for HeroClient {
    fn frame(&mut self, time: FrameTime) {
        let reduced = self.motion.prefers_reduced_motion();
        self.sequencer.set_reduced_motion(reduced);

        if self.input.resized.replace(false) {
            let (_, h) = dom::viewport_size();
            self.elements.reserve_scroll_span(h as f32);
            self.source.set_geometry(self.elements.geometry(h as f32));
        }

        self.events.clear();
        self.source.update(self.input.scroll_y.get(), &mut self.events);
        for ev in &self.events {
            if let ScrollEvent::Progress(p) = *ev {
                self.scrub.set_target(p);
            }
        }
        let p = if reduced {
            self.scrub.snap()
        } else {
            self.scrub.advance(time.dt_sec)
        };
        if self.sequencer.on_scroll_progress(p).is_some() {
            self.render_scene();
        }
        self.sequencer.transitioner_mut().advance(time.dt_sec);
        self.apply_styles();
    }
}

pub struct HeroMount {
    client: Rc<RefCell<HeroClient>>,
    token: CancelToken,
}

impl HeroMount {
    /// Stop the frame loop, detach listeners and kill the scroll observer.
    pub fn teardown(&self) {
        self.token.cancel();
        match self.client.try_borrow_mut() {
            Ok(mut c) => c.teardown(),
            Err(_) => log::warn!("[hero] teardown while a frame is running"),
        }
    }
}

pub fn mount(window: &web::Window, document: &web::Document) -> anyhow::Result<Option<HeroMount>> {
    let Some(elements) = HeroElements::find(document) else {
        log::info!("[hero] no #{} on this page", HERO_CONTAINER_ID);
        return Ok(None);
    };
    let scenes = SceneSet::new(scene::default_scenes())?;
    let motion = MediaMotionPreference::new();
    let reduced = motion.prefers_reduced_motion();

    let (_, vh) = dom::viewport_size();
    elements.reserve_scroll_span(vh as f32);
    let ranges: Vec<(f32, f32)> = scenes.iter().map(|s| (s.start, s.end)).collect();
    let source = PinnedScroll::new(elements.geometry(vh as f32)).with_ranges(ranges);

    let mut sequencer =
        SceneSequencer::new(scenes, SequencerConfig::default(), TweenEngine::new(), reduced);
    sequencer.start();

    let input = Rc::new(HeroInput::default());
    input.scroll_y.set(dom::scroll_y());
    let client = HeroClient {
        elements,
        source,
        scrub: Scrub::default(),
        sequencer,
        motion,
        input: input.clone(),
        events: Vec::new(),
    };
    client.render_scene();
    let client = Rc::new(RefCell::new(client));

    let token = CancelToken::new();
    let scroll_input = input.clone();
    events::wire_scroll(window, &token, move |y| scroll_input.scroll_y.set(y));
    events::wire_resize(window, &token, move |_, _| input.resized.set(true));
    RafScheduler::new().run(client.clone(), token.clone());
    Ok(Some(HeroMount { client, token }))
}
