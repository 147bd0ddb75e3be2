//! Pointer-reactive node field.
//!
//! A regular grid of nodes covers the viewport. Every pointer move recomputes
//! each node's intensity from its distance to the pointer, and every frame
//! repaints the lit nodes plus the links between nearby active ones.

use crate::constants::*;
use crate::motion::MotionPreference;
use crate::scheduler::{CancelToken, FrameClient, FrameScheduler, FrameTime};
use crate::surface::{Glow, Rgba, Surface};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridNode {
    position: Vec2,
    pub active: bool,
    pub intensity: f32,
}

impl GridNode {
    fn at(position: Vec2) -> Self {
        Self {
            position,
            active: false,
            intensity: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }
}

#[derive(Clone, Debug)]
pub struct NodeFieldConfig {
    pub mobile_breakpoint_px: u32,
    pub spacing_desktop: u32,
    pub spacing_mobile: u32,
    pub activation_radius: f32,
    pub falloff_radius: f32,
    pub connection_radius: f32,
}

impl Default for NodeFieldConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: MOBILE_BREAKPOINT_PX,
            spacing_desktop: NODE_SPACING_DESKTOP,
            spacing_mobile: NODE_SPACING_MOBILE,
            activation_radius: ACTIVATION_RADIUS,
            falloff_radius: FALLOFF_RADIUS,
            connection_radius: CONNECTION_RADIUS,
        }
    }
}

impl NodeFieldConfig {
    /// Grid spacing for a viewport `width`; never zero.
    #[inline]
    pub fn spacing_for_width(&self, width: u32) -> u32 {
        let s = if width < self.mobile_breakpoint_px {
            self.spacing_mobile
        } else {
            self.spacing_desktop
        };
        s.max(1)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub lines: usize,
    pub nodes: usize,
    pub glows: usize,
}

#[derive(Debug, Default)]
pub struct NodeField {
    config: NodeFieldConfig,
    width: u32,
    height: u32,
    spacing: u32,
    nodes: Vec<GridNode>,
    pointer: Option<Vec2>,
    // indices of active nodes, reused every frame
    active_scratch: Vec<usize>,
}

impl NodeField {
    pub fn new(config: NodeFieldConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Previous nodes are discarded, never resized in place.
    pub fn initialize(&mut self, width: u32, height: u32) {
        let spacing = self.config.spacing_for_width(width);
        self.width = width;
        self.height = height;
        self.spacing = spacing;
        self.nodes.clear();
        self.nodes
            .reserve(width.div_ceil(spacing) as usize * height.div_ceil(spacing) as usize);
        for x in (0..width).step_by(spacing as usize) {
            for y in (0..height).step_by(spacing as usize) {
                self.nodes.push(GridNode::at(Vec2::new(x as f32, y as f32)));
            }
        }
        self.active_scratch.clear();
    }

    pub fn on_viewport_resize(&mut self, width: u32, height: u32) {
        self.initialize(width, height);
        log::debug!(
            "[field] resized to {}x{} spacing={} nodes={}",
            width,
            height,
            self.spacing,
            self.nodes.len()
        );
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let pointer = Vec2::new(x, y);
        self.pointer = Some(pointer);
        let falloff = self.config.falloff_radius;
        let activation = self.config.activation_radius;
        for node in &mut self.nodes {
            let distance = node.position.distance(pointer);
            node.intensity = (1.0 - distance / falloff).max(0.0);
            node.active = distance < activation;
        }
    }

    pub fn nodes(&self) -> &[GridNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn config(&self) -> &NodeFieldConfig {
        &self.config
    }

    /// Paint one frame. With `reduced_motion` the surface is only cleared.
    pub fn paint<S: Surface + ?Sized>(&mut self, surface: &mut S, reduced_motion: bool) -> FrameStats {
        surface.clear(self.width as f32, self.height as f32);
        let mut stats = FrameStats::default();
        if reduced_motion {
            return stats;
        }

        self.active_scratch.clear();
        self.active_scratch.extend(
            self.nodes
                .iter()
                .enumerate()
                .filter(|(_, n)| n.active)
                .map(|(i, _)| i),
        );

        let line_color = Rgba::new(ELECTRIC_RGB, CONNECTION_ALPHA);
        let reach = self.config.connection_radius;
        for (k, &a) in self.active_scratch.iter().enumerate() {
            let pa = self.nodes[a].position;
            for &b in &self.active_scratch[k + 1..] {
                let pb = self.nodes[b].position;
                if pa.distance(pb) < reach {
                    surface.stroke_line(pa, pb, line_color, CONNECTION_LINE_WIDTH);
                    stats.lines += 1;
                }
            }
        }

        let glow = Glow {
            blur: GLOW_SHADOW_BLUR,
            color: Rgba::new(ELECTRIC_RGB, GLOW_SHADOW_ALPHA),
        };
        for node in self.nodes.iter().filter(|n| n.intensity > 0.0) {
            let radius = NODE_BASE_RADIUS + node.intensity * NODE_RADIUS_GAIN;
            let color = Rgba::new(ELECTRIC_RGB, node.intensity * NODE_ALPHA_GAIN);
            surface.fill_circle(node.position, radius, color, None);
            stats.nodes += 1;
            if node.active {
                surface.fill_circle(
                    node.position,
                    radius * GLOW_RADIUS_MULTIPLIER,
                    color,
                    Some(glow),
                );
                stats.glows += 1;
            }
        }
        stats
    }
}

pub struct NodeFieldLayer<S, M> {
    field: Rc<RefCell<NodeField>>,
    surface: S,
    motion: M,
    last_stats: FrameStats,
    frames: u64,
}

impl<S: Surface, M: MotionPreference> NodeFieldLayer<S, M> {
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl<S: Surface, M: MotionPreference> FrameClient for NodeFieldLayer<S, M> {
    fn frame(&mut self, _time: FrameTime) {
        // Re-read every frame so a preference change applies immediately.
        let reduced = self.motion.prefers_reduced_motion();
        self.last_stats = self.field.borrow_mut().paint(&mut self.surface, reduced);
        self.frames += 1;
    }
}

pub struct NodeFieldMount<S, M> {
    pub field: Rc<RefCell<NodeField>>,
    pub layer: Rc<RefCell<NodeFieldLayer<S, M>>>,
    token: CancelToken,
}

impl<S, M> NodeFieldMount<S, M> {
    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn teardown(&self) {
        if self.is_running() {
            log::info!("[field] teardown");
        }
        self.token.cancel();
    }
}

/// Start painting `field` every frame.
///
/// Without a surface nothing is scheduled and `None` is returned; the caller
/// simply has no background effect.
pub fn mount<F, S, M>(
    scheduler: &mut F,
    field: Rc<RefCell<NodeField>>,
    surface: Option<S>,
    motion: M,
) -> Option<NodeFieldMount<S, M>>
where
    F: FrameScheduler + ?Sized,
    S: Surface + 'static,
    M: MotionPreference + 'static,
{
    let Some(surface) = surface else {
        log::warn!("[field] no drawing surface; node field disabled");
        return None;
    };
    let layer = Rc::new(RefCell::new(NodeFieldLayer {
        field: field.clone(),
        surface,
        motion,
        last_stats: FrameStats::default(),
        frames: 0,
    }));
    let token = CancelToken::new();
    scheduler.run(layer.clone(), token.clone());
    log::info!("[field] mounted with {} nodes", field.borrow().len());
    Some(NodeFieldMount {
        field,
        layer,
        token,
    })
}
