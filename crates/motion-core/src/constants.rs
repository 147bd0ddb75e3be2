// Shared motion tuning constants used by both the web and headless frontends.

// Node field layout
pub const MOBILE_BREAKPOINT_PX: u32 = 768; // widths below this use the sparse grid
pub const NODE_SPACING_DESKTOP: u32 = 50;
pub const NODE_SPACING_MOBILE: u32 = 80;

// Node field pointer response
pub const ACTIVATION_RADIUS: f32 = 100.0; // node counts as active inside this distance
pub const FALLOFF_RADIUS: f32 = 150.0; // intensity reaches zero at this distance
pub const CONNECTION_RADIUS: f32 = 100.0; // max distance between linked active nodes

// Node field painting
pub const NODE_BASE_RADIUS: f32 = 2.0;
pub const NODE_RADIUS_GAIN: f32 = 3.0; // extra radius at full intensity
pub const NODE_ALPHA_GAIN: f32 = 0.8; // alpha at full intensity
pub const GLOW_RADIUS_MULTIPLIER: f32 = 1.5;
pub const GLOW_SHADOW_BLUR: f32 = 10.0;
pub const GLOW_SHADOW_ALPHA: f32 = 0.5;
pub const CONNECTION_ALPHA: f32 = 0.3;
pub const CONNECTION_LINE_WIDTH: f32 = 1.0;
pub const ELECTRIC_RGB: [u8; 3] = [0, 212, 255]; // electric-500

// Pinned hero scroll
pub const PIN_VIEWPORT_MULTIPLIER: f32 = 4.0; // pinned span in viewport heights
pub const SCRUB_LAG_SEC: f32 = 1.0; // time for scrubbed progress to catch up
pub const SCRUB_SNAP_EPSILON: f32 = 1e-4;

// Parallax layers (per unit of progress)
pub const BACKGROUND_Y_PER_PROGRESS: f32 = -50.0;
pub const BACKGROUND_SCALE_PER_PROGRESS: f32 = 0.1;
pub const MIDGROUND_Y_PER_PROGRESS: f32 = -100.0;
pub const MIDGROUND_ROTATION_Y_PER_PROGRESS: f32 = 15.0; // degrees
pub const FOREGROUND_Y_PER_PROGRESS: f32 = -150.0;

// Scene entry timeline (seconds / px)
pub const HEADLINE_HIDDEN_Y: f32 = 50.0;
pub const SUBHEADLINE_HIDDEN_Y: f32 = 30.0;
pub const VISUAL_HIDDEN_SCALE: f32 = 0.9;
pub const HEADLINE_DELAY_SEC: f32 = 0.1;
pub const HEADLINE_DURATION_SEC: f32 = 0.8;
pub const SUBHEADLINE_DURATION_SEC: f32 = 0.6;
pub const SUBHEADLINE_OVERLAP_SEC: f32 = 0.4; // starts this long before headline ends
pub const VISUAL_DURATION_SEC: f32 = 0.8;
pub const VISUAL_OVERLAP_SEC: f32 = 0.6; // starts this long before subheadline ends

// Section reveal batch
pub const REVEAL_FROM_Y: f32 = 100.0;
pub const REVEAL_DURATION_SEC: f32 = 1.0;
pub const REVEAL_STAGGER_SEC: f32 = 0.15;

// Stat counters
pub const COUNTER_DURATION_SEC: f32 = 2.0;
pub const COUNTER_TRIGGER_VIEWPORT_FRACTION: f32 = 0.8; // element top must pass 80% of viewport

// Service card grid
pub const CARD_FROM_Y: f32 = 60.0;
pub const CARD_DURATION_SEC: f32 = 0.8;
pub const CARD_STAGGER_SEC: f32 = 0.2;
pub const CARD_TRIGGER_VIEWPORT_FRACTION: f32 = 0.8; // grid top must pass 80% of viewport
