// DOM hooks and page-level tuning shared by the web mounts.

// Background node field
pub const FIELD_CANVAS_ID: &str = "electric-grid"; // fixed, pointer-events:none canvas
pub const FIELD_CANVAS_CLASS: &str = "electric-grid-canvas";

// Hero
pub const HERO_CONTAINER_ID: &str = "hero-pin"; // pinned container; its top starts the scroll span
pub const HERO_BACKGROUND_ID: &str = "hero-layer-background";
pub const HERO_MIDGROUND_ID: &str = "hero-layer-midground";
pub const HERO_FOREGROUND_ID: &str = "hero-layer-foreground";
pub const HERO_HEADLINE_ID: &str = "scene-headline";
pub const HERO_SUBHEADLINE_ID: &str = "scene-subheadline";
pub const HERO_VISUAL_ID: &str = "scene-visual";
pub const HERO_INDICATOR_ID: &str = "scene-indicator"; // one child dot per scene
pub const INDICATOR_ACTIVE_CLASS: &str = "is-current";
pub const VISUAL_DATA_ATTR: &str = "data-visual";

// Section reveals and counters
pub const REVEAL_SELECTOR: &str = ".animate-on-scroll:not(.service-card)"; // cards enter with their grid
pub const CARD_GRID_SELECTOR: &str = ".services-grid";
pub const CARD_SELECTOR: &str = ".service-card";
pub const COUNTER_SELECTOR: &str = ".stat-counter";
pub const COUNTER_TARGET_ATTR: &str = "data-target";

// Media query for the accessibility preference
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Perspective applied before rotateY so the midground tilt reads as depth
pub const LAYER_PERSPECTIVE_PX: f32 = 1000.0;
