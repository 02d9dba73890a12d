// All tunable rendering and game constants in one place.

// World (origin-centered battlefield, matching the standard map layout)
pub const WORLD_HALF_WIDTH: f32 = 1400.0;
pub const WORLD_HALF_HEIGHT: f32 = 900.0;

// Simulation
pub const FIXED_DT: f32 = 1.0 / 60.0;

// Star field budgets per quality tier
pub const STARS_LOW: usize = 1400;
pub const STARS_MEDIUM: usize = 2200;
pub const STARS_HIGH: usize = 3400;
pub const STARS_ULTRA: usize = 5200;

// Star placement (rejection sampling)
pub const STAR_ATTEMPT_CAP: usize = 30_000;
pub const STAR_DENSITY_THRESHOLD: f32 = 0.38;
pub const STAR_FLOOR_ACCEPT_PROB: f32 = 0.06;

// Star appearance
pub const STAR_MIN_SIZE: f32 = 0.6;
pub const STAR_MAX_SIZE: f32 = 3.4;
pub const STAR_SIZE_ALPHA: f32 = 1.82;
pub const STAR_BRIGHTNESS_MIN: f32 = 0.42;
pub const STAR_BRIGHTNESS_MAX: f32 = 1.0;
pub const STAR_FRINGE_MIN_SIZE: f32 = 2.2;
pub const STAR_FRINGE_MIN_BRIGHTNESS: f32 = 0.75;
pub const STAR_FRINGE_PROB: f32 = 0.35;

// Parallax / animation
pub const PARALLAX_LAYERS: usize = 3;
pub const PARALLAX_LAYER_FACTORS: [f32; PARALLAX_LAYERS] = [0.012, 0.030, 0.055];
pub const STAR_DRIFT_SPEED: f32 = 1.6; // px/s at the deepest layer
pub const STAR_FLICKER_FREQ_MIN: f32 = 0.4;
pub const STAR_FLICKER_FREQ_MAX: f32 = 2.6;
pub const STAR_FLICKER_AMPLITUDE: f32 = 0.22;

// Shadow trails
pub const PARTICLE_SHADOW_MAX_DIST: f32 = 260.0;
pub const SHADOW_TRAIL_BASE_LEN: f32 = 14.0;
pub const SHADOW_TRAIL_EXTRA_LEN: f32 = 46.0;
pub const SHADOW_TRAIL_MAX_OPACITY: f32 = 0.55;
pub const SILHOUETTE_MAX_DIST: f32 = 520.0;
pub const SILHOUETTE_OFFSET_STEP: f32 = 4.5;

// Influence zone outlines
pub const OUTLINE_ARC_STEP_PX: f32 = 8.0;
pub const OUTLINE_EPSILON: f32 = 0.5;
pub const OUTLINE_OPACITY: f32 = 0.22;
pub const OUTLINE_THICKNESS: f32 = 1.5;

// Gradient sprite cache
pub const GRADIENT_CACHE_CAPACITY: usize = 16;
pub const GRADIENT_RADIUS_BUCKET: f32 = 8.0;

// Game economy (standard rule set)
pub const MIRROR_GENERATION_RATE: f32 = 10.0; // Solarium per second at full efficiency
pub const MIRROR_HEALTH: f32 = 100.0;
pub const FORGE_HEALTH: f32 = 1000.0;
pub const STARTING_SOLARIUM: f32 = 100.0;
pub const SUN_RADIUS: f32 = 100.0;
pub const FORGE_INFLUENCE_RADIUS: f32 = 150.0;
pub const MIRROR_INFLUENCE_RADIUS: f32 = 75.0;

// Asteroid field (occluders)
pub const ASTEROID_COUNT: usize = 14;
pub const ASTEROID_MIN_RADIUS: f32 = 14.0;
pub const ASTEROID_MAX_RADIUS: f32 = 46.0;
pub const ASTEROID_DRIFT_SPEED: f32 = 9.0;

// Camera
pub const CAMERA_ZOOM_MIN: f32 = 0.25;
pub const CAMERA_ZOOM_MAX: f32 = 3.0;
pub const CAMERA_PAN_SPEED: f32 = 500.0;
pub const CAMERA_ZOOM_SPEED: f32 = 0.1;
pub const CAMERA_SMOOTH_SPEED: f32 = 8.0;
