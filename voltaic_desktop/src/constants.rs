// Animation timing
pub const TICK_INTERVAL_MS: u64 = 16;

// Surface bounds used until the first resize event arrives
pub const DEFAULT_SURFACE_WIDTH: f32 = 1280.0;
pub const DEFAULT_SURFACE_HEIGHT: f32 = 800.0;

// Particle rendering
pub const PARTICLE_GLOW_RADIUS_FACTOR: f32 = 2.0;
pub const PARTICLE_GLOW_ALPHA: f32 = 0.25;
pub const LINK_WIDTH: f32 = 0.5;

// Bolt rendering
pub const BOLT_GLOW_WIDTH_FACTOR: f32 = 6.0;
pub const BOLT_CORE_WIDTH_FACTOR: f32 = 0.3;
