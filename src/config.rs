//! Scene tuning constants.
//!
//! Everything here is a compile-time knob; there is no runtime configuration.
//! Distances and radii are canvas pixels, per-frame rates assume the
//! frame-stepped simulation.

/// Particles spawned at startup. The set never grows or shrinks.
pub const PARTICLE_COUNT: usize = 900;

/// Toroidal wrap margin: a particle leaving one edge by more than this
/// re-enters at the opposite edge.
pub const WRAP_MARGIN: f32 = 10.0;

// Flow field.

/// Spatial noise frequency (canvas pixels to noise units).
pub const FLOW_SCALE: f64 = 0.0022;
/// Noise time-axis advance per frame.
pub const FLOW_TIME_SCALE: f64 = 0.0035;
/// Full turns the [0, 1] noise sample is spread over.
pub const FLOW_ANGLE_TURNS: f32 = 3.2;
/// Acceleration contributed by the field's unit direction.
pub const FLOW_STRENGTH: f32 = 0.35;

// Spotlight attraction.

/// Distance at or below which the pull is at full strength.
pub const PULL_NEAR: f32 = 20.0;
/// Distance at or beyond which the pull is zero.
pub const PULL_FAR: f32 = 500.0;

// Ripples.

/// Half-thickness of the ring region that kicks particles.
pub const RIPPLE_BAND: f32 = 18.0;
/// Kick magnitude at the band edge (before mode scaling).
pub const RIPPLE_KICK_MIN: f32 = 0.2;
/// Kick magnitude right on the ring (before mode scaling).
pub const RIPPLE_KICK_MAX: f32 = 1.2;
/// Expansion speed range a freshly spawned ripple draws from, px/frame.
pub const RIPPLE_SPEED_MIN: f32 = 6.0;
pub const RIPPLE_SPEED_MAX: f32 = 10.5;
/// Starting life; drains by [`RIPPLE_DECAY`] each frame (~80-frame lifetime).
pub const RIPPLE_LIFE: f32 = 255.0;
pub const RIPPLE_DECAY: f32 = 3.2;
/// Rendering cap on simultaneous ripples; sizes the ring instance buffer.
pub const MAX_RIPPLES: usize = 256;

// Particle spawn ranges.

/// Initial velocity magnitude.
pub const SPAWN_SPEED_MIN: f32 = 0.2;
pub const SPAWN_SPEED_MAX: f32 = 1.2;
/// Per-particle velocity cap base; the mode adds its bonus on top.
pub const BASE_SPEED_MIN: f32 = 0.6;
pub const BASE_SPEED_MAX: f32 = 1.9;
/// Per-particle offset on the noise time axis.
pub const NOISE_SEED_MAX: f32 = 1000.0;
/// Render size range in pixels.
pub const SIZE_MIN: f32 = 1.2;
pub const SIZE_MAX: f32 = 3.2;

// Rendering.

/// Alpha of the fullscreen black fade quad (trail decay per frame).
pub const FADE_ALPHA: f32 = 24.0 / 255.0;
/// Pointer distance past which particle glow bottoms out.
pub const GLOW_FAR: f32 = 520.0;
/// Outer glow disc radius as a multiple of the particle size.
pub const GLOW_OUTER_SCALE: f32 = 2.2;
/// Concentric discs forming the spotlight halo.
pub const SPOT_RINGS: u32 = 22;
/// Radius of the outermost spotlight disc.
pub const SPOT_RADIUS: f32 = 220.0;
/// Halo disc alpha (of 255) at the outermost and innermost radius.
pub const SPOT_ALPHA_OUTER: f32 = 10.0;
pub const SPOT_ALPHA_INNER: f32 = 85.0;
/// Radius of the bright spotlight core disc.
pub const SPOT_CORE_RADIUS: f32 = 18.0;

/// Base filename for PNG exports; a counter is appended on collision.
pub const EXPORT_BASENAME: &str = "stage-light";
