//! Particles and the per-frame force model.
//!
//! The update is a pure numeric pass: flow-field steering, spotlight
//! attraction with linear falloff, ripple band kicks, a per-particle speed
//! cap, and a toroidal wrap. Each force term is its own function so the
//! magnitude relationships (mode doubling, falloff endpoints) are directly
//! testable.

use glam::Vec2;

use crate::config::{
    FLOW_STRENGTH, PULL_FAR, PULL_NEAR, RIPPLE_BAND, RIPPLE_KICK_MAX, RIPPLE_KICK_MIN, WRAP_MARGIN,
};
use crate::field::FlowField;
use crate::sim::{Mode, Ripple};

/// One motile glow point.
///
/// Created once at startup; only `pos` and `vel` ever change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Base of this particle's velocity cap.
    pub base_speed: f32,
    /// Offset on the noise time axis, decorrelating particles.
    pub seed: f32,
    /// Render size in pixels.
    pub size: f32,
}

impl Particle {
    /// Advance one frame against the live ripple set.
    pub fn update(
        &mut self,
        field: &FlowField,
        frame: u64,
        pointer: Vec2,
        mode: Mode,
        ripples: &[Ripple],
        bounds: Vec2,
    ) {
        let mut acc = field.direction(self.pos, self.seed, frame) * FLOW_STRENGTH;
        acc += attraction(self.pos, pointer, mode);
        for ripple in ripples {
            acc += ripple_kick(self.pos, ripple, mode);
        }

        self.vel += acc;
        self.vel = self
            .vel
            .clamp_length_max(self.base_speed + mode.speed_bonus());
        self.pos += self.vel;
        self.pos = wrap(self.pos, bounds);
    }
}

/// Spotlight pull on a particle at `pos`.
///
/// Full strength within [`PULL_NEAR`] of the pointer, fading linearly to
/// nothing at [`PULL_FAR`]. A particle exactly under the pointer gets no
/// directional force this frame (there is no direction to pull in).
pub fn attraction(pos: Vec2, pointer: Vec2, mode: Mode) -> Vec2 {
    let to_light = pointer - pos;
    let d = to_light.length();
    to_light.normalize_or_zero() * (mode.pull() * falloff(d))
}

/// Linear distance falloff: 1 at `PULL_NEAR` or closer, 0 at `PULL_FAR` or
/// beyond.
pub fn falloff(d: f32) -> f32 {
    (1.0 - (d - PULL_NEAR) / (PULL_FAR - PULL_NEAR)).clamp(0.0, 1.0)
}

/// Outward impulse from a ripple whose expanding edge is passing nearby.
///
/// Zero outside the band `|distance - radius| < RIPPLE_BAND`; inside it the
/// magnitude rises linearly from [`RIPPLE_KICK_MIN`] at the band edge to
/// [`RIPPLE_KICK_MAX`] right on the ring, scaled by the mode.
pub fn ripple_kick(pos: Vec2, ripple: &Ripple, mode: Mode) -> Vec2 {
    let from_center = pos - ripple.center;
    let band = (from_center.length() - ripple.radius).abs();
    if band >= RIPPLE_BAND {
        return Vec2::ZERO;
    }
    let strength = RIPPLE_KICK_MIN + (RIPPLE_KICK_MAX - RIPPLE_KICK_MIN) * (1.0 - band / RIPPLE_BAND);
    from_center.normalize_or_zero() * (strength * mode.kick())
}

/// Toroidal wrap with a margin: leave one side, re-enter the opposite side.
pub fn wrap(mut pos: Vec2, bounds: Vec2) -> Vec2 {
    if pos.x < -WRAP_MARGIN {
        pos.x = bounds.x + WRAP_MARGIN;
    }
    if pos.x > bounds.x + WRAP_MARGIN {
        pos.x = -WRAP_MARGIN;
    }
    if pos.y < -WRAP_MARGIN {
        pos.y = bounds.y + WRAP_MARGIN;
    }
    if pos.y > bounds.y + WRAP_MARGIN {
        pos.y = -WRAP_MARGIN;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falloff_endpoints() {
        assert_eq!(falloff(0.0), 1.0);
        assert_eq!(falloff(20.0), 1.0);
        assert_eq!(falloff(500.0), 0.0);
        assert_eq!(falloff(900.0), 0.0);
        let mid = falloff(260.0);
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn test_attraction_mode_doubles_exactly() {
        let pos = Vec2::new(10.0, 30.0);
        let pointer = Vec2::new(200.0, 120.0);
        let soft = attraction(pos, pointer, Mode::Soft);
        let high = attraction(pos, pointer, Mode::HighEnergy);
        assert_eq!(high, soft * 2.0);
    }

    #[test]
    fn test_attraction_skips_coincident_pointer() {
        let p = Vec2::new(50.0, 50.0);
        assert_eq!(attraction(p, p, Mode::HighEnergy), Vec2::ZERO);
    }

    #[test]
    fn test_attraction_zero_beyond_far_threshold() {
        let pos = Vec2::ZERO;
        let pointer = Vec2::new(600.0, 0.0);
        assert_eq!(attraction(pos, pointer, Mode::Soft), Vec2::ZERO);
    }

    #[test]
    fn test_ripple_kick_points_away_and_doubles() {
        let ripple = Ripple {
            center: Vec2::new(100.0, 100.0),
            radius: 40.0,
            life: 200.0,
            speed: 8.0,
        };
        // particle sits right on the ring, directly to the right of center
        let pos = Vec2::new(140.0, 100.0);
        let soft = ripple_kick(pos, &ripple, Mode::Soft);
        let high = ripple_kick(pos, &ripple, Mode::HighEnergy);

        assert!(soft.x > 0.0 && soft.y.abs() < 1e-6);
        assert_eq!(high, soft * 2.0);
        // max strength at band = 0
        assert!((soft.length() - RIPPLE_KICK_MAX * Mode::Soft.kick()).abs() < 1e-5);
    }

    #[test]
    fn test_ripple_kick_zero_outside_band() {
        let ripple = Ripple {
            center: Vec2::ZERO,
            radius: 100.0,
            life: 200.0,
            speed: 8.0,
        };
        let pos = Vec2::new(100.0 + RIPPLE_BAND + 0.1, 0.0);
        assert_eq!(ripple_kick(pos, &ripple, Mode::HighEnergy), Vec2::ZERO);
    }

    #[test]
    fn test_wrap_both_axes() {
        let bounds = Vec2::new(800.0, 600.0);
        assert_eq!(
            wrap(Vec2::new(-10.5, 300.0), bounds),
            Vec2::new(810.0, 300.0)
        );
        assert_eq!(
            wrap(Vec2::new(811.0, 300.0), bounds),
            Vec2::new(-10.0, 300.0)
        );
        assert_eq!(
            wrap(Vec2::new(400.0, -11.0), bounds),
            Vec2::new(400.0, 610.0)
        );
        assert_eq!(
            wrap(Vec2::new(400.0, 611.0), bounds),
            Vec2::new(400.0, -10.0)
        );
        // interior positions untouched
        assert_eq!(
            wrap(Vec2::new(400.0, 300.0), bounds),
            Vec2::new(400.0, 300.0)
        );
    }
}
