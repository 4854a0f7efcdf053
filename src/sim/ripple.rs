//! Expanding ripple rings spawned by pointer pulses.

use glam::Vec2;

use crate::config::{RIPPLE_DECAY, RIPPLE_LIFE};

/// One expanding, decaying ring.
///
/// The radius grows and the life drains at fixed per-instance rates every
/// frame, so a ripple's whole trajectory is determined at spawn time. Once
/// `life` reaches zero the ripple is removed from the active set and is never
/// rendered or applied to particles again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    /// Spawn point; fixed for the ripple's lifetime.
    pub center: Vec2,
    /// Current ring radius in pixels; grows monotonically.
    pub radius: f32,
    /// Remaining life, 255 down to 0.
    pub life: f32,
    /// Radius gained per frame; randomized at spawn, fixed afterwards.
    pub speed: f32,
}

impl Ripple {
    /// Spawn a fresh ripple at `center` expanding at `speed` px/frame.
    pub fn new(center: Vec2, speed: f32) -> Self {
        Self {
            center,
            radius: 0.0,
            life: RIPPLE_LIFE,
            speed,
        }
    }

    /// Advance one frame: grow the ring, drain the life.
    pub fn advance(&mut self) {
        self.radius += self.speed;
        self.life -= RIPPLE_DECAY;
    }

    /// Whether the ripple still participates in the scene.
    #[inline]
    pub fn alive(&self) -> bool {
        self.life > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_and_life_are_linear_in_frames() {
        let mut r = Ripple::new(Vec2::new(100.0, 100.0), 8.0);
        for k in 1..=79u32 {
            r.advance();
            assert_eq!(r.radius, 8.0 * k as f32);
            assert!((r.life - (255.0 - 3.2 * k as f32)).abs() < 1e-3);
            assert!(r.alive(), "still alive at frame {k}");
        }
    }

    #[test]
    fn test_dead_at_frame_80() {
        let mut r = Ripple::new(Vec2::ZERO, 8.0);
        for _ in 0..80 {
            r.advance();
        }
        assert!(!r.alive());
        assert_eq!(r.radius, 640.0);
    }
}
