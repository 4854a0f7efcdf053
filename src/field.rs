//! Noise-driven flow field.
//!
//! A deterministic scalar field over (position, time) that gives every point
//! in space a smoothly varying direction. Particles sample it each frame to
//! get organic, correlated motion.

use glam::Vec2;
use noise::{NoiseFn, Perlin};
use std::f32::consts::TAU;

use crate::config::{FLOW_ANGLE_TURNS, FLOW_SCALE, FLOW_TIME_SCALE};

/// A coherent-noise flow field. Same inputs always produce the same output.
#[derive(Debug, Clone)]
pub struct FlowField {
    noise: Perlin,
}

impl FlowField {
    /// Create a flow field from a noise seed.
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
        }
    }

    /// Unit direction at `pos` for the given per-particle noise offset and
    /// frame number.
    ///
    /// The noise sample is mapped to [0, 1] and spread over
    /// [`FLOW_ANGLE_TURNS`] full turns, so nearby points still point in
    /// related directions while the field as a whole covers every angle.
    pub fn direction(&self, pos: Vec2, seed: f32, frame: u64) -> Vec2 {
        let t = seed as f64 + frame as f64 * FLOW_TIME_SCALE;
        let n = self
            .noise
            .get([pos.x as f64 * FLOW_SCALE, pos.y as f64 * FLOW_SCALE, t]);

        // Perlin returns roughly [-1, 1]; the angle mapping wants [0, 1].
        let n01 = ((n as f32) * 0.5 + 0.5).clamp(0.0, 1.0);
        let angle = n01 * TAU * FLOW_ANGLE_TURNS;

        Vec2::new(angle.cos(), angle.sin())
    }
}
