//! Builds the frame's sprite batches from simulation state.
//!
//! Pure functions from [`Stage`] plus the pointer to instance vectors, kept
//! separate from the GPU plumbing so the visual mapping (spotlight gradient,
//! glow tint, ripple fade) is testable without a device.

use glam::Vec2;

use crate::config::{
    GLOW_FAR, GLOW_OUTER_SCALE, MAX_RIPPLES, SPOT_ALPHA_INNER, SPOT_ALPHA_OUTER, SPOT_CORE_RADIUS,
    SPOT_RADIUS, SPOT_RINGS,
};
use crate::gpu::sprites::{DiscInstance, RingInstance};
use crate::sim::Stage;

/// Warm spotlight halo tint.
const SPOT_COLOR: [f32; 3] = [255.0 / 255.0, 220.0 / 255.0, 120.0 / 255.0];
/// Near-white spotlight core.
const CORE_COLOR: [f32; 4] = [255.0 / 255.0, 250.0 / 255.0, 230.0 / 255.0, 160.0 / 255.0];
/// Inner particle disc color (alpha applied separately).
const PARTICLE_CORE_COLOR: [f32; 3] = [255.0 / 255.0, 245.0 / 255.0, 220.0 / 255.0];
/// Crisp ripple ring tint.
const RIPPLE_COLOR: [f32; 3] = [255.0 / 255.0, 220.0 / 255.0, 150.0 / 255.0];

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// All filled discs for one frame: the spotlight stack, then two glow discs
/// per particle.
pub fn build_discs(stage: &Stage, pointer: Vec2) -> Vec<DiscInstance> {
    let mut discs = Vec::with_capacity(SPOT_RINGS as usize + 1 + stage.particles.len() * 2);

    // Spotlight: concentric discs shrinking toward the pointer, additive
    // stacking brightening the center.
    for i in 0..SPOT_RINGS {
        let t = i as f32 / SPOT_RINGS as f32;
        let radius = SPOT_RADIUS * (1.0 - t);
        let alpha = lerp(SPOT_ALPHA_OUTER, SPOT_ALPHA_INNER, t) / 255.0;
        discs.push(DiscInstance::new(
            pointer,
            radius,
            1.5,
            [SPOT_COLOR[0], SPOT_COLOR[1], SPOT_COLOR[2], alpha],
        ));
    }
    discs.push(DiscInstance::new(pointer, SPOT_CORE_RADIUS, 1.5, CORE_COLOR));

    for p in &stage.particles {
        let d = p.pos.distance(pointer);
        // 0 at GLOW_FAR and beyond, 255 right at the pointer
        let glow = ((1.0 - d / GLOW_FAR).clamp(0.0, 1.0)) * 255.0;
        let tint = [
            (200.0 + glow * 0.18) / 255.0,
            (140.0 + glow * 0.22) / 255.0,
            (90.0 + glow * 0.10) / 255.0,
        ];

        let outer_radius = p.size * GLOW_OUTER_SCALE;
        discs.push(DiscInstance::new(
            p.pos,
            outer_radius,
            outer_radius,
            [tint[0], tint[1], tint[2], 35.0 / 255.0],
        ));
        discs.push(DiscInstance::new(
            p.pos,
            p.size,
            1.0,
            [
                PARTICLE_CORE_COLOR[0],
                PARTICLE_CORE_COLOR[1],
                PARTICLE_CORE_COLOR[2],
                40.0 / 255.0,
            ],
        ));
    }

    discs
}

/// All stroked rings for one frame: a crisp ring and a wide white halo per
/// live ripple, fading with the ripple's remaining life.
pub fn build_rings(stage: &Stage) -> Vec<RingInstance> {
    let mut rings = Vec::with_capacity(stage.ripples.len().min(MAX_RIPPLES) * 2);

    for ripple in stage.ripples.iter().take(MAX_RIPPLES) {
        rings.push(RingInstance::new(
            ripple.center,
            ripple.radius,
            2.0,
            [
                RIPPLE_COLOR[0],
                RIPPLE_COLOR[1],
                RIPPLE_COLOR[2],
                ripple.life * 0.6 / 255.0,
            ],
        ));
        rings.push(RingInstance::new(
            ripple.center,
            ripple.radius,
            8.0,
            [1.0, 1.0, 1.0, ripple.life * 0.15 / 255.0],
        ));
    }

    rings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PARTICLE_COUNT, RIPPLE_LIFE};
    use crate::input::FrameInput;

    #[test]
    fn test_disc_count_is_spotlight_plus_two_per_particle() {
        let stage = Stage::new(800.0, 600.0, 1);
        let discs = build_discs(&stage, Vec2::new(400.0, 300.0));
        assert_eq!(discs.len(), SPOT_RINGS as usize + 1 + PARTICLE_COUNT * 2);
    }

    #[test]
    fn test_spotlight_brightens_toward_center() {
        let stage = Stage::new(800.0, 600.0, 1);
        let discs = build_discs(&stage, Vec2::new(400.0, 300.0));

        let outermost = &discs[0];
        let innermost = &discs[SPOT_RINGS as usize - 1];
        assert!(outermost.radius > innermost.radius);
        assert!(outermost.color[3] < innermost.color[3]);
        assert!((outermost.color[3] - SPOT_ALPHA_OUTER / 255.0).abs() < 1e-6);
        assert!(innermost.radius > 0.0);
    }

    #[test]
    fn test_glow_is_brighter_near_the_pointer() {
        let mut stage = Stage::new(800.0, 600.0, 1);
        stage.particles.truncate(2);
        stage.particles[0].pos = Vec2::new(400.0, 300.0);
        stage.particles[1].pos = Vec2::new(400.0 + GLOW_FAR + 50.0, 300.0);

        let discs = build_discs(&stage, Vec2::new(400.0, 300.0));
        let spotlight = SPOT_RINGS as usize + 1;
        let near_outer = &discs[spotlight];
        let far_outer = &discs[spotlight + 2];

        // green channel has the steepest glow slope
        assert!(near_outer.color[1] > far_outer.color[1]);
        assert!((far_outer.color[1] - 140.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_ripple_rings_fade_with_life() {
        let mut stage = Stage::new(800.0, 600.0, 1);
        let mut input = FrameInput::at(Vec2::new(100.0, 100.0));
        input.pulse = true;
        stage.step(&input);
        input.pulse = false;

        let fresh = build_rings(&stage);
        assert_eq!(fresh.len(), 2);
        let fresh_alpha = fresh[0].color[3];
        assert!(fresh_alpha <= RIPPLE_LIFE * 0.6 / 255.0);

        for _ in 0..40 {
            stage.step(&input);
        }
        let aged = build_rings(&stage);
        assert_eq!(aged.len(), 2);
        assert!(aged[0].color[3] < fresh_alpha);
        assert!(aged[0].radius > fresh[0].radius);
    }

    #[test]
    fn test_ring_batch_is_capped() {
        use crate::sim::Ripple;

        let mut stage = Stage::new(800.0, 600.0, 1);
        for _ in 0..MAX_RIPPLES + 20 {
            stage.ripples.push(Ripple::new(Vec2::new(100.0, 100.0), 8.0));
        }
        assert!(stage.ripples.len() > MAX_RIPPLES);
        assert_eq!(build_rings(&stage).len(), MAX_RIPPLES * 2);
    }
}
