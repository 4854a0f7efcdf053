//! The simulation: an owning container of particles and ripples, stepped
//! once per frame from an explicit [`FrameInput`](crate::input::FrameInput)
//! snapshot.
//!
//! Everything is single-threaded and deterministic: given the same seed and
//! the same input trace, a [`Stage`] replays identically.

mod particle;
mod ripple;

pub use particle::{attraction, falloff, ripple_kick, wrap, Particle};
pub use ripple::Ripple;

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::config::{
    BASE_SPEED_MAX, BASE_SPEED_MIN, NOISE_SEED_MAX, PARTICLE_COUNT, RIPPLE_SPEED_MAX,
    RIPPLE_SPEED_MIN, SIZE_MAX, SIZE_MIN, SPAWN_SPEED_MAX, SPAWN_SPEED_MIN,
};
use crate::field::FlowField;
use crate::input::FrameInput;

/// Force mode: a two-valued global switch scaling pull, kick and speed cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Gentle spotlight pull.
    #[default]
    Soft,
    /// Stronger pull, harder ripple kicks, higher speed cap. All force
    /// scalars are exactly double [`Mode::Soft`]'s.
    HighEnergy,
}

impl Mode {
    /// Spotlight attraction strength.
    pub fn pull(self) -> f32 {
        match self {
            Mode::Soft => 1.2,
            Mode::HighEnergy => 2.4,
        }
    }

    /// Ripple impulse scale.
    pub fn kick(self) -> f32 {
        match self {
            Mode::Soft => 0.35,
            Mode::HighEnergy => 0.7,
        }
    }

    /// Added on top of each particle's base speed cap.
    pub fn speed_bonus(self) -> f32 {
        match self {
            Mode::Soft => 0.6,
            Mode::HighEnergy => 1.2,
        }
    }

    /// Human-readable label for the window title.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Soft => "Soft Pull",
            Mode::HighEnergy => "High Energy",
        }
    }
}

/// The whole simulation state for one scene.
#[derive(Debug)]
pub struct Stage {
    pub particles: Vec<Particle>,
    pub ripples: Vec<Ripple>,
    pub mode: Mode,
    /// Monotonic frame counter; drives the flow field's time axis.
    pub frame: u64,
    field: FlowField,
    size: Vec2,
    /// Randomizes ripple expansion speeds; seeded for reproducibility.
    rng: SmallRng,
}

impl Stage {
    /// Spawn a full stage for a canvas of the given pixel size.
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let particles = (0..PARTICLE_COUNT)
            .map(|_| spawn_particle(&mut rng, width, height))
            .collect();

        Self {
            particles,
            ripples: Vec::new(),
            mode: Mode::Soft,
            frame: 0,
            field: FlowField::new(seed as u32),
            size: Vec2::new(width, height),
            rng,
        }
    }

    /// Canvas size the simulation wraps against.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Track a resized drawable surface. Particles and ripples persist; only
    /// the wrap bounds change.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    /// Advance the scene by one frame.
    ///
    /// Order matches the visual layering contract: ripples advance and the
    /// dead ones are dropped first, so particles only ever see the live set
    /// at its current radii. `clear` and `save` are render-side flags and
    /// deliberately ignored here.
    pub fn step(&mut self, input: &FrameInput) {
        if let Some(mode) = input.mode_select {
            self.mode = mode;
        }

        if input.pulse {
            let speed = self.rng.gen_range(RIPPLE_SPEED_MIN..RIPPLE_SPEED_MAX);
            self.ripples.push(Ripple::new(input.pointer, speed));
        }

        for ripple in &mut self.ripples {
            ripple.advance();
        }
        self.ripples.retain(Ripple::alive);

        let (field, frame, mode, size) = (&self.field, self.frame, self.mode, self.size);
        for particle in &mut self.particles {
            particle.update(field, frame, input.pointer, mode, &self.ripples, size);
        }

        self.frame += 1;
    }
}

fn spawn_particle(rng: &mut SmallRng, width: f32, height: f32) -> Particle {
    let angle = rng.gen_range(0.0..TAU);
    let speed = rng.gen_range(SPAWN_SPEED_MIN..SPAWN_SPEED_MAX);

    Particle {
        pos: Vec2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height)),
        vel: Vec2::new(angle.cos(), angle.sin()) * speed,
        base_speed: rng.gen_range(BASE_SPEED_MIN..BASE_SPEED_MAX),
        seed: rng.gen_range(0.0..NOISE_SEED_MAX),
        size: rng.gen_range(SIZE_MIN..SIZE_MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PARTICLE_COUNT, WRAP_MARGIN};

    fn quiet_input() -> FrameInput {
        FrameInput::at(Vec2::new(400.0, 300.0))
    }

    #[test]
    fn test_spawn_counts_and_ranges() {
        let stage = Stage::new(800.0, 600.0, 1);
        assert_eq!(stage.particles.len(), PARTICLE_COUNT);
        assert!(stage.ripples.is_empty());
        assert_eq!(stage.mode, Mode::Soft);

        for p in &stage.particles {
            assert!(p.pos.x >= 0.0 && p.pos.x < 800.0);
            assert!(p.pos.y >= 0.0 && p.pos.y < 600.0);
            assert!(p.base_speed >= BASE_SPEED_MIN && p.base_speed < BASE_SPEED_MAX);
            assert!(p.size >= SIZE_MIN && p.size < SIZE_MAX);
        }
    }

    #[test]
    fn test_stage_is_deterministic() {
        let mut a = Stage::new(800.0, 600.0, 9);
        let mut b = Stage::new(800.0, 600.0, 9);
        let mut input = quiet_input();
        for k in 0..60 {
            input.pulse = k % 20 == 0;
            a.step(&input);
            b.step(&input);
        }
        assert_eq!(a.particles, b.particles);
        assert_eq!(a.ripples, b.ripples);
    }

    #[test]
    fn test_pulse_spawns_one_ripple_at_pointer() {
        let mut stage = Stage::new(800.0, 600.0, 3);
        let mut input = quiet_input();
        input.pulse = true;
        stage.step(&input);

        assert_eq!(stage.ripples.len(), 1);
        let r = &stage.ripples[0];
        assert_eq!(r.center, input.pointer);
        // already advanced once this frame
        assert!(r.speed >= RIPPLE_SPEED_MIN && r.speed < RIPPLE_SPEED_MAX);
        assert_eq!(r.radius, r.speed);
    }

    #[test]
    fn test_dead_ripples_leave_the_set() {
        let mut stage = Stage::new(800.0, 600.0, 5);
        let mut input = quiet_input();
        input.pulse = true;
        stage.step(&input);
        input.pulse = false;

        // first advance happened on the spawn frame; 80 total kills it
        for _ in 0..79 {
            stage.step(&input);
        }
        assert!(stage.ripples.is_empty());
    }

    #[test]
    fn test_mode_select_applies_before_forces() {
        let mut stage = Stage::new(800.0, 600.0, 2);
        let mut input = quiet_input();
        input.mode_select = Some(Mode::HighEnergy);
        stage.step(&input);
        assert_eq!(stage.mode, Mode::HighEnergy);
    }

    #[test]
    fn test_wrap_invariant_holds_every_frame() {
        let mut stage = Stage::new(640.0, 480.0, 11);
        let mut input = FrameInput::at(Vec2::new(320.0, 240.0));
        input.mode_select = Some(Mode::HighEnergy);
        for k in 0..200 {
            input.pulse = k % 15 == 0;
            stage.step(&input);
            for p in &stage.particles {
                assert!(p.pos.x >= -WRAP_MARGIN && p.pos.x <= 640.0 + WRAP_MARGIN);
                assert!(p.pos.y >= -WRAP_MARGIN && p.pos.y <= 480.0 + WRAP_MARGIN);
            }
            input.mode_select = None;
        }
    }

    #[test]
    fn test_speed_cap_holds_every_frame() {
        let mut stage = Stage::new(640.0, 480.0, 13);
        let mut input = FrameInput::at(Vec2::new(320.0, 240.0));
        for k in 0..120 {
            input.pulse = k % 10 == 0;
            input.mode_select = if k == 60 { Some(Mode::HighEnergy) } else { None };
            stage.step(&input);
            let cap_bonus = stage.mode.speed_bonus();
            for p in &stage.particles {
                assert!(
                    p.vel.length() <= p.base_speed + cap_bonus + 1e-4,
                    "|vel| = {} exceeds cap {}",
                    p.vel.length(),
                    p.base_speed + cap_bonus
                );
            }
        }
    }

    #[test]
    fn test_clear_and_save_do_not_touch_state() {
        let mut stage = Stage::new(800.0, 600.0, 17);
        let mut input = quiet_input();
        input.pulse = true;
        stage.step(&input);

        let particles_before = stage.particles.len();
        let ripples_before = stage.ripples.len();

        input.pulse = false;
        input.clear = true;
        input.save = true;
        stage.step(&input);

        assert_eq!(stage.particles.len(), particles_before);
        assert_eq!(stage.ripples.len(), ripples_before);
    }

    #[test]
    fn test_resize_keeps_state() {
        let mut stage = Stage::new(800.0, 600.0, 19);
        let mut input = quiet_input();
        input.pulse = true;
        stage.step(&input);

        let particles = stage.particles.clone();
        let ripples = stage.ripples.clone();
        stage.resize(1024.0, 768.0);

        assert_eq!(stage.particles, particles);
        assert_eq!(stage.ripples, ripples);
        assert_eq!(stage.size(), Vec2::new(1024.0, 768.0));
    }
}
