//! Scenario tests: longer input traces against the whole simulation.

use glam::Vec2;
use stagelight::{FrameInput, Mode, Stage};

const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 720.0;

fn quiet(pointer: Vec2) -> FrameInput {
    FrameInput::at(pointer)
}

/// A busy session: pointer sweeps, periodic clicks, a mid-run mode switch.
fn busy_trace(frame: u64) -> FrameInput {
    let t = frame as f32;
    let pointer = Vec2::new(
        WIDTH * 0.5 + (t * 0.02).sin() * WIDTH * 0.4,
        HEIGHT * 0.5 + (t * 0.017).cos() * HEIGHT * 0.4,
    );
    let mut input = quiet(pointer);
    input.pulse = frame % 25 == 0;
    input.mode_select = match frame {
        150 => Some(Mode::HighEnergy),
        400 => Some(Mode::Soft),
        _ => None,
    };
    input
}

#[test]
fn test_invariants_hold_over_a_busy_session() {
    let mut stage = Stage::new(WIDTH, HEIGHT, 99);

    for frame in 0..600u64 {
        stage.step(&busy_trace(frame));

        let bonus = stage.mode.speed_bonus();
        for p in &stage.particles {
            assert!(
                p.pos.x >= -10.0 && p.pos.x <= WIDTH + 10.0,
                "frame {frame}: x out of wrap bounds: {}",
                p.pos.x
            );
            assert!(
                p.pos.y >= -10.0 && p.pos.y <= HEIGHT + 10.0,
                "frame {frame}: y out of wrap bounds: {}",
                p.pos.y
            );
            assert!(
                p.vel.length() <= p.base_speed + bonus + 1e-4,
                "frame {frame}: speed cap exceeded"
            );
        }

        // a ripple lives ~80 frames; clicking every 25 bounds the live set
        assert!(stage.ripples.len() <= 4, "frame {frame}: ripple set grew");
        for r in &stage.ripples {
            assert!(r.life > 0.0 && r.life <= 255.0);
            assert!(r.radius >= 0.0);
        }
    }

    assert_eq!(stage.mode, Mode::Soft);
}

#[test]
fn test_same_seed_and_trace_replay_identically() {
    let mut a = Stage::new(WIDTH, HEIGHT, 7);
    let mut b = Stage::new(WIDTH, HEIGHT, 7);

    for frame in 0..300u64 {
        let input = busy_trace(frame);
        a.step(&input);
        b.step(&input);
    }

    assert_eq!(a.particles, b.particles);
    assert_eq!(a.ripples, b.ripples);
    assert_eq!(a.mode, b.mode);
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = Stage::new(WIDTH, HEIGHT, 1);
    let mut b = Stage::new(WIDTH, HEIGHT, 2);
    let input = quiet(Vec2::new(WIDTH * 0.5, HEIGHT * 0.5));

    for _ in 0..10 {
        a.step(&input);
        b.step(&input);
    }
    assert_ne!(a.particles, b.particles);
}

#[test]
fn test_ripple_trajectory_is_fixed_at_spawn() {
    // A ripple expanding at 8 px/frame: radius 8k, life 255 - 3.2k,
    // removed from the set on the frame its life hits zero.
    let mut stage = Stage::new(WIDTH, HEIGHT, 3);
    stage
        .ripples
        .push(stagelight::Ripple::new(Vec2::new(100.0, 100.0), 8.0));

    let input = quiet(Vec2::new(WIDTH * 0.5, HEIGHT * 0.5));
    for k in 1..=79u32 {
        stage.step(&input);
        assert_eq!(stage.ripples.len(), 1, "still alive after {k} advances");
        let r = &stage.ripples[0];
        assert_eq!(r.radius, 8.0 * k as f32);
        assert!((r.life - (255.0 - 3.2 * k as f32)).abs() < 1e-3);
    }

    stage.step(&input);
    assert!(stage.ripples.is_empty(), "gone after the 80th advance");
}

#[test]
fn test_mode_switch_changes_the_speed_ceiling() {
    let mut soft = Stage::new(WIDTH, HEIGHT, 5);
    let mut high = Stage::new(WIDTH, HEIGHT, 5);

    let pointer = Vec2::new(WIDTH * 0.5, HEIGHT * 0.5);
    let mut high_input = quiet(pointer);
    high_input.mode_select = Some(Mode::HighEnergy);
    high.step(&high_input);
    soft.step(&quiet(pointer));

    let input = quiet(pointer);
    for _ in 0..400 {
        soft.step(&input);
        high.step(&input);
    }

    let max_speed = |stage: &Stage| {
        stage
            .particles
            .iter()
            .map(|p| p.vel.length())
            .fold(0.0f32, f32::max)
    };

    // with the pointer pinned mid-screen, high energy saturates a higher cap
    assert!(max_speed(&high) > max_speed(&soft));
}

#[test]
fn test_resize_mid_session_keeps_the_scene() {
    let mut stage = Stage::new(WIDTH, HEIGHT, 21);
    let mut input = quiet(Vec2::new(200.0, 200.0));
    input.pulse = true;
    stage.step(&input);
    input.pulse = false;

    stage.resize(640.0, 480.0);
    assert_eq!(stage.ripples.len(), 1);

    // particles re-wrap into the smaller bounds within a few frames
    for _ in 0..200 {
        stage.step(&input);
    }
    for p in &stage.particles {
        assert!(p.pos.x >= -10.0 && p.pos.x <= 650.0);
        assert!(p.pos.y >= -10.0 && p.pos.y <= 490.0);
    }
}
