use criterion::{criterion_group, criterion_main, Criterion};
use glam::Vec2;
use stagelight::{FrameInput, Mode, Stage};

fn bench_step(c: &mut Criterion) {
    let pointer = Vec2::new(640.0, 360.0);

    c.bench_function("step_quiet", |b| {
        let mut stage = Stage::new(1280.0, 720.0, 42);
        let input = FrameInput::at(pointer);
        b.iter(|| stage.step(&input));
    });

    c.bench_function("step_with_ripples", |b| {
        let mut stage = Stage::new(1280.0, 720.0, 42);
        let mut input = FrameInput::at(pointer);
        input.mode_select = Some(Mode::HighEnergy);
        stage.step(&input);
        input.mode_select = None;

        let mut frame = 0u64;
        b.iter(|| {
            // keep a few ripples live throughout the measurement
            input.pulse = frame % 20 == 0;
            stage.step(&input);
            frame += 1;
        });
    });
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
