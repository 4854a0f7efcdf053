//! Seeded scene with a custom window.
//!
//! Run with: cargo run --example custom_scene

use stagelight::StageLight;

fn main() {
    let result = StageLight::new()
        .with_title("Stage Light (seeded)")
        .with_size(1600, 900)
        .with_seed(2024)
        .run();

    if let Err(e) = result {
        eprintln!("custom_scene: {e}");
        std::process::exit(1);
    }
}
