use stagelight::StageLight;

fn main() {
    if let Err(e) = StageLight::new().run() {
        eprintln!("stagelight: {e}");
        std::process::exit(1);
    }
}
