//! # stagelight
//!
//! An interactive generative scene: hundreds of glowing particles drift
//! through a Perlin flow field, gather under a pointer-driven spotlight, and
//! scatter off click-spawned ripples, rendered additively over a fading
//! trail canvas.
//!
//! ```no_run
//! use stagelight::StageLight;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     StageLight::new()
//!         .with_title("Stage Light Particles")
//!         .with_size(1280, 720)
//!         .run()?;
//!     Ok(())
//! }
//! ```
//!
//! Controls: move the pointer to steer the spotlight, click to pulse a
//! ripple, `1`/`2` to switch force modes, `C` to clear the canvas, `S` to
//! save a PNG, `Esc` to quit.
//!
//! The simulation ([`Stage`]) is plain CPU code driven by explicit
//! [`FrameInput`] snapshots, so it can be stepped and inspected without a
//! window or GPU.

pub mod app;
pub mod config;
pub mod error;
pub mod field;
pub mod gpu;
pub mod input;
pub mod sim;
pub mod time;

pub use app::StageLight;
pub use error::{AppError, ExportError, GpuError};
pub use field::FlowField;
pub use input::{FrameInput, Input, KeyCode, MouseButton};
pub use sim::{Mode, Particle, Ripple, Stage};
pub use time::Time;

// Re-export the math type used throughout the public API.
pub use glam::Vec2;
