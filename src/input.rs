//! Input handling.
//!
//! [`Input`] tracks raw winit window events, distinguishing instantaneous
//! events (key just pressed) from continuous state (key held). Once per frame
//! the application condenses it into a [`FrameInput`] snapshot, which is the
//! only input surface the simulation ever sees — the update step stays a pure
//! function of explicit arguments.

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::sim::Mode;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<WinitMouseButton> for MouseButton {
    fn from(btn: WinitMouseButton) -> Self {
        match btn {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Left, // Default for other buttons
        }
    }
}

/// The keys the scene reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Mode 1 (soft pull).
    Key1,
    /// Mode 2 (high energy).
    Key2,
    /// Clear the canvas to black.
    C,
    /// Save the current frame as a PNG.
    S,
    Escape,
    /// Any key the scene ignores.
    Other(u32),
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::Digit1 => KeyCode::Key1,
            WinitKeyCode::Digit2 => KeyCode::Key2,
            WinitKeyCode::KeyC => KeyCode::C,
            WinitKeyCode::KeyS => KeyCode::S,
            WinitKeyCode::Escape => KeyCode::Escape,
            _ => KeyCode::Other(key as u32),
        }
    }
}

/// Input state tracking for keyboard and mouse.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,

    mouse_held: HashSet<MouseButton>,
    mouse_pressed: HashSet<MouseButton>,

    mouse_position: Vec2,
}

impl Input {
    /// Create a new input tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key was pressed this frame (just went down).
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key is currently held down.
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a mouse button was pressed this frame.
    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    /// Check if a mouse button is currently held down.
    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Get the pointer position in surface pixels.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Called at the start of each frame to clear per-frame state.
    pub(crate) fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.mouse_pressed.clear();
    }

    /// Process a winit window event.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    let key = KeyCode::from(keycode);
                    match event.state {
                        ElementState::Pressed => {
                            // Only fire pressed event if not already held (no repeat)
                            if !self.keys_held.contains(&key) {
                                self.keys_pressed.insert(key);
                            }
                            self.keys_held.insert(key);
                        }
                        ElementState::Released => {
                            self.keys_held.remove(&key);
                        }
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let btn = MouseButton::from(*button);
                match state {
                    ElementState::Pressed => {
                        self.mouse_pressed.insert(btn);
                        self.mouse_held.insert(btn);
                    }
                    ElementState::Released => {
                        self.mouse_held.remove(&btn);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = Vec2::new(position.x as f32, position.y as f32);
            }

            _ => {}
        }
    }

    /// Condense the current state into the per-frame snapshot the
    /// simulation consumes.
    pub fn snapshot(&self) -> FrameInput {
        let mode_select = if self.key_pressed(KeyCode::Key1) {
            Some(Mode::Soft)
        } else if self.key_pressed(KeyCode::Key2) {
            Some(Mode::HighEnergy)
        } else {
            None
        };

        FrameInput {
            pointer: self.mouse_position,
            pulse: self.mouse_pressed(MouseButton::Left),
            mode_select,
            clear: self.key_pressed(KeyCode::C),
            save: self.key_pressed(KeyCode::S),
        }
    }
}

/// Everything the scene reads in one frame, sampled once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Pointer position in canvas pixels.
    pub pointer: Vec2,
    /// Spawn a ripple at the pointer this frame.
    pub pulse: bool,
    /// Switch force mode this frame.
    pub mode_select: Option<Mode>,
    /// Reset the canvas to solid black (simulation state untouched).
    pub clear: bool,
    /// Export the current canvas as a PNG.
    pub save: bool,
}

impl FrameInput {
    /// A quiet frame with the pointer at the given position.
    pub fn at(pointer: Vec2) -> Self {
        Self {
            pointer,
            pulse: false,
            mode_select: None,
            clear: false,
            save: false,
        }
    }
}
