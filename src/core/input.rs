//! Input state tracking

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels of trackpad scrolling treated as one wheel notch
const PIXELS_PER_SCROLL_LINE: f32 = 40.0;

/// Tracks keyboard, mouse motion, and scroll wheel state between frames
pub struct InputState {
    /// Currently pressed keys
    keys_pressed: HashSet<KeyCode>,
    /// Mouse movement delta for the current frame
    mouse_delta: (f32, f32),
    /// Raw motion accumulated since the last end_frame
    mouse_delta_accumulated: (f32, f32),
    /// Scroll lines for the current frame
    scroll_delta: f32,
    /// Scroll lines accumulated since the last end_frame
    scroll_accumulated: f32,
    /// Whether mouse is captured
    mouse_captured: bool,
}

impl InputState {
    /// Create new input state
    pub fn new() -> Self {
        Self {
            keys_pressed: HashSet::new(),
            mouse_delta: (0.0, 0.0),
            mouse_delta_accumulated: (0.0, 0.0),
            scroll_delta: 0.0,
            scroll_accumulated: 0.0,
            mouse_captured: false,
        }
    }

    /// Process a window event
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(key_code),
                    state,
                    ..
                },
                ..
            } => self.set_key(*key_code, *state),
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_SCROLL_LINE,
                };
                self.scroll_accumulated += lines;
            }
            _ => {}
        }
    }

    fn set_key(&mut self, key_code: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.keys_pressed.insert(key_code);
            }
            ElementState::Released => {
                self.keys_pressed.remove(&key_code);
            }
        }
    }

    /// Process device event for raw mouse motion (when cursor is grabbed)
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        if self.mouse_captured {
            self.mouse_delta_accumulated.0 += delta.0 as f32;
            self.mouse_delta_accumulated.1 += delta.1 as f32;
        }
    }

    /// Latch accumulated motion and scroll for the frame about to be simulated
    pub fn begin_frame(&mut self) {
        self.mouse_delta = self.mouse_delta_accumulated;
        self.mouse_delta_accumulated = (0.0, 0.0);
        self.scroll_delta = self.scroll_accumulated;
        self.scroll_accumulated = 0.0;
    }

    /// Call at end of frame to reset per-frame state
    pub fn end_frame(&mut self) {
        self.mouse_delta = (0.0, 0.0);
        self.scroll_delta = 0.0;
    }

    /// Check if key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Mouse delta for the current frame
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Scroll wheel lines for the current frame (positive = away from user)
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Set mouse captured state
    pub fn set_mouse_captured(&mut self, captured: bool) {
        self.mouse_captured = captured;
        self.mouse_delta = (0.0, 0.0);
        self.mouse_delta_accumulated = (0.0, 0.0);
    }

    /// Check if mouse is captured
    pub fn is_mouse_captured(&self) -> bool {
        self.mouse_captured
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press() {
        let mut input = InputState::new();

        assert!(!input.is_key_pressed(KeyCode::KeyW));

        input.set_key(KeyCode::KeyW, ElementState::Pressed);

        assert!(input.is_key_pressed(KeyCode::KeyW));

        // Held keys survive the frame boundary
        input.end_frame();
        assert!(input.is_key_pressed(KeyCode::KeyW));

        input.set_key(KeyCode::KeyW, ElementState::Released);
        assert!(!input.is_key_pressed(KeyCode::KeyW));
    }

    #[test]
    fn test_mouse_motion_only_when_captured() {
        let mut input = InputState::new();
        input.process_mouse_motion((5.0, 3.0));
        input.begin_frame();
        assert_eq!(input.mouse_delta(), (0.0, 0.0));
        input.end_frame();

        input.set_mouse_captured(true);
        input.process_mouse_motion((5.0, 3.0));
        input.process_mouse_motion((1.0, -1.0));
        input.begin_frame();
        assert_eq!(input.mouse_delta(), (6.0, 2.0));

        input.end_frame();
        assert_eq!(input.mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_scroll_latched_per_frame() {
        let mut input = InputState::new();
        input.scroll_accumulated += 2.0;
        input.begin_frame();
        assert_eq!(input.scroll_delta(), 2.0);
        input.end_frame();
        input.begin_frame();
        assert_eq!(input.scroll_delta(), 0.0);
    }
}
