use std::collections::HashSet;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Controller};

/// Adapter that bridges Winit events to the Controller trait
#[derive(Debug, Clone)]
pub struct WinitController {
    /// Currently held buttons
    held: HashSet<Button>,
    /// Held buttons in press order (for get_down_keys)
    held_vec: Vec<Button>,
    /// Buttons that went down since the last end_frame
    pressed_this_frame: HashSet<Button>,
}

impl WinitController {
    /// Create a new WinitController with no pressed keys
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            held_vec: Vec::new(),
            pressed_this_frame: HashSet::new(),
        }
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        match event.state {
                            ElementState::Pressed => self.press(button),
                            ElementState::Released => self.release(button),
                        }
                    }
                }
            }
            // Keys held while the window loses focus never report a release
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    /// Whether the button went down since the last `end_frame`
    pub fn was_pressed(&self, button: Button) -> bool {
        self.pressed_this_frame.contains(&button)
    }

    /// Reset per-frame state; call once after every tick
    pub fn end_frame(&mut self) {
        self.pressed_this_frame.clear();
    }

    fn press(&mut self, button: Button) {
        // OS key repeat re-sends Pressed; only the first one is an edge
        if self.held.insert(button) {
            self.held_vec.push(button);
            self.pressed_this_frame.insert(button);
        }
    }

    fn release(&mut self, button: Button) {
        if self.held.remove(&button) {
            self.held_vec.retain(|&b| b != button);
        }
    }

    fn release_all(&mut self) {
        self.held.clear();
        self.held_vec.clear();
    }

    /// Map Winit KeyCode to Button
    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW => Some(Button::KeyW),
            KeyCode::KeyA => Some(Button::KeyA),
            KeyCode::KeyS => Some(Button::KeyS),
            KeyCode::KeyD => Some(Button::KeyD),
            KeyCode::KeyQ => Some(Button::KeyQ),
            KeyCode::KeyE => Some(Button::KeyE),
            KeyCode::KeyZ => Some(Button::KeyZ),
            KeyCode::KeyM => Some(Button::KeyM),
            KeyCode::ArrowUp => Some(Button::ArrowUp),
            KeyCode::ArrowDown => Some(Button::ArrowDown),
            KeyCode::ArrowLeft => Some(Button::ArrowLeft),
            KeyCode::ArrowRight => Some(Button::ArrowRight),
            KeyCode::Space => Some(Button::Space),
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Button::Shift),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }
}

impl Default for WinitController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.held.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.held_vec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Winit KeyEvent has private fields, so these drive press/release directly

    #[test]
    fn test_new_controller_empty() {
        let controller = WinitController::new();
        assert!(!controller.is_down(Button::KeyW));
        assert_eq!(controller.get_down_keys().len(), 0);
    }

    #[test]
    fn test_press_and_release() {
        let mut controller = WinitController::new();
        controller.press(Button::KeyW);
        controller.press(Button::KeyA);

        assert!(controller.is_down(Button::KeyW));
        assert_eq!(controller.get_down_keys(), &[Button::KeyW, Button::KeyA]);

        controller.release(Button::KeyW);
        assert!(!controller.is_down(Button::KeyW));
        assert_eq!(controller.get_down_keys(), &[Button::KeyA]);
    }

    #[test]
    fn test_repeat_press_is_not_an_edge() {
        let mut controller = WinitController::new();
        controller.press(Button::KeyM);
        assert!(controller.was_pressed(Button::KeyM));

        controller.end_frame();
        controller.press(Button::KeyM);
        assert!(!controller.was_pressed(Button::KeyM));
        assert_eq!(controller.get_down_keys(), &[Button::KeyM]);
    }

    #[test]
    fn test_end_frame_keeps_held_keys() {
        let mut controller = WinitController::new();
        controller.press(Button::KeyD);
        controller.end_frame();

        assert!(controller.is_down(Button::KeyD));
        assert!(!controller.was_pressed(Button::KeyD));
    }

    #[test]
    fn test_release_all() {
        let mut controller = WinitController::new();
        controller.press(Button::KeyW);
        controller.press(Button::KeyE);
        controller.release_all();

        assert_eq!(controller.get_down_keys().len(), 0);
        assert!(!controller.is_down(Button::KeyE));
    }

    #[test]
    fn test_keycode_mapping() {
        assert_eq!(WinitController::keycode_to_button(KeyCode::KeyZ), Some(Button::KeyZ));
        assert_eq!(WinitController::keycode_to_button(KeyCode::ShiftRight), Some(Button::Shift));
        assert_eq!(WinitController::keycode_to_button(KeyCode::KeyP), None);
    }
}
