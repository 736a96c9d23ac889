use serde::Deserialize;

/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyQ,
    KeyE,
    KeyZ,
    KeyM,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Shift,
    Escape,
}

impl Button {
    pub const ALL: [Button; 15] = [
        Button::KeyW,
        Button::KeyA,
        Button::KeyS,
        Button::KeyD,
        Button::KeyQ,
        Button::KeyE,
        Button::KeyZ,
        Button::KeyM,
        Button::ArrowUp,
        Button::ArrowDown,
        Button::ArrowLeft,
        Button::ArrowRight,
        Button::Space,
        Button::Shift,
        Button::Escape,
    ];

    /// Map a single-letter key name ("w", "A", "space", ...) to a button
    pub fn from_name(name: &str) -> Option<Button> {
        let button = match name.to_ascii_lowercase().as_str() {
            "w" => Button::KeyW,
            "a" => Button::KeyA,
            "s" => Button::KeyS,
            "d" => Button::KeyD,
            "q" => Button::KeyQ,
            "e" => Button::KeyE,
            "z" => Button::KeyZ,
            "m" => Button::KeyM,
            "up" => Button::ArrowUp,
            "down" => Button::ArrowDown,
            "left" => Button::ArrowLeft,
            "right" => Button::ArrowRight,
            "space" => Button::Space,
            "shift" => Button::Shift,
            "escape" | "esc" => Button::Escape,
            _ => return None,
        };
        Some(button)
    }
}

/// Controller - key state queried once per frame
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons
    fn get_down_keys(&self) -> &[Button];
}

/// Fixed set of held keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    pressed: Vec<Button>,
}

impl KeySnapshot {
    pub fn new(buttons: &[Button]) -> Self {
        let mut pressed = Vec::with_capacity(buttons.len());
        for &button in buttons {
            if !pressed.contains(&button) {
                pressed.push(button);
            }
        }
        Self { pressed }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

impl Controller for KeySnapshot {
    fn is_down(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.pressed
    }
}
