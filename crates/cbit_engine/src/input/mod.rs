//! Input state
//!
//! The platform layer feeds key, button and cursor events into an
//! [`InputState`]; scenes read it during `update`. "Pressed" means the
//! transition happened this frame, "down" means the key is held.

use std::collections::HashSet;

/// Per-frame keyboard and mouse state
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    buttons_pressed: HashSet<MouseButton>,
    mouse_position: (f64, f64),
    mouse_delta: (f64, f64),
    scroll_delta: f64,
}

impl InputState {
    /// Create an input state with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame transitions; call once after every frame
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.buttons_pressed.clear();
        self.mouse_delta = (0.0, 0.0);
        self.scroll_delta = 0.0;
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if self.keys_down.insert(key) {
                self.keys_pressed.insert(key);
            }
        } else {
            self.keys_down.remove(&key);
        }
    }

    /// Handle mouse button input
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            if self.buttons_down.insert(button) {
                self.buttons_pressed.insert(button);
            }
        } else {
            self.buttons_down.remove(&button);
        }
    }

    /// Handle mouse movement
    pub fn handle_mouse_move(&mut self, x: f64, y: f64) {
        self.mouse_delta.0 += x - self.mouse_position.0;
        self.mouse_delta.1 += y - self.mouse_position.1;
        self.mouse_position = (x, y);
    }

    /// Handle scroll wheel input
    pub fn handle_scroll(&mut self, delta_y: f64) {
        self.scroll_delta += delta_y;
    }

    /// Key went down this frame
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Key is held
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Any of `keys` went down this frame
    pub fn any_key_pressed(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| self.is_key_pressed(*key))
    }

    /// Button went down this frame
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    /// Button is held
    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Cursor position in window pixels
    pub fn mouse_position(&self) -> (f64, f64) {
        self.mouse_position
    }

    /// Cursor movement since the last `begin_frame`
    pub fn mouse_delta(&self) -> (f64, f64) {
        self.mouse_delta
    }

    /// Scroll since the last `begin_frame`
    pub fn scroll_delta(&self) -> f64 {
        self.scroll_delta
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// S key
    S,
    /// W key
    W,
    /// F3, toggles debug output
    F3,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_one_frame_hold_persists() {
        let mut input = InputState::new();
        input.handle_key_input(KeyCode::Enter, true);
        assert!(input.is_key_pressed(KeyCode::Enter));
        assert!(input.is_key_down(KeyCode::Enter));

        input.begin_frame();
        assert!(!input.is_key_pressed(KeyCode::Enter));
        assert!(input.is_key_down(KeyCode::Enter));

        // Key repeat while held is not a new press
        input.handle_key_input(KeyCode::Enter, true);
        assert!(!input.is_key_pressed(KeyCode::Enter));

        input.handle_key_input(KeyCode::Enter, false);
        assert!(!input.is_key_down(KeyCode::Enter));
    }

    #[test]
    fn test_mouse_delta_accumulates_within_frame() {
        let mut input = InputState::new();
        input.handle_mouse_move(10.0, 10.0);
        input.begin_frame();
        input.handle_mouse_move(15.0, 12.0);
        input.handle_mouse_move(20.0, 8.0);
        assert_eq!(input.mouse_delta(), (10.0, -2.0));
        assert_eq!(input.mouse_position(), (20.0, 8.0));
    }

    #[test]
    fn test_mouse_button_press() {
        let mut input = InputState::new();
        input.handle_mouse_button(MouseButton::Left, true);
        assert!(input.is_mouse_button_pressed(MouseButton::Left));
        assert!(!input.is_mouse_button_pressed(MouseButton::Right));
    }
}
