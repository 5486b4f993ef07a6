//! Keyboard state for a single frame.
//!
//! [`KeyboardState`] collects winit key events between two frames. The camera
//! controller reads held keys for movement and press edges for one-shot
//! actions such as the quit request, so both are tracked. Keys are physical
//! (scan-code) keys, which keeps WASD/QE in the same place on every layout.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// A key transition stripped of winit's platform-specific payload.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key went down or up.
    pub state: ElementState,
    /// OS auto-repeat.
    pub repeat: bool,
}

impl RawKeyEvent {
    /// A non-repeat press of `code`.
    #[must_use]
    pub fn press(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    /// A release of `code`.
    #[must_use]
    pub fn release(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Released,
            repeat: false,
        }
    }
}

/// Held keys plus the press/release edges seen since the last
/// [`clear_transients`](Self::clear_transients).
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<PhysicalKey>,
    pressed_this_frame: HashSet<PhysicalKey>,
    released_this_frame: HashSet<PhysicalKey>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a winit [`KeyEvent`].
    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        });
    }

    /// Feeds a [`RawKeyEvent`]. Auto-repeat events are dropped so a held key
    /// produces a single press edge.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                if self.held.insert(event.key) {
                    self.pressed_this_frame.insert(event.key);
                }
            }
            ElementState::Released => {
                if self.held.remove(&event.key) {
                    self.released_this_frame.insert(event.key);
                }
            }
        }
    }

    /// `true` while `code` is held.
    #[must_use]
    pub fn is_pressed(&self, code: KeyCode) -> bool {
        self.held.contains(&PhysicalKey::Code(code))
    }

    /// `true` only in the frame `code` went down.
    #[must_use]
    pub fn just_pressed(&self, code: KeyCode) -> bool {
        self.pressed_this_frame.contains(&PhysicalKey::Code(code))
    }

    /// `true` only in the frame `code` went up.
    #[must_use]
    pub fn just_released(&self, code: KeyCode) -> bool {
        self.released_this_frame.contains(&PhysicalKey::Code(code))
    }

    /// Drops every held key, e.g. when the window loses focus and release
    /// events will never arrive.
    pub fn release_all(&mut self) {
        self.released_this_frame.extend(self.held.drain());
    }

    /// Clears the press/release edges. Call once at the end of each frame.
    pub fn clear_transients(&mut self) {
        self.pressed_this_frame.clear();
        self.released_this_frame.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_no_keys_pressed() {
        let kb = KeyboardState::new();
        for code in [KeyCode::KeyW, KeyCode::KeyQ, KeyCode::ShiftLeft, KeyCode::Escape] {
            assert!(!kb.is_pressed(code));
            assert!(!kb.just_pressed(code));
            assert!(!kb.just_released(code));
        }
    }

    #[test]
    fn test_press_sets_held_and_edge() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::press(KeyCode::KeyW));
        assert!(kb.is_pressed(KeyCode::KeyW));
        assert!(kb.just_pressed(KeyCode::KeyW));
    }

    #[test]
    fn test_press_edge_lasts_one_frame() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::press(KeyCode::Escape));
        kb.clear_transients();
        assert!(!kb.just_pressed(KeyCode::Escape));
        assert!(kb.is_pressed(KeyCode::Escape));
    }

    #[test]
    fn test_repeat_does_not_produce_second_edge() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::press(KeyCode::Escape));
        kb.clear_transients();
        kb.process_raw(RawKeyEvent {
            repeat: true,
            ..RawKeyEvent::press(KeyCode::Escape)
        });
        kb.process_raw(RawKeyEvent::press(KeyCode::Escape));
        assert!(!kb.just_pressed(KeyCode::Escape));
    }

    #[test]
    fn test_release_clears_held() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::press(KeyCode::KeyD));
        kb.clear_transients();
        kb.process_raw(RawKeyEvent::release(KeyCode::KeyD));
        assert!(!kb.is_pressed(KeyCode::KeyD));
        assert!(kb.just_released(KeyCode::KeyD));
        kb.clear_transients();
        assert!(!kb.just_released(KeyCode::KeyD));
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::release(KeyCode::KeyA));
        assert!(!kb.just_released(KeyCode::KeyA));
    }

    #[test]
    fn test_keys_tracked_independently() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::press(KeyCode::KeyW));
        kb.process_raw(RawKeyEvent::press(KeyCode::ShiftLeft));
        kb.process_raw(RawKeyEvent::release(KeyCode::KeyW));
        assert!(!kb.is_pressed(KeyCode::KeyW));
        assert!(kb.is_pressed(KeyCode::ShiftLeft));
    }

    #[test]
    fn test_release_all_on_focus_loss() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::press(KeyCode::KeyW));
        kb.process_raw(RawKeyEvent::press(KeyCode::KeyE));
        kb.clear_transients();
        kb.release_all();
        assert!(!kb.is_pressed(KeyCode::KeyW));
        assert!(kb.just_released(KeyCode::KeyE));
    }
}
