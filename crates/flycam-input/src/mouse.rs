//! Mouse state for a single frame.
//!
//! [`MouseState`] accumulates cursor motion, raw device motion, button edges
//! and wheel ticks between two frames. While the cursor is captured the
//! absolute position is meaningless, so motion comes from raw
//! `DeviceEvent::MouseMotion` deltas instead of `CursorMoved` differences.

use glam::Vec2;
use tracing::debug;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::window::{CursorGrabMode, Window};

use crate::cursor::CursorMode;

/// Pixel deltas per wheel "line" on touchpads and high-resolution wheels.
const PIXELS_PER_LINE: f64 = 40.0;

#[derive(Debug, Clone, Copy, Default)]
struct ButtonFrame {
    held: bool,
    pressed: bool,
    released: bool,
}

fn button_slot(button: MouseButton) -> usize {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
        MouseButton::Back => 3,
        MouseButton::Forward | MouseButton::Other(_) => 4,
    }
}

/// Frame-coherent mouse state.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Option<Vec2>,
    delta: Vec2,
    buttons: [ButtonFrame; 5],
    scroll: f32,
    cursor_mode: CursorMode,
    cursor_in_window: bool,
}

impl MouseState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Event handlers ──────────────────────────────────────────────

    /// `WindowEvent::CursorMoved`. Contributes to the delta only while free,
    /// and never for the first sample after the cursor (re)enters the window.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        if !self.cursor_mode.is_captured()
            && let Some(previous) = self.position
        {
            self.delta += new_pos - previous;
        }
        self.position = Some(new_pos);
    }

    /// `DeviceEvent::MouseMotion`. Contributes to the delta only while captured.
    pub fn on_raw_motion(&mut self, dx: f64, dy: f64) {
        if self.cursor_mode.is_captured() {
            self.delta += Vec2::new(dx as f32, dy as f32);
        }
    }

    /// `WindowEvent::MouseInput`.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let frame = &mut self.buttons[button_slot(button)];
        match state {
            ElementState::Pressed => {
                frame.held = true;
                frame.pressed = true;
            }
            ElementState::Released => {
                frame.held = false;
                frame.released = true;
            }
        }
    }

    /// `WindowEvent::MouseWheel`. Positive is wheel up / away from the user.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_x, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
        };
    }

    /// `WindowEvent::CursorEntered`.
    pub fn on_cursor_entered(&mut self) {
        self.cursor_in_window = true;
    }

    /// `WindowEvent::CursorLeft`.
    pub fn on_cursor_left(&mut self) {
        self.cursor_in_window = false;
        self.position = None;
    }

    /// Applies `mode` to `window`: grab and hide for [`CursorMode::Captured`],
    /// release and show for [`CursorMode::Free`].
    ///
    /// Not every platform supports [`CursorGrabMode::Locked`]; confinement is
    /// used as the fallback.
    pub fn set_cursor_mode(&mut self, window: &Window, mode: CursorMode) {
        if self.cursor_mode == mode {
            return;
        }
        match mode {
            CursorMode::Captured => {
                if window.set_cursor_grab(CursorGrabMode::Locked).is_err()
                    && let Err(e) = window.set_cursor_grab(CursorGrabMode::Confined)
                {
                    debug!("Cursor grab unavailable: {e}");
                }
                window.set_cursor_visible(false);
            }
            CursorMode::Free => {
                let _ = window.set_cursor_grab(CursorGrabMode::None);
                window.set_cursor_visible(true);
            }
        }
        self.cursor_mode = mode;
    }

    /// Switches delta tracking without touching a window (tests, headless hosts).
    pub fn set_cursor_mode_flag(&mut self, mode: CursorMode) {
        self.cursor_mode = mode;
    }

    /// Releases every held button, e.g. on focus loss. Each one reports a
    /// release edge on the next frame.
    pub fn release_all(&mut self) {
        for b in self.buttons.iter_mut().filter(|b| b.held) {
            b.held = false;
            b.released = true;
        }
    }

    /// Clears delta, scroll and button edges. Call once at the end of each frame.
    pub fn clear_transients(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = 0.0;
        for b in &mut self.buttons {
            b.pressed = false;
            b.released = false;
        }
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Cursor position in window coordinates, if the cursor is over the window.
    #[must_use]
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Motion since the last clear, in pixels, +Y pointing down the screen.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button_slot(button)].held
    }

    #[must_use]
    pub fn just_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button_slot(button)].pressed
    }

    #[must_use]
    pub fn just_button_released(&self, button: MouseButton) -> bool {
        self.buttons[button_slot(button)].released
    }

    /// Wheel lines accumulated since the last clear.
    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    #[must_use]
    pub fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    #[must_use]
    pub fn is_cursor_in_window(&self) -> bool {
        self.cursor_in_window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    fn inside() -> MouseState {
        let mut ms = MouseState::new();
        ms.on_cursor_entered();
        ms
    }

    #[test]
    fn test_first_sample_after_enter_has_no_delta() {
        let mut ms = inside();
        ms.on_cursor_moved(640.0, 360.0);
        assert_eq!(ms.delta(), Vec2::ZERO);
        assert_eq!(ms.position(), Some(Vec2::new(640.0, 360.0)));
        ms.on_cursor_left();
        ms.on_cursor_entered();
        ms.on_cursor_moved(0.0, 0.0);
        assert_eq!(ms.delta(), Vec2::ZERO);
    }

    #[test]
    fn test_free_cursor_delta_from_moves() {
        let mut ms = inside();
        ms.on_cursor_moved(100.0, 200.0);
        ms.clear_transients();
        ms.on_cursor_moved(110.0, 195.0);
        assert!((ms.delta().x - 10.0).abs() < f32::EPSILON);
        assert!((ms.delta().y + 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_raw_motion_ignored_while_free() {
        let mut ms = inside();
        ms.on_raw_motion(5.0, 5.0);
        assert_eq!(ms.delta(), Vec2::ZERO);
    }

    #[test]
    fn test_captured_cursor_uses_raw_motion_only() {
        let mut ms = inside();
        ms.set_cursor_mode_flag(CursorMode::Captured);
        ms.on_cursor_moved(300.0, 300.0);
        ms.on_raw_motion(3.0, -2.0);
        ms.on_raw_motion(1.0, 0.0);
        assert_eq!(ms.delta(), Vec2::new(4.0, -2.0));
    }

    #[test]
    fn test_right_button_edges() {
        let mut ms = MouseState::new();
        ms.on_button(MouseButton::Right, ElementState::Pressed);
        assert!(ms.is_button_pressed(MouseButton::Right));
        assert!(ms.just_button_pressed(MouseButton::Right));
        assert!(!ms.is_button_pressed(MouseButton::Left));

        ms.clear_transients();
        assert!(!ms.just_button_pressed(MouseButton::Right));
        assert!(ms.is_button_pressed(MouseButton::Right));

        ms.on_button(MouseButton::Right, ElementState::Released);
        assert!(!ms.is_button_pressed(MouseButton::Right));
        assert!(ms.just_button_released(MouseButton::Right));
    }

    #[test]
    fn test_scroll_lines_and_pixels_accumulate() {
        let mut ms = MouseState::new();
        ms.on_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        ms.on_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 20.0)));
        assert!((ms.scroll() - 1.5).abs() < 1e-6);
        ms.clear_transients();
        assert_eq!(ms.scroll(), 0.0);
    }

    #[test]
    fn test_delta_resets_each_frame() {
        let mut ms = inside();
        ms.on_cursor_moved(50.0, 50.0);
        ms.clear_transients();
        assert_eq!(ms.delta(), Vec2::ZERO);
    }

    #[test]
    fn test_cursor_enter_leave() {
        let mut ms = MouseState::new();
        ms.on_cursor_entered();
        assert!(ms.is_cursor_in_window());
        ms.on_cursor_left();
        assert!(!ms.is_cursor_in_window());
    }

    #[test]
    fn test_release_all_reports_release_edges() {
        let mut ms = MouseState::new();
        ms.on_button(MouseButton::Right, ElementState::Pressed);
        ms.clear_transients();
        ms.release_all();
        assert!(!ms.is_button_pressed(MouseButton::Right));
        assert!(ms.just_button_released(MouseButton::Right));
        assert!(!ms.just_button_released(MouseButton::Left));
    }
}
