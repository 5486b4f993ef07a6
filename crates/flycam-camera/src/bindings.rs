//! Key and button bindings, and the per-frame input snapshot they produce.

use bevy_ecs::prelude::*;
use flycam_config::ControlScheme;
use flycam_input::{KeyboardState, MouseState};
use glam::{Vec2, Vec3};
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::pose::{FORWARD, RIGHT, UP};

/// Keys and buttons the controller listens to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CameraBindings {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub down: KeyCode,
    pub up: KeyCode,
    /// Held to multiply translation by [`FAST_MOVE_MULTIPLIER`](crate::FAST_MOVE_MULTIPLIER).
    pub fast_move: KeyCode,
    /// Pressed to ask the host to quit.
    pub quit: KeyCode,
    /// Pressed to enable or disable the controller.
    pub toggle: KeyCode,
    /// Held for click-to-pan look; also drives cursor capture.
    pub look: MouseButton,
}

impl CameraBindings {
    /// WASD plus Q/E (primary) or C/R (alternate) for down/up.
    #[must_use]
    pub fn for_scheme(scheme: ControlScheme) -> Self {
        let (down, up) = match scheme {
            ControlScheme::Primary => (KeyCode::KeyQ, KeyCode::KeyE),
            ControlScheme::Alternate => (KeyCode::KeyC, KeyCode::KeyR),
        };
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            down,
            up,
            fast_move: KeyCode::ShiftLeft,
            quit: KeyCode::Escape,
            toggle: KeyCode::F1,
            look: MouseButton::Right,
        }
    }

    /// Sum of the local axes of every held movement key. Opposing keys cancel.
    #[must_use]
    pub fn direction(&self, keyboard: &KeyboardState) -> Vec3 {
        [
            (self.forward, FORWARD),
            (self.back, -FORWARD),
            (self.left, -RIGHT),
            (self.right, RIGHT),
            (self.down, -UP),
            (self.up, UP),
        ]
        .into_iter()
        .filter(|(key, _)| keyboard.is_pressed(*key))
        .map(|(_, axis)| axis)
        .sum()
    }
}

impl Default for CameraBindings {
    fn default() -> Self {
        Self::for_scheme(ControlScheme::Primary)
    }
}

/// Everything the controller reads in one frame.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Seconds since the previous frame.
    pub delta_seconds: f32,
    /// Mouse axes for this frame, +X right and +Y up.
    pub look_axis: Vec2,
    /// Wheel lines this frame, positive away from the user.
    pub scroll: f32,
    /// Local-space movement direction from held keys, not yet scaled.
    pub direction: Vec3,
    pub fast_move: bool,
    pub look_pressed: bool,
    pub look_held: bool,
    pub look_released: bool,
    pub quit_pressed: bool,
    pub toggle_pressed: bool,
}

impl FrameInput {
    /// Samples `keyboard` and `mouse` through `bindings`.
    ///
    /// Mouse pixels are converted to axis units by `mouse_axis_scale` and the
    /// screen-space Y (down) is flipped to axis Y (up). Quit and toggle fire
    /// on the press edge only, so holding a key does not repeat them.
    #[must_use]
    pub fn capture(
        keyboard: &KeyboardState,
        mouse: &MouseState,
        bindings: &CameraBindings,
        mouse_axis_scale: f32,
        delta_seconds: f32,
    ) -> Self {
        let pixels = mouse.delta();
        Self {
            delta_seconds,
            look_axis: Vec2::new(pixels.x, -pixels.y) * mouse_axis_scale,
            scroll: mouse.scroll(),
            direction: bindings.direction(keyboard),
            fast_move: keyboard.is_pressed(bindings.fast_move),
            look_pressed: mouse.just_button_pressed(bindings.look),
            look_held: mouse.is_button_pressed(bindings.look),
            look_released: mouse.just_button_released(bindings.look),
            quit_pressed: keyboard.just_pressed(bindings.quit),
            toggle_pressed: keyboard.just_pressed(bindings.toggle),
        }
    }
}
