//! The free-fly camera controller.
//!
//! Input moves a *target* pose; a separate *current* pose follows it with
//! exponential smoothing and is what gets written to the host transform.
//! Both poses are taken from the transform when the controller activates, so
//! enabling it never makes the camera jump.

use std::fmt::Write;

use bevy_ecs::prelude::*;
use flycam_config::LookMode;
use flycam_input::CursorMode;
use glam::{Vec2, Vec3};
use tracing::{debug, info};

use crate::bindings::FrameInput;
use crate::host::{CameraHost, CameraTransform};
use crate::pose::CameraPose;
use crate::settings::CameraSettings;
use crate::smoothing::lerp_fraction;

/// Translation multiplier while the fast-move key is held.
pub const FAST_MOVE_MULTIPLIER: f32 = 10.0;

/// Boost added per wheel line. Translation doubles every `1 / 0.2 = 5` lines.
pub const BOOST_PER_SCROLL: f32 = 0.2;

#[derive(Clone, Copy, Debug)]
struct ActivePoses {
    target: CameraPose,
    current: CameraPose,
}

/// Free-fly camera controller, attached to the camera entity.
#[derive(Component, Clone, Debug)]
pub struct CameraMotionController {
    /// Clearing this deactivates the controller on its next update and drops
    /// both poses; setting it again re-syncs them from the transform.
    pub enabled: bool,
    settings: CameraSettings,
    boost: f32,
    poses: Option<ActivePoses>,
}

impl CameraMotionController {
    #[must_use]
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            enabled: true,
            boost: settings.boost,
            settings,
            poses: None,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Replaces the tunables, e.g. after a config reload. The runtime boost
    /// is kept unless the configured starting boost itself changed.
    pub fn apply_settings(&mut self, settings: CameraSettings) {
        if settings.boost != self.settings.boost {
            self.boost = settings.boost;
        }
        self.settings = settings;
    }

    /// Current translation boost exponent.
    #[must_use]
    pub fn boost(&self) -> f32 {
        self.boost
    }

    /// Whether the poses are live (the controller has run since it was enabled).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.poses.is_some()
    }

    /// The pose input is steering toward.
    #[must_use]
    pub fn target(&self) -> Option<&CameraPose> {
        self.poses.as_ref().map(|p| &p.target)
    }

    /// The smoothed pose last written to the transform.
    #[must_use]
    pub fn current(&self) -> Option<&CameraPose> {
        self.poses.as_ref().map(|p| &p.current)
    }

    /// Syncs both poses to `transform`. Called automatically on the first
    /// update after the controller becomes enabled.
    pub fn activate(&mut self, transform: &impl CameraTransform) {
        let pose = CameraPose::from_transform(transform);
        debug!(
            x = pose.x,
            y = pose.y,
            z = pose.z,
            yaw = pose.yaw,
            pitch = pose.pitch,
            "Free-fly camera activated"
        );
        self.poses = Some(ActivePoses {
            target: pose,
            current: pose,
        });
    }

    /// Drops both poses.
    pub fn deactivate(&mut self) {
        if self.poses.take().is_some() {
            debug!("Free-fly camera deactivated");
        }
    }

    /// Runs one frame: host requests, input accumulation, smoothing, and the
    /// write-back to `transform`.
    pub fn update(
        &mut self,
        input: &FrameInput,
        transform: &mut impl CameraTransform,
        host: &mut impl CameraHost,
    ) {
        if !self.enabled {
            if self.is_active() {
                self.deactivate();
                host.set_cursor_mode(CursorMode::Free);
            }
            return;
        }

        if input.quit_pressed {
            info!("Quit requested from camera controls");
            host.request_quit();
        }
        if input.look_pressed {
            host.set_cursor_mode(CursorMode::Captured);
        }
        if input.look_released {
            host.set_cursor_mode(CursorMode::Free);
        }

        if !self.is_active() {
            self.activate(&*transform);
        }
        let rotation = self.rotation_delta(input);
        let translation = self.translation_delta(input);
        let position_pct = lerp_fraction(self.settings.position_lerp_time, input.delta_seconds);
        let rotation_pct = lerp_fraction(self.settings.rotation_lerp_time, input.delta_seconds);

        let Some(poses) = self.poses.as_mut() else {
            return;
        };
        if let Some(rotation) = rotation {
            poses.target.yaw += rotation.x;
            poses.target.pitch += rotation.y;
        }
        poses.target.translate(translation);
        poses
            .current
            .lerp_towards(&poses.target, position_pct, rotation_pct);
        poses.current.apply_to(transform);
    }

    /// Yaw (x) and pitch (y) to add this frame, or `None` when the look mode
    /// says mouse motion should be ignored.
    fn rotation_delta(&self, input: &FrameInput) -> Option<Vec2> {
        let looking = match self.settings.look_mode {
            LookMode::ClickToPan => input.look_held,
            LookMode::AlwaysPan => input.look_axis != Vec2::ZERO,
        };
        if !looking || !input.look_axis.is_finite() {
            return None;
        }

        // Axis +Y is "mouse up", which must lower the pitch (look up) unless
        // the Y axis is inverted.
        let y_sign = if self.settings.invert_y { 1.0 } else { -1.0 };
        let movement = Vec2::new(input.look_axis.x, input.look_axis.y * y_sign);
        let factor = self.settings.sensitivity.evaluate(movement.length());
        Some(movement * factor)
    }

    /// Local-space translation for this frame. Updates the boost from the
    /// wheel as a side effect.
    fn translation_delta(&mut self, input: &FrameInput) -> Vec3 {
        let mut translation = input.direction * input.delta_seconds;
        if input.fast_move {
            translation *= FAST_MOVE_MULTIPLIER;
        }

        if input.scroll != 0.0 {
            self.boost += input.scroll * BOOST_PER_SCROLL;
            debug!(boost = self.boost, "Translation boost changed");
        }
        translation * 2.0_f32.powf(self.boost)
    }

    /// One-line readout of the current pose for on-screen display. Empty
    /// while inactive.
    #[must_use]
    pub fn readout(&self) -> String {
        let mut text = String::new();
        if let Some(pose) = self.current() {
            let _ = write!(
                text,
                "Pos: ({:.2}, {:.2}, {:.2})  Rot: yaw={:.1} pitch={:.1} roll={:.1}  Boost: {:.1}",
                pose.x, pose.y, pose.z, pose.yaw, pose.pitch, pose.roll, self.boost,
            );
        }
        text
    }
}

impl Default for CameraMotionController {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}
