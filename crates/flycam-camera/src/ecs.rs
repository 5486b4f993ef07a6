//! `bevy_ecs` integration: camera transform component, host request queue,
//! and the systems that drive [`CameraMotionController`]s.

use bevy_ecs::prelude::*;
use flycam_input::CursorMode;
use glam::{Quat, Vec3};

use crate::bindings::FrameInput;
use crate::controller::CameraMotionController;
use crate::host::{CameraHost, CameraTransform};
use crate::pose::EulerAngles;

/// World-space camera transform.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Orientation as a unit quaternion.
    pub rotation: Quat,
}

impl Transform {
    /// A transform at `position` oriented by `angles`.
    #[must_use]
    pub fn from_pose(position: Vec3, angles: EulerAngles) -> Self {
        Self {
            position,
            rotation: angles.to_quat(),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl CameraTransform for Transform {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn euler_angles(&self) -> EulerAngles {
        EulerAngles::from_quat(self.rotation)
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_euler_angles(&mut self, angles: EulerAngles) {
        self.rotation = angles.to_quat();
    }
}

/// Requests raised by controllers during a schedule run. The host drains it
/// after running the schedule.
#[derive(Resource, Debug, Default)]
pub struct HostRequests {
    cursor_mode: Option<CursorMode>,
    quit: bool,
}

impl HostRequests {
    /// The latest cursor mode requested since the last call, if any.
    pub fn take_cursor_mode(&mut self) -> Option<CursorMode> {
        self.cursor_mode.take()
    }

    /// Whether a quit was requested since the last call.
    pub fn take_quit(&mut self) -> bool {
        std::mem::take(&mut self.quit)
    }
}

impl CameraHost for HostRequests {
    fn set_cursor_mode(&mut self, mode: CursorMode) {
        self.cursor_mode = Some(mode);
    }

    fn request_quit(&mut self) {
        self.quit = true;
    }
}

/// Flip `enabled` on every controller when the toggle key is pressed.
pub fn camera_toggle_system(
    input: Res<FrameInput>,
    mut controllers: Query<&mut CameraMotionController>,
) {
    if !input.toggle_pressed {
        return;
    }
    for mut controller in &mut controllers {
        controller.enabled = !controller.enabled;
        tracing::info!(enabled = controller.enabled, "Free-fly camera toggled");
    }
}

/// Run one frame of every controller against its entity's [`Transform`].
pub fn camera_motion_system(
    input: Res<FrameInput>,
    mut host: ResMut<HostRequests>,
    mut cameras: Query<(&mut CameraMotionController, &mut Transform)>,
) {
    for (mut controller, mut transform) in &mut cameras {
        controller.update(&input, &mut *transform, &mut *host);
    }
}

/// Schedule running the toggle system, then the motion system.
///
/// The world needs [`FrameInput`] and [`HostRequests`] resources.
#[must_use]
pub fn build_camera_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((camera_toggle_system, camera_motion_system).chain());
    schedule
}
