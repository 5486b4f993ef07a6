//! What the controller needs from the application hosting it.

use flycam_input::CursorMode;
use glam::Vec3;

use crate::pose::EulerAngles;

/// The host-owned transform the camera renders from.
pub trait CameraTransform {
    fn position(&self) -> Vec3;
    fn euler_angles(&self) -> EulerAngles;
    fn set_position(&mut self, position: Vec3);
    fn set_euler_angles(&mut self, angles: EulerAngles);
}

/// Side effects the controller asks the host to perform.
pub trait CameraHost {
    /// Capture (lock + hide) or free (unlock + show) the cursor.
    fn set_cursor_mode(&mut self, mode: CursorMode);
    /// End the session.
    fn request_quit(&mut self);
}
