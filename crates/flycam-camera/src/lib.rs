//! Smoothed free-fly camera controller.
//!
//! Input accumulates into a target pose; the rendered pose chases it with
//! frame-rate independent exponential smoothing. The host supplies a
//! [`FrameInput`] and a [`CameraTransform`] each frame and receives cursor and
//! quit requests through [`CameraHost`]. The [`ecs`] module wires all of it
//! into a `bevy_ecs` schedule.

pub mod bindings;
pub mod controller;
pub mod curve;
pub mod ecs;
pub mod host;
pub mod pose;
pub mod settings;
pub mod smoothing;

pub use bindings::{CameraBindings, FrameInput};
pub use controller::{BOOST_PER_SCROLL, CameraMotionController, FAST_MOVE_MULTIPLIER};
pub use curve::{CurveError, SensitivityCurve};
pub use ecs::{
    HostRequests, Transform, build_camera_schedule, camera_motion_system, camera_toggle_system,
};
pub use host::{CameraHost, CameraTransform};
pub use pose::{CameraPose, EulerAngles};
pub use settings::{CameraSettings, LERP_TIME_RANGE, SettingsError};
pub use smoothing::{lerp, lerp_fraction};
