//! Six-scalar camera pose and the Euler angle convention used throughout.
//!
//! Angles are in degrees. Positive yaw turns right, positive pitch tilts the
//! nose down and roll spins about the view axis. The camera looks down its
//! local -Z with +X to the right and +Y up; orientation is applied as yaw
//! (about Y), then pitch (about X), then roll (about Z).

use glam::{EulerRot, Quat, Vec3};

use crate::host::CameraTransform;
use crate::smoothing::lerp;

/// Local forward axis.
pub const FORWARD: Vec3 = Vec3::NEG_Z;
/// Local right axis.
pub const RIGHT: Vec3 = Vec3::X;
/// Local up axis.
pub const UP: Vec3 = Vec3::Y;

/// Euler rotation in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EulerAngles {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl EulerAngles {
    #[must_use]
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Orientation quaternion for these angles.
    #[must_use]
    pub fn to_quat(self) -> Quat {
        // glam rotates counter-clockwise about +Y and +X, so yaw and pitch
        // are negated to get "right" and "down" for positive values.
        Quat::from_euler(
            EulerRot::YXZ,
            -self.yaw.to_radians(),
            -self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }

    /// Inverse of [`to_quat`](Self::to_quat). Yaw and roll come back in
    /// (-180, 180], pitch in [-90, 90].
    #[must_use]
    pub fn from_quat(rotation: Quat) -> Self {
        let (yaw, pitch, roll) = rotation.normalize().to_euler(EulerRot::YXZ);
        Self {
            pitch: -pitch.to_degrees(),
            yaw: -yaw.to_degrees(),
            roll: roll.to_degrees(),
        }
    }
}

/// A rigid camera pose: yaw, pitch, roll in degrees plus a position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraPose {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl CameraPose {
    /// Reads the pose currently held by `transform`.
    pub fn from_transform(transform: &impl CameraTransform) -> Self {
        let angles = transform.euler_angles();
        let position = transform.position();
        Self {
            yaw: angles.yaw,
            pitch: angles.pitch,
            roll: angles.roll,
            x: position.x,
            y: position.y,
            z: position.z,
        }
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    #[must_use]
    pub fn angles(&self) -> EulerAngles {
        EulerAngles::new(self.pitch, self.yaw, self.roll)
    }

    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.angles().to_quat()
    }

    /// Moves by `translation` expressed in the pose's own frame.
    pub fn translate(&mut self, translation: Vec3) {
        let world = self.rotation() * translation;
        self.x += world.x;
        self.y += world.y;
        self.z += world.z;
    }

    /// Moves each scalar toward `target`: angles by `rotation_pct`, position
    /// by `position_pct`. Angles are interpolated numerically, not along the
    /// shortest arc.
    pub fn lerp_towards(&mut self, target: &CameraPose, position_pct: f32, rotation_pct: f32) {
        self.yaw = lerp(self.yaw, target.yaw, rotation_pct);
        self.pitch = lerp(self.pitch, target.pitch, rotation_pct);
        self.roll = lerp(self.roll, target.roll, rotation_pct);

        self.x = lerp(self.x, target.x, position_pct);
        self.y = lerp(self.y, target.y, position_pct);
        self.z = lerp(self.z, target.z, position_pct);
    }

    /// Writes this pose to `transform`.
    pub fn apply_to(&self, transform: &mut impl CameraTransform) {
        transform.set_euler_angles(self.angles());
        transform.set_position(self.position());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_vec_near(actual: Vec3, expected: Vec3) {
        assert!(
            actual.abs_diff_eq(expected, EPS),
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_identity_looks_down_neg_z() {
        let pose = CameraPose::default();
        assert_vec_near(pose.rotation() * FORWARD, Vec3::NEG_Z);
        assert_vec_near(pose.rotation() * RIGHT, Vec3::X);
    }

    #[test]
    fn test_positive_yaw_turns_right() {
        let pose = CameraPose {
            yaw: 90.0,
            ..Default::default()
        };
        assert_vec_near(pose.rotation() * FORWARD, Vec3::X);
    }

    #[test]
    fn test_positive_pitch_tilts_down() {
        let pose = CameraPose {
            pitch: 30.0,
            ..Default::default()
        };
        let forward = pose.rotation() * FORWARD;
        assert!(forward.y < -0.49 && forward.y > -0.51, "forward = {forward:?}");
    }

    #[test]
    fn test_euler_quat_roundtrip() {
        let angles = EulerAngles::new(-35.0, 120.0, 10.0);
        let back = EulerAngles::from_quat(angles.to_quat());
        assert!((back.pitch - angles.pitch).abs() < 1e-3);
        assert!((back.yaw - angles.yaw).abs() < 1e-3);
        assert!((back.roll - angles.roll).abs() < 1e-3);
    }

    #[test]
    fn test_translate_is_relative_to_orientation() {
        let mut pose = CameraPose {
            yaw: -90.0,
            ..Default::default()
        };
        pose.translate(FORWARD * 2.0);
        assert_vec_near(pose.position(), Vec3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn test_lerp_towards_uses_separate_fractions() {
        let mut current = CameraPose::default();
        let target = CameraPose {
            yaw: 10.0,
            x: 10.0,
            ..Default::default()
        };
        current.lerp_towards(&target, 0.5, 0.0);
        assert!((current.x - 5.0).abs() < EPS);
        assert_eq!(current.yaw, 0.0);

        current.lerp_towards(&target, 0.0, 1.0);
        assert!((current.yaw - 10.0).abs() < EPS);
        assert!((current.x - 5.0).abs() < EPS);
    }
}
