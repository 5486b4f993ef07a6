//! Validated controller tunables built from [`CameraConfig`].

use std::ops::RangeInclusive;

use flycam_config::{CameraConfig, LookMode};
use tracing::warn;

use crate::bindings::CameraBindings;
use crate::curve::{CurveError, SensitivityCurve};

/// Accepted smoothing times in seconds. Zero would make the smoothing
/// exponent singular.
pub const LERP_TIME_RANGE: RangeInclusive<f32> = 0.001..=1.0;

/// Rejected camera configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("mouse_axis_scale must be finite and positive, got {0}")]
    MouseAxisScale(f32),
    #[error("boost must be finite, got {0}")]
    Boost(f32),
    #[error(transparent)]
    Curve(#[from] CurveError),
}

/// Everything the controller needs to turn input into motion.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    /// Translation boost exponent the controller starts from.
    pub boost: f32,
    pub position_lerp_time: f32,
    pub rotation_lerp_time: f32,
    pub invert_y: bool,
    pub look_mode: LookMode,
    pub mouse_axis_scale: f32,
    pub bindings: CameraBindings,
    pub sensitivity: SensitivityCurve,
}

impl CameraSettings {
    /// Validates `config`. Out-of-range smoothing times are clamped with a
    /// warning; an unusable boost, axis scale or sensitivity curve is an error.
    pub fn from_config(config: &CameraConfig) -> Result<Self, SettingsError> {
        if !config.boost.is_finite() {
            return Err(SettingsError::Boost(config.boost));
        }
        // NaN fails the comparison too.
        if !(config.mouse_axis_scale.is_finite() && config.mouse_axis_scale > 0.0) {
            return Err(SettingsError::MouseAxisScale(config.mouse_axis_scale));
        }
        Ok(Self {
            boost: config.boost,
            position_lerp_time: clamp_lerp_time("position_lerp_time", config.position_lerp_time),
            rotation_lerp_time: clamp_lerp_time("rotation_lerp_time", config.rotation_lerp_time),
            invert_y: config.invert_y,
            look_mode: config.look_mode,
            mouse_axis_scale: config.mouse_axis_scale,
            bindings: CameraBindings::for_scheme(config.control_scheme),
            sensitivity: SensitivityCurve::new(&config.sensitivity_curve)?,
        })
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        let config = CameraConfig::default();
        Self {
            boost: config.boost,
            position_lerp_time: config.position_lerp_time,
            rotation_lerp_time: config.rotation_lerp_time,
            invert_y: config.invert_y,
            look_mode: config.look_mode,
            mouse_axis_scale: config.mouse_axis_scale,
            bindings: CameraBindings::for_scheme(config.control_scheme),
            sensitivity: SensitivityCurve::default(),
        }
    }
}

fn clamp_lerp_time(name: &str, value: f32) -> f32 {
    let (min, max) = (*LERP_TIME_RANGE.start(), *LERP_TIME_RANGE.end());
    // NaN fails `contains` and is replaced by the upper bound.
    if LERP_TIME_RANGE.contains(&value) {
        return value;
    }
    let clamped = if value.is_nan() { max } else { value.clamp(min, max) };
    warn!("{name} {value} outside [{min}, {max}], using {clamped}");
    clamped
}
