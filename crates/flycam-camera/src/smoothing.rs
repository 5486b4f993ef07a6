//! Frame-rate independent exponential smoothing.
//!
//! A value chasing a fixed target with [`lerp_fraction`] covers 99% of the
//! distance in `lerp_time` seconds no matter how that time is sliced into
//! frames: the per-frame remainders multiply to `exp(ln(0.01) / T * sum(dt))`.

/// Fraction of the distance covered after `lerp_time` seconds.
pub const COMPLETION: f32 = 0.99;

/// Per-frame interpolation weight for a frame of `delta_seconds`.
///
/// `lerp_time` must be positive; callers clamp it through
/// [`CameraSettings`](crate::CameraSettings). Returns 0 for a zero-length
/// frame and approaches 1 for very long ones.
#[must_use]
pub fn lerp_fraction(lerp_time: f32, delta_seconds: f32) -> f32 {
    1.0 - ((1.0 - COMPLETION).ln() / lerp_time * delta_seconds).exp()
}

/// Linear interpolation with `t` clamped to `[0, 1]`.
#[must_use]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}
