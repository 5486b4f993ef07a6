//! Mouse sensitivity response curve.
//!
//! A piecewise cubic Hermite spline through [`CurveKey`]s. Between two keys
//! the slope leaving the left key is its `out_tangent` and the slope entering
//! the right key is its `in_tangent`. Outside the key range the curve holds
//! the end values.

use flycam_config::CurveKey;

/// Rejected curve definitions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    #[error("sensitivity curve has no keys")]
    Empty,
    #[error("sensitivity curve key {index} has a non-finite component")]
    NonFinite { index: usize },
}

/// Maps mouse movement magnitude to a rotation multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct SensitivityCurve {
    keys: Vec<CurveKey>,
}

impl SensitivityCurve {
    /// Builds a curve from keys in any order.
    pub fn new(keys: &[CurveKey]) -> Result<Self, CurveError> {
        if keys.is_empty() {
            return Err(CurveError::Empty);
        }
        if let Some(index) = keys.iter().position(|k| {
            ![k.time, k.value, k.in_tangent, k.out_tangent]
                .iter()
                .all(|v| v.is_finite())
        }) {
            return Err(CurveError::NonFinite { index });
        }

        let mut keys = keys.to_vec();
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self { keys })
    }

    /// Keys sorted by time.
    #[must_use]
    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Value of the curve at `time`. NaN evaluates to the first key's value.
    #[must_use]
    pub fn evaluate(&self, time: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 1.0,
        };
        if time.is_nan() || time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        // Finite with first.time < time < last.time, so both neighbours
        // exist and the segment has a positive width.
        let right = self.keys.partition_point(|k| k.time <= time);
        let k0 = &self.keys[right - 1];
        let k1 = &self.keys[right];
        let width = k1.time - k0.time;
        let t = (time - k0.time) / width;

        let t2 = t * t;
        let t3 = t2 * t;
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        h00 * k0.value
            + h10 * k0.out_tangent * width
            + h01 * k1.value
            + h11 * k1.in_tangent * width
    }
}

impl Default for SensitivityCurve {
    /// Ramps from 0.5 at rest to 2.5 for a full-axis flick, rising steeply
    /// at first and flattening out at the top.
    fn default() -> Self {
        Self {
            keys: vec![
                CurveKey::new(0.0, 0.5, 0.0, 5.0),
                CurveKey::new(1.0, 2.5, 0.0, 0.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_default_curve_hits_its_keys() {
        let curve = SensitivityCurve::default();
        assert!((curve.evaluate(0.0) - 0.5).abs() < EPS);
        assert!((curve.evaluate(1.0) - 2.5).abs() < EPS);
    }

    #[test]
    fn test_default_curve_midpoint() {
        // t^3 - 4t^2 + 5t + 0.5 at t = 0.5
        let curve = SensitivityCurve::default();
        assert!((curve.evaluate(0.5) - 2.125).abs() < EPS);
    }

    #[test]
    fn test_default_curve_is_monotonic() {
        let curve = SensitivityCurve::default();
        let mut previous = curve.evaluate(0.0);
        for i in 1..=100 {
            let value = curve.evaluate(i as f32 / 100.0);
            assert!(value >= previous - EPS, "dropped at {i}: {value} < {previous}");
            previous = value;
        }
    }

    #[test]
    fn test_clamps_outside_key_range() {
        let curve = SensitivityCurve::default();
        assert!((curve.evaluate(-3.0) - 0.5).abs() < EPS);
        assert!((curve.evaluate(40.0) - 2.5).abs() < EPS);
    }

    #[test]
    fn test_flat_tangents_between_keys_stay_in_range() {
        let curve = SensitivityCurve::new(&[
            CurveKey::new(2.0, 4.0, 0.0, 0.0),
            CurveKey::new(0.0, 1.0, 0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(curve.keys()[0].time, 0.0);
        let mid = curve.evaluate(1.0);
        assert!((mid - 2.5).abs() < EPS);
    }

    #[test]
    fn test_single_key_is_constant() {
        let curve = SensitivityCurve::new(&[CurveKey::new(0.3, 1.7, 0.0, 0.0)]).unwrap();
        assert_eq!(curve.evaluate(0.0), 1.7);
        assert_eq!(curve.evaluate(5.0), 1.7);
    }

    #[test]
    fn test_rejects_empty_and_non_finite() {
        assert_eq!(SensitivityCurve::new(&[]), Err(CurveError::Empty));
        let err = SensitivityCurve::new(&[
            CurveKey::new(0.0, 1.0, 0.0, 0.0),
            CurveKey::new(1.0, f32::NAN, 0.0, 0.0),
        ])
        .unwrap_err();
        assert_eq!(err, CurveError::NonFinite { index: 1 });
    }

    #[test]
    fn test_non_finite_time_holds_end_values() {
        let curve = SensitivityCurve::default();
        assert_eq!(curve.evaluate(f32::NAN), 0.5);
        assert_eq!(curve.evaluate(f32::INFINITY), 2.5);
        assert_eq!(curve.evaluate(f32::NEG_INFINITY), 0.5);
    }
}
