//! Shared numeric helpers for the control and process stages.

/// Move `current` toward `target` by at most `limit` per call, in either
/// direction. `limit` is treated as an absolute magnitude.
#[inline]
pub fn ramp_toward(current: f64, target: f64, limit: f64) -> f64 {
    let limit = limit.abs();
    current + (target - current).clamp(-limit, limit)
}

/// Replace a non-finite value (NaN/±Inf) with `fallback`.
#[inline]
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::{finite_or, ramp_toward};

    #[test]
    fn ramp_limits_both_directions() {
        assert_eq!(ramp_toward(100.0, 200.0, 18.0), 118.0);
        assert_eq!(ramp_toward(100.0, 0.0, 18.0), 82.0);
        // Within the limit: lands on target exactly
        assert_eq!(ramp_toward(100.0, 110.0, 18.0), 110.0);
        assert_eq!(ramp_toward(100.0, 95.0, 18.0), 95.0);
    }

    #[test]
    fn ramp_handles_negative_limit_magnitude() {
        assert_eq!(ramp_toward(10.0, 30.0, -5.0), 15.0);
    }

    #[test]
    fn finite_or_passes_finite_and_replaces_invalid() {
        assert_eq!(finite_or(1.5, 0.0), 1.5);
        assert_eq!(finite_or(f64::NAN, 7.0), 7.0);
        assert_eq!(finite_or(f64::INFINITY, 7.0), 7.0);
        assert_eq!(finite_or(f64::NEG_INFINITY, 7.0), 7.0);
    }
}
