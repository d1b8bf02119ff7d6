//! Small numeric helpers shared by the core and the history layer

/// Round `value` to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike `f64::clamp` this never panics; a reversed range is normalized first.
pub fn clamp_to(value: f64, min: f64, max: f64) -> f64 {
    let (lo, hi) = if min > max { (max, min) } else { (min, max) };
    value.max(lo).min(hi)
}

/// Arithmetic mean, or `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding() {
        assert_eq!(round_to(12.345_6, 2), 12.35);
        assert_eq!(round_to(-1.25, 1), -1.3);
        assert_eq!(round_to(7.0, 2), 7.0);
    }

    #[test]
    fn clamping_handles_reversed_range() {
        assert_eq!(clamp_to(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp_to(5.0, 10.0, 1.0), 5.0);
        assert_eq!(clamp_to(-3.0, 10.0, 1.0), 1.0);
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    }
}
