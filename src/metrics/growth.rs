//! Period-over-period growth calculation.

/// Percentage change from `previous` to `current`.
///
/// A zero previous value yields 0.0 rather than a division by zero;
/// there is no meaningful baseline to compare against, so the change is
/// reported as "no signal" rather than infinite growth.
///
/// With `lower_is_better` set (average position), the sign is flipped
/// so a positive result always means the metric improved. Only the
/// change percentage carries this convention; stored metric values are
/// never sign-flipped.
pub fn percent_change(current: f64, previous: f64, lower_is_better: bool) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }

    if lower_is_better {
        ((previous - current) / previous) * 100.0
    } else {
        ((current - previous) / previous) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_and_decline() {
        assert_eq!(percent_change(120.0, 100.0, false), 20.0);
        assert_eq!(percent_change(80.0, 100.0, false), -20.0);
        assert_eq!(percent_change(100.0, 100.0, false), 0.0);
    }

    #[test]
    fn test_lower_is_better_inverts_sign() {
        // Position moved from 10 to 8: raw value dropped, ranking improved.
        assert_eq!(percent_change(8.0, 10.0, true), 20.0);
        // Position moved from 8 to 10: ranking got worse.
        assert_eq!(percent_change(10.0, 8.0, true), -25.0);
    }

    #[test]
    fn test_zero_previous_is_no_signal() {
        assert_eq!(percent_change(42.0, 0.0, false), 0.0);
        assert_eq!(percent_change(42.0, 0.0, true), 0.0);
        assert_eq!(percent_change(0.0, 0.0, false), 0.0);
    }

    #[test]
    fn test_sign_matches_direction() {
        for (current, previous) in [(1.0, 2.0), (2.0, 1.0), (0.5, 0.25), (3.0, 300.0)] {
            let plain = percent_change(current, previous, false);
            let inverted = percent_change(current, previous, true);
            assert_eq!(plain > 0.0, current > previous);
            assert_eq!(inverted > 0.0, current < previous);
        }
    }
}
