use polars::prelude::{NamedFrom, Series};

/// Median of the durations that are present.
///
/// Returns [None] if there are no durations, or if every duration is absent.
pub(crate) fn median_duration(durations: &[Option<f64>]) -> Option<f64> {
    if durations.is_empty() {
        return None;
    }

    Series::new("duration_minutes".into(), durations).median()
}

/// Percentage of `passed` over `attempted`, `0.0` when nothing was attempted
pub(crate) fn success_rate(passed: usize, attempted: usize) -> f64 {
    if attempted == 0 {
        return 0.0;
    }

    passed as f64 / attempted as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_odd_count() {
        assert_eq!(Some(3.0), median_duration(&[Some(5.0), Some(1.0), Some(3.0)]));
    }

    #[test]
    fn median_of_even_count_is_midpoint() {
        assert_eq!(Some(3.0), median_duration(&[Some(2.0), Some(4.0)]));
        assert_eq!(
            Some(2.5),
            median_duration(&[Some(4.0), Some(1.0), Some(3.0), Some(2.0)])
        );
    }

    #[test]
    fn median_ignores_absent_durations() {
        assert_eq!(Some(2.0), median_duration(&[None, Some(2.0), None]));
    }

    #[test]
    fn median_of_nothing_is_absent() {
        assert_eq!(None, median_duration(&[]));
        assert_eq!(None, median_duration(&[None, None]));
    }

    #[test]
    fn success_rate_bounds() {
        assert_eq!(0.0, success_rate(0, 0));
        assert_eq!(0.0, success_rate(0, 4));
        assert_eq!(50.0, success_rate(1, 2));
        assert_eq!(100.0, success_rate(3, 3));
    }
}
