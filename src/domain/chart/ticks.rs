//! Axis label thinning.

/// How many labels to skip between rendered ones for `point_count` points.
///
/// The renderer draws every `interval + 1`-th label, so `0` means "label every point".
pub fn tick_interval(point_count: usize) -> usize {
    match point_count {
        0..=5 => 0,
        6..=10 => 1,
        11..=20 => point_count / 10,
        21..=50 => point_count / 8,
        _ => point_count / 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_interval_bands() {
        assert_eq!(tick_interval(0), 0);
        assert_eq!(tick_interval(3), 0);
        assert_eq!(tick_interval(5), 0);
        assert_eq!(tick_interval(6), 1);
        assert_eq!(tick_interval(10), 1);
        assert_eq!(tick_interval(15), 1);
        assert_eq!(tick_interval(20), 2);
        assert_eq!(tick_interval(35), 4);
        assert_eq!(tick_interval(50), 6);
        assert_eq!(tick_interval(51), 8);
        assert_eq!(tick_interval(120), 20);
    }
}
