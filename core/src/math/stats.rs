pub struct StatsHelper;

impl StatsHelper {
    pub fn mean(samples: &[usize]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum: usize = samples.iter().sum();
        sum as f64 / samples.len() as f64
    }

    /// Insertion points of `value` in an ascending slice: `(#{< value}, #{<= value})`.
    pub fn insertion_points(sorted: &[usize], value: usize) -> (usize, usize) {
        let left = sorted.partition_point(|&v| v < value);
        let right = sorted.partition_point(|&v| v <= value);
        (left, right)
    }

    /// Upper-tail probability of `value` using the midpoint rank, so ties split
    /// credit between the two insertion points. `None` for an empty slice.
    pub fn midpoint_upper_tail(sorted: &[usize], value: usize) -> Option<f64> {
        if sorted.is_empty() {
            return None;
        }
        let (left, right) = Self::insertion_points(sorted, value);
        let rank = 0.5 * (left as f64 + right as f64);
        Some(1.0 - rank / sorted.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(StatsHelper::mean(&[]), 0.0);
        assert_eq!(StatsHelper::mean(&[2, 4]), 3.0);
    }

    #[test]
    fn insertion_points_bracket_ties() {
        let sorted = [0, 0, 1, 1, 1, 2, 3, 3, 5];
        assert_eq!(StatsHelper::insertion_points(&sorted, 1), (2, 5));
        assert_eq!(StatsHelper::insertion_points(&sorted, 4), (8, 8));
        assert_eq!(StatsHelper::insertion_points(&sorted, 9), (9, 9));
        assert_eq!(StatsHelper::insertion_points(&sorted, 0), (0, 2));
    }

    #[test]
    fn midpoint_upper_tail_handles_empty() {
        assert!(StatsHelper::midpoint_upper_tail(&[], 3).is_none());
        assert_eq!(StatsHelper::midpoint_upper_tail(&[7], 7), Some(0.5));
    }
}
