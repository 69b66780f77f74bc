//! Median combination of sub-model outputs.

/// Median of `values`.
///
/// Odd counts take the middle element of the sorted values; even counts
/// average the two middle elements. Returns `None` for an empty slice.
/// Ordering uses `f64::total_cmp`, so NaN inputs sort last instead of
/// poisoning the sort.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_none() {
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn single_value() {
        assert_eq!(median(&[3.5]), Some(3.5));
    }

    #[test]
    fn odd_count_takes_middle() {
        assert_eq!(median(&[9.0, 1.0, 5.0, 3.0, 7.0]), Some(5.0));
    }

    #[test]
    fn nine_values_takes_fifth_smallest() {
        let values = [0.9, 0.1, 0.8, 0.2, 0.7, 0.3, 0.6, 0.4, 0.5];
        assert_eq!(median(&values), Some(0.5));
    }

    #[test]
    fn even_count_averages_middle_pair() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn one_outlier_does_not_move_median() {
        let base = [1.0, 1.1, 1.2, 1.3, 1.4];
        let with_outlier = [1.0, 1.1, 1.2, 1.3, 100.0];
        assert_eq!(median(&base), median(&with_outlier));
    }

    #[test]
    fn input_order_is_untouched() {
        let values = [3.0, 1.0, 2.0];
        let _ = median(&values);
        assert_eq!(values, [3.0, 1.0, 2.0]);
    }
}
