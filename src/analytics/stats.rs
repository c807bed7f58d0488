// src/analytics/stats.rs
// Order statistics over already-filtered score lists.

/// Sort ascending; scores are finite by construction.
pub fn sorted(mut v: Vec<f64>) -> Vec<f64> {
    v.sort_by(f64::total_cmp);
    v
}

/// Median of an ascending slice; even counts average the two middle values.
pub fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let mid = n / 2;
    if n % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// 100 × share of scores strictly below `score`. Ties do not count.
pub fn percentile_below(sorted: &[f64], score: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let below = sorted.partition_point(|&s| s < score);
    100.0 * below as f64 / sorted.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn even_median_averages_middle() {
        let v = sorted(vec![9.3, 9.5, 9.5, 9.0]);
        assert!(close(median(&v).unwrap(), 9.4));
        assert_eq!(median(&sorted(vec![8.0, 9.0, 7.0])), Some(8.0));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn ties_are_not_below() {
        let v = sorted(vec![8.5, 9.0, 9.0, 9.3]);
        assert!(close(percentile_below(&v, 9.0), 25.0));
        assert!(close(percentile_below(&v, 8.5), 0.0));
        assert!(close(percentile_below(&v, 9.9), 100.0));
    }

    #[test]
    fn mean_of_medians() {
        assert!(close(mean(&[9.0, 9.4]).unwrap(), 9.2));
        assert_eq!(mean(&[]), None);
    }
}
