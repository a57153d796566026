/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Order statistics used for color scaling

use super::errors::{Result, UtilsError};

/// Percentile of a sample using linear interpolation between order statistics
///
/// The rank of the `q`-th percentile is `q/100 · (n - 1)` in the sorted
/// sample, interpolated between its neighbours. NaN values are rejected.
pub fn percentile(values: &[f64], q: f64) -> Result<f64> {
    if values.is_empty() {
        return Err(UtilsError::Math("percentile of an empty sample".to_string()));
    }
    if !(0.0..=100.0).contains(&q) {
        return Err(UtilsError::Math(format!("percentile {} outside [0, 100]", q)));
    }
    if values.iter().any(|v| v.is_nan()) {
        return Err(UtilsError::Math("percentile of a sample containing NaN".to_string()));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    Ok(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percentile_interpolates() {
        let values = [4.0, 1.0, 3.0, 2.0, 5.0];
        assert_relative_eq!(percentile(&values, 0.0).unwrap(), 1.0);
        assert_relative_eq!(percentile(&values, 50.0).unwrap(), 3.0);
        assert_relative_eq!(percentile(&values, 100.0).unwrap(), 5.0);
        // rank 0.05 * 4 = 0.2
        assert_relative_eq!(percentile(&values, 5.0).unwrap(), 1.2, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_errors() {
        assert!(percentile(&[], 50.0).is_err());
        assert!(percentile(&[1.0], 101.0).is_err());
        assert!(percentile(&[1.0, f64::NAN], 50.0).is_err());
    }
}
