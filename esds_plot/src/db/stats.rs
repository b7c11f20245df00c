use serde::{Deserialize, Serialize};

/// Mean and population standard deviation of a series of values.
///
/// An empty series yields `NaN` for both, the same as reducing an empty
/// array; callers can check for it with `Stats::has_data`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub mean: f64,
    pub std: f64,
}

impl Stats {
    pub fn from(values: &[f64]) -> Self {
        let count = values.len() as f64;
        let mean = values.iter().sum::<f64>() / count;
        let variance = values
            .iter()
            .map(|x| {
                let diff = x - mean;
                diff * diff
            })
            .sum::<f64>()
            / count;
        Self {
            mean,
            std: variance.sqrt(),
        }
    }

    pub fn has_data(&self) -> bool {
        !self.mean.is_nan()
    }

    /// Divides both mean and standard deviation by `unit`.
    pub fn scale(&self, unit: f64) -> Self {
        Self {
            mean: self.mean / unit,
            std: self.std / unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn mean_and_std() {
        let stats = Stats::from(&[1000.0, 2000.0]);
        assert_eq!(stats.mean, 1500.0);
        assert_eq!(stats.std, 500.0);

        let stats = Stats::from(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.std, 2.0);

        let stats = Stats::from(&[42.0]);
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.std, 0.0);
        assert!(stats.has_data());
    }

    #[test]
    fn empty() {
        let stats = Stats::from(&[]);
        assert!(stats.mean.is_nan());
        assert!(stats.std.is_nan());
        assert!(!stats.has_data());
        assert!(!stats.scale(1000.0).has_data());
    }

    #[test]
    fn scale() {
        let stats = Stats::from(&[1000.0, 2000.0]).scale(1000.0);
        assert_eq!(stats.mean, 1.5);
        assert_eq!(stats.std, 0.5);
    }

    #[quickcheck]
    fn constant_series_has_no_deviation(value: u32, count: u8) -> bool {
        let count = count as usize + 1;
        let values = vec![value as f64; count];
        let stats = Stats::from(&values);
        stats.mean == value as f64 && stats.std == 0.0
    }

    #[quickcheck]
    fn mean_within_bounds(values: Vec<u32>) -> bool {
        if values.is_empty() {
            return true;
        }
        let values: Vec<_> = values.into_iter().map(|v| v as f64).collect();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let stats = Stats::from(&values);
        // allow for rounding when summing
        let eps = 1e-6 * max.max(1.0);
        stats.mean >= min - eps
            && stats.mean <= max + eps
            && stats.std >= 0.0
            && stats.std <= (max - min) + eps
    }
}
