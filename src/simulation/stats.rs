// src/simulation/stats.rs

use serde::Serialize;

/// Distribution summary of a sequence of total-cost samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostSummary {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub percentile_10: f64,
    pub percentile_25: f64,
    pub percentile_50: f64, // Median
    pub percentile_75: f64,
    pub percentile_90: f64,
}

impl CostSummary {
    /// Summarizes `samples`. An empty slice yields an all-zero summary.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;

        // Nearest-rank on the sorted samples
        let percentile = |p: f64| {
            let index = ((p / 100.0) * (n - 1.0)).round() as usize;
            sorted[index.min(sorted.len() - 1)]
        };

        Self {
            count: sorted.len(),
            mean,
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            percentile_10: percentile(10.0),
            percentile_25: percentile(25.0),
            percentile_50: percentile(50.0),
            percentile_75: percentile(75.0),
            percentile_90: percentile(90.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_known_samples() {
        let s = CostSummary::from_samples(&[4.0, 2.0, 8.0, 6.0, 10.0]);
        assert_eq!(s.count, 5);
        assert_eq!(s.mean, 6.0);
        assert!((s.std_dev - 8.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 10.0);
        assert_eq!(s.percentile_50, 6.0);
    }

    #[test]
    fn test_constant_samples_have_zero_spread() {
        let s = CostSummary::from_samples(&[3.5; 200]);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.percentile_10, 3.5);
        assert_eq!(s.percentile_90, 3.5);
    }

    #[test]
    fn test_empty_samples() {
        assert_eq!(CostSummary::from_samples(&[]), CostSummary::default());
    }
}
