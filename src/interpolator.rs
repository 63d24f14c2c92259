/// Piecewise-linear interpolation over a table of (x, y) samples
///
/// Samples are sorted by x on construction. Lookups between two samples blend
/// linearly; lookups outside the table continue the slope of the nearest edge
/// segment instead of clamping, so out-of-domain queries never fail.

use crate::error::{EscapeError, EscapeResult};
use crate::math_utils::lerp;
use serde::{Deserialize, Serialize};

/// Serializes as its sample list; deserializing goes back through `new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterpolator {
    /// Builds an interpolator from unsorted samples.
    ///
    /// Needs at least two samples with distinct, finite x values.
    pub fn new(samples: &[(f64, f64)]) -> EscapeResult<Self> {
        if samples.len() < 2 {
            return Err(EscapeError::InvalidTable(format!(
                "need at least 2 samples, got {}",
                samples.len()
            )));
        }
        if let Some((x, y)) = samples.iter().find(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(EscapeError::InvalidTable(format!(
                "non-finite sample ({x}, {y})"
            )));
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        if let Some(pair) = sorted.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(EscapeError::InvalidTable(format!(
                "duplicate x value {}",
                pair[0].0
            )));
        }

        let (xs, ys) = sorted.into_iter().unzip();
        Ok(Self { xs, ys })
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let i = self.segment_index(x);
        // x values are distinct, so the segment width is never zero
        let ratio = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        lerp(self.ys[i], self.ys[i + 1], ratio)
    }

    /// Index of the segment used for `x`: the bracketing pair inside the
    /// table, or the first/last segment outside it.
    fn segment_index(&self, x: f64) -> usize {
        let last_segment = self.xs.len() - 2;
        // first index with xs[i] > x
        let upper = self.xs.partition_point(|&sample| sample <= x);
        upper.saturating_sub(1).min(last_segment)
    }

    pub fn x(&self) -> &[f64] {
        &self.xs
    }

    pub fn y(&self) -> &[f64] {
        &self.ys
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Number of samples, always at least 2.
    pub fn sample_count(&self) -> usize {
        self.xs.len()
    }
}

impl TryFrom<Vec<(f64, f64)>> for LinearInterpolator {
    type Error = EscapeError;

    fn try_from(samples: Vec<(f64, f64)>) -> EscapeResult<Self> {
        Self::new(&samples)
    }
}

impl From<LinearInterpolator> for Vec<(f64, f64)> {
    fn from(interpolator: LinearInterpolator) -> Self {
        interpolator.xs.into_iter().zip(interpolator.ys).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn three_point() -> LinearInterpolator {
        LinearInterpolator::new(&[(1.0, 10.0), (2.0, 20.0), (5.0, 50.0)]).unwrap()
    }

    #[test]
    fn test_reproduces_nodes() {
        let interp = three_point();
        assert_eq!(interp.evaluate(1.0), 10.0);
        assert_eq!(interp.evaluate(2.0), 20.0);
        assert_eq!(interp.evaluate(5.0), 50.0);
    }

    #[test]
    fn test_interpolates_between_nodes() {
        let interp = three_point();
        assert_relative_eq!(interp.evaluate(3.0), 30.0, epsilon = 1e-12);
        assert_relative_eq!(interp.evaluate(1.5), 15.0, epsilon = 1e-12);
    }

    #[test]
    fn test_extrapolates_with_edge_slope() {
        let interp = three_point();
        assert_relative_eq!(interp.evaluate(6.0), 60.0, epsilon = 1e-12);
        assert_relative_eq!(interp.evaluate(0.0), 0.0, epsilon = 1e-12);

        let bent = LinearInterpolator::new(&[(0.0, 0.0), (1.0, 1.0), (2.0, 3.0)]).unwrap();
        // low edge slope 1, high edge slope 2
        assert_relative_eq!(bent.evaluate(-1.0), -1.0, epsilon = 1e-12);
        assert_relative_eq!(bent.evaluate(4.0), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sorts_unsorted_input() {
        let interp = LinearInterpolator::new(&[(5.0, 50.0), (1.0, 10.0), (2.0, 20.0)]).unwrap();
        assert_eq!(interp.x(), &[1.0, 2.0, 5.0]);
        assert_eq!(interp.y(), &[10.0, 20.0, 50.0]);
        assert_eq!(interp.domain(), (1.0, 5.0));
        assert_relative_eq!(interp.evaluate(3.0), 30.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert!(LinearInterpolator::new(&[]).is_err());
        assert!(LinearInterpolator::new(&[(1.0, 1.0)]).is_err());
        assert!(LinearInterpolator::new(&[(1.0, 1.0), (1.0, 2.0)]).is_err());
        assert!(LinearInterpolator::new(&[(1.0, 1.0), (f64::NAN, 2.0)]).is_err());
    }

    #[test]
    fn test_tiny_spacing_still_interpolates() {
        // masses in grams sit near 1e-24, far below f64::EPSILON
        let interp = LinearInterpolator::new(&[(1e-20, 0.0), (2e-20, 1.0)]).unwrap();
        assert_relative_eq!(interp.evaluate(1.5e-20), 0.5, epsilon = 1e-12);
        assert_relative_eq!(interp.evaluate(3e-20), 2.0, epsilon = 1e-12);

        let grams = LinearInterpolator::new(&[(1.67e-24, 1.2), (6.68e-24, 1.4)]).unwrap();
        assert_relative_eq!(grams.evaluate(4.175e-24), 1.3, epsilon = 1e-12);
    }

    #[test]
    fn test_json_round_trip_goes_through_validation() {
        let interp = three_point();
        let json = serde_json::to_string(&interp).unwrap();
        assert_eq!(json, "[[1.0,10.0],[2.0,20.0],[5.0,50.0]]");
        let restored: LinearInterpolator = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, interp);
        assert_eq!(restored.sample_count(), 3);

        let unsorted: LinearInterpolator = serde_json::from_str("[[2.0, 4.0], [1.0, 2.0]]").unwrap();
        assert_eq!(unsorted.x(), &[1.0, 2.0]);
    }

    #[test]
    fn test_json_rejects_invalid_tables() {
        assert!(serde_json::from_str::<LinearInterpolator>("[]").is_err());
        assert!(serde_json::from_str::<LinearInterpolator>("[[1.0, 1.0]]").is_err());
        assert!(serde_json::from_str::<LinearInterpolator>("[[1.0, 1.0], [1.0, 2.0]]").is_err());
        // only the sample-list form deserializes
        assert!(serde_json::from_str::<LinearInterpolator>(r#"{"xs":[1,2,3],"ys":[1]}"#).is_err());
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let interp = three_point();
        let first = interp.evaluate(3.7);
        for _ in 0..10 {
            assert_eq!(interp.evaluate(3.7), first);
        }
    }
}
