//! One-sided two-sample Student's t-test.
//!
//! Equal-variance (pooled) test of the alternative hypothesis
//! `mean(a) > mean(b)`, with `n_a + n_b - 2` degrees of freedom.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use super::MetricsError;

/// Outcome of a t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TTestResult {
    pub t_statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: f64,
}

impl TTestResult {
    /// Whether the null hypothesis is rejected at level `alpha`.
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Sample mean; `None` for an empty sample.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sum of squared deviations from the mean.
fn sum_sq_dev(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|v| (v - mean).powi(2)).sum()
}

/// Test `mean(a) > mean(b)`.
pub fn t_test_greater(a: &[f64], b: &[f64]) -> Result<TTestResult, MetricsError> {
    let mean_a = mean(a).ok_or(MetricsError::EmptySample("first"))?;
    let mean_b = mean(b).ok_or(MetricsError::EmptySample("second"))?;

    let n_a = a.len() as f64;
    let n_b = b.len() as f64;
    let dof = n_a + n_b - 2.0;
    if dof < 1.0 {
        return Err(MetricsError::InsufficientDegreesOfFreedom {
            n_a: a.len(),
            n_b: b.len(),
        });
    }

    let pooled_var = (sum_sq_dev(a, mean_a) + sum_sq_dev(b, mean_b)) / dof;
    let std_err = (pooled_var * (1.0 / n_a + 1.0 / n_b)).sqrt();
    let diff = mean_a - mean_b;

    // Constant samples
    if std_err == 0.0 {
        let (t_statistic, p_value) = if diff > 0.0 {
            (f64::INFINITY, 0.0)
        } else if diff < 0.0 {
            (f64::NEG_INFINITY, 1.0)
        } else {
            (0.0, 1.0)
        };
        return Ok(TTestResult {
            t_statistic,
            p_value,
            degrees_of_freedom: dof,
        });
    }

    let t_statistic = diff / std_err;
    let dist = StudentsT::new(0.0, 1.0, dof)
        .map_err(|e| MetricsError::Distribution(e.to_string()))?;
    let p_value = (1.0 - dist.cdf(t_statistic)).clamp(0.0, 1.0);

    Ok(TTestResult {
        t_statistic,
        p_value,
        degrees_of_freedom: dof,
    })
}
