//! Bounce vs non-bounce statistics.
//!
//! - Points-per-game for each group
//! - One-sided two-sample t-test on the per-match points

pub mod ppg;
pub mod significance;

use thiserror::Error;

pub use ppg::{Leader, PointsSamples, PpgComparison, Verdict, DEFAULT_ALPHA};
pub use significance::{mean, t_test_greater, TTestResult};

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("The {0} sample is empty")]
    EmptySample(&'static str),

    #[error("Samples of {n_a} and {n_b} observations leave no degrees of freedom")]
    InsufficientDegreesOfFreedom { n_a: usize, n_b: usize },

    #[error("Distribution error: {0}")]
    Distribution(String),
}
