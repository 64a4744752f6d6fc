//! Statistics engine for the tutorstat toolkit.
//!
//! This crate computes central tendency and dispersion over three data
//! representations, and Spearman's rank correlation:
//!
//! - **Sequence primitives**: mean, median, mode, range and quartiles
//! - **Raw samples**: full dispersion summary of a flat list of values
//! - **Discrete tables**: frequency-weighted moments of `(value, frequency)` rows
//! - **Continuous tables**: the same moments for `"lower-upper"` class intervals
//! - **Rank correlation**: tie-averaged ranks and Spearman's coefficient
//!
//! Every calculator is built from its complete input, validates it up front,
//! and produces an immutable result from a single `run` call.
//!
//! # Modules
//!
//! - [`sequence`]: Order-based primitives shared by the calculators
//! - [`raw_sample`]: Statistics over a flat sample
//! - [`frequency`]: Discrete frequency tables
//! - [`continuous`]: Grouped class-interval tables
//! - [`rank_correlation`]: Spearman's rank correlation
//!
//! # Examples
//!
//! ## Describing a sample
//!
//! ```
//! use tutorstat_stats::raw_sample::RawSampleStatistics;
//!
//! let stats = RawSampleStatistics::new(vec![1.0, 2.0, 3.0, 4.0, 5.0])?.run()?;
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.variance, 2.0);
//! # Ok::<(), tutorstat_stats::StatsError>(())
//! ```
//!
//! ## Grouped data
//!
//! ```
//! use tutorstat_stats::continuous::ContinuousFrequencyStatistics;
//!
//! let labels = ["10-20", "20-30", "30-50", "50-90"].map(String::from).to_vec();
//! let result = ContinuousFrequencyStatistics::new(labels, vec![9, 11, 13, 7])?.run()?;
//! assert_eq!(result.moments.mean, 35.5);
//! # Ok::<(), tutorstat_stats::StatsError>(())
//! ```
//!
//! ## Rank correlation
//!
//! ```
//! use tutorstat_stats::rank_correlation::{CorrelationLabel, RankCorrelationEngine};
//!
//! let result = RankCorrelationEngine::new(
//!     vec![10.0, 20.0, 30.0, 40.0, 50.0],
//!     vec![1.0, 2.0, 3.0, 4.0, 5.0],
//! )?
//! .run();
//! assert_eq!(result.coefficient, 1.0);
//! assert_eq!(result.label, CorrelationLabel::PerfectPositive);
//! # Ok::<(), tutorstat_stats::StatsError>(())
//! ```

pub use self::error::StatsError;

pub mod continuous;
mod error;
pub mod frequency;
pub mod rank_correlation;
pub mod raw_sample;
pub mod sequence;

#[cfg(test)]
mod test_util {
    /// Asserts that `actual` is within `tolerance` of `expected`.
    #[track_caller]
    pub(crate) fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }
}
