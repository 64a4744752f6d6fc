//! Grouped data given as a discrete (value, frequency) table.
//!
//! Only moment-based statistics are produced. Position-based ones such as
//! the median or quartiles would need the expanded multiset and are not
//! offered for grouped data.

use serde::Serialize;

use crate::StatsError;

/// One row of a frequency table with its weighted terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyRowSummary {
    /// The value, or the class midpoint for grouped data.
    pub x: f64,
    /// How many times `x` occurs.
    pub f: u64,
    /// `f * x`.
    pub fx: f64,
    /// `f * x²`.
    pub fx2: f64,
}

/// Frequency-weighted mean and variance, with the sums they were built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyMoments {
    /// Per-row terms, in table order.
    pub rows: Vec<FrequencyRowSummary>,
    /// Σf, the total number of observations.
    ///
    /// Kept as `u128` so any table of `i64` frequencies sums without overflow.
    pub sum_f: u128,
    /// Σfx.
    pub sum_fx: f64,
    /// Σfx².
    pub sum_fx2: f64,
    /// `Σfx / Σf`, or `0` when Σf is zero.
    pub mean: f64,
    /// `Σfx² / Σf - mean²`, or `0` when Σf is zero.
    pub variance: f64,
    /// The square root of `variance`.
    pub std_dev: f64,
}

impl FrequencyMoments {
    /// Folds `(x, f)` pairs into Σf, Σfx and Σfx².
    ///
    /// A table whose frequencies are all zero has mean and variance `0`.
    #[expect(clippy::cast_precision_loss)]
    pub(crate) fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (f64, u64)>,
    {
        let rows = rows
            .into_iter()
            .map(|(x, f)| FrequencyRowSummary {
                x,
                f,
                fx: x * f as f64,
                fx2: x * x * f as f64,
            })
            .collect::<Vec<_>>();
        let sum_f = rows.iter().map(|r| u128::from(r.f)).sum::<u128>();
        let sum_fx = rows.iter().map(|r| r.fx).sum::<f64>();
        let sum_fx2 = rows.iter().map(|r| r.fx2).sum::<f64>();

        let (mean, variance) = if sum_f == 0 {
            (0.0, 0.0)
        } else {
            let n = sum_f as f64;
            let mean = sum_fx / n;
            // rounding can push E[x²] − E[x]² slightly below zero
            (mean, (sum_fx2 / n - mean * mean).max(0.0))
        };
        tracing::trace!(sum_f, sum_fx, sum_fx2, "frequency moments");

        Self {
            rows,
            sum_f,
            sum_fx,
            sum_fx2,
            mean,
            variance,
            std_dev: variance.sqrt(),
        }
    }
}

/// Checks the shape shared by every frequency table and returns the
/// frequencies as unsigned counts.
pub(crate) fn validate_table<T>(keys: &[T], frequencies: &[i64]) -> Result<Vec<u64>, StatsError> {
    if keys.len() != frequencies.len() {
        return Err(StatsError::ListsNotSameSize {
            left: keys.len(),
            right: frequencies.len(),
        });
    }
    if keys.is_empty() {
        return Err(StatsError::EmptyDataSet);
    }
    frequencies
        .iter()
        .enumerate()
        .map(|(index, &frequency)| {
            u64::try_from(frequency)
                .map_err(|_| StatsError::InvalidFrequency { index, frequency })
        })
        .collect()
}

/// Mean, variance and standard deviation of a discrete frequency table.
///
/// # Examples
///
/// ```
/// use tutorstat_stats::frequency::DiscreteFrequencyStatistics;
///
/// let moments = DiscreteFrequencyStatistics::new(vec![1.0, 2.0, 3.0], vec![1, 2, 1])
///     .unwrap()
///     .run();
/// assert_eq!(moments.mean, 2.0);
/// assert_eq!(moments.variance, 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct DiscreteFrequencyStatistics {
    values: Vec<f64>,
    frequencies: Vec<u64>,
}

impl DiscreteFrequencyStatistics {
    /// Validates a `(value, frequency)` table given as two parallel lists.
    ///
    /// # Arguments
    ///
    /// * `values` - The distinct values (x)
    /// * `frequencies` - How often each value occurs (f)
    ///
    /// # Returns
    ///
    /// * `Err(StatsError::ListsNotSameSize)` - if the lists differ in length
    /// * `Err(StatsError::EmptyDataSet)` - if both lists are empty
    /// * `Err(StatsError::InvalidFrequency)` - if any frequency is negative
    ///
    /// # Examples
    ///
    /// ```
    /// use tutorstat_stats::{StatsError, frequency::DiscreteFrequencyStatistics};
    ///
    /// assert!(DiscreteFrequencyStatistics::new(vec![1.0, 2.0], vec![3, 0]).is_ok());
    /// assert_eq!(
    ///     DiscreteFrequencyStatistics::new(vec![1.0, 2.0], vec![3, -1]).unwrap_err(),
    ///     StatsError::InvalidFrequency { index: 1, frequency: -1 }
    /// );
    /// ```
    pub fn new(values: Vec<f64>, frequencies: Vec<i64>) -> Result<Self, StatsError> {
        let frequencies = validate_table(&values, &frequencies)?;
        Ok(Self {
            values,
            frequencies,
        })
    }

    /// Like [`DiscreteFrequencyStatistics::new`], reporting an absent list
    /// as [`StatsError::NullInput`].
    pub fn from_optional(
        values: Option<Vec<f64>>,
        frequencies: Option<Vec<i64>>,
    ) -> Result<Self, StatsError> {
        let values = values.ok_or(StatsError::NullInput { name: "values" })?;
        let frequencies = frequencies.ok_or(StatsError::NullInput {
            name: "frequencies",
        })?;
        Self::new(values, frequencies)
    }

    /// Computes the frequency-weighted moments.
    #[must_use]
    pub fn run(self) -> FrequencyMoments {
        tracing::debug!(
            rows = self.values.len(),
            "computing discrete table statistics"
        );
        FrequencyMoments::from_rows(self.values.into_iter().zip(self.frequencies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::assert_close;

    #[test]
    fn test_textbook_table() {
        let moments = DiscreteFrequencyStatistics::new(
            vec![0.0, 1.0, 2.0, 3.0, 4.0],
            vec![1, 9, 12, 5, 3],
        )
        .unwrap()
        .run();
        assert_eq!(moments.sum_f, 30);
        assert_eq!(moments.sum_fx, 60.0);
        assert_eq!(moments.sum_fx2, 150.0);
        assert_eq!(moments.mean, 2.0);
        assert_eq!(moments.variance, 1.0);
        assert_eq!(moments.std_dev, 1.0);
    }

    #[test]
    fn test_row_summaries() {
        let moments = DiscreteFrequencyStatistics::new(vec![2.0, 5.0], vec![3, 0])
            .unwrap()
            .run();
        assert_eq!(
            moments.rows,
            vec![
                FrequencyRowSummary {
                    x: 2.0,
                    f: 3,
                    fx: 6.0,
                    fx2: 12.0,
                },
                FrequencyRowSummary {
                    x: 5.0,
                    f: 0,
                    fx: 0.0,
                    fx2: 0.0,
                },
            ]
        );
        assert_eq!(moments.mean, 2.0);
        assert_eq!(moments.variance, 0.0);
    }

    #[test]
    fn test_unit_frequencies_match_raw_sample() {
        let values = vec![600.0, 470.0, 170.0, 430.0, 300.0];
        let moments = DiscreteFrequencyStatistics::new(values, vec![1; 5])
            .unwrap()
            .run();
        assert_eq!(moments.mean, 394.0);
        assert_close(moments.variance, 21704.0, 1e-6);
    }

    #[test]
    fn test_huge_frequencies_do_not_overflow() {
        let moments =
            DiscreteFrequencyStatistics::new(vec![1.0, 2.0, 3.0], vec![i64::MAX; 3])
                .unwrap()
                .run();
        assert_eq!(moments.sum_f, 3 * u128::from(i64::MAX.unsigned_abs()));
        assert_close(moments.mean, 2.0, 1e-12);
        assert_close(moments.variance, 2.0 / 3.0, 1e-9);
    }

    #[test]
    fn test_all_zero_frequencies() {
        let moments = DiscreteFrequencyStatistics::new(vec![1.0, 2.0], vec![0, 0])
            .unwrap()
            .run();
        assert_eq!(moments.sum_f, 0);
        assert_eq!(moments.mean, 0.0);
        assert_eq!(moments.variance, 0.0);
        assert_eq!(moments.std_dev, 0.0);
    }

    #[test]
    fn test_constant_value_has_zero_variance() {
        let moments = DiscreteFrequencyStatistics::new(vec![0.1, 0.1, 0.1], vec![7, 3, 11])
            .unwrap()
            .run();
        assert!(moments.variance >= 0.0);
        assert!(moments.variance < 1e-12);
    }

    #[test]
    fn test_validation_order() {
        assert_eq!(
            DiscreteFrequencyStatistics::from_optional(None, Some(vec![1])).unwrap_err(),
            StatsError::NullInput { name: "values" }
        );
        assert_eq!(
            DiscreteFrequencyStatistics::from_optional(Some(vec![1.0]), None).unwrap_err(),
            StatsError::NullInput {
                name: "frequencies"
            }
        );
        assert_eq!(
            DiscreteFrequencyStatistics::new(vec![1.0, 2.0], vec![-1]).unwrap_err(),
            StatsError::ListsNotSameSize { left: 2, right: 1 }
        );
        assert_eq!(
            DiscreteFrequencyStatistics::new(vec![], vec![]).unwrap_err(),
            StatsError::EmptyDataSet
        );
        assert_eq!(
            DiscreteFrequencyStatistics::new(vec![1.0, 2.0], vec![4, -2]).unwrap_err(),
            StatsError::InvalidFrequency {
                index: 1,
                frequency: -2,
            }
        );
    }
}
