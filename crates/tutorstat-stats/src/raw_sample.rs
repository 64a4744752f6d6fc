use serde::Serialize;

use crate::{
    StatsError,
    sequence::{self, MIN_QUARTILE_VALUES, Quartiles, Sample},
};

/// Central tendency and dispersion of a raw sample.
///
/// Variance is the population variance (divisor `n`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispersionResult {
    /// The number of observations.
    pub count: usize,
    /// The sum of all observations.
    pub sum: f64,
    /// The smallest observation.
    pub min: f64,
    /// The largest observation.
    pub max: f64,
    /// The arithmetic mean.
    pub mean: f64,
    /// The median; the average of the two central values for an even count.
    pub median: f64,
    /// Every value tied for the longest run of repeats; empty when nothing repeats.
    pub mode: Vec<f64>,
    /// `max - min`.
    pub range: f64,
    /// Q1, Q3 and IQR; `None` when the sample has fewer than four values.
    pub quartiles: Option<Quartiles>,
    /// The population variance (mean of squared deviations).
    pub variance: f64,
    /// The square root of `variance`.
    pub std_dev: f64,
}

/// Statistics over a flat list of observations.
///
/// # Examples
///
/// ```
/// use tutorstat_stats::raw_sample::RawSampleStatistics;
///
/// let stats = RawSampleStatistics::new(vec![600.0, 470.0, 170.0, 430.0, 300.0])
///     .unwrap()
///     .run()
///     .unwrap();
/// assert_eq!(stats.mean, 394.0);
/// assert_eq!(stats.variance, 21704.0);
/// ```
#[derive(Debug, Clone)]
pub struct RawSampleStatistics {
    sample: Sample,
}

impl RawSampleStatistics {
    /// Validates a sample for a later [`RawSampleStatistics::run`].
    ///
    /// # Arguments
    ///
    /// * `values` - The observations, in any order
    ///
    /// # Returns
    ///
    /// * `Err(StatsError::EmptyDataSet)` - if `values` is empty
    ///
    /// # Examples
    ///
    /// ```
    /// use tutorstat_stats::{StatsError, raw_sample::RawSampleStatistics};
    ///
    /// assert!(RawSampleStatistics::new(vec![2.0, 4.0]).is_ok());
    /// assert_eq!(
    ///     RawSampleStatistics::new(vec![]).unwrap_err(),
    ///     StatsError::EmptyDataSet
    /// );
    /// ```
    pub fn new(values: Vec<f64>) -> Result<Self, StatsError> {
        Ok(Self {
            sample: Sample::new(values)?,
        })
    }

    /// Like [`RawSampleStatistics::new`], reporting an absent list as
    /// [`StatsError::NullInput`].
    pub fn from_optional(values: Option<Vec<f64>>) -> Result<Self, StatsError> {
        Self::new(values.ok_or(StatsError::NullInput { name: "sample" })?)
    }

    /// The validated sample, in both insertion and ascending order.
    #[must_use]
    pub fn sample(&self) -> &Sample {
        &self.sample
    }

    /// Computes every statistic once and returns the immutable summary.
    ///
    /// NaN observations sort last and propagate into the moments.
    #[expect(clippy::cast_precision_loss)]
    pub fn run(self) -> Result<DispersionResult, StatsError> {
        let values = self.sample.original();
        let sorted = self.sample.sorted();
        tracing::debug!(count = values.len(), "computing raw sample statistics");

        let mean = sequence::mean(values)?;
        let variance =
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64;
        let quartiles = if values.len() >= MIN_QUARTILE_VALUES {
            Some(sequence::quartiles(sorted)?)
        } else {
            None
        };

        Ok(DispersionResult {
            count: values.len(),
            sum: values.iter().sum(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean,
            median: sequence::median(sorted)?,
            mode: sequence::mode(sorted)?,
            range: sequence::range(sorted)?,
            quartiles,
            variance,
            std_dev: variance.sqrt(),
        })
    }
}
