//! Grouped data given as class intervals such as `"10-20"`.
//!
//! Each class is represented by its midpoint; after that the table is
//! treated exactly like a discrete frequency table.

use std::str::FromStr;

use serde::Serialize;

use crate::{
    StatsError,
    frequency::{FrequencyMoments, validate_table},
};

/// A parsed `lower-upper` class label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassInterval {
    /// The lower class bound.
    pub lower: f64,
    /// The upper class bound.
    pub upper: f64,
}

impl ClassInterval {
    /// Parses a label of the form `<number>-<number>`.
    ///
    /// Whitespace around either bound is ignored, and bounds may be negative:
    /// the label is split at the first hyphen that leaves a number on both
    /// sides.
    ///
    /// # Examples
    ///
    /// ```
    /// use tutorstat_stats::continuous::ClassInterval;
    ///
    /// let interval = ClassInterval::parse("30-50").unwrap();
    /// assert_eq!(interval.midpoint(), 40.0);
    ///
    /// let interval = ClassInterval::parse("-10--5").unwrap();
    /// assert_eq!((interval.lower, interval.upper), (-10.0, -5.0));
    ///
    /// assert!(ClassInterval::parse("30 to 50").is_err());
    /// ```
    pub fn parse(label: &str) -> Result<Self, StatsError> {
        label
            .match_indices('-')
            .filter(|&(pos, _)| pos > 0)
            .find_map(|(pos, _)| {
                let lower = parse_bound(&label[..pos])?;
                let upper = parse_bound(&label[pos + 1..])?;
                Some(Self { lower, upper })
            })
            .ok_or_else(|| StatsError::InvalidClassIntervalFormat {
                label: label.to_owned(),
            })
    }

    /// The class mark used in place of every observation in the class.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        f64::midpoint(self.lower, self.upper)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl FromStr for ClassInterval {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_bound(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Moments of a continuous table together with the classes they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinuousMoments {
    /// The parsed classes, in table order.
    pub intervals: Vec<ClassInterval>,
    /// Moments computed over the class midpoints.
    #[serde(flatten)]
    pub moments: FrequencyMoments,
}

/// Mean, variance and standard deviation of a grouped (interval) table.
///
/// Labels are only parsed by [`ContinuousFrequencyStatistics::run`]; the
/// constructor checks the table shape and frequencies.
///
/// # Examples
///
/// ```
/// use tutorstat_stats::continuous::ContinuousFrequencyStatistics;
///
/// let result = ContinuousFrequencyStatistics::new(
///     vec!["0-10".to_owned(), "10-20".to_owned()],
///     vec![1, 1],
/// )
/// .unwrap()
/// .run()
/// .unwrap();
/// assert_eq!(result.moments.mean, 10.0);
/// assert_eq!(result.moments.variance, 25.0);
/// ```
#[derive(Debug, Clone)]
pub struct ContinuousFrequencyStatistics {
    labels: Vec<String>,
    frequencies: Vec<u64>,
}

impl ContinuousFrequencyStatistics {
    /// Validates the table shape and frequencies; labels are parsed later.
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
    /// use tutorstat_stats::continuous::ContinuousFrequencyStatistics;
    ///
    /// // accepted here, rejected by `run`
    /// let calc = ContinuousFrequencyStatistics::new(vec!["ten-20".to_owned()], vec![1]).unwrap();
    /// assert!(calc.run().is_err());
    /// ```
    pub fn new(labels: Vec<String>, frequencies: Vec<i64>) -> Result<Self, StatsError> {
        let frequencies = validate_table(&labels, &frequencies)?;
        Ok(Self {
            labels,
            frequencies,
        })
    }

    /// Like [`ContinuousFrequencyStatistics::new`], reporting an absent list
    /// as [`StatsError::NullInput`].
    pub fn from_optional(
        labels: Option<Vec<String>>,
        frequencies: Option<Vec<i64>>,
    ) -> Result<Self, StatsError> {
        let labels = labels.ok_or(StatsError::NullInput { name: "intervals" })?;
        let frequencies = frequencies.ok_or(StatsError::NullInput {
            name: "frequencies",
        })?;
        Self::new(labels, frequencies)
    }

    /// Parses every class label, then computes the moments over midpoints.
    ///
    /// Fails with [`StatsError::InvalidClassIntervalFormat`] on the first
    /// label that is not `lower-upper`.
    pub fn run(self) -> Result<ContinuousMoments, StatsError> {
        tracing::debug!(
            rows = self.labels.len(),
            "computing continuous table statistics"
        );
        let intervals = self
            .labels
            .iter()
            .map(|label| ClassInterval::parse(label))
            .collect::<Result<Vec<_>, _>>()?;
        let moments = FrequencyMoments::from_rows(
            intervals
                .iter()
                .map(ClassInterval::midpoint)
                .zip(self.frequencies),
        );
        Ok(ContinuousMoments { intervals, moments })
    }
}
