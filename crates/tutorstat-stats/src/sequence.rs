//! Order-based primitives shared by every calculator.
//!
//! All functions take the values in any order and work on a sorted copy,
//! so the caller's slice is never reordered.

use serde::Serialize;

use crate::StatsError;

/// Minimum number of values [`quartiles`] accepts.
pub const MIN_QUARTILE_VALUES: usize = 4;

/// A non-empty sample keeping both its insertion order and an ascending view.
///
/// # Examples
///
/// ```
/// use tutorstat_stats::sequence::Sample;
///
/// let sample = Sample::new(vec![3.0, 1.0, 2.0]).unwrap();
/// assert_eq!(sample.original(), &[3.0, 1.0, 2.0]);
/// assert_eq!(sample.sorted(), &[1.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    original: Vec<f64>,
    sorted: Vec<f64>,
}

impl Sample {
    /// Builds a sample, failing with [`StatsError::EmptyDataSet`] on zero values.
    pub fn new(values: Vec<f64>) -> Result<Self, StatsError> {
        if values.is_empty() {
            return Err(StatsError::EmptyDataSet);
        }
        let sorted = sorted(&values);
        Ok(Self {
            original: values,
            sorted,
        })
    }

    /// Values in the order they were supplied.
    #[must_use]
    pub fn original(&self) -> &[f64] {
        &self.original
    }

    /// Values in ascending order.
    #[must_use]
    pub fn sorted(&self) -> &[f64] {
        &self.sorted
    }

    /// The number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.original.len()
    }

    /// Always `false`; a `Sample` cannot be built empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }
}

/// Lower quartile, upper quartile and their spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quartiles {
    /// The median of the lower half.
    pub q1: f64,
    /// The median of the upper half.
    pub q3: f64,
    /// The interquartile range, `q3 - q1`.
    pub iqr: f64,
}

/// Returns an ascending copy of `values`.
#[must_use]
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Arithmetic mean.
///
/// # Examples
///
/// ```
/// use tutorstat_stats::sequence::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), Ok(3.0));
/// assert!(mean(&[]).is_err());
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Middle value, or the average of the two central values for an even count.
///
/// # Examples
///
/// ```
/// use tutorstat_stats::sequence::median;
///
/// assert_eq!(median(&[3.0, 1.0, 2.0]), Ok(2.0));
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Ok(2.5));
/// ```
pub fn median(values: &[f64]) -> Result<f64, StatsError> {
    median_of_sorted(&sorted(values))
}

fn median_of_sorted(sorted_values: &[f64]) -> Result<f64, StatsError> {
    debug_assert!(sorted_values.is_sorted_by(|a, b| a.total_cmp(b).is_le()));
    let n = sorted_values.len();
    if n == 0 {
        return Err(StatsError::EmptyInput);
    }
    let mid = n / 2;
    if n % 2 == 1 {
        Ok(sorted_values[mid])
    } else {
        Ok(f64::midpoint(sorted_values[mid - 1], sorted_values[mid]))
    }
}

/// All values sharing the longest run of repeats, in ascending order.
///
/// A sample without any repeated value has no mode, so the result is empty.
/// That is distinct from having no data, which is an error.
///
/// # Examples
///
/// ```
/// use tutorstat_stats::sequence::mode;
///
/// assert_eq!(mode(&[1.0, 2.0, 2.0, 3.0, 3.0]), Ok(vec![2.0, 3.0]));
/// assert_eq!(mode(&[1.0, 2.0, 3.0]), Ok(vec![]));
/// ```
pub fn mode(values: &[f64]) -> Result<Vec<f64>, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let sorted_values = sorted(values);

    let mut runs: Vec<(f64, usize)> = Vec::new();
    for &value in &sorted_values {
        match runs.last_mut() {
            Some((last, count)) if *last == value => *count += 1,
            _ => runs.push((value, 1)),
        }
    }

    let longest = runs.iter().map(|&(_, count)| count).max().unwrap_or(0);
    if longest < 2 {
        return Ok(Vec::new());
    }
    Ok(runs
        .into_iter()
        .filter(|&(_, count)| count == longest)
        .map(|(value, _)| value)
        .collect())
}

/// Difference between the largest and the smallest value.
pub fn range(values: &[f64]) -> Result<f64, StatsError> {
    let sorted_values = sorted(values);
    match (sorted_values.first(), sorted_values.last()) {
        (Some(min), Some(max)) => Ok(max - min),
        _ => Err(StatsError::EmptyInput),
    }
}

/// Q1 and Q3 as medians of the lower and upper halves.
///
/// For an odd count the central element belongs to neither half.
///
/// # Examples
///
/// ```
/// use tutorstat_stats::sequence::quartiles;
///
/// let q = quartiles(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]).unwrap();
/// assert_eq!((q.q1, q.q3, q.iqr), (2.0, 6.0, 4.0));
/// ```
pub fn quartiles(values: &[f64]) -> Result<Quartiles, StatsError> {
    if values.len() < MIN_QUARTILE_VALUES {
        return Err(StatsError::InsufficientData {
            required: MIN_QUARTILE_VALUES,
            actual: values.len(),
        });
    }
    let sorted_values = sorted(values);
    let (lower, upper) = split_halves(&sorted_values);
    let q1 = median_of_sorted(lower)?;
    let q3 = median_of_sorted(upper)?;
    Ok(Quartiles {
        q1,
        q3,
        iqr: q3 - q1,
    })
}

fn split_halves(sorted_values: &[f64]) -> (&[f64], &[f64]) {
    let n = sorted_values.len();
    let mid = n / 2;
    if n % 2 == 0 {
        (&sorted_values[..mid], &sorted_values[mid..])
    } else {
        (&sorted_values[..mid], &sorted_values[mid + 1..])
    }
}
