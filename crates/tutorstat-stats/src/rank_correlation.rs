//! Spearman's rank correlation with tie-averaged ranks.

use serde::Serialize;

use crate::StatsError;

/// A score together with the rank it received within its own sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedPair {
    /// The score as supplied.
    pub score: f64,
    /// Rank 1 is the highest score; ties share their average rank.
    pub rank: f64,
}

/// Qualitative reading of a Spearman coefficient.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display, derive_more::IsVariant,
)]
pub enum CorrelationLabel {
    #[display("perfect positive correlation")]
    PerfectPositive,
    #[display("strong positive correlation")]
    StrongPositive,
    #[display("moderate positive correlation")]
    ModeratePositive,
    #[display("weak positive correlation")]
    WeakPositive,
    #[display("very weak positive correlation")]
    VeryWeakPositive,
    #[display("no correlation")]
    NoCorrelation,
    #[display("very weak negative correlation")]
    VeryWeakNegative,
    #[display("weak negative correlation")]
    WeakNegative,
    #[display("moderate negative correlation")]
    ModerateNegative,
    #[display("strong negative correlation")]
    StrongNegative,
    #[display("perfect negative correlation")]
    PerfectNegative,
}

impl CorrelationLabel {
    /// Buckets a coefficient in `[-1, 1]` by magnitude and sign.
    ///
    /// # Examples
    ///
    /// ```
    /// use tutorstat_stats::rank_correlation::CorrelationLabel;
    ///
    /// assert_eq!(CorrelationLabel::from_coefficient(0.85), CorrelationLabel::StrongPositive);
    /// assert_eq!(CorrelationLabel::from_coefficient(-0.4), CorrelationLabel::WeakNegative);
    /// assert_eq!(CorrelationLabel::from_coefficient(0.0), CorrelationLabel::NoCorrelation);
    /// ```
    #[must_use]
    pub fn from_coefficient(rs: f64) -> Self {
        let magnitude = rs.abs();
        let positive = rs > 0.0;
        let pick = |pos, neg| if positive { pos } else { neg };
        if magnitude >= 1.0 {
            pick(Self::PerfectPositive, Self::PerfectNegative)
        } else if magnitude >= 0.8 {
            pick(Self::StrongPositive, Self::StrongNegative)
        } else if magnitude >= 0.6 {
            pick(Self::ModeratePositive, Self::ModerateNegative)
        } else if magnitude >= 0.4 {
            pick(Self::WeakPositive, Self::WeakNegative)
        } else if magnitude > 0.0 {
            pick(Self::VeryWeakPositive, Self::VeryWeakNegative)
        } else {
            Self::NoCorrelation
        }
    }
}

/// Everything produced by one correlation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    /// Scores and ranks of the first sample, in input order.
    pub first: Vec<RankedPair>,
    /// Scores and ranks of the second sample, in input order.
    pub second: Vec<RankedPair>,
    /// Signed `rank1 - rank2` per pair.
    pub differences: Vec<f64>,
    /// `d²` per pair.
    pub squared_differences: Vec<f64>,
    /// Σd².
    pub sum_squared_differences: f64,
    /// Always within `[-1, 1]`.
    pub coefficient: f64,
    /// Qualitative reading of `coefficient`.
    pub label: CorrelationLabel,
}

impl CorrelationResult {
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.first.len()
    }

    #[must_use]
    pub fn first_ranks(&self) -> Vec<f64> {
        self.first.iter().map(|p| p.rank).collect()
    }

    #[must_use]
    pub fn second_ranks(&self) -> Vec<f64> {
        self.second.iter().map(|p| p.rank).collect()
    }
}

/// Ranks scores from highest (rank 1) to lowest.
///
/// Tied scores share the mean of the positions they occupy, so `k` ties
/// starting at position `r` all receive `r + (k - 1) / 2` and the next
/// distinct score continues at `r + k`.
///
/// # Examples
///
/// ```
/// use tutorstat_stats::rank_correlation::rank_descending;
///
/// assert_eq!(rank_descending(&[70.0, 90.0, 80.0, 80.0]), vec![4.0, 1.0, 2.5, 2.5]);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn rank_descending(scores: &[f64]) -> Vec<f64> {
    let mut order = (0..scores.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut ranks = vec![0.0; scores.len()];
    let mut start = 0;
    while start < order.len() {
        let value = scores[order[start]];
        let tied = order[start..]
            .iter()
            .take_while(|&&i| scores[i] == value)
            .count()
            // NaN never equals itself
            .max(1);
        let average = (start + 1) as f64 + (tied - 1) as f64 / 2.0;
        for &i in &order[start..start + tied] {
            ranks[i] = average;
        }
        start += tied;
    }
    ranks
}

/// Spearman's coefficient between two paired score lists.
///
/// The engine does not impose a minimum number of pairs; with fewer than
/// two pairs the coefficient is `0`.
///
/// # Examples
///
/// ```
/// use tutorstat_stats::rank_correlation::{CorrelationLabel, RankCorrelationEngine};
///
/// let result = RankCorrelationEngine::new(
///     vec![10.0, 20.0, 30.0, 40.0, 50.0],
///     vec![5.0, 4.0, 3.0, 2.0, 1.0],
/// )
/// .unwrap()
/// .run();
/// assert_eq!(result.sum_squared_differences, 40.0);
/// assert_eq!(result.coefficient, -1.0);
/// assert_eq!(result.label, CorrelationLabel::PerfectNegative);
/// ```
#[derive(Debug, Clone)]
pub struct RankCorrelationEngine {
    first: Vec<f64>,
    second: Vec<f64>,
}

impl RankCorrelationEngine {
    /// Pairs two score lists for a later [`RankCorrelationEngine::run`].
    ///
    /// # Returns
    ///
    /// * `Err(StatsError::ListsNotSameSize)` - if the lists differ in length
    ///
    /// # Examples
    ///
    /// ```
    /// use tutorstat_stats::{StatsError, rank_correlation::RankCorrelationEngine};
    ///
    /// assert_eq!(
    ///     RankCorrelationEngine::new(vec![1.0, 2.0], vec![1.0]).unwrap_err(),
    ///     StatsError::ListsNotSameSize { left: 2, right: 1 }
    /// );
    /// ```
    pub fn new(first: Vec<f64>, second: Vec<f64>) -> Result<Self, StatsError> {
        if first.len() != second.len() {
            return Err(StatsError::ListsNotSameSize {
                left: first.len(),
                right: second.len(),
            });
        }
        Ok(Self { first, second })
    }

    /// Like [`RankCorrelationEngine::new`], reporting an absent list as
    /// [`StatsError::NullInput`].
    pub fn from_optional(
        first: Option<Vec<f64>>,
        second: Option<Vec<f64>>,
    ) -> Result<Self, StatsError> {
        let first = first.ok_or(StatsError::NullInput { name: "first" })?;
        let second = second.ok_or(StatsError::NullInput { name: "second" })?;
        Self::new(first, second)
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.first.len()
    }

    /// Ranks both samples and computes Spearman's coefficient.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn run(self) -> CorrelationResult {
        let n = self.first.len();
        tracing::debug!(pairs = n, "computing spearman rank correlation");

        let first = ranked(&self.first);
        let second = ranked(&self.second);
        tracing::trace!(
            first_ranks = ?first.iter().map(|p| p.rank).collect::<Vec<_>>(),
            second_ranks = ?second.iter().map(|p| p.rank).collect::<Vec<_>>(),
            "assigned ranks"
        );
        let differences = first
            .iter()
            .zip(&second)
            .map(|(a, b)| a.rank - b.rank)
            .collect::<Vec<_>>();
        let squared_differences = differences.iter().map(|d| d * d).collect::<Vec<_>>();
        let sum_squared_differences = squared_differences.iter().sum::<f64>();

        let n = n as f64;
        let denominator = n * (n * n - 1.0);
        let coefficient = if denominator == 0.0 {
            0.0
        } else {
            (1.0 - 6.0 * sum_squared_differences / denominator).clamp(-1.0, 1.0)
        };
        tracing::trace!(sum_squared_differences, coefficient, "spearman coefficient");

        CorrelationResult {
            first,
            second,
            differences,
            squared_differences,
            sum_squared_differences,
            coefficient,
            label: CorrelationLabel::from_coefficient(coefficient),
        }
    }
}

fn ranked(scores: &[f64]) -> Vec<RankedPair> {
    scores
        .iter()
        .zip(rank_descending(scores))
        .map(|(&score, rank)| RankedPair { score, rank })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _, seq::SliceRandom as _};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::test_util::assert_close;

    fn spearman(first: &[f64], second: &[f64]) -> CorrelationResult {
        RankCorrelationEngine::new(first.to_vec(), second.to_vec())
            .unwrap()
            .run()
    }

    #[test]
    fn test_perfect_positive() {
        let result = spearman(&[10.0, 20.0, 30.0, 40.0, 50.0], &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(result.first_ranks(), vec![5.0, 4.0, 3.0, 2.0, 1.0]);
        assert_eq!(result.second_ranks(), vec![5.0, 4.0, 3.0, 2.0, 1.0]);
        assert_eq!(result.sum_squared_differences, 0.0);
        assert_eq!(result.coefficient, 1.0);
        assert_eq!(result.label, CorrelationLabel::PerfectPositive);
    }

    #[test]
    fn test_perfect_negative_keeps_signed_differences() {
        let result = spearman(&[10.0, 20.0, 30.0, 40.0, 50.0], &[5.0, 4.0, 3.0, 2.0, 1.0]);
        assert_eq!(result.differences, vec![4.0, 2.0, 0.0, -2.0, -4.0]);
        assert_eq!(result.squared_differences, vec![16.0, 4.0, 0.0, 4.0, 16.0]);
        assert_eq!(result.sum_squared_differences, 40.0);
        assert_eq!(result.coefficient, -1.0);
        assert_eq!(result.label, CorrelationLabel::PerfectNegative);
        assert_eq!(result.pair_count(), 5);
    }

    #[test]
    fn test_tied_ranks() {
        // two ties for 2nd place share 2.5, next rank is 4
        assert_eq!(
            rank_descending(&[9.0, 7.0, 7.0, 3.0]),
            vec![1.0, 2.5, 2.5, 4.0]
        );
        // three ties starting at 1: 1 + (3 - 1) / 2
        assert_eq!(rank_descending(&[5.0, 5.0, 5.0, 1.0]), vec![2.0, 2.0, 2.0, 4.0]);
        assert_eq!(rank_descending(&[]), Vec::<f64>::new());
    }

    #[test]
    fn test_textbook_with_ties() {
        let result = spearman(
            &[56.0, 75.0, 45.0, 71.0, 61.0, 64.0, 58.0, 80.0, 76.0, 61.0],
            &[66.0, 70.0, 40.0, 60.0, 65.0, 56.0, 59.0, 77.0, 67.0, 63.0],
        );
        assert_eq!(
            result.first_ranks(),
            vec![9.0, 3.0, 10.0, 4.0, 6.5, 5.0, 8.0, 1.0, 2.0, 6.5]
        );
        assert_eq!(
            result.second_ranks(),
            vec![4.0, 2.0, 10.0, 7.0, 5.0, 9.0, 8.0, 1.0, 3.0, 6.0]
        );
        assert_eq!(result.sum_squared_differences, 54.5);
        assert_close(result.coefficient, 1.0 - 6.0 * 54.5 / 990.0, 1e-12);
        assert_eq!(result.label, CorrelationLabel::ModeratePositive);
    }

    #[test]
    fn test_fewer_than_two_pairs() {
        let result = spearman(&[3.0], &[8.0]);
        assert_eq!(result.coefficient, 0.0);
        assert_eq!(result.label, CorrelationLabel::NoCorrelation);

        let result = spearman(&[], &[]);
        assert_eq!(result.coefficient, 0.0);
        assert_eq!(result.pair_count(), 0);
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            RankCorrelationEngine::new(vec![1.0, 2.0], vec![1.0]).unwrap_err(),
            StatsError::ListsNotSameSize { left: 2, right: 1 }
        );
        assert_eq!(
            RankCorrelationEngine::from_optional(Some(vec![1.0]), None).unwrap_err(),
            StatsError::NullInput { name: "second" }
        );
    }

    #[test]
    fn test_labels() {
        use CorrelationLabel::*;
        let cases = [
            (1.0, PerfectPositive),
            (0.8, StrongPositive),
            (0.79, ModeratePositive),
            (0.6, ModeratePositive),
            (0.5, WeakPositive),
            (0.39, VeryWeakPositive),
            (0.0, NoCorrelation),
            (-0.1, VeryWeakNegative),
            (-0.45, WeakNegative),
            (-0.7, ModerateNegative),
            (-0.95, StrongNegative),
            (-1.0, PerfectNegative),
        ];
        for (rs, expected) in cases {
            assert_eq!(CorrelationLabel::from_coefficient(rs), expected, "rs = {rs}");
        }
        assert_eq!(StrongNegative.to_string(), "strong negative correlation");
    }

    #[test]
    fn test_tie_free_rank_sum() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        for n in 1..60_u32 {
            let mut scores = (0..n).map(f64::from).collect::<Vec<_>>();
            scores.shuffle(&mut rng);
            let ranks = rank_descending(&scores);
            let expected = f64::from(n * (n + 1) / 2);
            assert_eq!(ranks.iter().sum::<f64>(), expected);

            let mut sorted = ranks.clone();
            sorted.sort_by(f64::total_cmp);
            assert_eq!(sorted, (1..=n).map(f64::from).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_invariant_under_monotonic_transform() {
        let mut rng = Pcg64Mcg::seed_from_u64(11);
        for _ in 0..100 {
            let n = rng.random_range(2..30);
            // small integer range so ties show up
            let first = (0..n)
                .map(|_| f64::from(rng.random_range(0..10_i32)))
                .collect::<Vec<_>>();
            let second = (0..n)
                .map(|_| f64::from(rng.random_range(0..10_i32)))
                .collect::<Vec<_>>();
            let transform = |x: &f64| x.powi(3) + 2.0 * x - 5.0;
            let moved_first = first.iter().map(transform).collect::<Vec<_>>();
            let moved_second = second.iter().map(transform).collect::<Vec<_>>();

            let base = spearman(&first, &second);
            let moved = spearman(&moved_first, &moved_second);
            assert_eq!(base.coefficient, moved.coefficient);
            assert!((-1.0..=1.0).contains(&base.coefficient));
        }
    }
}
