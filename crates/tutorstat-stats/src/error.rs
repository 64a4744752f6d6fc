/// Validation failures reported by the statistics engine.
///
/// Every variant describes bad caller input. None of them is transient, so
/// repeating a failed computation with the same input fails the same way.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum StatsError {
    /// A required sequence was not supplied at all.
    #[display("required input `{name}` is missing")]
    NullInput { name: &'static str },
    /// A sequence primitive was given no values.
    #[display("cannot compute a statistic over an empty sequence")]
    EmptyInput,
    /// A calculator was constructed over zero rows.
    #[display("data set is empty")]
    EmptyDataSet,
    /// Paired sequences have different lengths.
    #[display("lists are not the same size ({left} vs {right})")]
    ListsNotSameSize { left: usize, right: usize },
    /// A frequency is negative.
    #[display("frequency at row {index} is negative ({frequency})")]
    InvalidFrequency { index: usize, frequency: i64 },
    /// A class interval label is not of the form `lower-upper`.
    #[display("invalid class interval format: {label:?} (expected \"lower-upper\")")]
    InvalidClassIntervalFormat { label: String },
    /// Too few values for an order statistic.
    #[display("at least {required} values are required, got {actual}")]
    InsufficientData { required: usize, actual: usize },
}
