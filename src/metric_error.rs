/// Indicates that the AUC could not be computed for a set of labels and scores.
///
/// None of these errors are fatal to training. The [`AucObserver`](crate::auc_observer::AucObserver) hands them to its
/// [`MetricSink`](crate::metric_sink::MetricSink) as a skipped epoch and lets the training loop carry on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricError {
    /// Every label belongs to the same class, so there is no positive/negative pair to rank and the AUC is undefined
    InsufficientClassVariance {
        /// The only class present in the labels
        class: f64,
    },
    /// The predictor returned a different number of scores than there are labels
    ShapeMismatch {
        /// The number of scores received
        scores: usize,
        /// The number of labels received
        labels: usize,
    },
    /// No labels were provided
    EmptyValidationSet,
    /// A label was something other than 0 or 1
    NonBinaryLabel {
        /// position of the offending label
        index: usize,
        /// the offending label
        value: f64,
    },
    /// A score was NaN or infinite
    NonFiniteScore {
        /// position of the offending score
        index: usize,
        /// the offending score
        value: f64,
    },
}

impl std::fmt::Display for MetricError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MetricError::InsufficientClassVariance { class } => write!(
                f,
                "validation labels contain only class {}, AUC is undefined",
                class
            ),
            MetricError::ShapeMismatch { scores, labels } => write!(
                f,
                "received {} scores for {} labels",
                scores, labels
            ),
            MetricError::EmptyValidationSet => write!(f, "validation set is empty"),
            MetricError::NonBinaryLabel { index, value } => write!(
                f,
                "label {} at index {} is not binary (expected 0 or 1)",
                value, index
            ),
            MetricError::NonFiniteScore { index, value } => {
                write!(f, "score {} at index {} is not finite", value, index)
            }
        }
    }
}

impl std::error::Error for MetricError {}
