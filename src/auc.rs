use serde::{Deserialize, Serialize};

use crate::metric_error::MetricError;

/// A receiver operating characteristic curve, with one point per distinct score.
///
/// The first point is always `(0, 0)` at a threshold of `+inf`, and the last is always `(1, 1)`.
/// Samples with tied scores are crossed in a single step, so a tie between a positive and a negative sample is credited as half a correct ranking.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct RocCurve {
    fpr: Vec<f64>,
    tpr: Vec<f64>,
    thresholds: Vec<f64>,
}

impl RocCurve {
    /// false positive rates, in increasing order
    pub fn false_positive_rates(&self) -> &[f64] {
        &self.fpr
    }

    /// true positive rates, in increasing order
    pub fn true_positive_rates(&self) -> &[f64] {
        &self.tpr
    }

    /// the score thresholds at which each point of the curve is reached, in decreasing order
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// the area under the curve, computed with the trapezoidal rule
    pub fn area(&self) -> f64 {
        self.fpr
            .windows(2)
            .zip(self.tpr.windows(2))
            .map(|(x, y)| (x[1] - x[0]) * (y[1] + y[0]) / 2.0)
            .sum()
    }
}

/// Build the ROC curve for binary `labels` (0 or 1) and the matching predicted `scores`.
///
/// # Errors
/// Returns a [`MetricError`] if...
/// * `labels` and `scores` differ in length
/// * `labels` is empty
/// * any label is not 0 or 1
/// * any score is NaN or infinite
/// * all labels belong to the same class
pub fn roc_curve(labels: &[f64], scores: &[f64]) -> Result<RocCurve, MetricError> {
    let positives = count_positives(labels, scores)?;
    let negatives = labels.len() - positives;

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_unstable_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut fpr = vec![0.0];
    let mut tpr = vec![0.0];
    let mut thresholds = vec![f64::INFINITY];
    let mut true_positives = 0usize;
    let mut false_positives = 0usize;
    for (position, &index) in order.iter().enumerate() {
        if labels[index] == 1.0 {
            true_positives += 1;
        } else {
            false_positives += 1;
        }
        // only emit a point once every sample sharing this score has been counted
        let closes_group = order
            .get(position + 1)
            .map_or(true, |&next| scores[next] != scores[index]);
        if closes_group {
            fpr.push(false_positives as f64 / negatives as f64);
            tpr.push(true_positives as f64 / positives as f64);
            thresholds.push(scores[index]);
        }
    }

    Ok(RocCurve {
        fpr,
        tpr,
        thresholds,
    })
}

/// Calculate the area under the ROC curve: the probability that a randomly chosen positive sample is scored above a randomly chosen negative sample.
///
/// The result only depends on the ordering of the scores, so it is unchanged by any strictly increasing transform of them.
///
/// # Errors
/// See [`roc_curve`].
///
/// # Example
/// ```
/// use epoch_auc::auc::roc_auc;
///
/// let labels = [0.0, 0.0, 1.0, 1.0];
/// let scores = [0.1, 0.4, 0.35, 0.8];
/// assert_eq!(roc_auc(&labels, &scores)?, 0.75);
/// # Ok::<(), epoch_auc::metric_error::MetricError>(())
/// ```
pub fn roc_auc(labels: &[f64], scores: &[f64]) -> Result<f64, MetricError> {
    Ok(roc_curve(labels, scores)?.area())
}

/// check the inputs and return the number of positive labels
fn count_positives(labels: &[f64], scores: &[f64]) -> Result<usize, MetricError> {
    if labels.len() != scores.len() {
        return Err(MetricError::ShapeMismatch {
            scores: scores.len(),
            labels: labels.len(),
        });
    }
    if labels.is_empty() {
        return Err(MetricError::EmptyValidationSet);
    }
    let mut positives = 0;
    for (index, &value) in labels.iter().enumerate() {
        if value == 1.0 {
            positives += 1;
        } else if value != 0.0 {
            return Err(MetricError::NonBinaryLabel { index, value });
        }
    }
    if let Some((index, &value)) = scores.iter().enumerate().find(|(_, s)| !s.is_finite()) {
        return Err(MetricError::NonFiniteScore { index, value });
    }
    if positives == 0 {
        return Err(MetricError::InsufficientClassVariance { class: 0.0 });
    }
    if positives == labels.len() {
        return Err(MetricError::InsufficientClassVariance { class: 1.0 });
    }
    Ok(positives)
}
