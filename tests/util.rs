#![allow(dead_code)]
use std::cell::RefCell;

use epoch_auc::{
    metric_error::MetricError,
    metric_sink::{EpochReport, MetricSink},
    Predictor, Sample, Trainable,
};
use rand::{thread_rng, Rng};

#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ModelError::DimensionMismatch { expected, actual } => write!(
                f,
                "expected {} features, received {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for ModelError {}

/// Plain logistic regression trained with per-sample gradient descent
pub struct LogisticModel {
    weights: Vec<f64>,
    bias: f64,
    learning_rate: f64,
}

impl LogisticModel {
    pub fn new(input_size: usize, learning_rate: f64) -> Self {
        LogisticModel {
            weights: vec![0.0; input_size],
            bias: 0.0,
            learning_rate,
        }
    }

    fn score(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.weights.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.weights.len(),
                actual: features.len(),
            });
        }
        let logit = self
            .weights
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;
        Ok(1.0 / (1.0 + (-logit).exp()))
    }
}

impl Predictor for LogisticModel {
    type Error = ModelError;

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>, Self::Error> {
        features.iter().map(|row| self.score(row)).collect()
    }
}

impl Trainable for LogisticModel {
    fn train_epoch(&mut self, data: &[Sample]) -> Result<f64, Self::Error> {
        let mut total_loss = 0.0;
        for sample in data {
            let p = self.score(sample.features())?;
            let y = sample.label();
            let clamped = p.clamp(1e-12, 1.0 - 1e-12);
            total_loss -= y * clamped.ln() + (1.0 - y) * (1.0 - clamped).ln();
            let gradient = p - y;
            for (w, x) in self.weights.iter_mut().zip(sample.features()) {
                *w -= self.learning_rate * gradient * x;
            }
            self.bias -= self.learning_rate * gradient;
        }
        Ok(total_loss / data.len() as f64)
    }
}

/// Records everything an observer hands it
#[derive(Default)]
pub struct RecordingSink {
    pub reports: RefCell<Vec<(usize, f64)>>,
    pub losses: RefCell<Vec<Option<f64>>>,
    pub skips: RefCell<Vec<(usize, MetricError)>>,
}

impl MetricSink for RecordingSink {
    fn report(&self, report: &EpochReport) {
        self.reports.borrow_mut().push((report.epoch, report.auc));
        self.losses
            .borrow_mut()
            .push(report.metrics.get("loss").copied());
    }

    fn skipped(&self, epoch: usize, reason: &MetricError) {
        self.skips.borrow_mut().push((epoch, *reason));
    }
}

/// random points in [-1, 1)^2, labelled by whether x + y > 0
pub fn sum_greater_than_zero(count: usize) -> Vec<Sample> {
    (0..count)
        .map(|_| {
            let x = thread_rng().gen_range(-1.0..1.0);
            let y = thread_rng().gen_range(-1.0..1.0);
            let label = ((x + y) > 0.0) as u32;
            Sample::new(vec![x, y], label as f64)
        })
        .collect()
}
