#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! A training-loop observer that reports the validation ROC-AUC of a model at the end of every epoch.
//!
//! The [auc_observer] module contains the [`auc_observer::AucObserver`] struct, which implements [`training_observer::TrainingObserver`]
//! and can be handed to [`train_model`] or called from any other training loop that exposes an end-of-epoch hook.
//!
//! The [auc] module contains the metric itself, computed from the ROC curve with the trapezoidal rule,
//! and the [metric_sink] module contains the destinations a report can be written to.
//!
//! ## What is ROC-AUC?
//! The area under the receiver operating characteristic curve is the probability that a randomly chosen positive sample
//! is scored above a randomly chosen negative sample. It only depends on how the model *ranks* samples,
//! so it is a useful measure of a binary classifier independent of where the decision threshold ends up.
//!
//! # Examples
//! Compute and report the AUC of a model on a validation split, the way a training loop would at the end of an epoch:
//! ```
//! use epoch_auc::auc_observer::AucObserver;
//! use epoch_auc::training_observer::{EpochEvent, TrainingContext, TrainingObserver};
//! use epoch_auc::{Predictor, ValidationSplit};
//!
//! // a "model" which scores each row by its first feature
//! struct FirstFeature;
//! impl Predictor for FirstFeature {
//!     type Error = std::convert::Infallible;
//!     fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>, Self::Error> {
//!         Ok(features.iter().map(|row| row[0]).collect())
//!     }
//! }
//!
//! let validation = ValidationSplit::new(
//!     vec![vec![0.1], vec![0.4], vec![0.35], vec![0.8]],
//!     vec![0.0, 0.0, 1.0, 1.0],
//! );
//! let observer = AucObserver::new();
//! let context = TrainingContext::new(&FirstFeature, &validation);
//!
//! assert_eq!(observer.evaluate(&context), Ok(Ok(0.75)));
//! // logs "Epoch validation AUC: 0.75 (epoch 0)"
//! observer.on_epoch_end(&EpochEvent::new(0), &context)?;
//! # Ok::<(), std::convert::Infallible>(())
//! ```

/// Computes the ROC curve and the area under it
pub mod auc;
/// Contains the [`AucObserver`](crate::auc_observer::AucObserver), which reports validation AUC at the end of each epoch.
pub mod auc_observer;
/// Errors raised when the AUC is undefined for a set of labels and scores
pub mod metric_error;
/// Destinations for per-epoch AUC reports.
pub mod metric_sink;
/// Options for the [`AucObserver`](crate::auc_observer::AucObserver).
pub mod observer_options;
/// Errors raised by [`train_model`]
pub mod training_error;
/// Provides a trait for observing the training process during [`crate::train_model`].
pub mod training_observer;
/// Options for training a model with [`crate::train_model`].
pub mod training_options;

use log::debug;
use rand::{seq::SliceRandom, thread_rng, Rng};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use training_error::TrainingError;
use training_observer::{EpochEvent, TrainingContext, TrainingObserver};
use training_options::TrainingOptions;

/// A sample of data to be used in training a model.
///
/// Used for both [training](train_model) and [validation](ValidationSplit::from_samples) data.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Sample {
    /// The input data for the model
    features: Vec<f64>,
    /// The expected output of the model
    label: f64,
}

impl Sample {
    /// Create a new Sample
    pub fn new(features: Vec<f64>, label: f64) -> Self {
        Sample { features, label }
    }

    /// Get the features of the sample
    pub fn features(&self) -> &Vec<f64> {
        &self.features
    }
    /// Get the label of the sample
    pub fn label(&self) -> f64 {
        self.label
    }
}

/// Held-out data used to measure the model after each epoch: one row of features per label.
///
/// The split is fixed for the life of a training run. Nothing in this crate mutates it.
/// Row counts are not checked here; if they disagree, the observer reports a [`MetricError::ShapeMismatch`](metric_error::MetricError::ShapeMismatch) for the epoch.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct ValidationSplit {
    features: Vec<Vec<f64>>,
    labels: Vec<f64>,
}

impl ValidationSplit {
    /// Create a new ValidationSplit
    pub fn new(features: Vec<Vec<f64>>, labels: Vec<f64>) -> Self {
        ValidationSplit { features, labels }
    }

    /// Build a split from a set of samples, keeping their order
    pub fn from_samples(samples: &[Sample]) -> Self {
        let (features, labels) = samples
            .iter()
            .map(|sample| (sample.features.clone(), sample.label))
            .unzip();
        ValidationSplit { features, labels }
    }

    /// the feature matrix, one row per sample
    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    /// the label vector
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// number of labels in the split
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// true if the split has no labels
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Randomly hold out `validation_fraction` of `data` for validation, returning `(training_data, validation_split)`.
///
/// Both halves keep the original order of the samples. `validation_fraction` is clamped to `[0, 1]`.
pub fn holdout_split<R: Rng + ?Sized>(
    data: Vec<Sample>,
    validation_fraction: f64,
    rng: &mut R,
) -> (Vec<Sample>, ValidationSplit) {
    let total = data.len();
    let validation_size = (validation_fraction.clamp(0.0, 1.0) * total as f64) as usize;
    let validation_indices: FxHashSet<usize> =
        rand::seq::index::sample(rng, total, validation_size)
            .into_iter()
            .collect();
    let mut training_data = Vec::with_capacity(total - validation_size);
    let mut validation_data = Vec::with_capacity(validation_size);
    for (i, sample) in data.into_iter().enumerate() {
        if validation_indices.contains(&i) {
            validation_data.push(sample);
        } else {
            training_data.push(sample);
        }
    }
    debug!(
        "Data split. Training: {}, Validation: {}",
        training_data.len(),
        validation_data.len()
    );
    (training_data, ValidationSplit::from_samples(&validation_data))
}

/// A model that can score rows of features.
///
/// `predict` should be deterministic for a fixed model state and return one score per row, higher meaning "more likely positive".
pub trait Predictor {
    /// The error the model raises when inference fails
    type Error;

    /// Score each row of `features`
    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>, Self::Error>;
}

/// A model that [`train_model`] knows how to drive.
pub trait Trainable: Predictor {
    /// Make one full pass over `data`, updating the model's parameters, and return the mean training loss of the pass.
    fn train_epoch(&mut self, data: &[Sample]) -> Result<f64, Self::Error>;
}

/// Indicates whether the model should be tested against the validation data set after each epoch
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum EachEpoch<'a> {
    /// Hand the model and this validation split to the [TrainingObserver] after each epoch
    ValidateModel(&'a ValidationSplit),
    /// Do not call the observer
    DoNotValidateModel,
}

/// Train the provided model with the provided data.
///
/// if `validate` is [`EachEpoch::ValidateModel`], the observer is called once per epoch, after the epoch's updates have been made,
/// with the model and the validation split. The [`EpochEvent`] it receives carries the zero-based epoch index and the mean training loss under `"loss"`.
///
/// Returns the trained model if no errors are thrown.
///
/// # Errors
/// returns a [TrainingError] if the model reports an error while training or predicting, tagged with the epoch at which it happened.
///
/// # Example
/// train a model, using the provided [EmptyObserver] to ignore all training events:
/// ```
/// use epoch_auc::{train_model, Predictor, Sample, Trainable, EachEpoch, EmptyObserver};
/// use epoch_auc::training_options::TrainingOptions;
/// # use epoch_auc::training_error::TrainingError;
/// # struct MeanModel { mean: f64 }
/// # impl Predictor for MeanModel {
/// #     type Error = std::convert::Infallible;
/// #     fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>, Self::Error> {
/// #         Ok(vec![self.mean; features.len()])
/// #     }
/// # }
/// # impl Trainable for MeanModel {
/// #     fn train_epoch(&mut self, data: &[Sample]) -> Result<f64, Self::Error> {
/// #         self.mean = data.iter().map(|s| s.label()).sum::<f64>() / data.len() as f64;
/// #         Ok(0.0)
/// #     }
/// # }
///
/// let untrained_model = MeanModel { mean: 0.0 }; // any type implementing Trainable
/// let training_data = vec![Sample::new(vec![1.0], 1.0), Sample::new(vec![-1.0], 0.0)];
///
/// let trained_model = train_model(
///     untrained_model,
///     &training_data,
///     EachEpoch::DoNotValidateModel,
///     &EmptyObserver::new(),
///     TrainingOptions::default())?;
/// assert_eq!(trained_model.mean, 0.5);
/// # Ok::<(), TrainingError<std::convert::Infallible>>(())
/// ```
pub fn train_model<M, O>(
    mut model: M,
    training_data: &[Sample],
    validate: EachEpoch,
    training_observer: &O,
    options: TrainingOptions,
) -> Result<M, TrainingError<M::Error>>
where
    M: Trainable,
    O: TrainingObserver<M>,
{
    let mut randomness = thread_rng();
    let mut epoch_data: Vec<Sample> = training_data.to_vec();
    for epoch in 0..options.num_epochs {
        if options.shuffle {
            epoch_data.shuffle(&mut randomness);
        }
        let epoch_loss = model
            .train_epoch(&epoch_data)
            .map_err(|e| TrainingError { source: e, epoch })?;
        debug!("Epoch {}: Training Loss: {}", epoch, epoch_loss);

        if let EachEpoch::ValidateModel(validation) = validate {
            let mut metrics = FxHashMap::default();
            metrics.insert("loss".to_string(), epoch_loss);
            let event = EpochEvent::new(epoch).with_metrics(metrics);
            // the model is only lent immutably, so the observer sees the committed weights
            let context = TrainingContext::new(&model, validation);
            training_observer
                .on_epoch_end(&event, &context)
                .map_err(|e| TrainingError { source: e, epoch })?;
        }
    }

    Ok(model)
}

// EmptyObserver is basically a singleton, so there's no point in implementing any other common traits
/// An observer that does nothing when called.
/// Used for ignoring training events in the [train_model] function.
#[derive(Default)]
pub struct EmptyObserver {}
impl EmptyObserver {
    /// Create a new instance of the EmptyObserver
    pub fn new() -> Self {
        EmptyObserver {}
    }
}
impl<P: Predictor> TrainingObserver<P> for EmptyObserver {
    fn on_epoch_end(
        &self,
        _event: &EpochEvent,
        _context: &TrainingContext<'_, P>,
    ) -> Result<(), P::Error> {
        // do nothing
        Ok(())
    }
}
