use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{Predictor, ValidationSplit};

/// Structs implementing this trait can be used to observe the training process.
pub trait TrainingObserver<P: Predictor> {
    /// called by [`crate::train_model`] once the weight updates of an epoch have been committed.
    ///
    /// Errors returned by the predictor should be passed back to the training loop; anything else is the observer's to handle.
    fn on_epoch_end(
        &self,
        event: &EpochEvent,
        context: &TrainingContext<'_, P>,
    ) -> Result<(), P::Error>;
}

/// Produced by the training loop at each epoch boundary, then discarded.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct EpochEvent {
    epoch: usize,
    metrics: FxHashMap<String, f64>,
}

impl EpochEvent {
    /// Create an event for the epoch with the given zero-based index, carrying no metrics
    pub fn new(epoch: usize) -> Self {
        EpochEvent {
            epoch,
            metrics: FxHashMap::default(),
        }
    }

    /// Attach the metrics the training loop gathered during the epoch
    pub fn with_metrics(mut self, metrics: FxHashMap<String, f64>) -> Self {
        self.metrics = metrics;
        self
    }

    /// zero-based index of the epoch that just ended
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    /// metrics attached by the training loop. Empty if the loop attached none
    pub fn metrics(&self) -> &FxHashMap<String, f64> {
        &self.metrics
    }
}

/// Read-only view of a training run, lent to an observer for the duration of one callback.
#[derive(Debug)]
pub struct TrainingContext<'a, P> {
    predictor: &'a P,
    validation: &'a ValidationSplit,
}

// derived Clone/Copy would require P: Clone
impl<P> Clone for TrainingContext<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<P> Copy for TrainingContext<'_, P> {}

impl<'a, P> TrainingContext<'a, P> {
    /// Create a new context
    pub fn new(predictor: &'a P, validation: &'a ValidationSplit) -> Self {
        TrainingContext {
            predictor,
            validation,
        }
    }

    /// the model in its current state
    pub fn predictor(&self) -> &'a P {
        self.predictor
    }

    /// the held-out validation data
    pub fn validation(&self) -> &'a ValidationSplit {
        self.validation
    }
}
