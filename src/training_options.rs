use std::fmt;

use serde::{Deserialize, Serialize};

/// Used by the [`train_model`](crate::train_model) function to determine how the model should be trained.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TrainingOptions {
    /// number of epochs for which to train, where an epoch is one complete pass through the training data
    pub num_epochs: usize,
    /// whether to shuffle the training data before each epoch
    pub shuffle: bool,
}

impl TrainingOptions {
    /// Create a new TrainingOptions struct with the given parameters.
    /// # Errors
    /// Returns [`TrainingOptionsError`] if `num_epochs` is 0
    pub fn new(num_epochs: usize, shuffle: bool) -> Result<TrainingOptions, TrainingOptionsError> {
        if num_epochs == 0 {
            return Err(TrainingOptionsError::ZeroEpochs);
        }
        Ok(TrainingOptions {
            num_epochs,
            shuffle,
        })
    }
}

impl Default for TrainingOptions {
    /// Returns a TrainingOptions struct with the following default values:
    /// * `num_epochs`: 100
    /// * `shuffle`: true
    fn default() -> Self {
        TrainingOptions {
            num_epochs: 100,
            shuffle: true,
        }
    }
}

/// Errors that can occur when creating a new TrainingOptions struct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingOptionsError {
    /// The number of epochs was 0
    ZeroEpochs,
}

impl fmt::Display for TrainingOptionsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrainingOptionsError::ZeroEpochs => write!(f, "Must train for at least one epoch"),
        }
    }
}

impl std::error::Error for TrainingOptionsError {}
