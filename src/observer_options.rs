use std::fmt;

use serde::{Deserialize, Serialize};

/// The largest number of decimal places worth printing for an f64
pub const MAX_PRECISION: usize = 17;

/// Used by the [`AucObserver`](crate::auc_observer::AucObserver) to decide when to report and how to format the result.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ObserverOptions {
    /// report once every this many epochs. The epoch with zero-based index `i` is reported when `(i + 1) % every_n_epochs == 0`
    pub every_n_epochs: usize,
    /// number of decimal places to print the AUC with. If `None`, the shortest representation that round-trips is used
    pub precision: Option<usize>,
}

impl ObserverOptions {
    /// Create a new ObserverOptions struct with the given parameters.
    /// # Errors
    /// Returns [`ObserverOptionsError`] if...
    /// * `every_n_epochs` is 0
    /// * `precision` is greater than [`MAX_PRECISION`]
    pub fn new(
        every_n_epochs: usize,
        precision: Option<usize>,
    ) -> Result<ObserverOptions, ObserverOptionsError> {
        if every_n_epochs == 0 {
            return Err(ObserverOptionsError::ZeroReportInterval);
        }
        if let Some(precision) = precision {
            if precision > MAX_PRECISION {
                return Err(ObserverOptionsError::PrecisionTooLarge { precision });
            }
        }
        Ok(ObserverOptions {
            every_n_epochs,
            precision,
        })
    }

    /// whether the epoch with the given zero-based index should be reported
    pub fn reports_on(&self, epoch: usize) -> bool {
        // guard against a zero interval set directly through the public field
        self.every_n_epochs <= 1 || (epoch + 1) % self.every_n_epochs == 0
    }

    /// format an AUC value according to `precision`
    pub fn format_auc(&self, auc: f64) -> String {
        match self.precision {
            Some(precision) => format!("{:.*}", precision, auc),
            None => format!("{}", auc),
        }
    }
}

impl Default for ObserverOptions {
    /// Returns an ObserverOptions struct with the following default values:
    /// * `every_n_epochs`: 1
    /// * `precision`: None
    fn default() -> Self {
        ObserverOptions {
            every_n_epochs: 1,
            precision: None,
        }
    }
}

/// Errors that can occur when creating a new ObserverOptions struct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverOptionsError {
    /// The report interval was 0
    ZeroReportInterval,
    /// The requested precision was larger than [`MAX_PRECISION`]
    PrecisionTooLarge {
        /// the precision received
        precision: usize,
    },
}

impl fmt::Display for ObserverOptionsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ObserverOptionsError::ZeroReportInterval => {
                write!(f, "Report interval must be at least 1 epoch")
            }
            ObserverOptionsError::PrecisionTooLarge { precision } => write!(
                f,
                "Precision {} is larger than the maximum of {}",
                precision, MAX_PRECISION
            ),
        }
    }
}

impl std::error::Error for ObserverOptionsError {}
