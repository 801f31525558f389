use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::metric_error::MetricError;

/// log target used by [`JsonSink`], so structured lines can be routed separately from the rest of the crate's logs
pub const JSON_TARGET: &str = "epoch_auc::json";

/// The result of one epoch's AUC computation, as handed to a [`MetricSink`].
///
/// Serializes to `{"epoch": .., "val_auc": .., "metrics": {..}}`.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct EpochReport<'a> {
    /// zero-based index of the epoch that just ended
    pub epoch: usize,
    /// the validation AUC
    #[serde(rename = "val_auc")]
    pub auc: f64,
    /// whatever metrics the training loop attached to the epoch, e.g. the training loss
    pub metrics: &'a FxHashMap<String, f64>,
    /// `auc`, formatted with the observer's precision
    #[serde(skip)]
    pub formatted_auc: String,
}

impl EpochReport<'_> {
    /// The human-readable report line, e.g. `Epoch validation AUC: 0.75 (epoch 3)`
    pub fn line(&self) -> String {
        format!(
            "Epoch validation AUC: {} (epoch {})",
            self.formatted_auc, self.epoch
        )
    }
}

fn skipped_line(epoch: usize, reason: &MetricError) -> String {
    format!(
        "Epoch validation AUC skipped (epoch {}): {}",
        epoch, reason
    )
}

/// Destination for the per-epoch AUC reports of an [`AucObserver`](crate::auc_observer::AucObserver).
pub trait MetricSink {
    /// called once for every reported epoch with a successfully computed AUC
    fn report(&self, report: &EpochReport);

    /// called instead of [`MetricSink::report`] when the AUC could not be computed for an epoch
    fn skipped(&self, epoch: usize, reason: &MetricError);
}

impl<S: MetricSink + ?Sized> MetricSink for &S {
    fn report(&self, report: &EpochReport) {
        (**self).report(report)
    }

    fn skipped(&self, epoch: usize, reason: &MetricError) {
        (**self).skipped(epoch, reason)
    }
}

impl<S: MetricSink + ?Sized> MetricSink for Box<S> {
    fn report(&self, report: &EpochReport) {
        (**self).report(report)
    }

    fn skipped(&self, epoch: usize, reason: &MetricError) {
        (**self).skipped(epoch, reason)
    }
}

/// Writes reports through the [`log`] facade at `info` level, and skipped epochs at `warn` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl MetricSink for LogSink {
    fn report(&self, report: &EpochReport) {
        info!("{}", report.line());
    }

    fn skipped(&self, epoch: usize, reason: &MetricError) {
        warn!("{}", skipped_line(epoch, reason));
    }
}

/// Prints one plain-text line per epoch to stdout, optionally prefixed with the local time.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutSink {
    /// prefix every line with the current local time
    pub timestamps: bool,
}

impl StdoutSink {
    /// Create a new StdoutSink
    pub fn new(timestamps: bool) -> Self {
        StdoutSink { timestamps }
    }

    fn print(&self, line: String) {
        if self.timestamps {
            println!("{} {}", chrono::Local::now(), line);
        } else {
            println!("{}", line);
        }
    }
}

impl MetricSink for StdoutSink {
    fn report(&self, report: &EpochReport) {
        self.print(report.line());
    }

    fn skipped(&self, epoch: usize, reason: &MetricError) {
        self.print(skipped_line(epoch, reason));
    }
}

/// Writes one JSON object per epoch through the [`log`] facade under the [`JSON_TARGET`] target.
///
/// Reports look like `{"epoch":3,"val_auc":0.75,"metrics":{"loss":0.41}}`,
/// skipped epochs look like `{"epoch":3,"skipped":"validation set is empty"}`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonSink;

impl JsonSink {
    /// the JSON line for a skipped epoch
    pub fn skipped_json(epoch: usize, reason: &MetricError) -> serde_json::Value {
        serde_json::json!({
            "epoch": epoch,
            "skipped": reason.to_string(),
        })
    }
}

impl MetricSink for JsonSink {
    fn report(&self, report: &EpochReport) {
        match serde_json::to_string(report) {
            Ok(line) => info!(target: JSON_TARGET, "{}", line),
            Err(e) => warn!("unable to serialize report for epoch {}: {}", report.epoch, e),
        }
    }

    fn skipped(&self, epoch: usize, reason: &MetricError) {
        warn!(target: JSON_TARGET, "{}", Self::skipped_json(epoch, reason));
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn metrics() -> FxHashMap<String, f64> {
        let mut metrics = FxHashMap::default();
        metrics.insert("loss".to_string(), 0.5);
        metrics
    }

    #[test]
    fn test_report_line() {
        let metrics = metrics();
        let report = EpochReport {
            epoch: 3,
            auc: 0.75,
            metrics: &metrics,
            formatted_auc: "0.75".to_string(),
        };
        assert_eq!(report.line(), "Epoch validation AUC: 0.75 (epoch 3)");
    }

    #[test]
    fn test_report_json() {
        let metrics = metrics();
        let report = EpochReport {
            epoch: 2,
            auc: 0.875,
            metrics: &metrics,
            formatted_auc: "0.9".to_string(),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"epoch": 2, "val_auc": 0.875, "metrics": {"loss": 0.5}})
        );
    }

    #[test]
    fn test_skipped_json() {
        let value = JsonSink::skipped_json(4, &MetricError::EmptyValidationSet);
        assert_eq!(
            value,
            serde_json::json!({"epoch": 4, "skipped": "validation set is empty"})
        );
    }

    #[test]
    fn test_sinks_do_not_panic() {
        let metrics = FxHashMap::default();
        let report = EpochReport {
            epoch: 0,
            auc: 1.0,
            metrics: &metrics,
            formatted_auc: "1".to_string(),
        };
        let sinks: Vec<Box<dyn MetricSink>> = vec![
            Box::new(LogSink),
            Box::new(StdoutSink::new(true)),
            Box::new(StdoutSink::new(false)),
            Box::new(JsonSink),
        ];
        for sink in sinks {
            sink.report(&report);
            sink.skipped(0, &MetricError::InsufficientClassVariance { class: 0.0 });
        }
    }
}
