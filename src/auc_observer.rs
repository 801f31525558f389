use crate::{
    auc::roc_auc,
    metric_error::MetricError,
    metric_sink::{EpochReport, LogSink, MetricSink},
    observer_options::ObserverOptions,
    training_observer::{EpochEvent, TrainingContext, TrainingObserver},
    Predictor,
};

/// Reports the validation ROC-AUC of the model at the end of each epoch.
///
/// The observer holds no state between calls: calling it twice with the same model and validation data produces the same report.
/// If the AUC can't be computed for an epoch (see [`MetricError`]), the sink is told the epoch was skipped and training carries on.
/// Errors raised by the predictor itself are returned to the training loop.
#[derive(Clone, Debug, Default)]
pub struct AucObserver<S = LogSink> {
    options: ObserverOptions,
    sink: S,
}

impl AucObserver<LogSink> {
    /// Create an observer that reports every epoch through the [`log`] facade
    pub fn new() -> Self {
        AucObserver::default()
    }
}

impl<S: MetricSink> AucObserver<S> {
    /// Create an observer that reports to the given sink
    pub fn with_sink(sink: S, options: ObserverOptions) -> Self {
        AucObserver { options, sink }
    }

    /// the options this observer was built with
    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    /// the sink this observer reports to
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run the predictor over the validation features and compute the AUC against the validation labels, without reporting it.
    ///
    /// # Errors
    /// The outer result carries errors from the predictor. The inner result carries reasons the AUC is undefined for this data.
    pub fn evaluate<P: Predictor>(
        &self,
        context: &TrainingContext<'_, P>,
    ) -> Result<Result<f64, MetricError>, P::Error> {
        let validation = context.validation();
        let scores = context.predictor().predict(validation.features())?;
        Ok(roc_auc(validation.labels(), &scores))
    }
}

impl<P: Predictor, S: MetricSink> TrainingObserver<P> for AucObserver<S> {
    fn on_epoch_end(
        &self,
        event: &EpochEvent,
        context: &TrainingContext<'_, P>,
    ) -> Result<(), P::Error> {
        if !self.options.reports_on(event.epoch()) {
            return Ok(());
        }
        match self.evaluate(context)? {
            Ok(auc) => self.sink.report(&EpochReport {
                epoch: event.epoch(),
                auc,
                metrics: event.metrics(),
                formatted_auc: self.options.format_auc(auc),
            }),
            Err(reason) => self.sink.skipped(event.epoch(), &reason),
        }
        Ok(())
    }
}
