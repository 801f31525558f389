/// Indicates that an error was encountered during training
///
/// If displayed, this error will show the epoch at which the error was encountered, as well as the model error that caused it.
#[derive(Clone, PartialEq, Debug)]
pub struct TrainingError<E> {
    /// The error that caused the training error
    pub source: E,
    /// The zero-based epoch at which the error was encountered
    pub epoch: usize,
}

impl<E: std::fmt::Display> std::fmt::Display for TrainingError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "epoch {} encountered error {}", self.epoch, self.source)
    }
}

impl<E: std::error::Error + 'static> std::error::Error for TrainingError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
