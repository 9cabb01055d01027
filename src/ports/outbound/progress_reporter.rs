/// ProgressReporter port for user-facing progress lines
///
/// This port abstracts progress reporting (e.g., to stderr) so that the
/// compact inventory written to stdout stays machine-readable.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Shows an activity indicator until the next call to another method
    ///
    /// # Arguments
    /// * `message` - What the tool is waiting on
    fn report_waiting(&self, message: &str);

    /// Reports a warning the user should act on
    fn report_warning(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}

impl<T: ProgressReporter + ?Sized> ProgressReporter for &T {
    fn report(&self, message: &str) {
        (**self).report(message)
    }

    fn report_waiting(&self, message: &str) {
        (**self).report_waiting(message)
    }

    fn report_warning(&self, message: &str) {
        (**self).report_warning(message)
    }

    fn report_completion(&self, message: &str) {
        (**self).report_completion(message)
    }
}
