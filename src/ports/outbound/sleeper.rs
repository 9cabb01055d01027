use crate::shared::error::ScanError;
use std::time::Duration;

/// Sleeper port for every wait the scanning protocol performs
///
/// Polling back-off and transport retries both sleep through this port so
/// tests can record the schedule and callers can cancel a long wait.
pub trait Sleeper {
    /// Blocks for `duration` unless interrupted
    ///
    /// # Errors
    /// Returns `ScanError::Cancelled` if the wait was cancelled
    fn sleep(&self, duration: Duration) -> Result<(), ScanError>;
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) -> Result<(), ScanError> {
        (**self).sleep(duration)
    }
}
