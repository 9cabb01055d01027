use crate::ports::outbound::Sleeper;
use crate::shared::error::ScanError;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct CancelState {
    cancelled: Mutex<bool>,
    wake: Condvar,
}

/// InterruptibleSleeper adapter blocking the calling thread on a condition variable
///
/// Clones share one cancellation flag. Once cancelled, every current and
/// future wait returns `ScanError::Cancelled` immediately.
#[derive(Debug, Clone, Default)]
pub struct InterruptibleSleeper {
    state: Arc<CancelState>,
}

/// Handle that cancels waits of the sleeper it was taken from
#[derive(Debug, Clone)]
pub struct CancelHandle {
    state: Arc<CancelState>,
}

impl InterruptibleSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            state: Arc::clone(&self.state),
        }
    }
}

impl CancelHandle {
    pub fn cancel(&self) {
        let mut cancelled = self
            .state
            .cancelled
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *cancelled = true;
        self.state.wake.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self
            .state
            .cancelled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sleeper for InterruptibleSleeper {
    fn sleep(&self, duration: Duration) -> Result<(), ScanError> {
        // A wait too long to represent as an Instant only ends on cancel
        let deadline = Instant::now().checked_add(duration);
        let mut cancelled = self
            .state
            .cancelled
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        loop {
            if *cancelled {
                return Err(ScanError::Cancelled);
            }
            cancelled = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(());
                    }
                    // spurious wakeups just loop back to the checks above
                    self.state
                        .wake
                        .wait_timeout(cancelled, deadline - now)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0
                }
                None => self
                    .state
                    .wake
                    .wait(cancelled)
                    .unwrap_or_else(PoisonError::into_inner),
            };
        }
    }
}
