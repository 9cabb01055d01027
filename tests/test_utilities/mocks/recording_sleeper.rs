use ossprey_scan::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Sleeper that returns immediately and records every requested wait
#[derive(Default, Clone)]
pub struct RecordingSleeper {
    waits: Arc<Mutex<Vec<Duration>>>,
}

#[allow(dead_code)]
impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }

    pub fn total(&self) -> Duration {
        self.waits.lock().unwrap().iter().sum()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) -> std::result::Result<(), ScanError> {
        self.waits.lock().unwrap().push(duration);
        Ok(())
    }
}
