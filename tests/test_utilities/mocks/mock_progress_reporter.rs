use ossprey_scan::prelude::*;

/// Mock ProgressReporter for testing that captures messages
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    pub messages: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn report_waiting(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Waiting: {}", message));
    }

    fn report_warning(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Warning: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Completed: {}", message));
    }
}
