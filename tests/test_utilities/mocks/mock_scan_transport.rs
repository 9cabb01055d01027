use ossprey_scan::prelude::*;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock ScanTransport answering from a queue of scripted replies
///
/// Every request is recorded. Once the queue is empty, further requests
/// fail with a transport error.
#[derive(Default, Clone)]
pub struct MockScanTransport {
    replies: Arc<Mutex<VecDeque<std::result::Result<HttpReply, ScanError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

#[allow(dead_code)]
impl MockScanTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, status: u16, body: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(HttpReply::new(status, body)));
        self
    }

    pub fn with_replies(self, status: u16, body: &str, count: usize) -> Self {
        (0..count).fold(self, |mock, _| mock.with_reply(status, body))
    }

    pub fn with_error(self, error: ScanError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl ScanTransport for MockScanTransport {
    fn send(&self, request: &HttpRequest) -> std::result::Result<HttpReply, ScanError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ScanError::transport("no scripted reply left")))
    }
}
