/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_scan_transport;
mod recording_sleeper;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_scan_transport::MockScanTransport;
pub use recording_sleeper::RecordingSleeper;
