/// Network adapters for the remote scanning service
mod http_scan_transport;
mod retry_policy;

pub use http_scan_transport::{HttpScanTransport, API_KEY_HEADER};
pub use retry_policy::{parse_retry_after, RawReply, RetryPolicy, MAX_RETRY_AFTER};
