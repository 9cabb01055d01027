use crate::inventory::domain::{ScanJob, SubmitOutcome};
use crate::shared::error::ScanError;
use serde_json::Value;

pub const STATUS_OK: u16 = 200;
pub const STATUS_ACCEPTED: u16 = 202;
pub const STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Classifies the scanning service's answer to a submission.
///
/// Only the bodies the protocol depends on are parsed: a 200 body must be
/// JSON, a 202 body must carry both job ids. Any other status becomes
/// `Failed`, with the service's `message` field when the body has one.
pub fn classify_submission(status: u16, body: &str) -> Result<SubmitOutcome, ScanError> {
    match status {
        STATUS_OK => {
            let verdict: Value = serde_json::from_str(body).map_err(|e| {
                ScanError::protocol(format!("verdict body is not valid JSON: {}", e))
            })?;
            Ok(SubmitOutcome::Success(verdict))
        }
        STATUS_ACCEPTED => {
            let job: ScanJob = serde_json::from_str(body).map_err(|e| {
                ScanError::protocol(format!("accepted body lacks scan identifiers: {}", e))
            })?;
            Ok(SubmitOutcome::Accepted(job))
        }
        STATUS_TOO_MANY_REQUESTS => Ok(SubmitOutcome::RateLimited),
        other => Ok(SubmitOutcome::Failed {
            status: other,
            message: extract_message(body),
        }),
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
