use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Job status value the scanning service reports once a scan has finished
pub const STATUS_SUCCEEDED: &str = "SUCCEEDED";

/// Identifies an asynchronous validation that is still running remotely
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScanJob {
    #[serde(deserialize_with = "id_string")]
    pub sbom_id: String,
    #[serde(deserialize_with = "id_string")]
    pub scan_id: String,
}

impl ScanJob {
    pub fn new(sbom_id: impl Into<String>, scan_id: impl Into<String>) -> Self {
        Self {
            sbom_id: sbom_id.into(),
            scan_id: scan_id.into(),
        }
    }
}

/// Body returned by the status endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatus {
    pub status: String,
    #[serde(default)]
    pub output: Option<Value>,
}

impl JobStatus {
    pub fn is_succeeded(&self) -> bool {
        self.status == STATUS_SUCCEEDED
    }
}

/// How the scanning service answered a submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// 200: the verdict is final
    Success(Value),
    /// 202: the scan continues asynchronously
    Accepted(ScanJob),
    /// 429: the caller may try again later
    RateLimited,
    /// Anything else
    Failed { status: u16, message: Option<String> },
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or numeric id, got {}",
            other
        ))),
    }
}
