use crate::application::dto::ValidatorConfig;
use crate::inventory::domain::{JobStatus, ScanJob, SubmitOutcome};
use crate::inventory::services::{classify_submission, STATUS_ACCEPTED, STATUS_OK};
use crate::ports::outbound::{HttpReply, HttpRequest, ScanTransport, Sleeper};
use crate::shared::error::ScanError;
use serde_json::{json, Value};
use std::time::Duration;

/// RemoteValidator - Client for the scanning service's submit/poll protocol
///
/// A submission is answered either with a final verdict or with a job
/// that is polled with quadratically growing waits (1s, 4s, 9s, ...)
/// until it succeeds or the attempt budget runs out.
///
/// # Type Parameters
/// * `T` - ScanTransport implementation
/// * `S` - Sleeper implementation
pub struct RemoteValidator<T, S> {
    config: ValidatorConfig,
    transport: T,
    sleeper: S,
}

impl<T: ScanTransport, S: Sleeper> RemoteValidator<T, S> {
    /// # Errors
    /// `ScanError::Configuration` when the API key is empty or blank
    pub fn new(config: ValidatorConfig, transport: T, sleeper: S) -> Result<Self, ScanError> {
        if config.api_key().trim().is_empty() {
            return Err(ScanError::missing_api_key());
        }
        Ok(Self {
            config,
            transport,
            sleeper,
        })
    }

    /// Posts the compact inventory and returns the service's raw reply
    pub fn submit(&self, compact: &Value) -> Result<HttpReply, ScanError> {
        let url = self.config.submit_url();
        tracing::info!(url = %url, "submitting inventory");
        tracing::debug!(body = %compact, "submission body");

        let request = HttpRequest::post(url, self.config.api_key(), json!({ "sbom": compact }));
        self.transport.send(&request)
    }

    /// Submits the inventory and waits for the verdict.
    ///
    /// Returns `Ok(None)` when the service rate-limited or rejected the
    /// submission; the reason is logged.
    pub fn validate(&self, compact: &Value) -> Result<Option<Value>, ScanError> {
        let reply = self.submit(compact)?;

        match classify_submission(reply.status, &reply.body)? {
            SubmitOutcome::Success(verdict) => Ok(Some(verdict)),
            SubmitOutcome::Accepted(job) => {
                tracing::info!(sbom_id = %job.sbom_id, scan_id = %job.scan_id, "scan accepted, waiting for completion");
                self.wait_for_completion(&job).map(Some)
            }
            SubmitOutcome::RateLimited => {
                tracing::warn!("Rate limit exceeded");
                Ok(None)
            }
            SubmitOutcome::Failed { status, message } => {
                tracing::error!(status, "Failed to submit request");
                tracing::debug!(body = %reply.body, "rejected submission");
                if let Some(message) = message {
                    tracing::error!("{}", message);
                }
                Ok(None)
            }
        }
    }

    /// Polls the status endpoint until the job succeeds
    ///
    /// # Errors
    /// - `ScanError::ScanFailed` when a status check answers outside 200/202
    /// - `ScanError::Protocol` when a status body is malformed or a
    ///   succeeded job carries no output
    /// - `ScanError::Timeout` after the configured number of attempts
    /// - `ScanError::Cancelled` when a wait is interrupted
    pub fn wait_for_completion(&self, job: &ScanJob) -> Result<Value, ScanError> {
        let url = self.config.status_url(&job.sbom_id, &job.scan_id);
        let attempts = self.config.max_poll_attempts();

        for attempt in 1..=attempts {
            self.sleeper.sleep(poll_delay(attempt))?;

            let reply = self
                .transport
                .send(&HttpRequest::get(url.as_str(), self.config.api_key()))?;
            if reply.status != STATUS_OK && reply.status != STATUS_ACCEPTED {
                tracing::error!(status = reply.status, "Error returned when retrieving the results");
                return Err(ScanError::ScanFailed {
                    status: reply.status,
                    body: reply.body,
                });
            }

            let status: JobStatus = serde_json::from_str(&reply.body)
                .map_err(|e| ScanError::protocol(format!("malformed status body: {}", e)))?;
            tracing::debug!(attempt, status = %status.status, "scan status");

            if status.is_succeeded() {
                return status
                    .output
                    .ok_or_else(|| ScanError::protocol("scan succeeded but returned no output"));
            }
        }

        tracing::error!(attempts, "Scan took too long to complete");
        Err(ScanError::Timeout { attempts })
    }
}

/// Wait before status check `attempt`: `attempt²` seconds
pub fn poll_delay(attempt: u32) -> Duration {
    Duration::from_secs(u64::from(attempt) * u64::from(attempt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_delay_is_quadratic() {
        assert_eq!(poll_delay(1), Duration::from_secs(1));
        assert_eq!(poll_delay(4), Duration::from_secs(16));
        let total: Duration = (1..=19).map(poll_delay).sum();
        assert_eq!(total, Duration::from_secs(2470));
    }
}
