use crate::ports::outbound::{HttpMethod, HttpReply, Sleeper};
use crate::shared::error::ScanError;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// A reply before retry handling, with the raw `Retry-After` header if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply {
    pub status: u16,
    pub retry_after: Option<String>,
    pub body: String,
}

impl RawReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            retry_after: None,
            body: body.into(),
        }
    }

    pub fn with_retry_after(mut self, value: impl Into<String>) -> Self {
        self.retry_after = Some(value.into());
        self
    }
}

/// RetryPolicy for transient failures of the scanning service
///
/// A reply whose status is retryable is repeated up to `max_retries` times.
/// The wait before retry `n` is `n * backoff` unless the reply carried a
/// `Retry-After` header, which is honored in either of its two forms up to
/// `max_retry_after`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    backoff: Duration,
    retry_statuses: Vec<u16>,
    max_retry_after: Duration,
}

/// Longest server-requested wait that is honored as is
pub const MAX_RETRY_AFTER: Duration = Duration::from_secs(300);

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            backoff: Duration::from_secs(1),
            retry_statuses: vec![503],
            max_retry_after: MAX_RETRY_AFTER,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: Duration, retry_statuses: Vec<u16>) -> Self {
        Self {
            max_retries,
            backoff,
            retry_statuses,
            max_retry_after: MAX_RETRY_AFTER,
        }
    }

    pub fn with_max_retry_after(mut self, max_retry_after: Duration) -> Self {
        self.max_retry_after = max_retry_after;
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn is_retryable(&self, method: HttpMethod, status: u16) -> bool {
        matches!(method, HttpMethod::Get | HttpMethod::Post) && self.retry_statuses.contains(&status)
    }

    /// Wait before retry number `retry` (1-based)
    pub fn delay(&self, retry: u32, retry_after: Option<&str>) -> Duration {
        retry_after
            .and_then(|value| parse_retry_after(value, Utc::now()))
            .map(|wait| wait.min(self.max_retry_after))
            .unwrap_or_else(|| self.backoff.saturating_mul(retry))
    }

    /// Runs `attempt` until it yields a non-retryable reply or retries run out.
    ///
    /// # Errors
    /// Propagates errors from `attempt` and the sleeper. A reply that is
    /// still retryable after the last retry becomes `ScanError::Transport`.
    pub fn execute<S, F>(&self, method: HttpMethod, sleeper: &S, mut attempt: F) -> Result<HttpReply, ScanError>
    where
        S: Sleeper + ?Sized,
        F: FnMut() -> Result<RawReply, ScanError>,
    {
        let mut retries = 0;
        loop {
            let reply = attempt()?;
            if !self.is_retryable(method, reply.status) {
                return Ok(HttpReply::new(reply.status, reply.body));
            }
            if retries >= self.max_retries {
                return Err(ScanError::transport(format!(
                    "service still answered {} after {} retries",
                    reply.status, self.max_retries
                )));
            }
            retries += 1;
            let wait = self.delay(retries, reply.retry_after.as_deref());
            tracing::info!(status = reply.status, retry = retries, wait_secs = wait.as_secs_f64(), "service unavailable, retrying");
            sleeper.sleep(wait)?;
        }
    }
}

/// Parses a `Retry-After` value: delay seconds or an HTTP date
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }
    let at = DateTime::parse_from_rfc2822(value).ok()?;
    let wait = at.with_timezone(&Utc) - now;
    Some(wait.to_std().unwrap_or(Duration::ZERO))
}
