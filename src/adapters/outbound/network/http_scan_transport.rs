use super::retry_policy::{RawReply, RetryPolicy};
use crate::ports::outbound::{HttpMethod, HttpReply, HttpRequest, ScanTransport, Sleeper};
use crate::shared::error::ScanError;
use crate::shared::Result;
use reqwest::blocking::Client;
use reqwest::header::RETRY_AFTER;
use std::time::Duration;

/// Header carrying the scanning service API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// HttpScanTransport adapter talking to the scanning service over blocking HTTP
///
/// 503 replies are retried according to the [`RetryPolicy`]; retry waits go
/// through the same sleeper as the poll loop so they can be cancelled.
pub struct HttpScanTransport<S: Sleeper> {
    client: Client,
    policy: RetryPolicy,
    sleeper: S,
}

impl<S: Sleeper> HttpScanTransport<S> {
    const TIMEOUT_SECONDS: u64 = 60;

    pub fn new(sleeper: S) -> Result<Self> {
        let user_agent = format!("ossprey-scan/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            policy: RetryPolicy::default(),
            sleeper,
        })
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn send_once(&self, request: &HttpRequest) -> std::result::Result<RawReply, ScanError> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        let builder = builder.header(API_KEY_HEADER, &request.api_key);
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().map_err(ScanError::transport)?;
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().map_err(ScanError::transport)?;

        Ok(RawReply {
            status,
            retry_after,
            body,
        })
    }
}

impl<S: Sleeper> ScanTransport for HttpScanTransport<S> {
    fn send(&self, request: &HttpRequest) -> std::result::Result<HttpReply, ScanError> {
        tracing::debug!(method = ?request.method, url = %request.url, "sending request");
        self.policy
            .execute(request.method, &self.sleeper, || self.send_once(request))
    }
}
