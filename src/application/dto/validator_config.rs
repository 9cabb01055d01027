use crate::shared::error::ScanError;
use url::Url;

/// Scanning service used when no URL is configured
pub const DEFAULT_SERVICE_URL: &str = "https://api.ossprey.com";

/// Number of status checks before a pending scan is reported as timed out
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 19;

/// ValidatorConfig - Immutable settings for talking to the scanning service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    base_url: String,
    api_key: String,
    max_poll_attempts: u32,
}

impl ValidatorConfig {
    /// Creates a config after checking that `base_url` is an http(s) URL.
    ///
    /// A trailing `/` is dropped so endpoint paths can be appended directly.
    /// The API key is not checked here; the validator refuses a blank one.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, ScanError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| ScanError::Configuration {
            message: format!("Invalid service URL '{}': {}", base_url, e),
            hint: "Use an absolute URL such as https://api.ossprey.com".to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScanError::Configuration {
                message: format!("Unsupported URL scheme '{}'", parsed.scheme()),
                hint: "The service URL must start with http:// or https://".to_string(),
            });
        }

        Ok(Self {
            base_url: trimmed.to_string(),
            api_key: api_key.into(),
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        })
    }

    pub fn with_max_poll_attempts(mut self, attempts: u32) -> Self {
        self.max_poll_attempts = attempts;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn max_poll_attempts(&self) -> u32 {
        self.max_poll_attempts
    }

    pub fn submit_url(&self) -> String {
        format!("{}/public/v1/scans", self.base_url)
    }

    pub fn status_url(&self, sbom_id: &str, scan_id: &str) -> String {
        format!(
            "{}/public/v1/scans/status?sbom_id={}&scan_id={}",
            self.base_url,
            urlencoding::encode(sbom_id),
            urlencoding::encode(scan_id)
        )
    }
}
