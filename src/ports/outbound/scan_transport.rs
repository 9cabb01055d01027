use crate::shared::error::ScanError;
use serde_json::Value;

/// HTTP methods the scanning protocol uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A single request to the scanning service
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub api_key: String,
    /// JSON body, only sent with `Post`
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            api_key: api_key.into(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, api_key: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            api_key: api_key.into(),
            body: Some(body),
        }
    }
}

/// Status code and raw body of a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// ScanTransport port for talking to the remote scanning service
///
/// Implementations own connection handling and transient-failure retries.
/// Any HTTP status that reaches the caller is returned as a reply, not an error.
pub trait ScanTransport {
    /// Sends a request and returns the final reply
    ///
    /// # Errors
    /// `ScanError::Transport` when the service could not be reached or kept
    /// answering 503 after every retry; `ScanError::Cancelled` when a retry
    /// wait was interrupted.
    fn send(&self, request: &HttpRequest) -> Result<HttpReply, ScanError>;
}
