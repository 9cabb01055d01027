use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the scan completed and nothing was flagged
    Success = 0,
    /// The scanning service flagged at least one component
    MaliciousPackageDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (configuration, discovery, transport, protocol, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::MaliciousPackageDetected => write!(f, "Malicious Package Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised while building an inventory or talking to the scanning service.
///
/// Malformed artifacts are not represented here: artifact parsers degrade to
/// "no evidence" and never surface an error past the scanner.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Configuration error: {message}\n\n💡 Hint: {hint}")]
    Configuration { message: String, hint: String },

    #[error("No package manager artifacts found under: {path}\n\n💡 Hint: Point --package at a directory containing node_modules, package-lock.json, yarn.lock or installed Python packages")]
    Discovery { path: PathBuf },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Request to the scanning service failed: {details}")]
    Transport { details: String },

    #[error("Unexpected response from the scanning service: {details}")]
    Protocol { details: String },

    #[error("Error returned when retrieving the results (status {status})")]
    ScanFailed { status: u16, body: String },

    #[error("Scan took too long to complete ({attempts} status checks)")]
    Timeout { attempts: u32 },

    #[error("Scan was cancelled while waiting")]
    Cancelled,
}

impl ScanError {
    pub fn missing_api_key() -> Self {
        ScanError::Configuration {
            message: "API key is null or empty".to_string(),
            hint: "Pass --api-key or set the API_KEY environment variable, or use --dry-run"
                .to_string(),
        }
    }

    pub fn transport(details: impl fmt::Display) -> Self {
        ScanError::Transport {
            details: details.to_string(),
        }
    }

    pub fn protocol(details: impl fmt::Display) -> Self {
        ScanError::Protocol {
            details: details.to_string(),
        }
    }
}
