//! ossprey-scan - dependency inventory builder and remote malware scan client
//!
//! This library discovers the third-party dependencies of a project (installed
//! Python distributions, `node_modules`, `package-lock.json` and `yarn.lock`),
//! merges them into a deduplicated inventory, and submits that inventory to a
//! remote scanning service, polling until a verdict is available.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`inventory`): Inventory model, resolution policies and pure services
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use ossprey_scan::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let reporter = StderrProgressReporter::new();
//! let use_case = BuildInventoryUseCase::new(
//!     FilesystemScanner::new(ScanMode::Auto),
//!     FileSystemReader::new(),
//!     HostEnvironmentProbe::new(),
//!     &reporter,
//! );
//!
//! let inventory = use_case.execute(InventoryRequest::new(PathBuf::from(".")))?;
//! println!("{}", CompactInventoryFormatter::new().format(&inventory)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod inventory;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, FilesystemScanner, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{describe_finding, CompactInventoryFormatter};
    pub use crate::adapters::outbound::network::{HttpScanTransport, RetryPolicy};
    pub use crate::adapters::outbound::system::{
        CancelHandle, HostEnvironmentProbe, InterruptibleSleeper,
    };
    pub use crate::application::dto::{InventoryRequest, ValidatorConfig, DEFAULT_SERVICE_URL};
    pub use crate::application::use_cases::{BuildInventoryUseCase, RemoteValidator};
    pub use crate::inventory::domain::{
        Component, ComponentIdentity, ComponentType, DependencyEnv, Ecosystem, EnvironmentInfo,
        Evidence, Inventory, ScanJob, ScanMode, SourceBucket, SubmitOutcome,
    };
    pub use crate::inventory::services::{classify_submission, Aggregator, IdentityResolver};
    pub use crate::ports::outbound::{
        EnvironmentProbe, EvidenceSource, HttpReply, HttpRequest, OutputPresenter,
        ProgressReporter, ProvenanceReader, ScanTransport, Sleeper,
    };
    pub use crate::shared::error::{ExitCode, ScanError};
    pub use crate::shared::Result;
}
