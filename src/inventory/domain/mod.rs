pub mod component;
pub mod environment;
pub mod evidence;
pub mod inventory;
pub mod inventory_metadata;
pub mod provenance;
pub mod scan_mode;
pub mod scan_job;

pub use component::{Component, ComponentIdentity, ComponentType, DependencyEnv};
pub use environment::EnvironmentInfo;
pub use evidence::{Ecosystem, Evidence, SourceBucket};
pub use inventory::Inventory;
pub use inventory_metadata::InventoryMetadata;
pub use provenance::{InstallerProvenance, VcsInfo};
pub use scan_mode::ScanMode;
pub use scan_job::{JobStatus, ScanJob, SubmitOutcome};
