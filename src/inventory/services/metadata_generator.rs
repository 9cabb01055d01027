use crate::inventory::domain::InventoryMetadata;
use chrono::Utc;
use uuid::Uuid;

/// Tool name recorded in every inventory this crate produces
pub const TOOL_NAME: &str = "ossprey-scan";

/// MetadataGenerator service stamping an inventory with time, tool and serial number
pub struct MetadataGenerator;

impl MetadataGenerator {
    /// Generates metadata with the current timestamp and a fresh `urn:uuid:` serial
    pub fn generate_metadata(tool_name: &str, tool_version: &str) -> InventoryMetadata {
        let timestamp = Utc::now().to_rfc3339();
        let serial_number = format!("urn:uuid:{}", Uuid::new_v4());

        InventoryMetadata::new(
            timestamp,
            tool_name.to_string(),
            tool_version.to_string(),
            serial_number,
        )
    }

    /// Generates metadata for this tool using the compile-time crate version
    pub fn generate_default_metadata() -> InventoryMetadata {
        Self::generate_metadata(TOOL_NAME, env!("CARGO_PKG_VERSION"))
    }
}
