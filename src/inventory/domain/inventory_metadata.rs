/// InventoryMetadata value object describing when and by what an inventory was built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
    serial_number: String,
}

impl InventoryMetadata {
    pub fn new(
        timestamp: String,
        tool_name: String,
        tool_version: String,
        serial_number: String,
    ) -> Self {
        Self {
            timestamp,
            tool_name,
            tool_version,
            serial_number,
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }
}
