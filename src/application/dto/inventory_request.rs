use std::path::PathBuf;

/// InventoryRequest - Internal request DTO for the inventory build use case
#[derive(Debug, Clone)]
pub struct InventoryRequest {
    /// Root of the tree to scan
    pub project_path: PathBuf,
}

impl InventoryRequest {
    pub fn new(project_path: PathBuf) -> Self {
        Self { project_path }
    }
}
