use crate::inventory::domain::EnvironmentInfo;
use std::path::Path;

/// EnvironmentProbe port for describing the machine and CI context of a scan
pub trait EnvironmentProbe {
    fn probe(&self, project_path: &Path) -> EnvironmentInfo;
}
