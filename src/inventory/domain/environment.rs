use serde::{Deserialize, Serialize};

/// Host and CI details attached once to an inventory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    pub os: String,
    pub arch: String,
    pub project_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_sha: Option<String>,
}
