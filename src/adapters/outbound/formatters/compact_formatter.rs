use crate::inventory::domain::{
    Component, ComponentIdentity, ComponentType, DependencyEnv, EnvironmentInfo, Inventory,
    InventoryMetadata, SourceBucket,
};
use crate::inventory::services::MetadataGenerator;
use crate::shared::error::ScanError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Name of the compact wire form
pub const COMPACT_FORMAT: &str = "minibom";
pub const COMPACT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CompactDocument {
    #[serde(default = "default_format")]
    format: String,
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<CompactMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    environment: Option<EnvironmentInfo>,
    #[serde(default)]
    components: Vec<CompactComponent>,
    #[serde(default)]
    vulnerabilities: Vec<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CompactMetadata {
    timestamp: String,
    tool: String,
    tool_version: String,
    serial_number: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct CompactComponent {
    #[serde(rename = "type")]
    component_type: String,
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    source: Vec<String>,
    #[serde(default)]
    env: Vec<String>,
    #[serde(default)]
    location: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    qualifiers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    registry_traces: Vec<String>,
}

fn default_format() -> String {
    COMPACT_FORMAT.to_string()
}

fn default_version() -> u32 {
    COMPACT_VERSION
}

/// CompactInventoryFormatter adapter converting inventories to and from the
/// compact JSON form exchanged with the scanning service
pub struct CompactInventoryFormatter;

impl CompactInventoryFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn to_compact(&self, inventory: &Inventory) -> Value {
        let metadata = inventory.metadata();
        let document = CompactDocument {
            format: default_format(),
            version: COMPACT_VERSION,
            metadata: Some(CompactMetadata {
                timestamp: metadata.timestamp().to_string(),
                tool: metadata.tool_name().to_string(),
                tool_version: metadata.tool_version().to_string(),
                serial_number: metadata.serial_number().to_string(),
            }),
            environment: inventory.environment().cloned(),
            components: inventory.components().map(compact_component).collect(),
            vulnerabilities: inventory.findings().to_vec(),
        };
        // Plain structs with string keys always serialize
        serde_json::to_value(&document).unwrap_or(Value::Null)
    }

    /// Serializes the compact form as pretty-printed JSON
    pub fn format(&self, inventory: &Inventory) -> Result<String> {
        let compact = self.to_compact(inventory);
        Ok(serde_json::to_string_pretty(&compact)?)
    }

    /// Rebuilds an inventory from a compact document, such as a verdict
    ///
    /// # Errors
    /// `ScanError::Protocol` when the value is not a compact document
    pub fn from_compact(&self, value: &Value) -> Result<Inventory> {
        let document = parse_document(value)?;
        let metadata = document
            .metadata
            .map(|m| InventoryMetadata::new(m.timestamp, m.tool, m.tool_version, m.serial_number))
            .unwrap_or_else(MetadataGenerator::generate_default_metadata);

        let mut inventory = Inventory::new(metadata);
        apply_document(&mut inventory, document.environment, document.components, document.vulnerabilities);
        Ok(inventory)
    }

    /// Merges a verdict into an existing inventory.
    ///
    /// Components the verdict lists are merged by identity, every
    /// vulnerability entry is kept as a finding, and the verdict's
    /// environment replaces the local one only when present.
    pub fn merge_verdict(&self, inventory: &mut Inventory, verdict: &Value) -> Result<()> {
        let document = parse_document(verdict)?;
        apply_document(inventory, document.environment, document.components, document.vulnerabilities);
        Ok(())
    }
}

impl Default for CompactInventoryFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_document(value: &Value) -> std::result::Result<CompactDocument, ScanError> {
    let document: CompactDocument = serde_json::from_value(value.clone())
        .map_err(|e| ScanError::protocol(format!("verdict is not a compact inventory: {}", e)))?;
    if document.format != COMPACT_FORMAT {
        return Err(ScanError::protocol(format!(
            "unsupported inventory format '{}'",
            document.format
        )));
    }
    Ok(document)
}

fn apply_document(
    inventory: &mut Inventory,
    environment: Option<EnvironmentInfo>,
    components: Vec<CompactComponent>,
    vulnerabilities: Vec<Value>,
) {
    if let Some(environment) = environment {
        inventory.update_environment(environment);
    }
    inventory.add_components(components.into_iter().filter_map(domain_component));
    for finding in vulnerabilities {
        inventory.add_finding(finding);
    }
}

fn compact_component(component: &Component) -> CompactComponent {
    CompactComponent {
        component_type: component.component_type().as_str().to_string(),
        name: component.name().to_string(),
        version: component.version().to_string(),
        source: component.sources().iter().map(|s| s.as_str().to_string()).collect(),
        env: component.envs().iter().map(|e| e.as_str().to_string()).collect(),
        location: component.locations().iter().cloned().collect(),
        qualifiers: component.qualifiers().clone(),
        registry_traces: component.registry_traces().iter().cloned().collect(),
    }
}

fn domain_component(compact: CompactComponent) -> Option<Component> {
    let component_type = match compact.component_type.parse::<ComponentType>() {
        Ok(t) => t,
        Err(e) => {
            tracing::debug!(error = %e, name = %compact.name, "dropping component of unknown type");
            return None;
        }
    };

    let mut component = Component::new(ComponentIdentity::new(
        component_type,
        compact.name,
        compact.version,
    ));
    for source in compact.source {
        if let Ok(bucket) = source.parse::<SourceBucket>() {
            component.add_source(bucket);
        }
    }
    for env in compact.env {
        if let Ok(env) = env.parse::<DependencyEnv>() {
            component.add_env(env);
        }
    }
    for location in compact.location {
        component.add_location(location);
    }
    for (key, value) in compact.qualifiers {
        component.add_qualifier(key, value);
    }
    for trace in compact.registry_traces {
        component.add_registry_trace(trace);
    }
    Some(component)
}

/// One-line description of a verdict entry for the console summary
pub fn describe_finding(finding: &Value) -> String {
    let text = |key: &str| finding.get(key).and_then(Value::as_str).map(str::to_string);

    let id = text("id").or_else(|| text("name"));
    let target = text("purl")
        .or_else(|| text("package"))
        .or_else(|| text("bom-ref"))
        .or_else(|| {
            finding
                .get("components")
                .and_then(Value::as_array)
                .map(|refs| {
                    refs.iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .filter(|s| !s.is_empty())
        });

    match (id, target) {
        (Some(id), Some(target)) => format!("{} ({})", id, target),
        (Some(id), None) => id,
        (None, Some(target)) => target,
        (None, None) => finding.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_inventory() -> Inventory {
        let mut inventory = Inventory::new(InventoryMetadata::new(
            "2024-01-01T00:00:00+00:00".to_string(),
            "ossprey-scan".to_string(),
            "0.1.0".to_string(),
            "urn:uuid:1234".to_string(),
        ));

        let mut github = Component::new(ComponentIdentity::new(
            ComponentType::Github,
            "ossprey/example",
            "latest",
        ));
        github.add_source(SourceBucket::PkgPackages);
        github.add_env(DependencyEnv::Prod);
        github.add_location("/venv/example.dist-info");
        github.add_qualifier("branch", "main");
        github.add_registry_trace("example==0.1.0");
        inventory.add_component(github);

        let mut npm = Component::new(ComponentIdentity::new(ComponentType::Npm, "lodash", "4.17.21"));
        npm.add_source(SourceBucket::NodeModules);
        npm.add_source(SourceBucket::YarnLock);
        npm.add_env(DependencyEnv::Prod);
        npm.add_location("/app/yarn.lock#lodash@^4.17.0");
        npm.add_location("/app/node_modules/lodash");
        inventory.add_component(npm);

        inventory.update_environment(EnvironmentInfo {
            os: "linux".to_string(),
            arch: "x86_64".to_string(),
            project_path: "/app".to_string(),
            ..Default::default()
        });
        inventory
    }

    #[test]
    fn test_to_compact_shape() {
        let compact = CompactInventoryFormatter::new().to_compact(&sample_inventory());

        assert_eq!(compact["format"], "minibom");
        assert_eq!(compact["version"], 1);
        assert_eq!(compact["environment"]["os"], "linux");
        assert_eq!(compact["metadata"]["serial_number"], "urn:uuid:1234");
        assert_eq!(compact["vulnerabilities"], json!([]));

        let components = compact["components"].as_array().unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0]["type"], "npm");
        assert_eq!(components[0]["source"], json!(["node_modules", "yarn.lock"]));
        assert_eq!(
            components[0]["location"],
            json!(["/app/node_modules/lodash", "/app/yarn.lock#lodash@^4.17.0"])
        );
        assert!(components[0].get("qualifiers").is_none());
        assert_eq!(components[1]["type"], "github");
        assert_eq!(components[1]["qualifiers"]["branch"], "main");
        assert_eq!(components[1]["registry_traces"], json!(["example==0.1.0"]));
    }

    #[test]
    fn test_from_compact_restores_inventory() {
        let formatter = CompactInventoryFormatter::new();
        let original = sample_inventory();
        let restored = formatter.from_compact(&formatter.to_compact(&original)).unwrap();

        assert_eq!(restored.len(), original.len());
        assert_eq!(restored.metadata(), original.metadata());
        assert_eq!(restored.environment(), original.environment());
        let id = ComponentIdentity::new(ComponentType::Github, "ossprey/example", "latest");
        assert_eq!(restored.get(&id), original.get(&id));
    }

    #[test]
    fn test_merge_verdict_keeps_findings() {
        let formatter = CompactInventoryFormatter::new();
        let mut inventory = sample_inventory();
        let verdict = json!({
            "format": "minibom",
            "components": [{"type": "npm", "name": "lodash", "version": "4.17.21",
                            "source": ["package-lock.json"], "location": ["/remote"]}],
            "vulnerabilities": [{"id": "MAL-2024-1", "purl": "pkg:npm/lodash@4.17.21"}]
        });

        formatter.merge_verdict(&mut inventory, &verdict).unwrap();

        assert_eq!(inventory.len(), 2);
        assert!(inventory.has_findings());
        let lodash = inventory
            .get(&ComponentIdentity::new(ComponentType::Npm, "lodash", "4.17.21"))
            .unwrap();
        assert_eq!(lodash.sources().len(), 3);
        assert_eq!(inventory.environment().unwrap().os, "linux");
    }

    #[test]
    fn test_unknown_component_types_are_dropped() {
        let formatter = CompactInventoryFormatter::new();
        let inventory = formatter
            .from_compact(&json!({
                "format": "minibom",
                "components": [
                    {"type": "cargo", "name": "serde", "version": "1.0.0"},
                    {"type": "pypi", "name": "requests", "version": "2.31.0"}
                ]
            }))
            .unwrap();
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_wrong_format_is_protocol_error() {
        let formatter = CompactInventoryFormatter::new();
        let err = formatter
            .from_compact(&json!({"format": "cyclonedx", "components": []}))
            .unwrap_err();
        assert!(err.to_string().contains("unsupported inventory format"));
        assert!(formatter.from_compact(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_format_is_pretty_json() {
        let text = CompactInventoryFormatter::new()
            .format(&sample_inventory())
            .unwrap();
        assert!(text.contains("\n  \"format\": \"minibom\""));
    }

    #[test]
    fn test_describe_finding() {
        assert_eq!(
            describe_finding(&json!({"id": "MAL-1", "purl": "pkg:npm/evil@1.0.0"})),
            "MAL-1 (pkg:npm/evil@1.0.0)"
        );
        assert_eq!(
            describe_finding(&json!({"id": "MAL-2", "components": ["a", "b"]})),
            "MAL-2 (a, b)"
        );
        assert_eq!(describe_finding(&json!({"severity": 9})), "{\"severity\":9}");
    }
}
