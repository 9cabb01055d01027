use super::evidence::SourceBucket;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Kind of identity a component resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentType {
    Pypi,
    Npm,
    /// Installed straight from a GitHub repository instead of a registry
    Github,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Pypi => "pypi",
            ComponentType::Npm => "npm",
            ComponentType::Github => "github",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pypi" | "python" => Ok(ComponentType::Pypi),
            "npm" => Ok(ComponentType::Npm),
            "github" => Ok(ComponentType::Github),
            other => Err(format!("Unknown component type: {}", other)),
        }
    }
}

/// Deployment environment a dependency was observed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DependencyEnv {
    Prod,
    Dev,
}

impl DependencyEnv {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyEnv::Prod => "prod",
            DependencyEnv::Dev => "dev",
        }
    }
}

impl FromStr for DependencyEnv {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prod" => Ok(DependencyEnv::Prod),
            "dev" => Ok(DependencyEnv::Dev),
            other => Err(format!("Unknown dependency environment: {}", other)),
        }
    }
}

/// The `(type, name, version)` triple that identifies a component.
///
/// Unique within an inventory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentIdentity {
    component_type: ComponentType,
    name: String,
    version: String,
}

impl ComponentIdentity {
    pub fn new(
        component_type: ComponentType,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            component_type,
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for ComponentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.component_type, self.name, self.version)
    }
}

/// A resolved dependency together with everything known about where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    identity: ComponentIdentity,
    sources: BTreeSet<SourceBucket>,
    locations: BTreeSet<String>,
    envs: BTreeSet<DependencyEnv>,
    qualifiers: BTreeMap<String, String>,
    registry_traces: BTreeSet<String>,
}

impl Component {
    pub fn new(identity: ComponentIdentity) -> Self {
        Self {
            identity,
            sources: BTreeSet::new(),
            locations: BTreeSet::new(),
            envs: BTreeSet::new(),
            qualifiers: BTreeMap::new(),
            registry_traces: BTreeSet::new(),
        }
    }

    pub fn identity(&self) -> &ComponentIdentity {
        &self.identity
    }

    pub fn component_type(&self) -> ComponentType {
        self.identity.component_type()
    }

    pub fn name(&self) -> &str {
        self.identity.name()
    }

    pub fn version(&self) -> &str {
        self.identity.version()
    }

    pub fn sources(&self) -> &BTreeSet<SourceBucket> {
        &self.sources
    }

    /// Locations in ascending path-string order
    pub fn locations(&self) -> &BTreeSet<String> {
        &self.locations
    }

    pub fn envs(&self) -> &BTreeSet<DependencyEnv> {
        &self.envs
    }

    pub fn qualifiers(&self) -> &BTreeMap<String, String> {
        &self.qualifiers
    }

    pub fn qualifier(&self, key: &str) -> Option<&str> {
        self.qualifiers.get(key).map(String::as_str)
    }

    /// Original registry `name==version` pairs that were rewritten into this identity
    pub fn registry_traces(&self) -> &BTreeSet<String> {
        &self.registry_traces
    }

    pub fn add_source(&mut self, source: SourceBucket) {
        self.sources.insert(source);
    }

    pub fn add_location(&mut self, location: impl Into<String>) {
        self.locations.insert(location.into());
    }

    pub fn add_env(&mut self, env: DependencyEnv) {
        self.envs.insert(env);
    }

    /// Records a qualifier; the first value seen for a key is kept
    pub fn add_qualifier(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.qualifiers.entry(key.into()).or_insert_with(|| value.into());
    }

    pub fn add_registry_trace(&mut self, trace: impl Into<String>) {
        self.registry_traces.insert(trace.into());
    }

    /// Unions every attribute of `other` into `self`.
    ///
    /// Both components must share the same identity.
    pub fn merge(&mut self, other: Component) {
        debug_assert_eq!(self.identity, other.identity);
        self.sources.extend(other.sources);
        self.locations.extend(other.locations);
        self.envs.extend(other.envs);
        for (key, value) in other.qualifiers {
            self.qualifiers.entry(key).or_insert(value);
        }
        self.registry_traces.extend(other.registry_traces);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str, version: &str) -> ComponentIdentity {
        ComponentIdentity::new(ComponentType::Npm, name, version)
    }

    #[test]
    fn test_component_type_round_trip_strings() {
        assert_eq!(ComponentType::Github.as_str(), "github");
        assert_eq!("PyPI".parse::<ComponentType>().unwrap(), ComponentType::Pypi);
        assert_eq!(
            "python".parse::<ComponentType>().unwrap(),
            ComponentType::Pypi
        );
        assert!("cargo".parse::<ComponentType>().is_err());
    }

    #[test]
    fn test_identity_display() {
        let id = ComponentIdentity::new(ComponentType::Github, "ossprey/example", "latest");
        assert_eq!(id.to_string(), "github:ossprey/example@latest");
    }

    #[test]
    fn test_identity_ordering_is_type_then_name_then_version() {
        let mut ids = vec![
            identity("b", "1.0.0"),
            ComponentIdentity::new(ComponentType::Pypi, "z", "1.0.0"),
            identity("a", "2.0.0"),
            identity("a", "1.0.0"),
        ];
        ids.sort();
        assert_eq!(ids[0].component_type(), ComponentType::Pypi);
        assert_eq!(ids[1], identity("a", "1.0.0"));
        assert_eq!(ids[3], identity("b", "1.0.0"));
    }

    #[test]
    fn test_locations_are_sorted_and_unique() {
        let mut component = Component::new(identity("a", "1.0.0"));
        component.add_location("/srv/b/node_modules/a");
        component.add_location("/srv/a/node_modules/a");
        component.add_location("/srv/b/node_modules/a");

        let locations: Vec<&str> = component.locations().iter().map(String::as_str).collect();
        assert_eq!(locations, vec!["/srv/a/node_modules/a", "/srv/b/node_modules/a"]);
    }

    #[test]
    fn test_first_qualifier_wins() {
        let mut component = Component::new(identity("a", "latest"));
        component.add_qualifier("branch", "main");
        component.add_qualifier("branch", "develop");
        assert_eq!(component.qualifier("branch"), Some("main"));
    }

    #[test]
    fn test_merge_unions_all_attributes() {
        let mut left = Component::new(identity("a", "1.0.0"));
        left.add_source(SourceBucket::NodeModules);
        left.add_location("/x");
        left.add_env(DependencyEnv::Prod);

        let mut right = Component::new(identity("a", "1.0.0"));
        right.add_source(SourceBucket::YarnLock);
        right.add_location("/y");
        right.add_location("/x");
        right.add_env(DependencyEnv::Dev);
        right.add_registry_trace("a==1.0.0");

        left.merge(right);

        assert_eq!(left.sources().len(), 2);
        assert_eq!(left.locations().len(), 2);
        assert_eq!(left.envs().len(), 2);
        assert!(left.registry_traces().contains("a==1.0.0"));
    }
}
