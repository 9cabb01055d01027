/// Files holding core metadata inside a distribution's metadata directory, in lookup order
pub const METADATA_FILES: [&str; 2] = ["METADATA", "PKG-INFO"];

/// Name and version read from Python core metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionMetadata {
    pub name: String,
    /// Empty when the metadata has no `Version:` line
    pub version: String,
}

/// Incremental reader over one or more core-metadata documents.
///
/// The first `Name:` and the first `Version:` line seen across all fed
/// documents win, so `METADATA` takes precedence over `PKG-INFO`.
#[derive(Debug, Default)]
pub struct MetadataFields {
    name: Option<String>,
    version: Option<String>,
}

impl MetadataFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one document; stops early once both fields are known
    pub fn feed(&mut self, text: &str) {
        for line in text.lines() {
            if self.is_complete() {
                return;
            }
            if self.name.is_none() {
                if let Some(value) = line.strip_prefix("Name:") {
                    self.name = Some(value.trim().to_string());
                    continue;
                }
            }
            if self.version.is_none() {
                if let Some(value) = line.strip_prefix("Version:") {
                    self.version = Some(value.trim().to_string());
                }
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.version.is_some()
    }

    /// Returns `None` when no usable name was found
    pub fn finish(self) -> Option<DistributionMetadata> {
        let name = self.name.filter(|n| !n.is_empty())?;
        Some(DistributionMetadata {
            name,
            version: self.version.unwrap_or_default(),
        })
    }
}

/// Parses a single core-metadata document
pub fn parse_metadata(text: &str) -> Option<DistributionMetadata> {
    let mut fields = MetadataFields::new();
    fields.feed(text);
    fields.finish()
}

/// Whether a directory name marks installed distribution metadata
pub fn is_metadata_dir_name(name: &str) -> bool {
    name.ends_with(".dist-info") || name.ends_with(".egg-info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_and_version() {
        let text = "Metadata-Version: 2.1\nName: requests\nVersion: 2.31.0\nSummary: HTTP\n";
        assert_eq!(
            parse_metadata(text),
            Some(DistributionMetadata {
                name: "requests".to_string(),
                version: "2.31.0".to_string()
            })
        );
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = "Name: first\nVersion: 1.0\nName: second\nVersion: 2.0\n";
        let meta = parse_metadata(text).unwrap();
        assert_eq!(meta.name, "first");
        assert_eq!(meta.version, "1.0");
    }

    #[test]
    fn test_missing_version_is_empty() {
        let meta = parse_metadata("Name: nover\n").unwrap();
        assert_eq!(meta.version, "");
    }

    #[test]
    fn test_missing_name_yields_nothing() {
        assert!(parse_metadata("Version: 1.0\n").is_none());
        assert!(parse_metadata("Name:   \nVersion: 1.0\n").is_none());
    }

    #[test]
    fn test_fields_are_collected_across_documents() {
        let mut fields = MetadataFields::new();
        fields.feed("Name: split\n");
        assert!(!fields.is_complete());
        fields.feed("Name: ignored\nVersion: 3.0\n");
        let meta = fields.finish().unwrap();
        assert_eq!(meta.name, "split");
        assert_eq!(meta.version, "3.0");
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        assert!(parse_metadata("name: lower\n").is_none());
    }

    #[test]
    fn test_metadata_dir_names() {
        assert!(is_metadata_dir_name("foo-1.0.dist-info"));
        assert!(is_metadata_dir_name("bar.egg-info"));
        assert!(!is_metadata_dir_name("site-packages"));
    }
}
