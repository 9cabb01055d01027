pub const YARN_LOCK: &str = "yarn.lock";

/// One alias spec of a `yarn.lock` stanza with its resolved version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YarnEntry {
    /// The alias spec as written in the header, e.g. `@babel/core@^7.0.0`
    pub alias: String,
    pub name: String,
    pub version: String,
}

/// Parses a classic (v1) `yarn.lock`.
///
/// A stanza header is an unindented line ending with `:` that lists one or
/// more comma-separated alias specs, quoted or not. The stanza only counts
/// when the next line is its indented `version "<ver>"` line. Every alias
/// becomes its own entry sharing that version.
pub fn parse_yarn_lock(text: &str) -> Vec<YarnEntry> {
    let mut entries = Vec::new();
    let mut lines = text.lines().peekable();

    while let Some(line) = lines.next() {
        let Some(header) = stanza_header(line) else {
            continue;
        };
        let Some(version) = lines.peek().and_then(|next| version_line(next)) else {
            continue;
        };

        for alias in header.split(',') {
            let alias = alias.trim().trim_matches('"').trim();
            if alias.is_empty() {
                continue;
            }
            entries.push(YarnEntry {
                alias: alias.to_string(),
                name: package_name(alias).to_string(),
                version: version.to_string(),
            });
        }
    }

    entries
}

/// Drops the trailing `@<range>` of an alias spec, keeping the leading `@`
/// of a scoped package.
pub fn package_name(alias: &str) -> &str {
    match alias.rfind('@') {
        Some(index) if index > 0 => &alias[..index],
        _ => alias,
    }
}

fn stanza_header(line: &str) -> Option<&str> {
    if line.starts_with(char::is_whitespace) || line.starts_with('#') {
        return None;
    }
    let header = line.trim_end().strip_suffix(':')?;
    if header.is_empty() {
        None
    } else {
        Some(header)
    }
}

fn version_line(line: &str) -> Option<&str> {
    if !line.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = line.trim_start().strip_prefix("version")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let quoted = rest.trim();
    let version = quoted.strip_prefix('"')?.strip_suffix('"')?;
    if version.is_empty() || version.contains('"') {
        None
    } else {
        Some(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCK: &str = r#"# THIS IS AN AUTOGENERATED FILE. DO NOT EDIT THIS FILE DIRECTLY.
# yarn lockfile v1


"@babel/code-frame@^7.0.0", "@babel/code-frame@^7.22.13":
  version "7.22.13"
  resolved "https://registry.yarnpkg.com/@babel/code-frame/-/code-frame-7.22.13.tgz"
  dependencies:
    chalk "^2.4.2"

lodash@^4.17.21:
  version "4.17.21"
  resolved "https://registry.yarnpkg.com/lodash/-/lodash-4.17.21.tgz"
"#;

    #[test]
    fn test_multi_alias_stanza() {
        let entries = parse_yarn_lock(LOCK);
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].alias, "@babel/code-frame@^7.0.0");
        assert_eq!(entries[0].name, "@babel/code-frame");
        assert_eq!(entries[0].version, "7.22.13");
        assert_eq!(entries[1].alias, "@babel/code-frame@^7.22.13");
        assert_eq!(entries[1].name, "@babel/code-frame");
        assert_eq!(entries[1].version, "7.22.13");
    }

    #[test]
    fn test_unquoted_header() {
        let entries = parse_yarn_lock(LOCK);
        assert_eq!(
            entries[2],
            YarnEntry {
                alias: "lodash@^4.17.21".to_string(),
                name: "lodash".to_string(),
                version: "4.17.21".to_string()
            }
        );
    }

    #[test]
    fn test_nested_keys_are_not_headers() {
        let entries = parse_yarn_lock(LOCK);
        assert!(entries.iter().all(|e| e.name != "dependencies"));
    }

    #[test]
    fn test_header_without_version_line_is_skipped() {
        let text = "broken@^1.0.0:\n  resolved \"https://x\"\n  version \"1.0.0\"\n";
        assert!(parse_yarn_lock(text).is_empty());
    }

    #[test]
    fn test_package_name() {
        assert_eq!(package_name("left-pad@^1.3.0"), "left-pad");
        assert_eq!(package_name("@scope/pkg@~2.0.0"), "@scope/pkg");
        assert_eq!(package_name("@scope/pkg"), "@scope/pkg");
        assert_eq!(package_name("alias@npm:real@^1.0.0"), "alias@npm:real");
    }

    #[test]
    fn test_garbage_input() {
        assert!(parse_yarn_lock("").is_empty());
        assert!(parse_yarn_lock(":\n  version \"1\"\n").is_empty());
    }
}
