use super::evidence::SourceBucket;
use std::fmt;
use std::str::FromStr;

/// Which package-manager artifacts a scan looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Every supported artifact
    #[default]
    Auto,
    /// Installed Python distributions only
    Python,
    /// `node_modules` plus `package-lock.json`
    Npm,
    /// `node_modules` plus `yarn.lock`
    Yarn,
}

impl ScanMode {
    pub fn includes(&self, bucket: SourceBucket) -> bool {
        match self {
            ScanMode::Auto => true,
            ScanMode::Python => bucket == SourceBucket::PkgPackages,
            ScanMode::Npm => matches!(
                bucket,
                SourceBucket::NodeModules | SourceBucket::PackageLock
            ),
            ScanMode::Yarn => matches!(bucket, SourceBucket::NodeModules | SourceBucket::YarnLock),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::Auto => "auto",
            ScanMode::Python => "python",
            ScanMode::Npm => "npm",
            ScanMode::Yarn => "yarn",
        }
    }
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "" => Ok(ScanMode::Auto),
            "python" | "pip" => Ok(ScanMode::Python),
            "npm" => Ok(ScanMode::Npm),
            "yarn" => Ok(ScanMode::Yarn),
            _ => Err(format!(
                "Invalid mode: {}. Please specify 'auto', 'python', 'npm' or 'yarn'",
                s
            )),
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
