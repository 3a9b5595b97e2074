use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a bare `X.Y.Z` version string
    pub fn parse(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() != 3 {
            return Err(ReleaseError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                text
            )));
        }

        Ok(Version {
            major: parse_component(parts[0], "major")?,
            minor: parse_component(parts[1], "minor")?,
            patch: parse_component(parts[2], "patch")?,
        })
    }

    /// Bump version according to the release level
    ///
    /// Fails when the incremented component does not fit in a `u64`.
    pub fn bump(&self, level: &ReleaseLevel) -> Result<Self> {
        let bumped = match level {
            ReleaseLevel::Major => Version {
                major: increment(self.major, "major")?,
                minor: 0,
                patch: 0,
            },
            ReleaseLevel::Minor => Version {
                major: self.major,
                minor: increment(self.minor, "minor")?,
                patch: 0,
            },
            ReleaseLevel::Patch => Version {
                major: self.major,
                minor: self.minor,
                patch: increment(self.patch, "patch")?,
            },
        };
        Ok(bumped)
    }
}

fn increment(value: u64, name: &str) -> Result<u64> {
    value.checked_add(1).ok_or_else(|| {
        ReleaseError::version(format!("Cannot increment {} version {}", name, value))
    })
}

fn parse_component(part: &str, name: &str) -> Result<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ReleaseError::version(format!(
            "Invalid {} version: '{}'",
            name, part
        )));
    }
    part.parse::<u64>()
        .map_err(|_| ReleaseError::version(format!("Invalid {} version: '{}'", name, part)))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Which version component a release increments
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReleaseLevel {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for ReleaseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReleaseLevel::Major => "major",
            ReleaseLevel::Minor => "minor",
            ReleaseLevel::Patch => "patch",
        };
        f.write_str(name)
    }
}

impl FromStr for ReleaseLevel {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(ReleaseLevel::Major),
            "minor" => Ok(ReleaseLevel::Minor),
            "patch" => Ok(ReleaseLevel::Patch),
            other => Err(ReleaseError::version(format!(
                "Unknown release level '{}' - expected major, minor or patch",
                other
            ))),
        }
    }
}
