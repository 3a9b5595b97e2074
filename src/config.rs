use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};

/// File name looked up in the release root when no explicit config is given.
pub const CONFIG_FILE_NAME: &str = "release.toml";

/// Represents the complete configuration for release-bump.
///
/// Contains manifest discovery settings and changelog location/link settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub manifests: ManifestConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,
}

/// Returns the default manifest glob, relative to the release root.
fn default_manifest_pattern() -> String {
    "**/Cargo.toml".to_string()
}

/// Returns the default list of excluded paths.
fn default_exclude() -> Vec<String> {
    vec!["**/target/**".to_string()]
}

/// Configuration for manifest discovery.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestConfig {
    #[serde(default = "default_manifest_pattern")]
    pub pattern: String,

    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            pattern: default_manifest_pattern(),
            exclude: default_exclude(),
        }
    }
}

fn default_changelog_path() -> String {
    "CHANGELOG.md".to_string()
}

fn default_compare_url() -> String {
    "https://github.com/pluots/udf-suite/compare".to_string()
}

/// Configuration for the changelog rewrite.
///
/// `compare_url` is the repository's compare endpoint; the new `[Unreleased]`
/// link is `<compare_url>/<tag>...HEAD`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_changelog_path")]
    pub path: String,

    #[serde(default = "default_compare_url")]
    pub compare_url: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            path: default_changelog_path(),
            compare_url: default_compare_url(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release.toml` in the release root
/// 3. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(root: &Path, config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = root.join(CONFIG_FILE_NAME);
            if !candidate.exists() {
                return Ok(Config::default());
            }
            candidate
        }
    };

    let config_str = fs::read_to_string(&path).map_err(|e| ReleaseError::io(&path, e))?;
    parse_config(&config_str)
        .map_err(|e| ReleaseError::config(format!("{}: {}", path.display(), e)))
}

/// Parses configuration from TOML text.
pub fn parse_config(text: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.manifests.pattern, "**/Cargo.toml");
        assert_eq!(config.manifests.exclude, vec!["**/target/**".to_string()]);
        assert_eq!(config.changelog.path, "CHANGELOG.md");
        assert!(config.changelog.compare_url.ends_with("/compare"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
[changelog]
compare_url = "https://example.com/acme/widgets/compare"
"#,
        )
        .unwrap();
        assert_eq!(
            config.changelog.compare_url,
            "https://example.com/acme/widgets/compare"
        );
        assert_eq!(config.changelog.path, "CHANGELOG.md");
        assert_eq!(config.manifests, ManifestConfig::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(parse_config("[manifests\npattern = 3").is_err());
        assert!(parse_config("[manifests]\nexclude = \"target\"").is_err());
    }
}
