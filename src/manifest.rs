//! Manifest version updater.
//!
//! Finds every package manifest under the release root, computes the next
//! version once from the first `version = "X.Y.Z"` line seen, and rewrites
//! every matching line in every manifest to that same version.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use regex::Regex;

use crate::config::ManifestConfig;
use crate::domain::{ReleaseLevel, Version};
use crate::error::{ReleaseError, Result};
use crate::ui;

/// Matches a version declaration at the start of a manifest line.
pub const VERSION_PATTERN: &str = r#"^version = "(\d+)\.(\d+)\.(\d+)""#;

/// One rewritten version line
#[derive(Debug, Clone, PartialEq)]
pub struct VersionChange {
    /// Manifest path, relative to the release root
    pub path: PathBuf,
    /// 1-based line number within the manifest
    pub line_number: usize,
    /// The line as it was before rewriting, without its terminator
    pub old_line: String,
    pub new_version: Version,
}

/// In-memory result of rewriting one manifest
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestUpdate {
    /// Path used for reading and writing
    pub path: PathBuf,
    pub original: String,
    pub updated: String,
    pub changes: Vec<VersionChange>,
}

impl ManifestUpdate {
    pub fn is_changed(&self) -> bool {
        self.original != self.updated
    }
}

/// Rewrites version lines for a single release level
pub struct ManifestRewriter {
    level: ReleaseLevel,
    version_line: Regex,
}

impl ManifestRewriter {
    pub fn new(level: ReleaseLevel) -> Result<Self> {
        let version_line = Regex::new(VERSION_PATTERN)
            .map_err(|e| ReleaseError::version(format!("Invalid version pattern: {}", e)))?;
        Ok(ManifestRewriter {
            level,
            version_line,
        })
    }

    /// Rewrite every matching line of `content`.
    ///
    /// `next_version` is shared across all manifests of a run: the first match
    /// seen while it is `None` seeds it, every match afterwards (in this file
    /// or later ones) is replaced with the value already stored. Only the
    /// matched `version = "X.Y.Z"` prefix is replaced; the rest of the line and
    /// its terminator are kept.
    pub fn rewrite(
        &self,
        display_path: &Path,
        content: &str,
        next_version: &mut Option<Version>,
    ) -> Result<(String, Vec<VersionChange>)> {
        let mut updated = String::with_capacity(content.len());
        let mut changes = Vec::new();

        for (index, line) in content.split_inclusive('\n').enumerate() {
            let Some(captures) = self.version_line.captures(line) else {
                updated.push_str(line);
                continue;
            };

            let version = match *next_version {
                Some(version) => version,
                None => {
                    let current = Version::new(
                        parse_group(&captures[1])?,
                        parse_group(&captures[2])?,
                        parse_group(&captures[3])?,
                    );
                    let bumped = current.bump(&self.level)?;
                    *next_version = Some(bumped);
                    bumped
                }
            };

            let matched = captures[0].len();
            updated.push_str("version = \"");
            updated.push_str(&version.to_string());
            updated.push('"');
            updated.push_str(&line[matched..]);

            changes.push(VersionChange {
                path: display_path.to_path_buf(),
                line_number: index + 1,
                old_line: line.trim_end_matches(['\n', '\r']).to_string(),
                new_version: version,
            });
        }

        Ok((updated, changes))
    }
}

fn parse_group(digits: &str) -> Result<u64> {
    digits.parse::<u64>().map_err(|_| {
        ReleaseError::version(format!("Version component out of range: {}", digits))
    })
}

/// Find all manifest files under `root`.
///
/// Order is the traversal order of the glob expansion. Paths whose
/// root-relative form matches an `exclude` pattern are skipped.
pub fn discover_manifests(root: &Path, config: &ManifestConfig) -> Result<Vec<PathBuf>> {
    let escaped_root = Pattern::escape(&root.to_string_lossy());
    let full_pattern = format!("{}/{}", escaped_root.trim_end_matches('/'), config.pattern);

    let excludes = config
        .exclude
        .iter()
        .map(|p| {
            Pattern::new(p)
                .map_err(|e| ReleaseError::glob(format!("invalid exclude pattern '{}': {}", p, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    let entries = glob::glob(&full_pattern).map_err(|e| {
        ReleaseError::glob(format!("invalid manifest pattern '{}': {}", config.pattern, e))
    })?;

    let mut manifests = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            ReleaseError::io(path, e.into_error())
        })?;
        if !path.is_file() {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(&path);
        if excludes.iter().any(|ex| ex.matches_path(relative)) {
            continue;
        }
        manifests.push(path);
    }

    Ok(manifests)
}

/// All manifest rewrites of a run, computed before anything is written
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestPlan {
    pub next_version: Version,
    pub updates: Vec<ManifestUpdate>,
}

impl ManifestPlan {
    pub fn changes(&self) -> impl Iterator<Item = &VersionChange> {
        self.updates.iter().flat_map(|u| u.changes.iter())
    }

    /// Write every changed manifest back when `execute` is set.
    ///
    /// Returns the number of files written. A failed write stops the run;
    /// files already written stay written.
    pub fn apply(&self, execute: bool) -> Result<usize> {
        if !execute {
            return Ok(0);
        }

        let mut written = 0;
        for update in self.updates.iter().filter(|u| u.is_changed()) {
            fs::write(&update.path, &update.updated)
                .map_err(|e| ReleaseError::io(&update.path, e))?;
            written += 1;
        }
        Ok(written)
    }
}

/// Read and rewrite every discovered manifest in memory.
///
/// Fails with [`ReleaseError::NoVersionFound`] when no manifest carries a
/// version line.
pub fn plan_manifest_updates(
    root: &Path,
    config: &ManifestConfig,
    level: ReleaseLevel,
) -> Result<ManifestPlan> {
    let rewriter = ManifestRewriter::new(level)?;
    let mut next_version: Option<Version> = None;
    let mut updates = Vec::new();

    for path in discover_manifests(root, config)? {
        let original = fs::read_to_string(&path).map_err(|e| ReleaseError::io(&path, e))?;
        let display_path = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        let (updated, changes) = rewriter.rewrite(&display_path, &original, &mut next_version)?;
        updates.push(ManifestUpdate {
            path,
            original,
            updated,
            changes,
        });
    }

    let next_version = next_version.ok_or_else(|| ReleaseError::NoVersionFound {
        pattern: config.pattern.clone(),
    })?;

    Ok(ManifestPlan {
        next_version,
        updates,
    })
}

/// What a manifest update run did
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestReport {
    pub next_version: Version,
    pub changes: Vec<VersionChange>,
    pub files_written: usize,
}

/// Plan, report and (when `execute` is set) write all manifest updates.
pub fn update_all_manifests(
    root: &Path,
    config: &ManifestConfig,
    level: ReleaseLevel,
    execute: bool,
) -> Result<ManifestReport> {
    let plan = plan_manifest_updates(root, config, level)?;

    for change in plan.changes() {
        ui::display_version_change(change);
    }

    let files_written = plan.apply(execute)?;

    Ok(ManifestReport {
        next_version: plan.next_version,
        changes: plan.changes().cloned().collect(),
        files_written,
    })
}
