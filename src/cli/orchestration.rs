//! Main release workflow orchestration logic
//!
//! Keeps the pipeline callable without clap: the binary maps its parsed
//! arguments into [`ReleaseArgs`] and hands them to [`run_release`].

use std::path::PathBuf;

use crate::changelog;
use crate::config;
use crate::domain::{ReleaseLevel, Version};
use crate::error::Result;
use crate::manifest;
use crate::ui;

/// Arguments for the release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseArgs {
    /// Which version component to bump
    pub level: ReleaseLevel,

    /// Release tag name used for the changelog comparison links
    pub tag: String,

    /// Write files instead of previewing
    pub execute: bool,

    /// Directory containing the manifests and changelog
    pub root: PathBuf,

    /// Path to custom config file
    pub config_path: Option<PathBuf>,
}

/// Result of a release run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    /// The version every manifest now declares (or would declare)
    pub version: Version,

    /// The tag the changelog links point at
    pub tag: String,

    /// Number of manifest files written (0 in a dry run)
    pub manifests_written: usize,

    /// Whether the changelog was written back
    pub changelog_written: bool,

    /// The rewritten changelog text
    pub changelog: String,
}

/// Main release workflow
///
/// 1. Load configuration
/// 2. Bump every manifest to the next version
/// 3. Rewrite the changelog for that version and tag
pub fn run_release(args: &ReleaseArgs) -> Result<ReleaseOutcome> {
    let config = config::load_config(&args.root, args.config_path.as_deref())?;

    ui::display_mode(args.execute);

    ui::display_status("Updating Cargo.toml files");
    let report =
        manifest::update_all_manifests(&args.root, &config.manifests, args.level, args.execute)?;

    ui::display_section("Updating changelog");
    let changelog_path = args.root.join(&config.changelog.path);
    let changelog = changelog::update_changelog(
        &changelog_path,
        &report.next_version,
        &args.tag,
        &config.changelog.compare_url,
        args.execute,
    )?;

    if args.execute {
        ui::display_success(&format!(
            "Released {} ({} manifests updated)",
            report.next_version, report.files_written
        ));
    } else {
        ui::display_success(&format!(
            "Dry run complete for {}; rerun with --execute to write files",
            report.next_version
        ));
    }

    Ok(ReleaseOutcome {
        version: report.next_version,
        tag: args.tag.clone(),
        manifests_written: report.files_written,
        changelog_written: args.execute,
        changelog,
    })
}
