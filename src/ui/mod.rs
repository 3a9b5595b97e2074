//! User interface module - terminal reporting for release runs.
//!
//! All output is produced by the `formatter` functions; this module only
//! re-exports them.

pub mod formatter;

pub use formatter::{
    display_changelog, display_error, display_mode, display_section, display_status,
    display_success, display_version_change, format_version_change,
};
