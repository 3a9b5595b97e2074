//! Changelog updater.
//!
//! Turns the `[Unreleased]` section of a keep-a-changelog style document into
//! a dated release section and re-seeds a fresh unreleased section above it.
//! The rewrite is an ordered list of literal-marker [`Rule`]s; a marker that
//! is absent leaves the document unchanged for that rule.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::domain::Version;
use crate::error::{ReleaseError, Result};
use crate::ui;

pub const UNRELEASED_MARKER: &str = "[Unreleased]";
pub const HEAD_LINK_MARKER: &str = "...HEAD";
pub const RELEASE_DATE_MARKER: &str = "ReleaseDate";
pub const NEXT_HEADER_MARKER: &str = "<!-- next-header -->";
pub const NEXT_URL_MARKER: &str = "<!-- next-url -->";

/// Block that replaces the next-header marker. It keeps the marker so the
/// next release can find it again.
pub const NEXT_HEADER_TEMPLATE: &str = "<!-- next-header -->\n\n\
## [Unreleased] - ReleaseDate\n\n\
### Added\n\n\
### Changed\n\n\
### Removed\n";

/// A literal substitution over the whole document
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub marker: String,
    pub replacement: String,
    /// Maximum number of occurrences to replace; `None` replaces all
    pub limit: Option<usize>,
}

impl Rule {
    pub fn first(marker: impl Into<String>, replacement: impl Into<String>) -> Self {
        Rule {
            marker: marker.into(),
            replacement: replacement.into(),
            limit: Some(1),
        }
    }

    pub fn every(marker: impl Into<String>, replacement: impl Into<String>) -> Self {
        Rule {
            marker: marker.into(),
            replacement: replacement.into(),
            limit: None,
        }
    }

    pub fn apply(&self, text: &str) -> String {
        match self.limit {
            Some(n) => text.replacen(&self.marker, &self.replacement, n),
            None => text.replace(&self.marker, &self.replacement),
        }
    }
}

/// Build the release rewrite rules, in application order.
///
/// The `[Unreleased]` rule is unbounded so the section heading and its link
/// label are both renamed; every other rule touches the first occurrence only.
pub fn release_rules(
    version: &Version,
    tag: &str,
    date: NaiveDate,
    compare_url: &str,
) -> Vec<Rule> {
    let next_url = format!(
        "{}\n\n[Unreleased]: {}/{}...HEAD",
        NEXT_URL_MARKER,
        compare_url.trim_end_matches('/'),
        tag
    );

    vec![
        Rule::every(UNRELEASED_MARKER, format!("[{}]", version)),
        Rule::first(HEAD_LINK_MARKER, format!("[{}]", tag)),
        Rule::first(RELEASE_DATE_MARKER, date.format("%Y-%m-%d").to_string()),
        Rule::first(NEXT_HEADER_MARKER, NEXT_HEADER_TEMPLATE),
        Rule::first(NEXT_URL_MARKER, next_url),
    ]
}

/// Apply rules in order, each over the output of the previous one.
pub fn apply_rules(text: &str, rules: &[Rule]) -> String {
    rules
        .iter()
        .fold(text.to_string(), |document, rule| rule.apply(&document))
}

/// Pure changelog transform for a given release date.
pub fn render_release(
    text: &str,
    version: &Version,
    tag: &str,
    date: NaiveDate,
    compare_url: &str,
) -> String {
    apply_rules(text, &release_rules(version, tag, date, compare_url))
}

/// Rewrite the changelog at `path` for a release dated today.
///
/// The transformed document is always printed; it is written back only when
/// `execute` is set. Returns the transformed text.
pub fn update_changelog(
    path: &Path,
    version: &Version,
    tag: &str,
    compare_url: &str,
    execute: bool,
) -> Result<String> {
    let original = fs::read_to_string(path).map_err(|e| ReleaseError::io(path, e))?;
    let today = chrono::Local::now().date_naive();
    let updated = render_release(&original, version, tag, today, compare_url);

    ui::display_changelog(&updated);

    if execute {
        fs::write(path, &updated).map_err(|e| ReleaseError::io(path, e))?;
    }

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPARE: &str = "https://github.com/acme/widgets/compare";

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn sample() -> &'static str {
        "# Changelog\n\
\n\
<!-- next-header -->\n\
\n\
## [Unreleased] - ReleaseDate\n\
\n\
### Added\n\
\n\
- Shiny thing\n\
\n\
## [1.2.3] - 2024-01-01\n\
\n\
<!-- next-url -->\n\
[Unreleased]: https://github.com/acme/widgets/compare/v1.2.3...HEAD\n\
[1.2.3]: https://github.com/acme/widgets/compare/v1.2.2...v1.2.3\n"
    }

    #[test]
    fn test_full_release_rewrite() {
        let out = render_release(sample(), &Version::new(1, 3, 0), "v1.3.0", date(), COMPARE);
        let expected = "# Changelog\n\
\n\
<!-- next-header -->\n\
\n\
## [Unreleased] - ReleaseDate\n\
\n\
### Added\n\
\n\
### Changed\n\
\n\
### Removed\n\
\n\
\n\
## [1.3.0] - 2024-03-09\n\
\n\
### Added\n\
\n\
- Shiny thing\n\
\n\
## [1.2.3] - 2024-01-01\n\
\n\
<!-- next-url -->\n\
\n\
[Unreleased]: https://github.com/acme/widgets/compare/v1.3.0...HEAD\n\
[1.3.0]: https://github.com/acme/widgets/compare/v1.2.3[v1.3.0]\n\
[1.2.3]: https://github.com/acme/widgets/compare/v1.2.2...v1.2.3\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_only_first_release_date_is_stamped() {
        let text = "## [Unreleased] - ReleaseDate\nReleaseDate\n";
        let out = render_release(text, &Version::new(0, 2, 0), "v0.2.0", date(), COMPARE);
        assert_eq!(out, "## [0.2.0] - 2024-03-09\nReleaseDate\n");
    }

    #[test]
    fn test_missing_markers_are_noops() {
        let text = "# Changelog\n\nNothing to see here.\n";
        let out = render_release(text, &Version::new(1, 0, 0), "v1.0.0", date(), COMPARE);
        assert_eq!(out, text);
    }

    #[test]
    fn test_absent_unreleased_leaves_other_rules_working() {
        let text = "## 1.0.0 - ReleaseDate\n[a]: x...HEAD\n";
        let out = render_release(text, &Version::new(1, 0, 0), "v1.0.0", date(), COMPARE);
        assert_eq!(out, "## 1.0.0 - 2024-03-09\n[a]: x[v1.0.0]\n");
    }

    #[test]
    fn test_compare_url_trailing_slash_trimmed() {
        let out = render_release(
            "<!-- next-url -->",
            &Version::new(1, 0, 0),
            "v1.0.0",
            date(),
            "https://example.com/compare/",
        );
        assert_eq!(
            out,
            "<!-- next-url -->\n\n[Unreleased]: https://example.com/compare/v1.0.0...HEAD"
        );
    }

    #[test]
    fn test_rule_limits() {
        assert_eq!(Rule::first("a", "b").apply("aaa"), "baa");
        assert_eq!(Rule::every("a", "b").apply("aaa"), "bbb");
        let two = Rule {
            marker: "a".to_string(),
            replacement: "b".to_string(),
            limit: Some(2),
        };
        assert_eq!(two.apply("aaa"), "bba");
    }

    #[test]
    fn test_rules_apply_in_order() {
        let rules = vec![Rule::first("x", "y"), Rule::first("y", "z")];
        assert_eq!(apply_rules("x", &rules), "z");
    }
}
