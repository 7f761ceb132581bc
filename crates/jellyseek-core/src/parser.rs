//! Playback-source label parser
//!
//! Media sources on a Jellyfin server usually carry a free-text name such as
//! `"Naruto S01E01 1080p [CHS][ENG]"`. This module extracts the resolution
//! and the bracketed language tags from such a label. Parsing is total:
//! any input yields a (possibly empty) `SourceLabel`, never an error.

use regex_lite::Regex;

/// Attributes extracted from a playback-source display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLabel {
    /// Resolution token, upper-cased (e.g. `"1080P"`, `"2160P"`).
    pub resolution: Option<String>,
    /// Bracketed language tags in order of appearance (e.g. `["CHS", "ENG"]`).
    /// Duplicates are preserved.
    pub languages: Vec<String>,
}

/// Parse a playback-source display name into its label attributes.
///
/// # Example
/// ```
/// use jellyseek_core::parser::parse_source_label;
///
/// let label = parse_source_label("Naruto 01 1080p [CHS][ENG]");
/// assert_eq!(label.resolution.as_deref(), Some("1080P"));
/// assert_eq!(label.languages, vec!["CHS", "ENG"]);
/// ```
pub fn parse_source_label(name: &str) -> SourceLabel {
    SourceLabel {
        resolution: extract_resolution(name),
        languages: extract_languages(name),
    }
}

/// Extract the first resolution token: a 3-4 digit number immediately
/// followed by `P`/`p`/`K`/`k`, upper-cased.
fn extract_resolution(name: &str) -> Option<String> {
    let re = Regex::new(r"\d{3,4}[PpKk]").ok()?;
    re.find(name).map(|m| m.as_str().to_ascii_uppercase())
}

/// Extract every bracketed tag of 2-3 uppercase letters, in order.
fn extract_languages(name: &str) -> Vec<String> {
    let Ok(re) = Regex::new(r"\[([A-Z]{2,3})\]") else {
        return Vec::new();
    };

    re.captures_iter(name)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}
