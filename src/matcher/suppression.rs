use indexmap::IndexMap;
use regex::Regex;

use crate::error::Result;

use super::compile_regex;

/// Trailing `noqa` marker opened by its own comment token, optionally qualified
/// with codes: `# noqa: FIX002, FIX001`.
const MARKER_PATTERN: &str = r"(?:#|//|/\*|--|<!--|;)[ \t]*(?i:noqa)(?::[ \t]*(?P<codes>[A-Za-z]+[0-9]+(?:[ \t]*,[ \t]*[A-Za-z]+[0-9]+)*))?[ \t]*(?:\*/|-->)?[ \t]*$";

/// Code grammar accepted inside a qualified marker: letters followed by digits.
#[must_use]
pub fn is_valid_code(code: &str) -> bool {
    let digits = code.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    digits.len() < code.len() && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Decides whether a line carries an explicit exclusion marker.
///
/// A bare marker silences the whole line. A qualified marker only silences it when
/// one of its codes is mapped to a keyword that appears on that line.
#[derive(Debug, Clone)]
pub struct SuppressionMatcher {
    marker: Regex,
    codes: IndexMap<String, String>,
}

impl SuppressionMatcher {
    /// # Errors
    /// Returns an error if the marker pattern fails to compile.
    pub fn new(codes: IndexMap<String, String>) -> Result<Self> {
        Ok(Self {
            marker: compile_regex(MARKER_PATTERN)?,
            codes,
        })
    }

    #[must_use]
    pub fn code_for(&self, keyword: &str) -> Option<&str> {
        self.codes.get(keyword).map(String::as_str)
    }

    #[must_use]
    pub fn is_suppressed(&self, line: &str, keywords: &[&str]) -> bool {
        let Some(caps) = self.marker.captures(line) else {
            return false;
        };
        let Some(codes) = caps.name("codes") else {
            return true;
        };

        codes.as_str().split(',').map(str::trim).any(|code| {
            keywords.iter().any(|keyword| {
                self.code_for(keyword)
                    .is_some_and(|mapped| mapped.eq_ignore_ascii_case(code))
            })
        })
    }
}
