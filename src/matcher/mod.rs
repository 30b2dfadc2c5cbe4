//! Compiled matchers for work-comment keywords, ticket references and
//! suppression markers.

mod suppression;

pub use suppression::{SuppressionMatcher, is_valid_code};

use regex::Regex;

use crate::config::Config;
use crate::error::{Result, TodoGuardError};

/// Ticket reference matcher, or the explicit absence of one.
#[derive(Debug, Clone)]
pub enum TicketMatcher {
    /// No prefixes configured: no reference can satisfy the check.
    NoTicketPrefixesConfigured,
    /// `PREFIX-123` for any configured prefix, tried in configured order.
    Pattern(Regex),
}

impl TicketMatcher {
    /// All ticket references on the line, left to right.
    #[must_use]
    pub fn references<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Self::NoTicketPrefixesConfigured => Vec::new(),
            Self::Pattern(re) => re.find_iter(line).map(|m| m.as_str()).collect(),
        }
    }
}

/// Everything the classifier needs, derived once from a [`Config`].
#[derive(Debug, Clone)]
pub struct MatcherSet {
    comment: Regex,
    ticket: TicketMatcher,
    suppression: SuppressionMatcher,
}

impl MatcherSet {
    /// Build all matchers for `config`.
    ///
    /// # Errors
    /// Returns `TodoGuardError::InvalidPattern` if a generated pattern fails to compile.
    pub fn compile(config: &Config) -> Result<Self> {
        let comment = compile_regex(&comment_pattern(config.comment_prefixes.iter()))?;

        let ticket = if config.disallows_all_comments() {
            TicketMatcher::NoTicketPrefixesConfigured
        } else {
            TicketMatcher::Pattern(compile_regex(&ticket_pattern(
                config.ticket_prefixes.iter(),
            ))?)
        };

        let suppression = SuppressionMatcher::new(config.suppression_codes.clone())?;

        Ok(Self {
            comment,
            ticket,
            suppression,
        })
    }

    /// Source of the keyword alternation, shared with external line searchers.
    #[must_use]
    pub fn comment_pattern(&self) -> &str {
        self.comment.as_str()
    }

    #[must_use]
    pub fn is_work_comment(&self, line: &str) -> bool {
        self.comment.is_match(line)
    }

    /// Keywords present on the line, left to right.
    #[must_use]
    pub fn keywords<'a>(&self, line: &'a str) -> Vec<&'a str> {
        self.comment.find_iter(line).map(|m| m.as_str()).collect()
    }

    #[must_use]
    pub const fn ticket(&self) -> &TicketMatcher {
        &self.ticket
    }

    #[must_use]
    pub const fn suppression(&self) -> &SuppressionMatcher {
        &self.suppression
    }
}

/// Whole-word alternation over the comment keywords.
fn comment_pattern<'a>(prefixes: impl Iterator<Item = &'a String>) -> String {
    let alternation: Vec<_> = prefixes.map(|p| regex::escape(p)).collect();
    format!(r"\b(?:{})\b", alternation.join("|"))
}

/// Whole-token `PREFIX-<digits>` alternation.
fn ticket_pattern<'a>(prefixes: impl Iterator<Item = &'a String>) -> String {
    let alternation: Vec<_> = prefixes.map(|p| regex::escape(p)).collect();
    format!(r"\b(?:{})-\d+\b", alternation.join("|"))
}

pub(crate) fn compile_regex(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| TodoGuardError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
