//! Builds a [`Config`] from command-line flags, environment variables and defaults.
//!
//! Precedence is flag > environment > default. Comma-separated lists are trimmed
//! and empty items dropped; a list with no items left counts as unset.

use indexmap::{IndexMap, IndexSet};

use crate::cli::{Cli, EmptyStageChoice};
use crate::error::{Result, TodoGuardError};
use crate::matcher::is_valid_code;

use super::model::{Config, DEFAULT_COMMENT_PREFIXES, EmptyStagePolicy, default_suppression_codes};

pub const ENV_JIRA_PREFIX: &str = "JIRA_PREFIX";
pub const ENV_COMMENT_PREFIX: &str = "COMMENT_PREFIX";
pub const ENV_CHECK_UNSTAGED: &str = "CHECK_UNSTAGED";
pub const ENV_SUCCEED_ALWAYS: &str = "SUCCEED_ALWAYS";

/// Resolve the effective configuration.
///
/// `env` looks up an environment variable; the binary passes `std::env::var`,
/// tests pass a map.
///
/// # Errors
/// Returns `TodoGuardError::Config` for malformed `--noqa-code` entries or when
/// the resolved configuration violates its invariants.
pub fn resolve_config<E>(cli: &Cli, env: E) -> Result<Config>
where
    E: Fn(&str) -> Option<String>,
{
    let ticket_prefixes = parse_comma_separated(cli.jira_prefix.as_deref())
        .or_else(|| parse_comma_separated(env(ENV_JIRA_PREFIX).as_deref()))
        .unwrap_or_default();

    let comment_prefixes = parse_comma_separated(cli.comment_prefix.as_deref())
        .or_else(|| parse_comma_separated(env(ENV_COMMENT_PREFIX).as_deref()))
        .unwrap_or_else(|| {
            DEFAULT_COMMENT_PREFIXES
                .iter()
                .map(|s| (*s).to_string())
                .collect()
        });

    let suppression_codes = parse_suppression_codes(&cli.noqa_codes)?;

    let config = Config {
        ticket_prefixes,
        comment_prefixes,
        suppression_codes,
        quiet: cli.quiet,
        verbose: cli.verbose,
        succeed_always: cli.succeed_always || env_flag(env(ENV_SUCCEED_ALWAYS).as_deref()),
        check_unstaged: cli.check_unstaged || env_flag(env(ENV_CHECK_UNSTAGED).as_deref()),
        current_ticket_id: cli
            .ticket_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string),
        empty_stage_policy: empty_stage_policy(cli.empty_stage_policy),
    };

    config.validate()?;
    Ok(config)
}

/// Split a comma-separated value into an ordered set of non-empty items.
///
/// Returns `None` if the input is absent or contains no items.
#[must_use]
pub fn parse_comma_separated(value: Option<&str>) -> Option<IndexSet<String>> {
    let parsed: IndexSet<String> = value?
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    if parsed.is_empty() { None } else { Some(parsed) }
}

fn env_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

/// Overlay `PREFIX=CODE` entries on the default suppression codes.
fn parse_suppression_codes(entries: &[String]) -> Result<IndexMap<String, String>> {
    let mut codes = default_suppression_codes();
    for entry in entries {
        let Some((keyword, code)) = entry.split_once('=') else {
            return Err(TodoGuardError::Config(format!(
                "invalid --noqa-code '{entry}': expected PREFIX=CODE"
            )));
        };
        let (keyword, code) = (keyword.trim(), code.trim());
        if keyword.is_empty() || code.is_empty() {
            return Err(TodoGuardError::Config(format!(
                "invalid --noqa-code '{entry}': prefix and code must be non-empty"
            )));
        }
        if !is_valid_code(code) {
            return Err(TodoGuardError::Config(format!(
                "invalid --noqa-code '{entry}': code must be letters followed by digits, e.g. FIX002"
            )));
        }
        codes.insert(keyword.to_string(), code.to_string());
    }
    Ok(codes)
}

const fn empty_stage_policy(choice: EmptyStageChoice) -> EmptyStagePolicy {
    match choice {
        EmptyStageChoice::Repository => EmptyStagePolicy::RepositoryIsStaged,
        EmptyStageChoice::Advisory => EmptyStagePolicy::AdvisoryOnly,
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
