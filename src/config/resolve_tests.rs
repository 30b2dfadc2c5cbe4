use std::collections::HashMap;

use clap::Parser;

use super::*;

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["prevent-dangling-todos"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv)
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn no_env() -> impl Fn(&str) -> Option<String> {
    env_from(&[])
}

#[test]
fn parse_comma_separated_trims_and_drops_empty() {
    let parsed = parse_comma_separated(Some(" MYJIRA,,PROJECT, ")).unwrap();
    let items: Vec<_> = parsed.iter().map(String::as_str).collect();
    assert_eq!(items, vec!["MYJIRA", "PROJECT"]);
}

#[test]
fn parse_comma_separated_empty_is_none() {
    assert!(parse_comma_separated(None).is_none());
    assert!(parse_comma_separated(Some("")).is_none());
    assert!(parse_comma_separated(Some(" , ,")).is_none());
}

#[test]
fn defaults_apply_without_flags_or_env() {
    let config = resolve_config(&cli(&[]), no_env()).unwrap();

    assert!(config.ticket_prefixes.is_empty());
    assert_eq!(config.comment_prefixes.len(), DEFAULT_COMMENT_PREFIXES.len());
    assert!(!config.check_unstaged);
    assert!(!config.succeed_always);
    assert_eq!(config.empty_stage_policy, EmptyStagePolicy::RepositoryIsStaged);
}

#[test]
fn environment_supplies_prefixes() {
    let env = env_from(&[("JIRA_PREFIX", "MYJIRA,PROJECT"), ("COMMENT_PREFIX", "TODO,XXX")]);
    let config = resolve_config(&cli(&[]), env).unwrap();

    assert!(config.ticket_prefixes.contains("MYJIRA"));
    assert!(config.ticket_prefixes.contains("PROJECT"));
    let comments: Vec<_> = config.comment_prefixes.iter().map(String::as_str).collect();
    assert_eq!(comments, vec!["TODO", "XXX"]);
}

#[test]
fn flags_override_environment() {
    let env = env_from(&[("JIRA_PREFIX", "WRONGPREFIX"), ("COMMENT_PREFIX", "WRONGCOMMENT")]);
    let config = resolve_config(&cli(&["-j", "MYJIRA", "-c", "TODO"]), env).unwrap();

    let tickets: Vec<_> = config.ticket_prefixes.iter().map(String::as_str).collect();
    let comments: Vec<_> = config.comment_prefixes.iter().map(String::as_str).collect();
    assert_eq!(tickets, vec!["MYJIRA"]);
    assert_eq!(comments, vec!["TODO"]);
}

#[test]
fn blank_flag_falls_back_to_environment() {
    let env = env_from(&[("JIRA_PREFIX", "ENVJIRA")]);
    let config = resolve_config(&cli(&["-j", " , "]), env).unwrap();
    assert!(config.ticket_prefixes.contains("ENVJIRA"));
}

#[test]
fn boolean_environment_flags() {
    let env = env_from(&[("CHECK_UNSTAGED", "true"), ("SUCCEED_ALWAYS", "1")]);
    let config = resolve_config(&cli(&[]), env).unwrap();
    assert!(config.check_unstaged);
    assert!(config.succeed_always);

    let env = env_from(&[("CHECK_UNSTAGED", "0"), ("SUCCEED_ALWAYS", "no")]);
    let config = resolve_config(&cli(&[]), env).unwrap();
    assert!(!config.check_unstaged);
    assert!(!config.succeed_always);
}

#[test]
fn quiet_and_verbose_is_config_error() {
    let err = resolve_config(&cli(&["-q", "-v"]), no_env()).unwrap_err();
    assert!(matches!(err, TodoGuardError::Config(_)));
    assert!(err.to_string().contains("--quiet and --verbose are mutually exclusive"));
}

#[test]
fn ticket_id_flag_is_trimmed() {
    let config = resolve_config(&cli(&["--ticket-id", " PROJ-9 "]), no_env()).unwrap();
    assert_eq!(config.current_ticket_id.as_deref(), Some("PROJ-9"));

    let config = resolve_config(&cli(&["--ticket-id", "  "]), no_env()).unwrap();
    assert!(config.current_ticket_id.is_none());
}

#[test]
fn noqa_codes_overlay_defaults() {
    let config = resolve_config(
        &cli(&["--noqa-code", "BUG=FIX005", "--noqa-code", "TODO = TD002"]),
        no_env(),
    )
    .unwrap();

    assert_eq!(config.suppression_codes.get("BUG").map(String::as_str), Some("FIX005"));
    assert_eq!(config.suppression_codes.get("TODO").map(String::as_str), Some("TD002"));
    assert_eq!(config.suppression_codes.get("FIXME").map(String::as_str), Some("FIX001"));
}

#[test]
fn malformed_noqa_code_is_rejected() {
    assert!(resolve_config(&cli(&["--noqa-code", "TODO"]), no_env()).is_err());
    assert!(resolve_config(&cli(&["--noqa-code", "=FIX001"]), no_env()).is_err());
    assert!(resolve_config(&cli(&["--noqa-code", "TODO=FIX-1"]), no_env()).is_err());
}

#[test]
fn noqa_code_outside_marker_grammar_is_rejected() {
    let err = resolve_config(&cli(&["--noqa-code", "TODO=TD"]), no_env()).unwrap_err();
    assert!(err.to_string().contains("letters followed by digits"));
    assert!(resolve_config(&cli(&["--noqa-code", "TODO=1AB"]), no_env()).is_err());
}

#[test]
fn advisory_policy_maps_through() {
    let config = resolve_config(&cli(&["--empty-stage-policy", "advisory"]), no_env()).unwrap();
    assert_eq!(config.empty_stage_policy, EmptyStagePolicy::AdvisoryOnly);
}
