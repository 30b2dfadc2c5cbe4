use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Treatment of repository files when no files were passed on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum EmptyStageChoice {
    /// The whole repository counts as staged: violations fail the run
    #[default]
    Repository,
    /// Violations in discovered files are only reported as warnings
    Advisory,
}

#[derive(Parser, Debug)]
#[command(name = "prevent-dangling-todos")]
#[command(
    author,
    version,
    about = "Check source files for TODO/FIXME comments without Jira issue references"
)]
#[command(long_about = "Check source files for TODO/FIXME comments without Jira issue references.\n\n\
    This tool helps maintain code quality by ensuring all work comments \
    (TODO, FIXME, etc.) are properly linked to tracking issues.\n\n\
    Configuration can be provided via command line arguments or environment variables:\n  \
    JIRA_PREFIX=PREFIX1,PREFIX2,PREFIX3\n  \
    COMMENT_PREFIX=TODO,FIXME,XXX\n  \
    CHECK_UNSTAGED=1\n  \
    SUCCEED_ALWAYS=1\n\n\
    Command line arguments take precedence over environment variables.\n\n\
    Exit codes:\n  \
    0 - No blocking violations\n  \
    1 - Work comments without ticket references found\n  \
    2 - Configuration error")]
#[command(after_help = "Examples:\n  \
    prevent-dangling-todos -j MYJIRA file1.py file2.js\n  \
    prevent-dangling-todos --jira-prefix MYJIRA,PROJECT,TEAM file.py\n  \
    prevent-dangling-todos -j MYJIRA -c TODO,FIXME src/*.js\n  \
    JIRA_PREFIX=MYJIRA prevent-dangling-todos --check-unstaged")]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Source files to check for dangling work comments
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Jira project prefix(es), comma-separated (e.g. MYJIRA,PROJECT)
    #[arg(short = 'j', long, value_name = "PREFIXES")]
    pub jira_prefix: Option<String>,

    /// Comment prefix(es) to check, comma-separated
    /// [default: TODO,FIXME,XXX,HACK,BUG,REVIEW,OPTIMIZE,REFACTOR]
    #[arg(short = 'c', long, value_name = "PREFIXES")]
    pub comment_prefix: Option<String>,

    /// Print nothing; only the exit code reports violations
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode: show configuration, per-file status and remediation tips
    #[arg(short, long)]
    pub verbose: bool,

    /// Always exit with code 0, even when dangling TODOs are found
    #[arg(long)]
    pub succeed_always: bool,

    /// Also scan tracked files that were not passed in (reported as warnings)
    #[arg(short = 'u', long)]
    pub check_unstaged: bool,

    /// Ticket the current work belongs to (skips branch detection)
    #[arg(long, value_name = "ID")]
    pub ticket_id: Option<String>,

    /// Do not derive the current ticket from the git branch name
    #[arg(long)]
    pub no_branch_detection: bool,

    /// How to treat repository files when no files are given
    #[arg(long, value_enum, default_value = "repository")]
    pub empty_stage_policy: EmptyStageChoice,

    /// Map a comment prefix to the noqa code that suppresses it (repeatable)
    #[arg(long = "noqa-code", value_name = "PREFIX=CODE")]
    pub noqa_codes: Vec<String>,

    /// Pre-commit configuration supplying include/exclude/types filters
    #[arg(long, value_name = "PATH", default_value = ".pre-commit-config.yaml")]
    pub project_config: PathBuf,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorChoice,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
