use std::path::Path;

use crate::EXIT_CONFIG_ERROR;
use crate::checker::{Report, TodoChecker};
use crate::cli::{Cli, ColorChoice};
use crate::config::{Config, ConfigFilter, NoFilter, PreCommitFilter, resolve_config};
use crate::error::{Result, TodoGuardError};
use crate::git::{
    BranchResolver, GitBranchResolver, GitIndexLister, RepositoryFileLister, TicketContext,
};
use crate::output::{
    ColorMode, ErrorOutput, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter,
    print_error, print_warning,
};
use crate::scanner::{BatchScanner, FileReader, LineSearcher, RealFileReader, RipgrepSearcher};

/// Collaborators the check talks to, injectable for tests.
pub struct CheckContext<'a> {
    pub reader: &'a dyn FileReader,
    pub searcher: &'a dyn LineSearcher,
    pub lister: &'a dyn RepositoryFileLister,
    pub branch: &'a dyn BranchResolver,
}

#[must_use]
pub fn run_check(cli: &Cli) -> i32 {
    let lister = match GitIndexLister::new(".") {
        Ok(lister) => lister,
        Err(e) => return report_error(&e),
    };
    let searcher = RipgrepSearcher::default();
    let branch = GitBranchResolver::new(".");
    let ctx = CheckContext {
        reader: &RealFileReader,
        searcher: &searcher,
        lister: &lister,
        branch: &branch,
    };

    match run_check_impl(cli, |name| std::env::var(name).ok(), &ctx) {
        Ok(exit_code) => exit_code,
        Err(e) => report_error(&e),
    }
}

fn report_error(error: &TodoGuardError) -> i32 {
    let suggestion = matches!(error, TodoGuardError::Config(_))
        .then_some("Run 'prevent-dangling-todos --help' for the accepted options");
    print_error(error, suggestion);
    EXIT_CONFIG_ERROR
}

pub(crate) fn run_check_impl<E>(cli: &Cli, env: E, ctx: &CheckContext<'_>) -> Result<i32>
where
    E: Fn(&str) -> Option<String>,
{
    let mut config = resolve_config(cli, env)?;

    if config.quiet && config.succeed_always {
        ErrorOutput::stderr().print_warning(
            "Using --quiet with --succeed-always may reduce visibility of TODO violations",
            None,
            Some("Use only --succeed-always if you want to see violation details"),
        );
    }

    let ticket = resolve_ticket(cli, &config, ctx.branch);
    config.current_ticket_id = ticket.ticket().map(str::to_string);

    let filter = load_filter(&cli.project_config);
    let scanner = BatchScanner::new(ctx.reader).with_accelerated(ctx.searcher);
    let checker = TodoChecker::new(&config, scanner)?
        .with_lister(ctx.lister)
        .with_filter(filter.as_ref());
    let report = checker.check(&cli.files);

    let note = if config.disallows_all_comments() {
        None
    } else {
        ticket.note()
    };
    let output = format_report(&report, &config, cli, note)?;
    write_output(&output, config.quiet);

    Ok(report.exit_code)
}

/// Ticket the current work belongs to: `--ticket-id`, else the branch name.
fn resolve_ticket(cli: &Cli, config: &Config, branch: &dyn BranchResolver) -> TicketContext {
    let resolver = if cli.no_branch_detection || config.disallows_all_comments() {
        None
    } else {
        Some(branch)
    };
    TicketContext::resolve(
        config.current_ticket_id.as_deref(),
        resolver,
        &config.ticket_prefixes,
    )
}

/// Project filter, degrading to no filtering when the file is absent or broken.
fn load_filter(path: &Path) -> Box<dyn ConfigFilter> {
    match PreCommitFilter::load(path) {
        Ok(Some(filter)) => Box::new(filter),
        Ok(None) => Box::new(NoFilter),
        Err(e) => {
            print_warning(&format!(
                "Ignoring project configuration {}: {e}",
                path.display()
            ));
            Box::new(NoFilter)
        }
    }
}

fn format_report(
    report: &Report,
    config: &Config,
    cli: &Cli,
    note: Option<String>,
) -> Result<String> {
    match cli.format {
        OutputFormat::Text => TextFormatter::new(color_choice_to_mode(cli.color), config)
            .with_note(note)
            .format(report),
        OutputFormat::Json => JsonFormatter.format(report),
    }
}

fn write_output(content: &str, quiet: bool) {
    if !quiet && !content.is_empty() {
        print!("{content}");
    }
}

pub(crate) const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
