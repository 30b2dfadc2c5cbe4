mod file_types;
mod model;
mod project;
mod resolve;

pub use file_types::tags_for_path;
pub use model::{
    Config, DEFAULT_COMMENT_PREFIXES, DEFAULT_SUPPRESSION_CODES, EmptyStagePolicy, Verbosity,
    default_suppression_codes,
};
pub use project::{ConfigFilter, HOOK_ID, NoFilter, PreCommitFilter};
pub use resolve::{
    ENV_CHECK_UNSTAGED, ENV_COMMENT_PREFIX, ENV_JIRA_PREFIX, ENV_SUCCEED_ALWAYS,
    parse_comma_separated, resolve_config,
};
