use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid regex pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Git error: {0}")]
    Git(String),

    #[error("External tool `{program}` unavailable: {reason}")]
    ExternalTool { program: String, reason: String },
}

impl TodoGuardError {
    /// Short category label used as the heading of error output.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Config",
            Self::FileRead { .. } => "FileRead",
            Self::InvalidPattern { .. } | Self::InvalidGlob { .. } => "Pattern",
            Self::Io(_) => "IO",
            Self::YamlParse(_) => "YAML",
            Self::JsonSerialize(_) => "JSON",
            Self::Git(_) => "Git",
            Self::ExternalTool { .. } => "ExternalTool",
        }
    }
}

pub type Result<T> = std::result::Result<T, TodoGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
