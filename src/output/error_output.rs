//! Error and warning lines on stderr.
//!
//! Format: `✖ {type}: {message}` or `⚠ Warning: {message}`, followed by an
//! optional `× {detail}` line and an optional `help: {suggestion}` line.

use std::error::Error as _;
use std::io::{IsTerminal, Write};

use crate::error::TodoGuardError;

use super::ColorMode;
use super::ansi;

/// Stderr diagnostics writer.
pub struct ErrorOutput {
    use_colors: bool,
}

impl ErrorOutput {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        let use_colors = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => Self::stderr_supports_color(),
        };
        Self { use_colors }
    }

    /// Auto-detects color support on stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(ColorMode::Auto)
    }

    fn stderr_supports_color() -> bool {
        // https://no-color.org: presence of the variable disables color
        std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
    }

    pub fn print_warning(&self, message: &str, detail: Option<&str>, suggestion: Option<&str>) {
        let mut stderr = std::io::stderr().lock();
        self.write_warning(&mut stderr, message, detail, suggestion);
    }

    /// Writes an error block. Write failures are ignored: stderr is the last resort.
    pub fn write_error<W: Write>(
        &self,
        w: &mut W,
        error_type: &str,
        message: &str,
        detail: Option<&str>,
        suggestion: Option<&str>,
    ) {
        let heading = format!("✖ {error_type}:");
        self.write_block(w, &heading, ansi::RED, message, detail, suggestion);
    }

    pub fn write_warning<W: Write>(
        &self,
        w: &mut W,
        message: &str,
        detail: Option<&str>,
        suggestion: Option<&str>,
    ) {
        self.write_block(w, "⚠ Warning:", ansi::YELLOW, message, detail, suggestion);
    }

    /// Writes a `TodoGuardError`, using its source as the detail line.
    pub fn write_todo_guard_error<W: Write>(
        &self,
        w: &mut W,
        error: &TodoGuardError,
        suggestion: Option<&str>,
    ) {
        let detail = error.source().map(ToString::to_string);
        self.write_error(
            w,
            error.error_type(),
            &error.to_string(),
            detail.as_deref(),
            suggestion,
        );
    }

    fn write_block<W: Write>(
        &self,
        w: &mut W,
        heading: &str,
        color: &str,
        message: &str,
        detail: Option<&str>,
        suggestion: Option<&str>,
    ) {
        if self.use_colors {
            let _ = writeln!(w, "{}{color}{heading}{} {message}", ansi::BOLD, ansi::RESET);
        } else {
            let _ = writeln!(w, "{heading} {message}");
        }

        if let Some(d) = detail {
            if self.use_colors {
                let _ = writeln!(w, "  {}× {d}{}", ansi::DIM, ansi::RESET);
            } else {
                let _ = writeln!(w, "  × {d}");
            }
        }

        if let Some(s) = suggestion {
            if self.use_colors {
                let _ = writeln!(w, "  {}help:{} {s}", ansi::CYAN, ansi::RESET);
            } else {
                let _ = writeln!(w, "  help: {s}");
            }
        }
    }

    #[cfg(test)]
    pub const fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }
}

impl Default for ErrorOutput {
    fn default() -> Self {
        Self::stderr()
    }
}

/// Prints a `TodoGuardError` with auto-detected colors.
pub fn print_error(error: &TodoGuardError, suggestion: Option<&str>) {
    let mut stderr = std::io::stderr().lock();
    ErrorOutput::stderr().write_todo_guard_error(&mut stderr, error, suggestion);
}

/// Prints a warning with auto-detected colors.
pub fn print_warning(message: &str) {
    ErrorOutput::stderr().print_warning(message, None, None);
}

#[cfg(test)]
#[path = "error_output_tests.rs"]
mod tests;
