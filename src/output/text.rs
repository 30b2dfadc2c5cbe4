use std::fmt::Write;

use crate::checker::{ClassifiedLine, FileResult, Report, TicketTodo};
use crate::config::{Config, Verbosity};
use crate::error::Result;

use super::{ColorMode, OutputFormatter, ansi};

/// Comment styles used for the remediation examples.
const HINT_EXAMPLES: &[(&str, &str, &str)] = &[
    ("//", "Implement user authentication", ""),
    ("#", "Handle edge case for empty input", ""),
    ("/*", "Temporary workaround for API issue", " */"),
];

/// Human-readable report in quiet, standard or verbose form.
pub struct TextFormatter {
    use_colors: bool,
    verbosity: Verbosity,
    ticket_prefixes: Vec<String>,
    comment_prefixes: Vec<String>,
    notes: Vec<String>,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode, config: &Config) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbosity: config.verbosity(),
            ticket_prefixes: config.ticket_prefixes.iter().cloned().collect(),
            comment_prefixes: config.comment_prefixes.iter().cloned().collect(),
            notes: Vec::new(),
        }
    }

    /// Extra line shown under the verbose header.
    #[must_use]
    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.notes.extend(note);
        self
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                std::env::var_os("NO_COLOR").is_none()
                    && std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    fn reference_display(&self) -> String {
        if self.ticket_prefixes.is_empty() {
            return "no ticket prefixes configured".to_string();
        }
        self.ticket_prefixes
            .iter()
            .map(|p| format!("{p}-XXXX"))
            .collect::<Vec<_>>()
            .join("|")
    }

    fn write_header(&self, out: &mut String) {
        if self.ticket_prefixes.is_empty() {
            writeln!(
                out,
                "🔍 Checking work comments for Jira references (no ticket prefixes configured: all work comments are disallowed)"
            )
            .ok();
        } else {
            writeln!(
                out,
                "🔍 Checking work comments for Jira references to projects {}...",
                self.ticket_prefixes.join(", ")
            )
            .ok();
        }
        writeln!(out, "   Checking for: {}", self.comment_prefixes.join(", ")).ok();
        for note in &self.notes {
            writeln!(out, "{note}").ok();
        }
    }

    fn write_violation_lines(&self, out: &mut String, file: &FileResult) {
        for v in &file.violations {
            let line = format!("{}:{}: {}", file.path.display(), v.line.line_number, v.line.text);
            if file.is_staged {
                writeln!(out, "{}", self.paint(ansi::RED, &format!("❌ {line}"))).ok();
            } else {
                writeln!(out, "{}", self.paint(ansi::YELLOW, &format!("⚠️  {line} (unstaged)")))
                    .ok();
            }
        }
    }

    fn write_file_status(&self, out: &mut String, file: &FileResult) {
        let path = file.path.display();
        if file.is_clean {
            writeln!(out, "{}", self.paint(ansi::GREEN, &format!("✅ {path}"))).ok();
            return;
        }
        let reason = if self.ticket_prefixes.is_empty() {
            "Work comment not allowed".to_string()
        } else {
            format!("Work comment missing Jira reference ({})", self.reference_display())
        };
        let heading = if file.is_staged {
            self.paint(ansi::RED, &format!("❌ {path} - {reason}:"))
        } else {
            self.paint(ansi::YELLOW, &format!("⚠️  {path} (unstaged) - {reason}:"))
        };
        writeln!(out, "{heading}").ok();
        for v in &file.violations {
            write_numbered(out, v);
        }
    }

    fn write_ticket_todos(&self, out: &mut String, report: &Report) {
        if report.ticket_todos.is_empty() {
            return;
        }
        let ticket = report.current_ticket_id.as_deref().unwrap_or("current");
        if !out.is_empty() {
            writeln!(out).ok();
        }
        writeln!(
            out,
            "{}",
            self.paint(
                ansi::CYAN,
                &format!("⚠️  Unresolved TODOs for current branch ticket {ticket}:")
            )
        )
        .ok();
        for todo in &report.ticket_todos {
            write_ticket_todo(out, todo);
        }
    }

    fn write_hint(&self, out: &mut String) {
        writeln!(out).ok();
        let Some(first) = self.ticket_prefixes.first() else {
            writeln!(
                out,
                "💡 No ticket prefixes are configured, so every work comment is disallowed."
            )
            .ok();
            writeln!(out, "   Resolve or remove these comments before committing.").ok();
            return;
        };

        writeln!(out, "💡 Please add Jira issue references to work comments like:").ok();
        for (i, (keyword, (opener, text, closer))) in
            self.comment_prefixes.iter().zip(HINT_EXAMPLES).enumerate()
        {
            writeln!(out, "   {opener} {keyword} {first}-{}: {text}{closer}", 123 + i).ok();
        }
        if self.ticket_prefixes.len() > 1 {
            writeln!(out, "   (Also valid: {})", self.ticket_prefixes[1..].join(", ")).ok();
        }
    }

    fn write_summary(&self, out: &mut String, report: &Report) {
        if report.has_blocking {
            self.write_hint(out);
            return;
        }
        let advisory = report.advisory_count();
        if advisory == 0 {
            writeln!(
                out,
                "{}",
                self.paint(ansi::GREEN, "✅ All work comments have proper Jira references")
            )
            .ok();
        } else {
            writeln!(
                out,
                "{}",
                self.paint(
                    ansi::GREEN,
                    &format!("✅ No blocking violations ({advisory} advisory in unstaged files)")
                )
            )
            .ok();
        }
    }

    fn format_standard(&self, report: &Report) -> String {
        let mut out = String::new();
        for file in &report.files {
            self.write_violation_lines(&mut out, file);
        }
        self.write_ticket_todos(&mut out, report);
        out
    }

    fn format_verbose(&self, report: &Report) -> String {
        let mut out = String::new();
        self.write_header(&mut out);
        if report.files.is_empty() {
            writeln!(out, "   No files to check").ok();
            return out;
        }
        for file in &report.files {
            self.write_file_status(&mut out, file);
        }
        self.write_ticket_todos(&mut out, report);
        self.write_summary(&mut out, report);
        out
    }
}

fn write_numbered(out: &mut String, line: &ClassifiedLine) {
    writeln!(out, "   {}: {}", line.line.line_number, line.line.text).ok();
}

fn write_ticket_todo(out: &mut String, todo: &TicketTodo) {
    let marker = if todo.is_staged { "" } else { " (unstaged)" };
    writeln!(
        out,
        "   {}:{}: {}{marker}",
        todo.line.line.path.display(),
        todo.line.line.line_number,
        todo.line.line.text
    )
    .ok();
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        Ok(match self.verbosity {
            Verbosity::Quiet => String::new(),
            Verbosity::Standard => self.format_standard(report),
            Verbosity::Verbose => self.format_verbose(report),
        })
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
