use serde::Serialize;

use crate::checker::{FileResult, Report, TicketTodo};
use crate::error::Result;

use super::OutputFormatter;

/// Machine-readable report.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    files: &'a [FileResult],
    ticket_todos: &'a [TicketTodo],
    #[serde(skip_serializing_if = "Option::is_none")]
    current_ticket_id: Option<&'a str>,
}

#[derive(Serialize)]
struct Summary {
    total_files: usize,
    clean_files: usize,
    blocking_violations: usize,
    advisory_violations: usize,
    ticket_todos: usize,
    has_blocking: bool,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let output = JsonOutput {
            summary: Summary {
                total_files: report.files.len(),
                clean_files: report.files.iter().filter(|f| f.is_clean).count(),
                blocking_violations: report.blocking_count(),
                advisory_violations: report.advisory_count(),
                ticket_todos: report.ticket_todos.len(),
                has_blocking: report.has_blocking,
            },
            files: &report.files,
            ticket_todos: &report.ticket_todos,
            current_ticket_id: report.current_ticket_id.as_deref(),
        };

        let mut json = serde_json::to_string_pretty(&output)?;
        json.push('\n');
        Ok(json)
    }
}
