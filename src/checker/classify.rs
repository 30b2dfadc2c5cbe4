use serde::Serialize;

use crate::matcher::{MatcherSet, TicketMatcher};
use crate::scanner::ScannedLine;

/// Outcome of classifying one work-comment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineStatus {
    /// No usable ticket reference.
    Violation,
    /// Carries an exclusion marker.
    Suppressed,
    /// References the ticket the current branch works on.
    TicketTracked,
    /// References some other ticket. Not reported.
    ReferencedOther,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine {
    #[serde(flatten)]
    pub line: ScannedLine,
    pub status: LineStatus,
    /// First work-comment keyword on the line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Ticket reference that decided the status, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl ClassifiedLine {
    #[must_use]
    pub fn is_violation(&self) -> bool {
        self.status == LineStatus::Violation
    }
}

/// Classify a single scanned line.
///
/// Pure: the same inputs always give the same result.
#[must_use]
pub fn classify(
    line: &ScannedLine,
    matchers: &MatcherSet,
    current_ticket_id: Option<&str>,
) -> ClassifiedLine {
    let keywords = matchers.keywords(&line.text);
    let keyword = keywords.first().map(|k| (*k).to_string());
    let classified = |status, reference: Option<&str>| ClassifiedLine {
        line: line.clone(),
        status,
        keyword: keyword.clone(),
        reference: reference.map(str::to_string),
    };

    if matchers.suppression().is_suppressed(&line.text, &keywords) {
        return classified(LineStatus::Suppressed, None);
    }

    let references = match matchers.ticket() {
        TicketMatcher::NoTicketPrefixesConfigured => {
            return classified(LineStatus::Violation, None);
        }
        ticket @ TicketMatcher::Pattern(_) => ticket.references(&line.text),
    };
    let Some(first) = references.first() else {
        return classified(LineStatus::Violation, None);
    };

    let tracked = current_ticket_id
        .filter(|id| !id.is_empty())
        .and_then(|id| references.iter().find(|r| r.contains(id)));
    match tracked {
        Some(reference) => classified(LineStatus::TicketTracked, Some(*reference)),
        None => classified(LineStatus::ReferencedOther, Some(*first)),
    }
}

/// Lines of one file that the report cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileClassification {
    pub violations: Vec<ClassifiedLine>,
    pub ticket_todos: Vec<ClassifiedLine>,
}

impl FileClassification {
    /// Classify every line of a file, keeping violations and ticket TODOs in line order.
    #[must_use]
    pub fn from_lines(
        lines: &[ScannedLine],
        matchers: &MatcherSet,
        current_ticket_id: Option<&str>,
    ) -> Self {
        lines
            .iter()
            .map(|line| classify(line, matchers, current_ticket_id))
            .fold(Self::default(), |mut acc, classified| {
                match classified.status {
                    LineStatus::Violation => acc.violations.push(classified),
                    LineStatus::TicketTracked => acc.ticket_todos.push(classified),
                    LineStatus::Suppressed | LineStatus::ReferencedOther => {}
                }
                acc
            })
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
