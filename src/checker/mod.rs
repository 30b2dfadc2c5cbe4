mod classify;
mod engine;
mod report;

pub use classify::{ClassifiedLine, FileClassification, LineStatus, classify};
pub use engine::TodoChecker;
pub use report::{FileResult, Report, StagedSet, TicketTodo, assemble};
