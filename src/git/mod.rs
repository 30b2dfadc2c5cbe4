mod branch;
mod listing;

pub use branch::{BranchResolver, GitBranchResolver, TicketContext, extract_ticket_id};
pub use listing::{ExclusionPolicy, GitIndexLister, RepositoryFileLister};
