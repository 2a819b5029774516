//! Git operations using git2-rs.

pub mod range;
pub mod summary;

pub use range::{CommitRange, open_repository, resolve_range, resolve_reference};
pub use summary::{CommitSummary, FileChange, extract_commit, extract_range};
