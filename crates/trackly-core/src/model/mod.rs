// ── Domain model ──
//
// Canonical types consumed by the CLI. Wire types from `trackly_api`
// are converted into these in `crate::convert`.

pub mod issue;
pub mod sort;

pub use issue::{Issue, IssueId, IssuePage, Priority, Status};
pub use sort::{SortDir, SortField};
