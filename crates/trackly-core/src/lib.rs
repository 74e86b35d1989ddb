//! Query/state synchronization core between `trackly-api` and UI consumers.
//!
//! This crate owns the client-side logic of the trackly workspace:
//!
//! - **[`ViewState`]**: The single source of truth for pagination, sort and
//!   filter criteria. Fields are private; every change goes through a
//!   transition that keeps `page` inside `[1, max_page]`.
//!
//! - **[`QueryDescriptor`]**: Pure projection of a `ViewState` into the
//!   `GET /issues` parameters. Empty filters are never sent.
//!
//! - **[`IssueGateway`]**: The I/O seam. Implemented for
//!   [`trackly_api::IssuesClient`]; one request per call, no retries.
//!
//! - **[`SyncController`]**: Runs the "state changed → query → fetch →
//!   apply → render" cycle, sequences overlapping cycles (latest started
//!   wins), and owns the create/edit flow. UI events enter through
//!   [`SyncController::dispatch`].
//!
//! - **Render projection** ([`project`]): Maps a page of issues to table
//!   rows, a page label and the assignee filter options, handed to a
//!   [`RenderSink`].

pub mod config;
pub mod controller;
pub mod convert;
pub mod edit;
pub mod error;
pub mod event;
pub mod gateway;
pub mod model;
pub mod project;
pub mod query;
pub mod render;
pub mod view_state;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, DEFAULT_API_URL, TlsVerification};
pub use controller::{CycleOutcome, Dispatched, RefreshTicket, SyncController};
pub use edit::{EditTarget, IssueDraft, PendingEdit};
pub use error::CoreError;
pub use event::{Effect, UiEvent, transition};
pub use gateway::{IssueGateway, connect};
pub use project::{RenderRow, RenderView, detail, project};
pub use query::QueryDescriptor;
pub use render::RenderSink;
pub use view_state::{DEFAULT_PAGE_SIZE, FilterKey, Filters, MAX_PAGE_SIZE, ViewState};

pub use model::{Issue, IssueId, IssuePage, Priority, SortDir, SortField, Status};
