// ── Sync controller ──
//
// Orchestrates "state changed -> build query -> fetch -> apply -> render"
// and the create/edit submission flow. Owns the ViewState and the single
// optional PendingEdit; nothing else mutates either.

use tracing::{debug, info, warn};

use crate::edit::{IssueDraft, PendingEdit};
use crate::error::CoreError;
use crate::event::{Effect, UiEvent, transition};
use crate::gateway::IssueGateway;
use crate::model::{Issue, IssueId, IssuePage};
use crate::project::{RenderView, project};
use crate::query::QueryDescriptor;
use crate::render::RenderSink;
use crate::view_state::{FilterKey, ViewState};

// ── Cycle bookkeeping ────────────────────────────────────────────

/// A started refresh cycle: its sequence number and the query it sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    seq: u64,
    query: QueryDescriptor,
}

impl RefreshTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &QueryDescriptor {
        &self.query
    }
}

/// How a completed cycle was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Results were applied and rendered.
    Applied,
    /// A later cycle had already settled; the response was dropped.
    Stale,
}

/// Result of [`SyncController::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    Refreshed(CycleOutcome),
    Saved(Issue),
    EditOpened,
    EditCancelled,
    /// The event changed nothing that needed a fetch.
    Unchanged,
}

// ── SyncController ───────────────────────────────────────────────

pub struct SyncController<G, S> {
    gateway: G,
    sink: S,
    state: ViewState,
    pending: Option<PendingEdit>,
    next_seq: u64,
    /// Highest sequence number that has settled (applied or failed).
    last_applied: u64,
    last_view: Option<RenderView>,
}

impl<G: IssueGateway, S: RenderSink> SyncController<G, S> {
    pub fn new(gateway: G, sink: S, state: ViewState) -> Self {
        Self {
            gateway,
            sink,
            state,
            pending: None,
            next_seq: 1,
            last_applied: 0,
            last_view: None,
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The most recently rendered view, if any cycle has been applied.
    pub fn last_view(&self) -> Option<&RenderView> {
        self.last_view.as_ref()
    }

    pub fn pending_edit(&self) -> Option<&PendingEdit> {
        self.pending.as_ref()
    }

    pub fn pending_edit_mut(&mut self) -> Option<&mut PendingEdit> {
        self.pending.as_mut()
    }

    // ── Refresh cycle ────────────────────────────────────────────

    /// Snapshot the view state into a query and stamp it with the next
    /// sequence number.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        let seq = self.next_seq;
        self.next_seq += 1;
        let query = QueryDescriptor::build(&self.state);
        debug!(seq, query = %query.to_query_string(), "refresh started");
        RefreshTicket { seq, query }
    }

    /// Settle a cycle started by [`begin_refresh`](Self::begin_refresh).
    ///
    /// A response older than the last settled cycle is dropped without
    /// touching state or the sink. Otherwise success applies server totals
    /// and renders; failure is surfaced and leaves the view state as it was.
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<IssuePage, CoreError>,
    ) -> Result<CycleOutcome, CoreError> {
        if ticket.seq <= self.last_applied {
            debug!(
                seq = ticket.seq,
                last_applied = self.last_applied,
                "discarding stale response"
            );
            return Ok(CycleOutcome::Stale);
        }
        self.last_applied = ticket.seq;

        match result {
            Ok(page) => {
                self.state.apply_server_totals(page.total, page.page);
                let view = project(
                    &page.issues,
                    self.state.total(),
                    self.state.page(),
                    self.state.page_size(),
                )
                .with_selected_assignee(self.state.filters().get(FilterKey::Assignee));
                debug!(seq = ticket.seq, rows = view.rows.len(), total = view.total, "refresh applied");
                self.sink.render(&view);
                self.last_view = Some(view);
                Ok(CycleOutcome::Applied)
            }
            Err(err) => {
                warn!(seq = ticket.seq, error = %err, "refresh failed");
                self.sink.show_error(&err);
                Err(err)
            }
        }
    }

    /// One full cycle against the gateway.
    pub async fn refresh(&mut self) -> Result<CycleOutcome, CoreError> {
        let ticket = self.begin_refresh();
        let result = self.gateway.list_issues(ticket.query()).await;
        self.complete_refresh(ticket, result)
    }

    // ── Edit flow ────────────────────────────────────────────────

    /// Open an empty create form, replacing any open form.
    pub fn open_create(&mut self) -> &mut PendingEdit {
        self.replace_pending(PendingEdit::create())
    }

    /// Open an edit form pre-filled from `issue`, replacing any open form.
    pub fn open_edit(&mut self, issue: &Issue) -> &mut PendingEdit {
        self.replace_pending(PendingEdit::edit(issue))
    }

    /// Close the form without saving. Returns whether one was open.
    pub fn cancel_edit(&mut self) -> bool {
        let was_open = self.pending.take().is_some();
        if was_open {
            self.sink.close_editor();
        }
        was_open
    }

    fn replace_pending(&mut self, pending: PendingEdit) -> &mut PendingEdit {
        if self.pending.is_some() {
            debug!("replacing open edit form");
        }
        self.pending.insert(pending)
    }

    /// Create (`existing` absent) or update an issue from `draft`.
    ///
    /// Validation runs first and never reaches the network. On success the
    /// form is closed and exactly one refresh runs; a failure of that
    /// refresh is surfaced through the sink but does not undo the save.
    /// On failure an open form for the same identity keeps the draft as
    /// typed; a form opened for a different issue is left untouched.
    pub async fn submit(
        &mut self,
        draft: IssueDraft,
        existing: Option<IssueId>,
    ) -> Result<Issue, CoreError> {
        if let Some(pending) = self
            .pending
            .as_mut()
            .filter(|p| p.target().existing_id() == existing)
        {
            pending.draft.clone_from(&draft);
        }
        let draft = draft.normalized();

        if let Err(err) = draft.validate() {
            debug!(error = %err, "draft rejected locally");
            self.sink.show_error(&err);
            return Err(err);
        }

        let result = match existing {
            Some(id) => self.gateway.update_issue(id, &draft).await,
            None => self.gateway.create_issue(&draft).await,
        };

        match result {
            Ok(issue) => {
                info!(id = %issue.id, created = existing.is_none(), "issue saved");
                self.pending = None;
                self.sink.close_editor();
                if let Err(err) = self.refresh().await {
                    debug!(error = %err, "refresh after save failed");
                }
                Ok(issue)
            }
            Err(err) => {
                warn!(error = %err, "save failed");
                self.sink.show_error(&err);
                Err(err)
            }
        }
    }

    /// Submit the open form against the identity it was opened for.
    pub async fn save_pending(&mut self) -> Result<Issue, CoreError> {
        let Some(pending) = self.pending.as_ref() else {
            let err = CoreError::NoPendingEdit;
            self.sink.show_error(&err);
            return Err(err);
        };
        let draft = pending.draft.clone();
        let existing = pending.target().existing_id();
        self.submit(draft, existing).await
    }

    // ── Dispatch ─────────────────────────────────────────────────

    /// Route a UI event through its transition and run the follow-up.
    pub async fn dispatch(&mut self, event: UiEvent) -> Result<Dispatched, CoreError> {
        match transition(&mut self.state, event) {
            Effect::Refresh => self.refresh().await.map(Dispatched::Refreshed),
            Effect::Save => self.save_pending().await.map(Dispatched::Saved),
            Effect::OpenCreate => {
                self.open_create();
                Ok(Dispatched::EditOpened)
            }
            Effect::OpenEdit(issue) => {
                self.open_edit(&issue);
                Ok(Dispatched::EditOpened)
            }
            Effect::CancelEdit => {
                if self.cancel_edit() {
                    Ok(Dispatched::EditCancelled)
                } else {
                    Ok(Dispatched::Unchanged)
                }
            }
            Effect::Nothing => Ok(Dispatched::Unchanged),
        }
    }
}
