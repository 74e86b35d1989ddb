// ── Event dispatch table ──
//
// UI event -> View State transition -> follow-up cycle. The table is a
// pure function; the sync controller runs whatever effect it returns.

use crate::model::{Issue, SortField};
use crate::view_state::{FilterKey, ViewState};

/// Everything the presentation layer can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Search(String),
    FilterStatus(String),
    FilterPriority(String),
    FilterAssignee(String),
    PageSize(u32),
    NextPage,
    PrevPage,
    /// Jump straight to a page; clamped into range.
    GoToPage(u32),
    Sort(SortField),
    OpenCreate,
    OpenEdit(Issue),
    CancelEdit,
    Save,
    Refresh,
}

/// Work left for the controller once the transition has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Refresh,
    Save,
    OpenCreate,
    OpenEdit(Issue),
    CancelEdit,
    /// Boundary page move: nothing changed, nothing to fetch.
    Nothing,
}

/// Apply `event`'s transition to `state` and return the follow-up.
pub fn transition(state: &mut ViewState, event: UiEvent) -> Effect {
    match event {
        UiEvent::Search(value) => filter(state, FilterKey::Search, &value),
        UiEvent::FilterStatus(value) => filter(state, FilterKey::Status, &value),
        UiEvent::FilterPriority(value) => filter(state, FilterKey::Priority, &value),
        UiEvent::FilterAssignee(value) => filter(state, FilterKey::Assignee, &value),
        UiEvent::PageSize(size) => {
            state.set_page_size(size);
            Effect::Refresh
        }
        UiEvent::NextPage => refresh_if(state.next_page()),
        UiEvent::PrevPage => refresh_if(state.prev_page()),
        UiEvent::GoToPage(page) => refresh_if(state.jump_to_page(page)),
        UiEvent::Sort(field) => {
            state.set_sort(field);
            Effect::Refresh
        }
        UiEvent::OpenCreate => Effect::OpenCreate,
        UiEvent::OpenEdit(issue) => Effect::OpenEdit(issue),
        UiEvent::CancelEdit => Effect::CancelEdit,
        UiEvent::Save => Effect::Save,
        UiEvent::Refresh => Effect::Refresh,
    }
}

fn filter(state: &mut ViewState, key: FilterKey, value: &str) -> Effect {
    state.set_filter(key, value.trim());
    Effect::Refresh
}

fn refresh_if(changed: bool) -> Effect {
    if changed {
        Effect::Refresh
    } else {
        Effect::Nothing
    }
}
