//! Shared helpers for command handlers.

use std::future::Future;
use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use trackly_core::{SortDir, UiEvent, ViewState, transition};

use crate::cli::{GlobalOpts, OutputFormat, ViewArgs};

/// Run `fut` behind a stderr spinner when a human is watching table output.
pub async fn with_spinner<F: Future>(global: &GlobalOpts, message: &str, fut: F) -> F::Output {
    let visible = !global.quiet
        && matches!(global.output(), OutputFormat::Table)
        && io::stderr().is_terminal();
    if !visible {
        return fut.await;
    }

    let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(80));
    let out = fut.await;
    pb.finish_and_clear();
    out
}

/// Apply `--search`, filter, page-size and sort flags to a fresh view state.
///
/// Everything goes through the same transitions the interactive session
/// uses, so clamping and page resets behave identically.
pub fn apply_view_args(state: &mut ViewState, args: &ViewArgs) {
    let filters: [(fn(String) -> UiEvent, &Option<String>); 4] = [
        (UiEvent::Search, &args.search),
        (UiEvent::FilterStatus, &args.status),
        (UiEvent::FilterPriority, &args.priority),
        (UiEvent::FilterAssignee, &args.assignee),
    ];
    for (event, value) in filters {
        if let Some(value) = value {
            transition(state, event(value.clone()));
        }
    }

    if let Some(size) = args.page_size {
        transition(state, UiEvent::PageSize(size));
    }

    if let Some(field) = args.sort {
        if field != state.sort_by() {
            transition(state, UiEvent::Sort(field));
        }
    }
    let wanted = if args.asc {
        Some(SortDir::Asc)
    } else if args.desc {
        Some(SortDir::Desc)
    } else {
        None
    };
    if let Some(dir) = wanted {
        if dir != state.sort_dir() {
            // Re-selecting the active column flips direction.
            transition(state, UiEvent::Sort(state.sort_by()));
        }
    }
}

/// One-line summary of the active filters, e.g. `status=open, assignee=alice`.
pub fn describe_filters(state: &ViewState) -> String {
    let parts: Vec<String> = state
        .filters()
        .active()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    if parts.is_empty() {
        "none".into()
    } else {
        parts.join(", ")
    }
}
