//! Interactive browse session.
//!
//! Every menu choice becomes a `UiEvent` for the sync controller. The
//! terminal renderer draws each applied page and prints failures, so an
//! error here only ever returns the user to the menu. Prompt I/O errors
//! are the one thing that ends the session.

use std::io::{self, IsTerminal};

use dialoguer::{Confirm, Input, Select};
use strum::IntoEnumIterator;
use tracing::debug;

use trackly_api::IssuesClient;
use trackly_core::{
    ClientConfig, Dispatched, FilterKey, IssueDraft, IssueGateway, IssueId, Priority, RenderSink,
    SortField, Status, SyncController, UiEvent, detail,
};

use crate::cli::{BrowseArgs, GlobalOpts};
use crate::error::CliError;
use crate::render::{RenderMode, TerminalRenderer};

use super::util;

type Controller = SyncController<IssuesClient, TerminalRenderer>;

// ── Menu ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    NextPage,
    PrevPage,
    GoToPage,
    Search,
    FilterStatus,
    FilterPriority,
    FilterAssignee,
    Sort,
    PageSize,
    Show,
    New,
    Edit,
    Refresh,
    Quit,
}

const MENU: [(Action, &str); 14] = [
    (Action::NextPage, "Next page"),
    (Action::PrevPage, "Previous page"),
    (Action::GoToPage, "Go to page..."),
    (Action::Search, "Search..."),
    (Action::FilterStatus, "Filter by status..."),
    (Action::FilterPriority, "Filter by priority..."),
    (Action::FilterAssignee, "Filter by assignee..."),
    (Action::Sort, "Sort by..."),
    (Action::PageSize, "Page size..."),
    (Action::Show, "Show issue..."),
    (Action::New, "New issue"),
    (Action::Edit, "Edit issue..."),
    (Action::Refresh, "Refresh"),
    (Action::Quit, "Quit"),
];

const STATUSES: [&str; 3] = ["open", "in-progress", "closed"];
const PRIORITIES: [&str; 3] = ["low", "medium", "high"];

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: IssuesClient,
    client_config: &ClientConfig,
    args: BrowseArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return Err(CliError::NotInteractive {
            command: "browse".into(),
        });
    }

    let mut state = client_config.initial_view_state();
    util::apply_view_args(&mut state, &args.view);
    let renderer = TerminalRenderer::new(RenderMode::Interactive, global);
    let mut controller = SyncController::new(client, renderer, state);

    if let Err(err) = controller.refresh().await {
        debug!(error = %err, "initial load failed");
    }

    let labels: Vec<&str> = MENU.iter().map(|(_, label)| *label).collect();
    let mut last_choice = 0;
    loop {
        print_status(&controller);
        let Some(index) = Select::new()
            .with_prompt("Action")
            .items(&labels)
            .default(last_choice)
            .interact_opt()?
        else {
            break;
        };
        let Some(&(action, _)) = MENU.get(index) else {
            break;
        };
        if action == Action::Quit {
            break;
        }
        last_choice = index;
        run_action(&mut controller, action).await?;
    }
    Ok(())
}

fn print_status(controller: &Controller) {
    let state = controller.state();
    eprintln!(
        "\nFilters: {} | Sort: {} {} | {} per page",
        util::describe_filters(state),
        state.sort_by(),
        state.sort_dir(),
        state.page_size()
    );
}

#[allow(clippy::too_many_lines)]
async fn run_action(controller: &mut Controller, action: Action) -> Result<(), CliError> {
    let event = match action {
        Action::NextPage => UiEvent::NextPage,
        Action::PrevPage => UiEvent::PrevPage,
        Action::GoToPage => {
            let max = controller.state().max_page();
            let page: u32 = Input::new()
                .with_prompt(format!("Page (1-{max})"))
                .default(controller.state().page())
                .interact_text()?;
            UiEvent::GoToPage(page)
        }
        Action::Search => UiEvent::Search(prompt_text(
            "Search (empty clears)",
            controller.state().filters().get(FilterKey::Search),
        )?),
        Action::FilterStatus => UiEvent::FilterStatus(pick_filter("Status", &STATUSES)?),
        Action::FilterPriority => UiEvent::FilterPriority(pick_filter("Priority", &PRIORITIES)?),
        Action::FilterAssignee => {
            let options: Vec<String> = controller
                .last_view()
                .map(|v| v.assignee_options.clone())
                .unwrap_or_default();
            let options: Vec<&str> = options.iter().map(String::as_str).collect();
            UiEvent::FilterAssignee(pick_filter("Assignee", &options)?)
        }
        Action::Sort => {
            let state = controller.state();
            let fields: Vec<SortField> = SortField::iter().collect();
            let labels: Vec<String> = fields
                .iter()
                .map(|f| {
                    if *f == state.sort_by() {
                        format!("{f} ({}, choose again to flip)", state.sort_dir())
                    } else {
                        f.to_string()
                    }
                })
                .collect();
            let current = fields.iter().position(|f| *f == state.sort_by()).unwrap_or(0);
            let Some(index) = Select::new()
                .with_prompt("Sort by")
                .items(&labels)
                .default(current)
                .interact_opt()?
            else {
                return Ok(());
            };
            match fields.get(index) {
                Some(field) => UiEvent::Sort(*field),
                None => return Ok(()),
            }
        }
        Action::PageSize => {
            let size: u32 = Input::new()
                .with_prompt("Issues per page (1-100)")
                .default(controller.state().page_size())
                .interact_text()?;
            UiEvent::PageSize(size)
        }
        Action::Show => {
            if let Some(id) = pick_issue(controller, "Show issue")? {
                let fetched = IssueGateway::get_issue(controller.gateway(), id).await;
                match fetched {
                    Ok(issue) => println!("{}", detail(&issue)),
                    Err(err) => controller.sink_mut().show_error(&err),
                }
            }
            return Ok(());
        }
        Action::New => {
            controller.dispatch(UiEvent::OpenCreate).await?;
            return edit_loop(controller).await;
        }
        Action::Edit => {
            let Some(id) = pick_issue(controller, "Edit issue")? else {
                return Ok(());
            };
            let fetched = IssueGateway::get_issue(controller.gateway(), id).await;
            match fetched {
                Ok(issue) => {
                    controller.dispatch(UiEvent::OpenEdit(issue)).await?;
                    return edit_loop(controller).await;
                }
                Err(err) => {
                    controller.sink_mut().show_error(&err);
                    return Ok(());
                }
            }
        }
        Action::Refresh => UiEvent::Refresh,
        Action::Quit => return Ok(()),
    };

    let boundary = match event {
        UiEvent::NextPage => Some("Already on the last page."),
        UiEvent::PrevPage => Some("Already on the first page."),
        UiEvent::GoToPage(_) => Some("Already on that page."),
        _ => None,
    };
    match controller.dispatch(event).await {
        Ok(Dispatched::Unchanged) => {
            if let Some(note) = boundary {
                eprintln!("{note}");
            }
        }
        Ok(_) => {}
        Err(err) => debug!(error = %err, "action failed"),
    }
    Ok(())
}

// ── Edit form ───────────────────────────────────────────────────────

/// Prompt for every field of the open form and save; offer a retry that
/// keeps what was typed when the save is rejected.
async fn edit_loop(controller: &mut Controller) -> Result<(), CliError> {
    loop {
        let Some(pending) = controller.pending_edit_mut() else {
            return Ok(());
        };
        let heading = match pending.target().existing_id() {
            Some(id) => format!("Editing issue #{id}"),
            None => "New issue".to_owned(),
        };
        eprintln!("\n{heading}");
        fill_draft(&mut pending.draft)?;

        match controller.dispatch(UiEvent::Save).await {
            Ok(Dispatched::Saved(issue)) => {
                eprintln!("✓ Saved issue #{}", issue.id);
                return Ok(());
            }
            Ok(_) => return Ok(()),
            Err(err) => {
                debug!(error = %err, "save failed; form kept open");
                let retry = Confirm::new()
                    .with_prompt("Change the form and try again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    controller.dispatch(UiEvent::CancelEdit).await?;
                    return Ok(());
                }
            }
        }
    }
}

fn fill_draft(draft: &mut IssueDraft) -> Result<(), CliError> {
    draft.title = prompt_text("Title", Some(&draft.title))?;
    draft.description = Some(prompt_text("Description", draft.description.as_deref())?);

    let status_index = STATUSES
        .iter()
        .position(|s| *s == draft.status.as_ref())
        .unwrap_or(0);
    let status = Select::new()
        .with_prompt("Status")
        .items(&STATUSES)
        .default(status_index)
        .interact()?;
    if let Some(parsed) = STATUSES.get(status).and_then(|s| s.parse::<Status>().ok()) {
        draft.status = parsed;
    }

    let priority_index = PRIORITIES
        .iter()
        .position(|p| *p == draft.priority.as_ref())
        .unwrap_or(1);
    let priority = Select::new()
        .with_prompt("Priority")
        .items(&PRIORITIES)
        .default(priority_index)
        .interact()?;
    if let Some(parsed) = PRIORITIES.get(priority).and_then(|p| p.parse::<Priority>().ok()) {
        draft.priority = parsed;
    }

    draft.assignee = Some(prompt_text("Assignee", draft.assignee.as_deref())?);
    Ok(())
}

// ── Prompt helpers ──────────────────────────────────────────────────

/// Free-text prompt pre-filled with `current`; empty input is allowed.
fn prompt_text(prompt: &str, current: Option<&str>) -> Result<String, CliError> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(current) = current {
        input = input.with_initial_text(current);
    }
    Ok(input.interact_text()?)
}

/// Pick one of `options`, or "all" (returned as an empty string).
fn pick_filter(prompt: &str, options: &[&str]) -> Result<String, CliError> {
    let mut items = vec!["all"];
    items.extend_from_slice(options);
    let choice = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;
    Ok(match choice {
        0 => String::new(),
        n => items.get(n).map(|s| (*s).to_owned()).unwrap_or_default(),
    })
}

/// Pick an issue from the rows currently on screen.
fn pick_issue(controller: &Controller, prompt: &str) -> Result<Option<IssueId>, CliError> {
    let rows = controller
        .last_view()
        .map(|v| v.rows.as_slice())
        .unwrap_or_default();
    if rows.is_empty() {
        eprintln!("No issues on this page.");
        return Ok(None);
    }
    let labels: Vec<String> = rows.iter().map(|r| format!("#{} {}", r.id, r.title)).collect();
    let choice = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(choice.and_then(|i| rows.get(i)).map(|r| r.id))
}
