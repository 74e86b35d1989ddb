//! Issue command handlers.

use trackly_api::IssuesClient;
use trackly_core::{
    ClientConfig, Issue, IssueDraft, IssueGateway, IssueId, SyncController, UiEvent, detail,
};

use crate::cli::{CreateArgs, EditFields, GlobalOpts, IssuesArgs, IssuesCommand, ListArgs};
use crate::error::CliError;
use crate::output;
use crate::render::{self, TerminalRenderer};

use super::util;

type Controller = SyncController<IssuesClient, TerminalRenderer>;

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: IssuesClient,
    client_config: &ClientConfig,
    args: IssuesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut state = client_config.initial_view_state();
    if let IssuesCommand::List(ref list) = args.command {
        util::apply_view_args(&mut state, &list.view);
    }
    let controller = SyncController::new(client, TerminalRenderer::deferred(global), state);

    match args.command {
        IssuesCommand::List(list) => list_issues(controller, &list, global).await,

        IssuesCommand::Get { id } => {
            let fetch = IssueGateway::get_issue(controller.gateway(), id);
            let issue = util::with_spinner(global, "Fetching issue", fetch).await?;
            print_issue(&issue, global)
        }

        IssuesCommand::Create(create) => create_issue(controller, create, global).await,

        IssuesCommand::Edit { id, fields } => edit_issue(controller, id, fields, global).await,
    }
}

fn print_issue(issue: &Issue, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(global.output(), issue, detail, |i| i.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── List ────────────────────────────────────────────────────────────

async fn list_issues(
    mut controller: Controller,
    list: &ListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::with_spinner(global, "Loading issues", controller.refresh()).await?;

    // The requested page can only be clamped once a total is known.
    if list.page > 1 {
        let jump = controller.dispatch(UiEvent::GoToPage(list.page));
        util::with_spinner(global, "Loading issues", jump).await?;
    }

    tracing::debug!(
        filters = %util::describe_filters(controller.state()),
        page = controller.state().page(),
        "listed issues"
    );

    if let Some(view) = controller.last_view() {
        let out = render::format_view(view, global.output(), controller.sink().color())?;
        output::print_output(&out, global.quiet);
    }
    Ok(())
}

// ── Create ──────────────────────────────────────────────────────────

async fn create_issue(
    mut controller: Controller,
    args: CreateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    controller.open_create().draft = IssueDraft {
        title: args.title,
        description: args.description,
        status: args.status,
        priority: args.priority,
        assignee: args.assignee,
    };

    let issue = util::with_spinner(global, "Creating issue", controller.save_pending()).await?;
    if !global.quiet {
        eprintln!("✓ Created issue #{}", issue.id);
    }
    print_issue(&issue, global)
}

// ── Edit ────────────────────────────────────────────────────────────

async fn edit_issue(
    mut controller: Controller,
    id: IssueId,
    fields: EditFields,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if fields.is_empty() {
        return Err(CliError::Validation {
            field: "edit".into(),
            reason: "nothing to change; pass at least one of --title, --description, \
                     --status, --priority, --assignee"
                .into(),
        });
    }

    let fetch = IssueGateway::get_issue(controller.gateway(), id);
    let current = util::with_spinner(global, "Fetching issue", fetch).await?;

    let draft = &mut controller.open_edit(&current).draft;
    if let Some(title) = fields.title {
        draft.title = title;
    }
    if fields.description.is_some() {
        draft.description = fields.description;
    }
    if let Some(status) = fields.status {
        draft.status = status;
    }
    if let Some(priority) = fields.priority {
        draft.priority = priority;
    }
    if fields.assignee.is_some() {
        draft.assignee = fields.assignee;
    }

    let issue = util::with_spinner(global, "Saving issue", controller.save_pending()).await?;
    if !global.quiet {
        eprintln!("✓ Updated issue #{}", issue.id);
    }
    print_issue(&issue, global)
}
