//! Terminal render boundary for the sync controller.
//!
//! One-shot commands defer drawing and print the controller's final view
//! once; the browse session draws every applied cycle as it lands.

use tabled::Tabled;
use tracing::{debug, warn};

use trackly_core::{CoreError, RenderRow, RenderSink, RenderView};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct IssueRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl IssueRow {
    fn new(row: &RenderRow, color: bool) -> Self {
        Self {
            id: row.id.to_string(),
            title: row.title.clone(),
            status: output::paint_status(row.status, color),
            priority: output::paint_priority(row.priority, color),
            assignee: row.assignee.clone(),
            updated: row
                .updated_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

// ── View formatting ─────────────────────────────────────────────────

/// Format a projected page in the requested output format.
///
/// Table output appends the page label and the assignee choices, with
/// "all" first and the active filter marked.
pub fn format_view(
    view: &RenderView,
    format: &OutputFormat,
    color: bool,
) -> Result<String, crate::error::CliError> {
    match format {
        OutputFormat::Table => {
            let mut out = if view.rows.is_empty() {
                "No issues match the current filters.".to_owned()
            } else {
                let rows: Vec<IssueRow> =
                    view.rows.iter().map(|r| IssueRow::new(r, color)).collect();
                output::render_table(&rows)
            };
            out.push('\n');
            out.push_str(&view.page_label);
            if !view.assignee_options.is_empty() {
                out.push_str(&format!("\nAssignees: {}", assignee_line(view)));
            }
            Ok(out)
        }
        OutputFormat::Plain => Ok(view
            .rows
            .iter()
            .map(|r| r.id.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
        structured => {
            output::render_single(structured, view, |_| String::new(), |_| String::new())
        }
    }
}

fn assignee_line(view: &RenderView) -> String {
    let selected = view.selected_assignee.as_deref();
    let mut choices = vec![if selected.is_none() {
        "[all]".to_owned()
    } else {
        "all".to_owned()
    }];
    for name in &view.assignee_options {
        if selected == Some(name.as_str()) {
            choices.push(format!("[{name}]"));
        } else {
            choices.push(name.clone());
        }
    }
    choices.join(", ")
}

// ── TerminalRenderer ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Print every applied view and every error immediately.
    Interactive,
    /// Leave drawing to the caller; errors travel back as `Err`.
    Deferred,
}

pub struct TerminalRenderer {
    mode: RenderMode,
    format: OutputFormat,
    color: bool,
    quiet: bool,
}

impl TerminalRenderer {
    pub fn new(mode: RenderMode, global: &GlobalOpts) -> Self {
        Self {
            mode,
            format: global.output().clone(),
            color: output::should_color(global.color()),
            quiet: global.quiet,
        }
    }

    pub fn deferred(global: &GlobalOpts) -> Self {
        Self::new(RenderMode::Deferred, global)
    }

    pub fn color(&self) -> bool {
        self.color
    }
}

impl RenderSink for TerminalRenderer {
    fn render(&mut self, view: &RenderView) {
        if self.mode == RenderMode::Deferred {
            return;
        }
        match format_view(view, &self.format, self.color) {
            Ok(text) => output::print_output(&text, self.quiet),
            Err(e) => warn!(error = %e, "failed to render view"),
        }
    }

    fn show_error(&mut self, error: &CoreError) {
        match self.mode {
            RenderMode::Interactive => {
                if self.color {
                    use owo_colors::OwoColorize;
                    eprintln!("{} {error}", "error:".red().bold());
                } else {
                    eprintln!("error: {error}");
                }
            }
            RenderMode::Deferred => debug!(error = %error, "error deferred to caller"),
        }
    }

    fn close_editor(&mut self) {
        debug!("edit form closed");
    }
}
