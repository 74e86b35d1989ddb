// ── Render projection ──
//
// Pure mapping from a page of issues plus pagination metadata into what
// the presentation layer draws. Escaping and layout belong to the caller.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Issue, IssueId, Priority, Status};
use crate::view_state::max_page;

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRow {
    pub id: IssueId,
    pub title: String,
    pub status: Status,
    pub priority: Priority,
    /// Empty when unassigned.
    pub assignee: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Issue> for RenderRow {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.id,
            title: issue.title.clone(),
            status: issue.status,
            priority: issue.priority,
            assignee: issue.assignee.clone().unwrap_or_default(),
            updated_at: issue.updated_at,
        }
    }
}

/// Everything the presentation layer needs for one refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderView {
    pub rows: Vec<RenderRow>,
    /// `Page {page} / {max} — {total} items`
    pub page_label: String,
    /// Distinct assignees on this page, first-seen order. The "all" choice
    /// is added by the presentation layer.
    pub assignee_options: Vec<String>,
    /// The active assignee filter, when it is still one of the options.
    pub selected_assignee: Option<String>,
    pub page: u32,
    pub max_page: u32,
    pub total: u64,
}

impl RenderView {
    /// Carry the current assignee filter over if it is still offered.
    pub fn with_selected_assignee(mut self, current: Option<&str>) -> Self {
        self.selected_assignee = current
            .filter(|c| self.assignee_options.iter().any(|o| o == c))
            .map(str::to_owned);
        self
    }
}

/// Project a page of results into a [`RenderView`].
///
/// Assignee options come from this page only; assignees that exist on
/// other pages are not offered until one of their issues is displayed.
pub fn project(issues: &[Issue], total: u64, page: u32, page_size: u32) -> RenderView {
    RenderView {
        rows: issues.iter().map(RenderRow::from).collect(),
        page_label: page_label(total, page, page_size),
        assignee_options: assignee_options(issues),
        selected_assignee: None,
        page,
        max_page: max_page(total, page_size),
        total,
    }
}

pub fn page_label(total: u64, page: u32, page_size: u32) -> String {
    format!(
        "Page {page} / {} \u{2014} {total} items",
        max_page(total, page_size)
    )
}

pub fn assignee_options(issues: &[Issue]) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for name in issues.iter().filter_map(|i| i.assignee.as_deref()) {
        if !name.is_empty() && !options.iter().any(|o| o == name) {
            options.push(name.to_owned());
        }
    }
    options
}

/// Detail view of a single issue: the full record as pretty JSON.
pub fn detail(issue: &Issue) -> String {
    serde_json::to_string_pretty(issue).unwrap_or_else(|e| format!("<unrenderable issue: {e}>"))
}
