// ── API-to-domain type conversions ──
//
// Bridges raw `trackly_api` wire types into `trackly_core::model` domain
// types, and domain drafts back into request payloads.

use chrono::{DateTime, Utc};

use trackly_api::{IssueListResponse, IssuePayload, IssueResponse};

use crate::edit::IssueDraft;
use crate::model::{Issue, IssueId, IssuePage, Priority, Status};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse an RFC 3339 timestamp, silently dropping unparseable values.
fn parse_datetime(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_status(raw: &str) -> Status {
    raw.parse().unwrap_or(Status::Unknown)
}

fn parse_priority(raw: &str) -> Priority {
    raw.parse().unwrap_or(Priority::Unknown)
}

// ── Issue ──────────────────────────────────────────────────────────

impl From<IssueResponse> for Issue {
    fn from(raw: IssueResponse) -> Self {
        Self {
            id: IssueId::new(raw.id),
            status: parse_status(&raw.status),
            priority: parse_priority(&raw.priority),
            created_at: parse_datetime(raw.created_at.as_deref()),
            updated_at: parse_datetime(raw.updated_at.as_deref()),
            title: raw.title,
            description: raw.description,
            assignee: raw.assignee,
        }
    }
}

impl From<IssueListResponse> for IssuePage {
    fn from(raw: IssueListResponse) -> Self {
        Self {
            issues: raw.issues.into_iter().map(Issue::from).collect(),
            total: raw.total,
            page: raw.page,
        }
    }
}

// ── Draft ──────────────────────────────────────────────────────────

impl From<&IssueDraft> for IssuePayload {
    fn from(draft: &IssueDraft) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: draft.status.to_string(),
            priority: draft.priority.to_string(),
            assignee: draft.assignee.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn raw(status: &str, priority: &str, updated: Option<&str>) -> IssueResponse {
        IssueResponse {
            id: 12,
            title: "Login broken".into(),
            description: Some("500 on submit".into()),
            status: status.into(),
            priority: priority.into(),
            assignee: None,
            created_at: Some("2024-03-01T09:00:00Z".into()),
            updated_at: updated.map(str::to_owned),
        }
    }

    #[test]
    fn issue_from_response() {
        let issue = Issue::from(raw(
            "in-progress",
            "high",
            Some("2024-03-02T10:15:30.250000Z"),
        ));
        assert_eq!(issue.id, IssueId::new(12));
        assert_eq!(issue.status, Status::InProgress);
        assert_eq!(issue.priority, Priority::High);
        let updated = issue.updated_at.unwrap();
        assert_eq!(updated.day(), 2);
        assert_eq!(updated.minute(), 15);
        assert_eq!(issue.created_at.unwrap().hour(), 9);
    }

    #[test]
    fn unknown_enums_and_bad_timestamps_degrade() {
        let issue = Issue::from(raw("triaged", "urgent", Some("yesterday")));
        assert_eq!(issue.status, Status::Unknown);
        assert_eq!(issue.priority, Priority::Unknown);
        assert_eq!(issue.updated_at, None);
    }

    #[test]
    fn payload_from_draft_uses_wire_names() {
        let draft = IssueDraft {
            title: "New".into(),
            status: Status::InProgress,
            priority: Priority::Low,
            ..IssueDraft::default()
        };
        let payload = IssuePayload::from(&draft);
        assert_eq!(payload.status, "in-progress");
        assert_eq!(payload.priority, "low");
        assert_eq!(payload.assignee, None);
    }
}
