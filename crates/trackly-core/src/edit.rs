// ── Create / edit form state ──

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{Issue, IssueId, Priority, Status};

/// Form content for creating or updating an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDraft {
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    pub assignee: Option<String>,
}

impl IssueDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Pre-fill from an existing issue. Unrecognised enum values fall back
    /// to the defaults a new form would show.
    pub fn from_issue(issue: &Issue) -> Self {
        Self {
            title: issue.title.clone(),
            description: issue.description.clone(),
            status: match issue.status {
                Status::Unknown => Status::default(),
                known => known,
            },
            priority: match issue.priority {
                Priority::Unknown => Priority::default(),
                known => known,
            },
            assignee: issue.assignee.clone(),
        }
    }

    /// Trim text fields; blank optionals become absent.
    pub fn normalized(self) -> Self {
        fn trimmed(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        }

        Self {
            title: self.title.trim().to_owned(),
            description: trimmed(self.description),
            status: self.status,
            priority: self.priority,
            assignee: trimmed(self.assignee),
        }
    }

    /// Local checks that must pass before any request is made.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::validation("title is required"));
        }
        Ok(())
    }
}

/// Which issue an open form is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    New,
    Existing(IssueId),
}

impl EditTarget {
    pub fn existing_id(self) -> Option<IssueId> {
        match self {
            Self::New => None,
            Self::Existing(id) => Some(id),
        }
    }
}

/// An open create/edit form. At most one exists at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    target: EditTarget,
    /// Current form content; kept across failed saves so nothing is re-typed.
    pub draft: IssueDraft,
}

impl PendingEdit {
    pub fn create() -> Self {
        Self {
            target: EditTarget::New,
            draft: IssueDraft::default(),
        }
    }

    pub fn edit(issue: &Issue) -> Self {
        Self {
            target: EditTarget::Existing(issue.id),
            draft: IssueDraft::from_issue(issue),
        }
    }

    pub fn target(&self) -> EditTarget {
        self.target
    }

    pub fn is_new(&self) -> bool {
        self.target == EditTarget::New
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_form_defaults() {
        let pending = PendingEdit::create();
        assert!(pending.is_new());
        assert_eq!(pending.draft.status, Status::Open);
        assert_eq!(pending.draft.priority, Priority::Medium);
        assert!(pending.draft.title.is_empty());
    }

    #[test]
    fn edit_form_prefills_from_issue() {
        let issue = Issue {
            id: IssueId::new(5),
            title: "Crash on save".into(),
            description: Some("steps".into()),
            status: Status::Unknown,
            priority: Priority::High,
            assignee: Some("dana".into()),
            created_at: None,
            updated_at: None,
        };
        let pending = PendingEdit::edit(&issue);
        assert_eq!(pending.target(), EditTarget::Existing(IssueId::new(5)));
        assert_eq!(pending.draft.title, "Crash on save");
        assert_eq!(pending.draft.status, Status::Open);
        assert_eq!(pending.draft.priority, Priority::High);
        assert_eq!(pending.draft.assignee.as_deref(), Some("dana"));
    }

    #[test]
    fn normalized_trims_and_drops_blanks() {
        let draft = IssueDraft {
            title: "  Title  ".into(),
            description: Some("   ".into()),
            assignee: Some(" erin ".into()),
            ..IssueDraft::default()
        }
        .normalized();
        assert_eq!(draft.title, "Title");
        assert_eq!(draft.description, None);
        assert_eq!(draft.assignee.as_deref(), Some("erin"));
    }

    #[test]
    fn blank_title_fails_validation() {
        for title in ["", "   ", "\t\n"] {
            let err = IssueDraft::new(title).validate().unwrap_err();
            assert!(err.is_validation());
        }
        assert!(IssueDraft::new("ok").validate().is_ok());
    }
}
