// ── Issue domain types ──

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned issue identifier. Immutable once issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(u64);

impl IssueId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for IssueId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IssueId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(Self)
    }
}

/// Workflow status. `Unknown` absorbs values this client does not recognise.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Status {
    #[default]
    Open,
    InProgress,
    Closed,
    Unknown,
}

/// Issue priority. `Unknown` absorbs values this client does not recognise.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Unknown,
}

/// A trackable work item. Owned by the server; the client only ever holds
/// transient copies taken from the latest response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: IssueId,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    pub assignee: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of list results together with the server's pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IssuePage {
    pub issues: Vec<Issue>,
    /// Total matching issues across all pages.
    pub total: u64,
    /// Page the server actually served.
    pub page: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn issue_id_parses_with_hash_prefix() {
        assert_eq!("#42".parse::<IssueId>().unwrap(), IssueId::new(42));
        assert_eq!(" 7 ".parse::<IssueId>().unwrap().get(), 7);
        assert!("abc".parse::<IssueId>().is_err());
    }

    #[test]
    fn status_wire_names_are_kebab_case() {
        assert_eq!(Status::InProgress.to_string(), "in-progress");
        assert_eq!("IN-PROGRESS".parse::<Status>().unwrap(), Status::InProgress);
        assert!("bogus".parse::<Status>().is_err());
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(Priority::High.as_ref(), "high");
    }
}
