// Wire types for the issue tracker JSON API.
//
// Field names follow the server (`camelCase`). Enumerated values stay as
// strings here; `trackly-core` normalizes them into domain enums.

use serde::{Deserialize, Serialize};

/// A single issue as returned by `GET /issues/{id}`, `POST` and `PUT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueResponse {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// One page of `GET /issues`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueListResponse {
    /// Missing or `null` is treated as an empty page.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub issues: Vec<IssueResponse>,
    pub total: u64,
    pub page: u32,
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// Body shared by `POST /issues` and `PUT /issues/{id}`.
///
/// Absent optional fields are omitted from the JSON entirely; on update the
/// server leaves the corresponding stored value untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuePayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

/// `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<IssueResponse>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<IssueResponse>>::deserialize(deserializer)?.unwrap_or_default())
}
