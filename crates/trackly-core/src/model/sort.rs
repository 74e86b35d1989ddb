// ── Sort types ──

use serde::{Deserialize, Serialize};

/// Column the server sorts by. Wire names match the issue JSON fields.
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
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SortField {
    Id,
    Title,
    Status,
    Priority,
    Assignee,
    CreatedAt,
    #[default]
    UpdatedAt,
}

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
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDir {
    /// Default direction for a newly chosen sort field.
    Asc,
    #[default]
    Desc,
}

impl SortDir {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_wire_names() {
        assert_eq!(SortField::UpdatedAt.to_string(), "updatedAt");
        assert_eq!(SortField::Id.as_ref(), "id");
        assert_eq!("createdAt".parse::<SortField>().unwrap(), SortField::CreatedAt);
    }

    #[test]
    fn sort_dir_toggles() {
        assert_eq!(SortDir::Asc.toggled(), SortDir::Desc);
        assert_eq!(SortDir::Desc.toggled(), SortDir::Asc);
        assert_eq!("DESC".parse::<SortDir>().unwrap(), SortDir::Desc);
    }
}
