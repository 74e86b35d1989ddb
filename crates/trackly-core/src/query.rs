// ── Query construction ──
//
// Pure projection of a `ViewState` into list request parameters.
// Rebuilt on every cycle; never stored.

use serde::Serialize;
use url::form_urlencoded;

use crate::model::{SortDir, SortField};
use crate::view_state::{FilterKey, ViewState};

/// Parameters for one `GET /issues` call. Value-equal: two descriptors
/// built from equal states compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDescriptor {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub page: u32,
    pub page_size: u32,
    pub sort_by: SortField,
    pub sort_dir: SortDir,
}

impl QueryDescriptor {
    /// Build the descriptor for `state`. Total and deterministic.
    pub fn build(state: &ViewState) -> Self {
        let filter = |key| {
            state
                .filters()
                .get(key)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };

        Self {
            search: filter(FilterKey::Search),
            status: filter(FilterKey::Status),
            priority: filter(FilterKey::Priority),
            assignee: filter(FilterKey::Assignee),
            page: state.page(),
            page_size: state.page_size(),
            sort_by: state.sort_by(),
            sort_dir: state.sort_dir(),
        }
    }

    /// Ordered `(name, value)` pairs. Filters first (only the ones set),
    /// then paging and sort, which are always present.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(8);
        let filters = [
            ("search", &self.search),
            ("status", &self.status),
            ("priority", &self.priority),
            ("assignee", &self.assignee),
        ];
        for (name, value) in filters {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                params.push((name, v.to_owned()));
            }
        }
        params.push(("page", self.page.to_string()));
        params.push(("pageSize", self.page_size.to_string()));
        params.push(("sortBy", self.sort_by.to_string()));
        params.push(("sortDir", self.sort_dir.to_string()));
        params
    }

    /// URL-encoded query string (without the leading `?`).
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in self.params() {
            serializer.append_pair(name, &value);
        }
        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn status_filter_on_page_two() {
        let mut state = ViewState::default();
        state.set_filter(FilterKey::Status, "open");
        state.apply_server_totals(25, 1);
        assert!(state.next_page());

        let query = QueryDescriptor::build(&state);
        let qs = query.to_query_string();

        assert_eq!(qs, "status=open&page=2&pageSize=10&sortBy=updatedAt&sortDir=desc");
        for absent in ["search=", "priority=", "assignee="] {
            assert!(!qs.contains(absent), "{absent} leaked into {qs}");
        }
    }

    #[test]
    fn never_emits_empty_filters() {
        let mut state = ViewState::default();
        for key in FilterKey::iter() {
            state.set_filter(key, "");
        }
        let params = QueryDescriptor::build(&state).params();
        let names: Vec<_> = params.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["page", "pageSize", "sortBy", "sortDir"]);
        assert!(params.iter().all(|(_, v)| !v.is_empty()));
    }

    #[test]
    fn hand_built_empty_filter_is_still_omitted() {
        let query = QueryDescriptor {
            search: Some(String::new()),
            status: None,
            priority: Some("high".into()),
            assignee: None,
            page: 1,
            page_size: 10,
            sort_by: SortField::Title,
            sort_dir: SortDir::Asc,
        };
        assert_eq!(
            query.to_query_string(),
            "priority=high&page=1&pageSize=10&sortBy=title&sortDir=asc"
        );
    }

    #[test]
    fn all_filters_in_fixed_order_and_encoded() {
        let mut state = ViewState::default();
        state.set_filter(FilterKey::Assignee, "bob");
        state.set_filter(FilterKey::Priority, "high");
        state.set_filter(FilterKey::Search, "cannot save & exit");
        state.set_filter(FilterKey::Status, "in-progress");

        assert_eq!(
            QueryDescriptor::build(&state).to_query_string(),
            "search=cannot+save+%26+exit&status=in-progress&priority=high&assignee=bob\
             &page=1&pageSize=10&sortBy=updatedAt&sortDir=desc"
        );
    }

    #[test]
    fn equal_states_build_equal_descriptors() {
        let mut a = ViewState::default();
        let mut b = ViewState::default();
        a.set_sort(SortField::Priority);
        b.set_sort(SortField::Priority);
        assert_eq!(QueryDescriptor::build(&a), QueryDescriptor::build(&b));

        b.set_sort(SortField::Priority);
        assert_ne!(QueryDescriptor::build(&a), QueryDescriptor::build(&b));
    }
}
