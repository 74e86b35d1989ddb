// ── View state ──
//
// Single source of truth for pagination, sort and filter criteria.
// Fields are private: every mutation goes through a transition method,
// and each transition leaves `1 <= page <= max_page()` holding.

use serde::Serialize;
use tracing::debug;

use crate::model::{SortDir, SortField};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Largest page the server will serve.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Filterable fields, named as they appear in the query string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum FilterKey {
    Search,
    Status,
    Priority,
    Assignee,
}

/// Current filter criteria. An absent value means "no filter"; empty
/// strings are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filters {
    search: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    assignee: Option<String>,
}

impl Filters {
    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.slot(key).as_deref()
    }

    /// Active filters in query-string order.
    pub fn active(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        [
            FilterKey::Search,
            FilterKey::Status,
            FilterKey::Priority,
            FilterKey::Assignee,
        ]
        .into_iter()
        .filter_map(|key| self.get(key).map(|v| (key, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    fn slot(&self, key: FilterKey) -> &Option<String> {
        match key {
            FilterKey::Search => &self.search,
            FilterKey::Status => &self.status,
            FilterKey::Priority => &self.priority,
            FilterKey::Assignee => &self.assignee,
        }
    }

    fn slot_mut(&mut self, key: FilterKey) -> &mut Option<String> {
        match key {
            FilterKey::Search => &mut self.search,
            FilterKey::Status => &mut self.status,
            FilterKey::Priority => &mut self.priority,
            FilterKey::Assignee => &mut self.assignee,
        }
    }
}

/// Highest valid page for `total` items at `page_size` per page. Never
/// below 1, so an empty result set still has a page to show.
pub fn max_page(total: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    let pages = total.div_ceil(size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Client-held view state driving every list query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    page: u32,
    page_size: u32,
    /// Last count reported by the server; never computed locally.
    total: u64,
    sort_by: SortField,
    sort_dir: SortDir,
    filters: Filters,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, SortField::default(), SortDir::default())
    }
}

impl ViewState {
    pub fn new(page_size: u32, sort_by: SortField, sort_dir: SortDir) -> Self {
        Self {
            page: 1,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            total: 0,
            sort_by,
            sort_dir,
            filters: Filters::default(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn sort_by(&self) -> SortField {
        self.sort_by
    }

    pub fn sort_dir(&self) -> SortDir {
        self.sort_dir
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn max_page(&self) -> u32 {
        max_page(self.total, self.page_size)
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Set one filter. An empty value clears it. Resets to page 1.
    pub fn set_filter(&mut self, key: FilterKey, value: &str) {
        *self.filters.slot_mut(key) = if value.is_empty() {
            None
        } else {
            Some(value.to_owned())
        };
        self.page = 1;
    }

    /// Change the page size (clamped to `1..=MAX_PAGE_SIZE`). Resets to page 1.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self.page = 1;
    }

    /// Sort by `field`. Choosing the current field flips the direction;
    /// a new field starts ascending. Resets to page 1.
    pub fn set_sort(&mut self, field: SortField) {
        if field == self.sort_by {
            self.sort_dir = self.sort_dir.toggled();
        } else {
            self.sort_by = field;
            self.sort_dir = SortDir::Asc;
        }
        self.page = 1;
    }

    /// Advance one page. Returns `false` (and changes nothing) on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page < self.max_page() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. Returns `false` (and changes nothing) on page 1.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `page`, clamped into range. Returns whether the page changed.
    pub fn jump_to_page(&mut self, page: u32) -> bool {
        let target = page.clamp(1, self.max_page());
        let changed = target != self.page;
        self.page = target;
        changed
    }

    /// Record the server's count and the page it actually served.
    ///
    /// The server is authoritative: its page replaces ours, then the result
    /// is clamped so the range invariant survives a shrinking `total`.
    pub fn apply_server_totals(&mut self, total: u64, page: u32) {
        self.total = total;
        if page != self.page {
            debug!(requested = self.page, served = page, "server reported a different page");
        }
        self.page = page.clamp(1, self.max_page());
    }
}
