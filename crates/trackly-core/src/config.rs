// ── Runtime client configuration ──
//
// Describes *where* the API lives and the initial view defaults.
// Never touches disk: the CLI builds a `ClientConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::model::{SortDir, SortField};
use crate::view_state::{DEFAULT_PAGE_SIZE, ViewState};

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development servers).
    DangerAcceptInvalid,
}

/// Configuration for talking to a single issue API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root (e.g., `http://localhost:8000`).
    pub base_url: Url,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Initial page size for a fresh view.
    pub page_size: u32,
    /// Initial sort column for a fresh view.
    pub sort_by: SortField,
    /// Initial sort direction for a fresh view.
    pub sort_dir: SortDir,
}

impl ClientConfig {
    /// Config for `base_url` with stock defaults for everything else.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: SortField::default(),
            sort_dir: SortDir::default(),
        }
    }

    /// A fresh view seeded with this config's paging and sort defaults.
    pub fn initial_view_state(&self) -> ViewState {
        ViewState::new(self.page_size, self.sort_by, self.sort_dir)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn initial_view_state_uses_config_defaults() {
        let mut cfg = ClientConfig::new(DEFAULT_API_URL.parse().unwrap());
        cfg.page_size = 25;
        cfg.sort_by = SortField::Priority;
        cfg.sort_dir = SortDir::Asc;

        let state = cfg.initial_view_state();
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), 25);
        assert_eq!(state.sort_by(), SortField::Priority);
        assert_eq!(state.sort_dir(), SortDir::Asc);
    }
}
