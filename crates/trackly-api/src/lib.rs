// trackly-api: Async Rust client for the issue tracker JSON API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::IssuesClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{HealthResponse, IssueListResponse, IssuePayload, IssueResponse};
