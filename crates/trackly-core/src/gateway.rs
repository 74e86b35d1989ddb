// ── API gateway seam ──
//
// The only component that performs I/O. The controller talks to an
// `IssueGateway`; production uses `trackly_api::IssuesClient`, tests
// substitute an in-memory fake.

use std::future::Future;

use tracing::debug;

use trackly_api::transport::{TlsMode, TransportConfig};
use trackly_api::{IssuePayload, IssuesClient};

use crate::config::{ClientConfig, TlsVerification};
use crate::edit::IssueDraft;
use crate::error::CoreError;
use crate::model::{Issue, IssueId, IssuePage};
use crate::query::QueryDescriptor;

/// Remote operations on the issue collection.
///
/// Each call issues exactly one request and never retries. Failures are
/// reported, not recovered.
pub trait IssueGateway {
    fn list_issues(
        &self,
        query: &QueryDescriptor,
    ) -> impl Future<Output = Result<IssuePage, CoreError>> + Send;

    fn create_issue(
        &self,
        draft: &IssueDraft,
    ) -> impl Future<Output = Result<Issue, CoreError>> + Send;

    /// Fields absent from `draft` are omitted from the body, leaving the
    /// stored value unchanged.
    fn update_issue(
        &self,
        id: IssueId,
        draft: &IssueDraft,
    ) -> impl Future<Output = Result<Issue, CoreError>> + Send;

    fn get_issue(&self, id: IssueId) -> impl Future<Output = Result<Issue, CoreError>> + Send;
}

impl IssueGateway for IssuesClient {
    async fn list_issues(&self, query: &QueryDescriptor) -> Result<IssuePage, CoreError> {
        let params = query.params();
        let page = IssuesClient::list_issues(self, &params).await?;
        debug!(total = page.total, page = page.page, rows = page.issues.len(), "list_issues");
        Ok(page.into())
    }

    async fn create_issue(&self, draft: &IssueDraft) -> Result<Issue, CoreError> {
        let created = IssuesClient::create_issue(self, &IssuePayload::from(draft)).await?;
        Ok(created.into())
    }

    async fn update_issue(&self, id: IssueId, draft: &IssueDraft) -> Result<Issue, CoreError> {
        let updated = IssuesClient::update_issue(self, id.get(), &IssuePayload::from(draft)).await?;
        Ok(updated.into())
    }

    async fn get_issue(&self, id: IssueId) -> Result<Issue, CoreError> {
        let issue = IssuesClient::get_issue(self, id.get()).await?;
        Ok(issue.into())
    }
}

// ── Construction ─────────────────────────────────────────────────

/// Build the HTTP client described by `config`.
pub fn connect(config: &ClientConfig) -> Result<IssuesClient, CoreError> {
    let transport = TransportConfig {
        tls: tls_to_transport(&config.tls),
        ..TransportConfig::default()
    }
    .with_timeout(config.timeout);
    debug!(url = %config.base_url, "building issue API client");
    Ok(IssuesClient::new(config.base_url.as_str(), &transport)?)
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
