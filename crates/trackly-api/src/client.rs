// Async HTTP client for the issue tracker JSON API.
//
// Resource paths: /issues, /issues/{id}, /health
// Errors: any non-2xx carries the raw response body as its message.

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{HealthResponse, IssueListResponse, IssuePayload, IssueResponse};

/// Async client for the issues resource.
///
/// One request per call, no retries. Every failure (transport, status,
/// body) comes back as an [`Error`] for the caller to surface.
#[derive(Debug, Clone)]
pub struct IssuesClient {
    http: reqwest::Client,
    base_url: Url,
}

impl IssuesClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` using the given transport settings.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base path ends with `/` so relative joins append to it.
    ///
    /// `http://host:8000` and `http://host:8000/` both become
    /// `http://host:8000/`; `http://host/api` becomes `http://host/api/`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized API root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            trace!(bytes = body.len(), "response body received");
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body: body.clone(),
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        Error::Api {
            status: status.as_u16(),
            message: if raw.is_empty() {
                status.to_string()
            } else {
                raw
            },
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Health ───────────────────────────────────────────────────────

    pub async fn health(&self) -> Result<HealthResponse, Error> {
        self.get("health").await
    }

    // ── Issues ───────────────────────────────────────────────────────

    /// `GET /issues` with the given query parameters, in order.
    pub async fn list_issues(
        &self,
        params: &[(&str, String)],
    ) -> Result<IssueListResponse, Error> {
        self.get_with_params("issues", params).await
    }

    pub async fn get_issue(&self, id: u64) -> Result<IssueResponse, Error> {
        self.get(&format!("issues/{id}")).await
    }

    pub async fn create_issue(&self, body: &IssuePayload) -> Result<IssueResponse, Error> {
        self.post("issues", body).await
    }

    pub async fn update_issue(
        &self,
        id: u64,
        body: &IssuePayload,
    ) -> Result<IssueResponse, Error> {
        self.put(&format!("issues/{id}"), body).await
    }
}
