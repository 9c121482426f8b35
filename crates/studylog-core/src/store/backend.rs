//! Remote record backend.
//!
//! [`SessionBackend`] is the seam between the record store and whatever
//! holds the data. The store takes it by constructor injection, so tests
//! run against an in-memory implementation and production runs against
//! [`HttpBackend`], a client for a generic authenticated REST record
//! backend (PostgREST-style row filters, bearer + api-key auth).

use std::future::Future;

use reqwest::Client;
use url::Url;
use uuid::Uuid;

use super::types::{NewSession, SessionRecord, Topic};
use crate::config::BackendConfig;
use crate::error::{BackendError, ConfigError};

/// Operations the record store needs from the remote data store.
///
/// Futures are `Send` so store handles can live inside spawned tasks.
pub trait SessionBackend {
    /// Identity of the authenticated owner, or `None` when no identity
    /// is active.
    fn current_identity(&self) -> impl Future<Output = Result<Option<Uuid>, BackendError>> + Send;

    /// Full topic reference set.
    fn list_topics(&self) -> impl Future<Output = Result<Vec<Topic>, BackendError>> + Send;

    /// The owner's sessions, ordered by date descending.
    fn list_sessions(
        &self,
        owner_id: Uuid,
    ) -> impl Future<Output = Result<Vec<SessionRecord>, BackendError>> + Send;

    /// Insert a session and return the stored row.
    fn insert_session(
        &self,
        new: NewSession,
    ) -> impl Future<Output = Result<SessionRecord, BackendError>> + Send;
}

/// HTTP client for the hosted record backend.
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    api_key: String,
    access_token: String,
}

impl HttpBackend {
    pub fn new(base_url: Url, api_key: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key: api_key.into(),
            access_token: access_token.into(),
        }
    }

    pub fn from_config(cfg: &BackendConfig) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&cfg.url).map_err(|e| ConfigError::InvalidValue {
            key: "backend.url".into(),
            message: e.to_string(),
        })?;
        Ok(Self::new(base_url, &cfg.api_key, &cfg.access_token))
    }

    fn endpoint(&self, path: &str, operation: &'static str) -> Result<Url, BackendError> {
        self.base_url.join(path).map_err(|e| BackendError::Decode {
            operation,
            message: format!("bad endpoint url: {e}"),
        })
    }

    fn get(&self, url: Url) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
    }

    fn post(&self, url: Url) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
    }
}

fn expect_success(
    resp: reqwest::Response,
    operation: &'static str,
) -> Result<reqwest::Response, BackendError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(BackendError::Status {
            operation,
            status: status.as_u16(),
        })
    }
}

impl SessionBackend for HttpBackend {
    async fn current_identity(&self) -> Result<Option<Uuid>, BackendError> {
        const OP: &str = "current_identity";
        let url = self.endpoint("auth/v1/user", OP)?;
        let resp = self.get(url).send().await?;
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        let body: serde_json::Value = expect_success(resp, OP)?.json().await?;
        match body.get("id").and_then(|v| v.as_str()) {
            Some(id) => Uuid::parse_str(id)
                .map(Some)
                .map_err(|e| BackendError::Decode {
                    operation: OP,
                    message: format!("bad identity id: {e}"),
                }),
            None => Ok(None),
        }
    }

    async fn list_topics(&self) -> Result<Vec<Topic>, BackendError> {
        const OP: &str = "list_topics";
        let mut url = self.endpoint("rest/v1/topics", OP)?;
        url.query_pairs_mut().append_pair("select", "id,code,title");
        let resp = self.get(url).send().await?;
        Ok(expect_success(resp, OP)?.json().await?)
    }

    async fn list_sessions(&self, owner_id: Uuid) -> Result<Vec<SessionRecord>, BackendError> {
        const OP: &str = "list_sessions";
        let mut url = self.endpoint("rest/v1/study_sessions", OP)?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("owner_id", &format!("eq.{owner_id}"))
            .append_pair("order", "date.desc");
        let resp = self.get(url).send().await?;
        Ok(expect_success(resp, OP)?.json().await?)
    }

    async fn insert_session(&self, new: NewSession) -> Result<SessionRecord, BackendError> {
        const OP: &str = "insert_session";
        let url = self.endpoint("rest/v1/study_sessions", OP)?;
        let resp = self
            .post(url)
            .header("Prefer", "return=representation")
            .json(&new)
            .send()
            .await?;
        // The backend answers an insert with the array of stored rows.
        let mut rows: Vec<SessionRecord> = expect_success(resp, OP)?.json().await?;
        if rows.is_empty() {
            return Err(BackendError::Decode {
                operation: OP,
                message: "insert returned no rows".into(),
            });
        }
        Ok(rows.swap_remove(0))
    }
}
