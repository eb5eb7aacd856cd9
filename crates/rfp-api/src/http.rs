//! reqwest-backed [`PortalApi`] implementation.

use rfp_connectivity::ConnectivityState;
use rfp_schemas::{RejectedReading, RfidEvent, Session, SessionStatus, Stats};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::{ApiError, PortalApi};

/// HTTP client for the portal API.
///
/// The base URL points at the service root (e.g. `http://localhost:8000`);
/// data endpoints live under `/api`, the liveness probe hits the root
/// itself. Timeouts are left at reqwest defaults; callers isolate
/// failures per fetch rather than racing a client-side deadline.
#[derive(Clone, Debug)]
pub struct HttpPortalApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpPortalApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn root_url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut req = self.http.get(&url);
        if !query.is_empty() {
            req = req.query(query);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                code: status.as_u16(),
                message,
            });
        }
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: String,
        body: Option<&Value>,
    ) -> Result<T, ApiError> {
        let mut req = self.http.post(&url);
        if let Some(b) = body {
            req = req.json(b);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                code: status.as_u16(),
                message,
            });
        }
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl PortalApi for HttpPortalApi {
    async fn fetch_stats(&self) -> Result<Stats, ApiError> {
        self.get_json(self.url("api/stats"), &[]).await
    }

    async fn fetch_sessions(
        &self,
        limit: usize,
        status: Option<SessionStatus>,
    ) -> Result<Vec<Session>, ApiError> {
        let mut query: Vec<(&str, String)> = vec![("limit", limit.to_string())];
        if let Some(s) = status {
            query.push(("status", s.as_wire().to_string()));
        }
        self.get_json(self.url("api/sessions"), &query).await
    }

    async fn fetch_active_sessions(&self) -> Result<Vec<Session>, ApiError> {
        self.get_json(self.url("api/sessions/active"), &[]).await
    }

    async fn fetch_recent_events(&self, limit: usize) -> Result<Vec<RfidEvent>, ApiError> {
        self.get_json(
            self.url("api/events/recent"),
            &[("limit", limit.to_string())],
        )
        .await
    }

    async fn fetch_recent_rejected(
        &self,
        limit: usize,
    ) -> Result<Vec<RejectedReading>, ApiError> {
        self.get_json(
            self.url("api/rejected/recent"),
            &[("limit", limit.to_string())],
        )
        .await
    }

    async fn probe(&self) -> ConnectivityState {
        match self.http.get(self.root_url()).send().await {
            Ok(resp) if resp.status().is_success() => ConnectivityState::Online,
            Ok(resp) => {
                debug!(status = resp.status().as_u16(), "probe non-success");
                ConnectivityState::Offline
            }
            Err(e) => {
                debug!(error = %e, "probe transport failure");
                ConnectivityState::Offline
            }
        }
    }

    async fn get_device_config(&self) -> Result<Value, ApiError> {
        self.get_json(self.url("api/config"), &[]).await
    }

    async fn set_device_config(&self, payload: Value) -> Result<Value, ApiError> {
        self.post_json(self.url("api/config"), Some(&payload)).await
    }

    async fn device_info(&self) -> Result<Value, ApiError> {
        self.get_json(self.url("device/info"), &[]).await
    }

    async fn device_refresh(&self) -> Result<Value, ApiError> {
        self.post_json(self.url("device/refresh"), None).await
    }
}
