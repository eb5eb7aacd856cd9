//! Snapshot fetcher boundary for the RFID portal API.
//!
//! This crate owns the API contract ([`PortalApi`]) and the reqwest-backed
//! implementation ([`HttpPortalApi`]). It performs no scheduling and keeps
//! no state between calls; each method is a single logical read against the
//! upstream service, returning a typed payload or an [`ApiError`].
//!
//! Failure isolation is the caller's job: errors from one fetch must never
//! abort a sibling fetch in the same refresh cycle.

use std::fmt;

use rfp_connectivity::ConnectivityState;
use rfp_schemas::{RejectedReading, RfidEvent, Session, SessionStatus, Stats};
use serde_json::Value;

mod http;

pub use http::HttpPortalApi;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors a [`PortalApi`] implementation may return.
#[derive(Debug)]
pub enum ApiError {
    /// Network or transport failure before a response was received.
    Transport(String),
    /// The upstream returned a non-success HTTP status.
    Status { code: u16, message: String },
    /// A response payload could not be decoded.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::Status { code, message } if message.is_empty() => {
                write!(f, "api http error status={code}")
            }
            ApiError::Status { code, message } => {
                write!(f, "api http error status={code}: {message}")
            }
            ApiError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

// ---------------------------------------------------------------------------
// PortalApi trait
// ---------------------------------------------------------------------------

/// Read-mostly contract against the upstream portal.
///
/// Object-safe so callers can hold an `Arc<dyn PortalApi>` without knowing
/// the concrete transport; `Send + Sync` so it crosses task boundaries.
#[async_trait::async_trait]
pub trait PortalApi: Send + Sync {
    /// Dashboard statistics, recomputed by the backend per fetch.
    async fn fetch_stats(&self) -> Result<Stats, ApiError>;

    /// Recency-ordered session history, optionally filtered by status
    /// server-side.
    async fn fetch_sessions(
        &self,
        limit: usize,
        status: Option<SessionStatus>,
    ) -> Result<Vec<Session>, ApiError>;

    /// Sessions still waiting for their antenna-2 read.
    async fn fetch_active_sessions(&self) -> Result<Vec<Session>, ApiError>;

    /// Accepted read events, most recent first.
    async fn fetch_recent_events(&self, limit: usize) -> Result<Vec<RfidEvent>, ApiError>;

    /// Rejected readings, highest identifier first.
    async fn fetch_recent_rejected(&self, limit: usize)
        -> Result<Vec<RejectedReading>, ApiError>;

    /// Liveness probe against the API root. Never fails: every failure mode
    /// maps to [`ConnectivityState::Offline`].
    async fn probe(&self) -> ConnectivityState;

    /// Antenna/device configuration, passed through as opaque key/value.
    async fn get_device_config(&self) -> Result<Value, ApiError>;

    /// Update the antenna/device configuration. The payload is not
    /// interpreted by the client.
    async fn set_device_config(&self, payload: Value) -> Result<Value, ApiError>;

    /// Device status passthrough.
    async fn device_info(&self) -> Result<Value, ApiError>;

    /// Ask the backend to refresh its device connection. Passthrough.
    async fn device_refresh(&self) -> Result<Value, ApiError>;
}
