//! Client configuration.
//!
//! Precedence, lowest to highest: built-in defaults, optional JSON config
//! file, `RFP_*` environment variables. Loading never requires a file to
//! exist; a missing file just means defaults.
//!
//! Environment overrides:
//! - `RFP_BASE_URL`
//! - `RFP_DASHBOARD_REFRESH_SECS`
//! - `RFP_PROBE_INTERVAL_SECS`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Effective client configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root of the upstream portal API, without a trailing `/api`.
    pub base_url: String,
    /// Dashboard refresh period while the dashboard view is active.
    pub dashboard_refresh_secs: u64,
    /// Liveness probe cadence, independent of the active view.
    pub probe_interval_secs: u64,
    /// Session snapshot cap for the audit view (backend cap is 500).
    pub audit_limit: usize,
    /// Per-source fetch size for the merged event feed.
    pub feed_fetch_limit: usize,
    /// Display window of the merged feed after truncation.
    pub feed_window: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            dashboard_refresh_secs: 3,
            probe_interval_secs: 5,
            audit_limit: 500,
            feed_fetch_limit: 100,
            feed_window: 50,
        }
    }
}

impl ClientConfig {
    /// Load configuration from an optional JSON file, then apply environment
    /// overrides on top.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) if p.exists() => {
                let raw = fs::read_to_string(p)
                    .with_context(|| format!("read config file {}", p.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parse config file {}", p.display()))?
            }
            _ => Self::default(),
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("RFP_BASE_URL") {
            if !v.trim().is_empty() {
                self.base_url = v;
            }
        }
        if let Some(v) = env_u64("RFP_DASHBOARD_REFRESH_SECS") {
            self.dashboard_refresh_secs = v;
        }
        if let Some(v) = env_u64("RFP_PROBE_INTERVAL_SECS") {
            self.probe_interval_secs = v;
        }
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok()?.trim().parse().ok()
}
