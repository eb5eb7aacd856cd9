//! Shared runtime state for the portal client.
//!
//! All types here are `Clone`-able (via `Arc` or copy). The scheduler and
//! any front end share one [`AppState`]; this module owns nothing async
//! itself beyond the lock and bus types.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rfp_audit::{AuditReport, SessionFilter};
use rfp_connectivity::{ConnectivityMonitor, ConnectivityState};
use rfp_reconcile::{FeedItem, RejectionCursor};
use rfp_schemas::{Session, Stats};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};

// ---------------------------------------------------------------------------
// ViewId
// ---------------------------------------------------------------------------

/// The fixed set of named views a front end can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewId {
    /// Primary operational view: stats, active sessions, live alerts.
    Dashboard,
    /// Audit/history view: filtered session snapshot plus merged feed.
    Audit,
}

impl ViewId {
    /// Parse a user-supplied view name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Some(ViewId::Dashboard),
            "audit" => Some(ViewId::Audit),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// UiMsg: presentation event bus payload
// ---------------------------------------------------------------------------

/// Point-in-time status surfaced to the front end after every cycle and
/// probe.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// `None` until the first probe has run.
    pub connectivity: Option<ConnectivityState>,
    pub active_view: ViewId,
    /// Stamped once per completed refresh cycle, after the join.
    pub last_updated: Option<DateTime<Utc>>,
}

/// Messages broadcast to whatever renders the client.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiMsg {
    Status(StatusSnapshot),
    /// A newly-seen rejected reading of kind `validation`. Other rejection
    /// kinds never alert; they only appear in the audit feed.
    RejectionAlert {
        id: i64,
        tag_id: String,
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Panes
// ---------------------------------------------------------------------------

/// Presentation slots of the dashboard view. A failed fetch leaves its slot
/// untouched (stale-but-present) rather than clearing it.
#[derive(Clone, Debug, Default)]
pub struct DashboardPane {
    pub stats: Option<Stats>,
    pub active_sessions: Vec<Session>,
}

/// Presentation slots of the audit view.
#[derive(Clone, Debug, Default)]
pub struct AuditPane {
    pub report: Option<AuditReport>,
    pub feed: Vec<FeedItem>,
}

// ---------------------------------------------------------------------------
// ControlState
// ---------------------------------------------------------------------------

/// The explicit reconciliation context: every cross-cycle mutable value
/// lives here, not in ambient module state.
#[derive(Debug)]
pub struct ControlState {
    /// Read by the scheduler, written only by the view-switch action.
    pub active_view: ViewId,
    /// Written only by explicit user filter actions.
    pub filter: SessionFilter,
    /// High-water mark over rejected-reading identifiers.
    pub cursor: RejectionCursor,
    pub monitor: ConnectivityMonitor,
    /// Single per-cycle marker, stamped after the fan-out join.
    pub last_updated: Option<DateTime<Utc>>,
}

impl ControlState {
    fn new() -> Self {
        Self {
            active_view: ViewId::Dashboard,
            filter: SessionFilter::empty(),
            cursor: RejectionCursor::new(),
            monitor: ConnectivityMonitor::new(),
            last_updated: None,
        }
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Cloneable (Arc) handle shared between the scheduler and the front end.
#[derive(Clone)]
pub struct AppState {
    /// Broadcast bus for status updates and alerts.
    pub bus: broadcast::Sender<UiMsg>,
    pub control: Arc<RwLock<ControlState>>,
    pub dashboard: Arc<RwLock<DashboardPane>>,
    pub audit: Arc<RwLock<AuditPane>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let (bus, _rx) = broadcast::channel::<UiMsg>(1024);
        Self {
            bus,
            control: Arc::new(RwLock::new(ControlState::new())),
            dashboard: Arc::new(RwLock::new(DashboardPane::default())),
            audit: Arc::new(RwLock::new(AuditPane::default())),
        }
    }

    /// Snapshot the status fields for the bus.
    pub async fn status_snapshot(&self) -> StatusSnapshot {
        let c = self.control.read().await;
        StatusSnapshot {
            connectivity: c.monitor.current(),
            active_view: c.active_view,
            last_updated: c.last_updated,
        }
    }
}
