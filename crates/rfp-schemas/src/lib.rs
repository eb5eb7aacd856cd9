//! Wire and presentation data model for the RFID portal client.
//!
//! Every type here mirrors a payload of the upstream read-only API and is
//! treated as an immutable snapshot: the client filters and aggregates
//! copies, it never mutates a record it received.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod display;
pub mod time;

pub use display::{format_duration, format_duration_opt};

// ---------------------------------------------------------------------------
// Session status
// ---------------------------------------------------------------------------

/// Lifecycle state of a production session.
///
/// The backend emits the Portuguese wire values; variant names stay English.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    /// The tag has passed antenna 1 but not yet antenna 2.
    #[serde(rename = "em_producao")]
    InProgress,
    /// Both antenna reads are present; `duration_seconds` is filled.
    #[serde(rename = "finalizado")]
    Finalized,
}

impl SessionStatus {
    /// The exact string the backend uses for this status.
    pub fn as_wire(&self) -> &'static str {
        match self {
            SessionStatus::InProgress => "em_producao",
            SessionStatus::Finalized => "finalizado",
        }
    }

    /// Parse a user- or wire-supplied status string.
    ///
    /// Accepts the wire values plus English aliases for CLI convenience.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "em_producao" | "in_progress" | "active" => Some(SessionStatus::InProgress),
            "finalizado" | "finalized" | "completed" => Some(SessionStatus::Finalized),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One correlated production cycle: an antenna-1 (entry) read paired with an
/// antenna-2 (exit) read by the backend.
///
/// Invariant (enforced upstream, relied upon here): `duration_seconds` is
/// present iff `status` is [`SessionStatus::Finalized`] and both antenna
/// timestamps are present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Server-assigned, unique, opaque to the client.
    pub id: i64,
    pub tag_id: String,
    /// Entry read (antenna 1).
    #[serde(default, with = "time::utc_instant_opt")]
    pub antenna_1_time: Option<DateTime<Utc>>,
    /// Exit read (antenna 2).
    #[serde(default, with = "time::utc_instant_opt")]
    pub antenna_2_time: Option<DateTime<Utc>>,
    /// Production time in seconds, non-negative.
    pub duration_seconds: Option<f64>,
    pub status: SessionStatus,
    #[serde(with = "time::utc_instant")]
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn is_finalized(&self) -> bool {
        self.status == SessionStatus::Finalized
    }

    /// Seconds elapsed since the entry read, for in-progress display.
    ///
    /// `None` when the session has no antenna-1 time yet. Clamped at zero so
    /// a slightly-ahead server clock never yields a negative elapsed time.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> Option<i64> {
        let start = self.antenna_1_time?;
        Some((now - start).num_seconds().max(0))
    }
}

// ---------------------------------------------------------------------------
// Accepted event
// ---------------------------------------------------------------------------

/// A single accepted tag read from one antenna.
///
/// Ephemeral: only ever held inside the current feed window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RfidEvent {
    pub id: i64,
    pub tag_id: String,
    /// 1 = entry, 2 = exit.
    pub antenna_number: u8,
    #[serde(with = "time::utc_instant")]
    pub event_time: DateTime<Utc>,
    /// Production session this read was correlated into, when any.
    pub session_id: Option<i64>,
}

// ---------------------------------------------------------------------------
// Rejected reading
// ---------------------------------------------------------------------------

/// Why the backend declined a tag observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasonKind {
    Blocked,
    Validation,
    Timeout,
}

/// A tag observation the backend declined to accept into a session.
///
/// `id` is monotonically increasing and is the only ordering the client
/// trusts for "new since last check" comparisons; `event_time` ordering is
/// used for display merge only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RejectedReading {
    pub id: i64,
    pub tag_id: String,
    pub antenna_number: Option<u8>,
    #[serde(with = "time::utc_instant")]
    pub event_time: DateTime<Utc>,
    /// Human-readable reason text from the backend.
    pub reason: String,
    pub reason_type: ReasonKind,
}

// ---------------------------------------------------------------------------
// Dashboard stats
// ---------------------------------------------------------------------------

/// Aggregate counters recomputed by the backend on every fetch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_sessions: i64,
    pub active_sessions: i64,
    pub completed_today: i64,
    pub total_completed: i64,
    /// Mean production time over all finalized sessions, seconds.
    pub average_duration: f64,
    /// Mean production time over sessions finalized today, seconds.
    pub average_duration_today: f64,
}
