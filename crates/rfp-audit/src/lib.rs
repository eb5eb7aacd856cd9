//! Audit query engine.
//!
//! Applies a conjunction of optional predicates to an in-memory session
//! snapshot and computes summary aggregates. Pure and deterministic: the
//! same snapshot and filter always produce the same report, input order is
//! preserved, and nothing is retained between calls.

use chrono::NaiveDate;
use rfp_schemas::{Session, SessionStatus};
use serde::{Deserialize, Serialize};

mod export;

pub use export::{default_export_filename, export_csv, ExportOutcome, CSV_HEADER};

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Transient audit filter; all four predicates are independent and
/// AND-combined. Constructed fresh per query, never persisted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionFilter {
    /// Sessions created on or after this calendar day (UTC).
    pub start_date: Option<NaiveDate>,
    /// Sessions created on or before this calendar day (UTC); the bound is
    /// inclusive of the entire day, not just its first instant.
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive substring over the tag identifier. Empty or
    /// whitespace-only matches everything.
    pub tag: Option<String>,
    /// Exact status match; absent matches everything.
    pub status: Option<SessionStatus>,
}

impl SessionFilter {
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` when no predicate constrains anything.
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.status.is_none()
            && self
                .tag
                .as_deref()
                .map_or(true, |t| t.trim().is_empty())
    }

    /// Does `session` pass every present predicate?
    pub fn matches(&self, session: &Session) -> bool {
        let day = session.created_at.date_naive();

        if let Some(start) = self.start_date {
            if day < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if day > end {
                return false;
            }
        }
        if let Some(tag) = self.tag.as_deref() {
            let needle = tag.trim();
            if !needle.is_empty()
                && !session
                    .tag_id
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if let Some(status) = self.status {
            if session.status != status {
                return false;
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Aggregates over a filtered session list.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AuditSummary {
    pub total: usize,
    pub finalized: usize,
    /// Mean of `duration_seconds` over sessions where it is present;
    /// 0.0 when none carry a duration.
    pub average_duration: f64,
}

/// Compute summary aggregates over an (already filtered) session list.
///
/// Sessions without a duration are excluded from both the numerator and
/// the denominator of the mean.
pub fn summarize(sessions: &[Session]) -> AuditSummary {
    let durations: Vec<f64> = sessions.iter().filter_map(|s| s.duration_seconds).collect();
    let average_duration = if durations.is_empty() {
        0.0
    } else {
        durations.iter().sum::<f64>() / durations.len() as f64
    };

    AuditSummary {
        total: sessions.len(),
        finalized: sessions.iter().filter(|s| s.is_finalized()).count(),
        average_duration,
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Filtered snapshot plus its summary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuditReport {
    /// Matching sessions, snapshot order preserved.
    pub sessions: Vec<Session>,
    pub summary: AuditSummary,
}

/// Run the audit query: filter the snapshot and summarize the result.
pub fn run_query(snapshot: &[Session], filter: &SessionFilter) -> AuditReport {
    let sessions: Vec<Session> = snapshot
        .iter()
        .filter(|s| filter.matches(s))
        .cloned()
        .collect();
    let summary = summarize(&sessions);
    AuditReport { sessions, summary }
}
