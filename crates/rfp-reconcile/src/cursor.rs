//! Rejection high-water mark.
//!
//! # Invariants
//!
//! - **Identifier order is the only order trusted**: "new since last check"
//!   is decided on `RejectedReading::id` alone, never on event time.
//! - **Advance is unconditional**: after a non-empty batch the cursor moves
//!   to the newest identifier observed, whether or not anything was
//!   notification-worthy, so no identifier is ever re-evaluated.
//! - **Empty input is a no-op**: the cursor does not move.
//! - **Validation-only notification**: of the new items, only
//!   `reason_type = validation` entries notify. `blocked` and `timeout`
//!   rejections are deliberately suppressed from notification; they still
//!   appear in the audit feed. This is a product decision, not a default
//!   to generalize away.
//!
//! Idempotent under repeated polling of an unchanged backend: a second
//! [`accept`][RejectionCursor::accept] with the same data yields an empty
//! report.

use rfp_schemas::{ReasonKind, RejectedReading};

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// What one dedup pass found.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DedupReport {
    /// All items with an identifier above the cursor, input order preserved.
    pub fresh: Vec<RejectedReading>,
    /// The subset of `fresh` that warrants a user notification.
    pub notify: Vec<RejectedReading>,
    /// Cursor value after this pass.
    pub cursor_after: i64,
}

impl DedupReport {
    pub fn is_empty(&self) -> bool {
        self.fresh.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Tracks the highest rejected-reading identifier already surfaced.
///
/// Process-wide, lives for the client session. Use
/// [`check`][RejectionCursor::check] for a read-only classification and
/// [`accept`][RejectionCursor::accept] to classify and advance.
#[derive(Clone, Debug)]
pub struct RejectionCursor {
    /// Highest identifier already surfaced; 0 means "nothing seen yet".
    last_seen_id: i64,
}

impl Default for RejectionCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl RejectionCursor {
    pub fn new() -> Self {
        Self { last_seen_id: 0 }
    }

    /// Classify a batch **without** advancing the cursor.
    ///
    /// The batch arrives ordered by identifier descending (backend order);
    /// it is not re-sorted here.
    pub fn check(&self, batch: &[RejectedReading]) -> DedupReport {
        let fresh: Vec<RejectedReading> = batch
            .iter()
            .filter(|r| r.id > self.last_seen_id)
            .cloned()
            .collect();
        let notify = fresh
            .iter()
            .filter(|r| r.reason_type == ReasonKind::Validation)
            .cloned()
            .collect();
        let cursor_after = batch
            .iter()
            .map(|r| r.id)
            .max()
            .map_or(self.last_seen_id, |newest| newest.max(self.last_seen_id));

        DedupReport {
            fresh,
            notify,
            cursor_after,
        }
    }

    /// Classify a batch **and advance the cursor** to the newest identifier
    /// observed. Empty batches leave the cursor unchanged.
    pub fn accept(&mut self, batch: &[RejectedReading]) -> DedupReport {
        let report = self.check(batch);
        self.last_seen_id = report.cursor_after;
        report
    }

    /// Highest identifier surfaced so far; 0 before any batch.
    pub fn last_seen_id(&self) -> i64 {
        self.last_seen_id
    }

    pub fn has_seen_any(&self) -> bool {
        self.last_seen_id > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn reading(id: i64, kind: ReasonKind) -> RejectedReading {
        RejectedReading {
            id,
            tag_id: format!("TAG{id}"),
            antenna_number: Some(1),
            event_time: "2026-08-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap(),
            reason: "Tag inválida".to_string(),
            reason_type: kind,
        }
    }

    #[test]
    fn threshold_partition_and_advance() {
        // cursor = 5, ids [9,7,6,5,4] descending: {9,7,6} are candidates.
        let mut cursor = RejectionCursor::new();
        cursor.last_seen_id = 5;

        let batch = vec![
            reading(9, ReasonKind::Validation),
            reading(7, ReasonKind::Blocked),
            reading(6, ReasonKind::Validation),
            reading(5, ReasonKind::Validation),
            reading(4, ReasonKind::Timeout),
        ];
        let report = cursor.accept(&batch);

        let fresh_ids: Vec<i64> = report.fresh.iter().map(|r| r.id).collect();
        assert_eq!(fresh_ids, vec![9, 7, 6]);

        let notify_ids: Vec<i64> = report.notify.iter().map(|r| r.id).collect();
        assert_eq!(notify_ids, vec![9, 6]);

        assert_eq!(cursor.last_seen_id(), 9);
    }

    #[test]
    fn idempotent_on_unchanged_backend() {
        let mut cursor = RejectionCursor::new();
        let batch = vec![
            reading(3, ReasonKind::Validation),
            reading(2, ReasonKind::Validation),
            reading(1, ReasonKind::Blocked),
        ];

        let first = cursor.accept(&batch);
        assert_eq!(first.fresh.len(), 3);
        assert_eq!(first.notify.len(), 2);

        let second = cursor.accept(&batch);
        assert!(second.is_empty());
        assert!(second.notify.is_empty());
        assert_eq!(cursor.last_seen_id(), 3);
    }

    #[test]
    fn empty_batch_leaves_cursor_unchanged() {
        let mut cursor = RejectionCursor::new();
        cursor.accept(&[reading(8, ReasonKind::Blocked)]);
        assert_eq!(cursor.last_seen_id(), 8);

        let report = cursor.accept(&[]);
        assert!(report.is_empty());
        assert_eq!(report.cursor_after, 8);
        assert_eq!(cursor.last_seen_id(), 8);
    }

    #[test]
    fn cursor_advances_even_when_nothing_notifies() {
        let mut cursor = RejectionCursor::new();
        let batch = vec![
            reading(12, ReasonKind::Blocked),
            reading(11, ReasonKind::Timeout),
        ];
        let report = cursor.accept(&batch);
        assert_eq!(report.fresh.len(), 2);
        assert!(report.notify.is_empty());
        assert_eq!(cursor.last_seen_id(), 12);
    }

    #[test]
    fn check_is_read_only() {
        let cursor = RejectionCursor::new();
        let report = cursor.check(&[reading(5, ReasonKind::Validation)]);
        assert_eq!(report.cursor_after, 5);
        assert_eq!(cursor.last_seen_id(), 0);
    }
}
