//! Merged audit feed: accepted events and rejected readings in one
//! reverse-chronological sequence.
//!
//! Pure function of its two inputs; holds no state across calls. Ordering
//! contract: event instant descending via a stable sort: relative order
//! within a single source kind is preserved, relative order between kinds
//! at equal instants is unspecified. The result is truncated to a bounded
//! display window.

use chrono::{DateTime, Utc};
use rfp_schemas::{RejectedReading, RfidEvent};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Feed item
// ---------------------------------------------------------------------------

/// Provenance of a feed entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    Accepted,
    Rejected,
}

/// One entry of the merged feed, tagged with its source.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedItem {
    Accepted(RfidEvent),
    Rejected(RejectedReading),
}

impl FeedItem {
    pub fn kind(&self) -> FeedKind {
        match self {
            FeedItem::Accepted(_) => FeedKind::Accepted,
            FeedItem::Rejected(_) => FeedKind::Rejected,
        }
    }

    pub fn event_time(&self) -> DateTime<Utc> {
        match self {
            FeedItem::Accepted(e) => e.event_time,
            FeedItem::Rejected(r) => r.event_time,
        }
    }

    pub fn tag_id(&self) -> &str {
        match self {
            FeedItem::Accepted(e) => &e.tag_id,
            FeedItem::Rejected(r) => &r.tag_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Merge the two bounded fetches into one display feed.
///
/// `window` caps the output length; everything older is dropped.
pub fn merge_feed(
    events: Vec<RfidEvent>,
    rejected: Vec<RejectedReading>,
    window: usize,
) -> Vec<FeedItem> {
    let mut feed: Vec<FeedItem> = Vec::with_capacity(events.len() + rejected.len());
    feed.extend(events.into_iter().map(FeedItem::Accepted));
    feed.extend(rejected.into_iter().map(FeedItem::Rejected));

    // Stable: equal instants keep their relative order within each source.
    feed.sort_by(|a, b| b.event_time().cmp(&a.event_time()));
    feed.truncate(window);
    feed
}
