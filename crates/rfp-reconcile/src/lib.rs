//! Reconciliation engines: rejection dedup and event-feed merge.
//!
//! Both engines are pure and deterministic, with no IO and no clock. The scheduler
//! feeds them snapshots and enforces their decisions.

mod cursor;
mod merge;

pub use cursor::{DedupReport, RejectionCursor};
pub use merge::{merge_feed, FeedItem, FeedKind};
