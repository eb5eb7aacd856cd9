//! Async driver: owns the timers, fans out fetches, and applies results.
//!
//! # Ordering guarantees
//!
//! - Within one refresh cycle the fan-out join completes (successfully or
//!   not, per fetch) before the cycle's single timestamp stamp and before
//!   the dedup check runs.
//! - Across cycles nothing is guaranteed: switching views cancels no
//!   in-flight fetch; a late result for a now-inactive view is discarded at
//!   the apply gate instead (last-applied-wins within the active view).
//! - Each fetch in a join is failure-isolated: an error is logged and its
//!   presentation slot keeps its previous (stale-but-present) value.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rfp_api::PortalApi;
use rfp_audit::{run_query, SessionFilter};
use rfp_config::ClientConfig;
use rfp_reconcile::merge_feed;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::planner::{PlannerConfig, TickPlanner};
use crate::state::{AppState, UiMsg, ViewId};

/// Granularity of the driver's base tick; the planner decides what is
/// actually due at each tick.
const TICK_MS: u64 = 250;

/// Drives periodic refresh cycles against one [`AppState`].
#[derive(Clone)]
pub struct Scheduler {
    state: Arc<AppState>,
    api: Arc<dyn PortalApi>,
    cfg: ClientConfig,
}

impl Scheduler {
    pub fn new(state: Arc<AppState>, api: Arc<dyn PortalApi>, cfg: ClientConfig) -> Self {
        Self { state, api, cfg }
    }

    /// Run the timer loop forever. No failure in a cycle is fatal: the next
    /// tick proceeds on its normal cadence regardless of prior outcomes.
    ///
    /// Due work is spawned rather than awaited inline so a slow cycle never
    /// stalls the probe cadence; an overlapping cycle N+1 is resolved by the
    /// apply gate (last-applied-wins).
    pub async fn run(&self) {
        let mut planner = TickPlanner::new(PlannerConfig {
            dashboard_period_ms: (self.cfg.dashboard_refresh_secs * 1_000) as i64,
            probe_period_ms: (self.cfg.probe_interval_secs * 1_000) as i64,
        });
        let mut ticker = tokio::time::interval(Duration::from_millis(TICK_MS));

        loop {
            ticker.tick().await;
            let active_view = self.state.control.read().await.active_view;
            let plan = planner.plan(Utc::now().timestamp_millis(), active_view);

            if plan.probe {
                let sched = self.clone();
                tokio::spawn(async move { sched.probe_once().await });
            }
            if plan.refresh_dashboard {
                let sched = self.clone();
                tokio::spawn(async move { sched.refresh_dashboard().await });
            }
        }
    }

    // -----------------------------------------------------------------------
    // View and filter actions
    // -----------------------------------------------------------------------

    /// Switch the active view and run its activation refresh.
    ///
    /// In-flight fetches for the previous view are not cancelled; their
    /// results will fail the apply gate and be discarded.
    pub async fn switch_view(&self, view: ViewId) {
        {
            let mut control = self.state.control.write().await;
            if control.active_view == view {
                return;
            }
            control.active_view = view;
        }
        info!(?view, "view switched");
        match view {
            ViewId::Dashboard => self.refresh_dashboard().await,
            ViewId::Audit => self.refresh_audit().await,
        }
    }

    /// Apply a new audit filter; refreshes immediately when the audit view
    /// is showing.
    pub async fn apply_filter(&self, filter: SessionFilter) {
        let refresh_now = {
            let mut control = self.state.control.write().await;
            control.filter = filter;
            control.active_view == ViewId::Audit
        };
        if refresh_now {
            self.refresh_audit().await;
        }
    }

    /// One unscheduled refresh of whichever view is active.
    pub async fn refresh_active(&self) {
        let view = self.state.control.read().await.active_view;
        match view {
            ViewId::Dashboard => self.refresh_dashboard().await,
            ViewId::Audit => self.refresh_audit().await,
        }
    }

    // -----------------------------------------------------------------------
    // Probe
    // -----------------------------------------------------------------------

    /// Run one liveness probe and enforce the monitor's decision.
    pub async fn probe_once(&self) {
        let observed = self.api.probe().await;
        let decision = {
            let mut control = self.state.control.write().await;
            control.monitor.observe(observed)
        };
        self.publish_status().await;

        if decision.wants_resync() {
            info!("connectivity regained; resyncing active view");
            self.refresh_active().await;
        }
    }

    // -----------------------------------------------------------------------
    // Dashboard cycle
    // -----------------------------------------------------------------------

    /// One dashboard refresh cycle: stats + active sessions + rejection
    /// dedup, fetched concurrently and joined before anything is applied.
    pub async fn refresh_dashboard(&self) {
        let cycle = Uuid::new_v4();
        debug!(%cycle, "dashboard cycle start");

        let (stats, active_sessions, rejected) = tokio::join!(
            self.api.fetch_stats(),
            self.api.fetch_active_sessions(),
            self.api.fetch_recent_rejected(self.cfg.feed_fetch_limit),
        );

        {
            let mut control = self.state.control.write().await;
            if control.active_view != ViewId::Dashboard {
                debug!(%cycle, "discarding dashboard results; view no longer active");
                return;
            }

            {
                let mut pane = self.state.dashboard.write().await;
                match stats {
                    Ok(s) => pane.stats = Some(s),
                    Err(e) => warn!(%cycle, error = %e, "stats fetch failed; keeping stale pane"),
                }
                match active_sessions {
                    Ok(sessions) => pane.active_sessions = sessions,
                    Err(e) => {
                        warn!(%cycle, error = %e, "active-sessions fetch failed; keeping stale pane")
                    }
                }
            }

            match rejected {
                Ok(batch) => {
                    let report = control.cursor.accept(&batch);
                    for r in &report.notify {
                        let _ = self.state.bus.send(UiMsg::RejectionAlert {
                            id: r.id,
                            tag_id: r.tag_id.clone(),
                            reason: r.reason.clone(),
                        });
                    }
                    if !report.is_empty() {
                        debug!(
                            %cycle,
                            fresh = report.fresh.len(),
                            alerts = report.notify.len(),
                            cursor = report.cursor_after,
                            "rejection dedup advanced"
                        );
                    }
                }
                Err(e) => warn!(%cycle, error = %e, "rejected fetch failed; cursor unchanged"),
            }

            control.last_updated = Some(Utc::now());
        }
        self.publish_status().await;
        debug!(%cycle, "dashboard cycle complete");
    }

    // -----------------------------------------------------------------------
    // Audit cycle
    // -----------------------------------------------------------------------

    /// One audit refresh: session snapshot + both feed sources, fetched
    /// concurrently. Runs on activation and on filter changes only.
    pub async fn refresh_audit(&self) {
        let cycle = Uuid::new_v4();
        debug!(%cycle, "audit cycle start");

        let (sessions, events, rejected) = tokio::join!(
            self.api.fetch_sessions(self.cfg.audit_limit, None),
            self.api.fetch_recent_events(self.cfg.feed_fetch_limit),
            self.api.fetch_recent_rejected(self.cfg.feed_fetch_limit),
        );

        {
            let mut control = self.state.control.write().await;
            if control.active_view != ViewId::Audit {
                debug!(%cycle, "discarding audit results; view no longer active");
                return;
            }

            let mut pane = self.state.audit.write().await;
            match sessions {
                Ok(snapshot) => pane.report = Some(run_query(&snapshot, &control.filter)),
                Err(e) => warn!(%cycle, error = %e, "session fetch failed; keeping stale report"),
            }
            match events {
                Ok(ev) => {
                    // A missing rejected batch degrades to an accepted-only
                    // feed; a missing events batch keeps the stale feed.
                    let rej = match rejected {
                        Ok(r) => r,
                        Err(e) => {
                            warn!(%cycle, error = %e, "rejected fetch failed; feed shows accepted only");
                            Vec::new()
                        }
                    };
                    pane.feed = merge_feed(ev, rej, self.cfg.feed_window);
                }
                Err(e) => warn!(%cycle, error = %e, "events fetch failed; keeping stale feed"),
            }
            drop(pane);

            control.last_updated = Some(Utc::now());
        }
        self.publish_status().await;
        debug!(%cycle, "audit cycle complete");
    }

    async fn publish_status(&self) {
        let snap = self.state.status_snapshot().await;
        let _ = self.state.bus.send(UiMsg::Status(snap));
    }
}
