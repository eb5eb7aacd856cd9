//! Pure cadence decisions.
//!
//! The planner answers one question per tick: given "now" and the active
//! view, which periodic work is due? It owns no timers and performs no IO,
//! so the scheduling rules are unit-testable with synthetic clocks.
//!
//! Cadence rules:
//! - The liveness probe is due on its own period regardless of view.
//! - The dashboard refresh is due on its period only while the dashboard
//!   view is active.
//! - The audit view is **never** refreshed periodically; a silent
//!   replacement would discard in-progress filter state. Its refreshes are
//!   driven by activation and explicit filter changes only.

use crate::state::ViewId;

/// Periods in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannerConfig {
    pub dashboard_period_ms: i64,
    pub probe_period_ms: i64,
}

/// Work due at one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickPlan {
    pub refresh_dashboard: bool,
    pub probe: bool,
}

/// Decides which periodic work is due, advancing its own marks on decision
/// so a slow cycle is never scheduled twice for the same period.
#[derive(Clone, Debug)]
pub struct TickPlanner {
    cfg: PlannerConfig,
    last_dashboard_ms: Option<i64>,
    last_probe_ms: Option<i64>,
}

impl TickPlanner {
    /// Both periodic jobs are immediately due on the first tick.
    pub fn new(cfg: PlannerConfig) -> Self {
        Self {
            cfg,
            last_dashboard_ms: None,
            last_probe_ms: None,
        }
    }

    pub fn plan(&mut self, now_ms: i64, active_view: ViewId) -> TickPlan {
        let probe = due(self.last_probe_ms, now_ms, self.cfg.probe_period_ms);
        if probe {
            self.last_probe_ms = Some(now_ms);
        }

        let refresh_dashboard = active_view == ViewId::Dashboard
            && due(self.last_dashboard_ms, now_ms, self.cfg.dashboard_period_ms);
        if refresh_dashboard {
            self.last_dashboard_ms = Some(now_ms);
        }

        TickPlan {
            refresh_dashboard,
            probe,
        }
    }
}

fn due(last_ms: Option<i64>, now_ms: i64, period_ms: i64) -> bool {
    match last_ms {
        None => true,
        Some(last) => now_ms - last >= period_ms,
    }
}
