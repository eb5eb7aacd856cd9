//! `rfp watch`: follow the portal live.
//!
//! Runs the scheduler loop and renders the bus to the log: connectivity
//! transitions at info/warn, per-cycle status and active sessions at debug,
//! rejection alerts at warn. Ctrl-C exits.

use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Utc;
use rfp_api::{HttpPortalApi, PortalApi};
use rfp_config::ClientConfig;
use rfp_connectivity::ConnectivityState;
use rfp_scheduler::{AppState, Scheduler, UiMsg, ViewId};
use rfp_schemas::format_duration;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

pub async fn run_watch(cfg: ClientConfig, view: &str) -> Result<()> {
    let Some(view) = ViewId::parse(view) else {
        bail!("invalid --view '{view}'. expected one of: dashboard | audit");
    };

    let state = Arc::new(AppState::new());
    let api: Arc<dyn PortalApi> = Arc::new(HttpPortalApi::new(cfg.base_url.clone()));
    let sched = Scheduler::new(Arc::clone(&state), api, cfg.clone());

    let rx = state.bus.subscribe();

    info!(base_url = %cfg.base_url, ?view, "watching portal");
    if view != ViewId::Dashboard {
        sched.switch_view(view).await;
    }

    tokio::select! {
        _ = sched.run() => {}
        _ = render_bus(Arc::clone(&state), rx) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutting down");
        }
    }
    Ok(())
}

async fn render_bus(state: Arc<AppState>, mut rx: broadcast::Receiver<UiMsg>) {
    let mut last_connectivity: Option<ConnectivityState> = None;
    loop {
        match rx.recv().await {
            Ok(UiMsg::Status(snap)) => {
                if snap.connectivity != last_connectivity {
                    match snap.connectivity {
                        Some(ConnectivityState::Online) => info!("portal online"),
                        Some(ConnectivityState::Offline) => warn!("portal offline"),
                        None => {}
                    }
                    last_connectivity = snap.connectivity;
                }
                debug!(
                    view = ?snap.active_view,
                    last_updated = ?snap.last_updated,
                    "status"
                );

                match snap.active_view {
                    ViewId::Dashboard => {
                        let pane = state.dashboard.read().await;
                        if let Some(stats) = &pane.stats {
                            debug!(
                                active = stats.active_sessions,
                                completed_today = stats.completed_today,
                                total_completed = stats.total_completed,
                                "stats"
                            );
                        }
                        let now = Utc::now();
                        for s in &pane.active_sessions {
                            debug!(
                                tag = %s.tag_id,
                                elapsed = %format_duration(s.elapsed_secs(now).unwrap_or(0) as f64),
                                "active session"
                            );
                        }
                    }
                    ViewId::Audit => {
                        let pane = state.audit.read().await;
                        if let Some(report) = &pane.report {
                            debug!(
                                sessions = report.summary.total,
                                finalized = report.summary.finalized,
                                "audit summary"
                            );
                        }
                        for item in &pane.feed {
                            debug!(
                                kind = ?item.kind(),
                                tag = %item.tag_id(),
                                at = %item.event_time(),
                                "feed entry"
                            );
                        }
                    }
                }
            }
            Ok(UiMsg::RejectionAlert { id, tag_id, reason }) => {
                warn!(id, tag = %tag_id, %reason, "rejected reading");
            }
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!(missed, "bus lagged; some messages dropped");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
