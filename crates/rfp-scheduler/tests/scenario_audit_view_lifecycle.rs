//! The audit view fetches exactly once on activation and once per explicit
//! filter change; a filter change while another view is showing fetches
//! nothing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rfp_api::{ApiError, PortalApi};
use rfp_audit::SessionFilter;
use rfp_connectivity::ConnectivityState;
use rfp_scheduler::{AppState, Scheduler, ViewId};
use rfp_schemas::{RejectedReading, RfidEvent, Session, SessionStatus, Stats};
use serde_json::Value;

struct CountingApi {
    session_calls: AtomicUsize,
}

fn finalized(id: i64, tag: &str) -> Session {
    let t: DateTime<Utc> = "2026-08-01T12:00:00Z".parse().unwrap();
    Session {
        id,
        tag_id: tag.to_string(),
        antenna_1_time: Some(t),
        antenna_2_time: Some(t),
        duration_seconds: Some(60.0),
        status: SessionStatus::Finalized,
        created_at: t,
    }
}

#[async_trait::async_trait]
impl PortalApi for CountingApi {
    async fn fetch_stats(&self) -> Result<Stats, ApiError> {
        Err(ApiError::Transport("unused".into()))
    }
    async fn fetch_sessions(
        &self,
        _limit: usize,
        _status: Option<SessionStatus>,
    ) -> Result<Vec<Session>, ApiError> {
        self.session_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![finalized(1, "ALPHA"), finalized(2, "BRAVO")])
    }
    async fn fetch_active_sessions(&self) -> Result<Vec<Session>, ApiError> {
        Ok(Vec::new())
    }
    async fn fetch_recent_events(&self, _limit: usize) -> Result<Vec<RfidEvent>, ApiError> {
        Ok(Vec::new())
    }
    async fn fetch_recent_rejected(
        &self,
        _limit: usize,
    ) -> Result<Vec<RejectedReading>, ApiError> {
        Ok(Vec::new())
    }
    async fn probe(&self) -> ConnectivityState {
        ConnectivityState::Online
    }
    async fn get_device_config(&self) -> Result<Value, ApiError> {
        Ok(Value::Null)
    }
    async fn set_device_config(&self, _payload: Value) -> Result<Value, ApiError> {
        Ok(Value::Null)
    }
    async fn device_info(&self) -> Result<Value, ApiError> {
        Ok(Value::Null)
    }
    async fn device_refresh(&self) -> Result<Value, ApiError> {
        Ok(Value::Null)
    }
}

#[tokio::test]
async fn scenario_activation_and_filter_changes_drive_fetches() {
    let api = Arc::new(CountingApi {
        session_calls: AtomicUsize::new(0),
    });
    let state = Arc::new(AppState::new());
    let sched = Scheduler::new(Arc::clone(&state), api.clone(), rfp_config::ClientConfig::default());

    // Filter change while the dashboard is showing: no fetch.
    sched
        .apply_filter(SessionFilter {
            tag: Some("alpha".to_string()),
            ..SessionFilter::empty()
        })
        .await;
    assert_eq!(api.session_calls.load(Ordering::SeqCst), 0);

    // Activation fetches once, applying the pending filter.
    sched.switch_view(ViewId::Audit).await;
    assert_eq!(api.session_calls.load(Ordering::SeqCst), 1);
    {
        let pane = state.audit.read().await;
        let report = pane.report.as_ref().unwrap();
        assert_eq!(report.sessions.len(), 1);
        assert_eq!(report.sessions[0].tag_id, "ALPHA");
        assert_eq!(report.summary.total, 1);
    }

    // Explicit filter change while active: exactly one more fetch.
    sched.apply_filter(SessionFilter::empty()).await;
    assert_eq!(api.session_calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        state.audit.read().await.report.as_ref().unwrap().sessions.len(),
        2
    );

    // Switching to a view that is already active is a no-op.
    sched.switch_view(ViewId::Audit).await;
    assert_eq!(api.session_calls.load(Ordering::SeqCst), 2);
}
