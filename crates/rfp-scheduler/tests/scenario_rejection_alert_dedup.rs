//! Rejection alerts fire once per reading, only for validation-kind
//! rejections, and never again while the backend is unchanged.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rfp_api::{ApiError, PortalApi};
use rfp_connectivity::ConnectivityState;
use rfp_scheduler::{AppState, Scheduler, UiMsg};
use rfp_schemas::{ReasonKind, RejectedReading, RfidEvent, Session, SessionStatus, Stats};
use serde_json::Value;

struct FixedRejectionsApi {
    rejected: Vec<RejectedReading>,
}

fn reading(id: i64, kind: ReasonKind) -> RejectedReading {
    let t: DateTime<Utc> = "2026-08-01T10:00:00Z".parse().unwrap();
    RejectedReading {
        id,
        tag_id: format!("TAG{id}"),
        antenna_number: Some(1),
        event_time: t,
        reason: "Tag inválida: deve ter 24 caracteres (recebido: 5)".to_string(),
        reason_type: kind,
    }
}

#[async_trait::async_trait]
impl PortalApi for FixedRejectionsApi {
    async fn fetch_stats(&self) -> Result<Stats, ApiError> {
        Err(ApiError::Transport("down".into()))
    }
    async fn fetch_sessions(
        &self,
        _limit: usize,
        _status: Option<SessionStatus>,
    ) -> Result<Vec<Session>, ApiError> {
        Ok(Vec::new())
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
        Ok(self.rejected.clone())
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

fn drain_alerts(rx: &mut tokio::sync::broadcast::Receiver<UiMsg>) -> Vec<i64> {
    let mut ids = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        if let UiMsg::RejectionAlert { id, .. } = msg {
            ids.push(id);
        }
    }
    ids
}

#[tokio::test]
async fn scenario_alerts_fire_once_and_only_for_validation() {
    let api = Arc::new(FixedRejectionsApi {
        // Backend order: highest identifier first.
        rejected: vec![
            reading(9, ReasonKind::Validation),
            reading(7, ReasonKind::Blocked),
            reading(6, ReasonKind::Validation),
            reading(4, ReasonKind::Timeout),
        ],
    });
    let state = Arc::new(AppState::new());
    let mut rx = state.bus.subscribe();
    let sched = Scheduler::new(Arc::clone(&state), api, rfp_config::ClientConfig::default());

    // First cycle: both validation readings alert; blocked/timeout stay
    // silent even though they are new.
    sched.refresh_dashboard().await;
    assert_eq!(drain_alerts(&mut rx), vec![9, 6]);

    // Unchanged backend: a second cycle alerts nothing.
    sched.refresh_dashboard().await;
    assert!(drain_alerts(&mut rx).is_empty());

    // The cursor sits at the newest identifier observed.
    assert_eq!(state.control.read().await.cursor.last_seen_id(), 9);
}
