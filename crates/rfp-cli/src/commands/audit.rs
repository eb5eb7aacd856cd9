//! `rfp audit`: one-shot filtered session query.

use anyhow::{Context, Result};
use rfp_api::{HttpPortalApi, PortalApi};
use rfp_audit::{run_query, SessionFilter};
use rfp_config::ClientConfig;
use rfp_schemas::format_duration_opt;

pub async fn run_audit(cfg: ClientConfig, filter: SessionFilter) -> Result<()> {
    let api = HttpPortalApi::new(cfg.base_url.clone());
    let snapshot = api
        .fetch_sessions(cfg.audit_limit, None)
        .await
        .context("fetch session snapshot")?;

    let report = run_query(&snapshot, &filter);

    for s in &report.sessions {
        println!(
            "id={} tag={} entry={} exit={} duration={} status={}",
            s.id,
            s.tag_id,
            s.antenna_1_time
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "-".into()),
            s.antenna_2_time
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "-".into()),
            format_duration_opt(s.duration_seconds),
            s.status.as_wire(),
        );
    }

    println!(
        "sessions={} finalized={} average_duration={}",
        report.summary.total,
        report.summary.finalized,
        format_duration_opt(Some(report.summary.average_duration)),
    );
    Ok(())
}
