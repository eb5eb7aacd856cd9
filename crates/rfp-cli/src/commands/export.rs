//! `rfp export`: write the filtered session list as CSV.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use rfp_api::{HttpPortalApi, PortalApi};
use rfp_audit::{default_export_filename, export_csv, run_query, ExportOutcome, SessionFilter};
use rfp_config::ClientConfig;
use tracing::warn;

pub async fn run_export(
    cfg: ClientConfig,
    filter: SessionFilter,
    out: Option<PathBuf>,
) -> Result<()> {
    let api = HttpPortalApi::new(cfg.base_url.clone());
    let snapshot = api
        .fetch_sessions(cfg.audit_limit, None)
        .await
        .context("fetch session snapshot")?;

    let report = run_query(&snapshot, &filter);

    // No file at all for an empty result, just the notice.
    if report.sessions.is_empty() {
        warn!("nothing to export: no sessions match the filter");
        return Ok(());
    }

    let path = out.unwrap_or_else(|| PathBuf::from(default_export_filename(Utc::now().date_naive())));
    let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;

    if let ExportOutcome::Written { rows } = export_csv(&report.sessions, file)? {
        println!("exported={} rows={}", path.display(), rows);
    }
    Ok(())
}
