//! Command handler modules for rfp.
//!
//! Shared argument parsing lives here; command-specific logic lives in the
//! submodules.

pub mod audit;
pub mod device;
pub mod export;
pub mod watch;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use rfp_audit::SessionFilter;
use rfp_schemas::SessionStatus;

/// Parse a CLI `--status` string.
pub fn parse_status(s: &str) -> Result<SessionStatus> {
    SessionStatus::parse(s).with_context(|| {
        format!("invalid --status '{s}'. expected one of: em_producao | finalizado")
    })
}

/// Parse a CLI date argument (`YYYY-MM-DD`).
pub fn parse_date(arg: &str, s: &str) -> Result<NaiveDate> {
    s.trim()
        .parse::<NaiveDate>()
        .with_context(|| format!("invalid --{arg} '{s}'. expected YYYY-MM-DD"))
}

/// Build the audit filter from CLI arguments.
///
/// `--today` pre-fills both dates with today's UTC date, the portal's
/// long-standing default for a fresh audit view; explicit `--from`/`--to`
/// values win over it.
pub fn build_filter(
    from: Option<String>,
    to: Option<String>,
    tag: Option<String>,
    status: Option<String>,
    today: bool,
) -> Result<SessionFilter> {
    let today_date = today.then(|| Utc::now().date_naive());

    let start_date = match from {
        Some(s) => Some(parse_date("from", &s)?),
        None => today_date,
    };
    let end_date = match to {
        Some(s) => Some(parse_date("to", &s)?),
        None => today_date,
    };
    let status = match status {
        Some(s) => Some(parse_status(&s)?),
        None => None,
    };

    Ok(SessionFilter {
        start_date,
        end_date,
        tag,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_filter_defaults_to_unbounded() {
        let f = build_filter(None, None, None, None, false).unwrap();
        assert!(f.is_empty());
    }

    #[test]
    fn build_filter_today_fills_both_dates() {
        let f = build_filter(None, None, None, None, true).unwrap();
        let today = Utc::now().date_naive();
        assert_eq!(f.start_date, Some(today));
        assert_eq!(f.end_date, Some(today));
    }

    #[test]
    fn explicit_dates_win_over_today() {
        let f = build_filter(Some("2026-08-01".into()), None, None, None, true).unwrap();
        assert_eq!(f.start_date, Some("2026-08-01".parse().unwrap()));
        assert_eq!(f.end_date, Some(Utc::now().date_naive()));
    }

    #[test]
    fn bad_status_is_rejected() {
        assert!(build_filter(None, None, None, Some("done".into()), false).is_err());
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(build_filter(Some("08/01/2026".into()), None, None, None, false).is_err());
    }
}
