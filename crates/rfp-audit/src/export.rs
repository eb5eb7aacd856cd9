//! CSV export of a filtered session list.
//!
//! Column set, order, and header labels follow the portal's established
//! export format. Fields are written through the `csv` crate, which quotes
//! embedded separators, so an embedded comma in a tag identifier must not
//! corrupt the row structure.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rfp_schemas::Session;

/// Export header row, fixed.
pub const CSV_HEADER: [&str; 6] = [
    "ID",
    "Tag ID",
    "Entrada (Antena 1)",
    "Saída (Antena 2)",
    "Tempo de Produção (s)",
    "Status",
];

/// Result of an export attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { rows: usize },
    /// Nothing matched the filter; no bytes were written. The caller
    /// surfaces a user-visible notice instead of producing an empty file.
    Empty,
}

/// Serialize `sessions` as CSV into `out`.
///
/// An empty list writes nothing (not even the header) and returns
/// [`ExportOutcome::Empty`].
pub fn export_csv<W: Write>(sessions: &[Session], out: W) -> Result<ExportOutcome> {
    if sessions.is_empty() {
        return Ok(ExportOutcome::Empty);
    }

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER).context("write csv header")?;

    for s in sessions {
        writer
            .write_record([
                s.id.to_string(),
                s.tag_id.clone(),
                s.antenna_1_time.map(|t| t.to_rfc3339()).unwrap_or_default(),
                s.antenna_2_time.map(|t| t.to_rfc3339()).unwrap_or_default(),
                s.duration_seconds.map(|d| d.to_string()).unwrap_or_default(),
                s.status.as_wire().to_string(),
            ])
            .with_context(|| format!("write csv row for session {}", s.id))?;
    }

    writer.flush().context("flush csv output")?;
    Ok(ExportOutcome::Written {
        rows: sessions.len(),
    })
}

/// Default export file name for a given day: `rfid-audit-YYYY-MM-DD.csv`.
pub fn default_export_filename(day: NaiveDate) -> String {
    format!("rfid-audit-{}.csv", day.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use rfp_schemas::SessionStatus;

    fn t(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn finalized_session() -> Session {
        Session {
            id: 12,
            tag_id: "E20000172211009418907005".to_string(),
            antenna_1_time: Some(t("2026-08-01T12:00:00Z")),
            antenna_2_time: Some(t("2026-08-01T12:05:30Z")),
            duration_seconds: Some(330.0),
            status: SessionStatus::Finalized,
            created_at: t("2026-08-01T12:00:00Z"),
        }
    }

    #[test]
    fn writes_header_and_one_row_per_session() {
        let mut buf = Vec::new();
        let outcome = export_csv(&[finalized_session()], &mut buf).unwrap();
        assert_eq!(outcome, ExportOutcome::Written { rows: 1 });

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID,Tag ID,"));
        assert!(lines[1].starts_with("12,E20000172211009418907005,"));
        assert!(lines[1].ends_with(",finalizado"));
    }

    #[test]
    fn missing_fields_serialize_as_empty() {
        let mut s = finalized_session();
        s.antenna_2_time = None;
        s.duration_seconds = None;
        s.status = SessionStatus::InProgress;

        let mut buf = Vec::new();
        export_csv(&[s], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.contains(",,"));
        assert!(row.ends_with(",em_producao"));
    }

    #[test]
    fn embedded_comma_in_tag_is_quoted_not_split() {
        let mut s = finalized_session();
        s.tag_id = "TAG,WITH,COMMAS".to_string();

        let mut buf = Vec::new();
        export_csv(&[s], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.contains("\"TAG,WITH,COMMAS\""));

        // Round-trips to the same six fields.
        let mut rdr = csv::Reader::from_reader(text.as_bytes());
        let record = rdr.records().next().unwrap().unwrap();
        assert_eq!(record.len(), 6);
        assert_eq!(&record[1], "TAG,WITH,COMMAS");
    }

    #[test]
    fn empty_list_writes_nothing() {
        let mut buf = Vec::new();
        let outcome = export_csv(&[], &mut buf).unwrap();
        assert_eq!(outcome, ExportOutcome::Empty);
        assert!(buf.is_empty());
    }

    #[test]
    fn default_filename_is_date_stamped() {
        let day: NaiveDate = "2026-08-08".parse().unwrap();
        assert_eq!(default_export_filename(day), "rfid-audit-2026-08-08.csv");
    }
}
