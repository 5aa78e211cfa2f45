//! Report assembly and serialization.
//!
//! The output file is a pretty-printed JSON array (2-space indent,
//! non-ASCII left unescaped) of [`ReportEntry`] values that all share the
//! timestamp captured once at the start of the fetch loop.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::mowers::DeviceDetail;

/// Path used when the CLI is invoked without an output argument.
pub const DEFAULT_OUTPUT_PATH: &str = "./data.json";

/// One mower's line in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    /// Identifier from the listing.
    pub mower_id: String,
    /// Run timestamp, identical for every entry.
    pub timestamp: String,
    /// Detail payload or captured failure.
    pub detail: DeviceDetail,
}

/// Formats `at` as ISO-8601 UTC with microseconds and a `+00:00` offset,
/// e.g. `2025-06-01T08:30:00.123456+00:00`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Renders the entries exactly as they are written to disk.
pub fn render_report(entries: &[ReportEntry]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(entries)?)
}

/// Writes the report to `path` in one call, creating the file or
/// truncating whatever was there.
///
/// # Errors
///
/// - `AmcError::Io` — the file could not be written.
pub fn write_report(path: &Path, entries: &[ReportEntry]) -> Result<()> {
    let rendered = render_report(entries)?;
    std::fs::write(path, rendered)?;
    tracing::info!(path = %path.display(), entries = entries.len(), "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn entry(id: &str, detail: DeviceDetail) -> ReportEntry {
        ReportEntry {
            mower_id: id.to_string(),
            timestamp: "2025-06-01T08:30:00.000000+00:00".to_string(),
            detail,
        }
    }

    #[test]
    fn timestamp_uses_utc_offset_and_micros() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();
        assert_eq!(format_timestamp(at), "2025-06-01T08:30:00.000000+00:00");
    }

    #[test]
    fn empty_report_renders_as_empty_array() {
        assert_eq!(render_report(&[]).unwrap(), b"[]");
    }

    #[test]
    fn report_uses_two_space_indent() {
        let rendered = render_report(&[entry("M1", DeviceDetail::Fetched(json!({"a": 1})))])
            .unwrap();
        let text = String::from_utf8(rendered).unwrap();
        let expected = r#"[
  {
    "mower_id": "M1",
    "timestamp": "2025-06-01T08:30:00.000000+00:00",
    "detail": {
      "a": 1
    }
  }
]"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn non_ascii_is_not_escaped() {
        let rendered = render_report(&[entry(
            "M1",
            DeviceDetail::Fetched(json!({"name": "Gräsklippare 🌱"})),
        )])
        .unwrap();
        let text = String::from_utf8(rendered).unwrap();
        assert!(text.contains("Gräsklippare 🌱"), "got: {text}");
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn write_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "x".repeat(4096)).unwrap();

        write_report(
            &path,
            &[entry(
                "M2",
                DeviceDetail::Failed {
                    error: 404,
                    body: "not found".to_string(),
                },
            )],
        )
        .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written,
            json!([{
                "mower_id": "M2",
                "timestamp": "2025-06-01T08:30:00.000000+00:00",
                "detail": {"error": 404, "body": "not found"}
            }])
        );
    }

    #[test]
    fn write_into_missing_directory_fails_with_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("data.json");
        let err = write_report(&path, &[]).unwrap_err();
        assert!(matches!(err, crate::error::AmcError::Io(_)), "got: {err:?}");
    }
}
