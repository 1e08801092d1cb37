use super::{AlertSet, DatasetError};
use crate::model::AlertRecord;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

/// Read and parse the alert fixture at `path`.
pub fn load_alerts(path: &Path) -> Result<AlertSet, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let set = parse_alerts(&content)?;

    let unlisted = set.iter().filter(|r| r.has_unlisted_severity()).count();
    if unlisted > 0 {
        warn!(
            path = %path.display(),
            unlisted,
            "records carry severities outside 1-5; \
             they are counted but not offered in the severity picker"
        );
    }
    info!(path = %path.display(), records = set.len(), "loaded alert data");
    Ok(set)
}

/// Parse fixture text.
///
/// Accepts a JSON array of records, the literal `null` (an empty set), or
/// newline-delimited JSON objects the way Suricata writes `eve.json`.
pub fn parse_alerts(content: &str) -> Result<AlertSet, DatasetError> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        debug!("alert data is empty");
        return Ok(AlertSet::default());
    }

    if trimmed.starts_with('{') {
        return parse_lines(content);
    }

    let value: Value =
        serde_json::from_str(content).map_err(|source| DatasetError::Parse { entry: 1, source })?;
    match value {
        Value::Null => {
            debug!("alert data is null, treating as empty");
            Ok(AlertSet::default())
        }
        Value::Array(items) => {
            let mut records = Vec::with_capacity(items.len());
            for (idx, item) in items.into_iter().enumerate() {
                // A bare `null` element is a hole in the fixture, not a record.
                if item.is_null() {
                    continue;
                }
                records.push(decode_record(&item, idx + 1));
            }
            Ok(records.into())
        }
        other => Err(DatasetError::NotAnArray {
            found: json_kind(&other),
        }),
    }
}

fn parse_lines(content: &str) -> Result<AlertSet, DatasetError> {
    let mut records = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let item: Value = serde_json::from_str(line)
            .map_err(|source| DatasetError::Parse { entry: idx + 1, source })?;
        records.push(decode_record(&item, idx + 1));
    }
    debug!(records = records.len(), "parsed newline-delimited alert data");
    Ok(records.into())
}

/// A mistyped field is dropped rather than rejecting the record, so the
/// entry still shows up in the table with that cell blank.
fn decode_record(item: &Value, entry: usize) -> AlertRecord {
    match AlertRecord::deserialize(item) {
        Ok(record) => record,
        Err(e) => {
            warn!(
                entry,
                error = %e,
                "alert record has unexpected field types, keeping what parses"
            );
            AlertRecord::from_value_lossy(item)
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_array() {
        let set = parse_alerts(
            r#"[{"src_ip": "10.0.0.1", "alert": {"signature": "A", "severity": 1}},
                {"src_ip": "10.0.0.2"}]"#,
        )
        .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.records()[1].src_ip.as_deref(), Some("10.0.0.2"));
    }

    #[test]
    fn test_parse_null_and_empty() {
        assert!(parse_alerts("null").unwrap().is_empty());
        assert!(parse_alerts("   \n").unwrap().is_empty());
        assert!(parse_alerts("[]").unwrap().is_empty());
    }

    #[test]
    fn test_null_elements_are_skipped() {
        let set = parse_alerts(r#"[null, {"src_ip": "1.2.3.4"}]"#).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_parse_ndjson() {
        let content =
            "{\"src_ip\": \"10.0.0.1\", \"proto\": \"TCP\"}\n\n{\"src_ip\": \"10.0.0.2\"}\n";
        let set = parse_alerts(content).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.records()[0].protocol.as_deref(), Some("TCP"));
    }

    #[test]
    fn test_mistyped_field_keeps_record() {
        let set = parse_alerts(
            r#"[
                {"src_ip": "10.0.0.1", "port": 22, "alert": {"signature": "A", "severity": 1}},
                {"src_ip": "10.0.0.2", "port": "any", "alert": {"signature": "B", "severity": 2}}
            ]"#,
        )
        .unwrap();
        assert_eq!(set.len(), 2);
        let rec = &set.records()[1];
        assert_eq!(rec.port, None);
        assert_eq!(rec.src_ip.as_deref(), Some("10.0.0.2"));
        assert_eq!(rec.signature(), Some("B"));
        assert_eq!(rec.severity(), Some(2));
    }

    #[test]
    fn test_ndjson_mistyped_field_keeps_record() {
        let content =
            "{\"src_ip\": \"10.0.0.1\"}\n{\"port\": \"not-a-port\", \"proto\": \"UDP\"}\n";
        let set = parse_alerts(content).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.records()[1].port, None);
        assert_eq!(set.records()[1].protocol.as_deref(), Some("UDP"));
    }

    #[test]
    fn test_ndjson_invalid_json_reports_line() {
        let content = "{\"src_ip\": \"10.0.0.1\"}\n{\"port\": \n";
        match parse_alerts(content) {
            Err(DatasetError::Parse { entry, .. }) => assert_eq!(entry, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_document_rejected() {
        match parse_alerts("42") {
            Err(DatasetError::NotAnArray { found }) => assert_eq!(found, "a number"),
            other => panic!("expected NotAnArray, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"alert": {{"signature": "X", "severity": 9}}}}]"#).unwrap();
        let set = load_alerts(file.path()).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.records()[0].has_unlisted_severity());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_alerts(Path::new("definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
