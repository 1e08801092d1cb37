use chrono::{DateTime, FixedOffset};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity levels offered by the dashboard's severity picker.
pub const SEVERITY_LEVELS: [i64; 5] = [1, 2, 3, 4, 5];

/// Suricata writes offsets without a colon (`+0000`), which RFC 3339 rejects.
const SURICATA_TS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// A single detection event.
///
/// Every field is optional: fixtures are hand-assembled and a record with
/// holes must still show up in the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub src_ip: Option<String>,
    #[serde(default)]
    pub dest_ip: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default, alias = "proto")]
    pub protocol: Option<String>,
    #[serde(default)]
    pub alert: Option<AlertDetail>,
}

/// The nested `alert` block describing which rule fired.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertDetail {
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub severity: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
}

impl AlertRecord {
    /// Build a record field by field, dropping any value of the wrong type.
    ///
    /// Used when a fixture entry does not deserialize as a whole. A
    /// non-object `value` yields a record with every field absent.
    pub fn from_value_lossy(value: &Value) -> Self {
        Self {
            timestamp: field(value, "timestamp"),
            src_ip: field(value, "src_ip"),
            dest_ip: field(value, "dest_ip"),
            port: field(value, "port"),
            protocol: field(value, "protocol").or_else(|| field(value, "proto")),
            alert: value
                .get("alert")
                .filter(|a| a.is_object())
                .map(AlertDetail::from_value_lossy),
        }
    }

    /// Signature of the rule that fired. Empty signatures count as absent.
    pub fn signature(&self) -> Option<&str> {
        self.alert
            .as_ref()
            .and_then(|a| a.signature.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Severity, where `Some(0)` is a real value.
    pub fn severity(&self) -> Option<i64> {
        self.alert.as_ref().and_then(|a| a.severity)
    }

    pub fn category(&self) -> Option<&str> {
        self.alert.as_ref().and_then(|a| a.category.as_deref())
    }

    /// Parsed observation time, if the raw timestamp is in a known format.
    pub fn observed_at(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.timestamp.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_str(raw, SURICATA_TS_FORMAT))
            .ok()
    }

    /// True when the severity is present but outside the picker's 1-5 range.
    pub fn has_unlisted_severity(&self) -> bool {
        self.severity()
            .is_some_and(|s| !SEVERITY_LEVELS.contains(&s))
    }
}

impl AlertDetail {
    pub fn from_value_lossy(value: &Value) -> Self {
        Self {
            signature: field(value, "signature"),
            severity: field(value, "severity"),
            category: field(value, "category"),
        }
    }
}

fn field<T: DeserializeOwned>(value: &Value, key: &str) -> Option<T> {
    value.get(key).and_then(|v| T::deserialize(v).ok())
}
