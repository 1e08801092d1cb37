use crate::model::AlertRecord;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unknown column '{0}'")]
pub struct ColumnParseError(pub String);

/// Columns of the alert details table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Column {
    #[serde(rename = "timestamp")]
    Timestamp,
    #[serde(rename = "src_ip")]
    SrcIp,
    #[serde(rename = "dest_ip")]
    DestIp,
    #[serde(rename = "port")]
    Port,
    #[serde(rename = "protocol")]
    Protocol,
    #[serde(rename = "alert.severity")]
    Severity,
    #[serde(rename = "alert.category")]
    Category,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Timestamp,
        Column::SrcIp,
        Column::DestIp,
        Column::Port,
        Column::Protocol,
        Column::Severity,
        Column::Category,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Timestamp => "Timestamp",
            Column::SrcIp => "Source IP",
            Column::DestIp => "Destination IP",
            Column::Port => "Port",
            Column::Protocol => "Protocol",
            Column::Severity => "Severity",
            Column::Category => "Category",
        }
    }

    /// Dotted path of the field inside a record.
    pub fn accessor(self) -> &'static str {
        match self {
            Column::Timestamp => "timestamp",
            Column::SrcIp => "src_ip",
            Column::DestIp => "dest_ip",
            Column::Port => "port",
            Column::Protocol => "protocol",
            Column::Severity => "alert.severity",
            Column::Category => "alert.category",
        }
    }

    /// Cell text for `record`; absent fields render empty.
    pub fn cell(self, record: &AlertRecord) -> String {
        match self {
            Column::Timestamp => record.timestamp.clone().unwrap_or_default(),
            Column::SrcIp => record.src_ip.clone().unwrap_or_default(),
            Column::DestIp => record.dest_ip.clone().unwrap_or_default(),
            Column::Port => record.port.map(|p| p.to_string()).unwrap_or_default(),
            Column::Protocol => record.protocol.clone().unwrap_or_default(),
            Column::Severity => record.severity().map(|s| s.to_string()).unwrap_or_default(),
            Column::Category => record.category().unwrap_or_default().to_string(),
        }
    }

    /// Text value used by substring filters. `None` for numeric columns.
    pub(crate) fn text<'a>(self, record: &'a AlertRecord) -> Option<&'a str> {
        match self {
            Column::Timestamp => record.timestamp.as_deref(),
            Column::SrcIp => record.src_ip.as_deref(),
            Column::DestIp => record.dest_ip.as_deref(),
            Column::Protocol => record.protocol.as_deref(),
            Column::Category => record.category(),
            Column::Port | Column::Severity => None,
        }
    }

    /// Ascending comparison of two records on this column. Absent values
    /// sort before present ones.
    pub(crate) fn compare(self, a: &AlertRecord, b: &AlertRecord) -> Ordering {
        match self {
            Column::Timestamp => timestamp_key(a).cmp(&timestamp_key(b)),
            Column::Port => a.port.cmp(&b.port),
            Column::Severity => a.severity().cmp(&b.severity()),
            _ => self.text(a).cmp(&self.text(b)),
        }
    }
}

/// Unparseable timestamps order after absent ones and before every parsed
/// instant, then by raw text.
fn timestamp_key(record: &AlertRecord) -> (bool, Option<DateTime<FixedOffset>>, Option<&str>) {
    let parsed = record.observed_at();
    (parsed.is_some(), parsed, record.timestamp.as_deref())
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.accessor())
    }
}

impl FromStr for Column {
    type Err = ColumnParseError;

    /// Accepts the accessor (`alert.severity`), its last segment
    /// (`severity`), or the header with spaces or dashes (`source-ip`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Column::ALL
            .into_iter()
            .find(|c| {
                let accessor = c.accessor();
                let tail = accessor.rsplit('.').next().unwrap_or(accessor);
                let header = c.header().to_ascii_lowercase().replace(' ', "_");
                wanted == accessor || wanted == tail || wanted == header
            })
            .ok_or_else(|| ColumnParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column_names() {
        assert_eq!("alert.severity".parse::<Column>().unwrap(), Column::Severity);
        assert_eq!("severity".parse::<Column>().unwrap(), Column::Severity);
        assert_eq!("src_ip".parse::<Column>().unwrap(), Column::SrcIp);
        assert_eq!("Source IP".parse::<Column>().unwrap(), Column::SrcIp);
        assert_eq!("destination-ip".parse::<Column>().unwrap(), Column::DestIp);
        assert_eq!("category".parse::<Column>().unwrap(), Column::Category);
        assert!("flow_id".parse::<Column>().is_err());
    }

    #[test]
    fn test_cells_for_sparse_record() {
        let rec = AlertRecord {
            src_ip: Some("10.0.0.1".into()),
            ..Default::default()
        };
        let cells: Vec<String> = Column::ALL.iter().map(|c| c.cell(&rec)).collect();
        assert_eq!(cells, vec!["", "10.0.0.1", "", "", "", "", ""]);
    }

    #[test]
    fn test_timestamp_compare_orders_unparsed_first() {
        let a = AlertRecord {
            timestamp: Some("2024-01-01T00:00:00Z".into()),
            ..Default::default()
        };
        let b = AlertRecord {
            timestamp: Some("garbage".into()),
            ..Default::default()
        };
        assert_eq!(Column::Timestamp.compare(&a, &b), Ordering::Greater);
        assert_eq!(Column::Timestamp.compare(&b, &b), Ordering::Equal);
        assert_eq!(Column::Timestamp.compare(&AlertRecord::default(), &a), Ordering::Less);
    }
}
