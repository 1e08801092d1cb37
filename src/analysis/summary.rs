use super::{severity_counts, signature_counts, FrequencyMap};
use crate::model::AlertRecord;
use serde::Serialize;

/// Everything the dashboard header and the two charts need.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_records: usize,
    pub with_signature: usize,
    pub with_severity: usize,
    /// Records with no `alert` block at all.
    pub without_alert: usize,
    /// Severities present but outside the 1-5 picker range.
    pub unlisted_severity: usize,
    pub signatures: FrequencyMap<String>,
    pub severities: FrequencyMap<i64>,
}

impl Summary {
    pub fn from_records(records: &[AlertRecord]) -> Self {
        let signatures = signature_counts(Some(records));
        let severities = severity_counts(Some(records));
        Self {
            total_records: records.len(),
            with_signature: signatures.total() as usize,
            with_severity: severities.total() as usize,
            without_alert: records.iter().filter(|r| r.alert.is_none()).count(),
            unlisted_severity: records.iter().filter(|r| r.has_unlisted_severity()).count(),
            signatures,
            severities,
        }
    }
}
