use super::Column;
use crate::model::AlertRecord;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("severity filter must be an integer, got '{0}'")]
    InvalidSeverity(String),

    #[error("column '{0}' cannot be filtered")]
    NotFilterable(Column),
}

/// One active column predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-sensitive substring match.
    Contains(String),
    /// Exact match on the severity ordinal.
    Equals(i64),
}

/// Per-column filters for the alert table, combined with AND.
///
/// Text columns match by case-sensitive substring containment; severity
/// matches exactly. A record whose field is absent never matches an active
/// filter on that field.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    predicates: BTreeMap<Column, Predicate>,
}

impl RecordFilter {
    pub const FILTERABLE: [Column; 5] = [
        Column::SrcIp,
        Column::DestIp,
        Column::Severity,
        Column::Protocol,
        Column::Category,
    ];

    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter for `column` from raw input. `None` or an empty string
    /// clears it.
    pub fn set(&mut self, column: Column, value: Option<&str>) -> Result<(), FilterError> {
        if !Self::FILTERABLE.contains(&column) {
            return Err(FilterError::NotFilterable(column));
        }
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ => {
                self.clear(column);
                return Ok(());
            }
        };

        let predicate = match column {
            Column::Severity => {
                let level = value
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| FilterError::InvalidSeverity(value.to_string()))?;
                Predicate::Equals(level)
            }
            _ => Predicate::Contains(value.to_string()),
        };
        debug!(%column, ?predicate, "filter set");
        self.predicates.insert(column, predicate);
        Ok(())
    }

    /// Set or clear the severity filter directly.
    pub fn set_severity(&mut self, severity: Option<i64>) {
        match severity {
            Some(level) => {
                self.predicates.insert(Column::Severity, Predicate::Equals(level));
            }
            None => self.clear(Column::Severity),
        }
    }

    pub fn clear(&mut self, column: Column) {
        if self.predicates.remove(&column).is_some() {
            debug!(%column, "filter cleared");
        }
    }

    pub fn clear_all(&mut self) {
        self.predicates.clear();
    }

    pub fn is_active(&self) -> bool {
        !self.predicates.is_empty()
    }

    pub fn get(&self, column: Column) -> Option<&Predicate> {
        self.predicates.get(&column)
    }

    pub fn matches(&self, record: &AlertRecord) -> bool {
        self.predicates.iter().all(|(column, predicate)| match predicate {
            Predicate::Contains(needle) => column
                .text(record)
                .is_some_and(|hay| hay.contains(needle.as_str())),
            Predicate::Equals(level) => record.severity() == Some(*level),
        })
    }

    pub fn apply<'a>(&self, records: &'a [AlertRecord]) -> Vec<&'a AlertRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}
