//! Loading the static alert fixture.
//!
//! The whole file is read once at startup into an [`AlertSet`], which is then
//! handed to the renderers and the HTTP state. Nothing writes back to it.

mod loader;

pub use loader::{load_alerts, parse_alerts};

use crate::model::AlertRecord;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read alert data from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// `entry` is the 1-based array position, or the line number for
    /// newline-delimited input.
    #[error("invalid alert record at entry {entry}: {source}")]
    Parse {
        entry: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a JSON array of alert records, found {found}")]
    NotAnArray { found: &'static str },
}

/// Immutable, cheaply clonable collection of alert records.
#[derive(Debug, Clone)]
pub struct AlertSet {
    records: Arc<[AlertRecord]>,
}

impl AlertSet {
    pub fn new(records: Vec<AlertRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[AlertRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlertRecord> {
        self.records.iter()
    }
}

impl Default for AlertSet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<AlertRecord>> for AlertSet {
    fn from(records: Vec<AlertRecord>) -> Self {
        Self::new(records)
    }
}
