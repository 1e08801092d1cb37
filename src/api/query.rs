//! Table query parameters shared by the JSON endpoint and the HTML page.

use serde::Deserialize;

use super::error::ApiError;
use crate::table::{Column, Direction, RecordFilter, SortState, TableView};

/// `?src_ip=&dest_ip=&severity=&protocol=&category=&sort=&order=`
///
/// Empty values clear the matching filter. A missing `sort` falls back to
/// the configured default; an empty `sort` means unsorted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableQuery {
    pub src_ip: Option<String>,
    pub dest_ip: Option<String>,
    pub severity: Option<String>,
    pub protocol: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl TableQuery {
    pub fn to_view(&self, default_sort: SortState) -> Result<TableView, ApiError> {
        let mut filter = RecordFilter::new();
        filter.set(Column::SrcIp, self.src_ip.as_deref())?;
        filter.set(Column::DestIp, self.dest_ip.as_deref())?;
        filter.set(Column::Severity, self.severity.as_deref())?;
        filter.set(Column::Protocol, self.protocol.as_deref())?;
        filter.set(Column::Category, self.category.as_deref())?;

        let sort = match self.sort.as_deref() {
            None => default_sort,
            Some("") => SortState::new(),
            Some(raw) => {
                let column: Column = raw.parse()?;
                let direction = match self.order.as_deref() {
                    None | Some("") => Direction::Asc,
                    Some(o) => o.parse().map_err(ApiError::BadRequest)?,
                };
                SortState::by(column, direction)
            }
        };
        Ok(TableView::new(filter, sort))
    }

    /// Query string that keeps the current filters and applies `sort`.
    pub fn with_sort(&self, sort: SortState) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        for (key, value) in [
            ("src_ip", &self.src_ip),
            ("dest_ip", &self.dest_ip),
            ("severity", &self.severity),
            ("protocol", &self.protocol),
            ("category", &self.category),
        ] {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push((key, v.to_string()));
            }
        }
        match sort.current() {
            Some((column, direction)) => {
                pairs.push(("sort", column.accessor().to_string()));
                pairs.push(("order", direction.to_string()));
            }
            None => pairs.push(("sort", String::new())),
        }

        let encoded: Vec<String> = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode_component(v)))
            .collect();
        format!("?{}", encoded.join("&"))
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
