use super::{Column, RecordFilter, SortState};
use crate::model::AlertRecord;
use serde::Serialize;

/// One rendered table row: cells in [`Column::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub cells: Vec<String>,
}

impl DisplayRow {
    pub fn from_record(record: &AlertRecord) -> Self {
        Self {
            cells: Column::ALL.iter().map(|c| c.cell(record)).collect(),
        }
    }

    pub fn cell(&self, column: Column) -> &str {
        Column::ALL
            .iter()
            .position(|c| *c == column)
            .and_then(|i| self.cells.get(i))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Filter and sort state of the alert details table.
#[derive(Debug, Clone, Default)]
pub struct TableView {
    pub filter: RecordFilter,
    pub sort: SortState,
}

impl TableView {
    pub fn new(filter: RecordFilter, sort: SortState) -> Self {
        Self { filter, sort }
    }

    /// Filtered then sorted records, borrowed from `records`.
    pub fn select<'a>(&self, records: &'a [AlertRecord]) -> Vec<&'a AlertRecord> {
        let mut rows = self.filter.apply(records);
        self.sort.sort(&mut rows);
        rows
    }

    pub fn rows(&self, records: &[AlertRecord]) -> Vec<DisplayRow> {
        self.select(records)
            .into_iter()
            .map(DisplayRow::from_record)
            .collect()
    }

    /// Header labels with the sort marker appended to the sorted column.
    pub fn headers(&self) -> Vec<String> {
        Column::ALL
            .iter()
            .map(|c| match self.sort.marker(*c) {
                "" => c.header().to_string(),
                arrow => format!("{} {}", c.header(), arrow),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_alerts;
    use crate::table::Direction;

    #[test]
    fn test_rows_filtered_and_sorted() {
        let set = parse_alerts(
            r#"[
                {"timestamp": "2024-03-01T10:00:02Z", "src_ip": "10.0.0.2", "port": 80,
                 "alert": {"severity": 2}},
                {"timestamp": "2024-03-01T10:00:01Z", "src_ip": "10.0.0.1", "port": 22,
                 "alert": {"severity": 2, "category": "Recon"}},
                {"timestamp": "2024-03-01T10:00:03Z", "src_ip": "192.168.0.1",
                 "alert": {"severity": 1}}
            ]"#,
        )
        .unwrap();
        let mut view = TableView::default();
        view.filter.set(Column::SrcIp, Some("10.0.0")).unwrap();
        view.sort.set(Column::Timestamp, Direction::Asc);

        let rows = view.rows(set.records());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cell(Column::SrcIp), "10.0.0.1");
        assert_eq!(rows[0].cell(Column::Category), "Recon");
        assert_eq!(rows[1].cell(Column::Port), "80");
        assert_eq!(rows[1].cell(Column::Category), "");
    }

    #[test]
    fn test_missing_alert_still_listed() {
        let set =
            parse_alerts(r#"[{"src_ip": "10.1.1.1", "port": 53, "protocol": "UDP"}]"#).unwrap();
        let rows = TableView::default().rows(set.records());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cell(Column::Severity), "");
        assert_eq!(rows[0].cell(Column::Protocol), "UDP");
    }

    #[test]
    fn test_headers_show_marker() {
        let mut view = TableView::default();
        assert_eq!(view.headers()[0], "Timestamp");
        view.sort.toggle(Column::Severity);
        view.sort.toggle(Column::Severity);
        assert_eq!(view.headers()[5], "Severity ▼");
    }
}
