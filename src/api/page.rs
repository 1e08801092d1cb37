//! Server-rendered dashboard page: bar chart, severity pie, alert table.
//!
//! Both charts are plain HTML/CSS (bars as widths, the pie as a
//! `conic-gradient`) so the page works without any script or CDN.

use askama::Template;

use super::query::TableQuery;
use crate::analysis::{bar_chart, pie_chart, Summary};
use crate::model::SEVERITY_LEVELS;
use crate::table::{Column, DisplayRow, TableView};

pub struct Bar {
    pub label: String,
    pub count: u64,
    pub width: String,
}

pub struct Slice {
    pub label: String,
    pub count: u64,
    pub percent: String,
    pub color: &'static str,
}

pub struct HeaderCell {
    pub label: &'static str,
    pub marker: &'static str,
    pub href: String,
}

pub struct SeverityOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub total: usize,
    pub matched: usize,
    pub bars: Vec<Bar>,
    pub slices: Vec<Slice>,
    pub pie_gradient: String,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<DisplayRow>,
    pub src_ip: String,
    pub dest_ip: String,
    pub severity_options: Vec<SeverityOption>,
}

impl DashboardPage {
    pub fn build(
        summary: &Summary,
        view: &TableView,
        query: &TableQuery,
        rows: Vec<DisplayRow>,
    ) -> Self {
        let bar_data = bar_chart(&summary.signatures);
        let max = summary.signatures.max_count().max(1) as f64;
        let bars = bar_data
            .labels
            .iter()
            .zip(bar_data.values())
            .map(|(label, &count)| Bar {
                label: label.clone(),
                count,
                width: format!("{:.1}", count as f64 * 100.0 / max),
            })
            .collect();

        let pie_data = pie_chart(&summary.severities);
        let total = summary.severities.total().max(1) as f64;
        let colors = pie_data
            .datasets
            .first()
            .map(|d| d.border_color.clone())
            .unwrap_or_default();
        let slices: Vec<Slice> = pie_data
            .labels
            .iter()
            .zip(pie_data.values())
            .zip(colors)
            .map(|((label, &count), color)| Slice {
                label: label.clone(),
                count,
                percent: format!("{:.1}", count as f64 * 100.0 / total),
                color,
            })
            .collect();
        let pie_gradient = conic_gradient(&slices, total);

        let headers = Column::ALL
            .iter()
            .map(|&column| {
                let mut next = view.sort;
                next.toggle(column);
                HeaderCell {
                    label: column.header(),
                    marker: view.sort.marker(column),
                    href: query.with_sort(next),
                }
            })
            .collect();

        let selected = query.severity.as_deref().unwrap_or_default();
        let mut severity_options = vec![SeverityOption {
            value: String::new(),
            label: "All".to_string(),
            selected: selected.is_empty(),
        }];
        severity_options.extend(SEVERITY_LEVELS.iter().map(|level| {
            let value = level.to_string();
            SeverityOption {
                selected: value == selected,
                label: value.clone(),
                value,
            }
        }));

        Self {
            total: summary.total_records,
            matched: rows.len(),
            bars,
            slices,
            pie_gradient,
            headers,
            rows,
            src_ip: query.src_ip.clone().unwrap_or_default(),
            dest_ip: query.dest_ip.clone().unwrap_or_default(),
            severity_options,
        }
    }
}

fn conic_gradient(slices: &[Slice], total: f64) -> String {
    if slices.is_empty() {
        return "#eee 0% 100%".to_string();
    }
    let mut start = 0.0;
    let mut stops = Vec::with_capacity(slices.len());
    for slice in slices {
        let end = start + slice.count as f64 * 100.0 / total;
        stops.push(format!("{} {:.2}% {:.2}%", slice.color, start, end));
        start = end;
    }
    stops.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_alerts;

    #[test]
    fn test_page_renders() {
        let set = parse_alerts(
            r#"[
                {"src_ip": "10.0.0.1", "alert": {"signature": "ET SCAN <probe>", "severity": 1}},
                {"src_ip": "10.0.0.2", "alert": {"signature": "GPL ICMP", "severity": 2}}
            ]"#,
        )
        .unwrap();
        let summary = Summary::from_records(set.records());
        let query = TableQuery {
            severity: Some("2".into()),
            ..Default::default()
        };
        let view = query.to_view(Default::default()).unwrap();
        let rows = view.rows(set.records());
        let page = DashboardPage::build(&summary, &view, &query, rows);
        assert_eq!(page.matched, 1);
        assert!(page.severity_options.iter().any(|o| o.selected && o.value == "2"));

        let html = page.render().unwrap();
        assert!(html.contains("Number of Alerts by Type"));
        assert!(html.contains("Severity Distribution"));
        assert!(html.contains("ET SCAN &lt;probe&gt;"));
        assert!(html.contains("10.0.0.2"));
    }

    #[test]
    fn test_gradient_covers_full_circle() {
        let slices = vec![
            Slice {
                label: "Severity 1".into(),
                count: 1,
                percent: "25.0".into(),
                color: "red",
            },
            Slice {
                label: "Severity 2".into(),
                count: 3,
                percent: "75.0".into(),
                color: "blue",
            },
        ];
        assert_eq!(
            conic_gradient(&slices, 4.0),
            "red 0.00% 25.00%, blue 25.00% 100.00%"
        );
    }
}
