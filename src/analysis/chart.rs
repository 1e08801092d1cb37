//! Chart series in the shape chart.js consumes.

use super::FrequencyMap;
use serde::Serialize;

const BAR_BACKGROUND: &str = "rgba(54, 162, 235, 0.2)";
const BAR_BORDER: &str = "rgba(54, 162, 235, 1)";

const PIE_BACKGROUND: [&str; 6] = [
    "rgba(255, 99, 132, 0.2)",
    "rgba(54, 162, 235, 0.2)",
    "rgba(255, 206, 86, 0.2)",
    "rgba(75, 192, 192, 0.2)",
    "rgba(153, 102, 255, 0.2)",
    "rgba(255, 159, 64, 0.2)",
];

const PIE_BORDER: [&str; 6] = [
    "rgba(255, 99, 132, 1)",
    "rgba(54, 162, 235, 1)",
    "rgba(255, 206, 86, 1)",
    "rgba(75, 192, 192, 1)",
    "rgba(153, 102, 255, 1)",
    "rgba(255, 159, 64, 1)",
];

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub title: &'static str,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    pub data: Vec<u64>,
    pub background_color: Vec<&'static str>,
    pub border_color: Vec<&'static str>,
    pub border_width: u32,
}

impl ChartData {
    /// Values of the first (and only) dataset.
    pub fn values(&self) -> &[u64] {
        self.datasets.first().map(|d| d.data.as_slice()).unwrap_or_default()
    }
}

/// "Number of Alerts by Type": one bar per signature.
pub fn bar_chart(signatures: &FrequencyMap<String>) -> ChartData {
    ChartData {
        title: "Number of Alerts by Type",
        labels: signatures.keys().cloned().collect(),
        datasets: vec![Dataset {
            label: Some("Number of Alerts"),
            data: signatures.counts(),
            background_color: vec![BAR_BACKGROUND],
            border_color: vec![BAR_BORDER],
            border_width: 1,
        }],
    }
}

/// "Severity Distribution": one slice per severity level. The palette
/// repeats when there are more slices than colours.
pub fn pie_chart(severities: &FrequencyMap<i64>) -> ChartData {
    let slices = severities.len();
    ChartData {
        title: "Severity Distribution",
        labels: severities.keys().map(|s| severity_label(*s)).collect(),
        datasets: vec![Dataset {
            label: None,
            data: severities.counts(),
            background_color: PIE_BACKGROUND.iter().copied().cycle().take(slices).collect(),
            border_color: PIE_BORDER.iter().copied().cycle().take(slices).collect(),
            border_width: 1,
        }],
    }
}

pub fn severity_label(severity: i64) -> String {
    format!("Severity {}", severity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_chart_follows_map_order() {
        let map: FrequencyMap<String> = ["ET SCAN", "GPL ICMP", "ET SCAN"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let chart = bar_chart(&map);
        assert_eq!(chart.labels, vec!["ET SCAN", "GPL ICMP"]);
        assert_eq!(chart.values(), &[2, 1]);
        assert_eq!(chart.datasets[0].label, Some("Number of Alerts"));
    }

    #[test]
    fn test_pie_chart_labels_and_palette() {
        let map: FrequencyMap<i64> = [3, 1, 3, 2, 4, 5, 0, 7].into_iter().collect();
        let chart = pie_chart(&map);
        assert_eq!(chart.labels[0], "Severity 3");
        assert_eq!(chart.labels.len(), 7);
        let ds = &chart.datasets[0];
        assert_eq!(ds.background_color.len(), 7);
        assert_eq!(ds.background_color[6], ds.background_color[0]);
    }

    #[test]
    fn test_empty_charts() {
        let chart = pie_chart(&FrequencyMap::new());
        assert!(chart.labels.is_empty());
        assert!(chart.values().is_empty());
        assert!(chart.datasets[0].background_color.is_empty());
    }

    #[test]
    fn test_chartjs_field_names() {
        let map: FrequencyMap<String> = std::iter::once("x".to_string()).collect();
        let json = serde_json::to_value(bar_chart(&map)).unwrap();
        assert_eq!(json["datasets"][0]["backgroundColor"][0], BAR_BACKGROUND);
        assert_eq!(json["datasets"][0]["borderWidth"], 1);
    }
}
