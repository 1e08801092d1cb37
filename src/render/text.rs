use crate::analysis::{chart, FrequencyMap, Summary};
use crate::table::DisplayRow;
use std::fmt::Write;

const BAR_WIDTH: usize = 40;
const MAX_LABEL: usize = 48;
const MAX_CELL: usize = 32;

/// "Number of Alerts by Type" as horizontal bars scaled to the largest count.
pub fn render_bar_chart(signatures: &FrequencyMap<String>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Number of Alerts by Type");
    let _ = writeln!(out, "{:-<1$}", "", MAX_LABEL + BAR_WIDTH + 10);
    if signatures.is_empty() {
        let _ = writeln!(out, "(no alerts with a signature)");
        return out;
    }

    let label_width = signatures
        .keys()
        .map(|k| k.chars().count().min(MAX_LABEL))
        .max()
        .unwrap_or(0);
    let max = signatures.max_count();
    for (signature, count) in signatures.iter() {
        let _ = writeln!(
            out,
            "{:<lw$} | {:<bw$} {}",
            truncate(signature, MAX_LABEL),
            bar(count, max),
            count,
            lw = label_width,
            bw = BAR_WIDTH,
        );
    }
    out
}

/// "Severity Distribution": one line per slice with its share of the total.
pub fn render_severity_distribution(severities: &FrequencyMap<i64>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Severity Distribution");
    let _ = writeln!(out, "{:-<1$}", "", 40);
    if severities.is_empty() {
        let _ = writeln!(out, "(no alerts with a severity)");
        return out;
    }

    let total = severities.total();
    for (severity, count) in severities.iter() {
        let pct = count as f64 * 100.0 / total as f64;
        let _ = writeln!(
            out,
            "{:<12} {:>6} {:>6.1}%",
            chart::severity_label(*severity),
            count,
            pct
        );
    }
    out
}

/// Header block plus both charts.
pub fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== Event Dashboard ===");
    let _ = writeln!(out, "Records:            {}", summary.total_records);
    let _ = writeln!(out, "With signature:     {}", summary.with_signature);
    let _ = writeln!(out, "With severity:      {}", summary.with_severity);
    let _ = writeln!(out, "Missing alert data: {}", summary.without_alert);
    if summary.unlisted_severity > 0 {
        let _ = writeln!(
            out,
            "Severity outside 1-5: {}",
            summary.unlisted_severity
        );
    }
    let _ = writeln!(out);
    out.push_str(&render_bar_chart(&summary.signatures));
    let _ = writeln!(out);
    out.push_str(&render_severity_distribution(&summary.severities));
    out
}

/// "Alert Details" as an aligned text table.
pub fn render_table(headers: &[String], rows: &[DisplayRow]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.cells.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count().min(MAX_CELL));
            }
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "Alert Details");
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<1$}", h, *w))
        .collect();
    let _ = writeln!(out, "{}", header_line.join(" | ").trim_end());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-|-"));

    for row in rows {
        let line: Vec<String> = row
            .cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<1$}", truncate(c, MAX_CELL), *w))
            .collect();
        let _ = writeln!(out, "{}", line.join(" | ").trim_end());
    }
    let _ = writeln!(out, "({} rows)", rows.len());
    out
}

fn bar(count: u64, max: u64) -> String {
    if max == 0 {
        return String::new();
    }
    // Round up so every non-zero count gets at least one cell.
    let cells = ((count as usize * BAR_WIDTH) + max as usize - 1) / max as usize;
    "█".repeat(cells.min(BAR_WIDTH))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
    t.push('…');
    t
}
