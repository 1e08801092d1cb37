//! Terminal rendering of the dashboard views.

mod text;

pub use text::{render_bar_chart, render_severity_distribution, render_summary, render_table};
