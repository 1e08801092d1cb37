//! Aggregation of alert records into chart inputs.

pub mod chart;
mod frequency;
mod summary;

pub use chart::{bar_chart, pie_chart, ChartData};
pub use frequency::{severity_counts, signature_counts, FrequencyMap};
pub use summary::Summary;
