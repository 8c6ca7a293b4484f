pub mod config;
pub mod error;
pub mod plot;
pub mod record;
pub mod report;
pub mod series;
pub mod table;
pub mod util;

pub const DEFAULT_INPUT: &str = "performance_metrics.csv";
pub const DEFAULT_OUTPUT: &str = "performance_graphs.html";
pub const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@3.9.1/dist/chart.min.js";
