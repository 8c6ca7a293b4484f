use std::{fs, path::Path};

use eyre::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    config::Config,
    plot::{Chart, Plot, build_charts},
    series::CategorySeries,
    util::script_json,
};

const TEMPLATE_NAME: &str = "report";

#[derive(Serialize)]
struct ReportContext<'a> {
    title: &'a str,
    heading: &'a str,
    chart_js: &'a str,
    charts: Vec<ChartContext<'a>>,
}

#[derive(Serialize)]
struct ChartContext<'a> {
    id: &'a str,
    title: &'a str,
    /// Chart.js config, already script-safe JSON
    config: String,
}

/// Renders the complete HTML document in memory
pub fn render_report(
    config: &Config,
    plots: &[Box<dyn Plot>],
    series: &[CategorySeries],
) -> Result<String> {
    let charts = build_charts(plots, series, &config.settings)?;
    debug!("Built {} charts", charts.len());
    render_charts(config, &charts)
}

pub fn render_charts(config: &Config, charts: &[Chart]) -> Result<String> {
    let mut context = ReportContext {
        title: &config.title,
        heading: &config.heading,
        chart_js: &config.chart_js,
        charts: Vec::with_capacity(charts.len()),
    };
    for chart in charts {
        context.charts.push(ChartContext {
            id: &chart.id,
            title: &chart.title,
            config: script_json(&chart.config).context(format!("Serialize chart {}", chart.id))?,
        });
    }

    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_template_string(TEMPLATE_NAME, include_str!("report.template.html"))?;
    Ok(handlebars.render(TEMPLATE_NAME, &context)?)
}

/// Writes the rendered document, replacing whatever was at `path`
pub fn write_report(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).context(format!("Create {parent:?}"))?;
    }
    fs::write(path, html).context(format!("Write report {path:?}"))?;
    info!("Wrote {} bytes to {path:?}", html.len());
    Ok(())
}
