use core::fmt::Debug;
use std::collections::HashSet;

use dyn_clone::{DynClone, clone_trait_object};
use eyre::{Result, bail};
use serde::Serialize;

use crate::{
    config::{Settings, Strategy},
    series::{CategorySeries, Metric},
    util::element_id,
};

#[typetag::serde(tag = "type")]
pub trait Plot: Debug + DynClone + Send + Sync {
    /// Prefix of the canvas element id, the category is appended to it
    fn id(&self) -> &str;
    /// Builds the chart for one category
    ///
    /// Arguments:
    /// * `series` - The category's series, labels and worker-count range
    /// * `settings` - The settings from the config
    fn chart(&self, series: &CategorySeries, settings: &Settings) -> Result<Chart>;
}
clone_trait_object!(Plot);

/// A chart ready to be placed in the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub id: String,
    pub title: String,
    pub config: ChartConfig,
}

/// Chart.js configuration object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<u32>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
    pub border_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<[u8; 2]>,
    pub point_radius: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_background_color: Option<String>,
    pub border_width: u8,
}

const DASH: [u8; 2] = [5, 5];

impl Dataset {
    /// Thin dashed grey reference line without points
    pub fn ideal(label: &str, data: Vec<f64>) -> Self {
        Self {
            label: label.to_owned(),
            data: data.into_iter().map(Some).collect(),
            border_color: "rgba(0, 0, 0, 0.3)".to_owned(),
            background_color: None,
            border_dash: Some(DASH),
            point_radius: 0,
            point_background_color: None,
            border_width: 1,
        }
    }

    pub fn strategy(strategy: &Strategy, data: Vec<Option<f64>>) -> Self {
        let color = format!("rgb({})", strategy.color);
        Self {
            label: strategy.name.clone(),
            data,
            border_color: color.clone(),
            background_color: Some(format!("rgba({}, 0.1)", strategy.color)),
            border_dash: strategy.dashed.then_some(DASH),
            point_radius: 6,
            point_background_color: Some(color),
            border_width: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub scales: Scales,
    pub plugins: Plugins,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub title: AxisTitle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Axis {
    pub fn titled(text: &str) -> Self {
        Self {
            title: AxisTitle {
                display: true,
                text: text.to_owned(),
            },
            begin_at_zero: None,
            max: None,
        }
    }

    pub fn from_zero(text: &str, max: Option<f64>) -> Self {
        Self {
            begin_at_zero: Some(true),
            max,
            ..Self::titled(text)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
    pub position: &'static str,
}

/// Shape shared by the per-category line charts
pub struct LineChart<'a> {
    pub id: &'a str,
    pub title: String,
    pub metric: Metric,
    pub y_axis: Axis,
    /// Drawn first, under the strategy lines
    pub ideal: Option<Dataset>,
}

impl LineChart<'_> {
    pub fn build(self, series: &CategorySeries, settings: &Settings) -> Chart {
        let mut datasets = Vec::with_capacity(series.strategies.len() + 1);
        datasets.extend(self.ideal);
        for (idx, entry) in series.strategies.iter().enumerate() {
            datasets.push(Dataset::strategy(
                &entry.strategy,
                series.values(idx, self.metric),
            ));
        }

        Chart {
            id: element_id(&[self.id, series.category.as_str()]),
            title: self.title,
            config: ChartConfig {
                kind: "line",
                data: ChartData {
                    labels: series.labels.clone(),
                    datasets,
                },
                options: ChartOptions {
                    responsive: true,
                    maintain_aspect_ratio: false,
                    scales: Scales {
                        x: Axis::titled(&settings.x_label),
                        y: self.y_axis,
                    },
                    plugins: Plugins {
                        legend: Legend {
                            display: true,
                            position: "top",
                        },
                    },
                },
            },
        }
    }
}

/// Builds one chart per (category, plot), category-major. Fails when two charts would share
/// a canvas id.
pub fn build_charts(
    plots: &[Box<dyn Plot>],
    series: &[CategorySeries],
    settings: &Settings,
) -> Result<Vec<Chart>> {
    let mut charts = Vec::with_capacity(plots.len() * series.len());
    let mut ids = HashSet::new();
    for category in series {
        for plot in plots {
            let chart = plot.chart(category, settings)?;
            if !ids.insert(chart.id.clone()) {
                bail!(
                    "Chart id {:?} of plot {:?} in category {:?} is already taken",
                    chart.id,
                    plot.id(),
                    category.category
                );
            }
            charts.push(chart);
        }
    }
    Ok(charts)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        record::{Measurement, Record},
        series::extract,
        table::MeasurementTable,
    };

    fn series() -> Vec<CategorySeries> {
        let settings = Settings::default();
        let table = MeasurementTable::from_records(
            vec![Record {
                strategy: "OpenMP".to_owned(),
                category: "3x3".to_owned(),
                workers: Some(2),
                measurement: Measurement {
                    time: 6.0,
                    speedup: 1.8,
                    efficiency: 0.9,
                },
            }],
            &settings,
        );
        extract(&table, &settings)
    }

    #[test]
    fn strategy_dataset_style() {
        let settings = Settings::default();
        let mpi = serde_json::to_value(Dataset::strategy(&settings.strategies[0], vec![Some(1.0)]))
            .unwrap();
        assert_eq!(
            mpi,
            json!({
                "label": "MPI",
                "data": [1.0],
                "borderColor": "rgb(31, 119, 180)",
                "backgroundColor": "rgba(31, 119, 180, 0.1)",
                "pointRadius": 6,
                "pointBackgroundColor": "rgb(31, 119, 180)",
                "borderWidth": 2
            })
        );

        let openmp = Dataset::strategy(&settings.strategies[1], vec![None]);
        assert_eq!(openmp.border_dash, Some([5, 5]));
        assert_eq!(serde_json::to_value(&openmp).unwrap()["data"], json!([null]));
    }

    #[test]
    fn line_chart_layout() {
        let settings = Settings::default();
        let series = series();
        let chart = LineChart {
            id: "tempo",
            title: "Tempo".to_owned(),
            metric: Metric::Time,
            y_axis: Axis::from_zero("Tempo (s)", Some(20.0)),
            ideal: Some(Dataset::ideal("Ideal", vec![1.0])),
        }
        .build(&series[0], &settings);

        assert_eq!(chart.id, "tempo_3x3");
        let config = serde_json::to_value(&chart.config).unwrap();
        assert_eq!(config["type"], "line");
        // MPI has nothing in 3x3 so the labels are empty
        assert_eq!(config["data"]["labels"], json!([]));
        assert_eq!(config["data"]["datasets"][0]["pointRadius"], 0);
        assert_eq!(config["data"]["datasets"][2]["data"], json!([6.0]));
        assert_eq!(config["options"]["maintainAspectRatio"], false);
        assert_eq!(config["options"]["scales"]["x"]["title"]["text"], "Processos/Threads");
        assert!(config["options"]["scales"]["x"].get("beginAtZero").is_none());
        assert_eq!(config["options"]["scales"]["y"]["beginAtZero"], true);
        assert_eq!(config["options"]["scales"]["y"]["max"], 20.0);
        assert_eq!(config["options"]["plugins"]["legend"]["position"], "top");
    }
}
