use common::{
    config::Settings,
    plot::{Axis, Chart, Dataset, LineChart, Plot},
    series::{CategorySeries, Metric},
};
use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The charts drawn when the config does not list any
pub fn default_plots() -> Vec<Box<dyn Plot>> {
    vec![Box::new(Speedup::default()), Box::new(Efficiency::default())]
}

/// Speedup against worker-count, over the linear speedup line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Speedup {
    pub id: String,
    /// The category is appended to it
    pub title: String,
    pub y_label: String,
    pub ideal_label: String,
}

impl Default for Speedup {
    fn default() -> Self {
        Self {
            id: "speedup".to_owned(),
            title: "Speedup - Máscara".to_owned(),
            y_label: "Speedup".to_owned(),
            ideal_label: "Ideal (Speedup Linear)".to_owned(),
        }
    }
}

#[typetag::serde]
impl Plot for Speedup {
    fn id(&self) -> &str {
        &self.id
    }

    fn chart(&self, series: &CategorySeries, settings: &Settings) -> Result<Chart> {
        let ideal = series.ideal_speedup();
        debug!(
            "{} speedup: {} labels, ideal up to {}",
            series.category,
            series.labels.len(),
            series.max_workers
        );
        Ok(LineChart {
            id: &self.id,
            title: format!("{} {}", self.title, series.category),
            metric: Metric::Speedup,
            y_axis: Axis::from_zero(&self.y_label, None),
            ideal: Some(Dataset::ideal(&self.ideal_label, ideal)),
        }
        .build(series, settings))
    }
}

/// Efficiency against worker-count, over a constant 1.0 line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Efficiency {
    pub id: String,
    pub title: String,
    pub y_label: String,
    pub ideal_label: String,
    pub y_max: Option<f64>,
    /// Length of the 1.0 line. `None` draws one point per axis label.
    pub ideal_points: Option<usize>,
}

impl Default for Efficiency {
    fn default() -> Self {
        Self {
            id: "eficiencia".to_owned(),
            title: "Eficiência - Máscara".to_owned(),
            y_label: "Eficiência".to_owned(),
            ideal_label: "Ideal (Eficiência = 1.0)".to_owned(),
            y_max: Some(1.2),
            ideal_points: Some(4),
        }
    }
}

#[typetag::serde]
impl Plot for Efficiency {
    fn id(&self) -> &str {
        &self.id
    }

    fn chart(&self, series: &CategorySeries, settings: &Settings) -> Result<Chart> {
        let points = self.ideal_points.unwrap_or(series.labels.len());
        Ok(LineChart {
            id: &self.id,
            title: format!("{} {}", self.title, series.category),
            metric: Metric::Efficiency,
            y_axis: Axis::from_zero(&self.y_label, self.y_max),
            ideal: Some(Dataset::ideal(&self.ideal_label, vec![1.0; points])),
        }
        .build(series, settings))
    }
}

/// Elapsed time against worker-count
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElapsedTime {
    pub id: String,
    pub title: String,
    pub y_label: String,
}

impl Default for ElapsedTime {
    fn default() -> Self {
        Self {
            id: "tempo".to_owned(),
            title: "Tempo - Máscara".to_owned(),
            y_label: "Tempo (s)".to_owned(),
        }
    }
}

#[typetag::serde]
impl Plot for ElapsedTime {
    fn id(&self) -> &str {
        &self.id
    }

    fn chart(&self, series: &CategorySeries, settings: &Settings) -> Result<Chart> {
        Ok(LineChart {
            id: &self.id,
            title: format!("{} {}", self.title, series.category),
            metric: Metric::Time,
            y_axis: Axis::from_zero(&self.y_label, None),
            ideal: None,
        }
        .build(series, settings))
    }
}
