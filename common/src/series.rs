use itertools::Itertools;
use serde::Serialize;

use crate::{
    config::{AxisMode, Settings, Strategy},
    table::{MeasurementTable, WorkerMap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Time,
    Speedup,
    Efficiency,
}

/// Measurements of one (strategy, category) sorted by worker-count, index-aligned
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    pub worker_counts: Vec<u32>,
    pub time: Vec<f64>,
    pub speedup: Vec<f64>,
    pub efficiency: Vec<f64>,
}

impl Series {
    pub fn from_map(workers: &WorkerMap) -> Self {
        let mut series = Self::default();
        for (&count, measurement) in workers.iter().sorted_by_key(|(count, _)| **count) {
            series.worker_counts.push(count);
            series.time.push(measurement.time);
            series.speedup.push(measurement.speedup);
            series.efficiency.push(measurement.efficiency);
        }
        series
    }

    pub fn metric(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::Time => &self.time,
            Metric::Speedup => &self.speedup,
            Metric::Efficiency => &self.efficiency,
        }
    }

    /// Value measured at exactly `workers`
    pub fn at(&self, workers: u32, metric: Metric) -> Option<f64> {
        let idx = self.worker_counts.binary_search(&workers).ok()?;
        self.metric(metric).get(idx).copied()
    }

    pub fn max_workers(&self) -> Option<u32> {
        self.worker_counts.last().copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategySeries {
    pub strategy: Strategy,
    pub series: Series,
}

/// Everything plotted for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySeries {
    pub category: String,
    pub axis: AxisMode,
    /// x axis labels
    pub labels: Vec<u32>,
    /// In configured strategy order
    pub strategies: Vec<StrategySeries>,
    /// Largest worker-count over all strategies, 1 when there is no data
    pub max_workers: u32,
}

impl CategorySeries {
    pub fn new(category: &str, table: &MeasurementTable, settings: &Settings) -> Self {
        let empty = WorkerMap::new();
        let strategies = settings
            .strategies
            .iter()
            .map(|strategy| StrategySeries {
                strategy: strategy.clone(),
                series: Series::from_map(table.get(&strategy.name, category).unwrap_or(&empty)),
            })
            .collect::<Vec<_>>();

        let max_workers = strategies
            .iter()
            .map(|s| s.series.max_workers().unwrap_or(1))
            .max()
            .unwrap_or(1);

        let labels = match settings.axis {
            AxisMode::FirstStrategy => strategies
                .first()
                .map(|s| s.series.worker_counts.clone())
                .unwrap_or_default(),
            AxisMode::Union => strategies
                .iter()
                .flat_map(|s| s.series.worker_counts.iter().copied())
                .sorted()
                .dedup()
                .collect(),
        };

        Self {
            category: category.to_owned(),
            axis: settings.axis,
            labels,
            strategies,
            max_workers,
        }
    }

    /// Plotted values of the strategy at `index`.
    ///
    /// With [`AxisMode::FirstStrategy`] these are the raw values and line up with
    /// [`Self::labels`] by position only. With [`AxisMode::Union`] there is one entry per
    /// label, `None` where the strategy has no measurement.
    pub fn values(&self, index: usize, metric: Metric) -> Vec<Option<f64>> {
        let Some(entry) = self.strategies.get(index) else {
            return Vec::new();
        };
        match self.axis {
            AxisMode::FirstStrategy => entry
                .series
                .metric(metric)
                .iter()
                .copied()
                .map(Some)
                .collect(),
            AxisMode::Union => self
                .labels
                .iter()
                .map(|&workers| entry.series.at(workers, metric))
                .collect(),
        }
    }

    /// Linear speedup reference: `1..=max_workers`, or the labels themselves when the axis
    /// is the union of worker-counts
    pub fn ideal_speedup(&self) -> Vec<f64> {
        match self.axis {
            AxisMode::FirstStrategy => (1..=self.max_workers).map(f64::from).collect(),
            AxisMode::Union => self.labels.iter().copied().map(f64::from).collect(),
        }
    }
}

/// Series of every configured category, in configured order
pub fn extract(table: &MeasurementTable, settings: &Settings) -> Vec<CategorySeries> {
    settings
        .categories
        .iter()
        .map(|category| CategorySeries::new(category, table, settings))
        .collect()
}
