use std::{
    collections::HashMap,
    fs::read_to_string,
    path::{Path, PathBuf},
};

use eyre::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::{CHART_JS_URL, DEFAULT_INPUT, DEFAULT_OUTPUT, plot::Plot, util::element_id};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document `<title>`
    pub title: String,
    /// Page `<h1>`
    pub heading: String,
    pub input: PathBuf,
    pub output: PathBuf,
    /// Chart.js script reference, loaded by the browser when viewing
    pub chart_js: String,
    pub settings: Settings,
    /// Charts drawn for every category, in order. `None` means the default set.
    pub plots: Option<Vec<Box<dyn Plot>>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Análise de Desempenho - Speedup e Eficiência".to_owned(),
            heading: "Análise de Desempenho: Speedup e Eficiência".to_owned(),
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            chart_js: CHART_JS_URL.to_owned(),
            settings: Settings::default(),
            plots: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_to_string(path).context(format!("Read config {path:?}"))?;
        let config: Config =
            serde_yml::from_str(&content).context(format!("Parse config {path:?}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.settings.strategies.is_empty() {
            bail!("No strategies configured");
        }
        if self.settings.categories.is_empty() {
            bail!("No categories configured");
        }
        if self.plots.as_ref().is_some_and(|plots| plots.is_empty()) {
            bail!("Plot list is empty");
        }
        // categories end up in canvas ids, which must stay unique
        let mut ids = HashMap::new();
        for category in &self.settings.categories {
            if let Some(other) = ids.insert(element_id(&[category.as_str()]), category) {
                bail!("Categories {other:?} and {category:?} map to the same chart id");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub strategies: Vec<Strategy>,
    pub categories: Vec<String>,
    /// Worker-count text marking a row without a worker-count (the sequential baseline)
    pub unavailable: String,
    pub x_label: String,
    pub axis: AxisMode,
    pub columns: Columns,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            strategies: vec![
                Strategy::new("MPI", "31, 119, 180", false),
                Strategy::new("OpenMP", "148, 103, 189", true),
            ],
            categories: vec!["3x3".to_owned(), "5x5".to_owned(), "7x7".to_owned()],
            unavailable: "-".to_owned(),
            x_label: "Processos/Threads".to_owned(),
            axis: AxisMode::default(),
            columns: Columns::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub name: String,
    /// RGB triple, ie. `31, 119, 180`
    pub color: String,
    #[serde(default)]
    pub dashed: bool,
}

impl Strategy {
    pub fn new(name: &str, color: &str, dashed: bool) -> Self {
        Self {
            name: name.to_owned(),
            color: color.to_owned(),
            dashed,
        }
    }
}

/// Which worker-counts label the x axis of a chart
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AxisMode {
    /// Labels come from the first strategy, the others are plotted by position
    #[default]
    FirstStrategy,
    /// Labels are the union of all worker-counts, every strategy is aligned by value
    Union,
}

/// CSV header names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Columns {
    pub strategy: String,
    pub category: String,
    pub workers: String,
    pub time: String,
    pub speedup: String,
    pub efficiency: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            strategy: "Modelo".to_owned(),
            category: "Máscara".to_owned(),
            workers: "Processos/Threads".to_owned(),
            time: "Tempo (s)".to_owned(),
            speedup: "Speedup".to_owned(),
            efficiency: "Eficiência".to_owned(),
        }
    }
}
