use std::{
    collections::{BTreeMap, HashMap},
    fs::File,
    io::Read,
    path::Path,
};

use eyre::{Context, Result};
use tracing::{debug, info};

use crate::{
    config::Settings,
    error::IngestError,
    record::{Measurement, Record, read_records},
};

/// Measurements of one (strategy, category) pair, keyed by worker-count
pub type WorkerMap = BTreeMap<u32, Measurement>;

/// strategy -> category -> worker-count -> measurement
///
/// Every configured (strategy, category) pair is present, possibly empty. The table is
/// only filled by its constructors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementTable {
    data: HashMap<String, HashMap<String, WorkerMap>>,
}

impl MeasurementTable {
    pub fn new(settings: &Settings) -> Self {
        let data = settings
            .strategies
            .iter()
            .map(|strategy| {
                let categories = settings
                    .categories
                    .iter()
                    .map(|category| (category.clone(), WorkerMap::new()))
                    .collect();
                (strategy.name.clone(), categories)
            })
            .collect();
        Self { data }
    }

    pub fn from_records<I>(records: I, settings: &Settings) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let mut table = Self::new(settings);
        let mut retained = 0;
        let mut skipped = 0;
        for record in records {
            let Some(workers) = record.workers else {
                debug!(
                    "Skipping {}/{} row without worker-count",
                    record.strategy, record.category
                );
                skipped += 1;
                continue;
            };
            let Some(entry) = table
                .data
                .get_mut(&record.strategy)
                .and_then(|categories| categories.get_mut(&record.category))
            else {
                debug!(
                    "Skipping unknown strategy/category {}/{}",
                    record.strategy, record.category
                );
                skipped += 1;
                continue;
            };
            entry.insert(workers, record.measurement);
            retained += 1;
        }
        info!("Retained {retained} rows, skipped {skipped}");
        table
    }

    pub fn from_reader<R: Read>(reader: R, settings: &Settings) -> Result<Self, IngestError> {
        let records = read_records(reader, settings)?;
        Ok(Self::from_records(records, settings))
    }

    pub fn from_path(path: &Path, settings: &Settings) -> Result<Self> {
        let file = File::open(path).context(format!("Open measurements {path:?}"))?;
        Self::from_reader(file, settings).context(format!("Read measurements {path:?}"))
    }

    pub fn get(&self, strategy: &str, category: &str) -> Option<&WorkerMap> {
        self.data.get(strategy)?.get(category)
    }

    /// Total number of stored measurements
    pub fn len(&self) -> usize {
        self.data
            .values()
            .flat_map(|categories| categories.values())
            .map(|workers| workers.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
