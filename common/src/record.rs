use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use tracing::trace;

use crate::{
    config::{Columns, Settings},
    error::IngestError,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    pub time: f64,
    pub speedup: f64,
    pub efficiency: f64,
}

/// One CSV row
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub strategy: String,
    pub category: String,
    /// `None` for the unavailable marker or any non-integer text
    pub workers: Option<u32>,
    pub measurement: Measurement,
}

/// Positions of the configured columns in the header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    strategy: usize,
    category: usize,
    workers: usize,
    time: usize,
    speedup: usize,
    efficiency: usize,
}

impl ColumnIndex {
    fn locate(headers: &StringRecord, columns: &Columns) -> Result<Self, IngestError> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| IngestError::MissingColumn(name.to_owned()))
        };
        Ok(Self {
            strategy: position(&columns.strategy)?,
            category: position(&columns.category)?,
            workers: position(&columns.workers)?,
            time: position(&columns.time)?,
            speedup: position(&columns.speedup)?,
            efficiency: position(&columns.efficiency)?,
        })
    }
}

/// Reads every row of a header-led CSV.
///
/// Numeric fields are parsed for all rows, known or not, and a malformed or missing one
/// fails the whole read. Fields past the header width are ignored. Filtering by strategy
/// and category is left to [`crate::table::MeasurementTable`].
pub fn read_records<R: Read>(reader: R, settings: &Settings) -> Result<Vec<Record>, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let index = ColumnIndex::locate(reader.headers()?, &settings.columns)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let columns = &settings.columns;

        let measurement = Measurement {
            time: parse_number(&row, index.time, &columns.time, line)?,
            speedup: parse_number(&row, index.speedup, &columns.speedup, line)?,
            efficiency: parse_number(&row, index.efficiency, &columns.efficiency, line)?,
        };

        let workers_field = field(&row, index.workers);
        let workers = if workers_field == settings.unavailable {
            None
        } else {
            workers_field.trim().parse::<u32>().ok()
        };
        if workers.is_none() {
            trace!("line={line} no worker-count in {workers_field:?}");
        }

        records.push(Record {
            strategy: field(&row, index.strategy).to_owned(),
            category: field(&row, index.category).to_owned(),
            workers,
            measurement,
        });
    }
    Ok(records)
}

fn field(row: &StringRecord, index: usize) -> &str {
    row.get(index).unwrap_or_default()
}

fn parse_number(
    row: &StringRecord,
    index: usize,
    column: &str,
    line: u64,
) -> Result<f64, IngestError> {
    let value = field(row, index);
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| IngestError::InvalidNumber {
            column: column.to_owned(),
            value: value.to_owned(),
            line,
        })
}
