use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Missing column {0:?} in CSV header")]
    MissingColumn(String),
    #[error("Invalid {column} value {value:?} on line {line}")]
    InvalidNumber {
        column: String,
        value: String,
        line: u64,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
