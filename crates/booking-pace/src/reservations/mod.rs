pub mod domain;
mod parser;

use domain::ReservationLog;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
pub enum ReservationImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
}

impl std::fmt::Display for ReservationImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReservationImportError::Io(err) => {
                write!(f, "failed to read reservation export: {}", err)
            }
            ReservationImportError::Csv(err) => write!(f, "invalid reservation CSV data: {}", err),
            ReservationImportError::MissingColumn(column) => {
                write!(f, "reservation export is missing required column {}", column)
            }
        }
    }
}

impl std::error::Error for ReservationImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReservationImportError::Io(err) => Some(err),
            ReservationImportError::Csv(err) => Some(err),
            ReservationImportError::MissingColumn(_) => None,
        }
    }
}

impl From<std::io::Error> for ReservationImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ReservationImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads the raw reservation export and produces the cleaned, immutable
/// [`ReservationLog`]: date columns parsed, rows without a
/// `DATE_OF_RESERVATION` dropped. No other filtering happens here.
pub struct ReservationCsvImporter;

impl ReservationCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ReservationLog, ReservationImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ReservationLog, ReservationImportError> {
        let parsed = parser::parse_records(reader)?;
        if parsed.dropped_rows > 0 {
            debug!(
                dropped_rows = parsed.dropped_rows,
                "dropped rows without a reservation date"
            );
        }

        Ok(ReservationLog::new(parsed.transactions))
    }
}
