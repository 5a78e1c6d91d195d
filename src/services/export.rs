//! CSV export of the current table view
//!
//! Fields are written unquoted, so an embedded comma splits a field.
//! Ids and states in the dataset contain none.

use crate::model::customer::{Column, CustomerRow};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const EXPORT_FILE_NAME: &str = "high-value-customers.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize rows: {0}")]
    Csv(#[from] csv::Error),
}

/// Serialize rows (already filtered and sorted) as CSV into `writer`
pub fn write_csv<W: Write>(rows: &[CustomerRow], writer: W) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(Column::all().iter().map(|c| c.title()))?;
    for row in rows {
        wtr.write_record([
            row.id.clone(),
            row.income.to_string(),
            row.state.clone(),
            row.rate.to_string(),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the export file into `dir`, returning its path
pub fn export_to_dir(rows: &[CustomerRow], dir: &Path) -> Result<PathBuf, ExportError> {
    let path = dir.join(EXPORT_FILE_NAME);
    let file = File::create(&path).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    write_csv(rows, file)?;
    Ok(path)
}
