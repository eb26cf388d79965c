mod errors;
#[cfg(test)]
mod tests;

use crate::models::Frame;
use csv::WriterBuilder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

pub use errors::ExportError;

/// Writes the frame as CSV: a header row, then one line per row. Missing values are empty cells.
pub fn write_csv<W: Write>(frame: &Frame, writer: W) -> Result<(), ExportError> {
    let mut writer = WriterBuilder::new().from_writer(writer);

    writer.write_record(frame.columns())?;

    for row in frame.rows() {
        writer.write_record(row.iter().map(|value| value.to_string()))?;
    }

    writer.flush().map_err(csv::Error::from)?;

    Ok(())
}

/// Persists the cleaned frame to `path`, replacing any earlier cache.
pub fn write_cache(frame: &Frame, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)
        .map_err(|source| ExportError::Io { path: path.to_path_buf(), source })?;

    write_csv(frame, BufWriter::new(file))?;

    info!("Cached {} cleaned listings in [{}]", frame.len(), path.display());

    Ok(())
}
