//! CSV result file writer

use crate::errors::ExportError;
use csv::{QuoteStyle, WriterBuilder};
use hivebench_core::{Record, Recorder};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// How the result file is created
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Create missing parent directories of the destination
    pub create_dirs: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { create_dirs: true }
    }
}

/// Write one snapshot of `recorder` to `path`, replacing any existing file.
///
/// Returns the number of records written.
pub fn export(
    recorder: &Recorder,
    path: impl AsRef<Path>,
    options: ExportOptions,
) -> Result<usize, ExportError> {
    let path = path.as_ref();
    let records = recorder.snapshot();

    if options.create_dirs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ExportError::Filesystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source,
            })?;
        }
    }

    let file = File::create(path).map_err(|source| ExportError::Filesystem {
        path: path.to_path_buf(),
        operation: "create",
        source,
    })?;
    let written = write_records(BufWriter::new(file), &records)?;

    info!("Wrote {} records to {}", written, path.display());
    Ok(written)
}

/// Write records as headerless CSV lines in the given order.
///
/// Payloads are written verbatim unless they contain a comma, a double quote
/// or a line break. Those are quoted CSV-style, so such a line no longer reads
/// as the literal `start,target,unit,duration,payload` text.
pub fn write_records<W: Write>(writer: W, records: &[Record]) -> Result<usize, ExportError> {
    let mut csv = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);

    for record in records {
        csv.write_record([
            format!("{:.6}", record.started_at_secs()),
            record.target_id.to_string(),
            record.unit_id.to_string(),
            format!("{:.6}", record.duration_secs()),
            record.payload.clone(),
        ])?;
    }
    csv.flush()?;

    debug!("Flushed {} CSV lines", records.len());
    Ok(records.len())
}
