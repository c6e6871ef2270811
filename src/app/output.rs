//! Record file output.

use std::path::Path;

use log::info;

use crate::config::OutputFormat;
use crate::error_handling::FileError;
use crate::models::ResolvedRecord;
use crate::report::format_record;

/// Renders records in the requested file format, one record per line.
///
/// # Errors
///
/// Returns [`FileError::Serialize`] if a record cannot be encoded as JSON.
pub fn render_records(records: &[ResolvedRecord], format: OutputFormat) -> Result<String, FileError> {
    let mut out = String::new();
    for record in records {
        let line = match format {
            OutputFormat::Text => format_record(record),
            OutputFormat::Jsonl => serde_json::to_string(record)?,
        };
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Writes records to `path`, replacing any existing content.
///
/// # Errors
///
/// Returns [`FileError::Write`] if the file cannot be written.
pub async fn write_records(
    path: &Path,
    records: &[ResolvedRecord],
    format: OutputFormat,
) -> Result<(), FileError> {
    let contents = render_records(records, format)?;
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| FileError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    info!("Wrote {} record(s) to {}", records.len(), path.display());
    Ok(())
}
