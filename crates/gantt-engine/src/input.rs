//! Raw record loading

use crate::error::GanttError;
use gantt_model::RawData;
use std::path::Path;

/// Decode `{ "iterations": [...], "requirements": [...] }`
///
/// # Errors
/// Returns [`GanttError::InvalidData`] when the JSON does not decode.
pub fn parse_raw_data(json: &str) -> Result<RawData, GanttError> {
    let data: RawData = serde_json::from_str(json)?;
    tracing::debug!(
        "Decoded {} iterations, {} requirements",
        data.iterations.len(),
        data.requirements.len()
    );
    Ok(data)
}

/// Read and decode a raw record file
///
/// # Errors
/// Returns [`GanttError::Io`] or [`GanttError::InvalidData`].
pub fn read_raw_data(path: impl AsRef<Path>) -> Result<RawData, GanttError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| GanttError::io_error(path, e))?;
    parse_raw_data(&text)
}
