//! Loading measurement records written by the prober.

use crate::errors::CleanIpError;
use crate::measurement::Measurement;
use log::debug;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Parse a JSON array of measurement records.
pub fn parse_measurements(
    text: &str,
) -> Result<Vec<Measurement>, CleanIpError> {
    serde_json::from_str(text).map_err(|e| {
        CleanIpError::input(format!("invalid measurement data: {}", e))
            .with_source(e)
    })
}

/// Read measurement records from `path`, or from stdin when `path` is `-`.
pub fn load_measurements(
    path: &Path,
) -> Result<Vec<Measurement>, CleanIpError> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).map_err(|e| {
            CleanIpError::input(format!("failed to read stdin: {}", e))
                .with_source(e)
        })?;
        text
    } else {
        fs::read_to_string(path).map_err(|e| {
            CleanIpError::input(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))
            .with_source(e)
        })?
    };

    let records = parse_measurements(&text)?;
    debug!("Loaded {} measurement records", records.len());

    Ok(records)
}
