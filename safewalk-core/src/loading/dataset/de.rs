use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::warn;

use crate::Error;

pub fn open_dataset_file(path: &Path) -> Result<File, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    Ok(file)
}

/// Deserializes every well-formed record, skipping malformed ones
pub(super) fn deserialize_records<T, R>(reader: R, source: &str) -> Result<Vec<T>, Error>
where
    T: for<'de> serde::Deserialize<'de>,
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    // A missing header row is a broken file, not a broken record
    reader.headers()?;

    let mut skipped = 0usize;
    let records = reader
        .deserialize()
        .filter_map(|record| match record {
            Ok(record) => Some(record),
            Err(e) => {
                log::trace!("Skipping malformed record in {source}: {e}");
                skipped += 1;
                None
            }
        })
        .collect::<Vec<T>>();

    if skipped > 0 {
        warn!("Skipped {skipped} malformed records in {source}");
    }
    Ok(records)
}

/// Parses a boolean column; empty means `default`
pub(super) fn parse_flag(value: &str, default: bool) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "" => Some(default),
        "true" | "1" | "yes" | "y" | "t" => Some(true),
        "false" | "0" | "no" | "n" | "f" => Some(false),
        _ => None,
    }
}

/// Parses a finite float column; empty means `default` when one is given
pub(super) fn parse_number(value: &str, default: Option<f64>) -> Option<f64> {
    if value.is_empty() {
        return default;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}
