use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::DataSettings;
use crate::models::{RawTable, RawTables};

/// Errors that can occur while reading the reference dataset files
///
/// All of these are fatal at startup: the service refuses to run with an
/// incomplete dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("dataset file is empty: {0}")]
    Empty(PathBuf),
}

/// Read the four reference tables from the configured data directory.
///
/// Invoked once at process startup, before the HTTP server is bound.
pub fn load_raw_tables(settings: &DataSettings) -> Result<RawTables, DatasetError> {
    let dir = Path::new(&settings.dir);

    Ok(RawTables {
        states: read_table(&dir.join(&settings.states_file), "states")?,
        cities: read_table(&dir.join(&settings.cities_file), "cities")?,
        budget_duration: read_table(
            &dir.join(&settings.budget_duration_file),
            "budget_duration",
        )?,
        city_types: read_table(&dir.join(&settings.city_types_file), "city_types")?,
    })
}

/// Read a single CSV file into a raw table
pub fn read_table(path: &Path, name: &str) -> Result<RawTable, DatasetError> {
    tracing::debug!("Reading dataset file: {}", path.display());

    let file = File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => DatasetError::NotFound(path.to_path_buf()),
        _ => DatasetError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let table = parse_table(file, name).map_err(|source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    table.ok_or_else(|| DatasetError::Empty(path.to_path_buf()))
}

/// Parse CSV content into a raw table. Returns `None` for a file with no
/// header row at all; a header-only file is handed to the loader, which
/// treats a table without data rows as fatal.
fn parse_table<R: Read>(reader: R, name: &str) -> Result<Option<RawTable>, csv::Error> {
    // Ragged rows are tolerated here; the loader drops rows whose cells
    // fail to parse rather than failing the whole file.
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Ok(None);
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Some(RawTable::new(name, headers, rows)))
}
