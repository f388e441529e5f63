use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use thiserror::Error;

use super::model::{Cell, Table};

/// Fatal input failure; aborts before anything is rendered.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("spreadsheet error in {path}: {source}")]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("sheet '{0}' not found")]
    MissingSheet(String),
    #[error("{0} contains no header row")]
    Empty(PathBuf),
    #[error("missing required column '{0}'")]
    MissingColumn(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the raw sheet from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first worksheet, or `sheet`
/// * `.csv` – a CSV export of the same sheet
///
/// The first row is the header.  No normalization happens here.
pub fn load_file(path: &Path, sheet: Option<&str>) -> Result<Table, LoadError> {
    if !path.exists() {
        return Err(LoadError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path, sheet)?,
        "csv" => load_csv(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

fn load_workbook(path: &Path, sheet: Option<&str>) -> Result<Table, LoadError> {
    let spreadsheet_err = |source| LoadError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };

    // The workbook handle is dropped at the end of this scope.
    let range = {
        let mut workbook = open_workbook_auto(path).map_err(spreadsheet_err)?;
        let name = match sheet {
            Some(name) => name.to_string(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| LoadError::Empty(path.to_path_buf()))?,
        };
        if !workbook.sheet_names().iter().any(|s| *s == name) {
            return Err(LoadError::MissingSheet(name));
        }
        workbook.worksheet_range(&name).map_err(spreadsheet_err)?
    };

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| LoadError::Empty(path.to_path_buf()))?
        .iter()
        .map(|c| c.to_string().trim().to_string())
        .collect();

    let body = rows
        .map(|row| row.iter().map(workbook_cell).collect())
        .collect();

    Ok(Table::new(headers, body))
}

fn workbook_cell(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Integer(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::String(s) if s.trim().is_empty() => Cell::Null,
        Data::String(s) => Cell::String(s.clone()),
        Data::Bool(b) => Cell::Bool(*b),
        Data::Empty | Data::Error(_) => Cell::Null,
        // dates and durations are not part of the schema; keep them as text
        other => Cell::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Table, LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    let mut body = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        body.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(Table::new(headers, body))
}

fn guess_cell_type(s: &str) -> Cell {
    let s = s.trim();
    if s.is_empty() {
        return Cell::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Cell::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Cell::Float(f);
    }
    if s == "true" || s == "false" {
        return Cell::Bool(s == "true");
    }
    Cell::String(s.to_string())
}
