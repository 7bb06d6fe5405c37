//! Header-keyed row items loaded from CSV using the csv crate
//!
//! The first record is the header. Every following record becomes a [`Row`]
//! whose fields are looked up by header name.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Error type for CSV loading
#[derive(Debug, Error)]
pub enum RowsError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error at line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("CSV parse error: {0}")]
    Other(String),

    #[error("CSV input has no header record")]
    MissingHeader,
}

/// One data row
///
/// `line` is the 1-based record position in the source, so rows with equal
/// fields stay distinct items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    line: u64,
    fields: BTreeMap<String, String>,
}

impl Row {
    pub fn new(line: u64, fields: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            line,
            fields: fields.into_iter().collect(),
        }
    }

    pub fn line(&self) -> u64 {
        self.line
    }

    /// Field value, or an empty string for a header the row does not have
    pub fn get(&self, header: &str) -> &str {
        self.fields.get(header).map(String::as_str).unwrap_or("")
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Surface representation of this row under `key`
    pub fn to_item(&self, key: &str) -> Value {
        let mut item = serde_json::Map::new();
        item.insert("key".to_string(), Value::String(key.to_string()));
        for (header, value) in &self.fields {
            item.insert(header.clone(), Value::String(value.clone()));
        }
        Value::Object(item)
    }
}

/// Parse CSV content into rows
///
/// Ragged records are allowed; missing trailing fields read as empty.
pub fn parse_rows(reader: impl Read) -> Result<Vec<Row>, RowsError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_error)?.clone();
    if headers.is_empty() {
        return Err(RowsError::MissingHeader);
    }

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(csv_error)?;
        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()));
        rows.push(Row::new(index as u64 + 1, fields));
    }

    tracing::debug!(rows = rows.len(), columns = headers.len(), "parsed CSV rows");
    Ok(rows)
}

pub fn load_rows(path: &Path) -> Result<Vec<Row>, RowsError> {
    let file = std::fs::File::open(path).map_err(|source| RowsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_rows(file)
}

fn csv_error(e: csv::Error) -> RowsError {
    match e.position() {
        Some(position) => RowsError::Parse {
            line: position.line(),
            message: e.to_string(),
        },
        None => RowsError::Other(e.to_string()),
    }
}
