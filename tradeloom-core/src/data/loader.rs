//! Statistics file loading.
//!
//! Reads the whole file, decodes it from its legacy encoding, and parses the
//! CSV body into a `Table`. Two failure kinds surface to callers: the file is
//! missing, or anything about its contents is wrong (`ParseError`).

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use thiserror::Error;
use tracing::{debug, warn};

use crate::data::table::{Table, TradeRecord};

/// Errors from loading a statistics file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Decoding and structural failures in a statistics file, plus lookups of
/// columns the dashboard expects but the file does not carry.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unknown text encoding '{0}'")]
    UnknownEncoding(String),

    #[error("file is not valid {encoding} text")]
    Undecodable { encoding: &'static str },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("year column '{0}' not found in header")]
    MissingYearColumn(String),

    #[error("column '{0}' not found in header")]
    MissingColumn(String),

    #[error("file has a header but no data rows")]
    NoRows,

    #[error("row {row}: year '{value}' is not a year in {}..={}", YEARS.start(), YEARS.end())]
    InvalidYear { row: usize, value: String },

    #[error("row {row}: column '{column}' holds non-numeric value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
}

/// Rejected metric cell.
#[derive(Debug, Error)]
pub enum CellError {
    #[error(transparent)]
    Number(#[from] std::num::ParseFloatError),

    #[error("value is not finite")]
    NotFinite,
}

/// Years a data row may carry.
pub const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Resolve an encoding label.
///
/// Accepts every WHATWG label plus the Windows code page names commonly used
/// for Korean files (`cp949`, `ms949`, `uhc`), which map to EUC-KR, the
/// WHATWG superset of code page 949.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, ParseError> {
    let normalized = label.trim().to_ascii_lowercase();
    let lookup = match normalized.as_str() {
        "cp949" | "ms949" | "uhc" | "x-windows-949" => "windows-949",
        other => other,
    };
    Encoding::for_label(lookup.as_bytes())
        .ok_or_else(|| ParseError::UnknownEncoding(label.to_string()))
}

/// Load a statistics file into a `Table`.
pub fn load_table(path: &Path, encoding_label: &str, year_column: &str) -> Result<Table, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let encoding = resolve_encoding(encoding_label)?;
    let text = decode(&bytes, encoding)?;
    let table = parse_table(&text, year_column)?;

    debug!(
        path = %path.display(),
        encoding = encoding.name(),
        rows = table.len(),
        columns = table.metric_columns().len(),
        "loaded trade table"
    );

    Ok(table)
}

/// Decode raw bytes. A leading byte-order mark wins over the configured
/// encoding; malformed input is an error rather than replacement characters.
pub fn decode<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Result<Cow<'a, str>, ParseError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((bom_encoding, bom_len)) => (bom_encoding, &bytes[bom_len..]),
        None => (encoding, bytes),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or(ParseError::Undecodable {
            encoding: encoding.name(),
        })
}

/// Parse decoded CSV text.
pub fn parse_table(text: &str, year_column: &str) -> Result<Table, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let year_idx = headers
        .iter()
        .position(|h| h == year_column)
        .ok_or_else(|| ParseError::MissingYearColumn(year_column.to_string()))?;

    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != year_idx)
        .map(|(_, h)| h.clone())
        .collect();

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        // Header is line 1.
        let line = i + 2;

        let year_raw = row.get(year_idx).unwrap_or_default();
        let year = parse_year(year_raw).ok_or_else(|| ParseError::InvalidYear {
            row: line,
            value: year_raw.to_string(),
        })?;

        let mut values = Vec::with_capacity(columns.len());
        for (col_idx, cell) in row.iter().enumerate() {
            if col_idx == year_idx {
                continue;
            }
            let value = parse_cell(cell).map_err(|_| ParseError::InvalidValue {
                row: line,
                column: headers[col_idx].clone(),
                value: cell.to_string(),
            })?;
            values.push(value);
        }

        records.push(TradeRecord::new(year, values));
    }

    if records.is_empty() {
        return Err(ParseError::NoRows);
    }

    check_year_order(&records);

    Ok(Table::new(year_column, columns, records))
}

fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    let year = match raw.parse::<i32>() {
        Ok(year) => year,
        // Spreadsheet exports sometimes write years as "2024.0".
        Err(_) => match raw.parse::<f64>() {
            Ok(v) if v.fract() == 0.0 && v.abs() < i32::MAX as f64 => v as i32,
            _ => return None,
        },
    };
    YEARS.contains(&year).then_some(year)
}

/// Parse one metric cell. Blank cells and the usual missing-value markers
/// become `None`; thousands separators are ignored. Infinities and
/// overflowing literals are errors.
pub fn parse_cell(raw: &str) -> Result<Option<f64>, CellError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    let value = cleaned.parse::<f64>()?;
    if value.is_nan() {
        Ok(None)
    } else if value.is_infinite() {
        Err(CellError::NotFinite)
    } else {
        Ok(Some(value))
    }
}

fn check_year_order(records: &[TradeRecord]) {
    for pair in records.windows(2) {
        let (prev, next) = (pair[0].year, pair[1].year);
        if next == prev {
            warn!(year = next, "duplicate year in trade table");
        } else if next < prev {
            warn!(prev, next, "years are not increasing in file order");
        }
    }
}
