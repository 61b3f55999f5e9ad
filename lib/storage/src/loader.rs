//! CSV loading with type coercion

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use finlens_core::{columns, Cell, Dataset, Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];

/// Field values read as missing, matching the usual CSV tooling defaults
pub const DEFAULT_NA_VALUES: [&str; 19] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null", "",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: u8,
    /// Columns parsed as dates; unparseable values become missing
    #[serde(default = "default_date_columns")]
    pub date_columns: Vec<String>,
    /// Field values treated as missing before type inference
    #[serde(default = "default_na_values")]
    pub na_values: Vec<String>,
}

fn default_delimiter() -> u8 {
    b','
}

fn default_date_columns() -> Vec<String> {
    vec![columns::DATE.to_string()]
}

fn default_na_values() -> Vec<String> {
    DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect()
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            date_columns: default_date_columns(),
            na_values: default_na_values(),
        }
    }
}

/// Reads a headed CSV file into a [`Dataset`]
#[derive(Debug, Clone, Default)]
pub struct CsvLoader {
    options: LoadOptions,
}

impl CsvLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        let dataset = self.load_reader(BufReader::new(file))?;
        info!(
            "Loaded {} rows x {} columns from {:?}",
            dataset.len(),
            dataset.columns().len(),
            path
        );
        Ok(dataset)
    }

    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| Error::Parse(e.to_string()))?
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut raw: Vec<Vec<String>> = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| Error::Parse(e.to_string()))?;
            raw.push(
                record
                    .iter()
                    .map(|s| {
                        if self.is_na(s) {
                            String::new()
                        } else {
                            s.to_string()
                        }
                    })
                    .collect(),
            );
        }

        let mut cells: Vec<Vec<Cell>> = vec![Vec::with_capacity(headers.len()); raw.len()];
        for (col, name) in headers.iter().enumerate() {
            let values = raw.iter().map(|r| r.get(col).map(String::as_str).unwrap_or(""));

            let parsed: Vec<Cell> = if self.options.date_columns.iter().any(|c| c == name) {
                let mut coerced = 0usize;
                let parsed: Vec<Cell> = values
                    .map(|v| {
                        if v.is_empty() {
                            return Cell::Null;
                        }
                        match parse_date(v) {
                            Some(d) => Cell::Date(d),
                            None => {
                                coerced += 1;
                                Cell::Null
                            }
                        }
                    })
                    .collect();
                if coerced > 0 {
                    warn!("Column '{}': {} unparseable dates set to missing", name, coerced);
                }
                parsed
            } else if is_numeric_column(raw.iter().map(|r| r.get(col).map(String::as_str).unwrap_or(""))) {
                values
                    .map(|v| v.parse::<f64>().map(Cell::Number).unwrap_or(Cell::Null))
                    .collect()
            } else {
                values
                    .map(|v| {
                        if v.is_empty() {
                            Cell::Null
                        } else {
                            Cell::Text(v.to_string())
                        }
                    })
                    .collect()
            };

            for (row, cell) in cells.iter_mut().zip(parsed) {
                row.push(cell);
            }
        }

        debug!("Parsed {} records with columns {:?}", cells.len(), headers);
        Dataset::from_rows(headers, cells)
    }

    fn is_na(&self, value: &str) -> bool {
        self.options.na_values.iter().any(|na| na == value)
    }
}

/// A column is numeric when it has a value and every non-empty value parses as `f64`
fn is_numeric_column<'a, I: Iterator<Item = &'a str>>(values: I) -> bool {
    let mut seen = false;
    for v in values.filter(|v| !v.is_empty()) {
        if v.parse::<f64>().is_err() {
            return false;
        }
        seen = true;
    }
    seen
}

/// Parse a date or date-time in one of the accepted formats
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(value, format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Load a CSV file with default options
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    CsvLoader::default().load_path(path)
}
