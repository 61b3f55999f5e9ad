use crate::filter::Filter;
use crate::{Error, Result};
use ahash::AHashMap;
use chrono::{NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// A single typed value in a dataset row
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
}

impl Cell {
    #[inline]
    pub fn is_null(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value, `None` for non-numbers and NaN
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Cell::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Categorical label for the cell.
    ///
    /// Text is returned as is; numbers and dates are rendered so that a
    /// column inferred as numeric can still act as a category.
    pub fn label(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) if n.is_nan() => None,
            Cell::Number(n) => Some(n.to_string()),
            Cell::Date(d) => Some(format_date(d)),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Cell::Null => Value::Null,
            Cell::Text(s) => Value::String(s.clone()),
            Cell::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Cell::Date(d) => Value::String(format_date(d)),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Render a date as `YYYY-MM-DD`, keeping the time only when it is not midnight
pub fn format_date(d: &NaiveDateTime) -> String {
    if d.time() == NaiveTime::MIN {
        d.format("%Y-%m-%d").to_string()
    } else {
        d.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// In-memory, row-major table with named columns
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    index: AHashMap<String, usize>,
    rows: Vec<Vec<Cell>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Result<Self> {
        let mut index = AHashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(Error::DuplicateColumn(name.clone()));
            }
        }
        Ok(Self {
            columns,
            index,
            rows: Vec::new(),
        })
    }

    /// Build a dataset from column names and rows, checking every row's width
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let mut dataset = Self::new(columns)?;
        dataset.rows.reserve(rows.len());
        for row in rows {
            dataset.push_row(row)?;
        }
        Ok(dataset)
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::RowWidth {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[inline]
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[inline]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|cells| Row {
            dataset: self,
            index,
            cells,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.rows.iter().enumerate().map(move |(index, cells)| Row {
            dataset: self,
            index,
            cells,
        })
    }

    /// Cell at (`row`, `column`), `None` if either is out of range
    pub fn value(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Copy of the rows accepted by `filter`; `self` is left untouched
    pub fn filter(&self, filter: &dyn Filter) -> Dataset {
        let rows = self
            .rows()
            .filter(|row| filter.matches(row))
            .map(|row| row.cells.to_vec())
            .collect();
        Dataset {
            columns: self.columns.clone(),
            index: self.index.clone(),
            rows,
        }
    }

    /// Copy of the first `n` rows
    pub fn head(&self, n: usize) -> Dataset {
        Dataset {
            columns: self.columns.clone(),
            index: self.index.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Sorted distinct labels of a column; empty when the column is absent
    pub fn distinct_text(&self, column: &str) -> Vec<String> {
        let Some(col) = self.column_index(column) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|r| r[col].label())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted distinct dates of a column; empty when the column is absent
    pub fn distinct_dates(&self, column: &str) -> Vec<NaiveDateTime> {
        let Some(col) = self.column_index(column) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|r| r[col].as_date())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Non-missing numeric values of a column, or `None` if the column is absent
    pub fn numeric(&self, column: &str) -> Option<Vec<f64>> {
        let col = self.column_index(column)?;
        Some(self.rows.iter().filter_map(|r| r[col].as_f64()).collect())
    }

    /// Rows as JSON objects keyed by column name
    pub fn to_records(&self, limit: usize) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .take(limit)
            .map(|cells| {
                self.columns
                    .iter()
                    .zip(cells.iter())
                    .map(|(name, cell)| (name.clone(), cell.to_json()))
                    .collect()
            })
            .collect()
    }
}

/// Borrowed view of one dataset row
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    dataset: &'a Dataset,
    index: usize,
    cells: &'a [Cell],
}

impl<'a> Row<'a> {
    /// Position of the row in its dataset
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn cells(&self) -> &'a [Cell] {
        self.cells
    }

    #[inline]
    pub fn get(&self, column: &str) -> Option<&'a Cell> {
        self.dataset
            .column_index(column)
            .and_then(|i| self.cells.get(i))
    }

    pub fn label(&self, column: &str) -> Option<String> {
        self.get(column).and_then(Cell::label)
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(Cell::as_f64)
    }

    pub fn date(&self, column: &str) -> Option<NaiveDateTime> {
        self.get(column).and_then(Cell::as_date)
    }
}
