//! Latest observation per entity

use crate::config::ColumnNames;
use crate::error::{RecommendationError, Result};
use ahash::AHashMap;
use chrono::NaiveDateTime;
use finlens_core::Dataset;

/// The most recent observation of one entity
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRow {
    pub entity: String,
    pub timestamp: Option<NaiveDateTime>,
    pub growth_rate: Option<f64>,
    pub inflation_rate: Option<f64>,
    pub credit_rating: Option<String>,
    /// Index of the source row in the input dataset
    pub source_row: usize,
}

impl SnapshotRow {
    /// Growth and inflation are both present
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.growth_rate.is_some() && self.inflation_rate.is_some()
    }
}

/// One row per distinct entity.
///
/// Rows are ordered by their timestamp, then by input position, so entities
/// whose latest observation is older come first. Undated rows sort last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatestSnapshot {
    rows: Vec<SnapshotRow>,
}

impl LatestSnapshot {
    /// Reduce `dataset` to its latest row per entity.
    ///
    /// The row with the greatest timestamp wins; on equal timestamps the
    /// later input row wins. A missing timestamp loses to any date.
    /// Rows without an entity are skipped.
    pub fn build(dataset: &Dataset, columns: &ColumnNames) -> Result<Self> {
        let missing: Vec<String> = columns
            .required()
            .iter()
            .filter(|name| !dataset.has_column(name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(RecommendationError::MissingRequiredColumns(missing));
        }

        // entity -> (timestamp, row index) of the best row so far
        let mut latest: AHashMap<String, (Option<NaiveDateTime>, usize)> = AHashMap::new();
        for row in dataset.rows() {
            let Some(entity) = row.label(&columns.entity) else {
                continue;
            };
            let timestamp = row.date(&columns.timestamp);
            latest
                .entry(entity)
                .and_modify(|best| {
                    if timestamp >= best.0 {
                        *best = (timestamp, row.index());
                    }
                })
                .or_insert((timestamp, row.index()));
        }

        let has_rating = dataset.has_column(&columns.credit_rating);
        let mut rows: Vec<SnapshotRow> = latest
            .into_iter()
            .filter_map(|(entity, (timestamp, index))| {
                let row = dataset.row(index)?;
                Some(SnapshotRow {
                    entity,
                    timestamp,
                    growth_rate: row.number(&columns.growth_rate),
                    inflation_rate: row.number(&columns.inflation_rate),
                    credit_rating: if has_rating {
                        row.label(&columns.credit_rating)
                    } else {
                        None
                    },
                    source_row: index,
                })
            })
            .collect();

        rows.sort_by_key(|r| (r.timestamp.is_none(), r.timestamp, r.source_row));

        Ok(Self { rows })
    }

    #[inline]
    pub fn rows(&self) -> &[SnapshotRow] {
        &self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, entity: &str) -> Option<&SnapshotRow> {
        self.rows.iter().find(|r| r.entity == entity)
    }

    /// Rows with a complete feature set, in snapshot order
    pub fn eligible(&self) -> impl Iterator<Item = &SnapshotRow> + '_ {
        self.rows.iter().filter(|r| r.is_complete())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use finlens_core::{columns, Cell};

    fn date(y: i32, m: u32, d: u32) -> Cell {
        Cell::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap())
    }

    fn headers() -> Vec<String> {
        vec![
            columns::COUNTRY.into(),
            columns::DATE.into(),
            columns::GDP_GROWTH.into(),
            columns::INFLATION.into(),
            columns::CREDIT_RATING.into(),
        ]
    }

    fn obs(country: &str, d: Cell, growth: f64, inflation: f64, rating: &str) -> Vec<Cell> {
        vec![
            Cell::Text(country.into()),
            d,
            Cell::Number(growth),
            Cell::Number(inflation),
            Cell::Text(rating.into()),
        ]
    }

    #[test]
    fn test_latest_row_selected() {
        let ds = Dataset::from_rows(
            headers(),
            vec![
                obs("X", date(2021, 6, 1), 2.0, 1.0, "AA"),
                obs("X", date(2020, 1, 1), 9.0, 9.0, "B"),
                obs("Y", date(2020, 1, 1), 1.0, 1.0, "A"),
            ],
        )
        .unwrap();

        let snapshot = LatestSnapshot::build(&ds, &ColumnNames::default()).unwrap();
        assert_eq!(snapshot.len(), 2);
        let x = snapshot.get("X").unwrap();
        assert_eq!(x.growth_rate, Some(2.0));
        assert_eq!(x.credit_rating.as_deref(), Some("AA"));
        assert_eq!(x.source_row, 0);
        // older latest observation first
        assert_eq!(snapshot.rows()[0].entity, "Y");
        assert_eq!(snapshot.rows()[1].entity, "X");
    }

    #[test]
    fn test_timestamp_tie_last_row_wins() {
        let ds = Dataset::from_rows(
            headers(),
            vec![
                obs("X", date(2021, 1, 1), 1.0, 1.0, "A"),
                obs("X", date(2021, 1, 1), 5.0, 5.0, "B"),
            ],
        )
        .unwrap();
        let snapshot = LatestSnapshot::build(&ds, &ColumnNames::default()).unwrap();
        assert_eq!(snapshot.get("X").unwrap().growth_rate, Some(5.0));
    }

    #[test]
    fn test_missing_timestamp_loses() {
        let ds = Dataset::from_rows(
            headers(),
            vec![
                obs("X", date(2019, 1, 1), 1.0, 1.0, "A"),
                obs("X", Cell::Null, 5.0, 5.0, "B"),
            ],
        )
        .unwrap();
        let snapshot = LatestSnapshot::build(&ds, &ColumnNames::default()).unwrap();
        assert_eq!(snapshot.get("X").unwrap().growth_rate, Some(1.0));
    }

    #[test]
    fn test_missing_required_columns() {
        let ds = Dataset::from_rows(
            vec![columns::COUNTRY.into(), columns::GDP_GROWTH.into()],
            vec![],
        )
        .unwrap();
        let err = LatestSnapshot::build(&ds, &ColumnNames::default()).unwrap_err();
        assert_eq!(
            err,
            RecommendationError::MissingRequiredColumns(vec![
                columns::DATE.to_string(),
                columns::INFLATION.to_string(),
            ])
        );
    }

    #[test]
    fn test_incomplete_rows_not_eligible() {
        let ds = Dataset::from_rows(
            headers(),
            vec![
                obs("X", date(2021, 1, 1), 1.0, 1.0, "A"),
                vec![
                    Cell::Text("Y".into()),
                    date(2021, 1, 1),
                    Cell::Null,
                    Cell::Number(2.0),
                    Cell::Null,
                ],
                vec![Cell::Null, date(2021, 1, 1), Cell::Number(1.0), Cell::Number(1.0), Cell::Null],
            ],
        )
        .unwrap();
        let snapshot = LatestSnapshot::build(&ds, &ColumnNames::default()).unwrap();
        assert_eq!(snapshot.len(), 2);
        let eligible: Vec<&str> = snapshot.eligible().map(|r| r.entity.as_str()).collect();
        assert_eq!(eligible, vec!["X"]);
    }
}
