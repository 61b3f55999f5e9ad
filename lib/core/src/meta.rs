use crate::columns;
use crate::dataset::{format_date, Dataset};
use serde::Serialize;

/// Distinct values offered by the filter controls
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistinctValues {
    pub countries: Vec<String>,
    pub credit_ratings: Vec<String>,
    pub dates: Vec<String>,
    pub currencies: Vec<String>,
    pub stock_indices: Vec<String>,
}

impl DistinctValues {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            countries: dataset.distinct_text(columns::COUNTRY),
            credit_ratings: dataset.distinct_text(columns::CREDIT_RATING),
            dates: dataset
                .distinct_dates(columns::DATE)
                .iter()
                .map(format_date)
                .collect(),
            currencies: dataset.distinct_text(columns::CURRENCY_CODE),
            stock_indices: dataset.distinct_text(columns::STOCK_INDEX),
        }
    }
}
