// Categorical and date row filters shared by every dashboard view
use crate::columns;
use crate::dataset::{Dataset, Row};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub trait Filter {
    fn matches(&self, row: &Row<'_>) -> bool;
}

pub struct RowFilter {
    condition: FilterCondition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    In { field: String, values: Vec<String> },
    DateBetween { field: String, start: NaiveDateTime, end: NaiveDateTime },
    DateIn { field: String, dates: Vec<NaiveDateTime> },
    And(Vec<FilterCondition>),
}

impl RowFilter {
    pub fn new(condition: FilterCondition) -> Self {
        Self { condition }
    }

    pub fn condition(&self) -> &FilterCondition {
        &self.condition
    }

    fn matches_condition(condition: &FilterCondition, row: &Row<'_>) -> bool {
        match condition {
            FilterCondition::In { field, values } => row
                .label(field)
                .map(|v| values.iter().any(|candidate| *candidate == v))
                .unwrap_or(false),
            FilterCondition::DateBetween { field, start, end } => row
                .date(field)
                .map(|d| d >= *start && d <= *end)
                .unwrap_or(false),
            FilterCondition::DateIn { field, dates } => row
                .date(field)
                .map(|d| dates.contains(&d))
                .unwrap_or(false),
            FilterCondition::And(conditions) => {
                conditions.iter().all(|c| Self::matches_condition(c, row))
            }
        }
    }
}

impl Filter for RowFilter {
    fn matches(&self, row: &Row<'_>) -> bool {
        Self::matches_condition(&self.condition, row)
    }
}

/// Which dates to keep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateSelection {
    /// Inclusive range
    Range { start: NaiveDateTime, end: NaiveDateTime },
    /// Exact dates
    Set(Vec<NaiveDateTime>),
}

/// The filter controls common to the dashboard views.
///
/// An empty list disables that filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub credit_ratings: Vec<String>,
    #[serde(default)]
    pub dates: Option<DateSelection>,
    #[serde(default)]
    pub currencies: Vec<String>,
    #[serde(default)]
    pub stock_indices: Vec<String>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
            && self.credit_ratings.is_empty()
            && self.dates.is_none()
            && self.currencies.is_empty()
            && self.stock_indices.is_empty()
    }

    /// Combined condition, `None` when no filter is active
    pub fn to_condition(&self) -> Option<FilterCondition> {
        let mut conditions = Vec::new();
        let lists = [
            (columns::COUNTRY, &self.countries),
            (columns::CREDIT_RATING, &self.credit_ratings),
            (columns::CURRENCY_CODE, &self.currencies),
            (columns::STOCK_INDEX, &self.stock_indices),
        ];
        for (field, values) in lists {
            if !values.is_empty() {
                conditions.push(FilterCondition::In {
                    field: field.to_string(),
                    values: values.clone(),
                });
            }
        }

        match &self.dates {
            Some(DateSelection::Range { start, end }) => {
                conditions.push(FilterCondition::DateBetween {
                    field: columns::DATE.to_string(),
                    start: *start,
                    end: *end,
                });
            }
            Some(DateSelection::Set(dates)) if !dates.is_empty() => {
                conditions.push(FilterCondition::DateIn {
                    field: columns::DATE.to_string(),
                    dates: dates.clone(),
                });
            }
            _ => {}
        }

        match conditions.len() {
            0 => None,
            1 => conditions.pop(),
            _ => Some(FilterCondition::And(conditions)),
        }
    }

    /// Filtered copy of `dataset`
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        match self.to_condition() {
            Some(condition) => dataset.filter(&RowFilter::new(condition)),
            None => dataset.clone(),
        }
    }
}
