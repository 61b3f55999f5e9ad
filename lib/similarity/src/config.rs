//! Engine configuration
//!
//! Which dataset columns feed the feature vector, how many neighbours to
//! return and how credit ratings are turned into ordinals.

use crate::error::{RecommendationError, Result};
use finlens_core::columns;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of features in every vector
pub const FEATURE_DIM: usize = 3;

/// Feature names in vector order
pub const FEATURE_NAMES: [&str; FEATURE_DIM] = ["growth_rate", "inflation_rate", "credit_rating"];

pub const DEFAULT_TOP_K: usize = 5;

/// Dataset column names the engine reads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnNames {
    pub entity: String,
    pub timestamp: String,
    pub growth_rate: String,
    pub inflation_rate: String,
    pub credit_rating: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            entity: columns::COUNTRY.to_string(),
            timestamp: columns::DATE.to_string(),
            growth_rate: columns::GDP_GROWTH.to_string(),
            inflation_rate: columns::INFLATION.to_string(),
            credit_rating: columns::CREDIT_RATING.to_string(),
        }
    }
}

impl ColumnNames {
    /// Columns that must exist for a recommendation
    pub fn required(&self) -> [&str; 4] {
        [
            self.entity.as_str(),
            self.timestamp.as_str(),
            self.growth_rate.as_str(),
            self.inflation_rate.as_str(),
        ]
    }
}

/// How credit ratings map to ordinals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RatingScale {
    /// Distinct ratings in the dataset, sorted descending lexicographically,
    /// ranked `0..n`. The meaning of an ordinal depends on the data.
    #[default]
    Derived,
    /// Canonical order; the first entry gets ordinal 0.
    /// Ratings not listed are treated as missing.
    Fixed(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    #[serde(default)]
    pub columns: ColumnNames,

    /// Maximum number of recommendations
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    #[serde(default)]
    pub rating_scale: RatingScale,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            top_k: DEFAULT_TOP_K,
            rating_scale: RatingScale::Derived,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(RecommendationError::InvalidConfig(
                "top_k must be at least 1".to_string(),
            ));
        }

        let c = &self.columns;
        for name in [
            &c.entity,
            &c.timestamp,
            &c.growth_rate,
            &c.inflation_rate,
            &c.credit_rating,
        ] {
            if name.is_empty() {
                return Err(RecommendationError::InvalidConfig(
                    "column names cannot be empty".to_string(),
                ));
            }
        }

        if let RatingScale::Fixed(order) = &self.rating_scale {
            if order.is_empty() {
                return Err(RecommendationError::InvalidConfig(
                    "fixed rating scale cannot be empty".to_string(),
                ));
            }
            let mut seen = HashSet::new();
            for rating in order {
                if !seen.insert(rating.as_str()) {
                    return Err(RecommendationError::InvalidConfig(format!(
                        "rating '{}' listed twice in fixed scale",
                        rating
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dataset_headers() {
        let config = EngineConfig::default();
        assert_eq!(config.columns.entity, "Country");
        assert_eq!(config.columns.timestamp, "Date");
        assert_eq!(config.top_k, 5);
        assert_eq!(config.rating_scale, RatingScale::Derived);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let config = EngineConfig {
            top_k: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RecommendationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_fixed_scale_duplicates_rejected() {
        let config = EngineConfig {
            rating_scale: RatingScale::Fixed(vec!["AAA".into(), "AA".into(), "AAA".into()]),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(
            r#"{"top_k": 3, "columns": {"entity": "Name"}, "rating_scale": {"fixed": ["AAA", "AA"]}}"#,
        )
        .unwrap();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.columns.entity, "Name");
        assert_eq!(config.columns.timestamp, "Date");
        assert_eq!(
            config.rating_scale,
            RatingScale::Fixed(vec!["AAA".into(), "AA".into()])
        );
    }
}
