//! # finlens Similarity
//!
//! Country similarity recommender.
//!
//! Given a dataset of time-stamped observations per country, the engine
//! keeps each country's latest observation, builds the feature vector
//! `(growth rate, inflation rate, credit rating ordinal)`, min-max scales
//! every feature and ranks the other countries by cosine similarity to the
//! query country.
//!
//! ## Example
//!
//! ```rust
//! use finlens_core::{columns, Cell, Dataset};
//! use finlens_similarity::recommend;
//! use chrono::NaiveDate;
//!
//! let date = Cell::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap());
//! let row = |country: &str, growth: f64, inflation: f64, rating: &str| {
//!     vec![
//!         Cell::Text(country.to_string()),
//!         date.clone(),
//!         Cell::Number(growth),
//!         Cell::Number(inflation),
//!         Cell::Text(rating.to_string()),
//!     ]
//! };
//!
//! let dataset = Dataset::from_rows(
//!     vec![
//!         columns::COUNTRY.to_string(),
//!         columns::DATE.to_string(),
//!         columns::GDP_GROWTH.to_string(),
//!         columns::INFLATION.to_string(),
//!         columns::CREDIT_RATING.to_string(),
//!     ],
//!     vec![
//!         row("A", 2.0, 3.0, "AAA"),
//!         row("B", 2.1, 3.1, "AAA"),
//!         row("C", -5.0, 20.0, "D"),
//!     ],
//! )
//! .unwrap();
//!
//! let result = recommend(&dataset, "A").unwrap();
//! assert_eq!(result.entities(), vec!["B", "C"]);
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Dataset   │────>│  Snapshot   │────>│   Scaler    │
//! │ (all rows)  │     │ (latest/id) │     │  (min-max)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!       │                                        │
//!       │              ┌─────────────┐           │
//!       └─────────────>│   Rating    │           │
//!                      │  (ordinal)  │           │
//!                      └─────────────┘           │
//!                                         ┌─────────────┐
//!                                         │   Cosine    │
//!                                         │  (top-k)    │
//!                                         └─────────────┘
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod rating;
pub mod result;
pub mod scaler;
pub mod snapshot;

// Re-export main types for convenience
pub use config::{ColumnNames, EngineConfig, RatingScale, DEFAULT_TOP_K, FEATURE_DIM, FEATURE_NAMES};
pub use engine::{list_eligible_entities, recommend, SimilarityEngine};
pub use error::{RecommendationError, Result};
pub use rating::RatingEncoder;
pub use result::{FeatureContributions, Recommendation, SimilarityResult, SimilarityStats};
pub use scaler::MinMaxScaler;
pub use snapshot::{LatestSnapshot, SnapshotRow};
