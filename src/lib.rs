//! # finlens
//!
//! Backend for a global finance dashboard.
//!
//! finlens loads a CSV of per-country macro observations, answers filter
//! and KPI queries over it, and recommends countries whose latest
//! economic profile is closest to a chosen one.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! finlens --data "Global finance data.csv" --http-port 5000
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use finlens::prelude::*;
//!
//! let dataset = load_csv("Global finance data.csv").unwrap();
//! let engine = SimilarityEngine::default();
//! let result = engine.recommend(&dataset, "Germany").unwrap();
//! for rec in result.iter() {
//!     println!("{} {:.4}", rec.entity, rec.score);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - [`finlens-core`](https://docs.rs/finlens-core) - Dataset model, filters, KPIs
//! - [`finlens-similarity`](https://docs.rs/finlens-similarity) - Country similarity recommender
//! - [`finlens-storage`](https://docs.rs/finlens-storage) - CSV loading and the reloadable dataset store
//! - [`finlens-api`](https://docs.rs/finlens-api) - REST API

// Re-export core types
pub use finlens_core::{
    columns, compute_kpis, Cell, Dataset, DateSelection, DistinctValues, Error, Filter,
    FilterCondition, FilterSet, Kpi, Result, Row, Vector,
};

// Re-export the recommender
pub use finlens_similarity::{
    list_eligible_entities, recommend, EngineConfig, RatingScale, Recommendation,
    RecommendationError, SimilarityEngine, SimilarityResult, SimilarityStats,
};

// Re-export storage
pub use finlens_storage::{load_csv, CsvLoader, DatasetStore, LoadOptions};

// Re-export API
pub use finlens_api::{AppState, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        compute_kpis, load_csv, recommend, Dataset, DatasetStore, EngineConfig, FilterSet,
        RatingScale, RecommendationError, RestApi, SimilarityEngine, SimilarityResult,
    };
}
