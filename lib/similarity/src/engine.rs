//! Similarity engine
//!
//! Ranks entities by cosine similarity of their min-max scaled latest
//! features against a query entity.

use crate::config::{EngineConfig, FEATURE_DIM};
use crate::error::{RecommendationError, Result};
use crate::rating::RatingEncoder;
use crate::result::{FeatureContributions, Recommendation, SimilarityResult};
use crate::scaler::MinMaxScaler;
use crate::snapshot::{LatestSnapshot, SnapshotRow};
use finlens_core::{Dataset, Vector};
use tracing::debug;

/// Stateless recommender; every call recomputes from the dataset it is given
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine {
    config: EngineConfig,
}

impl SimilarityEngine {
    /// Create an engine, rejecting invalid configurations
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Entities whose latest observation has every required feature,
    /// in snapshot order. The first entry is a reasonable default query.
    pub fn eligible_entities(&self, dataset: &Dataset) -> Result<Vec<String>> {
        let snapshot = LatestSnapshot::build(dataset, &self.config.columns)?;
        Ok(snapshot.eligible().map(|r| r.entity.clone()).collect())
    }

    /// Top-k entities most similar to `query`, excluding `query` itself.
    ///
    /// `dataset` is only read; encoded and scaled features live in buffers
    /// owned by this call.
    pub fn recommend(&self, dataset: &Dataset, query: &str) -> Result<SimilarityResult> {
        if query.is_empty() {
            return Err(RecommendationError::EmptyQuery);
        }

        let snapshot = LatestSnapshot::build(dataset, &self.config.columns)?;
        let query_row = snapshot
            .get(query)
            .ok_or_else(|| RecommendationError::EntityNotFound(query.to_string()))?;
        if !query_row.is_complete() {
            return Err(RecommendationError::IncompleteFeatures(query.to_string()));
        }

        let encoder = RatingEncoder::from_dataset(
            dataset,
            &self.config.columns.credit_rating,
            &self.config.rating_scale,
        );

        let rows: Vec<&SnapshotRow> = snapshot.eligible().collect();
        let matrix: Vec<Vector> = rows
            .iter()
            .filter_map(|row| feature_vector(row, &encoder))
            .collect();
        let (_, scaled) = MinMaxScaler::fit_transform(&matrix);

        let query_pos = rows
            .iter()
            .position(|r| r.entity == query)
            .ok_or_else(|| RecommendationError::EntityNotFound(query.to_string()))?;
        let q = &scaled[query_pos];

        let mut ranked: Vec<Recommendation> = rows
            .iter()
            .zip(scaled.iter())
            .enumerate()
            .filter(|(i, _)| *i != query_pos)
            .filter_map(|(_, (row, m))| {
                Some(Recommendation {
                    entity: row.entity.clone(),
                    growth_rate: row.growth_rate?,
                    inflation_rate: row.inflation_rate?,
                    credit_rating: row.credit_rating.clone(),
                    score: q.cosine_similarity(m),
                    explain: contributions(q, m),
                })
            })
            .collect();
        let candidates_count = ranked.len();

        // stable: equal scores keep snapshot order
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(self.config.top_k);

        debug!(
            query,
            snapshot = snapshot.len(),
            candidates = candidates_count,
            results = ranked.len(),
            "computed recommendations"
        );

        Ok(SimilarityResult::new(query.to_string(), ranked, candidates_count))
    }
}

/// Raw `(growth, inflation, rating ordinal)` of a complete row
fn feature_vector(row: &SnapshotRow, encoder: &RatingEncoder) -> Option<Vector> {
    let features: [f64; FEATURE_DIM] = [
        row.growth_rate?,
        row.inflation_rate?,
        encoder.encode(row.credit_rating.as_deref()),
    ];
    Some(Vector::from_slice(&features))
}

/// Split `cos(q, m)` into per-feature terms `q_i * m_i / (|q| |m|)`
fn contributions(q: &Vector, m: &Vector) -> FeatureContributions {
    let denom = q.norm() * m.norm();
    if denom == 0.0 {
        return FeatureContributions::default();
    }
    let mut terms = [0.0; FEATURE_DIM];
    for (term, (a, b)) in terms.iter_mut().zip(q.as_slice().iter().zip(m.as_slice())) {
        *term = a * b / denom;
    }
    FeatureContributions::from_array(terms)
}

/// Recommend with the default configuration (dataset headers, top 5,
/// data-derived rating scale)
pub fn recommend(dataset: &Dataset, query: &str) -> Result<SimilarityResult> {
    SimilarityEngine::default().recommend(dataset, query)
}

/// Eligible entities under the default configuration
pub fn list_eligible_entities(dataset: &Dataset) -> Result<Vec<String>> {
    SimilarityEngine::default().eligible_entities(dataset)
}
