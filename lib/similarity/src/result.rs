//! Recommendation results
//!
//! Output structures returned by the engine, including a per-feature
//! breakdown of each cosine score.

use crate::config::FEATURE_NAMES;
use serde::Serialize;

/// Share of the cosine score contributed by each feature.
///
/// The three terms sum to the score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FeatureContributions {
    pub growth_rate: f64,
    pub inflation_rate: f64,
    pub credit_rating: f64,
}

impl FeatureContributions {
    pub fn from_array(values: [f64; 3]) -> Self {
        Self {
            growth_rate: values[0],
            inflation_rate: values[1],
            credit_rating: values[2],
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.growth_rate, self.inflation_rate, self.credit_rating]
    }

    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Name of the feature with the largest contribution, `None` if all are zero
    pub fn top_feature(&self) -> Option<&'static str> {
        FEATURE_NAMES
            .iter()
            .zip(self.as_array())
            .filter(|(_, v)| *v > 0.0)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(name, _)| *name)
    }
}

/// A recommended entity with the raw values of its latest observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub entity: String,
    pub growth_rate: f64,
    pub inflation_rate: f64,
    pub credit_rating: Option<String>,
    pub score: f64,
    pub explain: FeatureContributions,
}

/// Ranked neighbours of a query entity, best first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityResult {
    pub query: String,
    pub result: Vec<Recommendation>,
    pub stats: SimilarityStats,
}

impl SimilarityResult {
    pub fn new(query: String, result: Vec<Recommendation>, candidates_count: usize) -> Self {
        let stats = SimilarityStats::compute(&result, candidates_count);
        Self {
            query,
            result,
            stats,
        }
    }

    pub fn len(&self) -> usize {
        self.result.len()
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    pub fn entities(&self) -> Vec<&str> {
        self.result.iter().map(|r| r.entity.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recommendation> {
        self.result.iter()
    }
}

/// Summary statistics for a recommendation query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityStats {
    /// Number of entities ranked (query excluded)
    pub candidates_count: usize,
    /// Number of results returned
    pub results_count: usize,
    /// Average score of results
    pub avg_score: f64,
    /// Score of best result
    pub best_score: f64,
    /// Feature that contributed most to the best result
    pub top_contributing_feature: Option<String>,
}

impl SimilarityStats {
    /// Compute stats from ranked results
    pub fn compute(results: &[Recommendation], candidates_count: usize) -> Self {
        let Some(best) = results.first() else {
            return Self {
                candidates_count,
                results_count: 0,
                avg_score: 0.0,
                best_score: 0.0,
                top_contributing_feature: None,
            };
        };

        let avg_score = results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64;

        Self {
            candidates_count,
            results_count: results.len(),
            avg_score,
            best_score: best.score,
            top_contributing_feature: best.explain.top_feature().map(str::to_string),
        }
    }
}
