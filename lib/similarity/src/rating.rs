//! Credit rating ordinal encoding

use crate::config::RatingScale;
use ahash::AHashMap;
use finlens_core::Dataset;
use std::collections::BTreeSet;

/// Maps rating labels to ordinals.
///
/// Unknown and missing ratings encode as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingEncoder {
    ranks: AHashMap<String, usize>,
}

impl RatingEncoder {
    /// Rank distinct ratings in descending lexicographic order
    pub fn derived<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let distinct: BTreeSet<String> = ratings.into_iter().collect();
        let ranks = distinct
            .into_iter()
            .rev()
            .enumerate()
            .map(|(rank, rating)| (rating, rank))
            .collect();
        Self { ranks }
    }

    /// Rank ratings by their position in `order`
    pub fn fixed(order: &[String]) -> Self {
        let mut ranks = AHashMap::with_capacity(order.len());
        for (rank, rating) in order.iter().enumerate() {
            ranks.entry(rating.clone()).or_insert(rank);
        }
        Self { ranks }
    }

    /// Build the encoder over every row of `dataset`, not only the latest ones.
    /// An absent column yields an empty encoder.
    pub fn from_dataset(dataset: &Dataset, column: &str, scale: &RatingScale) -> Self {
        match scale {
            RatingScale::Fixed(order) => Self::fixed(order),
            RatingScale::Derived => {
                if !dataset.has_column(column) {
                    return Self::default();
                }
                Self::derived(dataset.rows().filter_map(|row| row.label(column)))
            }
        }
    }

    #[inline]
    pub fn rank(&self, rating: &str) -> Option<usize> {
        self.ranks.get(rating).copied()
    }

    #[inline]
    pub fn encode(&self, rating: Option<&str>) -> f64 {
        rating.and_then(|r| self.rank(r)).unwrap_or(0) as f64
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finlens_core::Cell;

    #[test]
    fn test_derived_descending_lexicographic() {
        let encoder = RatingEncoder::derived(
            ["AAA", "A", "BBB", "D", "AA", "AAA"].iter().map(|s| s.to_string()),
        );
        assert_eq!(encoder.len(), 5);
        assert_eq!(encoder.rank("D"), Some(0));
        assert_eq!(encoder.rank("BBB"), Some(1));
        assert_eq!(encoder.rank("AAA"), Some(2));
        assert_eq!(encoder.rank("AA"), Some(3));
        assert_eq!(encoder.rank("A"), Some(4));
    }

    #[test]
    fn test_missing_and_unknown_encode_zero() {
        let encoder = RatingEncoder::derived(vec!["B".to_string(), "A".to_string()]);
        assert_eq!(encoder.encode(None), 0.0);
        assert_eq!(encoder.encode(Some("CCC")), 0.0);
        assert_eq!(encoder.encode(Some("A")), 1.0);
    }

    #[test]
    fn test_fixed_scale() {
        let order = vec!["AAA".to_string(), "AA".to_string(), "A".to_string()];
        let encoder = RatingEncoder::fixed(&order);
        assert_eq!(encoder.encode(Some("AAA")), 0.0);
        assert_eq!(encoder.encode(Some("A")), 2.0);
        assert_eq!(encoder.encode(Some("BBB")), 0.0);
    }

    #[test]
    fn test_from_dataset_uses_all_rows() {
        let ds = Dataset::from_rows(
            vec!["Credit_Rating".into()],
            vec![
                vec![Cell::Text("BB".into())],
                vec![Cell::Null],
                vec![Cell::Text("AA".into())],
            ],
        )
        .unwrap();
        let encoder = RatingEncoder::from_dataset(&ds, "Credit_Rating", &RatingScale::Derived);
        assert_eq!(encoder.rank("BB"), Some(0));
        assert_eq!(encoder.rank("AA"), Some(1));

        let absent = RatingEncoder::from_dataset(&ds, "Rating", &RatingScale::Derived);
        assert!(absent.is_empty());
    }
}
