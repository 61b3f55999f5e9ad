/// Reasons a recommendation is unavailable.
///
/// None of these are fatal: callers report them and carry on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecommendationError {
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingRequiredColumns(Vec<String>),

    #[error("Entity '{0}' not found in the latest snapshot")]
    EntityNotFound(String),

    #[error("Entity '{0}' has incomplete features in its latest observation")]
    IncompleteFeatures(String),

    #[error("Query entity cannot be empty")]
    EmptyQuery,

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RecommendationError>;
