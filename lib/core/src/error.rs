use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("Invalid row width: expected {expected}, got {actual}")]
    RowWidth { expected: usize, actual: usize },

    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
