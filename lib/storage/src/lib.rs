pub mod loader;
pub mod manager;

pub use loader::{load_csv, parse_date, CsvLoader, LoadOptions, DEFAULT_NA_VALUES};
pub use manager::DatasetStore;
