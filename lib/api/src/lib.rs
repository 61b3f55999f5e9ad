pub mod rest;

pub use rest::{error_body, AppState, RestApi};
