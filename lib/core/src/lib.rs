//! # finlens Core
//!
//! Core library for finlens, the global finance data backend.
//!
//! This crate provides the in-memory relation every other crate works on:
//!
//! - [`Dataset`] - Row-major table with named, typed columns
//! - [`Cell`] - A typed value (text, number, date or missing)
//! - [`FilterSet`] - Country / rating / date / currency / index filters
//! - [`DistinctValues`] - Options for the filter controls
//! - [`compute_kpis`] - Headline sums and means
//! - [`Vector`] - Dense feature vector with cosine similarity
//!
//! ## Example
//!
//! ```rust
//! use finlens_core::{columns, Cell, Dataset, FilterSet};
//!
//! let dataset = Dataset::from_rows(
//!     vec![columns::COUNTRY.to_string(), columns::GDP_GROWTH.to_string()],
//!     vec![
//!         vec![Cell::Text("Canada".to_string()), Cell::Number(1.2)],
//!         vec![Cell::Text("Mexico".to_string()), Cell::Number(3.1)],
//!     ],
//! )
//! .unwrap();
//!
//! let filters = FilterSet {
//!     countries: vec!["Mexico".to_string()],
//!     ..Default::default()
//! };
//! let filtered = filters.apply(&dataset);
//! assert_eq!(filtered.len(), 1);
//! ```

pub mod columns;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod kpi;
pub mod meta;
pub mod vector;

pub use dataset::{format_date, Cell, Dataset, Row};
pub use error::{Error, Result};
pub use filter::{DateSelection, Filter, FilterCondition, FilterSet, RowFilter};
pub use kpi::{compute_kpis, Kpi};
pub use meta::DistinctValues;
pub use vector::Vector;
