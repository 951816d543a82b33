//! Utility modules shared by the dataset store and the queries
//!
//! - LazyFrame helpers: Typed projection with column validation, exact-match filters
//! - Numeric: Truncated percentages and half-even rounding

pub mod lazy_helpers;
pub mod numeric;

// Re-export commonly used helpers
pub use lazy_helpers::{filter_eq_str, materialize_with_columns, ColumnType};
pub use numeric::{round_half_even, truncated_percentage};
