//! LazyFrame materialization helpers with column validation
//!
//! Provides explicit patterns for projecting Polars tables to a known set of
//! typed columns, so query code never hits a missing-column surprise.

use anyhow::{anyhow, Context, Result};
use polars::prelude::*;
use std::collections::HashSet;

/// Canonical type a column is cast to when materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Utf8,
    Int64,
    Float64,
    Boolean,
    /// Keep whatever type the source stored (e.g. `item_id`, only null-checked)
    AsStored,
}

impl ColumnType {
    fn to_dtype(self) -> Option<DataType> {
        match self {
            ColumnType::Utf8 => Some(DataType::String),
            ColumnType::Int64 => Some(DataType::Int64),
            ColumnType::Float64 => Some(DataType::Float64),
            ColumnType::Boolean => Some(DataType::Boolean),
            ColumnType::AsStored => None,
        }
    }
}

/// Materialize LazyFrame with explicit, typed column list and validation
///
/// # Arguments
/// * `lazy` - LazyFrame to materialize
/// * `columns` - Required column names with their canonical types
/// * `context` - Context for error messages (e.g., "UserReviews")
///
/// # Errors
/// Returns error if:
/// - Any required column is missing from the source
/// - Materialization or casting fails
pub fn materialize_with_columns(
    lazy: LazyFrame,
    columns: &[(&str, ColumnType)],
    context: &str,
) -> Result<DataFrame> {
    let mut lazy = lazy;

    // VALIDATE first: polars' own error for a missing column does not name the table
    let schema = lazy
        .collect_schema()
        .with_context(|| format!("{}: Failed to resolve schema", context))?;
    let available: HashSet<String> = schema.iter_names().map(|s| s.to_string()).collect();
    for (name, _) in columns {
        if !available.contains(*name) {
            return Err(anyhow!(
                "{}: Missing expected column '{}'. Available columns: {:?}",
                context, name, available
            ));
        }
    }

    let col_exprs: Vec<Expr> = columns
        .iter()
        .map(|(name, ty)| match ty.to_dtype() {
            Some(dtype) => col(*name).cast(dtype),
            None => col(*name),
        })
        .collect();

    lazy.select(&col_exprs)
        .collect()
        .with_context(|| {
            let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
            format!("{}: Failed to materialize columns {:?}", context, names)
        })
}

/// Rows of `df` whose string column `column` equals `value` exactly
pub fn filter_eq_str(
    df: &DataFrame,
    column: &str,
    value: &str,
    context: &str,
) -> Result<DataFrame> {
    df.clone()
        .lazy()
        .filter(col(column).eq(lit(value)))
        .collect()
        .with_context(|| format!("{}: Failed to filter '{}' == {:?}", context, column, value))
}
