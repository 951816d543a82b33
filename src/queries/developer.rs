//! QUERY: DEVELOPER CATALOG OUTPUT
//!
//! Items released per year by one developer, and the share of them that are
//! free (`price == 0.0`, no tolerance), as a truncated integer percentage.
//!
//! **Columns needed** (ItemDeveloperYear):
//!   1. developer - exact, case-sensitive match
//!   2. release_year - grouping key (null years form no group)
//!   3. item_id - counted when non-null
//!   4. price - free when exactly 0.0

use crate::data::GameData;
use crate::error::QueryError;
use crate::utils::truncated_percentage;
use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Yearly output of a developer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeveloperSummary {
    /// Release year → number of items
    #[serde(rename = "cantidad_por_año")]
    pub items_by_year: BTreeMap<i64, u32>,

    /// Release year → integer percentage of free items (0 when none are free)
    #[serde(rename = "porcentaje_gratis_por_año")]
    pub free_pct_by_year: BTreeMap<i64, u32>,
}

/// Items per year and free-content percentage per year for `name`
///
/// An unknown developer yields two empty maps, not an error.
pub fn developer(data: &GameData, name: &str) -> Result<DeveloperSummary, QueryError> {
    summarize_developer(data, name).map_err(QueryError::internal)
}

fn summarize_developer(data: &GameData, name: &str) -> Result<DeveloperSummary> {
    let rows = data
        .item_developer_year()
        .clone()
        .lazy()
        .filter(col("developer").eq(lit(name)))
        .select([
            col("release_year"),
            col("price"),
            col("item_id").is_not_null().alias("has_item"),
        ])
        .collect()
        .with_context(|| format!("developer: failed to select catalog rows for {:?}", name))?;

    let years = rows.column("release_year")?.i64()?;
    let prices = rows.column("price")?.f64()?;
    let has_item = rows.column("has_item")?.bool()?;

    let mut items_by_year: BTreeMap<i64, u32> = BTreeMap::new();
    let mut free_by_year: BTreeMap<i64, u32> = BTreeMap::new();

    for ((year, price), has_item) in years.into_iter().zip(prices).zip(has_item) {
        let Some(year) = year else { continue };

        // A year whose item_ids are all null still shows up, with count 0
        let count = items_by_year.entry(year).or_insert(0);
        if has_item != Some(true) {
            continue;
        }
        *count += 1;

        if price == Some(0.0) {
            *free_by_year.entry(year).or_insert(0) += 1;
        }
    }

    let free_pct_by_year = items_by_year
        .iter()
        .map(|(year, items)| {
            let free = free_by_year.get(year).copied().unwrap_or(0);
            (*year, truncated_percentage(free, *items))
        })
        .collect();

    tracing::debug!("developer {:?}: {} years", name, items_by_year.len());

    Ok(DeveloperSummary {
        items_by_year,
        free_pct_by_year,
    })
}
