//! QUERY: TOP-3 DEVELOPERS OF A YEAR
//!
//! Counts, per developer, the reviewed items of `year` that were both
//! recommended and scored positive, and ranks the top three.
//!
//! Tie-break: developers are grouped in lexicographic order and the sort by
//! count is stable, so equal counts keep ascending name order.

use crate::data::GameData;
use crate::error::{QueryError, QueryOutcome};
use crate::queries::sentiment::Sentiment;
use anyhow::{Context, Result};
use polars::prelude::*;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Number of ranked developers returned
pub const TOP_DEVELOPERS: usize = 3;

/// One ranked developer; serializes as `{"Rank <n>": "<developer>"}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedDeveloper {
    /// 1-based
    pub rank: usize,
    pub developer: String,
    /// Recommended, positive reviews that year (not serialized)
    pub recommended_count: u32,
}

impl Serialize for RankedDeveloper {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&format!("Rank {}", self.rank), &self.developer)?;
        map.end()
    }
}

pub fn no_year_data_message(year: i32) -> String {
    format!("No hay datos para el año {}.", year)
}

pub fn no_developers_message(year: i32) -> String {
    format!("No hay desarrolladores encontrados para el año {}.", year)
}

/// Up to three developers with the most recommended positive reviews in `year`
pub fn best_developer_year(
    data: &GameData,
    year: i32,
) -> Result<QueryOutcome<Vec<RankedDeveloper>>, QueryError> {
    rank_developers(data, year).map_err(QueryError::internal)
}

fn rank_developers(data: &GameData, year: i32) -> Result<QueryOutcome<Vec<RankedDeveloper>>> {
    let rows = data
        .best_developer()
        .clone()
        .lazy()
        .filter(
            col("year")
                .eq(lit(year as i64))
                .and(col("reviews_recommend").eq(lit(true)))
                .and(col("sentiment_analysis").eq(lit(Sentiment::Positive.code()))),
        )
        .select([
            col("developer"),
            col("item_id").is_not_null().alias("has_item"),
        ])
        .collect()
        .with_context(|| format!("best_developer_year: failed to filter reviews for {}", year))?;

    if rows.height() == 0 {
        return Ok(QueryOutcome::NoData(no_year_data_message(year)));
    }

    let developers = rows.column("developer")?.str()?;
    let has_item = rows.column("has_item")?.bool()?;

    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for (developer, has_item) in developers.into_iter().zip(has_item) {
        let Some(developer) = developer else { continue };
        let count = counts.entry(developer).or_insert(0);
        if has_item == Some(true) {
            *count += 1;
        }
    }

    if counts.is_empty() {
        return Ok(QueryOutcome::NoData(no_developers_message(year)));
    }

    let mut ranked: Vec<(&str, u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(QueryOutcome::Found(
        ranked
            .into_iter()
            .take(TOP_DEVELOPERS)
            .enumerate()
            .map(|(idx, (developer, recommended_count))| RankedDeveloper {
                rank: idx + 1,
                developer: developer.to_string(),
                recommended_count,
            })
            .collect(),
    ))
}
