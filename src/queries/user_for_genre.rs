//! QUERY: GENRE TOP PLAYER AND YEARLY PLAYTIME
//!
//! For one genre: the user on the single row with the most played hours, and
//! total hours per release year in ascending year order.
//!
//! Only one top user is reported. The route was advertised as a "top 5", but
//! the reported contract has always been the single maximum row.
//!
//! Tie-break: the first maximal row in stored order wins (strict `>` scan).
//! Null or NaN hours are skipped by both the max and the yearly sums.

use crate::data::GameData;
use crate::error::{QueryError, QueryOutcome};
use crate::utils::filter_eq_str;
use anyhow::{Context, Result};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Hours played in one release year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearHours {
    #[serde(rename = "Año")]
    pub year: i64,

    #[serde(rename = "Horas")]
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenrePlaytime {
    pub genre: String,
    pub top_user: String,
    /// Ordered by year ascending
    pub hours_by_year: Vec<YearHours>,
}

// The top-user key embeds the genre name, so the map is written by hand
impl Serialize for GenrePlaytime {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(
            &format!("Usuario con más horas jugadas para Género {}", self.genre),
            &self.top_user,
        )?;
        map.serialize_entry("Horas jugadas", &self.hours_by_year)?;
        map.end()
    }
}

pub fn no_genre_data_message(genre: &str) -> String {
    format!("No hay datos para el género {}.", genre)
}

/// Top player and yearly hours for `genre`, or a "no data" message
pub fn user_for_genre(
    data: &GameData,
    genre: &str,
) -> Result<QueryOutcome<GenrePlaytime>, QueryError> {
    summarize_genre(data, genre).map_err(QueryError::internal)
}

fn summarize_genre(data: &GameData, genre: &str) -> Result<QueryOutcome<GenrePlaytime>> {
    let rows = filter_eq_str(data.user_for_genre(), "genres", genre, "userforgenre")?;
    if rows.height() == 0 {
        return Ok(QueryOutcome::NoData(no_genre_data_message(genre)));
    }

    let users = rows.column("user_id")?.str()?;
    let years = rows.column("release_year")?.i64()?;
    let hours = rows.column("played_hours")?.f64()?;

    let mut top: Option<(f64, Option<&str>)> = None;
    let mut hours_by_year: BTreeMap<i64, f64> = BTreeMap::new();

    for ((user, year), played) in users.into_iter().zip(years).zip(hours) {
        let played = played.filter(|h| !h.is_nan());

        if let Some(h) = played {
            if top.map_or(true, |(best, _)| h > best) {
                top = Some((h, user));
            }
        }

        if let Some(year) = year {
            *hours_by_year.entry(year).or_insert(0.0) += played.unwrap_or(0.0);
        }
    }

    let (_, top_user) = top
        .with_context(|| format!("userforgenre: no played_hours recorded for genre {:?}", genre))?;
    let top_user = top_user
        .with_context(|| format!("userforgenre: top row for genre {:?} has no user_id", genre))?
        .to_string();

    Ok(QueryOutcome::Found(GenrePlaytime {
        genre: genre.to_string(),
        top_user,
        hours_by_year: hours_by_year
            .into_iter()
            .map(|(year, hours)| YearHours { year, hours })
            .collect(),
    }))
}
