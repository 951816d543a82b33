//! QUERY: DEVELOPER SENTIMENT TALLY
//!
//! Negative (code 0) and positive (code 2) review counts for one developer.
//! Neutral, out-of-range and null codes fall in neither bucket.

use crate::data::GameData;
use crate::error::{QueryError, QueryOutcome};
use crate::queries::sentiment::Sentiment;
use crate::utils::filter_eq_str;
use anyhow::Result;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSentiment {
    pub developer: String,
    pub negative: u32,
    pub positive: u32,
}

#[derive(Serialize)]
struct SentimentCounts {
    #[serde(rename = "Negative")]
    negative: u32,
    #[serde(rename = "Positive")]
    positive: u32,
}

// Serializes as {"<developer>": {"Negative": n, "Positive": p}}
impl Serialize for ReviewSentiment {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(
            &self.developer,
            &SentimentCounts {
                negative: self.negative,
                positive: self.positive,
            },
        )?;
        map.end()
    }
}

pub fn no_developer_reviews_message(developer: &str) -> String {
    format!("No hay datos para la desarrolladora {}.", developer)
}

pub fn developer_reviews_analysis(
    data: &GameData,
    developer: &str,
) -> Result<QueryOutcome<ReviewSentiment>, QueryError> {
    tally_sentiment(data, developer).map_err(QueryError::internal)
}

fn tally_sentiment(data: &GameData, developer: &str) -> Result<QueryOutcome<ReviewSentiment>> {
    let rows = filter_eq_str(
        data.best_developer(),
        "developer",
        developer,
        "developer_reviews_analysis",
    )?;
    if rows.height() == 0 {
        return Ok(QueryOutcome::NoData(no_developer_reviews_message(developer)));
    }

    let mut negative = 0;
    let mut positive = 0;
    for code in rows.column("sentiment_analysis")?.i64()?.into_iter().flatten() {
        match Sentiment::from_code(code) {
            Some(Sentiment::Negative) => negative += 1,
            Some(Sentiment::Positive) => positive += 1,
            Some(Sentiment::Neutral) | None => {}
        }
    }

    Ok(QueryOutcome::Found(ReviewSentiment {
        developer: developer.to_string(),
        negative,
        positive,
    }))
}
