//! QUERY: USER SUMMARY
//!
//! Spend, recommendation percentage and item count for one user.
//!
//! Existence is defined by UserReviews alone: a user with a UserData row but no
//! reviews is NotFound. The reverse (reviews but no UserData row) means the
//! tables disagree and is an internal error.
//!
//! The recommendation percentage divides the user's recommend count by the
//! number of distinct reviewers in the whole dataset (precomputed at load),
//! then rounds half-to-even to 2 decimals. Null user ids are not counted as a
//! reviewer, so a table holding nulls gives a denominator one lower than a
//! count that treats null as an identifier of its own.
//!
//! A null or non-finite spend, or a null item count, is a malformed UserData
//! row and surfaces as an internal error.

use crate::data::GameData;
use crate::error::QueryError;
use crate::utils::{filter_eq_str, round_half_even};
use anyhow::{bail, Context, Result};
use serde::Serialize;

/// Message carried by `QueryError::NotFound`
pub const USER_NOT_FOUND: &str = "Usuario no encontrado";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    /// Total spend, truncated to an integer
    #[serde(rename = "cantidad_dinero")]
    pub spend: i64,

    /// Share of recommendations over all distinct reviewers (0-100, 2 decimals)
    #[serde(rename = "porcentaje_recomendacion")]
    pub recommend_pct: f64,

    #[serde(rename = "total_items")]
    pub total_items: i64,
}

/// Summary for `user_id`, or `QueryError::NotFound` if they never reviewed
pub fn userdata(data: &GameData, user_id: &str) -> Result<UserSummary, QueryError> {
    match summarize_user(data, user_id) {
        Ok(Some(summary)) => Ok(summary),
        Ok(None) => Err(QueryError::NotFound(USER_NOT_FOUND.to_string())),
        Err(err) => Err(QueryError::internal(err)),
    }
}

fn summarize_user(data: &GameData, user_id: &str) -> Result<Option<UserSummary>> {
    let reviews = filter_eq_str(data.user_reviews(), "user_id", user_id, "userdata reviews")?;
    if reviews.height() == 0 {
        return Ok(None);
    }

    let recommend_count = reviews
        .column("reviews_recommend")?
        .bool()?
        .into_iter()
        .filter(|recommend| *recommend == Some(true))
        .count();

    let profile = filter_eq_str(data.user_data(), "user_id", user_id, "userdata profile")?;
    if profile.height() == 0 {
        bail!(
            "userdata: user {:?} has {} review rows but no UserData row",
            user_id,
            reviews.height()
        );
    }

    let spend = profile
        .column("price")?
        .f64()?
        .get(0)
        .with_context(|| format!("userdata: null spend in UserData for {:?}", user_id))?;
    if !spend.is_finite() {
        bail!("userdata: non-finite spend {} in UserData for {:?}", spend, user_id);
    }
    let total_items = profile
        .column("items_count")?
        .i64()?
        .get(0)
        .with_context(|| {
            format!("userdata: null items_count in UserData for {:?}", user_id)
        })?;

    let reviewers = data.distinct_reviewers();
    if reviewers == 0 {
        bail!("userdata: UserReviews has no non-null user ids");
    }
    let recommend_pct = round_half_even(recommend_count as f64 / reviewers as f64 * 100.0, 2);

    Ok(Some(UserSummary {
        spend: spend.trunc() as i64,
        recommend_pct,
        total_items,
    }))
}
