//! Query boundary errors and the "no data" result shape
//!
//! Every public query returns `Result<_, QueryError>`. Internally the queries use
//! `anyhow` with context; the boundary collapses those into `QueryError::Internal`
//! keeping the full message chain.

use serde::Serialize;
use thiserror::Error;

/// The two error classes a query may raise
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The requested entity does not exist (only raised by `userdata`)
    #[error("{0}")]
    NotFound(String),

    /// Any unexpected fault: malformed rows, failed polars operations,
    /// inconsistent cross-table state
    #[error("{0}")]
    Internal(String),
}

impl QueryError {
    /// Wrap an internal failure, keeping the whole context chain in the message
    pub fn internal(err: anyhow::Error) -> Self {
        QueryError::Internal(format!("{:#}", err))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryError::NotFound(_))
    }
}

/// Result of a query that reports "no matching data" as a value
///
/// Serializes untagged: `Found(t)` as `t` itself, `NoData(msg)` as a plain
/// JSON string, so callers tell the two apart by shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutcome<T> {
    Found(T),
    NoData(String),
}

impl<T> QueryOutcome<T> {
    pub fn found(self) -> Option<T> {
        match self {
            QueryOutcome::Found(value) => Some(value),
            QueryOutcome::NoData(_) => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, QueryOutcome::NoData(_))
    }
}
