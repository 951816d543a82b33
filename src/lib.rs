//! Game Insights Rust Implementation
//!
//! Analytical queries over a game platform's catalog and user-interaction tables.
//!
//! Layout:
//! - `data`: Dataset store (five immutable Polars tables, loaded once)
//! - `queries`: The five read-only query operations
//! - `error`: Boundary error type shared by all queries
//! - `utils`: Column projection and numeric helpers
//! - `api_server`: Axum transport (feature `api`)

pub mod data;
pub mod error;
pub mod queries;
pub mod utils;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use data::{DatasetKind, GameData};
pub use error::{QueryError, QueryOutcome};
pub use queries::*;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState, CacheSettings};
