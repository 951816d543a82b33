//! Query modules
//!
//! Each analytical query lives in its own module. All of them are pure
//! functions of `(&GameData, one scalar input)` and share no state.

pub mod best_developer_year;
pub mod developer;
pub mod developer_reviews;
pub mod sentiment;
pub mod user_for_genre;
pub mod userdata;

// Re-export query functions and their result types
pub use best_developer_year::{best_developer_year, RankedDeveloper, TOP_DEVELOPERS};
pub use developer::{developer, DeveloperSummary};
pub use developer_reviews::{developer_reviews_analysis, ReviewSentiment};
pub use sentiment::Sentiment;
pub use user_for_genre::{user_for_genre, GenrePlaytime, YearHours};
pub use userdata::{userdata, UserSummary, USER_NOT_FOUND};
