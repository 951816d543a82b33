//! Dataset Loading and Management
//!
//! Holds the five precomputed tables the queries read, using Polars.
//! Tables are loaded once (parquet, with a CSV fallback), projected to the
//! columns the queries need, cast to canonical types, and never mutated.

use crate::utils::{materialize_with_columns, ColumnType};
use anyhow::{anyhow, bail, Context, Result};
use polars::prelude::*;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};

/// The five source tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// One row per catalog item: developer, item_id, release_year, price
    ItemDeveloperYear,
    /// One row per review event: user_id, reviews_recommend
    UserReviews,
    /// One row per user: user_id, price (total spend), items_count
    UserData,
    /// One row per (user, genre, item) playtime record
    UserForGenre,
    /// One row per reviewed item with its sentiment code
    BestDeveloper,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 5] = [
        DatasetKind::ItemDeveloperYear,
        DatasetKind::UserReviews,
        DatasetKind::UserData,
        DatasetKind::UserForGenre,
        DatasetKind::BestDeveloper,
    ];

    /// File name without extension, as exported by the preprocessing step
    pub fn file_stem(self) -> &'static str {
        match self {
            DatasetKind::ItemDeveloperYear => "df_item_developer_year",
            DatasetKind::UserReviews => "df_user_reviews",
            DatasetKind::UserData => "df_user_data",
            DatasetKind::UserForGenre => "df_userforgenre",
            DatasetKind::BestDeveloper => "df_best_developer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DatasetKind::ItemDeveloperYear => "ItemDeveloperYear",
            DatasetKind::UserReviews => "UserReviews",
            DatasetKind::UserData => "UserData",
            DatasetKind::UserForGenre => "UserForGenre",
            DatasetKind::BestDeveloper => "BestDeveloper",
        }
    }

    /// Required columns and the type each is cast to at load
    pub fn columns(self) -> &'static [(&'static str, ColumnType)] {
        match self {
            DatasetKind::ItemDeveloperYear => &[
                ("developer", ColumnType::Utf8),
                ("item_id", ColumnType::AsStored),
                ("release_year", ColumnType::Int64),
                ("price", ColumnType::Float64),
            ],
            DatasetKind::UserReviews => &[
                ("user_id", ColumnType::Utf8),
                ("reviews_recommend", ColumnType::Boolean),
            ],
            DatasetKind::UserData => &[
                ("user_id", ColumnType::Utf8),
                ("price", ColumnType::Float64),
                ("items_count", ColumnType::Int64),
            ],
            DatasetKind::UserForGenre => &[
                ("user_id", ColumnType::Utf8),
                ("genres", ColumnType::Utf8),
                ("release_year", ColumnType::Int64),
                ("played_hours", ColumnType::Float64),
            ],
            DatasetKind::BestDeveloper => &[
                ("developer", ColumnType::Utf8),
                ("item_id", ColumnType::AsStored),
                ("year", ColumnType::Int64),
                ("reviews_recommend", ColumnType::Boolean),
                ("sentiment_analysis", ColumnType::Int64),
            ],
        }
    }

    /// Zero-row frame with this table's canonical schema
    fn empty_frame(self) -> PolarsResult<DataFrame> {
        let columns: Vec<Column> = self
            .columns()
            .iter()
            .map(|(name, ty)| {
                let dtype = match ty {
                    ColumnType::Utf8 => DataType::String,
                    ColumnType::Int64 | ColumnType::AsStored => DataType::Int64,
                    ColumnType::Float64 => DataType::Float64,
                    ColumnType::Boolean => DataType::Boolean,
                };
                Column::new_empty((*name).into(), &dtype)
            })
            .collect();
        DataFrame::new(columns)
    }
}

/// Immutable holder for all datasets the queries read
///
/// Built once at startup and shared by reference; there are no mutating methods.
#[derive(Debug, Clone)]
pub struct GameData {
    item_developer_year: DataFrame,
    user_reviews: DataFrame,
    user_data: DataFrame,
    user_for_genre: DataFrame,
    best_developer: DataFrame,

    /// Distinct non-null user ids in UserReviews (the `userdata` denominator)
    distinct_reviewers: usize,
}

impl GameData {
    /// Load all five datasets from `data_dir`
    ///
    /// Looks for `<stem>.parquet` first and falls back to `<stem>.csv`.
    /// Fails if any table is missing or lacks a required column.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = data_dir.as_ref();
        tracing::info!("Loading datasets from {}...", dir.display());

        // Tables are independent: read them in parallel
        let frames: Vec<DataFrame> = DatasetKind::ALL
            .par_iter()
            .map(|kind| Self::load_table(dir, *kind))
            .collect::<Result<Vec<_>>>()?;

        let tables: [DataFrame; 5] = frames
            .try_into()
            .map_err(|_| anyhow!("Expected exactly {} tables", DatasetKind::ALL.len()))?;
        let [item_developer_year, user_reviews, user_data, user_for_genre, best_developer] = tables;

        let data = Self::from_frames(
            item_developer_year,
            user_reviews,
            user_data,
            user_for_genre,
            best_developer,
        )?;

        for (kind, rows) in data.heights() {
            tracing::info!("  {}: {} rows", kind.label(), rows);
        }
        tracing::info!("  Distinct reviewers: {}", data.distinct_reviewers);

        Ok(data)
    }

    /// Build the store from in-memory frames, applying the same projection
    /// and casts as `load`
    pub fn from_frames(
        item_developer_year: DataFrame,
        user_reviews: DataFrame,
        user_data: DataFrame,
        user_for_genre: DataFrame,
        best_developer: DataFrame,
    ) -> Result<Self> {
        let item_developer_year = normalize(item_developer_year, DatasetKind::ItemDeveloperYear)?;
        let user_reviews = normalize(user_reviews, DatasetKind::UserReviews)?;
        let user_data = normalize(user_data, DatasetKind::UserData)?;
        let user_for_genre = normalize(user_for_genre, DatasetKind::UserForGenre)?;
        let best_developer = normalize(best_developer, DatasetKind::BestDeveloper)?;

        let distinct_reviewers = {
            let ids = user_reviews
                .column("user_id")?
                .str()
                .context("UserReviews: 'user_id' is not a string column")?;
            ids.into_iter().flatten().collect::<FxHashSet<&str>>().len()
        };

        Ok(GameData {
            item_developer_year,
            user_reviews,
            user_data,
            user_for_genre,
            best_developer,
            distinct_reviewers,
        })
    }

    /// Start a builder where unspecified tables are empty
    pub fn builder() -> GameDataBuilder {
        GameDataBuilder::default()
    }

    pub fn item_developer_year(&self) -> &DataFrame {
        &self.item_developer_year
    }

    pub fn user_reviews(&self) -> &DataFrame {
        &self.user_reviews
    }

    pub fn user_data(&self) -> &DataFrame {
        &self.user_data
    }

    pub fn user_for_genre(&self) -> &DataFrame {
        &self.user_for_genre
    }

    pub fn best_developer(&self) -> &DataFrame {
        &self.best_developer
    }

    pub fn table(&self, kind: DatasetKind) -> &DataFrame {
        match kind {
            DatasetKind::ItemDeveloperYear => &self.item_developer_year,
            DatasetKind::UserReviews => &self.user_reviews,
            DatasetKind::UserData => &self.user_data,
            DatasetKind::UserForGenre => &self.user_for_genre,
            DatasetKind::BestDeveloper => &self.best_developer,
        }
    }

    pub fn distinct_reviewers(&self) -> usize {
        self.distinct_reviewers
    }

    /// Row count per table, in `DatasetKind::ALL` order
    pub fn heights(&self) -> Vec<(DatasetKind, usize)> {
        DatasetKind::ALL
            .iter()
            .map(|kind| (*kind, self.table(*kind).height()))
            .collect()
    }

    /// Resolve and read one table from `dir`
    fn load_table(dir: &Path, kind: DatasetKind) -> Result<DataFrame> {
        let parquet_path = dir.join(format!("{}.parquet", kind.file_stem()));
        if parquet_path.exists() {
            return read_table(&parquet_path);
        }

        let csv_path = dir.join(format!("{}.csv", kind.file_stem()));
        if csv_path.exists() {
            tracing::warn!(
                "{}: parquet not found, falling back to {}",
                kind.label(),
                csv_path.display()
            );
            return read_table(&csv_path);
        }

        bail!(
            "{}: dataset file not found: {} (or .csv)",
            kind.label(),
            parquet_path.display()
        )
    }
}

/// Read a table file, choosing the reader from its extension
pub fn read_table(path: &Path) -> Result<DataFrame> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("parquet") => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to scan parquet: {}", path.display()))?
            .collect()
            .with_context(|| format!("Failed to load parquet: {}", path.display())),
        Some("csv") => CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(PathBuf::from(path)))
            .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
            .finish()
            .with_context(|| format!("Failed to load CSV: {}", path.display())),
        _ => bail!("Unsupported table format: {}", path.display()),
    }
}

/// Project to the required columns and cast them to canonical types
fn normalize(df: DataFrame, kind: DatasetKind) -> Result<DataFrame> {
    materialize_with_columns(df.lazy(), kind.columns(), kind.label())
}

/// Assembles a `GameData` from whichever tables are given; the rest are empty
#[derive(Debug, Default)]
pub struct GameDataBuilder {
    item_developer_year: Option<DataFrame>,
    user_reviews: Option<DataFrame>,
    user_data: Option<DataFrame>,
    user_for_genre: Option<DataFrame>,
    best_developer: Option<DataFrame>,
}

impl GameDataBuilder {
    pub fn item_developer_year(mut self, df: DataFrame) -> Self {
        self.item_developer_year = Some(df);
        self
    }

    pub fn user_reviews(mut self, df: DataFrame) -> Self {
        self.user_reviews = Some(df);
        self
    }

    pub fn user_data(mut self, df: DataFrame) -> Self {
        self.user_data = Some(df);
        self
    }

    pub fn user_for_genre(mut self, df: DataFrame) -> Self {
        self.user_for_genre = Some(df);
        self
    }

    pub fn best_developer(mut self, df: DataFrame) -> Self {
        self.best_developer = Some(df);
        self
    }

    pub fn build(self) -> Result<GameData> {
        let table = |df: Option<DataFrame>, kind: DatasetKind| -> Result<DataFrame> {
            match df {
                Some(df) => Ok(df),
                None => Ok(kind.empty_frame()?),
            }
        };

        GameData::from_frames(
            table(self.item_developer_year, DatasetKind::ItemDeveloperYear)?,
            table(self.user_reviews, DatasetKind::UserReviews)?,
            table(self.user_data, DatasetKind::UserData)?,
            table(self.user_for_genre, DatasetKind::UserForGenre)?,
            table(self.best_developer, DatasetKind::BestDeveloper)?,
        )
    }
}
