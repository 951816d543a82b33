// Shared fixtures for integration tests: a small, consistent set of all five tables

#![allow(dead_code)]

use game_insights_rust::{DatasetKind, GameData};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

pub fn item_developer_year() -> DataFrame {
    df![
        "developer" => &["Valve", "Valve", "Valve", "Valve", "Valve", "Ubisoft", "Ubisoft"],
        "item_id" => &[10i64, 20, 30, 40, 50, 60, 70],
        "release_year" => &[2012i64, 2012, 2012, 2013, 2013, 2014, 2014],
        "price" => &[0.0, 9.99, 19.99, 4.99, 14.99, 0.0, 0.0],
    ].unwrap()
}

pub fn user_reviews() -> DataFrame {
    df![
        "user_id" => &[
            "EchoXSilence", "EchoXSilence", "js41637", "evcentric", "evcentric", "doctr",
        ],
        "reviews_recommend" => &[true, true, false, true, false, true],
    ].unwrap()
}

pub fn user_data() -> DataFrame {
    df![
        "user_id" => &["EchoXSilence", "js41637", "evcentric", "doctr", "lurker"],
        "price" => &[1599.72, 30.5, 0.0, 12.0, 99.0],
        "items_count" => &[277i64, 10, 0, 3, 8],
    ].unwrap()
}

pub fn user_for_genre() -> DataFrame {
    df![
        "user_id" => &["EchoXSilence", "js41637", "evcentric", "doctr", "js41637"],
        "genres" => &["Simulation", "Simulation", "Simulation", "Action", "Simulation"],
        "release_year" => &[2009i64, 2010, 2009, 2012, 2011],
        "played_hours" => &[50.0, 410.25, 12.0, 7.0, 3.5],
    ].unwrap()
}

pub fn best_developer() -> DataFrame {
    df![
        "developer" => &[
            "Smartly Dressed Games", "Smartly Dressed Games", "Smartly Dressed Games",
            "Valve", "Valve", "Ubisoft", "Facepunch", "Valve",
        ],
        "item_id" => &[1i64, 2, 3, 4, 5, 6, 7, 8],
        "year" => &[2012i64, 2012, 2012, 2012, 2012, 2012, 2012, 2013],
        "reviews_recommend" => &[true, true, true, true, true, true, false, true],
        "sentiment_analysis" => &[2i64, 0, 1, 2, 2, 2, 2, 0],
    ].unwrap()
}

pub fn game_data() -> GameData {
    GameData::from_frames(
        item_developer_year(),
        user_reviews(),
        user_data(),
        user_for_genre(),
        best_developer(),
    )
    .unwrap()
}

/// Fresh per-test directory under the system temp dir
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("game_insights_it_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write the fixture tables as parquet files with the expected names
pub fn write_parquet_fixtures(dir: &Path) {
    let tables = [
        (DatasetKind::ItemDeveloperYear, item_developer_year()),
        (DatasetKind::UserReviews, user_reviews()),
        (DatasetKind::UserData, user_data()),
        (DatasetKind::UserForGenre, user_for_genre()),
        (DatasetKind::BestDeveloper, best_developer()),
    ];

    for (kind, mut df) in tables {
        let file = File::create(dir.join(format!("{}.parquet", kind.file_stem()))).unwrap();
        ParquetWriter::new(file).finish(&mut df).unwrap();
    }
}
