// Query Integration Tests
//
// Purpose: Cross-query properties over a shared fixture, plus parquet round trips
// Run with: cargo test --test query_tests

mod common;

use approx::assert_relative_eq;
use game_insights_rust::{
    best_developer_year, developer, developer_reviews_analysis, user_for_genre, userdata,
    GameData, QueryError, QueryOutcome, TOP_DEVELOPERS,
};
use std::collections::BTreeMap;

// =========================================================================
// Section 1: Per-query behavior on the shared fixture
// =========================================================================

#[test]
fn test_developer_free_ratio() {
    let data = common::game_data();

    let valve = developer(&data, "Valve").unwrap();
    assert_eq!(valve.items_by_year, BTreeMap::from([(2012, 3), (2013, 2)]));
    assert_eq!(valve.free_pct_by_year, BTreeMap::from([(2012, 33), (2013, 0)]));

    let ubisoft = developer(&data, "Ubisoft").unwrap();
    assert_eq!(ubisoft.free_pct_by_year, BTreeMap::from([(2014, 100)]));
}

#[test]
fn test_developer_zero_free_items_means_zero_percent() {
    let data = common::game_data();
    let summary = developer(&data, "Valve").unwrap();

    for (year, items) in &summary.items_by_year {
        assert!(*items > 0);
        if *year == 2013 {
            assert_eq!(summary.free_pct_by_year[year], 0);
        }
    }
}

#[test]
fn test_userdata_existence_is_defined_by_reviews() {
    let data = common::game_data();

    // "lurker" has a UserData row but never reviewed
    assert!(matches!(userdata(&data, "lurker"), Err(QueryError::NotFound(_))));

    let echo = userdata(&data, "EchoXSilence").unwrap();
    assert_eq!(echo.spend, 1599);
    assert_eq!(echo.total_items, 277);
    // 2 recommendations over 4 distinct reviewers
    assert_relative_eq!(echo.recommend_pct, 50.0);
}

#[test]
fn test_userforgenre_reports_single_top_player() {
    let data = common::game_data();

    let found = user_for_genre(&data, "Simulation").unwrap().found().unwrap();
    assert_eq!(found.top_user, "js41637");
    let years: Vec<i64> = found.hours_by_year.iter().map(|yh| yh.year).collect();
    assert_eq!(years, vec![2009, 2010, 2011]);
    assert_relative_eq!(found.hours_by_year[0].hours, 62.0);

    assert!(user_for_genre(&data, "Racing").unwrap().is_no_data());
}

#[test]
fn test_best_developer_year_ranking() {
    let data = common::game_data();

    let ranked = best_developer_year(&data, 2012).unwrap().found().unwrap();
    assert!(ranked.len() <= TOP_DEVELOPERS);

    let names: Vec<&str> = ranked.iter().map(|r| r.developer.as_str()).collect();
    assert_eq!(names, vec!["Valve", "Smartly Dressed Games", "Ubisoft"]);
    for pair in ranked.windows(2) {
        assert!(pair[0].recommended_count >= pair[1].recommended_count);
    }

    // 2013 only has a negative review
    assert!(best_developer_year(&data, 2013).unwrap().is_no_data());
}

#[test]
fn test_developer_reviews_analysis_buckets() {
    let data = common::game_data();

    let found = developer_reviews_analysis(&data, "Smartly Dressed Games")
        .unwrap()
        .found()
        .unwrap();
    assert_eq!((found.negative, found.positive), (1, 1));

    let valve = developer_reviews_analysis(&data, "Valve").unwrap().found().unwrap();
    assert_eq!((valve.negative, valve.positive), (1, 2));
}

// =========================================================================
// Section 2: Empty store
// =========================================================================

#[test]
fn test_empty_store_never_faults() {
    let data = GameData::builder().build().unwrap();

    let summary = developer(&data, "Valve").unwrap();
    assert!(summary.items_by_year.is_empty());
    assert!(summary.free_pct_by_year.is_empty());

    assert!(userdata(&data, "anyone").unwrap_err().is_not_found());
    assert!(user_for_genre(&data, "Action").unwrap().is_no_data());
    assert!(best_developer_year(&data, 2012).unwrap().is_no_data());
    assert!(developer_reviews_analysis(&data, "Valve").unwrap().is_no_data());
}

// =========================================================================
// Section 3: Parquet round trip
// =========================================================================

fn all_answers(data: &GameData) -> Vec<String> {
    vec![
        serde_json::to_string(&developer(data, "Valve").unwrap()).unwrap(),
        serde_json::to_string(&userdata(data, "evcentric").unwrap()).unwrap(),
        serde_json::to_string(&user_for_genre(data, "Simulation").unwrap()).unwrap(),
        serde_json::to_string(&best_developer_year(data, 2012).unwrap()).unwrap(),
        serde_json::to_string(&developer_reviews_analysis(data, "Valve").unwrap()).unwrap(),
    ]
}

#[test]
fn test_two_loads_give_identical_output() {
    let dir = common::scratch_dir("round_trip");
    common::write_parquet_fixtures(&dir);

    let first = GameData::load(&dir).unwrap();
    let second = GameData::load(&dir).unwrap();

    assert_eq!(all_answers(&first), all_answers(&second));
    // And the loaded tables answer like the in-memory ones
    assert_eq!(all_answers(&first), all_answers(&common::game_data()));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_repeated_calls_are_idempotent() {
    let data = common::game_data();
    assert_eq!(all_answers(&data), all_answers(&data));
}

#[test]
fn test_queries_run_concurrently_on_shared_data() {
    let data = std::sync::Arc::new(common::game_data());
    let expected = all_answers(&data);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let data = data.clone();
            std::thread::spawn(move || all_answers(&data))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_no_data_outcome_is_a_plain_string() {
    let data = common::game_data();
    let outcome = developer_reviews_analysis(&data, "Nobody").unwrap();

    assert_eq!(
        outcome,
        QueryOutcome::NoData("No hay datos para la desarrolladora Nobody.".to_string())
    );
    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        serde_json::json!("No hay datos para la desarrolladora Nobody.")
    );
}
