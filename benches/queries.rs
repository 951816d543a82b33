use criterion::{black_box, criterion_group, criterion_main, Criterion};
use game_insights_rust::{
    best_developer_year, developer, developer_reviews_analysis, user_for_genre, userdata, GameData,
};
use polars::prelude::*;

const ROWS: usize = 100_000;
const DEVELOPERS: usize = 500;
const USERS: usize = 20_000;

fn synthetic_data() -> GameData {
    let developers: Vec<String> = (0..ROWS).map(|i| format!("dev_{}", i % DEVELOPERS)).collect();
    let users: Vec<String> = (0..ROWS).map(|i| format!("user_{}", i % USERS)).collect();
    let genres: Vec<&str> = (0..ROWS)
        .map(|i| ["Action", "Indie", "Simulation", "RPG"][i % 4])
        .collect();
    let years: Vec<i64> = (0..ROWS).map(|i| 2000 + (i % 20) as i64).collect();
    let item_ids: Vec<i64> = (0..ROWS as i64).collect();
    let prices: Vec<f64> = (0..ROWS).map(|i| if i % 5 == 0 { 0.0 } else { 9.99 }).collect();
    let flags: Vec<bool> = (0..ROWS).map(|i| i % 3 != 0).collect();
    let sentiments: Vec<i64> = (0..ROWS).map(|i| (i % 3) as i64).collect();
    let hours: Vec<f64> = (0..ROWS).map(|i| (i % 997) as f64 * 1.5).collect();

    let profile_ids: Vec<String> = (0..USERS).map(|i| format!("user_{}", i)).collect();
    let spend: Vec<f64> = (0..USERS).map(|i| i as f64 * 0.75).collect();
    let items_count: Vec<i64> = (0..USERS as i64).collect();

    GameData::from_frames(
        df![
            "developer" => &developers,
            "item_id" => &item_ids,
            "release_year" => &years,
            "price" => &prices,
        ].unwrap(),
        df![
            "user_id" => &users,
            "reviews_recommend" => &flags,
        ].unwrap(),
        df![
            "user_id" => &profile_ids,
            "price" => &spend,
            "items_count" => &items_count,
        ].unwrap(),
        df![
            "user_id" => &users,
            "genres" => &genres,
            "release_year" => &years,
            "played_hours" => &hours,
        ].unwrap(),
        df![
            "developer" => &developers,
            "item_id" => &item_ids,
            "year" => &years,
            "reviews_recommend" => &flags,
            "sentiment_analysis" => &sentiments,
        ].unwrap(),
    )
    .unwrap()
}

fn bench_queries(c: &mut Criterion) {
    let data = synthetic_data();

    c.bench_function("developer", |b| {
        b.iter(|| developer(black_box(&data), black_box("dev_42")).unwrap())
    });
    c.bench_function("userdata", |b| {
        b.iter(|| userdata(black_box(&data), black_box("user_42")).unwrap())
    });
    c.bench_function("userforgenre", |b| {
        b.iter(|| user_for_genre(black_box(&data), black_box("Simulation")).unwrap())
    });
    c.bench_function("best_developer_year", |b| {
        b.iter(|| best_developer_year(black_box(&data), black_box(2012)).unwrap())
    });
    c.bench_function("developer_reviews_analysis", |b| {
        b.iter(|| developer_reviews_analysis(black_box(&data), black_box("dev_42")).unwrap())
    });
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);
