use anyhow::{bail, Context};
use game_insights_rust::{
    best_developer_year, developer, developer_reviews_analysis, user_for_genre, userdata, GameData,
};

const USAGE: &str = "usage: inspect_data [DATA_DIR] \
    [developer|userdata|userforgenre|best_developer_year|developer_reviews_analysis ARG]";

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let data_dir = args
        .first()
        .cloned()
        .or_else(|| std::env::var("DATA_DIR").ok())
        .unwrap_or_else(|| "data".to_string());

    println!("\n=== LOADING DATASETS FROM {} ===\n", data_dir);
    let data = GameData::load(&data_dir)?;

    for (kind, rows) in data.heights() {
        println!("  {:<18} {:>10} rows  ({})", kind.label(), rows, kind.file_stem());
    }
    println!("  Distinct reviewers: {}", data.distinct_reviewers());

    // Optional: run one query and print its JSON
    let (query, arg) = match (args.get(1), args.get(2)) {
        (Some(query), Some(arg)) => (query.as_str(), arg.as_str()),
        (None, _) => return Ok(()),
        (Some(_), None) => bail!("{}", USAGE),
    };

    let json = match query {
        "developer" => serde_json::to_value(developer(&data, arg)?)?,
        "userdata" => serde_json::to_value(userdata(&data, arg)?)?,
        "userforgenre" => serde_json::to_value(user_for_genre(&data, arg)?)?,
        "best_developer_year" => {
            let year: i32 = arg
                .parse()
                .with_context(|| format!("year must be an integer, got {:?}", arg))?;
            serde_json::to_value(best_developer_year(&data, year)?)?
        }
        "developer_reviews_analysis" => {
            serde_json::to_value(developer_reviews_analysis(&data, arg)?)?
        }
        other => bail!("unknown query {:?}\n{}", other, USAGE),
    };

    println!("\n=== {}({:?}) ===\n", query, arg);
    println!("{}", serde_json::to_string_pretty(&json)?);

    Ok(())
}
