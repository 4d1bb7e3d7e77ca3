use manhwa_recommender::catalog::sample::sample_catalog;
use manhwa_recommender::{PreferenceQuery, RecommendOptions, Recommender, Result};

fn main() -> Result<()> {
    // build the catalog and the recommender
    let catalog = sample_catalog();
    let recommender = Recommender::new(&catalog);

    // rank the items closest to Solo Leveling
    let ranked = recommender.recommend("1", 5)?;
    println!("similar to Solo Leveling:");
    for scored in &ranked {
        println!("  {:.4}  {}", scored.score, scored.item.title);
    }

    // the same ranking with horror excluded and a year window
    let options = RecommendOptions::default()
        .with_excluded_genres(&["Horror"])
        .with_year_range(Some(2015), None);
    let filtered = recommender.recommend_filtered("1", &options)?;
    println!("with filters:");
    for scored in &filtered {
        println!("  {:.4}  {}", scored.score, scored.item.title);
    }

    // what the filters removed
    let stats = recommender.filter_stats("1", &options)?;
    println!(
        "filters removed {} of {} candidates ({:.0}%)",
        stats.excluded_total, stats.candidates, stats.excluded_percentage
    );

    // rank for a preference query instead of an item
    let query = PreferenceQuery::new(&["Action", "Fantasy"], &["Dungeons"]);
    let by_preference = recommender.recommend_for_preference(&query, 5);
    println!("for preferred genres and tags:");
    for scored in &by_preference {
        println!("  {:.4}  {}", scored.score, scored.item.title);
    }

    Ok(())
}
