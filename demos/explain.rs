use manhwa_recommender::catalog::sample::sample_catalog;
use manhwa_recommender::{Recommender, Result};

fn main() -> Result<()> {
    let catalog = sample_catalog();
    let recommender = Recommender::new(&catalog);

    // full audit report for one pair
    let report = recommender.explain("1", "10")?;

    // per-term weights on the source side
    println!("source terms:");
    let source = &report.source_tfidf;
    for weight in source.genres.iter().chain(source.tags.iter()) {
        println!(
            "  {:<18} tf={:.4} idf={:+.4} tfidf={:+.6}",
            weight.term, weight.tf, weight.idf, weight.tfidf
        );
    }

    // positions where either side carries weight
    println!("shared positions:");
    for row in report.vector_table.iter().filter(|row| row.has_value) {
        println!(
            "  {:<18} {:>9.6} {:>9.6}",
            row.term, row.source_value, row.target_value
        );
    }

    // the cosine arithmetic
    println!("dot product   {:.6}", report.cosine.score.dot_product);
    println!(
        "magnitudes    {:.6} / {:.6}",
        report.cosine.score.source_magnitude, report.cosine.score.target_magnitude
    );
    println!("similarity    {:.6}", report.cosine.similarity());

    // attribute bonuses and the final score
    if let Some(factors) = &report.factors {
        println!("factor bonus  {:+.4}", factors.bonus());
    }
    println!("final score   {:.6}", report.final_score);

    // thresholded relevance for this one pair
    println!("predicted relevant: {}", report.evaluation.predicted_relevant);
    println!("actually relevant:  {}", report.evaluation.actually_relevant);

    // quality summary across the whole catalog
    let summary = recommender.evaluate_all("1", 0.3)?;
    println!(
        "catalog-wide: precision {:.2} recall {:.2} f1 {:.2}",
        summary.precision, summary.recall, summary.f1_score
    );

    Ok(())
}
