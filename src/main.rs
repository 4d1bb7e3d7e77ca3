use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use manhwa_recommender::catalog::loader;
use manhwa_recommender::engine::evaluate::DEFAULT_THRESHOLD;
use manhwa_recommender::engine::rank::{DEFAULT_ITEM_LIMIT, DEFAULT_PREFERENCE_LIMIT};
use manhwa_recommender::engine::report::TfidfSection;
use manhwa_recommender::{
    Catalog, EvaluationSummary, FilterStats, PreferenceQuery, RecommendOptions, Recommender,
    Scored, SimilarityReport,
};

// Parsed CLI flags. Everything is optional; with no query flags at all the
// binary drops into an interactive prompt.
struct CliArgs {
    data: Option<PathBuf>,
    snapshot: Option<PathBuf>,
    save_snapshot: Option<PathBuf>,
    source_id: Option<String>,
    source_title: Option<String>,
    genres: Vec<String>,
    tags: Vec<String>,
    exclude_genres: Vec<String>,
    exclude_tags: Vec<String>,
    year_min: Option<i32>,
    year_max: Option<i32>,
    limit: Option<usize>,
    threshold: f64,
    explain_target: Option<String>,
    show_stats: bool,
    show_metrics: bool,
}

impl CliArgs {
    fn has_filters(&self) -> bool {
        !self.exclude_genres.is_empty()
            || !self.exclude_tags.is_empty()
            || self.year_min.is_some()
            || self.year_max.is_some()
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let Some(args) = parse_args(env::args().skip(1)) else {
        return;
    };

    let load_started = Instant::now();
    let catalog = if let Some(path) = &args.snapshot {
        match loader::load_snapshot(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!(error = %e, "failed to load snapshot");
                return;
            }
        }
    } else {
        loader::load_or_sample(args.data.as_deref())
    };
    info!(
        items = catalog.len(),
        elapsed_ms = load_started.elapsed().as_millis() as u64,
        "catalog ready"
    );

    if let Some(path) = &args.save_snapshot {
        if let Err(e) = loader::save_snapshot(&catalog, path) {
            error!(error = %e, "failed to save snapshot");
            return;
        }
        info!(path = %path.display(), "snapshot saved");
    }

    let recommender = Recommender::new(&catalog);

    if !args.genres.is_empty() || !args.tags.is_empty() {
        run_preference(&recommender, &args);
    } else if args.source_id.is_some() || args.source_title.is_some() {
        run_item(&recommender, &args);
    } else {
        run_interactive(&recommender);
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Option<CliArgs> {
    let mut data = None;
    let mut snapshot = None;
    let mut save_snapshot = None;
    let mut source_id = None;
    let mut source_title: Option<String> = None;
    let mut genres = Vec::new();
    let mut tags = Vec::new();
    let mut exclude_genres = Vec::new();
    let mut exclude_tags = Vec::new();
    let mut year_min = None;
    let mut year_max = None;
    let mut limit = None;
    let mut threshold = DEFAULT_THRESHOLD;
    let mut explain_target = None;
    let mut show_stats = false;
    let mut show_metrics = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data" => data = Some(PathBuf::from(take_value(&mut args, "--data")?)),
            "--snapshot" => snapshot = Some(PathBuf::from(take_value(&mut args, "--snapshot")?)),
            "--save-snapshot" => {
                save_snapshot = Some(PathBuf::from(take_value(&mut args, "--save-snapshot")?));
            }
            "--id" => source_id = Some(take_value(&mut args, "--id")?),
            "--title" => source_title = Some(take_value(&mut args, "--title")?),
            "--genres" => genres = split_labels(&take_value(&mut args, "--genres")?),
            "--tags" => tags = split_labels(&take_value(&mut args, "--tags")?),
            "--exclude-genres" => {
                exclude_genres = split_labels(&take_value(&mut args, "--exclude-genres")?);
            }
            "--exclude-tags" => {
                exclude_tags = split_labels(&take_value(&mut args, "--exclude-tags")?);
            }
            "--year-min" => {
                year_min = Some(parse_number(&take_value(&mut args, "--year-min")?, "--year-min")?);
            }
            "--year-max" => {
                year_max = Some(parse_number(&take_value(&mut args, "--year-max")?, "--year-max")?);
            }
            "--limit" => limit = Some(parse_number(&take_value(&mut args, "--limit")?, "--limit")?),
            "--threshold" => {
                threshold = parse_number(&take_value(&mut args, "--threshold")?, "--threshold")?;
            }
            "--explain" => explain_target = Some(take_value(&mut args, "--explain")?),
            "--stats" => show_stats = true,
            "--metrics" => show_metrics = true,
            "-h" | "--help" => {
                print_usage();
                return None;
            }
            other => {
                // A bare argument reads as the source title, once.
                if source_title.is_none() && !other.starts_with('-') {
                    source_title = Some(other.to_string());
                } else {
                    warn!(argument = other, "ignored argument");
                }
            }
        }
    }

    Some(CliArgs {
        data,
        snapshot,
        save_snapshot,
        source_id,
        source_title,
        genres,
        tags,
        exclude_genres,
        exclude_tags,
        year_min,
        year_max,
        limit,
        threshold,
        explain_target,
        show_stats,
        show_metrics,
    })
}

fn take_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Option<String> {
    let value = args.next();
    if value.is_none() {
        error!(flag, "flag needs a value");
    }
    value
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Option<T> {
    match value.parse() {
        Ok(number) => Some(number),
        Err(_) => {
            error!(flag, value, "flag needs a number");
            None
        }
    }
}

fn split_labels(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

fn print_usage() {
    eprintln!("Usage: manhwa-recommender [OPTIONS] [TITLE]");
    eprintln!();
    eprintln!("Catalog:");
    eprintln!("  --data PATH            load the catalog from a CSV export");
    eprintln!("  --snapshot PATH        load the catalog from a snapshot file");
    eprintln!("  --save-snapshot PATH   write the loaded catalog to a snapshot file");
    eprintln!();
    eprintln!("Query (pick one):");
    eprintln!("  --id ID                rank items similar to this item");
    eprintln!("  --title TEXT           like --id, resolved by title substring");
    eprintln!("  --genres A,B --tags C  rank items for a preference query");
    eprintln!();
    eprintln!("Filters (item queries only):");
    eprintln!("  --exclude-genres A,B   drop candidates carrying any of these genres");
    eprintln!("  --exclude-tags A,B     drop candidates carrying any of these tags");
    eprintln!("  --year-min N           drop candidates released before N");
    eprintln!("  --year-max N           drop candidates released after N");
    eprintln!();
    eprintln!("Output:");
    eprintln!("  --limit N              result count");
    eprintln!("  --explain TARGET_ID    print the full similarity report against one item");
    eprintln!("  --stats                print what each filter excludes");
    eprintln!("  --metrics              print the evaluation summary");
    eprintln!("  --threshold X          relevance threshold for --metrics (default 0.3)");
    eprintln!();
    eprintln!("With no query an interactive prompt starts. Results: <score>\\t<id>\\t<title>");
}

fn run_item(recommender: &Recommender<'_>, args: &CliArgs) {
    let Some(source_id) = resolve_source(recommender.catalog(), args) else {
        return;
    };

    if let Some(target_id) = &args.explain_target {
        match recommender.explain(&source_id, target_id) {
            Ok(report) => print_report(&report),
            Err(e) => error!(error = %e, "explain failed"),
        }
        return;
    }
    if args.show_metrics {
        match recommender.evaluate_all(&source_id, args.threshold) {
            Ok(summary) => print_summary(&summary),
            Err(e) => error!(error = %e, "evaluation failed"),
        }
        return;
    }

    let options = build_options(args);
    if args.show_stats {
        match recommender.filter_stats(&source_id, &options) {
            Ok(stats) => print_stats(&stats),
            Err(e) => error!(error = %e, "filter stats failed"),
        }
        return;
    }

    let started = Instant::now();
    let result = if args.has_filters() {
        recommender.recommend_filtered(&source_id, &options)
    } else {
        recommender.recommend(&source_id, options.limit)
    };
    match result {
        Ok(ranked) => {
            info!(
                source = %source_id,
                results = ranked.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "ranked"
            );
            print_ranked(&ranked);
        }
        Err(e) => error!(error = %e, "ranking failed"),
    }
}

fn run_preference(recommender: &Recommender<'_>, args: &CliArgs) {
    let query = PreferenceQuery::new(&args.genres, &args.tags);

    if args.show_metrics {
        print_summary(&recommender.evaluate_preference_all(&query, args.threshold));
        return;
    }
    if let Some(target_id) = &args.explain_target {
        match recommender.explain_preference(&query, target_id) {
            Ok(report) => print_report(&report),
            Err(e) => error!(error = %e, "explain failed"),
        }
        return;
    }

    let limit = args.limit.unwrap_or(DEFAULT_PREFERENCE_LIMIT);
    let ranked = recommender.recommend_for_preference(&query, limit);
    print_ranked(&ranked);
}

fn run_interactive(recommender: &Recommender<'_>) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("Title or id> ");
        let _ = stdout.flush();
        let mut line = String::new();
        if stdin.read_line(&mut line).is_err() {
            error!("read error");
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("exit")
            || trimmed.eq_ignore_ascii_case("quit")
        {
            break;
        }

        let catalog = recommender.catalog();
        let item = catalog
            .get(trimmed)
            .or_else(|| catalog.find_by_title(trimmed).into_iter().next());
        let Some(item) = item else {
            println!("(no such title or id)");
            continue;
        };

        let started = Instant::now();
        match recommender.recommend(&item.id, DEFAULT_ITEM_LIMIT) {
            Ok(ranked) => {
                info!(
                    source = %item.id,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "ranked"
                );
                print_ranked(&ranked);
            }
            Err(e) => error!(error = %e, "ranking failed"),
        }
    }
}

fn resolve_source(catalog: &Catalog, args: &CliArgs) -> Option<String> {
    if let Some(id) = &args.source_id {
        if catalog.get(id).is_none() {
            error!(id = %id, "no item with this id");
            return None;
        }
        return Some(id.clone());
    }
    let title = args.source_title.as_deref()?;
    let matches = catalog.find_by_title(title);
    match matches.len() {
        0 => {
            error!(title, "no item matches this title");
            None
        }
        1 => Some(matches[0].id.clone()),
        count => {
            warn!(title, count, "title is ambiguous, using the first match");
            Some(matches[0].id.clone())
        }
    }
}

fn build_options(args: &CliArgs) -> RecommendOptions {
    let mut options = RecommendOptions::default()
        .with_year_range(args.year_min, args.year_max)
        .with_limit(args.limit.unwrap_or(DEFAULT_ITEM_LIMIT));
    options.exclude_genres = args.exclude_genres.clone();
    options.exclude_tags = args.exclude_tags.clone();
    options
}

fn print_ranked(ranked: &[Scored<'_>]) {
    if ranked.is_empty() {
        println!("(no results)");
        return;
    }
    for scored in ranked {
        println!("{:.4}\t{}\t{}", scored.score, scored.item.id, scored.item.title);
    }
}

fn print_section(label: &str, section: &TfidfSection) {
    println!("-- {label} --");
    for weight in section.genres.iter().chain(section.tags.iter()) {
        println!(
            "{:<24} tf={:.4} idf={:+.4} tfidf={:+.6}",
            weight.term, weight.tf, weight.idf, weight.tfidf
        );
    }
}

fn print_report(report: &SimilarityReport) {
    print_section("source tf-idf", &report.source_tfidf);
    print_section("target tf-idf", &report.target_tfidf);

    println!("-- vector positions with weight --");
    for row in report.vector_table.iter().filter(|row| row.has_value) {
        println!(
            "{:<24} {:>10.6} {:>10.6}",
            row.term, row.source_value, row.target_value
        );
    }

    println!("-- cosine --");
    println!("dot product       {:.6}", report.cosine.score.dot_product);
    println!("source magnitude  {:.6}", report.cosine.score.source_magnitude);
    println!("target magnitude  {:.6}", report.cosine.score.target_magnitude);
    println!("similarity        {:.6}", report.cosine.similarity());

    if let Some(factors) = &report.factors {
        println!("-- factors --");
        for (label, factor) in [
            ("art style", factors.art_style),
            ("status", factors.status),
            ("year proximity", factors.year_proximity),
            ("rating proximity", factors.rating_proximity),
        ] {
            println!(
                "{:<17} {:.2} x {:.2} = {:+.4}",
                label,
                factor.score,
                factor.weight,
                factor.contribution()
            );
        }
    }
    println!("final score       {:.6}", report.final_score);

    let evaluation = &report.evaluation;
    println!("-- evaluation (threshold {:.2}) --", evaluation.threshold);
    println!("predicted relevant  {}", evaluation.predicted_relevant);
    println!("actually relevant   {}", evaluation.actually_relevant);
    println!(
        "tp={} fp={} tn={} fn={}",
        evaluation.confusion.true_positive,
        evaluation.confusion.false_positive,
        evaluation.confusion.true_negative,
        evaluation.confusion.false_negative
    );
}

fn print_summary(summary: &EvaluationSummary) {
    println!("pairs      {}", summary.pairs);
    println!(
        "tp={} fp={} tn={} fn={}",
        summary.confusion.true_positive,
        summary.confusion.false_positive,
        summary.confusion.true_negative,
        summary.confusion.false_negative
    );
    println!("precision  {:.4}", summary.precision);
    println!("recall     {:.4}", summary.recall);
    println!("accuracy   {:.4}", summary.accuracy);
    println!("f1 score   {:.4}", summary.f1_score);
}

fn print_stats(stats: &FilterStats) {
    println!("candidates         {}", stats.candidates);
    println!("excluded by genre  {}", stats.excluded_by_genre);
    println!("excluded by tag    {}", stats.excluded_by_tag);
    println!("excluded by year   {}", stats.excluded_by_year);
    println!("excluded total     {}", stats.excluded_total);
    println!("remaining          {}", stats.remaining);
    println!("excluded           {:.1}%", stats.excluded_percentage);
}
