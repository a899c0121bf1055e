use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use repo_discovery::config::Config;
use repo_discovery::filters::{FilterState, RecencyWindow, SortKey};
use repo_discovery::search::rank::{Direction, RankKey};
use repo_discovery::state::{SearchOutcome, SearchSession};
use repo_discovery::view::{compose_cards, ResultCard};

/// Search code-hosting repositories with facet filters.
#[derive(Debug, Parser)]
#[command(name = "repo-discovery", version)]
struct Cli {
    /// Free-text search term
    query: String,

    /// Restrict to a language; repeat to require several
    #[arg(short, long = "language")]
    languages: Vec<String>,

    /// Minimum star count
    #[arg(long, default_value_t = 0)]
    min_stars: u64,

    /// Created within: any, week, month, year
    #[arg(long, default_value = "any")]
    created: RecencyWindow,

    /// Remote sort: stars, forks, updated, created
    #[arg(long, default_value = "stars")]
    sort: SortKey,

    /// Client-side ordering: stars, forks, name, updated
    #[arg(long, default_value = "stars")]
    rank: RankKey,

    /// Client-side direction: asc, desc
    #[arg(long, default_value = "desc")]
    order: Direction,

    /// Print the session snapshot as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    tracing::info!("Search endpoint: {}", config.endpoint);

    let filters = FilterState {
        languages: cli.languages.into_iter().collect(),
        min_popularity: cli.min_stars,
        recency_window: cli.created,
        sort_key: cli.sort,
    };

    let session = SearchSession::new(&config)?.with_filters(filters);
    session.resort(cli.rank, cli.order);

    let outcome = session.search(&cli.query).await?;
    let snapshot = session.snapshot();

    if cli.json {
        let out = serde_json::to_string_pretty(&snapshot).context("Failed to encode results")?;
        println!("{out}");
        return Ok(());
    }

    if outcome == SearchOutcome::Degraded || snapshot.results.is_empty() {
        println!("No results found for \"{}\"", snapshot.query);
        return Ok(());
    }

    println!(
        "Results for \"{}\" ({})",
        snapshot.query,
        snapshot.results.len()
    );
    let languages: Vec<String> = snapshot
        .languages
        .iter()
        .map(|l| format!("{} ({})", l.language, l.count))
        .collect();
    println!("Languages: {}\n", languages.join(", "));

    for (i, card) in compose_cards(&snapshot.results, Utc::now()).iter().enumerate() {
        print_card(i + 1, card);
    }

    Ok(())
}

fn print_card(position: usize, card: &ResultCard) {
    let trending = if card.trending { "  [trending]" } else { "" };
    println!(
        "{position:>2}. {}  stars {}  forks {}  {}  {}% match{trending}",
        card.full_name, card.stars, card.forks, card.language, card.match_percent
    );
    println!("    {}", card.description);
    match &card.updated {
        Some(updated) => println!("    {}  (updated {updated})", card.url),
        None => println!("    {}", card.url),
    }
    println!();
}
