// Batting board entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, keep stdout for the table)
// 2. Load config
// 3. Fetch the combined dataset through the TTL cache
// 4. Apply the configured level/handedness/date filters
// 5. Aggregate per-batter summaries for the configured team
// 6. Print the summary table

use batting_board::cache::DatasetCache;
use batting_board::config;
use batting_board::fetch::GithubSource;
use batting_board::filter::{self, FilterSelection};
use batting_board::stats::aggregate::aggregate;
use batting_board::stats::rates::ObpFormula;
use batting_board::table;

use anyhow::Context;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("Batting board starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {}/{} ({}) folder '{}', team {}",
        config.github.owner,
        config.github.repo,
        config.github.branch,
        config.github.folder_path,
        config.report.team
    );

    // 3. Fetch the combined dataset through the TTL cache. A fresh process
    //    starts with an empty cache, so a one-shot run always fetches; the
    //    TTL takes effect when the cache outlives a single invocation, e.g.
    //    in a resident process recomputing across filter changes.
    let mut cache = DatasetCache::new(Duration::from_secs(config.cache_ttl_secs));
    let cached = cache.get().map(|events| events.to_vec());
    let events = match cached {
        Some(events) => events,
        None => {
            let source =
                GithubSource::from_config(&config).context("failed to build GitHub source")?;
            let fetched = source
                .load_events()
                .await
                .context("failed to fetch event data")?;
            cache.store(fetched.clone());
            fetched
        }
    };
    info!("Dataset ready: {} events", events.len());

    // 4. Apply configured filters
    let selection = FilterSelection::from_config(&config.filters);
    let filtered = selection
        .apply(&events)
        .context("invalid filter selection")?;
    if filtered.is_empty() {
        println!("No events match the current filters.");
        return Ok(());
    }
    if let Some((min, max)) = filter::date_bounds(&filtered) {
        info!("Filtered dataset covers {} to {}", min, max);
    }

    // 5. Aggregate per-batter summaries
    let formula = ObpFormula::from_flag(config.report.include_hit_by_pitch);
    let summaries = aggregate(&filtered, &config.report.team, formula);
    info!("Aggregated {} batters", summaries.len());

    // 6. Print the summary table
    if summaries.is_empty() {
        println!("No batters for team {} in the filtered data.", config.report.team);
        return Ok(());
    }
    print!("{}", table::render(&summaries));

    Ok(())
}

/// Initialize tracing to log to a file, keeping stdout clean for the table.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("batboard.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("batting_board=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
