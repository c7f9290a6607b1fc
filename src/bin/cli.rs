//! HowLongToBeat search CLI
//!
//! Thin collaborator around the library: searches a title and prints
//! the reported completion times per candidate.

use std::path::PathBuf;

use clap::Parser;
use hltb_client::{
    error::Result, models::ClientConfig, services::SearchClient, utils::duration::format_seconds,
};

/// hltb - HowLongToBeat search client
#[derive(Parser, Debug)]
#[command(
    name = "hltb",
    version,
    about = "Look up time-to-beat statistics for a game"
)]
struct Cli {
    /// Game title to search for
    #[arg(required = true)]
    title: Vec<String>,

    /// Print candidates as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Path to an optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => ClientConfig::load_or_default(path),
        None => ClientConfig::default(),
    };
    config.validate()?;

    let title = cli.title.join(" ");
    let client = SearchClient::new(&config)?;

    log::info!("Searching for '{}'...", title);
    let candidates = client.search(&title).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    if candidates.is_empty() {
        println!("No results found for '{}'.", title);
        return Ok(());
    }

    for candidate in &candidates {
        println!("{} (id {})", candidate.name, candidate.game_id);

        if !candidate.has_data() {
            println!("    no reported times");
            continue;
        }

        print_stat("Main Story", candidate.main_story_seconds);
        print_stat("Main + Extra", candidate.main_extra_seconds);
        print_stat("Completionist", candidate.completionist_seconds);
        print_stat("Solo", candidate.solo_seconds);
        print_stat("Co-Op", candidate.co_op_seconds);
        print_stat("Vs.", candidate.vs_seconds);
    }

    Ok(())
}

/// Print one statistic row, skipping categories the site left empty.
fn print_stat(label: &str, seconds: u64) {
    if seconds > 0 {
        println!("    {:<14} {}", label, format_seconds(seconds));
    }
}
