//! tweet-sweep - Delete tweets older than a given date

use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Parser;
use libtweetsweep::archive::{read_archive, resolve_archive_path};
use libtweetsweep::filter::{parse_cutoff_date, select_expired};
use libtweetsweep::logging::LoggingConfig;
use libtweetsweep::platforms::twitter::TwitterClient;
use libtweetsweep::prompt::confirm_deletion;
use libtweetsweep::{Config, Cutoff, Result, Sweeper};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "tweet-sweep")]
#[command(version, about = "Delete tweets older than a specified date")]
#[command(long_about = r#"Delete tweets older than a specified date, using the tweet.js file from your Twitter archive.

EXAMPLES:
    # Delete everything posted before 2022
    tweet-sweep -d 2022-01-01

    # Point at the unzipped archive folder instead of tweet.js
    tweet-sweep -d 2022-01-01 --archive ~/Downloads/twitter-2024-05-01

    # See what would go, without touching anything
    tweet-sweep -d 2022-01-01 --dry-run

CREDENTIALS:
    Put your API keys in ~/.config/tweet-sweep/config.toml:

        [twitter]
        consumer_key = "..."
        consumer_secret = "..."
        access_token = "..."
        access_token_secret = "..."

    or export TWEETSWEEP_CONSUMER_KEY, TWEETSWEEP_CONSUMER_SECRET,
    TWEETSWEEP_ACCESS_TOKEN and TWEETSWEEP_ACCESS_TOKEN_SECRET.

EXIT CODES:
    0 - Success, nothing to delete, or cancelled at the prompt
    1 - Error (configuration, archive, or API failure)
    2 - Invalid arguments or rejected credentials
"#)]
struct Cli {
    /// Delete tweets older than this date (YYYY-MM-DD)
    #[arg(short = 'd', long = "date", value_name = "YYYY-MM-DD", value_parser = parse_cutoff_date)]
    date: NaiveDate,

    /// Path to tweet.js, or to the unzipped archive folder
    #[arg(short, long, value_name = "PATH")]
    archive: Option<PathBuf>,

    /// Config file (default: $TWEETSWEEP_CONFIG or ~/.config/tweet-sweep/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// List the tweets that would be deleted, without deleting anything
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    LoggingConfig::from_env("warn", cli.verbose).init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cutoff = Cutoff::from_date(cli.date);
    let config = Config::load(cli.config.as_deref())?;

    let archive_path = resolve_archive_path(
        cli.archive
            .as_deref()
            .unwrap_or_else(|| Path::new(&config.archive.path)),
    );

    if cli.dry_run {
        return dry_run(&archive_path, &cutoff);
    }

    let confirmed = confirm_deletion(&mut io::stdin().lock(), &mut io::stdout(), &cutoff)?;
    if !confirmed {
        println!("Exiting");
        return Ok(());
    }

    let client = TwitterClient::from_config(&config)?;

    let entries = read_archive(&archive_path)?;
    let targets = select_expired(&entries, &cutoff)?;

    if targets.is_empty() {
        println!(
            "No tweets older than {} in {}",
            cutoff.long_label(),
            archive_path.display()
        );
        return Ok(());
    }

    info!(
        "{} of {} tweet(s) are older than {}",
        targets.len(),
        entries.len(),
        cutoff.date()
    );

    let mut sweeper = Sweeper::from_config(client, &config.api);
    sweeper.authenticate().await?;

    let summary = sweeper
        .run(&targets, entries.len(), &mut io::stdout())
        .await?;
    summary.display();

    Ok(())
}

fn dry_run(archive_path: &Path, cutoff: &Cutoff) -> Result<()> {
    let entries = read_archive(archive_path)?;
    let targets = select_expired(&entries, cutoff)?;

    for tweet in &targets {
        println!(
            "Would delete tweet from {}: {}",
            tweet.date_label(),
            tweet.text
        );
    }

    println!(
        "{} of {} tweet(s) are older than {}",
        targets.len(),
        entries.len(),
        cutoff.long_label()
    );

    Ok(())
}
