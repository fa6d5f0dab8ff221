use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use radiodial_lib::{
    modules::archive::{AudioResponse, Direction, SiblingCursor},
    shared::{utils::init_logger, ArchiveConfig, SelectionMode},
    RadioService,
};

#[derive(Parser, Debug)]
#[command(name = "radiodial", about = "Tune across decades of archival audio")]
struct CliArgs {
    /// Cache directory (overrides ARCHIVE_CACHE_DIR)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Pick a random candidate instead of the first one
    #[arg(long, global = true)]
    surprise: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the years that have audio
    Years,
    /// Fetch audio for a year
    Year {
        year: i32,
        /// Title hint, percent-encoded or plain
        #[arg(long)]
        hint: Option<String>,
        /// Also warm the cache for the neighbouring years
        #[arg(long)]
        prefetch: bool,
        /// Follow the result to the next sibling recording
        #[arg(long)]
        next: bool,
    },
    /// Fetch audio for an item URL, UID or slug
    Id {
        identifier: String,
        /// Also print the dial's years, including the item's own year
        #[arg(long)]
        years: bool,
    },
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render response")?;
    println!("{}", rendered);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();

    let args = CliArgs::parse();
    let mut config = ArchiveConfig::from_env().context("Invalid ARCHIVE_* configuration")?;
    if args.cache_dir.is_some() {
        config.cache_dir = args.cache_dir;
    }
    if args.surprise {
        config.selection_mode = SelectionMode::Random;
    }

    let service = RadioService::from_config(&config)
        .await
        .context("Could not start the radio service")?;

    match args.command {
        Command::Years => print_json(&service.fetch_available_years().await)?,
        Command::Year {
            year,
            hint,
            prefetch,
            next,
        } => {
            let result = service.fetch_audio_by_year(year, hint.as_deref()).await;

            let prefetching = if prefetch {
                let years = service.fetch_available_years_including(year).await.years;
                Some(service.prefetch_adjacent(year, &years))
            } else {
                None
            };

            let mut cursor = SiblingCursor::from_result(&result);
            print_json(&AudioResponse::from(result))?;

            if next {
                match service.fetch_sibling(&mut cursor, Direction::Next).await {
                    Some(sibling) => print_json(&AudioResponse::from(sibling))?,
                    None => log::info!("No further recordings for {}", year),
                }
            }

            if let Some(handle) = prefetching {
                handle.await.context("Prefetch task failed")?;
            }
        }
        Command::Id { identifier, years } => {
            if years {
                let (result, dial) = service.fetch_item_with_years(&identifier).await;
                print_json(&AudioResponse::from(result))?;
                print_json(&dial)?;
            } else {
                print_json(&AudioResponse::from(
                    service.fetch_audio_by_id(&identifier).await,
                ))?;
            }
        }
    }

    let stats = service.cache().stats();
    log::debug!(
        "Cache: {} hits, {} misses, {} entries",
        stats.hits,
        stats.misses,
        stats.entries
    );
    Ok(())
}
