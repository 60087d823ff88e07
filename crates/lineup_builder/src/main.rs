//! Lineup Builder CLI
//!
//! play-by-play CSV → on-court lineup CSV

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "lineup_builder")]
#[command(about = "Reconstruct on-court lineups from play-by-play CSV logs", long_about = None)]
struct Cli {
    /// Config JSON (falls back to $LINEUP_CONFIG_PATH, then defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Build the on-court CSV for every game and period
    OnCourt {
        /// General play-by-play CSV
        #[arg(long)]
        pbp: PathBuf,

        /// Player-indexed play-by-play CSV
        #[arg(long)]
        players: PathBuf,

        /// Output CSV file path
        #[arg(long)]
        out: PathBuf,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,

        /// Abort on the first malformed period instead of skipping it
        #[arg(long, default_value = "false")]
        fail_fast: bool,
    },

    /// Print resolved starting lineups for one game
    Starters {
        #[arg(long)]
        pbp: PathBuf,

        #[arg(long)]
        players: PathBuf,

        /// Game id (event_id)
        #[arg(long)]
        game: u64,

        /// Only this period
        #[arg(long)]
        period: Option<u16>,
    },
}

#[cfg(feature = "cli")]
fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = lineup_builder::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::OnCourt {
            pbp,
            players,
            out,
            metadata,
            fail_fast,
        } => {
            println!("🏀 Reconstructing on-court lineups...");
            println!("   Plays:   {}", pbp.display());
            println!("   Players: {}", players.display());
            println!("   Output:  {}", out.display());

            let paths = lineup_builder::RunPaths {
                pbp_csv: pbp,
                players_csv: players,
                out_csv: out,
            };
            let meta = lineup_builder::build_on_court(&paths, &config, fail_fast)?;

            print_metadata(&meta);

            if let Some(metadata_path) = metadata {
                save_metadata(&metadata_path, &meta)?;
            }
        }

        Commands::Starters {
            pbp,
            players,
            game,
            period,
        } => {
            let reports = lineup_builder::game_starters(&pbp, &players, game, period, &config)?;
            for report in reports {
                let tag = report
                    .play_id
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{} (play {}): {} starters {:?}",
                    report.key,
                    tag,
                    report.players.len(),
                    report.players
                );
                for warning in &report.warnings {
                    println!("   ⚠️  {}", warning);
                }
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_metadata(meta: &lineup_builder::RunMetadata) {
    println!("\n✅ Lineups written!");
    println!("   Games:          {}", meta.summary.games);
    println!("   Periods:        {}", meta.summary.periods);
    println!("   Failed periods: {}", meta.summary.periods_failed);
    println!("   Rows written:   {}", meta.rows_written);
    println!("   Warnings:       {}", meta.summary.warnings);
    println!(
        "   Rows skipped:   {} (plays) / {} (players)",
        meta.events_loaded.failed, meta.players_loaded.failed
    );
    println!("   Checksum:       {}", meta.checksum);
    println!("   Created:        {}", meta.created_at);
    for skipped in &meta.skipped_periods {
        println!(
            "   ⚠️  game {} period {} skipped: {}",
            skipped.event_id, skipped.period, skipped.error
        );
    }
}

#[cfg(feature = "cli")]
fn save_metadata(path: &PathBuf, meta: &lineup_builder::RunMetadata) -> Result<()> {
    let metadata_json = serde_json::to_string_pretty(meta)?;
    std::fs::write(path, metadata_json)?;
    println!("\n📄 Metadata saved to: {}", path.display());
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("lineup_builder CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
