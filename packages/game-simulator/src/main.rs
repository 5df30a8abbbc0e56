//! Game simulator CLI - plays many games back to back with no roll delay.
//!
//! Writes per-game metrics and a CSV summary, and optionally prints the
//! win-rate table accumulated over the run.

mod metrics;
mod output;
mod simulator;
mod types;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use dice_night::domain::{default_roster, PlayerStatistics};
use metrics::{build_game_metrics, RunConfig};
use output::OutputWriter;
use simulator::{SimulatedGame, Simulator};
use tracing::{debug, info, warn};
use types::OutputFormat;

#[derive(Parser)]
#[command(name = "game-simulator")]
#[command(about = "Headless batch simulator for dice night")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Base seed; each game's dice are seeded from it and the game number
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: PathBuf,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress the detail file
    #[arg(long)]
    compress: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default, only warnings and errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let base_seed = args.seed.unwrap_or_else(rand::random);
    info!(games = args.games, base_seed, "starting simulator");

    let mut output_writer = OutputWriter::new(&args.output_dir, args.output_format, args.compress)?;
    let roster = default_roster();
    let mut simulator = Simulator::new(roster.clone(), base_seed);

    let start = Instant::now();
    let mut results: Vec<SimulatedGame> = Vec::new();
    let mut errors = 0;

    for game_no in 1..=args.games {
        let game_start = Instant::now();
        match simulator.simulate_game(game_no) {
            Ok(game) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let config = RunConfig {
                    roster: roster.clone(),
                    base_seed,
                    total_games: args.games,
                };
                let metrics = build_game_metrics(game_no, config, &game, duration_ms);
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {game_no}: {e}");
                }
                debug!(game_no, winners = ?game.result.winners, "game completed");
                results.push(game);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {game_no} failed: {e}");
            }
        }
    }

    let elapsed = start.elapsed();
    let (detail_path, csv_path) = output_writer.output_paths();
    let (detail_path, csv_path) = (detail_path.to_path_buf(), csv_path.to_path_buf());
    output_writer.finish()?;

    if args.show_output {
        info!("Detailed results written to: {}", detail_path.display());
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&results, simulator.stats(), errors, elapsed, args.games);
    }

    Ok(())
}

fn print_summary(
    results: &[SimulatedGame],
    stats: &PlayerStatistics,
    errors: u32,
    elapsed: Duration,
    total: u32,
) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {errors}");
    }
    println!("Total time: {elapsed:?}");
    if results.is_empty() {
        return;
    }
    println!(
        "Average time per game: {:?}",
        elapsed / results.len() as u32
    );
    let ties = results.iter().filter(|g| g.result.winners.len() > 1).count();
    println!("Tied games: {ties}");

    println!("\n=== Results by Player ===");
    for (name, record) in stats.iter() {
        let scores: Vec<u16> = results
            .iter()
            .filter_map(|g| g.result.final_rankings.iter().find(|s| s.name == name))
            .map(|s| s.score)
            .collect();
        let avg = scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len().max(1) as f64;
        println!(
            "{name}: avg={avg:.1}, min={}, max={}, 勝率: {}% ({}/{})",
            scores.iter().min().copied().unwrap_or(0),
            scores.iter().max().copied().unwrap_or(0),
            record.win_rate(),
            record.wins,
            record.games_played
        );
    }
}
