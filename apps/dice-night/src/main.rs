use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use dice_night::config::{GameConfig, LogFormat};
use dice_night::domain::{default_roster, SeededDice};
use dice_night::presentation::commands::HELP;
use dice_night::presentation::{run_presenter, Command, OutputMode};
use dice_night::{spawn_table, telemetry, AppError, GameTable};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "dice-night")]
#[command(about = "Three players, five rounds, highest total wins")]
struct Args {
    /// Seed for the dice (overrides DICE_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Delay between a roll starting and resolving, in ms (overrides DICE_ROLL_DELAY_MS)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Print events as JSON lines instead of text
    #[arg(long)]
    json: bool,

    /// Log format: pretty or json (overrides DICE_LOG_FORMAT)
    #[arg(long)]
    log_format: Option<String>,
}

fn build_config(args: &Args) -> Result<GameConfig, AppError> {
    let mut config = GameConfig::from_env()?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(ms) = args.delay_ms {
        config.roll_delay = Duration::from_millis(ms);
    }
    if let Some(format) = &args.log_format {
        config.log_format = format.parse::<LogFormat>()?;
    }
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };
    telemetry::init_tracing(config.log_format);

    match run(config, args.json).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: GameConfig, json: bool) -> Result<(), AppError> {
    let dice = SeededDice::new(config.seed);
    info!(
        seed = ?dice.seed(),
        delay_ms = config.roll_delay.as_millis() as u64,
        "opening table"
    );
    let table = GameTable::new(&default_roster(), dice)?;

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (handle, table_task) = spawn_table(table, config.roll_delay, events_tx);

    let mode = if json {
        OutputMode::JsonLines
    } else {
        OutputMode::Text
    };
    let presenter = tokio::spawn(run_presenter(events_rx, mode, tokio::io::stdout()));

    if !json {
        eprintln!("{HELP}");
    }
    handle.start_game().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let result = match Command::parse(&line) {
            Some(Command::Roll) => handle.roll_for_current_turn().await,
            Some(Command::Reset) => handle.reset_game().await.map(|_| ()),
            Some(Command::Help) => {
                eprintln!("{HELP}");
                Ok(())
            }
            Some(Command::Quit) => break,
            None => {
                eprintln!("unknown command: {}", line.trim());
                Ok(())
            }
        };
        match result {
            Err(e) if e.is_ignorable() => debug!(error = %e, "command ignored"),
            other => other?,
        }
    }

    // Closing the last handle lets an in-flight roll land, then the events
    // channel closes and the presenter drains.
    drop(handle);
    let table = table_task
        .await
        .map_err(|e| AppError::internal(format!("table task failed: {e}")))?;
    presenter
        .await
        .map_err(|e| AppError::internal(format!("presenter task failed: {e}")))??;

    for (name, record) in table.stats().iter() {
        info!(
            player = name,
            wins = record.wins,
            games = record.games_played,
            "final record"
        );
    }
    Ok(())
}
