use std::path::PathBuf;
use std::process::ExitCode;

use blockpop_engine::log;
use blockpop_engine::logger;
use blockpop_engine::palette::ColorPalette;
use blockpop_engine::session::BlockPopSession;
use blockpop_engine::session_rng::SessionRng;
use blockpop_engine::settings::GameSettings;
use blockpop_engine::types::{GameEvent, GameStatus};
use clap::Parser;

/// Headless playout driver: builds a session, keeps selecting a valid
/// group until the level settles or moves run out, and logs every event
/// the engine emits.
#[derive(Parser)]
#[command(name = "blockpop_cli")]
struct Args {
    /// Reproducible playout seed; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// YAML settings file; missing fields fall back to defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    rows: Option<usize>,

    #[arg(long)]
    columns: Option<usize>,

    #[arg(long)]
    colors: Option<u8>,

    /// Stop after this many selections even if the level is unresolved.
    #[arg(long, default_value_t = 200)]
    max_moves: u32,

    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Sim".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    let settings = load_settings(args)?;
    let seed = args.seed.unwrap_or_else(|| SessionRng::from_random().seed());
    let palette = ColorPalette::with_color_count(settings.number_of_colors);

    let mut session = BlockPopSession::new(settings, palette, seed)?;
    log!(
        "Starting playout: seed {}, {}x{} board, {} colors, target {}",
        seed,
        session.state().settings().rows,
        session.state().settings().columns,
        session.state().settings().number_of_colors,
        session.target_score()
    );

    for move_number in 1..=args.max_moves {
        if session.status() != GameStatus::InProgress {
            break;
        }
        let Some(position) = session.find_any_move() else {
            log!("No move available and no shuffle pending, stopping");
            break;
        };

        let Some(removal) = session.play(position) else {
            break;
        };
        log!(
            "Move {}: removed {} blocks of color {} at ({}, {}) for {} points",
            move_number,
            removal.size(),
            removal.color,
            position.row,
            position.column,
            removal.points
        );
        for event in session.take_events() {
            log_event(&event);
        }
    }

    log!(
        "Finished: status {:?}, score {}/{}, {} moves left",
        session.status(),
        session.score(),
        session.target_score(),
        session.moves_left()
    );
    Ok(())
}

fn load_settings(args: &Args) -> Result<GameSettings, String> {
    let mut settings = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
            serde_yaml_ng::from_str(&content)
                .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?
        }
        None => GameSettings::default(),
    };

    if let Some(rows) = args.rows {
        settings.rows = rows;
    }
    if let Some(columns) = args.columns {
        settings.columns = columns;
    }
    if let Some(colors) = args.colors {
        settings.number_of_colors = colors;
    }

    Ok(settings)
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::GroupRemoved { removal } => {
            log!("  event: removed group of {}", removal.size());
        }
        GameEvent::BlocksFell { movements } => {
            log!("  event: {} blocks moved or spawned", movements.len());
        }
        GameEvent::DeadlockDetected => {
            log!("  event: deadlock detected");
        }
        GameEvent::BoardShuffled { result } => {
            log!(
                "  event: board shuffled in {} attempt(s), {} placements",
                result.attempts,
                result.placements.len()
            );
        }
        GameEvent::ShuffleExhausted { attempts } => {
            log!("  event: shuffle gave up after {} attempts", attempts);
        }
        GameEvent::LevelFinished { status, score } => {
            log!("  event: level finished {:?} with score {}", status, score);
        }
    }
}
