use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use grid_pursuit::config::{engine_options, resolve_level_path};
use grid_pursuit::engine::TurnEngine;
use grid_pursuit::error::GameError;
use grid_pursuit::level::load_level;
use grid_pursuit::logging::init_tracing;
use grid_pursuit::state::GameState;
use grid_pursuit::types::{MoveResult, Outcome};
use tracing::{error, info, warn};

/// Plays one session in the terminal. Each input line is a direction:
/// up/left/down/right or w/a/s/d. `q` quits.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long)]
    level: Option<PathBuf>,
    #[arg(long)]
    strategy: Option<String>,
    #[arg(long)]
    step_budget: Option<usize>,
    /// Print the final snapshot and summary as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(error) = run(&cli) {
        error!(%error, "session aborted");
        std::process::exit(2);
    }
}

fn run(cli: &Cli) -> Result<(), GameError> {
    let level_path = resolve_level_path(cli.level.clone());
    let rows = load_level(level_path.as_deref())?;
    let options = engine_options(cli.strategy.as_deref(), cli.step_budget)?;
    let mut engine = TurnEngine::from_level(&rows, options)?;
    info!(strategy = options.strategy.name(), "session started");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    play_session(&mut engine, stdin.lock(), &mut stdout)?;

    if cli.json {
        let report = serde_json::json!({
            "snapshot": engine.state().snapshot(),
            "summary": engine.state().summary(),
        });
        writeln!(stdout, "{report}").map_err(GameError::Terminal)?;
    }
    Ok(())
}

fn play_session(
    engine: &mut TurnEngine,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), GameError> {
    print_board(out, engine.state())?;

    for line in input.lines() {
        let line = line.map_err(GameError::Terminal)?;
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        if matches!(token, "q" | "quit") {
            break;
        }

        match play_token(engine, token) {
            Ok(Some(outcome)) if outcome.is_terminal() => break,
            Ok(_) => {}
            Err(GameError::InvalidDirection(token)) => {
                warn!(%token, "unrecognized direction; use up/left/down/right or w/a/s/d");
                continue;
            }
            Err(error) => return Err(error),
        }
        print_board(out, engine.state())?;
    }

    if let Some(summary) = engine.state().summary() {
        print_board(out, engine.state())?;
        writeln!(out, "{}", outcome_banner(summary.outcome)).map_err(GameError::Terminal)?;
    }
    Ok(())
}

// One seeker move followed by the chaser pass, if the move went through.
fn play_token(engine: &mut TurnEngine, token: &str) -> Result<Option<Outcome>, GameError> {
    match engine.apply_seeker_token(token)? {
        MoveResult::Moved(_) => engine.advance_chasers_default(),
        MoveResult::Blocked | MoveResult::NotYourTurn => Ok(None),
    }
}

fn render_board(state: &GameState) -> String {
    let items = state.items();
    let mut out = state.grid().render_rows().join("\n");
    out.push_str(&format!(
        "\nitems {}/{}  turn {}",
        items.total - items.remaining,
        items.total,
        state.turn()
    ));
    out
}

fn print_board(out: &mut impl Write, state: &GameState) -> Result<(), GameError> {
    writeln!(out, "{}\n", render_board(state)).map_err(GameError::Terminal)
}

fn outcome_banner(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Won => "You win! Every item was collected.",
        Outcome::Captured => "Game over! The seeker was caught.",
        Outcome::Continue => "",
    }
}
