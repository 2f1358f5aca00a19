use clap::Parser;
use grid_pursuit::config::{engine_options, resolve_level_path};
use grid_pursuit::constants::{DEFAULT_SIM_MAX_TURNS, DEFAULT_SIM_SESSIONS, TICK_MS};
use grid_pursuit::engine::TurnEngine;
use grid_pursuit::error::GameError;
use grid_pursuit::level::load_level;
use grid_pursuit::logging::init_tracing;
use grid_pursuit::pathfinding::greedy_best_first;
use grid_pursuit::rng::Rng;
use grid_pursuit::types::{Direction, Occupant, Outcome, Strategy, Tile};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info, warn};

const ITEM_SEEK_PROBABILITY: f32 = 0.7;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long)]
    level: Option<PathBuf>,
    #[arg(long)]
    strategy: Option<String>,
    #[arg(long)]
    step_budget: Option<usize>,
    #[arg(long)]
    sessions: Option<usize>,
    #[arg(long)]
    seed: Option<u32>,
    #[arg(long)]
    max_turns: Option<u64>,
    #[arg(long)]
    match_id: Option<String>,
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum SessionEndReason {
    Won,
    Captured,
    TurnLimit,
    Stuck,
}

impl SessionEndReason {
    fn key(self) -> String {
        match self {
            Self::Won => "won",
            Self::Captured => "captured",
            Self::TurnLimit => "turn_limit",
            Self::Stuck => "stuck",
        }
        .to_string()
    }
}

#[derive(Clone, Debug, Serialize)]
struct SessionResultLine {
    session: usize,
    seed: u32,
    strategy: Strategy,
    reason: SessionEndReason,
    turns: u64,
    #[serde(rename = "seekerMoves")]
    seeker_moves: u64,
    #[serde(rename = "itemsCollected")]
    items_collected: u32,
    #[serde(rename = "itemsTotal")]
    items_total: u32,
    #[serde(rename = "durationMs")]
    duration_ms: u64,
    anomalies: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
struct AnomalyRecord {
    turn: u64,
    message: String,
}

#[derive(Clone, Debug)]
struct SessionRunResult {
    result: SessionResultLine,
    anomaly_records: Vec<AnomalyRecord>,
}

#[derive(Clone, Debug, Serialize)]
struct RunSummary {
    #[serde(rename = "matchId")]
    match_id: String,
    #[serde(rename = "generatedAt")]
    generated_at: String,
    #[serde(rename = "startedAtMs")]
    started_at_ms: u64,
    #[serde(rename = "finishedAtMs")]
    finished_at_ms: u64,
    #[serde(rename = "sessionCount")]
    session_count: usize,
    #[serde(rename = "anomalyCount")]
    anomaly_count: usize,
    #[serde(rename = "averageTurns")]
    average_turns: u64,
    #[serde(rename = "reasonCounts")]
    reason_counts: BTreeMap<String, usize>,
    sessions: Vec<SessionResultLine>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(error) = run(&cli) {
        error!(%error, "simulation aborted");
        std::process::exit(2);
    }
}

fn run(cli: &Cli) -> Result<(), GameError> {
    let level_path = resolve_level_path(cli.level.clone());
    let rows = load_level(level_path.as_deref())?;
    let options = engine_options(cli.strategy.as_deref(), cli.step_budget)?;
    // Validate once so a bad level fails before any session starts.
    TurnEngine::from_level(&rows, options)?;

    let base_seed = cli.seed.unwrap_or_else(rand::random::<u32>);
    let sessions = cli.sessions.unwrap_or(DEFAULT_SIM_SESSIONS).max(1);
    let max_turns = cli.max_turns.unwrap_or(DEFAULT_SIM_MAX_TURNS).max(1);
    let run_started_at_ms = now_ms();
    let match_id = cli
        .match_id
        .clone()
        .unwrap_or_else(|| default_match_id(base_seed, run_started_at_ms));

    let mut has_anomaly = false;
    let mut session_results = Vec::new();
    let mut reason_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut total_turns = 0u64;
    let mut total_anomalies = 0usize;

    for session in 0..sessions {
        let seed = base_seed.wrapping_add(session as u32);
        info!(
            match_id = %match_id,
            session,
            seed,
            strategy = options.strategy.name(),
            "session_started"
        );
        let engine = TurnEngine::from_level(&rows, options)?;
        let session_run = run_session(engine, session, seed, max_turns);

        for anomaly in &session_run.anomaly_records {
            warn!(
                match_id = %match_id,
                session,
                seed,
                turn = anomaly.turn,
                detail = %anomaly.message,
                "anomaly_detected"
            );
        }

        if !session_run.result.anomalies.is_empty() {
            has_anomaly = true;
        }
        total_anomalies += session_run.anomaly_records.len();
        total_turns += session_run.result.turns;
        *reason_counts
            .entry(session_run.result.reason.key())
            .or_insert(0) += 1;

        info!(
            match_id = %match_id,
            session,
            seed,
            reason = %session_run.result.reason.key(),
            turns = session_run.result.turns,
            items = session_run.result.items_collected,
            "session_finished"
        );

        match serde_json::to_string(&session_run.result) {
            Ok(line) => println!("{line}"),
            Err(error) => warn!(%error, session, "session result did not serialize"),
        }
        session_results.push(session_run.result);
    }

    let summary = build_run_summary(
        match_id.clone(),
        run_started_at_ms,
        now_ms(),
        session_results,
        reason_counts,
        total_anomalies,
        total_turns,
    );

    if let Some(path) = cli.summary_out.as_ref() {
        if let Err(error) = write_summary(path, &summary) {
            error!(path = %path.display(), %error, "summary_write_failed");
            std::process::exit(2);
        }
    }

    info!(
        match_id = %match_id,
        sessions = summary.session_count,
        anomalies = summary.anomaly_count,
        average_turns = summary.average_turns,
        "run_finished"
    );

    if has_anomaly {
        std::process::exit(1);
    }
    Ok(())
}

fn run_session(
    mut engine: TurnEngine,
    session: usize,
    seed: u32,
    max_turns: u64,
) -> SessionRunResult {
    let mut rng = Rng::new(seed);
    let mut anomalies = Vec::new();
    let mut anomaly_records = Vec::new();
    let mut anomaly_seen = HashSet::new();
    let chaser_count = engine.state().chasers().len();

    for message in collect_level_anomalies(&engine) {
        push_anomaly(&mut anomalies, &mut anomaly_records, &mut anomaly_seen, 0, message);
    }

    let mut stuck = false;
    while !engine.is_ended() && engine.state().turn() < max_turns {
        let Some(dir) = choose_seeker_direction(&engine, &mut rng) else {
            stuck = true;
            break;
        };
        let moved = engine.apply_seeker_move(dir).and_then(|_| engine.advance_chasers_default());
        if let Err(error) = moved {
            push_anomaly(
                &mut anomalies,
                &mut anomaly_records,
                &mut anomaly_seen,
                engine.state().turn(),
                format!("engine rejected a legal turn: {error}"),
            );
            break;
        }
        for message in collect_turn_anomalies(&engine, chaser_count) {
            push_anomaly(
                &mut anomalies,
                &mut anomaly_records,
                &mut anomaly_seen,
                engine.state().turn(),
                message,
            );
        }
    }

    let state = engine.state();
    let reason = match state.outcome() {
        Some(Outcome::Won) => SessionEndReason::Won,
        Some(Outcome::Captured) => SessionEndReason::Captured,
        _ if stuck => SessionEndReason::Stuck,
        _ => SessionEndReason::TurnLimit,
    };
    let items = state.items();

    SessionRunResult {
        result: SessionResultLine {
            session,
            seed,
            strategy: engine.options().strategy,
            reason,
            turns: state.turn(),
            seeker_moves: state.seeker_moves(),
            items_collected: items.total - items.remaining,
            items_total: items.total,
            duration_ms: state.turn() * TICK_MS,
            anomalies,
        },
        anomaly_records,
    }
}

fn choose_seeker_direction(engine: &TurnEngine, rng: &mut Rng) -> Option<Direction> {
    let state = engine.state();
    let grid = state.grid();
    let seeker = state.seeker();
    let legal: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|dir| grid.is_passable(seeker.offset(*dir)))
        .collect();
    if legal.is_empty() {
        return None;
    }

    if rng.bool(ITEM_SEEK_PROBABILITY) {
        let nearest_item = grid
            .item_cells()
            .into_iter()
            .min_by_key(|cell| cell.manhattan(seeker));
        if let Some(item) = nearest_item {
            let step = greedy_best_first(seeker, item, grid, engine.options().search);
            if let Some(dir) = legal.iter().copied().find(|dir| seeker.offset(*dir) == step) {
                return Some(dir);
            }
        }
    }
    Some(legal[rng.pick_index(legal.len())])
}

fn collect_level_anomalies(engine: &TurnEngine) -> Vec<String> {
    let grid = engine.state().grid();
    let reachable = grid.reachable_from(engine.state().seeker());
    grid.item_cells()
        .into_iter()
        .filter(|cell| !reachable.contains(cell))
        .map(|cell| format!("item at {cell} is unreachable from the seeker"))
        .collect()
}

fn collect_turn_anomalies(engine: &TurnEngine, chaser_count: usize) -> Vec<String> {
    let state = engine.state();
    let grid = state.grid();
    let mut anomalies = Vec::new();

    let items = state.items();
    if items.remaining > items.total {
        anomalies.push(format!(
            "item counter out of range: {}/{}",
            items.remaining, items.total
        ));
    }

    let seekers = grid.count_occupants(Occupant::Seeker);
    if seekers != 1 {
        anomalies.push(format!("expected one seeker on the grid, found {seekers}"));
    }

    if state.chasers().len() != chaser_count {
        anomalies.push(format!(
            "chaser count changed: {} -> {}",
            chaser_count,
            state.chasers().len()
        ));
    }
    for (index, chaser) in state.chasers().iter().enumerate() {
        if grid.tile(*chaser) == Some(Tile::Wall) || !grid.in_bounds(*chaser) {
            anomalies.push(format!("chaser {index} stands on impassable cell {chaser}"));
        }
    }
    anomalies
}

fn push_anomaly(
    anomalies: &mut Vec<String>,
    anomaly_records: &mut Vec<AnomalyRecord>,
    anomaly_seen: &mut HashSet<String>,
    turn: u64,
    message: String,
) {
    anomaly_records.push(AnomalyRecord {
        turn,
        message: message.clone(),
    });
    if anomaly_seen.insert(message.clone()) {
        anomalies.push(message);
    }
}

fn default_match_id(seed: u32, timestamp_ms: u64) -> String {
    format!("sim-{seed}-{timestamp_ms}")
}

fn build_run_summary(
    match_id: String,
    started_at_ms: u64,
    finished_at_ms: u64,
    sessions: Vec<SessionResultLine>,
    reason_counts: BTreeMap<String, usize>,
    anomaly_count: usize,
    total_turns: u64,
) -> RunSummary {
    let session_count = sessions.len();
    let average_turns = if session_count == 0 {
        0
    } else {
        total_turns / session_count as u64
    };
    RunSummary {
        match_id,
        generated_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        started_at_ms,
        finished_at_ms,
        session_count,
        anomaly_count,
        average_turns,
        reason_counts,
        sessions,
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
    let summary_text = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    std::fs::write(path, summary_text)
}
