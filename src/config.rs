use std::path::PathBuf;

use crate::constants::{LEVEL_ENV_VAR, STRATEGY_ENV_VAR};
use crate::engine::EngineOptions;
use crate::error::GameError;
use crate::pathfinding::SearchOptions;
use crate::types::Strategy;

pub fn resolve_level_path(cli_path: Option<PathBuf>) -> Option<PathBuf> {
    cli_path.or_else(|| env_value(LEVEL_ENV_VAR).map(PathBuf::from))
}

pub fn resolve_strategy(cli_value: Option<&str>) -> Result<Strategy, GameError> {
    match cli_value
        .map(str::to_string)
        .or_else(|| env_value(STRATEGY_ENV_VAR))
    {
        Some(raw) => raw.parse(),
        None => Ok(Strategy::default()),
    }
}

pub fn engine_options(
    strategy: Option<&str>,
    step_budget: Option<usize>,
) -> Result<EngineOptions, GameError> {
    Ok(EngineOptions {
        strategy: resolve_strategy(strategy)?,
        search: SearchOptions { step_budget },
    })
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}
