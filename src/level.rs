use std::fs;
use std::path::Path;

use tracing::info;

use crate::constants::DEFAULT_LEVEL;
use crate::error::GameError;

pub fn load_level(path: Option<&Path>) -> Result<Vec<String>, GameError> {
    let Some(path) = path else {
        return Ok(default_level());
    };
    let text = fs::read_to_string(path).map_err(|source| GameError::LevelIo {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = split_level_text(&text);
    info!(path = %path.display(), rows = rows.len(), "loaded level file");
    Ok(rows)
}

pub fn default_level() -> Vec<String> {
    DEFAULT_LEVEL.iter().map(|row| row.to_string()).collect()
}

// Trailing blank lines are dropped; trailing spaces in a row are floor.
pub fn split_level_text(text: &str) -> Vec<String> {
    let mut rows: Vec<String> = text
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect();
    while rows.last().is_some_and(|row| row.trim().is_empty()) {
        rows.pop();
    }
    rows
}
