use tracing::{debug, info};

use crate::error::GameError;
use crate::pathfinding::{next_step, SearchOptions};
use crate::state::GameState;
use crate::types::{Direction, MoveResult, Outcome, Strategy, Tile, TurnPhase, Vec2};

mod chaser_system;
mod outcome_system;

#[derive(Clone, Copy, Debug, Default)]
pub struct EngineOptions {
    pub strategy: Strategy,
    pub search: SearchOptions,
}

#[derive(Clone, Debug)]
pub struct TurnEngine {
    state: GameState,
    options: EngineOptions,
}

impl TurnEngine {
    pub fn new(state: GameState, options: EngineOptions) -> Self {
        Self { state, options }
    }

    pub fn from_level<S: AsRef<str>>(
        rows: &[S],
        options: EngineOptions,
    ) -> Result<Self, GameError> {
        GameState::from_level(rows).map(|state| Self::new(state, options))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    pub fn is_ended(&self) -> bool {
        self.state.is_ended()
    }

    pub fn apply_seeker_move(&mut self, dir: Direction) -> Result<MoveResult, GameError> {
        self.ensure_running()?;
        if self.state.phase() != TurnPhase::SeekerTurn {
            return Ok(MoveResult::NotYourTurn);
        }

        let from = self.state.seeker();
        let to = from.offset(dir);
        if !self.state.grid().is_passable(to) {
            debug!(%from, ?dir, "seeker move blocked");
            return Ok(MoveResult::Blocked);
        }

        self.state.move_seeker(to);
        self.state.set_phase(TurnPhase::ChaserTurn);
        Ok(MoveResult::Moved(to))
    }

    pub fn apply_seeker_token(&mut self, token: &str) -> Result<MoveResult, GameError> {
        let dir = token.parse::<Direction>()?;
        self.apply_seeker_move(dir)
    }

    /// Runs one chaser pass with `strategy`. Returns `Ok(None)` without
    /// touching anything when it is not the chasers' turn.
    pub fn advance_chasers(&mut self, strategy: Strategy) -> Result<Option<Outcome>, GameError> {
        self.ensure_running()?;
        if self.state.phase() != TurnPhase::ChaserTurn {
            return Ok(None);
        }

        self.move_chasers(strategy);
        let outcome = self.resolve_outcome();
        self.state.end_turn();
        self.state.set_phase(TurnPhase::SeekerTurn);
        Ok(Some(outcome))
    }

    pub fn advance_chasers_named(&mut self, strategy: &str) -> Result<Option<Outcome>, GameError> {
        let strategy = strategy.parse::<Strategy>()?;
        self.advance_chasers(strategy)
    }

    pub fn advance_chasers_default(&mut self) -> Result<Option<Outcome>, GameError> {
        self.advance_chasers(self.options.strategy)
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        if self.state.is_ended() {
            return Err(GameError::SessionEnded);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
