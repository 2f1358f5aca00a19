use crate::error::GameError;
use crate::types::{
    CellView, ChaserView, ItemCounter, Occupant, Outcome, SessionSummary, Snapshot, TurnPhase,
    Vec2,
};
use crate::world::{GridMap, ParsedLevel};

#[derive(Clone, Debug)]
pub struct GameState {
    grid: GridMap,
    seeker: Vec2,
    chasers: Vec<Vec2>,
    items: ItemCounter,
    phase: TurnPhase,
    outcome: Option<Outcome>,
    turn: u64,
    seeker_moves: u64,
}

impl GameState {
    pub fn from_level<S: AsRef<str>>(rows: &[S]) -> Result<Self, GameError> {
        ParsedLevel::parse(rows).map(Self::from_parsed)
    }

    pub(crate) fn from_parsed(level: ParsedLevel) -> Self {
        Self {
            grid: level.grid,
            seeker: level.seeker,
            chasers: level.chasers,
            items: ItemCounter {
                remaining: level.items,
                total: level.items,
            },
            phase: TurnPhase::SeekerTurn,
            outcome: None,
            turn: 0,
            seeker_moves: 0,
        }
    }

    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    pub fn seeker(&self) -> Vec2 {
        self.seeker
    }

    pub fn chasers(&self) -> &[Vec2] {
        &self.chasers
    }

    pub fn items(&self) -> ItemCounter {
        self.items
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_ended(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn seeker_moves(&self) -> u64 {
        self.seeker_moves
    }

    pub fn cell_view(&self, pos: Vec2) -> Option<CellView> {
        self.grid.cell_view(pos)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            rows: self.grid.render_rows(),
            seeker: self.seeker,
            chasers: self
                .chasers
                .iter()
                .enumerate()
                .map(|(index, pos)| ChaserView {
                    index,
                    x: pos.x,
                    y: pos.y,
                })
                .collect(),
            items_remaining: self.items.remaining,
            items_total: self.items.total,
            phase: self.phase,
            outcome: self.outcome,
            turn: self.turn,
            seeker_moves: self.seeker_moves,
        }
    }

    pub fn summary(&self) -> Option<SessionSummary> {
        let outcome = self.outcome?;
        Some(SessionSummary {
            outcome,
            turns: self.turn,
            seeker_moves: self.seeker_moves,
            items_collected: self.items.total - self.items.remaining,
            items_total: self.items.total,
        })
    }

    pub(crate) fn grid_mut(&mut self) -> &mut GridMap {
        &mut self.grid
    }

    pub(crate) fn move_seeker(&mut self, to: Vec2) {
        let from = self.seeker;
        self.grid.relocate(Occupant::Seeker, from, to);
        self.seeker = to;
        self.seeker_moves += 1;
    }

    pub(crate) fn move_chaser(&mut self, index: usize, to: Vec2) {
        let Some(from) = self.chasers.get(index).copied() else {
            return;
        };
        self.grid.relocate(Occupant::Chaser(index), from, to);
        self.chasers[index] = to;
    }

    pub(crate) fn set_phase(&mut self, phase: TurnPhase) {
        self.phase = phase;
    }

    pub(crate) fn end_turn(&mut self) {
        self.turn += 1;
    }

    pub(crate) fn consume_item(&mut self) -> u32 {
        self.items.remaining = self.items.remaining.saturating_sub(1);
        self.items.remaining
    }

    pub(crate) fn finish(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
    }
}
