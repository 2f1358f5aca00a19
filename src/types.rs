use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn manhattan(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// Neighbor enumeration order. Both search strategies walk this table,
    /// so it decides which of several equal paths wins.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Left => (-1, 0),
            Self::Down => (0, 1),
            Self::Right => (1, 0),
        }
    }

    pub fn parse_move(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Some(Self::Up),
            "left" | "a" => Some(Self::Left),
            "down" | "s" => Some(Self::Down),
            "right" | "d" => Some(Self::Right),
            _ => None,
        }
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse_move(value).ok_or_else(|| GameError::InvalidDirection(value.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    Wall,
    Floor,
    Item,
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellView {
    Wall,
    Floor,
    Item,
    Empty,
    SeekerOccupied,
    ChaserOccupied,
}

impl CellView {
    pub fn symbol(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Floor => ' ',
            Self::Item => '$',
            Self::Empty => '.',
            Self::SeekerOccupied => 'P',
            Self::ChaserOccupied => 'G',
        }
    }
}

impl From<Tile> for CellView {
    fn from(tile: Tile) -> Self {
        match tile {
            Tile::Wall => Self::Wall,
            Tile::Floor => Self::Floor,
            Tile::Item => Self::Item,
            Tile::Empty => Self::Empty,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum Occupant {
    Seeker,
    Chaser(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    SeekerTurn,
    ChaserTurn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Continue,
    Captured,
    Won,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Continue)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveResult {
    Moved(Vec2),
    Blocked,
    NotYourTurn,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    GreedyBestFirst,
    DepthFirst,
}

impl Strategy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "greedy" | "best_first" | "astar" => Some(Self::GreedyBestFirst),
            "dfs" | "depth_first" => Some(Self::DepthFirst),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::GreedyBestFirst => "greedy",
            Self::DepthFirst => "dfs",
        }
    }
}

impl FromStr for Strategy {
    type Err = GameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| GameError::UnknownStrategy(value.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ItemCounter {
    pub remaining: u32,
    pub total: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct ChaserView {
    pub index: usize,
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    pub rows: Vec<String>,
    pub seeker: Vec2,
    pub chasers: Vec<ChaserView>,
    #[serde(rename = "itemsRemaining")]
    pub items_remaining: u32,
    #[serde(rename = "itemsTotal")]
    pub items_total: u32,
    pub phase: TurnPhase,
    pub outcome: Option<Outcome>,
    pub turn: u64,
    #[serde(rename = "seekerMoves")]
    pub seeker_moves: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct SessionSummary {
    pub outcome: Outcome,
    pub turns: u64,
    #[serde(rename = "seekerMoves")]
    pub seeker_moves: u64,
    #[serde(rename = "itemsCollected")]
    pub items_collected: u32,
    #[serde(rename = "itemsTotal")]
    pub items_total: u32,
}
