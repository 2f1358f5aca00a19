use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::constants::{CHASER_SYMBOL, EMPTY_SYMBOL, ITEM_SYMBOL, SEEKER_SYMBOL, WALL_SYMBOL};
use crate::error::GameError;
use crate::types::{CellView, Direction, Occupant, Tile, Vec2};

// Moving an entity only touches `occupancy`; terrain is never overwritten.
#[derive(Clone, Debug)]
pub struct GridMap {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    occupancy: BTreeMap<Vec2, Vec<Occupant>>,
}

#[derive(Clone, Debug)]
pub struct ParsedLevel {
    pub(crate) grid: GridMap,
    pub(crate) seeker: Vec2,
    pub(crate) chasers: Vec<Vec2>,
    pub(crate) items: u32,
}

impl ParsedLevel {
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, GameError> {
        let Some(first) = rows.first() else {
            return Err(GameError::malformed(0, "level has no rows"));
        };
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(GameError::malformed(0, "level rows are empty"));
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        let mut seekers = Vec::new();
        let mut chasers = Vec::new();
        let mut items = 0u32;

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let row_width = row.chars().count();
            if row_width != width {
                return Err(GameError::malformed(
                    y,
                    format!("expected {width} columns, found {row_width}"),
                ));
            }
            for (x, symbol) in row.chars().enumerate() {
                let pos = Vec2::new(x as i32, y as i32);
                let tile = match symbol {
                    WALL_SYMBOL => Tile::Wall,
                    ITEM_SYMBOL => {
                        items += 1;
                        Tile::Item
                    }
                    SEEKER_SYMBOL => {
                        seekers.push(pos);
                        Tile::Floor
                    }
                    CHASER_SYMBOL => {
                        chasers.push(pos);
                        Tile::Floor
                    }
                    EMPTY_SYMBOL => Tile::Empty,
                    c if c.is_control() => {
                        return Err(GameError::malformed(
                            y,
                            format!("unrecognized symbol {c:?} at column {x}"),
                        ));
                    }
                    _ => Tile::Floor,
                };
                tiles.push(tile);
            }
        }

        let seeker = match seekers.as_slice() {
            [single] => *single,
            [] => return Err(GameError::malformed(0, "level has no seeker marker")),
            [_, extra, ..] => {
                return Err(GameError::malformed(
                    extra.y as usize,
                    format!("level has {} seeker markers", seekers.len()),
                ));
            }
        };

        let mut grid = GridMap {
            width: width as i32,
            height: rows.len() as i32,
            tiles,
            occupancy: BTreeMap::new(),
        };
        grid.place(seeker, Occupant::Seeker);
        for (index, pos) in chasers.iter().enumerate() {
            grid.place(*pos, Occupant::Chaser(index));
        }

        Ok(Self {
            grid,
            seeker,
            chasers,
            items,
        })
    }
}

impl GridMap {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, pos: Vec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// In bounds and not a wall. Entities standing on a cell never block it.
    pub fn is_passable(&self, pos: Vec2) -> bool {
        self.tile(pos).is_some_and(|tile| tile != Tile::Wall)
    }

    pub fn tile(&self, pos: Vec2) -> Option<Tile> {
        self.index_of(pos).map(|idx| self.tiles[idx])
    }

    pub fn set_tile(&mut self, pos: Vec2, tile: Tile) -> bool {
        match self.index_of(pos) {
            Some(idx) => {
                self.tiles[idx] = tile;
                true
            }
            None => false,
        }
    }

    pub fn occupants_at(&self, pos: Vec2) -> &[Occupant] {
        self.occupancy.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count_occupants(&self, occupant: Occupant) -> usize {
        self.occupancy
            .values()
            .flatten()
            .filter(|o| **o == occupant)
            .count()
    }

    pub(crate) fn place(&mut self, pos: Vec2, occupant: Occupant) {
        let slot = self.occupancy.entry(pos).or_default();
        slot.push(occupant);
        slot.sort();
    }

    pub(crate) fn relocate(&mut self, occupant: Occupant, from: Vec2, to: Vec2) {
        if from == to {
            return;
        }
        if let Some(slot) = self.occupancy.get_mut(&from) {
            slot.retain(|o| *o != occupant);
            if slot.is_empty() {
                self.occupancy.remove(&from);
            }
        }
        self.place(to, occupant);
    }

    pub fn cell_view(&self, pos: Vec2) -> Option<CellView> {
        let tile = self.tile(pos)?;
        let occupants = self.occupants_at(pos);
        if occupants.iter().any(|o| matches!(o, Occupant::Chaser(_))) {
            return Some(CellView::ChaserOccupied);
        }
        if occupants.contains(&Occupant::Seeker) {
            return Some(CellView::SeekerOccupied);
        }
        Some(tile.into())
    }

    pub fn render_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| {
                        self.cell_view(Vec2::new(x, y))
                            .map(CellView::symbol)
                            .unwrap_or(' ')
                    })
                    .collect()
            })
            .collect()
    }

    pub fn passable_neighbors(&self, pos: Vec2) -> impl Iterator<Item = Vec2> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |dir| pos.offset(dir))
            .filter(|next| self.is_passable(*next))
    }

    pub fn reachable_from(&self, start: Vec2) -> HashSet<Vec2> {
        let mut out = HashSet::new();
        if !self.is_passable(start) {
            return out;
        }

        let mut queue = VecDeque::new();
        out.insert(start);
        queue.push_back(start);

        while let Some(pos) = queue.pop_front() {
            for next in self.passable_neighbors(pos) {
                if out.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        out
    }

    pub fn item_cells(&self) -> Vec<Vec2> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Vec2::new(x, y)))
            .filter(|pos| self.tile(*pos) == Some(Tile::Item))
            .collect()
    }

    fn index_of(&self, pos: Vec2) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some((pos.y * self.width + pos.x) as usize)
    }
}
