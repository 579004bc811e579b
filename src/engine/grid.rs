use rand::seq::SliceRandom;
use rand::Rng;

use super::direction::Direction;
use super::tile::{Card, Idx, Tile};
use crate::error::{Error, Result};

pub type Score = u32;

/// Reaching a tile of at least this value wins the game.
pub const WINNING_TILE: Card = 2048;

/// Outcome of sliding a grid in one direction.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MoveResult {
    pub moved: bool,
    pub score: Score,
    pub won: bool,
}

/// Grid is a square board of slots, each either empty (zero) or holding a tile value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    slots: Vec<Vec<Card>>,
}

// public methods
impl Grid {
    /// Create an empty grid with `size` x `size` slots.
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![vec![0; size]; size],
        }
    }

    /// Build a grid from rows of slots, indexed `rows[y][x]`.
    pub fn from_cells(rows: Vec<Vec<Card>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|row| row.len() != size) {
            return Err(Error::InvalidBoardSize(size));
        }
        Ok(Self { slots: rows })
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn rows(&self) -> &[Vec<Card>] {
        &self.slots
    }

    pub fn get(&self, idx: &Idx) -> Card {
        *self
            .slots
            .get(idx.1)
            .unwrap_or_else(|| panic!("invalid y coordinate {}", idx.1))
            .get(idx.0)
            .unwrap_or_else(|| panic!("invalid x coordinate {}", idx.0))
    }

    pub fn insert_tile(&mut self, tile: &Tile) {
        self.set(tile.position(), tile.value());
    }

    /// Empty slots in row-major order.
    pub fn available_cells(&self) -> Vec<Idx> {
        self.slots
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, card)| **card == 0)
                    .map(move |(x, _)| Idx(x, y))
            })
            .collect()
    }

    pub fn cells_available(&self) -> bool {
        self.slots.iter().flatten().any(|card| *card == 0)
    }

    pub fn random_available_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Idx> {
        self.available_cells().choose(rng).cloned()
    }

    pub fn tile_count(&self) -> usize {
        self.slots.iter().flatten().filter(|card| **card != 0).count()
    }

    pub fn max_tile(&self) -> Card {
        self.slots.iter().flatten().copied().max().unwrap_or(0)
    }

    /// True if at least one direction would move a tile.
    pub fn moves_available(&self) -> bool {
        self.cells_available() || self.tile_matches_available()
    }

    /// Slide every tile toward the edge indicated by `direction`, merging equal neighbours.
    pub fn shift(&mut self, direction: Direction) -> MoveResult {
        let size = self.size();
        let mut result = MoveResult::default();
        if size == 0 {
            return result;
        }
        let idxs = self.indices(direction).collect::<Vec<Idx>>();
        for row in idxs.chunks(size) {
            let mut pivot_iter = row.iter();
            let mut pivot_idx = match pivot_iter.next() {
                Some(idx) => idx,
                None => continue,
            };
            let mut cmp_iter = pivot_iter.clone();
            while let Some(cmp_idx) = cmp_iter.next() {
                let pivot = self.get(pivot_idx);
                let cmp = self.get(cmp_idx);
                // empty slots between pivot and the next tile are skipped
                if cmp == 0 {
                    continue;
                }
                // an empty pivot takes the tile and stays put so it can still merge
                if pivot == 0 {
                    self.set(pivot_idx, cmp);
                    self.set(cmp_idx, 0);
                    result.moved = true;
                    continue;
                }
                if pivot == cmp {
                    let new_value = pivot + cmp;
                    result.score += new_value;
                    self.set(pivot_idx, new_value);
                    self.set(cmp_idx, 0);
                    result.moved = true;
                }
                // the pivot is settled, either merged or blocked by a different tile
                match pivot_iter.next() {
                    Some(idx) => {
                        pivot_idx = idx;
                        cmp_iter = pivot_iter.clone();
                    }
                    None => break,
                }
            }
        }
        result.won = self.max_tile() >= WINNING_TILE;
        result
    }
}

// private methods
impl Grid {
    fn indices(&self, direction: Direction) -> Indices {
        Indices::new(self.size(), direction)
    }

    fn get_mut(&mut self, idx: &Idx) -> &mut Card {
        self.slots
            .get_mut(idx.1)
            .unwrap_or_else(|| panic!("invalid y coordinate {}", idx.1))
            .get_mut(idx.0)
            .unwrap_or_else(|| panic!("invalid x coordinate {}", idx.0))
    }

    fn set(&mut self, idx: &Idx, value: Card) {
        let rf = self.get_mut(idx);
        *rf = value;
    }

    fn tile_matches_available(&self) -> bool {
        let size = self.size();
        for y in 0..size {
            for x in 0..size {
                let card = self.slots[y][x];
                if card == 0 {
                    continue;
                }
                if x + 1 < size && self.slots[y][x + 1] == card {
                    return true;
                }
                if y + 1 < size && self.slots[y + 1][x] == card {
                    return true;
                }
            }
        }
        false
    }
}

// Indices walks a square grid one line at a time, starting each line at the edge that tiles are
// being pushed toward.
struct Indices {
    direction: Direction,
    width: usize,
    xdx: usize,
    ydx: usize,
}

impl Indices {
    fn new(width: usize, direction: Direction) -> Self {
        let last = width.saturating_sub(1);
        let (xdx, ydx) = match direction {
            Direction::Left => (0, 0),
            Direction::Right => (last, 0),
            Direction::Up => (0, 0),
            Direction::Down => (0, last),
        };

        Indices {
            direction,
            width,
            xdx,
            ydx,
        }
    }
}

impl Iterator for Indices {
    type Item = Idx;

    fn next(&mut self) -> Option<Self::Item> {
        if self.width == 0 {
            return None;
        }
        match &self.direction {
            Direction::Left => self.next_left(),
            Direction::Right => self.next_right(),
            Direction::Up => self.next_up(),
            Direction::Down => self.next_down(),
        }
    }
}

impl Indices {
    fn next_left(&mut self) -> Option<Idx> {
        let (xdx, ydx) = (self.xdx, self.ydx);
        if ydx == self.width {
            return None;
        }
        if xdx == self.width - 1 {
            self.xdx = 0;
            self.ydx += 1;
        } else {
            self.xdx += 1;
        }
        Some(Idx(xdx, ydx))
    }

    fn next_right(&mut self) -> Option<Idx> {
        let (xdx, ydx) = (self.xdx, self.ydx);
        if ydx == self.width {
            return None;
        }
        if xdx == 0 {
            self.xdx = self.width - 1;
            self.ydx += 1;
        } else {
            self.xdx -= 1;
        }
        Some(Idx(xdx, ydx))
    }

    fn next_up(&mut self) -> Option<Idx> {
        let (xdx, ydx) = (self.xdx, self.ydx);
        if xdx == self.width {
            return None;
        }
        if ydx == self.width - 1 {
            self.ydx = 0;
            self.xdx += 1;
        } else {
            self.ydx += 1;
        }
        Some(Idx(xdx, ydx))
    }

    fn next_down(&mut self) -> Option<Idx> {
        let (xdx, ydx) = (self.xdx, self.ydx);
        if xdx == self.width {
            return None;
        }
        if ydx == 0 {
            self.ydx = self.width - 1;
            self.xdx += 1;
        } else {
            self.ydx -= 1;
        }
        Some(Idx(xdx, ydx))
    }
}
