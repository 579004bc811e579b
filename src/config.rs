use serde::{Deserialize, Serialize};

use crate::engine::placement::{self, PlacementStrategy};
use crate::error::{Error, Result};

pub const DEFAULT_SIZE: usize = 4;
pub const DEFAULT_START_TILES: usize = 2;
/// A board needs at least two slots per line for any tile to move.
pub const MIN_SIZE: usize = 2;

/// Difficulty selects where newly spawned tiles land.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Spawn on the cell that leaves the player the most room.
    Easy,
    /// Spawn on a uniformly random empty cell.
    Medium,
    /// Spawn on the cell that hurts the player the most.
    #[default]
    Hard,
}

impl Difficulty {
    pub fn strategy(self) -> PlacementStrategy {
        match self {
            Self::Easy => placement::easy,
            Self::Medium => placement::medium,
            Self::Hard => placement::hard,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// Game settings, fixed for the lifetime of a manager.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    size: usize,
    start_tiles: usize,
    difficulty: Difficulty,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            start_tiles: DEFAULT_START_TILES,
            difficulty: Difficulty::default(),
        }
    }
}

impl Config {
    pub fn new(size: usize, start_tiles: usize, difficulty: Difficulty) -> Result<Self> {
        if size < MIN_SIZE {
            return Err(Error::InvalidBoardSize(size));
        }
        Ok(Self {
            size,
            start_tiles,
            difficulty,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn start_tiles(&self) -> usize {
        self.start_tiles
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}
