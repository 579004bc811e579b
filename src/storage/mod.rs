//! Persistence of the in-progress game and the best score.

mod file;
mod memory;
mod snapshot;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use snapshot::{GridState, Position, Snapshot, TileState};

use crate::engine::grid::Score;
use crate::error::Result;

/// Storage keeps a snapshot of the current game and the best score across games.
pub trait Storage {
    /// Load the saved game, if any.
    fn game_state(&self) -> Result<Option<Snapshot>>;

    fn set_game_state(&mut self, snapshot: &Snapshot) -> Result<()>;

    /// Discard the saved game so the next load starts fresh.
    fn clear_game_state(&mut self) -> Result<()>;

    /// Best score seen so far, zero if nothing was recorded.
    fn best_score(&self) -> Result<Score>;

    fn set_best_score(&mut self, score: Score) -> Result<()>;
}
