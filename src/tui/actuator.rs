use crate::engine::grid::{Grid, Score};
use crate::error::Result;

/// Everything besides the grid that the player should see after a move.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Status {
    pub score: Score,
    pub over: bool,
    pub won: bool,
    pub best_score: Score,
    /// The game no longer accepts moves until the player restarts or keeps playing.
    pub terminated: bool,
}

/// Actuator presents the game to the player.
pub trait Actuator {
    fn actuate(&mut self, grid: &Grid, status: &Status) -> Result<()>;

    /// Dismiss any win or game over message.
    fn continue_game(&mut self) -> Result<()>;
}
