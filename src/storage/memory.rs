use super::{Snapshot, Storage};
use crate::engine::grid::Score;
use crate::error::Result;

/// In-process storage that forgets everything when dropped.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    game_state: Option<Snapshot>,
    best_score: Score,
}

impl Storage for MemoryStorage {
    fn game_state(&self) -> Result<Option<Snapshot>> {
        Ok(self.game_state.clone())
    }

    fn set_game_state(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.game_state = Some(snapshot.clone());
        Ok(())
    }

    fn clear_game_state(&mut self) -> Result<()> {
        self.game_state = None;
        Ok(())
    }

    fn best_score(&self) -> Result<Score> {
        Ok(self.best_score)
    }

    fn set_best_score(&mut self, score: Score) -> Result<()> {
        self.best_score = score;
        Ok(())
    }
}
