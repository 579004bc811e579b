use std::fs;
use std::path::{Path, PathBuf};

use super::{Snapshot, Storage};
use crate::engine::grid::Score;
use crate::error::Result;

const GAME_STATE_FILE: &str = "game_state.json";
const BEST_SCORE_FILE: &str = "best_score.json";

/// Stores the game snapshot and best score as JSON files under one directory.
///
/// Writes go to a temporary file first and are renamed into place, so an interrupted save never
/// leaves a half-written snapshot behind.
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn write(&self, name: &str, bytes: Vec<u8>) -> Result<()> {
        let path = self.path(name);
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;
        log::trace!("wrote {}", path.display());
        Ok(())
    }
}

impl Storage for FileStorage {
    fn game_state(&self) -> Result<Option<Snapshot>> {
        let path = self.path(GAME_STATE_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        let snapshot = serde_json::from_slice(&bytes)?;
        log::debug!("loaded game state from {}", path.display());
        Ok(Some(snapshot))
    }

    fn set_game_state(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.write(GAME_STATE_FILE, serde_json::to_vec(snapshot)?)
    }

    fn clear_game_state(&mut self) -> Result<()> {
        let path = self.path(GAME_STATE_FILE);
        if path.exists() {
            fs::remove_file(&path)?;
            log::debug!("cleared game state at {}", path.display());
        }
        Ok(())
    }

    fn best_score(&self) -> Result<Score> {
        let path = self.path(BEST_SCORE_FILE);
        if !path.exists() {
            return Ok(0);
        }
        Ok(serde_json::from_slice(&fs::read(&path)?)?)
    }

    fn set_best_score(&mut self, score: Score) -> Result<()> {
        self.write(BEST_SCORE_FILE, serde_json::to_vec(&score)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine::grid::Grid;
    use crate::error::Error;
    use crate::storage::GridState;

    fn storage(name: &str) -> FileStorage {
        let dir = std::env::temp_dir().join(format!("spite48-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        FileStorage::new(dir).expect("temp dir is writable")
    }

    fn remove(s: FileStorage) {
        fs::remove_dir_all(&s.base_dir).expect("temp dir is removable");
    }

    #[test]
    fn empty_directory() {
        let s = storage("empty");
        assert_eq!(s.game_state().expect("readable"), None);
        assert_eq!(s.best_score().expect("readable"), 0);
        remove(s);
    }

    #[test]
    fn game_state_lifecycle() {
        let mut s = storage("lifecycle");
        let snapshot = Snapshot {
            grid: GridState::from(&Grid::new(4)),
            score: 36,
            over: false,
            won: false,
            keep_playing: false,
        };
        s.set_game_state(&snapshot).expect("writable");
        assert_eq!(s.game_state().expect("readable"), Some(snapshot));

        s.clear_game_state().expect("removable");
        assert_eq!(s.game_state().expect("readable"), None);
        // clearing twice is fine
        s.clear_game_state().expect("removable");
        remove(s);
    }

    #[test]
    fn best_score() {
        let mut s = storage("best");
        s.set_best_score(2048).expect("writable");
        assert_eq!(s.best_score().expect("readable"), 2048);
        remove(s);
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let s = storage("corrupt");
        fs::write(s.path(GAME_STATE_FILE), b"{not json").expect("writable");
        assert!(matches!(s.game_state(), Err(Error::SerdeJsonError(_))));
        remove(s);
    }
}
