use rand::distributions::{Distribution, WeightedIndex};
use rand::RngCore;

use crate::config::{Config, Difficulty};
use crate::engine::direction::Direction;
use crate::engine::grid::{Grid, Score};
use crate::engine::placement::PlacementStrategy;
use crate::engine::tile::{Card, Tile};
use crate::error::Result;
use crate::storage::{GridState, Snapshot, Storage};
use crate::tui::actuator::{Actuator, Status};
use crate::tui::events::Event;

const NEW_CARD_CHOICES: [Card; 2] = [2, 4];
const NEW_CARD_WEIGHTS: [u8; 2] = [9, 1];

/// GameManager owns a game session and drives it in response to player input.
///
/// Every state change is persisted through the [`Storage`] and shown through the [`Actuator`].
/// Storage failures are logged and otherwise ignored so a broken save never interrupts play.
pub struct GameManager<S: Storage, A: Actuator> {
    config: Config,
    storage: S,
    actuator: A,
    rng: Box<dyn RngCore>,
    place: PlacementStrategy,
    new_tile_weighted_index: WeightedIndex<u8>,

    grid: Grid,
    score: Score,
    over: bool,
    won: bool,
    keep_playing: bool,
}

// public methods
impl<S: Storage, A: Actuator> GameManager<S, A> {
    /// Create a manager and set up the first game, resuming a saved one if `storage` has it.
    pub fn new(
        config: Config,
        storage: S,
        actuator: A,
        rng: impl RngCore + 'static,
    ) -> Result<Self> {
        let mut manager = Self {
            grid: Grid::new(config.size()),
            place: config.difficulty().strategy(),
            config,
            storage,
            actuator,
            rng: Box::new(rng),
            new_tile_weighted_index: WeightedIndex::new(NEW_CARD_WEIGHTS)
                .expect("NEW_CARD_WEIGHTS should never be empty"),
            score: 0,
            over: false,
            won: false,
            keep_playing: false,
        };
        manager.setup()?;
        Ok(manager)
    }

    /// Resume the saved game if there is one, otherwise start a new game.
    pub fn setup(&mut self) -> Result<()> {
        let previous = match self.storage.game_state() {
            Ok(previous) => previous,
            Err(e) => {
                log::warn!("unable to load saved game, starting fresh: {}", e);
                None
            }
        };
        self.start(previous)
    }

    /// Throw away the current game, saved or not, and start a new one.
    pub fn restart(&mut self) -> Result<()> {
        log::info!("restarting");
        if let Err(e) = self.storage.clear_game_state() {
            log::warn!("unable to clear saved game: {}", e);
        }
        self.actuator.continue_game()?;
        self.start(None)
    }

    /// Keep going after reaching the winning tile.
    pub fn keep_playing(&mut self) -> Result<()> {
        log::info!("keep playing");
        self.keep_playing = true;
        self.actuator.continue_game()
    }

    /// Slide the tiles in `direction`, returning whether anything moved.
    ///
    /// Nothing happens once the game is terminated. A move that changes the grid spawns one new
    /// tile, may end the game and is then persisted and shown.
    pub fn move_tiles(&mut self, direction: Direction) -> Result<bool> {
        if self.is_game_terminated() {
            log::debug!("ignoring {} move, game is terminated", direction);
            return Ok(false);
        }

        let result = self.grid.shift(direction);
        self.score += result.score;
        if self.won && !result.won {
            log::warn!("move engine reported a lost win after moving {}", direction);
        }
        if result.won && !self.won {
            log::info!("reached {} with score {}", self.grid.max_tile(), self.score);
        }
        self.won |= result.won;

        if !result.moved {
            log::debug!("{} move changed nothing", direction);
            return Ok(false);
        }
        log::debug!("moved {} for {} points", direction, result.score);

        self.add_random_tile()?;
        if !self.grid.moves_available() {
            log::info!("game over with score {}", self.score);
            self.over = true;
        }

        self.actuate()?;
        Ok(true)
    }

    /// Dispatch a player input event. Quitting is left to the caller.
    pub fn handle(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::Move(direction) => {
                self.move_tiles(*direction)?;
            }
            Event::Restart => self.restart()?,
            Event::KeepPlaying => self.keep_playing()?,
            Event::Resize => self.render()?,
            Event::Quit => (),
        }
        Ok(())
    }

    /// True if the game is lost, or won and the player hasn't chosen to keep playing.
    pub fn is_game_terminated(&self) -> bool {
        self.over || (self.won && !self.keep_playing)
    }

    pub fn serialize(&self) -> Snapshot {
        Snapshot {
            grid: GridState::from(&self.grid),
            score: self.score,
            over: self.over,
            won: self.won,
            keep_playing: self.keep_playing,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn over(&self) -> bool {
        self.over
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn is_keep_playing(&self) -> bool {
        self.keep_playing
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }
}

// private methods
impl<S: Storage, A: Actuator> GameManager<S, A> {
    fn start(&mut self, previous: Option<Snapshot>) -> Result<()> {
        let restored = previous.and_then(|snapshot| match Grid::try_from(&snapshot.grid) {
            Ok(grid) => Some((grid, snapshot)),
            Err(e) => {
                log::warn!("discarding malformed saved game: {}", e);
                None
            }
        });

        match restored {
            Some((grid, snapshot)) => {
                log::info!("resuming saved game with score {}", snapshot.score);
                self.grid = grid;
                self.score = snapshot.score;
                self.over = snapshot.over;
                self.won = snapshot.won;
                self.keep_playing = snapshot.keep_playing;
            }
            None => {
                log::info!(
                    "starting {}x{} game on {}",
                    self.config.size(),
                    self.config.size(),
                    self.config.difficulty()
                );
                self.grid = Grid::new(self.config.size());
                self.score = 0;
                self.over = false;
                self.won = false;
                self.keep_playing = false;
                self.add_start_tiles()?;
            }
        }

        self.actuate()
    }

    fn add_start_tiles(&mut self) -> Result<()> {
        for _ in 0..self.config.start_tiles() {
            self.add_random_tile()?;
        }
        Ok(())
    }

    fn add_random_tile(&mut self) -> Result<Option<Tile>> {
        if !self.grid.cells_available() {
            log::debug!("no room for a new tile");
            return Ok(None);
        }
        let value = NEW_CARD_CHOICES[self.new_tile_weighted_index.sample(&mut self.rng)];
        let position = (self.place)(&self.grid, value, &mut *self.rng)?;
        let tile = Tile::new(position, value);
        log::debug!("spawning {}", tile);
        self.grid.insert_tile(&tile);
        Ok(Some(tile))
    }

    fn actuate(&mut self) -> Result<()> {
        let best_score = match self.storage.best_score() {
            Ok(best_score) => best_score,
            Err(e) => {
                log::warn!("unable to read best score: {}", e);
                0
            }
        };
        if best_score < self.score {
            if let Err(e) = self.storage.set_best_score(self.score) {
                log::warn!("unable to save best score: {}", e);
            }
        }

        // a lost game is never resumed, a won one is
        let saved = if self.over {
            self.storage.clear_game_state()
        } else {
            self.storage.set_game_state(&self.serialize())
        };
        if let Err(e) = saved {
            log::warn!("unable to save game: {}", e);
        }

        self.show(best_score.max(self.score))
    }

    fn render(&mut self) -> Result<()> {
        let best_score = self.storage.best_score().unwrap_or(0);
        self.show(best_score.max(self.score))
    }

    fn show(&mut self, best_score: Score) -> Result<()> {
        let status = Status {
            score: self.score,
            over: self.over,
            won: self.won,
            best_score,
            terminated: self.is_game_terminated(),
        };
        self.actuator.actuate(&self.grid, &status)
    }
}
