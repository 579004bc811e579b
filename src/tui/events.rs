use crate::engine::direction::Direction;
use crate::error::Result;

/// EventSource blocks until the player does something the game cares about.
pub trait EventSource {
    fn next_event(&self) -> Result<Event>;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    Move(Direction),
    Restart,
    KeepPlaying,
    Quit,
    Resize,
}
