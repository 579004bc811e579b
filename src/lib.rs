//! A terminal 2048 whose tile spawner can be set to help or to fight the player.

pub mod config;
pub mod engine;
pub mod error;
pub mod manager;
pub mod storage;
pub mod tui;

pub use config::{Config, Difficulty};
pub use error::{Error, Result};
pub use manager::GameManager;
