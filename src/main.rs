use std::io::stdout;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use rand::thread_rng;

use spite48::config::{Config, Difficulty, DEFAULT_SIZE, DEFAULT_START_TILES};
use spite48::storage::{FileStorage, MemoryStorage, Storage};
use spite48::tui::crossterm::{CrosstermActuator, CrosstermEvents};
use spite48::tui::events::{Event, EventSource};
use spite48::GameManager;

/// 2048 in the terminal, with a tile spawner that can play against you.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Width and height of the board.
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Number of tiles on a fresh board.
    #[arg(long, default_value_t = DEFAULT_START_TILES)]
    start_tiles: usize,

    /// Where new tiles land: easy helps, medium is random, hard fights back.
    #[arg(long, value_enum, default_value_t = Difficulty::Hard)]
    difficulty: Difficulty,

    /// Directory holding the saved game and best score.
    #[arg(long, default_value = "./.spite48")]
    state_dir: PathBuf,

    /// Don't save anything to disk.
    #[arg(long)]
    no_save: bool,

    #[arg(long, default_value = "./spite48.log")]
    log_file: PathBuf,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message,
            ))
        })
        .level(cli.verbose.log_level_filter())
        .chain(fern::log_file(&cli.log_file)?)
        .apply()?;

    let config = Config::new(cli.size, cli.start_tiles, cli.difficulty)?;
    if cli.no_save {
        play(config, MemoryStorage::default())
    } else {
        play(config, FileStorage::new(&cli.state_dir)?)
    }
}

fn play<S: Storage>(config: Config, storage: S) -> Result<()> {
    let w = stdout().lock();
    let actuator = CrosstermActuator::new(Box::new(w))?;
    let mut manager = GameManager::new(config, storage, actuator, thread_rng())?;
    let events = CrosstermEvents;

    loop {
        match events.next_event()? {
            Event::Quit => break,
            event => manager.handle(&event)?,
        }
    }
    log::info!("quitting with score {}", manager.score());
    Ok(())
}
