use std::io::Write;

use crossterm::{
    cursor,
    event::{self, Event as CrossTermEvent, KeyCode, KeyEvent, KeyEventKind},
    style::{self, Color},
    terminal, ExecutableCommand, QueueableCommand,
};

use super::actuator::{Actuator, Status};
use super::colors::TileColors;
use super::events::{Event, EventSource};
use crate::engine::direction::Direction;
use crate::engine::grid::Grid;
use crate::engine::tile::Card;
use crate::error::Result;

const BOARD_X_OFFSET: u16 = 2;
const BOARD_Y_OFFSET: u16 = 3;
const BOARD_BORDER_WIDTH: u16 = 1;
const BOARD_X_PADDING: u16 = 2;
const BOARD_Y_PADDING: u16 = 1;
const TILE_HEIGHT: u16 = 3;
const TILE_WIDTH: u16 = 6;

const HELP: &str = "arrows/hjkl/wasd move, r restart, q quit";

/// Draws the game straight onto the terminal using an alternate screen.
pub struct CrosstermActuator<T: Write> {
    w: Box<T>,
    colors: TileColors,
    last_frame: Option<(Grid, Status)>,
}

impl<T: Write> CrosstermActuator<T> {
    pub fn new(mut w: Box<T>) -> Result<Self> {
        terminal::enable_raw_mode()?;
        w.execute(terminal::EnterAlternateScreen)?;
        w.execute(cursor::Hide)?;
        Ok(Self {
            w,
            colors: TileColors::default(),
            last_frame: None,
        })
    }
}

impl<T: Write> Drop for CrosstermActuator<T> {
    fn drop(&mut self) {
        self.w.execute(cursor::Show).expect("showing cursor");
        self.w
            .execute(terminal::LeaveAlternateScreen)
            .expect("leaving alternate screen");
        terminal::disable_raw_mode().expect("disabling raw mode");
    }
}

impl<T: Write> Actuator for CrosstermActuator<T> {
    fn actuate(&mut self, grid: &Grid, status: &Status) -> Result<()> {
        self.draw(grid, status)?;
        self.last_frame = Some((grid.clone(), status.clone()));
        Ok(())
    }

    fn continue_game(&mut self) -> Result<()> {
        if let Some((grid, mut status)) = self.last_frame.take() {
            status.terminated = false;
            self.draw(&grid, &status)?;
            self.last_frame = Some((grid, status));
        }
        Ok(())
    }
}

impl<T: Write> CrosstermActuator<T> {
    fn draw(&mut self, grid: &Grid, status: &Status) -> Result<()> {
        let size = grid.size() as u16;
        let width =
            BOARD_BORDER_WIDTH * 2 + BOARD_X_PADDING + (TILE_WIDTH + BOARD_X_PADDING) * size;
        let height =
            BOARD_BORDER_WIDTH * 2 + BOARD_Y_PADDING + (TILE_HEIGHT + BOARD_Y_PADDING) * size;

        self.w.queue(terminal::BeginSynchronizedUpdate)?;
        self.w.queue(style::ResetColor)?;
        self.w.queue(terminal::Clear(terminal::ClearType::All))?;

        self.w.queue(cursor::MoveTo(BOARD_X_OFFSET, 1))?;
        self.w.queue(style::Print(format!(
            "score {:>8}    best {:>8}",
            status.score, status.best_score
        )))?;

        self.draw_border(width, height)?;
        for (y, row) in grid.rows().iter().enumerate() {
            for (x, card) in row.iter().enumerate() {
                self.draw_tile(x as u16, y as u16, *card)?;
            }
        }

        let mut line = BOARD_Y_OFFSET + height + 1;
        if status.terminated {
            let message = if status.over {
                "Game over! Press r to restart or q to quit."
            } else {
                "You win! Press c to keep going, r to restart or q to quit."
            };
            for text in textwrap::wrap(message, width as usize) {
                self.w.queue(cursor::MoveTo(BOARD_X_OFFSET, line))?;
                self.w.queue(style::SetAttribute(style::Attribute::Bold))?;
                self.w.queue(style::Print(text))?;
                self.w.queue(style::SetAttribute(style::Attribute::Reset))?;
                line += 1;
            }
            line += 1;
        }
        for text in textwrap::wrap(HELP, width as usize) {
            self.w.queue(cursor::MoveTo(BOARD_X_OFFSET, line))?;
            self.w.queue(style::Print(text))?;
            line += 1;
        }

        self.w.queue(terminal::EndSynchronizedUpdate)?;
        self.w.flush()?;
        Ok(())
    }

    fn draw_border(&mut self, width: u16, height: u16) -> Result<()> {
        let box_corner = boxy::Char::upper_left(boxy::Weight::Doubled);
        let box_horizontal: char = boxy::Char::horizontal(boxy::Weight::Doubled).into();
        let box_vertical: char = boxy::Char::vertical(boxy::Weight::Doubled).into();
        let top_left: char = box_corner.clone().into();
        let top_right: char = box_corner.clone().rotate_cw(1).into();
        let bottom_right: char = box_corner.clone().rotate_cw(2).into();
        let bottom_left: char = box_corner.clone().rotate_ccw(1).into();

        let (x0, y0) = (BOARD_X_OFFSET, BOARD_Y_OFFSET);
        let (x1, y1) = (x0 + width - 1, y0 + height - 1);
        let horizontal = box_horizontal.to_string().repeat((width - 2) as usize);

        self.w.queue(style::ResetColor)?;
        self.w.queue(cursor::MoveTo(x0, y0))?;
        self.w
            .queue(style::Print(format!("{top_left}{horizontal}{top_right}")))?;
        self.w.queue(cursor::MoveTo(x0, y1))?;
        self.w
            .queue(style::Print(format!("{bottom_left}{horizontal}{bottom_right}")))?;
        for y in (y0 + 1)..y1 {
            self.w.queue(cursor::MoveTo(x0, y))?;
            self.w.queue(style::Print(box_vertical))?;
            self.w.queue(cursor::MoveTo(x1, y))?;
            self.w.queue(style::Print(box_vertical))?;
        }
        Ok(())
    }

    fn draw_tile(&mut self, x: u16, y: u16, card: Card) -> Result<()> {
        let left = BOARD_X_OFFSET
            + BOARD_BORDER_WIDTH
            + BOARD_X_PADDING
            + (TILE_WIDTH + BOARD_X_PADDING) * x;
        let top = BOARD_Y_OFFSET
            + BOARD_BORDER_WIDTH
            + BOARD_Y_PADDING
            + (TILE_HEIGHT + BOARD_Y_PADDING) * y;
        let (background, foreground) = self.colors.get(card);
        let label = match card {
            0 => String::new(),
            v => v.to_string(),
        };

        self.w.queue(style::SetBackgroundColor(background))?;
        self.w.queue(style::SetForegroundColor(foreground))?;
        for row in 0..TILE_HEIGHT {
            self.w.queue(cursor::MoveTo(left, top + row))?;
            let content = if row == TILE_HEIGHT / 2 {
                format!("{:^width$}", label, width = TILE_WIDTH as usize)
            } else {
                " ".repeat(TILE_WIDTH as usize)
            };
            self.w.queue(style::Print(content))?;
        }
        self.w.queue(style::SetBackgroundColor(Color::Reset))?;
        self.w.queue(style::SetForegroundColor(Color::Reset))?;
        Ok(())
    }
}

/// Reads player input from the terminal.
#[derive(Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    /// Block until the next Crossterm event that maps to a game event.
    fn next_event(&self) -> Result<Event> {
        loop {
            match event::read()? {
                CrossTermEvent::Key(ke) => match handle_key_event(ke) {
                    Some(e) => return Ok(e),
                    None => continue,
                },
                CrossTermEvent::Resize(_, _) => return Ok(Event::Resize),
                _ => continue,
            };
        }
    }
}

fn handle_key_event(ke: KeyEvent) -> Option<Event> {
    if ke.kind == KeyEventKind::Release {
        return None;
    }
    match ke.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => {
            Some(Event::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => {
            Some(Event::Move(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(Event::Move(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => {
            Some(Event::Move(Direction::Down))
        }
        KeyCode::Char('r') => Some(Event::Restart),
        KeyCode::Char('c') => Some(Event::KeepPlaying),
        KeyCode::Char('q') | KeyCode::Esc => Some(Event::Quit),
        _ => None,
    }
}
