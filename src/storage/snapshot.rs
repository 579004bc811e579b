use serde::{Deserialize, Serialize};

use crate::engine::grid::{Grid, Score};
use crate::engine::tile::{Card, Idx};
use crate::error::{Error, Result};

/// Serialized form of a game in progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub grid: GridState,
    pub score: Score,
    pub over: bool,
    pub won: bool,
    pub keep_playing: bool,
}

/// Grid slots stored column first, `cells[x][y]`, with `None` for empty slots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridState {
    pub size: usize,
    pub cells: Vec<Vec<Option<TileState>>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileState {
    pub position: Position,
    pub value: Card,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl From<&Grid> for GridState {
    fn from(grid: &Grid) -> Self {
        let size = grid.size();
        let cells = (0..size)
            .map(|x| {
                (0..size)
                    .map(|y| match grid.get(&Idx(x, y)) {
                        0 => None,
                        value => Some(TileState {
                            position: Position { x, y },
                            value,
                        }),
                    })
                    .collect()
            })
            .collect();
        Self { size, cells }
    }
}

impl TryFrom<&GridState> for Grid {
    type Error = Error;

    fn try_from(state: &GridState) -> Result<Grid> {
        let size = state.size;
        if state.cells.len() != size || state.cells.iter().any(|column| column.len() != size) {
            return Err(Error::InvalidBoardSize(size));
        }
        let rows = (0..size)
            .map(|y| {
                (0..size)
                    .map(|x| state.cells[x][y].as_ref().map_or(0, |tile| tile.value))
                    .collect()
            })
            .collect();
        Grid::from_cells(rows)
    }
}
