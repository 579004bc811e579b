use thiserror;

/// The Result type for spite48.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("io error")]
    StdIOError(#[from] std::io::Error),

    #[error("snapshot serialization failed: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    #[error("{source:?}")]
    AnyhowError {
        #[from]
        source: anyhow::Error,
    },

    #[error("no available cells to place a {0} tile")]
    NoAvailableCells(crate::engine::tile::Card),

    #[error("invalid direction code {0}, expected 0 (up) through 3 (left)")]
    InvalidDirection(u8),

    #[error("invalid board size {0}")]
    InvalidBoardSize(usize),
}
