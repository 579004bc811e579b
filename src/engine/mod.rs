pub mod direction;
pub mod grid;
pub mod placement;
pub mod tile;
