use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid must have at least one tile")]
    EmptyGrid,
    #[error("Too many bombs: {bombs} requested for a grid of {tiles} tiles")]
    TooManyBombs { bombs: CellCount, tiles: CellCount },
    #[error("Bomb layout shape does not match the grid size")]
    InvalidBoardShape,
    #[error("Bomb layout holds {actual} bombs, expected {expected}")]
    BombCountMismatch { expected: CellCount, actual: CellCount },
    #[error("Coordinates ({row}, {col}) are outside the grid")]
    OutOfBounds { row: Coord, col: Coord },
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
