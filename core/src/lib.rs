#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use agent::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod agent;
mod engine;
mod error;
mod generator;
mod grid;
mod tile;
mod types;
mod view;

/// Side length and bomb count of a square grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    size: Coord,
    bombs: CellCount,
}

impl GameConfig {
    pub fn new(size: Coord, bombs: CellCount) -> Result<Self> {
        let config = Self { size, bombs };
        config.validate()?;
        Ok(config)
    }

    /// At least one tile, and at least one tile left without a bomb.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(GameError::EmptyGrid);
        }

        let tiles = self.total_tiles();
        if self.bombs >= tiles {
            return Err(GameError::TooManyBombs {
                bombs: self.bombs,
                tiles,
            });
        }

        Ok(())
    }

    pub const fn size(&self) -> Coord {
        self.size
    }

    pub const fn bombs(&self) -> CellCount {
        self.bombs
    }

    pub const fn total_tiles(&self) -> CellCount {
        square(self.size)
    }

    pub const fn safe_tiles(&self) -> CellCount {
        self.total_tiles().saturating_sub(self.bombs)
    }
}
