use core::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square field of tiles with bombs placed and adjacency counts precomputed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    tiles: Array2<Tile>,
    bombs: CellCount,
}

impl Grid {
    pub fn new(config: GameConfig, placer: impl BombPlacer) -> Result<Self> {
        config.validate()?;

        let mask = placer.place(config);
        let size = usize::from(config.size());
        if mask.dim() != (size, size) {
            return Err(GameError::InvalidBoardShape);
        }

        let grid = Self::from_bomb_mask(mask);
        if grid.bombs != config.bombs() {
            return Err(GameError::BombCountMismatch {
                expected: config.bombs(),
                actual: grid.bombs,
            });
        }
        log::debug!(
            "Built {}x{} grid with {} bombs",
            grid.size(),
            grid.size(),
            grid.bombs
        );
        Ok(grid)
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, RandomBombPlacer::new(seed))
    }

    /// Builds a grid with bombs at exactly the given coordinates, repeated coordinates count once.
    pub fn from_bomb_coords(size: Coord, bomb_coords: &[Coord2]) -> Result<Self> {
        if size == 0 {
            return Err(GameError::EmptyGrid);
        }

        let mut mask: Array2<bool> = Array2::default((size, size).to_nd_index());
        for &(row, col) in bomb_coords {
            if row >= size || col >= size {
                return Err(GameError::OutOfBounds { row, col });
            }
            mask[(row, col).to_nd_index()] = true;
        }

        let grid = Self::from_bomb_mask(mask);
        GameConfig::new(size, grid.bombs)?;
        Ok(grid)
    }

    fn from_bomb_mask(mask: Array2<bool>) -> Self {
        let tiles = Array2::from_shape_fn(mask.dim(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            let adjacent_bombs = mask
                .iter_neighbors(coords)
                .filter(|&pos| mask[pos.to_nd_index()])
                .count() as u8;
            Tile::new(mask[(row, col)], adjacent_bombs)
        });
        let bombs = mask.iter().filter(|&&bomb| bomb).count() as CellCount;
        Self { tiles, bombs }
    }

    pub fn size(&self) -> Coord {
        self.tiles.nrows() as Coord
    }

    pub fn config(&self) -> GameConfig {
        GameConfig {
            size: self.size(),
            bombs: self.bombs,
        }
    }

    pub fn bomb_count(&self) -> CellCount {
        self.bombs
    }

    pub fn total_tiles(&self) -> CellCount {
        square(self.size())
    }

    pub fn safe_tile_count(&self) -> CellCount {
        self.total_tiles() - self.bombs
    }

    pub fn revealed_count(&self) -> CellCount {
        self.tiles.iter().filter(|tile| tile.is_revealed()).count() as CellCount
    }

    pub fn is_tile_in_grid(&self, (row, col): Coord2) -> bool {
        let size = self.size();
        row < size && col < size
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.is_tile_in_grid(coords) {
            Ok(coords)
        } else {
            let (row, col) = coords;
            Err(GameError::OutOfBounds { row, col })
        }
    }

    pub fn tile(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn is_revealed(&self, coords: Coord2) -> Result<bool> {
        self.tile(coords).map(Tile::is_revealed)
    }

    pub fn is_flagged(&self, coords: Coord2) -> Result<bool> {
        self.tile(coords).map(Tile::is_flagged)
    }

    pub fn is_bomb(&self, coords: Coord2) -> Result<bool> {
        self.tile(coords).map(Tile::is_bomb)
    }

    pub fn adjacent_bombs(&self, coords: Coord2) -> Result<u8> {
        self.tile(coords).map(Tile::adjacent_bombs)
    }

    pub fn is_safe_tile(&self, coords: Coord2) -> Result<bool> {
        self.tile(coords).map(Tile::is_safe)
    }

    /// Marks a tile revealed. Nothing checks for bombs or flags here, and a revealed tile stays revealed.
    pub fn set_revealed(&mut self, coords: Coord2, revealed: bool) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.tile_mut(coords).set_revealed(revealed);
        Ok(())
    }

    pub fn set_flagged(&mut self, coords: Coord2, flagged: bool) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.tile_mut(coords).set_flagged(flagged);
        Ok(())
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> Neighbors {
        self.tiles.iter_neighbors(coords)
    }

    /// All tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Tile)> + '_ {
        self.tiles
            .indexed_iter()
            .map(|((row, col), &tile)| ((row as Coord, col as Coord), tile))
    }

    pub(crate) fn tile_mut(&mut self, coords: Coord2) -> &mut Tile {
        &mut self.tiles[coords.to_nd_index()]
    }
}

impl Index<Coord2> for Grid {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}
