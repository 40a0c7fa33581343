use ndarray::Array2;

use crate::*;

/// Strategy for choosing which tiles hold a bomb.
pub trait BombPlacer {
    /// Returns a `size` x `size` mask with `true` on every bomb tile.
    ///
    /// `config` is expected to be validated, [`Grid::new`] rejects masks that do not match it.
    fn place(self, config: GameConfig) -> Array2<bool>;
}

/// Places bombs uniformly at random, without replacement, from a seeded generator.
///
/// The same seed and config always produce the same layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomBombPlacer {
    seed: u64,
}

impl RandomBombPlacer {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl BombPlacer for RandomBombPlacer {
    fn place(self, config: GameConfig) -> Array2<bool> {
        use rand::prelude::*;

        let size = usize::from(config.size());
        let total_tiles = usize::from(config.total_tiles());
        let bombs = usize::from(config.bombs()).min(total_tiles);
        let mut mask: Array2<bool> = Array2::default([size, size]);

        let mut rng = SmallRng::seed_from_u64(self.seed);
        for index in rand::seq::index::sample(&mut rng, total_tiles, bombs) {
            mask[[index / size, index % size]] = true;
        }

        log::debug!(
            "Placed {} bombs on a {}x{} grid with seed {}",
            bombs,
            size,
            size,
            self.seed
        );
        mask
    }
}
