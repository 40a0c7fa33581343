use serde::{Deserialize, Serialize};

/// State of a single grid cell.
///
/// `bomb` and `adjacent_bombs` are fixed when the grid is built. `revealed` only ever goes from `false` to `true`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    bomb: bool,
    revealed: bool,
    flagged: bool,
    adjacent_bombs: u8,
}

impl Tile {
    pub const fn new(bomb: bool, adjacent_bombs: u8) -> Self {
        Self {
            bomb,
            revealed: false,
            flagged: false,
            adjacent_bombs,
        }
    }

    pub const fn is_bomb(self) -> bool {
        self.bomb
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    pub const fn adjacent_bombs(self) -> u8 {
        self.adjacent_bombs
    }

    /// A safe tile holds no bomb and touches none, revealing it opens its neighbours too.
    pub const fn is_safe(self) -> bool {
        !self.bomb && self.adjacent_bombs == 0
    }

    pub(crate) fn set_revealed(&mut self, revealed: bool) {
        self.revealed |= revealed;
    }

    pub(crate) fn set_flagged(&mut self, flagged: bool) {
        self.flagged = flagged;
    }
}
