use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer should draw for a single tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    Bomb,
    TriggeredBomb,
}

impl TileView {
    /// A flag takes precedence over anything else, then the revealed content.
    pub fn of(tile: Tile) -> Self {
        if tile.is_flagged() {
            Self::Flagged
        } else if !tile.is_revealed() {
            Self::Hidden
        } else if tile.is_bomb() {
            Self::Bomb
        } else {
            Self::Revealed(tile.adjacent_bombs())
        }
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

/// Player-visible snapshot of a game, handed to renderers and serialized by front ends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord,
    pub state: GameState,
    pub bombs_left: i32,
    pub tiles_to_reveal: CellCount,
    pub tiles: Array2<TileView>,
}

impl BoardView {
    pub fn from_game(game: &Game) -> Self {
        let grid = game.grid();
        let lost = game.state() == GameState::Lost;

        let mut tiles = Array2::from_elem((grid.size(), grid.size()).to_nd_index(), TileView::Hidden);
        for (coords, tile) in grid.iter() {
            tiles[coords.to_nd_index()] = match TileView::of(tile) {
                _ if game.triggered_bomb() == Some(coords) => TileView::TriggeredBomb,
                // a lost game uncovers the rest of the bombs
                TileView::Hidden if lost && tile.is_bomb() => TileView::Bomb,
                view => view,
            };
        }

        Self {
            size: grid.size(),
            state: game.state(),
            bombs_left: game.bombs_left(),
            tiles_to_reveal: game.tiles_to_reveal(),
            tiles,
        }
    }

    pub fn tile(&self, coords: Coord2) -> TileView {
        self.tiles[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Coord, bombs: &[Coord2]) -> Game {
        Game::new(Grid::from_bomb_coords(size, bombs).unwrap())
    }

    #[test]
    fn fresh_board_is_hidden() {
        let view = BoardView::from_game(&game(3, &[(1, 1)]));

        assert!(view.tiles.iter().all(|&tile| tile == TileView::Hidden));
        assert_eq!(view.bombs_left, 1);
        assert_eq!(view.state, GameState::InProgress);
    }

    #[test]
    fn maps_flags_and_counts() {
        let mut game = game(3, &[(0, 0)]);
        game.reveal((1, 1)).unwrap();
        game.toggle_flag((0, 0)).unwrap();

        let view = BoardView::from_game(&game);

        assert_eq!(view.tile((1, 1)), TileView::Revealed(1));
        assert_eq!(view.tile((0, 0)), TileView::Flagged);
        assert_eq!(view.tile((2, 2)), TileView::Hidden);
        assert_eq!(view.bombs_left, 0);
    }

    #[test]
    fn lost_board_marks_triggered_and_remaining_bombs() {
        let mut game = game(3, &[(0, 0), (2, 2)]);
        game.reveal((0, 0)).unwrap();

        let view = BoardView::from_game(&game);

        assert_eq!(view.state, GameState::Lost);
        assert_eq!(view.tile((0, 0)), TileView::TriggeredBomb);
        assert_eq!(view.tile((2, 2)), TileView::Bomb);
        assert_eq!(view.tile((1, 1)), TileView::Hidden);
    }

    #[test]
    fn tile_view_prefers_flag() {
        let mut grid = Grid::from_bomb_coords(2, &[(0, 0)]).unwrap();
        grid.set_revealed((0, 0), true).unwrap();
        grid.set_flagged((0, 0), true).unwrap();

        assert_eq!(TileView::of(grid[(0, 0)]), TileView::Flagged);

        grid.set_flagged((0, 0), false).unwrap();
        assert_eq!(TileView::of(grid[(0, 0)]), TileView::Bomb);
    }

    #[test]
    fn board_view_serializes() {
        let view = BoardView::from_game(&game(2, &[]));
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["size"], 2);
        assert_eq!(json["state"], "InProgress");
    }
}
