use alloc::vec;
use core::num::Saturating;

use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
}

/// A click on a tile, already translated from screen space into grid coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub button: MouseButton,
    pub coords: Coord2,
}

impl ClickEvent {
    pub const fn left(coords: Coord2) -> Self {
        Self {
            button: MouseButton::Left,
            coords,
        }
    }

    pub const fn right(coords: Coord2) -> Self {
        Self {
            button: MouseButton::Right,
            coords,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitBomb,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Reveal(RevealOutcome),
    Flag(FlagOutcome),
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Reveal(outcome) => outcome.has_update(),
            Self::Flag(outcome) => outcome.has_update(),
        }
    }
}

/// One game session: owns the grid and decides when it is won or lost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    grid: Grid,
    tiles_to_reveal: CellCount,
    flagged_count: Saturating<CellCount>,
    state: GameState,
    triggered_bomb: Option<Coord2>,
}

impl Game {
    pub fn new(grid: Grid) -> Self {
        Self {
            tiles_to_reveal: grid.safe_tile_count(),
            grid,
            flagged_count: Saturating(0),
            state: GameState::default(),
            triggered_bomb: None,
        }
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Ok(Self::new(Grid::with_seed(config, seed)?))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> GameConfig {
        self.grid.config()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Whether any tile has been revealed yet.
    pub fn has_started(&self) -> bool {
        self.tiles_to_reveal < self.grid.safe_tile_count() || self.is_finished()
    }

    pub fn tiles_to_reveal(&self) -> CellCount {
        self.tiles_to_reveal
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    /// Bombs not yet accounted for by a flag, negative when over-flagged.
    pub fn bombs_left(&self) -> i32 {
        i32::from(self.grid.bomb_count()) - i32::from(self.flagged_count.0)
    }

    pub fn triggered_bomb(&self) -> Option<Coord2> {
        self.triggered_bomb
    }

    pub fn handle_click(&mut self, event: ClickEvent) -> Result<ClickOutcome> {
        match event.button {
            MouseButton::Left => self.reveal(event.coords).map(ClickOutcome::Reveal),
            MouseButton::Right => self.toggle_flag(event.coords).map(ClickOutcome::Flag),
        }
    }

    /// Left click: opens an unrevealed, unflagged tile and cascades from it when it is safe.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_in_progress()?;

        let tile = self.grid[coords];
        if tile.is_revealed() || tile.is_flagged() {
            return Ok(RevealOutcome::NoChange);
        }

        self.grid.tile_mut(coords).set_revealed(true);
        if tile.is_bomb() {
            log::info!("Bomb revealed at {:?}, game lost", coords);
            self.triggered_bomb = Some(coords);
            self.state = GameState::Lost;
            return Ok(RevealOutcome::HitBomb);
        }

        self.tiles_to_reveal -= 1;
        log::debug!(
            "Revealed {:?}, adjacent bombs: {}",
            coords,
            tile.adjacent_bombs()
        );
        if tile.is_safe() {
            let opened = self.flood_fill(coords);
            log::debug!("Flood fill from {:?} opened {} tiles", coords, opened);
        }

        if self.tiles_to_reveal == 0 {
            log::info!("All safe tiles revealed, game won");
            self.state = GameState::Won;
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Right click: flags or unflags an unrevealed tile.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_in_progress()?;

        let tile = self.grid[coords];
        if tile.is_revealed() {
            return Ok(FlagOutcome::NoChange);
        }

        if tile.is_flagged() {
            self.flagged_count -= 1;
        } else {
            self.flagged_count += 1;
        }
        self.grid.tile_mut(coords).set_flagged(!tile.is_flagged());
        Ok(FlagOutcome::Changed)
    }

    /// Opens every tile connected to `origin` through safe tiles, plus the numbered border around them.
    ///
    /// Bombs are never opened. A flag on an opened tile is removed. Returns how many tiles were opened.
    fn flood_fill(&mut self, origin: Coord2) -> CellCount {
        let mut opened = 0;
        let mut pending = vec![origin];

        while let Some(center) = pending.pop() {
            for pos in self.grid.iter_neighbors(center) {
                let tile = self.grid[pos];
                if tile.is_revealed() || tile.is_bomb() {
                    continue;
                }

                if tile.is_flagged() {
                    self.grid.tile_mut(pos).set_flagged(false);
                    self.flagged_count -= 1;
                }
                self.grid.tile_mut(pos).set_revealed(true);
                self.tiles_to_reveal -= 1;
                opened += 1;
                log::trace!(
                    "Flood opened {:?}, adjacent bombs: {}",
                    pos,
                    tile.adjacent_bombs()
                );

                if tile.is_safe() {
                    pending.push(pos);
                }
            }
        }

        opened
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Coord, bombs: &[Coord2]) -> Game {
        Game::new(Grid::from_bomb_coords(size, bombs).unwrap())
    }

    #[test]
    fn empty_grid_opens_fully_in_one_click() {
        let mut game = game(3, &[]);

        assert_eq!(game.reveal((1, 1)), Ok(RevealOutcome::Won));
        assert_eq!(game.state(), GameState::Won);
        assert_eq!(game.tiles_to_reveal(), 0);
        assert!(game.grid().iter().all(|(_, tile)| tile.is_revealed()));
    }

    #[test]
    fn reveal_hits_bomb_and_loses() {
        let mut game = game(2, &[(0, 0)]);

        assert_eq!(game.reveal((0, 0)), Ok(RevealOutcome::HitBomb));
        assert_eq!(game.state(), GameState::Lost);
        assert_eq!(game.triggered_bomb(), Some((0, 0)));
        assert_eq!(game.tiles_to_reveal(), 3);
    }

    #[test]
    fn reveal_decrements_once_per_tile() {
        let mut game = game(3, &[(0, 0), (2, 2)]);

        assert_eq!(game.reveal((1, 1)), Ok(RevealOutcome::Revealed));
        assert_eq!(game.tiles_to_reveal(), 6);
        assert_eq!(game.reveal((1, 1)), Ok(RevealOutcome::NoChange));
        assert_eq!(game.tiles_to_reveal(), 6);
    }

    #[test]
    fn numbered_tile_does_not_cascade() {
        let mut game = game(3, &[(0, 0)]);

        game.reveal((1, 1)).unwrap();

        assert_eq!(game.grid().revealed_count(), 1);
    }

    #[test]
    fn flood_fill_stops_at_numbered_border() {
        // Bombs fill col 2: col 0 is all zeros and col 1 is the numbered border.
        let mut game = game(4, &[(0, 2), (1, 2), (2, 2), (3, 2)]);

        assert_eq!(game.reveal((0, 0)), Ok(RevealOutcome::Revealed));

        for (coords, tile) in game.grid().iter() {
            assert_eq!(tile.is_revealed(), coords.1 < 2, "tile {:?}", coords);
            assert!(!(tile.is_revealed() && tile.is_bomb()));
        }
        assert_eq!(game.tiles_to_reveal(), 4);
    }

    #[test]
    fn flood_fill_follows_diagonal_connections() {
        // (1, 1) and (2, 2) are zeros whose shared orthogonal neighbours (1, 2) and (2, 1) are numbered.
        let mut game = game(4, &[(0, 3), (3, 0)]);

        assert_eq!(game.reveal((0, 0)), Ok(RevealOutcome::Won));
        assert!(game.grid()[(2, 2)].is_revealed());
        assert!(game.grid()[(3, 3)].is_revealed());
        assert!(!game.grid()[(0, 3)].is_revealed());
        assert!(!game.grid()[(3, 0)].is_revealed());
    }

    #[test]
    fn flood_fill_region_border_is_numbered() {
        let config = GameConfig::new(12, 14).unwrap();
        for seed in 0..16 {
            let mut game = Game::with_seed(config, seed).unwrap();
            let Some((origin, _)) = game.grid().iter().find(|(_, tile)| tile.is_safe()) else {
                continue;
            };

            game.reveal(origin).unwrap();

            let grid = game.grid();
            for (coords, tile) in grid.iter() {
                if tile.is_revealed() && tile.is_safe() {
                    for pos in grid.iter_neighbors(coords) {
                        assert!(grid[pos].is_revealed(), "{:?} next to {:?}", pos, coords);
                    }
                }
                assert!(!(tile.is_revealed() && tile.is_bomb()));
            }
            assert_eq!(
                game.tiles_to_reveal(),
                grid.safe_tile_count() - grid.revealed_count()
            );
        }
    }

    #[test]
    fn flagged_tile_ignores_left_click_until_unflagged() {
        let mut game = game(3, &[(0, 0)]);

        assert_eq!(game.toggle_flag((2, 2)), Ok(FlagOutcome::Changed));
        assert_eq!(game.reveal((2, 2)), Ok(RevealOutcome::NoChange));
        assert!(!game.grid()[(2, 2)].is_revealed());
        assert_eq!(game.tiles_to_reveal(), 8);

        assert_eq!(game.toggle_flag((2, 2)), Ok(FlagOutcome::Changed));
        assert_eq!(game.reveal((2, 2)), Ok(RevealOutcome::Won));
        assert!(game.grid()[(2, 2)].is_revealed());
    }

    #[test]
    fn flag_on_revealed_tile_is_noop() {
        let mut game = game(3, &[(0, 0)]);

        game.reveal((1, 1)).unwrap();

        assert_eq!(game.toggle_flag((1, 1)), Ok(FlagOutcome::NoChange));
        assert!(!game.grid()[(1, 1)].is_flagged());
        assert_eq!(game.flagged_count(), 0);
    }

    #[test]
    fn flood_fill_clears_flags_it_opens() {
        let mut game = game(3, &[]);

        game.toggle_flag((2, 2)).unwrap();
        assert_eq!(game.bombs_left(), -1);

        assert_eq!(game.reveal((0, 0)), Ok(RevealOutcome::Won));
        assert!(!game.grid()[(2, 2)].is_flagged());
        assert_eq!(game.flagged_count(), 0);
    }

    #[test]
    fn winning_reveals_only_safe_tiles() {
        let mut game = game(2, &[(0, 0)]);

        game.reveal((0, 1)).unwrap();
        game.reveal((1, 0)).unwrap();
        assert_eq!(game.reveal((1, 1)), Ok(RevealOutcome::Won));
        assert!(!game.grid()[(0, 0)].is_revealed());
    }

    #[test]
    fn finished_game_rejects_moves() {
        let mut game = game(2, &[(0, 0)]);
        game.reveal((0, 0)).unwrap();

        assert_eq!(game.reveal((1, 1)), Err(GameError::AlreadyEnded));
        assert_eq!(game.toggle_flag((1, 1)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn out_of_bounds_click_is_rejected() {
        let mut game = game(2, &[]);

        assert_eq!(
            game.handle_click(ClickEvent::left((2, 0))),
            Err(GameError::OutOfBounds { row: 2, col: 0 })
        );
        assert_eq!(
            game.handle_click(ClickEvent::right((0, 5))),
            Err(GameError::OutOfBounds { row: 0, col: 5 })
        );
    }

    #[test]
    fn click_dispatches_by_button() {
        let mut game = game(3, &[(0, 0)]);

        assert_eq!(
            game.handle_click(ClickEvent::right((0, 0))),
            Ok(ClickOutcome::Flag(FlagOutcome::Changed))
        );
        assert_eq!(
            game.handle_click(ClickEvent::left((0, 0))),
            Ok(ClickOutcome::Reveal(RevealOutcome::NoChange))
        );
        assert_eq!(game.bombs_left(), 0);
    }
}
