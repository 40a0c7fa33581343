use std::fmt::Write;

use sweeper_core::{BoardView, GameState, TileView};

fn symbol(tile: TileView) -> char {
    match tile {
        TileView::Hidden => '#',
        TileView::Flagged => 'F',
        TileView::Revealed(0) => '.',
        TileView::Revealed(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        TileView::Bomb => '*',
        TileView::TriggeredBomb => 'X',
    }
}

/// Draws the board as text, with column numbers on top and row numbers on the left.
pub(crate) fn render(view: &BoardView) -> String {
    let width = view.size.saturating_sub(1).to_string().len();
    let mut out = String::new();

    let _ = write!(out, "{:width$} ", "");
    for col in 0..view.size {
        let _ = write!(out, " {col:>width$}");
    }
    out.push('\n');

    for (row, tiles) in view.tiles.outer_iter().enumerate() {
        let _ = write!(out, "{row:>width$} ");
        for &tile in tiles {
            let _ = write!(out, " {:>width$}", symbol(tile));
        }
        out.push('\n');
    }

    out.push_str(&status_line(view));
    out
}

pub(crate) fn status_line(view: &BoardView) -> String {
    let state = match view.state {
        GameState::InProgress => "in progress",
        GameState::Won => "won",
        GameState::Lost => "lost",
    };
    format!(
        "{state} | bombs left: {} | tiles to reveal: {}",
        view.bombs_left, view.tiles_to_reveal
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{Game, Grid};

    #[test]
    fn renders_hidden_and_revealed_tiles() {
        let mut game = Game::new(Grid::from_bomb_coords(3, &[(0, 0)]).unwrap());
        game.reveal((1, 1)).unwrap();
        game.toggle_flag((0, 0)).unwrap();

        let text = render(&BoardView::from_game(&game));

        assert_eq!(
            text,
            "   0 1 2\n0  F # #\n1  # 1 #\n2  # # #\nin progress | bombs left: 0 | tiles to reveal: 7"
        );
    }

    #[test]
    fn renders_lost_board() {
        let mut game = Game::new(Grid::from_bomb_coords(2, &[(0, 0), (1, 1)]).unwrap());
        game.reveal((1, 1)).unwrap();

        let text = render(&BoardView::from_game(&game));

        assert!(text.starts_with("   0 1\n0  * #\n1  # X\n"));
        assert!(text.ends_with("lost | bombs left: 2 | tiles to reveal: 2"));
    }

    #[test]
    fn renders_zero_as_dot() {
        let mut game = Game::new(Grid::from_bomb_coords(2, &[]).unwrap());
        game.reveal((0, 0)).unwrap();

        let text = render(&BoardView::from_game(&game));

        assert!(text.starts_with("   0 1\n0  . .\n1  . .\n"));
        assert!(text.ends_with("won | bombs left: 0 | tiles to reveal: 0"));
    }
}
