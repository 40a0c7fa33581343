use std::num::ParseIntError;

use sweeper_core::{ClickEvent, Coord, Coord2};
use thiserror::Error;

/// A line typed by the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Click(ClickEvent),
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParseError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}")]
    UnknownCommand(String),
    #[error("Expected `{0} <row> <col>`")]
    MissingCoords(&'static str),
    #[error("Invalid coordinate: {0}")]
    InvalidCoord(#[from] ParseIntError),
}

pub(crate) const HELP: &str = "commands: r <row> <col> (reveal), f <row> <col> (flag), q (quit)";

pub(crate) fn parse_command(line: &str) -> Result<Command, ParseError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(ParseError::Empty);
    };

    let (name, click): (&'static str, fn(Coord2) -> ClickEvent) = match verb {
        "q" | "quit" => return Ok(Command::Quit),
        "r" | "reveal" => ("r", ClickEvent::left),
        "f" | "flag" => ("f", ClickEvent::right),
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    let (Some(row), Some(col), None) = (words.next(), words.next(), words.next()) else {
        return Err(ParseError::MissingCoords(name));
    };
    let coords = (row.parse::<Coord>()?, col.parse::<Coord>()?);
    Ok(Command::Click(click(coords)))
}
