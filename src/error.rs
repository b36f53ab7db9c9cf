//! Error types surfaced by the agent and its configuration

use thiserror::Error;

use crate::board::{BoardSize, Player};

/// A move that cannot be parsed or cannot be played on the current board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMove {
    #[error("invalid move '{0}', expected <col><row><dir> such as '14E'")]
    Format(String),
    #[error("invalid coordinate '{0}', columns and rows are single digits starting at 1")]
    Coordinate(char),
    #[error("invalid direction '{0}', use N, S, E or W")]
    Direction(char),
    #[error("square ({x}, {y}) is off the board")]
    OffBoard { x: isize, y: isize },
    #[error("square ({x}, {y}) holds no piece")]
    EmptyOrigin { x: usize, y: usize },
    #[error("square ({x}, {y}) holds a piece of {owner}, not {mover}")]
    NotOwner {
        x: usize,
        y: usize,
        owner: Player,
        mover: Player,
    },
    #[error("destination ({x}, {y}) is occupied")]
    Occupied { x: usize, y: usize },
    #[error("destination is not one orthogonal step from the origin")]
    NotAdjacent,
    #[error("the game is already over")]
    GameOver,
}

/// An unknown name or an inconsistent setup in the agent configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown model '{0}'")]
    UnknownModel(String),
    #[error("unknown board size '{0}', use 'standard' or 'large'")]
    UnknownBoardSize(String),
    #[error("unknown colour '{0}', use 'white' or 'black'")]
    UnknownColour(String),
    #[error("a {board} board cannot be hashed with a Zobrist table for a {table} board")]
    SizeMismatch { board: BoardSize, table: BoardSize },
}
