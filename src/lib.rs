//! Game-playing agents for the sliding-piece board game 'Dynamic Connect-3'
//!
//! Players take turns sliding one of their pieces one square north, south,
//! east or west into an empty neighbouring square. Three of a player's pieces
//! in a row (horizontally, vertically or diagonally) wins, and a position
//! occurring for the third time is a draw.
//!
//! The agent searches the game tree with minimax or alpha-beta pruning,
//! scores leaf positions with a pluggable static evaluator and tracks
//! repeated positions with Zobrist hashing.
//!
//! # Basic Usage
//!
//! ```
//! use std::sync::Arc;
//! use connect3_ai::{agent::Agent, board::{BoardSize, Player}, config::Model, zobrist::ZobristTable};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let zobrist = Arc::new(ZobristTable::from_seed(BoardSize::Standard, 7));
//! let config = "ab2D".parse::<Model>()?.config(BoardSize::Standard);
//!
//! let mut white = Agent::new(Player::White, &config, zobrist.clone());
//! let mut black = Agent::new(Player::Black, &config, zobrist);
//!
//! let first = white.decide(3).expect("white has legal moves");
//! black.observe_opponent_move(&first.to_string())?;
//!
//! assert_eq!(white.board(), black.board());
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod moves;

pub mod zobrist;

pub mod evaluator;

pub mod config;

pub mod search;

pub mod agent;

pub mod game;

pub mod relay;

pub mod analysis;


/// The widest supported board in squares
pub const MAX_WIDTH: usize = 7;

/// The tallest supported board in squares
pub const MAX_HEIGHT: usize = 6;

/// The search depth used when none is configured
pub const DEFAULT_DEPTH: u32 = 4;

// move tokens carry each coordinate as a single 1-indexed digit
const_assert!(MAX_WIDTH <= 9 && MAX_HEIGHT <= 9);
