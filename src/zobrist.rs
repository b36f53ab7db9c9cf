//! Zobrist hashing of board positions and repetition counting

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use std::collections::HashMap;

use crate::board::{Board, BoardSize, Cell, Coord, Player};
use crate::moves::Move;
use crate::{MAX_HEIGHT, MAX_WIDTH};

/// Number of occurrences of a position that ends the game in a draw
pub const REPETITION_LIMIT: u32 = 3;

/// Random keys for every (owner, row, column) triple of one board size
///
/// A table is fixed for the lifetime of a game, the position hash is the XOR
/// of the keys of every occupied square.
#[derive(Clone, Debug)]
pub struct ZobristTable {
    size: BoardSize,
    keys: [[[u64; MAX_WIDTH]; MAX_HEIGHT]; 2],
}

impl ZobristTable {
    /// Draws a fresh table from `rng`
    pub fn new<R: Rng + ?Sized>(size: BoardSize, rng: &mut R) -> Self {
        let mut keys = [[[0u64; MAX_WIDTH]; MAX_HEIGHT]; 2];
        for owner in keys.iter_mut() {
            for row in owner.iter_mut().take(size.height()) {
                for key in row.iter_mut().take(size.width()) {
                    *key = rng.gen::<u64>();
                }
            }
        }
        Self { size, keys }
    }

    /// Creates a reproducible table
    pub fn from_seed(size: BoardSize, seed: u64) -> Self {
        Self::new(size, &mut StdRng::seed_from_u64(seed))
    }

    /// Creates a table seeded from operating system entropy
    pub fn from_entropy(size: BoardSize) -> Self {
        Self::new(size, &mut StdRng::from_entropy())
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn key(&self, owner: Player, at: Coord) -> u64 {
        self.keys[owner.index()][at.y][at.x]
    }

    /// Hashes a position from scratch
    pub fn initial_hash(&self, board: &Board) -> u64 {
        debug_assert_eq!(board.size(), self.size);
        board
            .size()
            .coords()
            .filter_map(|at| board.cell(at).owner().map(|owner| self.key(owner, at)))
            .fold(0, |hash, key| hash ^ key)
    }

    /// Hash of the position after `mv` is played on `before`
    ///
    /// The moving piece is read from `before`, so this must be called with the
    /// same pre-move board the move is applied to.
    pub fn update_hash(&self, before: &Board, mv: Move, hash: u64) -> u64 {
        match before.cell(mv.from) {
            Cell::Piece(owner) => hash ^ self.key(owner, mv.from) ^ self.key(owner, mv.to),
            Cell::Empty => {
                debug_assert!(false, "no piece to move on {:?}", mv.from);
                hash
            }
        }
    }
}

/// Occurrence counts of position hashes along a line of play
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    counts: HashMap<u64, u32>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one more occurrence of `hash`, returning the new count
    pub fn record(&mut self, hash: u64) -> u32 {
        let count = self.counts.entry(hash).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, hash: u64) -> u32 {
        self.counts.get(&hash).copied().unwrap_or(0)
    }

    pub fn is_threefold(&self, hash: u64) -> bool {
        self.count(hash) >= REPETITION_LIMIT
    }

    /// Number of distinct positions seen
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
