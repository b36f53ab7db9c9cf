//! Depth-limited game tree search
//!
//! Scores are always from white's point of view: white maximizes and black
//! minimizes.

use log::debug;

use crate::board::{Board, Player};
use crate::config::{Algorithm, MoveOrder, SearchConfig};
use crate::evaluator::{move_order_key, Evaluator, Score, DRAW_SCORE, LOSS_SCORE, WIN_SCORE};
use crate::moves::{legal_moves, Move};
use crate::zobrist::{History, ZobristTable, REPETITION_LIMIT};

/// Sorts moves by an ordering key, best for the side to move first
///
/// Moves are pushed in reverse generation order and popped from the top, so
/// moves with equal keys come out in generation order.
struct MoveSorter {
    moves: Vec<(Move, i32)>,
}

impl MoveSorter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            moves: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, new_move: Move, score: i32) {
        let mut pos = self.moves.len();
        while pos != 0 && self.moves[pos - 1].1 > score {
            pos -= 1;
        }
        self.moves.insert(pos, (new_move, score));
    }
}

impl Iterator for MoveSorter {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        self.moves.pop().map(|(mv, _)| mv)
    }
}

/// The repetition state of a line of play: the current hash and the count of
/// every position on the way to it
#[derive(Clone, Debug, Default)]
pub struct Line {
    pub hash: u64,
    pub history: History,
}

impl Line {
    pub fn new(hash: u64, history: History) -> Self {
        Self { hash, history }
    }

    /// The line after `mv` is played on `board`, with the occurrence count of
    /// the resulting position
    ///
    /// The history is copied so sibling branches never see each other's positions.
    pub fn extend(&self, board: &Board, mv: Move, zobrist: &ZobristTable) -> (Line, u32) {
        let hash = zobrist.update_hash(board, mv, self.hash);
        let mut history = self.history.clone();
        let count = history.record(hash);
        (Line { hash, history }, count)
    }
}

/// The score of the searched position and the move achieving it
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub score: Score,
    /// `None` when the side to move has no move or the position is already decided
    pub best_move: Option<Move>,
    /// Positions visited by the search
    pub node_count: usize,
}

/// A minimax / alpha-beta searcher
///
/// # Notes
/// Every node either evaluates the position statically (a decided position,
/// the depth limit, or no move for the side to move) or searches each
/// candidate move on its own copy of the board. The first move reaching the
/// best score is kept, so equal moves resolve in candidate order.
pub struct Searcher<'a> {
    evaluator: &'a dyn Evaluator,
    zobrist: &'a ZobristTable,
    config: SearchConfig,

    /// The number of nodes searched by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
}

impl<'a> Searcher<'a> {
    pub fn new(evaluator: &'a dyn Evaluator, zobrist: &'a ZobristTable, config: SearchConfig) -> Self {
        Self {
            evaluator,
            zobrist,
            config,
            node_count: 0,
        }
    }

    /// Searches `depth` plies from `board` with `side` to move
    ///
    /// `line` holds the hash of `board` and the positions played so far; it is
    /// only consulted when repetition scoring is enabled.
    pub fn search(&mut self, board: &Board, side: Player, depth: u32, line: &Line) -> SearchResult {
        self.node_count = 0;
        let line = if self.config.repetition {
            Some(line)
        } else {
            None
        };

        let (score, best_move) = self.node(board, side, depth, LOSS_SCORE, WIN_SCORE, line);

        debug!(
            "searched {} nodes at depth {} ({:?}, {:?} order, repetition {}): score {}",
            self.node_count,
            depth,
            self.config.algorithm,
            self.config.move_order,
            self.config.repetition,
            score
        );

        SearchResult {
            score,
            best_move,
            node_count: self.node_count,
        }
    }

    fn node(
        &mut self,
        board: &Board,
        side: Player,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
        line: Option<&Line>,
    ) -> (Score, Option<Move>) {
        self.node_count += 1;

        let status = board.terminal_status();
        if status.is_some() || depth == 0 {
            return (self.evaluator.evaluate(board, status, Player::White), None);
        }

        let candidates = self.candidates(board, side);
        // a boxed-in side is scored where it stands
        if candidates.is_empty() {
            return (self.evaluator.evaluate(board, None, Player::White), None);
        }

        let maximizing = side.is_maximizing();
        let mut best_score = if maximizing { LOSS_SCORE } else { WIN_SCORE };
        let mut best_move = candidates.first().copied();

        for mv in candidates {
            let next = board.apply_move(mv, side);

            let score = match line {
                Some(line) => {
                    let (next_line, count) = line.extend(board, mv, self.zobrist);
                    if count >= REPETITION_LIMIT {
                        DRAW_SCORE
                    } else {
                        self.node(&next, side.opponent(), depth - 1, alpha, beta, Some(&next_line))
                            .0
                    }
                }
                None => self.node(&next, side.opponent(), depth - 1, alpha, beta, None).0,
            };

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
            } else if score < best_score {
                best_score = score;
                best_move = Some(mv);
            }

            if self.config.algorithm == Algorithm::AlphaBeta {
                if maximizing {
                    alpha = alpha.max(best_score);
                } else {
                    beta = beta.min(best_score);
                }
                // the other side already has a better alternative elsewhere
                if beta <= alpha {
                    break;
                }
            }
        }

        (best_score, best_move)
    }

    fn candidates(&self, board: &Board, side: Player) -> Vec<Move> {
        let mut moves = legal_moves(board, side);
        match self.config.move_order {
            MoveOrder::Generated => moves,
            MoveOrder::Reversed => {
                moves.reverse();
                moves
            }
            MoveOrder::Heuristic => {
                let mut sorter = MoveSorter::with_capacity(moves.len());
                for &mv in moves.iter().rev() {
                    let key = move_order_key(board, mv, side);
                    // black wants the balance as low as possible
                    sorter.push(mv, if side.is_maximizing() { key } else { -key });
                }
                moves.clear();
                moves.extend(sorter);
                moves
            }
        }
    }
}
