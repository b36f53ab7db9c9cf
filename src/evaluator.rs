//! Static evaluation of positions
//!
//! Every evaluator scores terminal positions the same way: `+inf` when the
//! perspective player has won, `-inf` when the opponent has, and `0` for a
//! draw. Non-terminal positions get a heuristic score from the perspective
//! player's point of view.

use crate::board::{Board, BoardSize, Cell, Coord, Outcome, Player};
use crate::config::ThreatWeights;
use crate::moves::{Direction, Move};

/// Search and evaluation score, higher is better for the perspective player
pub type Score = f64;

/// Score of a won position
pub const WIN_SCORE: Score = f64::INFINITY;

/// Score of a lost position
pub const LOSS_SCORE: Score = f64::NEG_INFINITY;

/// Score of a drawn position
pub const DRAW_SCORE: Score = 0.0;

/// A static evaluation function
pub trait Evaluator: Send + Sync {
    /// Scores `board` from `perspective`'s point of view
    ///
    /// `status` is the terminal status of the position, `None` while the game
    /// is still running.
    fn evaluate(&self, board: &Board, status: Option<Outcome>, perspective: Player) -> Score;
}

fn terminal_score(status: Option<Outcome>, perspective: Player) -> Option<Score> {
    match status {
        Some(Outcome::Win(winner)) if winner == perspective => Some(WIN_SCORE),
        Some(Outcome::Win(_)) => Some(LOSS_SCORE),
        Some(Outcome::Draw) => Some(DRAW_SCORE),
        None => None,
    }
}

/// Counts pairs of `player`'s pieces one step apart along a line direction
pub fn runs_of_two(board: &Board, player: Player) -> usize {
    let piece = Cell::Piece(player);
    board
        .size()
        .segments::<2>()
        .filter(|run| run.iter().all(|&at| board.cell(at) == piece))
        .count()
}

/// Open three-square windows holding two of a player's pieces
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct ThreatCount {
    /// Windows completed next turn by a third piece already beside the gap
    pub threats: usize,
    /// The remaining two-piece windows
    pub patterns: usize,
}

/// Classifies every window of three holding two of `player`'s pieces and one gap
///
/// A window is a forcing threat when a third piece of `player`, outside the
/// window, sits orthogonally next to the gap and can slide into it.
///
/// Windows are counted one by one, so two windows sharing a gap count as two
/// threats even though a single piece in that gap blocks both. `0 0 . 0 0`
/// on one row is two threats and reaches the default mate threshold.
pub fn count_threats(board: &Board, player: Player) -> ThreatCount {
    let piece = Cell::Piece(player);
    let mut count = ThreatCount::default();

    for window in board.size().segments::<3>() {
        let own = window.iter().filter(|&&at| board.cell(at) == piece).count();
        let gap = window.iter().copied().find(|&at| board.cell(at).is_empty());
        let gap = match (own, gap) {
            (2, Some(gap)) => gap,
            _ => continue,
        };

        let forcing = Direction::ALL.iter().any(|direction| {
            let (dx, dy) = direction.delta();
            let (x, y) = gap.offset(dx, dy);
            match board.get(x, y) {
                Some(cell) if cell == piece => {
                    !window.contains(&Coord::new(x as usize, y as usize))
                }
                _ => false,
            }
        });

        if forcing {
            count.threats += 1;
        } else {
            count.patterns += 1;
        }
    }
    count
}

/// Positional value of a square, largest in the centre and falling towards the edges
pub fn position_weight(size: BoardSize, at: Coord) -> u32 {
    let rank = |i: usize, n: usize| (i + 1).min(n - i) as u32;
    rank(at.x, size.width()) * rank(at.y, size.height())
}

pub fn position_score(board: &Board, player: Player) -> u32 {
    board
        .pieces(player)
        .map(|at| position_weight(board.size(), at))
        .sum()
}

/// Ordering key of a candidate move: runs of two for white minus runs of two
/// for black once the move is played
pub fn move_order_key(board: &Board, mv: Move, mover: Player) -> i32 {
    let next = board.apply_move(mv, mover);
    runs_of_two(&next, Player::White) as i32 - runs_of_two(&next, Player::Black) as i32
}

/// Scores adjacency alone: own runs of two minus the opponent's
#[derive(Copy, Clone, Debug, Default)]
pub struct NaiveEvaluator;

impl Evaluator for NaiveEvaluator {
    fn evaluate(&self, board: &Board, status: Option<Outcome>, perspective: Player) -> Score {
        if let Some(score) = terminal_score(status, perspective) {
            return score;
        }
        runs_of_two(board, perspective) as Score
            - runs_of_two(board, perspective.opponent()) as Score
    }
}

/// Pattern-aware evaluation weighing forcing threats, winning patterns, runs
/// of two and piece placement, in that order of importance
#[derive(Copy, Clone, Debug, Default)]
pub struct ThreatEvaluator {
    weights: ThreatWeights,
}

impl ThreatEvaluator {
    pub fn new(weights: ThreatWeights) -> Self {
        Self { weights }
    }
}

impl Evaluator for ThreatEvaluator {
    fn evaluate(&self, board: &Board, status: Option<Outcome>, perspective: Player) -> Score {
        if let Some(score) = terminal_score(status, perspective) {
            return score;
        }
        let w = &self.weights;
        let opponent = perspective.opponent();

        let mine = count_threats(board, perspective);
        let theirs = count_threats(board, opponent);

        // two unstoppable threats cannot both be blocked
        if mine.threats >= w.mate_threshold {
            return w.mate_score;
        }
        if theirs.threats >= w.mate_threshold {
            return -w.mate_score;
        }

        let blend = |weight: Score, own: Score, other: Score| weight * (own - w.defense * other);

        blend(w.threat, mine.threats as Score, theirs.threats as Score)
            + blend(w.pattern, mine.patterns as Score, theirs.patterns as Score)
            + blend(
                w.runs,
                runs_of_two(board, perspective) as Score,
                runs_of_two(board, opponent) as Score,
            )
            + blend(
                w.position,
                position_score(board, perspective) as Score,
                position_score(board, opponent) as Score,
            )
    }
}
