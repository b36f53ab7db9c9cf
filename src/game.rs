//! The authoritative state of a game between two players

use std::sync::Arc;

use crate::board::{Board, Outcome, Player};
use crate::error::{ConfigError, InvalidMove};
use crate::moves::{legal_moves, Move};
use crate::zobrist::{History, ZobristTable, REPETITION_LIMIT};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    Won(Player),
    Draw,
}

/// Referees a game: validates moves, keeps turn order and detects wins and
/// threefold repetition
#[derive(Clone)]
pub struct Game {
    board: Board,
    to_move: Player,
    zobrist: Arc<ZobristTable>,
    hash: u64,
    history: History,
    pub moves: Vec<Move>,
    pub state: GameState,
}

impl Game {
    /// Starts a game on the starting layout, white to move
    pub fn new(zobrist: Arc<ZobristTable>) -> Self {
        let board = Board::new(zobrist.size());
        Self::start(board, Player::White, zobrist)
    }

    /// Starts a game from an arbitrary position
    ///
    /// The position is already decided when it holds a line of three or the
    /// side to move is boxed in.
    pub fn with_board(
        board: Board,
        to_move: Player,
        zobrist: Arc<ZobristTable>,
    ) -> Result<Self, ConfigError> {
        if board.size() != zobrist.size() {
            return Err(ConfigError::SizeMismatch {
                board: board.size(),
                table: zobrist.size(),
            });
        }
        Ok(Self::start(board, to_move, zobrist))
    }

    // the board and the table must be of the same size
    pub(crate) fn start(board: Board, to_move: Player, zobrist: Arc<ZobristTable>) -> Self {
        let hash = zobrist.initial_hash(&board);
        let mut history = History::new();
        history.record(hash);
        let state = match board.terminal_status() {
            Some(Outcome::Win(winner)) => GameState::Won(winner),
            _ if legal_moves(&board, to_move).is_empty() => GameState::Won(to_move.opponent()),
            _ => GameState::Playing,
        };
        Self {
            board,
            to_move,
            zobrist,
            hash,
            history,
            moves: Vec::new(),
            state,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Parses and plays a `<col><row><dir>` token for the side to move
    pub fn play_checked(&mut self, token: &str) -> Result<GameState, InvalidMove> {
        let mv = Move::parse(token, self.board.size())?;
        self.play(mv)
    }

    /// Plays a move for the side to move
    ///
    /// A move that leaves the opponent without a move wins, the boxed-in
    /// side forfeits.
    pub fn play(&mut self, mv: Move) -> Result<GameState, InvalidMove> {
        if self.state != GameState::Playing {
            return Err(InvalidMove::GameOver);
        }
        let mover = self.to_move;
        let next = self.board.try_apply_move(mv, mover)?;

        self.hash = self.zobrist.update_hash(&self.board, mv, self.hash);
        self.board = next;
        self.moves.push(mv);
        let occurrences = self.history.record(self.hash);

        self.state = if self.board.check_line_of_three(mover) {
            GameState::Won(mover)
        } else if occurrences >= REPETITION_LIMIT {
            GameState::Draw
        } else if legal_moves(&self.board, mover.opponent()).is_empty() {
            GameState::Won(mover)
        } else {
            GameState::Playing
        };
        self.to_move = mover.opponent();

        Ok(self.state)
    }

    /// Ends the game in favour of the opponent of the side to move
    pub fn forfeit(&mut self) -> GameState {
        if self.state == GameState::Playing {
            self.state = GameState::Won(self.to_move.opponent());
        }
        self.state
    }
}
