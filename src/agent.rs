//! An agent playing one side of a game

use log::info;

use std::sync::Arc;

use crate::board::{Board, Player};
use crate::config::{AgentConfig, SearchConfig};
use crate::error::{ConfigError, InvalidMove};
use crate::evaluator::Evaluator;
use crate::moves::Move;
use crate::search::{Line, SearchResult, Searcher};
use crate::zobrist::{History, ZobristTable};

/// Plays one colour, keeping its own copy of the board and of the positions
/// the real game has passed through
///
/// The agent must see every move of the game: its own through [`decide`] and
/// the opponent's through [`observe_opponent_move`].
///
/// [`decide`]: Agent::decide
/// [`observe_opponent_move`]: Agent::observe_opponent_move
pub struct Agent {
    player: Player,
    board: Board,
    zobrist: Arc<ZobristTable>,
    hash: u64,
    history: History,
    search: SearchConfig,
    evaluator: Box<dyn Evaluator>,
}

impl Agent {
    /// Creates an agent for `player` on the starting layout of the table's board size
    pub fn new(player: Player, config: &AgentConfig, zobrist: Arc<ZobristTable>) -> Self {
        let board = Board::new(zobrist.size());
        Self::start(player, board, config, zobrist)
    }

    /// Creates an agent for `player` starting from an arbitrary position
    ///
    /// Fails when the table was drawn for a different board size.
    pub fn with_board(
        player: Player,
        board: Board,
        config: &AgentConfig,
        zobrist: Arc<ZobristTable>,
    ) -> Result<Self, ConfigError> {
        if board.size() != zobrist.size() {
            return Err(ConfigError::SizeMismatch {
                board: board.size(),
                table: zobrist.size(),
            });
        }
        Ok(Self::start(player, board, config, zobrist))
    }

    fn start(player: Player, board: Board, config: &AgentConfig, zobrist: Arc<ZobristTable>) -> Self {
        let hash = zobrist.initial_hash(&board);
        let mut history = History::new();
        history.record(hash);
        Self {
            player,
            board,
            zobrist,
            hash,
            history,
            search: config.search,
            evaluator: config.heuristic.evaluator(),
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn zobrist(&self) -> &Arc<ZobristTable> {
        &self.zobrist
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// How many times the current position has occurred in the game
    pub fn repetitions(&self) -> u32 {
        self.history.count(self.hash)
    }

    /// Searches the current position without playing anything
    pub fn search(&self, depth: u32) -> SearchResult {
        let mut searcher = Searcher::new(self.evaluator.as_ref(), &self.zobrist, self.search);
        let line = Line::new(self.hash, self.history.clone());
        searcher.search(&self.board, self.player, depth, &line)
    }

    /// Chooses and plays this agent's move
    ///
    /// Returns `None` when the agent has no move to make, which forfeits the game.
    pub fn decide(&mut self, depth: u32) -> Option<Move> {
        let result = self.search(depth);
        match result.best_move {
            Some(mv) => {
                info!(
                    "agent {} found best move {} with score {} ({} nodes)",
                    self.player, mv, result.score, result.node_count
                );
                self.play(mv, self.player);
                Some(mv)
            }
            None => {
                info!("agent {} sees a decided position or has no moves", self.player);
                None
            }
        }
    }

    /// Plays the opponent's move given as a `<col><row><dir>` token
    ///
    /// The agent's state is untouched when the token is rejected.
    pub fn observe_opponent_move(&mut self, token: &str) -> Result<Move, InvalidMove> {
        let mv = Move::parse(token, self.board.size())?;
        let opponent = self.player.opponent();
        let next = self.board.try_apply_move(mv, opponent)?;

        self.hash = self.zobrist.update_hash(&self.board, mv, self.hash);
        self.board = next;
        self.history.record(self.hash);

        info!("agent {} acknowledged opponent move {}", self.player, mv);
        Ok(mv)
    }

    fn play(&mut self, mv: Move, mover: Player) {
        self.hash = self.zobrist.update_hash(&self.board, mv, self.hash);
        self.board = self.board.apply_move(mv, mover);
        self.history.record(self.hash);
    }
}
