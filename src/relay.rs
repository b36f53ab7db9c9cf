//! Playing a game through the line-delimited move relay
//!
//! The relay forwards newline-terminated move tokens between two clients. It
//! also echoes each client's own moves back and announces the end of the game
//! with a message mentioning "wins" or "draw".

use anyhow::{Context, Result};
use log::{debug, info, warn};

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};

use crate::agent::Agent;
use crate::board::{Board, Player};
use crate::game::{Game, GameState};

/// Line-based transport to the relay
pub trait MoveRelay {
    fn send(&mut self, line: &str) -> Result<()>;

    /// The next line without its terminator, `None` once the peer has disconnected
    fn receive(&mut self) -> Result<Option<String>>;
}

pub struct TcpRelay {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl TcpRelay {
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr).context("could not connect to the relay")?;
        let writer = stream.try_clone()?;
        Ok(Self {
            reader: BufReader::new(stream),
            writer,
        })
    }
}

impl MoveRelay for TcpRelay {
    fn send(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn receive(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end().to_string()))
    }
}

/// How a relayed game ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayOutcome {
    Won(Player),
    Draw,
    /// The agent had no move to make
    Forfeit,
    /// The relay announced the end of the game
    Announced(String),
    Disconnected,
}

/// Drives an agent through a game on the relay
pub struct RelayGame<R: MoveRelay> {
    relay: R,
    agent: Agent,
    game: Game,
    depth: u32,
    last_sent: Option<String>,
}

impl<R: MoveRelay> RelayGame<R> {
    pub fn new(relay: R, agent: Agent, depth: u32) -> Self {
        let game = Game::start(*agent.board(), Player::White, agent.zobrist().clone());
        Self {
            relay,
            agent,
            game,
            depth,
            last_sent: None,
        }
    }

    /// Joins `game_id` on the relay as the agent's colour
    pub fn handshake(&mut self, game_id: &str) -> Result<()> {
        let message = format!("{} {}", game_id, self.agent.player().name());
        info!("sending setup message '{}'", message);
        self.relay.send(&message)
    }

    pub fn board(&self) -> &Board {
        self.game.board()
    }

    /// Plays until the game ends or the relay goes away
    pub fn play(&mut self) -> Result<RelayOutcome> {
        if self.agent.player() == Player::White {
            if let Some(outcome) = self.take_turn()? {
                return Ok(outcome);
            }
        }

        loop {
            if let Some(outcome) = self.await_opponent()? {
                return Ok(outcome);
            }
            if let Some(outcome) = self.finished() {
                return Ok(outcome);
            }
            if let Some(outcome) = self.take_turn()? {
                return Ok(outcome);
            }
        }
    }

    // reads messages until the opponent's move arrives or the game ends
    fn await_opponent(&mut self) -> Result<Option<RelayOutcome>> {
        loop {
            let message = match self.relay.receive()? {
                Some(message) => message,
                None => return Ok(Some(RelayOutcome::Disconnected)),
            };
            let lower = message.to_lowercase();
            if lower.contains("wins") || lower.contains("draw") {
                info!("game over: {}", message);
                return Ok(Some(RelayOutcome::Announced(message)));
            }
            if self.last_sent.as_deref() == Some(message.trim()) {
                debug!("ignoring echo of our own move {}", message);
                continue;
            }
            match self.agent.observe_opponent_move(&message) {
                Ok(mv) => {
                    self.game.play(mv)?;
                    return Ok(None);
                }
                Err(err) => warn!("ignoring message '{}': {}", message, err),
            }
        }
    }

    fn take_turn(&mut self) -> Result<Option<RelayOutcome>> {
        match self.agent.decide(self.depth) {
            Some(mv) => {
                self.game.play(mv)?;
                let token = mv.to_string();
                self.relay.send(&token)?;
                self.last_sent = Some(token);
                Ok(self.finished())
            }
            None => {
                self.game.forfeit();
                Ok(Some(RelayOutcome::Forfeit))
            }
        }
    }

    fn finished(&self) -> Option<RelayOutcome> {
        match self.game.state {
            GameState::Playing => None,
            GameState::Won(winner) => Some(RelayOutcome::Won(winner)),
            GameState::Draw => Some(RelayOutcome::Draw),
        }
    }
}
