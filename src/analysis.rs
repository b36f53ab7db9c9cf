//! Search experiments: node counts per configuration and self-play timings

use anyhow::Result;
use log::debug;
use rayon::prelude::*;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::agent::Agent;
use crate::board::Player;
use crate::config::AgentConfig;
use crate::evaluator::Score;
use crate::game::{Game, GameState};
use crate::moves::Move;
use crate::zobrist::ZobristTable;

/// Cost of one root search from the starting position
#[derive(Clone, Debug, PartialEq)]
pub struct NodeCount {
    pub label: String,
    pub depth: u32,
    pub nodes: usize,
    pub score: Score,
    pub elapsed: Duration,
}

/// Searches the starting position with white to move and reports its cost
pub fn count_nodes(
    label: &str,
    config: &AgentConfig,
    zobrist: Arc<ZobristTable>,
    depth: u32,
) -> NodeCount {
    let agent = Agent::new(Player::White, config, zobrist);
    let start = Instant::now();
    let result = agent.search(depth);
    NodeCount {
        label: label.to_string(),
        depth,
        nodes: result.node_count,
        score: result.score,
        elapsed: start.elapsed(),
    }
}

/// Runs [`count_nodes`] for every configuration at every depth in parallel
///
/// Results come back ordered by configuration, then depth. `on_done` is
/// called once per finished search, from whichever thread ran it.
pub fn node_count_grid<F>(
    configs: &[(String, AgentConfig)],
    depths: &[u32],
    zobrist: Arc<ZobristTable>,
    on_done: F,
) -> Vec<NodeCount>
where
    F: Fn(&NodeCount) + Sync,
{
    let jobs: Vec<(&str, &AgentConfig, u32)> = configs
        .iter()
        .flat_map(|(label, config)| depths.iter().map(move |&depth| (label.as_str(), config, depth)))
        .collect();

    jobs.par_iter()
        .map(|&(label, config, depth)| {
            let count = count_nodes(label, config, zobrist.clone(), depth);
            on_done(&count);
            count
        })
        .collect()
}

/// A game between two agents with the thinking time of every move
#[derive(Clone, Debug)]
pub struct MatchReport {
    pub moves: Vec<Move>,
    pub state: GameState,
    pub white_times: Vec<Duration>,
    pub black_times: Vec<Duration>,
}

/// Plays the agents against each other for at most `max_plies` plies
pub fn self_play(
    white: &AgentConfig,
    black: &AgentConfig,
    zobrist: Arc<ZobristTable>,
    depth: u32,
    max_plies: usize,
) -> Result<MatchReport> {
    let mut agents = [
        Agent::new(Player::White, white, zobrist.clone()),
        Agent::new(Player::Black, black, zobrist.clone()),
    ];
    let mut game = Game::new(zobrist);
    let mut white_times = Vec::new();
    let mut black_times = Vec::new();

    while game.state == GameState::Playing && game.moves.len() < max_plies {
        let side = game.to_move();
        let start = Instant::now();
        let decision = agents[side.index()].decide(depth);
        match side {
            Player::White => white_times.push(start.elapsed()),
            Player::Black => black_times.push(start.elapsed()),
        }

        match decision {
            Some(mv) => {
                game.play(mv)?;
                agents[side.opponent().index()].observe_opponent_move(&mv.to_string())?;
                debug!("{} played {}", side, mv);
            }
            None => {
                game.forfeit();
            }
        }
    }

    Ok(MatchReport {
        moves: game.moves.clone(),
        state: game.state,
        white_times,
        black_times,
    })
}
