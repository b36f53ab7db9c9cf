//! Agent configuration: heuristic weights, search flags and named presets

use std::fmt;
use std::str::FromStr;

use crate::board::BoardSize;
use crate::error::ConfigError;
use crate::evaluator::{Evaluator, NaiveEvaluator, Score, ThreatEvaluator};
use crate::DEFAULT_DEPTH;

/// Weights of the threat-aware heuristic
///
/// Each term is scored as `weight * (own - defense * opponent)`. A side with
/// at least `mate_threshold` forcing threats is scored `+/- mate_score`,
/// which ranks below an actual win and above every blended score.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ThreatWeights {
    pub threat: Score,
    pub pattern: Score,
    pub runs: Score,
    pub position: Score,
    /// Multiplier on the opponent's terms, above 1 favours defence
    pub defense: Score,
    pub mate_threshold: usize,
    pub mate_score: Score,
}

impl ThreatWeights {
    pub const fn v2() -> Self {
        Self {
            threat: 10.0,
            pattern: 2.0,
            runs: 1.0,
            position: 1.0,
            defense: 1.5,
            mate_threshold: 2,
            mate_score: 9999.0,
        }
    }

    /// Drops runs of two, leaving threats, patterns and placement
    pub const fn v3() -> Self {
        Self::v2().without_runs()
    }

    /// Tuning used on the large board, where patterns and placement matter more
    pub const fn large() -> Self {
        Self {
            pattern: 4.0,
            position: 2.0,
            ..Self::v2()
        }
    }

    /// The same weights with the runs-of-two term switched off
    pub const fn without_runs(self) -> Self {
        Self { runs: 0.0, ..self }
    }

    pub fn with_defense(mut self, defense: Score) -> Self {
        self.defense = defense;
        self
    }

    pub fn with_mate_threshold(mut self, mate_threshold: usize) -> Self {
        self.mate_threshold = mate_threshold;
        self
    }
}

impl Default for ThreatWeights {
    fn default() -> Self {
        Self::v2()
    }
}

/// The static evaluator used at search leaves
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Heuristic {
    Naive,
    Threat(ThreatWeights),
}

impl Heuristic {
    pub fn evaluator(&self) -> Box<dyn Evaluator> {
        match self {
            Heuristic::Naive => Box::new(NaiveEvaluator),
            Heuristic::Threat(weights) => Box::new(ThreatEvaluator::new(*weights)),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Algorithm {
    Minimax,
    AlphaBeta,
}

/// Order in which a node's candidate moves are searched
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum MoveOrder {
    /// Generation order
    Generated,
    /// Generation order reversed
    Reversed,
    /// Best runs-of-two balance for the side to move first
    Heuristic,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    pub move_order: MoveOrder,
    /// Score lines reaching a threefold repetition as draws
    pub repetition: bool,
}

impl SearchConfig {
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_move_order(mut self, move_order: MoveOrder) -> Self {
        self.move_order = move_order;
        self
    }

    pub fn with_repetition(mut self, repetition: bool) -> Self {
        self.repetition = repetition;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::AlphaBeta,
            move_order: MoveOrder::Generated,
            repetition: true,
        }
    }
}

/// Everything needed to build an agent apart from its colour and Zobrist table
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AgentConfig {
    pub search: SearchConfig,
    pub heuristic: Heuristic,
    /// Search depth in plies used by the command line tools
    pub depth: u32,
}

impl AgentConfig {
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Model::Ab2D.config(BoardSize::Standard)
    }
}

/// Named agent presets
///
/// `mm` is plain minimax and `ab` alpha-beta. A `2` selects the threat-aware
/// heuristic, a `3` the threat-aware heuristic without runs of two plus move
/// ordering, and a trailing `D` enables repetition-aware draw scoring.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Model {
    Mm,
    MmD,
    Mm2,
    Mm2D,
    Ab,
    AbD,
    Ab2,
    Ab2D,
    Ab3,
    Ab3D,
}

impl Model {
    pub const ALL: [Model; 10] = [
        Model::Mm,
        Model::MmD,
        Model::Mm2,
        Model::Mm2D,
        Model::Ab,
        Model::AbD,
        Model::Ab2,
        Model::Ab2D,
        Model::Ab3,
        Model::Ab3D,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Model::Mm => "mm",
            Model::MmD => "mmD",
            Model::Mm2 => "mm2",
            Model::Mm2D => "mm2D",
            Model::Ab => "ab",
            Model::AbD => "abD",
            Model::Ab2 => "ab2",
            Model::Ab2D => "ab2D",
            Model::Ab3 => "ab3",
            Model::Ab3D => "ab3D",
        }
    }

    /// The configuration of this preset on a board of `size`
    pub fn config(self, size: BoardSize) -> AgentConfig {
        use Model::*;

        let algorithm = match self {
            Mm | MmD | Mm2 | Mm2D => Algorithm::Minimax,
            _ => Algorithm::AlphaBeta,
        };
        let repetition = matches!(self, MmD | Mm2D | AbD | Ab2D | Ab3D);
        let move_order = match self {
            Ab3 | Ab3D => MoveOrder::Heuristic,
            _ => MoveOrder::Generated,
        };
        let threat_weights = match size {
            BoardSize::Standard => ThreatWeights::v2(),
            BoardSize::Large => ThreatWeights::large(),
        };
        let heuristic = match self {
            Mm | MmD | Ab | AbD => Heuristic::Naive,
            Mm2 | Mm2D | Ab2 | Ab2D => Heuristic::Threat(threat_weights),
            Ab3 | Ab3D => Heuristic::Threat(threat_weights.without_runs()),
        };

        AgentConfig {
            search: SearchConfig {
                algorithm,
                move_order,
                repetition,
            },
            heuristic,
            depth: DEFAULT_DEPTH,
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Model {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Model::ALL
            .iter()
            .copied()
            .find(|model| model.name() == name)
            .ok_or_else(|| ConfigError::UnknownModel(name.to_string()))
    }
}
