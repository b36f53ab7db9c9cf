use anyhow::{anyhow, Result};
use indicatif::*;

use std::env;
use std::sync::Arc;
use std::time::{Duration, Instant};

use connect3_ai::analysis::{node_count_grid, self_play};
use connect3_ai::board::BoardSize;
use connect3_ai::config::{AgentConfig, Model, MoveOrder};
use connect3_ai::game::GameState;
use connect3_ai::zobrist::ZobristTable;

// plies played per self-play game and games per pairing
const MATCH_PLIES: usize = 10;
const MATCH_GAMES: usize = 3;

fn mean_ms(times: &[Duration]) -> f64 {
    if times.is_empty() {
        return 0.0;
    }
    (times.iter().sum::<Duration>() / times.len() as u32).as_secs_f64() * 1000.0
}

/// Usage: connect3_analysis [standard|large] [max depth]
fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let size = match args.next() {
        Some(arg) => arg.parse::<BoardSize>()?,
        None => BoardSize::Standard,
    };
    let max_depth = match args.next() {
        Some(arg) => arg
            .parse::<u32>()
            .map_err(|_| anyhow!("could not parse '{}' as a depth", arg))?,
        None => 5,
    };
    let depths: Vec<u32> = (3..=max_depth.max(3)).collect();
    let zobrist = Arc::new(ZobristTable::from_seed(size, 0xC3));

    // node counts: both algorithms, each move order
    let mut configs: Vec<(String, AgentConfig)> = Vec::new();
    for &model in [Model::Mm, Model::Ab, Model::Ab2, Model::Ab2D].iter() {
        for &(order, name) in [
            (MoveOrder::Generated, "normal"),
            (MoveOrder::Reversed, "reversed"),
            (MoveOrder::Heuristic, "ordered"),
        ]
        .iter()
        {
            let config = model.config(size);
            let config = config.with_search(config.search.with_move_order(order));
            configs.push((format!("{} ({})", model, name), config));
        }
    }

    println!("Counting visited states on the {} board", size);
    let start = Instant::now();
    let progress = ProgressBar::new((configs.len() * depths.len()) as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Searching: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );
    let counts = node_count_grid(&configs, &depths, zobrist.clone(), |_| progress.inc(1));
    progress.finish();
    println!("Searches completed in {}", HumanDuration(start.elapsed()));

    println!("\n{:<18} {:>5} {:>12} {:>10} {:>10}", "model", "depth", "states", "score", "ms");
    for count in counts.iter() {
        println!(
            "{:<18} {:>5} {:>12} {:>10} {:>10.1}",
            count.label,
            count.depth,
            count.nodes,
            count.score,
            count.elapsed.as_secs_f64() * 1000.0
        );
    }

    // self-play timings, white's first moves
    println!("\nTiming self-play, {} plies per game", MATCH_PLIES);
    let pairings = [
        (Model::Mm2, Model::Mm2),
        (Model::Mm2D, Model::Mm2D),
        (Model::Ab2, Model::Ab2),
        (Model::Ab2D, Model::Ab2D),
    ];
    for &depth in depths.iter() {
        for &(white, black) in pairings.iter() {
            let mut white_times = Vec::new();
            let mut outcomes = Vec::new();
            for game in 0..MATCH_GAMES {
                let table = Arc::new(ZobristTable::from_seed(size, game as u64));
                let report = self_play(&white.config(size), &black.config(size), table, depth, MATCH_PLIES)?;
                white_times.extend(report.white_times);
                outcomes.push(match report.state {
                    GameState::Playing => "unfinished".to_string(),
                    GameState::Won(winner) => format!("{} won", winner.name()),
                    GameState::Draw => "draw".to_string(),
                });
            }
            println!(
                "depth {} {:>5} vs {:<5} mean white move {:>9.2}ms  [{}]",
                depth,
                white,
                black,
                mean_ms(&white_times),
                outcomes.join(", ")
            );
        }
    }
    Ok(())
}
