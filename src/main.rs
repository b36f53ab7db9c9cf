use anyhow::Result;

use std::io::{stdin, stdout, Write};
use std::str::FromStr;
use std::sync::Arc;

use connect3_ai::agent::Agent;
use connect3_ai::board::{BoardSize, Player};
use connect3_ai::config::Model;
use connect3_ai::game::{Game, GameState};
use connect3_ai::moves::Move;
use connect3_ai::relay::{RelayGame, RelayOutcome, TcpRelay};
use connect3_ai::zobrist::ZobristTable;
use connect3_ai::DEFAULT_DEPTH;

mod render;

const DEFAULT_RELAY: &str = "127.0.0.1:12345";
const DEFAULT_GAME_ID: &str = "game01";

fn prompt(question: &str) -> Result<String> {
    print!("{}", question);
    stdout().flush()?;
    let mut buffer = String::new();
    stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

// asks until the answer parses, an empty answer picks the default
fn prompt_parse<T>(question: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    loop {
        let answer = prompt(question)?;
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse::<T>() {
            Ok(value) => return Ok(value),
            Err(err) => println!("{}", err),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    println!("Welcome to Dynamic Connect-3\n");

    let server = loop {
        match prompt("Play locally or through a relay server? l/s: ")?
            .to_lowercase()
            .chars()
            .next()
        {
            Some('l') => break false,
            Some('s') => break true,
            _ => println!("Unknown answer given"),
        }
    };

    let size = prompt_parse::<BoardSize>("Board size, standard or large [standard]: ", BoardSize::Standard)?;
    let model = prompt_parse::<Model>(
        "AI model (mm, mmD, mm2, mm2D, ab, abD, ab2, ab2D, ab3, ab3D) [ab2D]: ",
        Model::Ab2D,
    )?;
    let config = model.config(size);
    let config = config.with_depth(prompt_parse::<u32>(
        &format!("Search depth [{}]: ", DEFAULT_DEPTH),
        config.depth,
    )?);

    let zobrist = Arc::new(ZobristTable::from_entropy(size));

    if server {
        play_relay(Agent::new(
            prompt_parse::<Player>("Colour for this client, white or black [white]: ", Player::White)?,
            &config,
            zobrist,
        ), config.depth)
    } else {
        let human = prompt_parse::<Player>(
            "Choose your colour, white (moves first) or black [white]: ",
            Player::White,
        )?;
        play_local(Agent::new(human.opponent(), &config, zobrist.clone()), Game::new(zobrist), config.depth)
    }
}

fn play_local(mut agent: Agent, mut game: Game, depth: u32) -> Result<()> {
    let human = agent.player().opponent();
    println!("You are player {}. The AI is player {}.", human, agent.player());

    loop {
        render::display(game.board())?;

        match game.state {
            GameState::Playing => {
                if game.to_move() == agent.player() {
                    println!("AI is thinking...");
                    match agent.decide(depth) {
                        Some(mv) => {
                            println!("AI chose move: {}", mv);
                            game.play(mv)?;
                        }
                        None => {
                            println!("The AI has no moves and forfeits.");
                            game.forfeit();
                        }
                    }
                } else {
                    let token = prompt("Move input (e.g. 14E) > ")?;
                    let played = Move::parse(&token, game.board().size())
                        .and_then(|mv| game.play(mv).map(|_| mv));
                    let mv = match played {
                        Ok(mv) => mv,
                        Err(err) => {
                            println!("{}", err);
                            // try the move again
                            continue;
                        }
                    };
                    agent.observe_opponent_move(&mv.to_string())?;
                }
            }

            // end states
            GameState::Won(winner) => {
                println!("Player {} wins!", winner);
                break;
            }
            GameState::Draw => {
                println!("Draw by threefold repetition!");
                break;
            }
        }
    }
    Ok(())
}

fn play_relay(agent: Agent, depth: u32) -> Result<()> {
    let address = prompt(&format!("Relay address [{}]: ", DEFAULT_RELAY))?;
    let address = if address.is_empty() { DEFAULT_RELAY.to_string() } else { address };
    let game_id = prompt(&format!("Game id [{}]: ", DEFAULT_GAME_ID))?;
    let game_id = if game_id.is_empty() { DEFAULT_GAME_ID.to_string() } else { game_id };

    println!("Connecting to {}...", address);
    let relay = TcpRelay::connect(address.as_str())?;

    let mut game = RelayGame::new(relay, agent, depth);
    game.handshake(&game_id)?;
    let outcome = game.play()?;
    render::display(game.board())?;

    match outcome {
        RelayOutcome::Won(winner) => println!("Player {} wins!", winner),
        RelayOutcome::Draw => println!("Draw by threefold repetition!"),
        RelayOutcome::Forfeit => println!("The AI has no moves and forfeits."),
        RelayOutcome::Announced(message) => println!("Game over: {}", message),
        RelayOutcome::Disconnected => println!("The relay closed the connection."),
    }
    Ok(())
}
