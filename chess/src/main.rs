mod interactive;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tactician_agents::{search, Agent, HeuristicAgent, RandomAgent, SearchConfig};
use tactician_core::{positions, Color, GameState, Square};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::interactive::{piece_symbol, InteractiveGame};

/// Chess engine driven by exchange analysis.
#[derive(Debug, Parser)]
#[command(name = "tactician", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the destinations of the piece on a square.
    Moves {
        /// Square in algebraic notation, e.g. e2.
        square: String,

        /// Position to use instead of the starting position.
        #[arg(long)]
        fen: Option<String>,
    },

    /// Let the engine pick a move and print the resulting position.
    Choose {
        #[arg(long)]
        fen: Option<String>,

        /// Search depth; the root counts as 1.
        #[arg(short, long, default_value_t = 4)]
        depth: u8,
    },

    /// Pit two automated players against each other.
    Selfplay {
        #[arg(long)]
        fen: Option<String>,

        /// Maximum number of plies to play.
        #[arg(long, default_value_t = 40)]
        plies: u32,

        #[arg(short, long, default_value_t = 4)]
        depth: u8,

        #[arg(long, value_enum, default_value_t = AgentKind::Heuristic)]
        white: AgentKind,

        #[arg(long, value_enum, default_value_t = AgentKind::Random)]
        black: AgentKind,

        /// Seed for random players, for reproducible games.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play against the engine on a terminal board.
    Play {
        #[arg(long)]
        fen: Option<String>,

        /// The side you play.
        #[arg(long, value_enum, default_value_t = Side::White)]
        human: Side,

        #[arg(short, long, default_value_t = 4)]
        depth: u8,
    },

    /// Display a position.
    Show {
        #[arg(long)]
        fen: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AgentKind {
    Heuristic,
    Random,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

fn make_agent(kind: AgentKind, depth: u8, seed: Option<u64>) -> Box<dyn Agent> {
    match (kind, seed) {
        (AgentKind::Heuristic, _) => Box::new(HeuristicAgent::new(depth)),
        (AgentKind::Random, Some(seed)) => Box::new(RandomAgent::with_seed(seed)),
        (AgentKind::Random, None) => Box::new(RandomAgent::new()),
    }
}

fn load_state(fen: Option<&str>) -> Result<GameState> {
    match fen {
        Some(fen) => GameState::from_fen(fen).with_context(|| format!("parsing FEN {fen:?}")),
        None => Ok(GameState::new()),
    }
}

fn display_board(state: &GameState) {
    println!("\n  a b c d e f g h");
    println!("  ---------------");

    for rank in (0..8u8).rev() {
        print!("{} ", rank + 1);
        for file in 0..8u8 {
            match state.board.piece_at(Square::at(file, rank)) {
                Some(piece) => print!("{} ", piece_symbol(piece)),
                None => print!(". "),
            }
        }
        println!("| {}", rank + 1);
    }

    println!("  ---------------");
    println!("  a b c d e f g h\n");

    println!("{} to move", state.turn);
    if state.is_in_check() {
        println!("{} is in check", state.turn);
    }
    if let Some(ep) = state.en_passant {
        println!("En passant: pawn on {ep}");
    }
    println!("Move {}", state.fullmove_number);
}

fn print_moves(state: &GameState, square: &str) -> Result<()> {
    let origin: Square = square.parse().context("reading the origin square")?;

    let Some(piece) = state.board.piece_at(origin) else {
        println!("{origin} is empty");
        return Ok(());
    };
    if piece.color != state.turn {
        println!("{origin} holds a {} piece; {} is to move", piece.color, state.turn);
        return Ok(());
    }

    let dests = state.legal_destinations(origin);
    let listed: Vec<String> = dests
        .squares
        .iter()
        .map(|&to| {
            if dests.is_en_passant(to) {
                format!("{to} (en passant)")
            } else {
                to.to_string()
            }
        })
        .collect();
    println!("{origin}: {}", listed.join(" "));

    if origin == tactician_core::king_home(state.turn) {
        for direction in state.castle_directions() {
            println!(
                "castle {direction}: {origin} -> {}",
                direction.king_target(state.turn)
            );
        }
    }

    Ok(())
}

fn choose(state: &GameState, depth: u8) {
    let config = SearchConfig::with_depth(depth);
    println!("Position: {}", state.to_fen());
    println!("Searching to depth {}...", config.max_depth);

    match search(state, config) {
        Some(outcome) => {
            let next = outcome.decision.apply(state);
            println!("\nChoice: {}", outcome.decision);
            println!("Score: {}", outcome.score);
            println!("Nodes: {}", outcome.nodes);
            display_board(&next);
            println!("FEN: {}", next.to_fen());
        }
        None => println!("{} has no moves", state.turn),
    }
}

fn selfplay(
    mut state: GameState,
    plies: u32,
    mut white: Box<dyn Agent>,
    mut black: Box<dyn Agent>,
) {
    println!("{} (White) vs {} (Black)", white.name(), black.name());

    for ply in 0..plies {
        let turn = state.turn;
        if state.board.king_square(turn).is_none() {
            println!("{turn}'s king was captured");
            break;
        }

        let agent = match turn {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        let Some(decision) = agent.choose(&state) else {
            println!("{turn} has no moves");
            break;
        };

        debug!(ply, agent = agent.name(), %decision, "selfplay move");
        state = decision.apply(&state);

        let check = if state.is_in_check() { "+" } else { "" };
        match turn {
            Color::White => print!("{}. {decision}{check} ", state.fullmove_number),
            Color::Black => println!("{decision}{check}"),
        }
    }

    println!();
    display_board(&state);
    println!("FEN: {}", state.to_fen());
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Moves { square, fen } => {
            let state = load_state(fen.as_deref())?;
            print_moves(&state, &square)?;
        }
        Command::Choose { fen, depth } => {
            let state = load_state(fen.as_deref())?;
            choose(&state, depth);
        }
        Command::Selfplay {
            fen,
            plies,
            depth,
            white,
            black,
            seed,
        } => {
            let state = load_state(fen.as_deref())?;
            selfplay(
                state,
                plies,
                make_agent(white, depth, seed),
                make_agent(black, depth, seed.map(|s| s.wrapping_add(1))),
            );
        }
        Command::Play { fen, human, depth } => {
            let state = load_state(fen.as_deref())?;
            InteractiveGame::new(state, human.into(), SearchConfig::with_depth(depth))
                .run()
                .context("running the terminal board")?;
        }
        Command::Show { fen } => {
            let state = load_state(fen.as_deref())?;
            display_board(&state);
            println!("FEN: {}", state.to_fen());
            if fen.is_none() {
                println!("\nOther positions to try:");
                println!("  {}", positions::AFTER_E4_E5);
                println!("  {}", positions::CASTLING_READY);
                println!("  {}", positions::PROMOTION);
            }
        }
    }

    Ok(())
}
