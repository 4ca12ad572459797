//! Terminal host: mounts one game and feeds it actions typed on stdin.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use partynight_core::feedback::{LogFeedback, SharedFeedback};
use partynight_core::player::Player;
use partynight_core::rng::StdGameRng;
use partynight_host::cli::{self, CliCommand, CommandError};
use partynight_host::config::{ConfigError, HostConfig};
use partynight_host::registry::GameRegistry;
use partynight_host::session::{
    GameCommand, GameSessionConfig, SessionBroadcast, SessionEnd, spawn_game_session,
};

#[derive(Parser)]
#[command(name = "partynight", about = "Same-device party games in the terminal", version)]
struct Cli {
    /// Catalog id (jenga, fishing, esmfamil, race, reaction, dice_roll,
    /// simon_says, charades, ...) or a short alias such as tower, names, mash
    /// or bomb
    #[arg(short, long)]
    game: String,

    /// Number of seated players
    #[arg(short, long, default_value_t = 2)]
    players: usize,

    /// Seed for reproducible draws
    #[arg(long)]
    seed: Option<u64>,

    /// Host config file (default: $PARTYNIGHT_CONFIG or partynight.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown game `{0}`; try one of: {known}", known = cli::game_ids().collect::<Vec<_>>().join(", "))]
    UnknownGame(String),

    #[error("{game} takes {min}-{max} players, got {got}")]
    PlayerCount {
        game: String,
        min: u8,
        max: u8,
        got: usize,
    },

    #[error("`{0}` is not built into this host")]
    Unsupported(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
    }
}

async fn run(args: Cli) -> Result<(), RunError> {
    let config = match &args.config {
        Some(path) => HostConfig::from_path(path)?,
        None => HostConfig::load()?,
    };

    let descriptor =
        cli::descriptor_for(&args.game).ok_or_else(|| RunError::UnknownGame(args.game.clone()))?;
    if !descriptor.accepts_player_count(args.players) {
        return Err(RunError::PlayerCount {
            game: descriptor.name,
            min: descriptor.min_players,
            max: descriptor.max_players,
            got: args.players,
        });
    }

    let rng = |salt: u64| match args.seed {
        Some(seed) => StdGameRng::seeded(seed.wrapping_add(salt)),
        None => StdGameRng::from_entropy(),
    };
    let feedback: SharedFeedback = Arc::new(LogFeedback);
    let words = Arc::new(config.word_service(Box::new(rng(1))));

    let registry = GameRegistry::new();
    let game = registry
        .create(&descriptor, Box::new(rng(0)), feedback)
        .ok_or_else(|| RunError::Unsupported(descriptor.id.to_string()))?;

    let players: Vec<Player> = (1..=args.players as u64)
        .map(|id| Player::new(id, format!("Player {id}")))
        .collect();
    let names = players.clone();
    let on_end_game = Box::new(move |winner_id: Option<u64>| {
        match winner_id.and_then(|id| names.iter().find(|p| p.id == id)) {
            Some(winner) => println!("Winner: {} ({})", winner.display_name, winner.id),
            None => println!("No winner."),
        }
    });

    let kind = descriptor.kind;
    println!("{} with {} players. Type `help` for actions.", descriptor.name, players.len());

    let mut session = spawn_game_session(
        game,
        GameSessionConfig {
            players,
            tick_rate_override: config.tick_rate_override,
        },
        words,
        on_end_game,
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut latest_state = Vec::new();

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match cli::parse_line(kind, &line) {
                    Ok(CliCommand::Input { player_id, data }) => {
                        let _ = session.commands.send(GameCommand::Input { player_id, data });
                    },
                    Ok(CliCommand::Show) => println!("{}", cli::describe_state(kind, &latest_state)),
                    Ok(CliCommand::Help) => println!("{}", cli::help(kind)),
                    Ok(CliCommand::Quit) => {
                        let _ = session.commands.send(GameCommand::Stop);
                    },
                    Err(CommandError::Empty) => {},
                    Err(e) => eprintln!("{e}"),
                },
                Ok(None) | Err(_) => {
                    stdin_open = false;
                    let _ = session.commands.send(GameCommand::Stop);
                },
            },
            msg = session.broadcasts.recv() => match msg {
                Some(SessionBroadcast::Score { player_id, score }) => {
                    println!("Player {player_id} score: {score}");
                },
                Some(SessionBroadcast::State(bytes)) => latest_state = bytes,
                Some(SessionBroadcast::Ended(end)) => {
                    match end {
                        SessionEnd::Back => println!("Back to the menu."),
                        SessionEnd::Stopped => println!("Stopped."),
                        SessionEnd::Finished(_) => {},
                    }
                    break;
                },
                None => break,
            },
        }
    }

    let _ = session.task.await;
    Ok(())
}
