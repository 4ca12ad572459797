//! Line-oriented input for the terminal host.
//!
//! Each stdin line is either a host command (`show`, `help`, `quit`) or a
//! player action prefixed with the acting player's id, e.g. `2 pull 7`.

use thiserror::Error;

use partynight_core::game_registry::{GameDescriptor, GameId, GameKind, LuckVariant, UniversalMode};
use partynight_core::game_trait::PlayerId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty line")]
    Empty,

    #[error("expected `<player> <action>`, got `{0}`")]
    MissingAction(String),

    #[error("`{0}` is not a player id")]
    BadPlayer(String),

    #[error("`{action}` needs {expected}")]
    BadArgument {
        action: String,
        expected: &'static str,
    },

    #[error("`{0}` is not an action in this game")]
    UnknownAction(String),

    #[error("input could not be encoded: {0}")]
    Encode(String),
}

/// A parsed stdin line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Input { player_id: PlayerId, data: Vec<u8> },
    Show,
    Help,
    Quit,
}

/// Which engine (and universal mode) a catalog entry mounts.
#[derive(Debug, Clone, Copy)]
enum Mount {
    Tower,
    Fishing,
    Names,
    Universal(UniversalMode),
    /// Luck entry; the variant follows [`LuckVariant::from_game_id`].
    Luck,
}

/// Playable catalog: id, name, seats (the game's max), icon, engine.
/// Two-seat games need both seats; the rest start at one.
const CATALOG: &[(&str, &str, u8, &str, Mount)] = &[
    ("jenga", "Tower", 4, "🧱", Mount::Tower),
    ("fishing", "Fishing", 4, "🎣", Mount::Fishing),
    ("esmfamil", "Name game", 4, "📝", Mount::Names),
    ("arm_wrestle", "Arm wrestle", 2, "💪", Mount::Universal(UniversalMode::Mash)),
    ("tug_war", "Tug of war", 2, "🪢", Mount::Universal(UniversalMode::Mash)),
    ("race", "Sprint", 4, "🏃", Mount::Universal(UniversalMode::Mash)),
    ("typing", "Speed typing", 1, "⌨️", Mount::Universal(UniversalMode::Mash)),
    ("whack_mole", "Whack-a-mole", 1, "🔨", Mount::Universal(UniversalMode::Mash)),
    ("air_hockey", "Air hockey", 2, "🏒", Mount::Universal(UniversalMode::Mash)),
    ("reaction", "Reaction", 4, "⚡", Mount::Universal(UniversalMode::Reflex)),
    ("slap", "Grab the bottle", 2, "✋", Mount::Universal(UniversalMode::Reflex)),
    ("duel", "Cowboy duel", 2, "🤠", Mount::Universal(UniversalMode::Reflex)),
    ("musical_chairs", "Musical chairs", 4, "🪑", Mount::Universal(UniversalMode::Reflex)),
    ("pong", "Pong", 2, "🏓", Mount::Universal(UniversalMode::Reflex)),
    ("spin_bottle", "Wheel of luck", 4, "🎡", Mount::Luck),
    ("dice_roll", "Dice", 4, "🎲", Mount::Luck),
    ("coin_flip", "Coin flip", 2, "🪙", Mount::Luck),
    ("ludo", "Ludo dice", 4, "🎲", Mount::Luck),
    ("snakes", "Snakes and ladders dice", 4, "🐍", Mount::Luck),
    ("bottle", "Spin the bottle", 4, "🍾", Mount::Luck),
    ("bomb_squad", "Bomb squad", 4, "💣", Mount::Luck),
    ("rps", "Rock paper scissors", 2, "✂️", Mount::Luck),
    ("gol_pooch", "Gol ya pooch", 2, "✊", Mount::Luck),
    ("memory", "Memory", 1, "🧠", Mount::Universal(UniversalMode::Memory)),
    ("simon_says", "Simon says", 1, "🎨", Mount::Universal(UniversalMode::Memory)),
    ("pantomime", "Pantomime", 4, "🎭", Mount::Universal(UniversalMode::Prompt)),
    ("mafia_help", "Mafia narrator", 4, "🕵️", Mount::Universal(UniversalMode::Prompt)),
    ("truth_dare", "Truth or dare", 4, "😈", Mount::Universal(UniversalMode::Prompt)),
    ("charades", "Charades", 4, "🤪", Mount::Universal(UniversalMode::Prompt)),
    ("spy", "Spy", 4, "🕶️", Mount::Universal(UniversalMode::Prompt)),
    ("math_quiz", "Math quiz", 1, "➗", Mount::Universal(UniversalMode::Prompt)),
];

/// Short names accepted on the command line.
const ALIASES: &[(&str, &str)] = &[
    ("tower", "jenga"),
    ("names", "esmfamil"),
    ("mash", "race"),
    ("reflex", "reaction"),
    ("dice", "dice_roll"),
    ("coin", "coin_flip"),
    ("spin", "spin_bottle"),
    ("bomb", "bomb_squad"),
    ("prompt", "pantomime"),
    ("quiz", "pantomime"),
];

/// Every catalog id, in menu order.
pub fn game_ids() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|entry| entry.0)
}

/// Catalog entry for a game id or alias.
pub fn descriptor_for(id: &str) -> Option<GameDescriptor> {
    let lowered = id.trim().to_lowercase();
    let wanted = ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map_or(lowered.as_str(), |(_, target)| *target);
    let &(id, name, seats, icon, mount) = CATALOG.iter().find(|entry| entry.0 == wanted)?;

    let (kind, mode) = match mount {
        Mount::Tower => (GameKind::Tower, None),
        Mount::Fishing => (GameKind::Fishing, None),
        Mount::Names => (GameKind::NameGame, None),
        Mount::Universal(mode) => (GameKind::Universal, Some(mode)),
        Mount::Luck => (
            GameKind::Universal,
            Some(UniversalMode::Luck(LuckVariant::from_game_id(id))),
        ),
    };
    let min_players = match mount {
        Mount::Names => 2,
        _ if seats == 2 => 2,
        _ => 1,
    };
    Some(GameDescriptor {
        id: GameId(id.to_string()),
        name: name.to_string(),
        min_players,
        max_players: seats,
        kind,
        mode,
        description: String::new(),
        icon: icon.to_string(),
    })
}

/// Parse one stdin line for the mounted game.
pub fn parse_line(kind: GameKind, line: &str) -> Result<CliCommand, CommandError> {
    let mut words = line.split_whitespace();
    let first = words.next().ok_or(CommandError::Empty)?;
    match first {
        "quit" | "exit" => return Ok(CliCommand::Quit),
        "show" => return Ok(CliCommand::Show),
        "help" | "?" => return Ok(CliCommand::Help),
        _ => {},
    }
    let player_id: PlayerId = first
        .parse()
        .map_err(|_| CommandError::BadPlayer(first.to_string()))?;
    let action = words
        .next()
        .ok_or_else(|| CommandError::MissingAction(line.trim().to_string()))?;
    let rest: Vec<&str> = words.collect();
    let data = encode_action(kind, action, &rest)?;
    Ok(CliCommand::Input { player_id, data })
}

fn encode<T: serde::Serialize>(input: &T) -> Result<Vec<u8>, CommandError> {
    rmp_serde::to_vec(input).map_err(|e| CommandError::Encode(e.to_string()))
}

fn number<T: std::str::FromStr>(action: &str, rest: &[&str]) -> Result<T, CommandError> {
    rest.first()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| CommandError::BadArgument {
            action: action.to_string(),
            expected: "a number",
        })
}

fn encode_action(kind: GameKind, action: &str, rest: &[&str]) -> Result<Vec<u8>, CommandError> {
    let unknown = || CommandError::UnknownAction(action.to_string());
    match kind {
        #[cfg(feature = "tower")]
        GameKind::Tower => match action {
            "pull" => encode(&partynight_tower::TowerInput::Pull {
                block: number(action, rest)?,
            }),
            _ => Err(unknown()),
        },
        #[cfg(feature = "fishing")]
        GameKind::Fishing => match action {
            "cast" => encode(&partynight_fishing::FishingInput::Cast),
            _ => Err(unknown()),
        },
        #[cfg(feature = "names")]
        GameKind::NameGame => {
            use partynight_names::NameGameInput;
            match action {
                "buzz" => encode(&NameGameInput::Buzz),
                "answer" if !rest.is_empty() => encode(&NameGameInput::SubmitAnswer {
                    word: rest.join(" "),
                }),
                "answer" => Err(CommandError::BadArgument {
                    action: action.to_string(),
                    expected: "a word",
                }),
                "confirm" => {
                    let correct = match rest.first().copied() {
                        Some("yes" | "y" | "right" | "true") => true,
                        Some("no" | "n" | "wrong" | "false") => false,
                        _ => {
                            return Err(CommandError::BadArgument {
                                action: action.to_string(),
                                expected: "yes or no",
                            });
                        },
                    };
                    encode(&NameGameInput::Confirm { correct })
                },
                _ => Err(unknown()),
            }
        },
        #[cfg(feature = "universal")]
        GameKind::Universal => {
            use partynight_universal::UniversalInput;
            match action {
                "tap" => encode(&UniversalInput::Tap),
                "act" | "go" => encode(&UniversalInput::Act),
                "flip" => encode(&UniversalInput::Flip {
                    index: number(action, rest)?,
                }),
                "next" => encode(&UniversalInput::NextPrompt),
                "back" => encode(&UniversalInput::Back),
                _ => Err(unknown()),
            }
        },
        #[allow(unreachable_patterns)]
        _ => Err(unknown()),
    }
}

/// Human-readable dump of a serialized engine state.
pub fn describe_state(kind: GameKind, bytes: &[u8]) -> String {
    fn pretty<T: serde::de::DeserializeOwned + std::fmt::Debug>(bytes: &[u8]) -> String {
        match rmp_serde::from_slice::<T>(bytes) {
            Ok(state) => format!("{state:#?}"),
            Err(e) => format!("<undecodable state: {e}>"),
        }
    }
    match kind {
        #[cfg(feature = "tower")]
        GameKind::Tower => pretty::<partynight_tower::TowerState>(bytes),
        #[cfg(feature = "fishing")]
        GameKind::Fishing => pretty::<partynight_fishing::FishingState>(bytes),
        #[cfg(feature = "names")]
        GameKind::NameGame => pretty::<partynight_names::NameGameState>(bytes),
        #[cfg(feature = "universal")]
        GameKind::Universal => pretty::<partynight_universal::UniversalState>(bytes),
        #[allow(unreachable_patterns)]
        _ => format!("<{} bytes>", bytes.len()),
    }
}

/// Usage text for the mounted game.
pub fn help(kind: GameKind) -> &'static str {
    match kind {
        GameKind::Tower => "<player> pull <block>",
        GameKind::Fishing => "<player> cast",
        GameKind::NameGame => "<player> buzz | <player> answer <word> | <any> confirm yes|no",
        GameKind::Universal => "<player> tap | act | flip <card> | next | back",
    }
}
