//! Line-oriented text protocol for driving the engine from a UI or a terminal.
//!
//! Modelled on GTP: one command per line, an optional numeric id in front,
//! and a reply of `=[id] <payload>` on success or `?[id] <reason>` on failure,
//! followed by a blank line. Lines starting with `#` are ignored.
//!
//! ## Supported Commands
//!
//! - `position startpos [moves <m>...]` / `position sfen <sfen> [moves <m>...]`
//! - `move <usi>` - Play `7g7f` or `P*5e` for the side to move
//! - `genmove` - Let the session's policy pick and play a move
//! - `legal [square]` - Legal actions, optionally only those from one square
//! - `check` - Whether the side to move is in check
//! - `status` - Game status for the side to move
//! - `impasse` - King-race scores as JSON
//! - `board` - Text diagram with hands
//! - `sfen` - Current position as SFEN
//! - `save <path>` / `load <path>` - Snapshot to and from a JSON file
//! - `name`, `version`, `list_commands`, `known_command <cmd>`, `quit`

use std::fs;
use std::io::{self, BufRead, Write};

use log::debug;

use crate::agent::{Policy, RandomPolicy};
use crate::game::{GameEngine, GameStatus};
use crate::moves::Move;
use crate::piece::Color;
use crate::position::Position;
use crate::sfen;
use crate::snapshot::Snapshot;

const KNOWN_COMMANDS: &[&str] = &[
    "board",
    "check",
    "genmove",
    "impasse",
    "known_command",
    "legal",
    "list_commands",
    "load",
    "move",
    "name",
    "position",
    "quit",
    "save",
    "sfen",
    "status",
    "version",
];

/// One protocol session: the current game plus the policy used by `genmove`.
pub struct Session {
    game: GameEngine,
    policy: Box<dyn Policy>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Box::new(RandomPolicy::default()))
    }
}

impl Session {
    pub fn new(policy: Box<dyn Policy>) -> Self {
        Self {
            game: GameEngine::new(),
            policy,
        }
    }

    pub fn game(&self) -> &GameEngine {
        &self.game
    }

    /// Read commands until `quit` or end of input, answering each one.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Execute one command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        debug!("command {command} {args:?}");
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "position" => self.position(args),

            "move" => {
                let Some(text) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match text.parse::<Move>() {
                    Ok(mv) => match play(&mut self.game, mv) {
                        Ok(()) => (true, String::new()),
                        Err(reason) => (false, format!("illegal move {mv}: {reason}")),
                    },
                    Err(err) => (false, err.to_string()),
                }
            }

            "genmove" => {
                if self.game.status().is_over() {
                    return (true, "resign".to_string());
                }
                let Some(mv) = self.policy.choose(&self.game) else {
                    return (true, "resign".to_string());
                };
                if self.game.apply(mv) {
                    (true, mv.to_string())
                } else {
                    (false, format!("{} proposed illegal move {mv}", self.policy.name()))
                }
            }

            "legal" => {
                let actions = self.game.legal_actions();
                let origin = match args.first().map(|s| s.parse::<Position>()) {
                    None => None,
                    Some(Ok(pos)) => Some(pos),
                    Some(Err(err)) => return (false, err.to_string()),
                };
                let listed: Vec<String> = actions
                    .iter()
                    .filter(|mv| match (origin, mv) {
                        (None, _) => true,
                        (Some(square), Move::Board { from, .. }) => *from == square,
                        (Some(_), Move::Drop { .. }) => false,
                    })
                    .map(Move::to_string)
                    .collect();
                (true, listed.join(" "))
            }

            "check" => {
                let side = self.game.side_to_move();
                (true, self.game.is_in_check(side).to_string())
            }

            "status" => (true, describe(self.game.status())),

            "impasse" => match serde_json::to_string(&self.game.check_impasse()) {
                Ok(json) => (true, json),
                Err(err) => (false, err.to_string()),
            },

            "board" => {
                let game = &self.game;
                (
                    true,
                    format!(
                        "\n{}white hand: {}\nblack hand: {}\n{} to move",
                        game.board(),
                        game.hand(Color::White),
                        game.hand(Color::Black),
                        game.side_to_move()
                    ),
                )
            }

            "sfen" => (true, self.game.to_sfen()),

            "save" => {
                let Some(path) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let written = self
                    .game
                    .snapshot()
                    .to_json()
                    .map_err(|err| err.to_string())
                    .and_then(|json| fs::write(path, json).map_err(|err| err.to_string()));
                match written {
                    Ok(()) => (true, String::new()),
                    Err(err) => (false, format!("cannot save {path}: {err}")),
                }
            }

            "load" => {
                let Some(path) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let loaded = fs::read_to_string(path)
                    .map_err(|err| err.to_string())
                    .and_then(|text| {
                        let snapshot = Snapshot::from_json(&text).map_err(|e| e.to_string())?;
                        GameEngine::restore(&snapshot).map_err(|e| e.to_string())
                    });
                match loaded {
                    Ok(game) => {
                        self.game = game;
                        (true, String::new())
                    }
                    Err(err) => (false, format!("cannot load {path}: {err}")),
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// `position startpos|sfen <fields> [moves ...]`. The session keeps its
    /// old position if anything fails.
    fn position(&mut self, args: &[&str]) -> (bool, String) {
        let (setup, moves) = match args.iter().position(|&a| a == "moves") {
            Some(i) => (&args[..i], &args[i + 1..]),
            None => (args, &args[args.len()..]),
        };
        let mut game = match setup.split_first() {
            Some((&"startpos", [])) => GameEngine::new(),
            Some((&"sfen", fields)) if !fields.is_empty() => {
                match sfen::parse(&fields.join(" ")) {
                    Ok(game) => game,
                    Err(err) => return (false, err.to_string()),
                }
            }
            _ => return (false, "expected startpos or sfen".to_string()),
        };
        for text in moves {
            let mv = match text.parse::<Move>() {
                Ok(mv) => mv,
                Err(err) => return (false, err.to_string()),
            };
            if let Err(reason) = play(&mut game, mv) {
                return (false, format!("illegal move {mv}: {reason}"));
            }
        }
        self.game = game;
        (true, String::new())
    }
}

/// Play a move, returning the rejection reason as text.
fn play(game: &mut GameEngine, mv: Move) -> Result<(), String> {
    match mv {
        Move::Board { from, to } => game
            .try_move(from, to)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Move::Drop { kind, to } => game.try_drop(kind, to).map_err(|e| e.to_string()),
    }
}

fn describe(status: GameStatus) -> String {
    match status {
        GameStatus::Ongoing => "ongoing".to_string(),
        GameStatus::KingLost { loser } => format!("king_lost {loser}"),
        GameStatus::Checkmate { loser } => format!("checkmate {loser}"),
        GameStatus::NoLegalMoves { loser } => format!("no_legal_moves {loser}"),
        GameStatus::Impasse(result) => match result.winner {
            Some(winner) => format!("impasse {winner}"),
            None => "impasse draw".to_string(),
        },
    }
}

/// Parse an optional numeric command ID from the beginning of the line.
fn parse_id(line: &str) -> (Option<u32>, &str) {
    let trimmed = line.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if end == 0 {
        return (None, trimmed);
    }
    match trimmed[..end].parse::<u32>() {
        Ok(id) => (Some(id), trimmed[end..].trim()),
        Err(_) => (None, trimmed),
    }
}
