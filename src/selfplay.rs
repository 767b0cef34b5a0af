//! Policy-vs-policy game driver.
//!
//! Plays one game until it ends or hits the ply limit, recording every move.
//! [`run`] plays a batch with seeded policies and tallies results.

use log::{debug, info, warn};
use serde::Serialize;

use crate::agent::{Policy, PolicyKind};
use crate::game::{GameEngine, GameStatus};
use crate::moves::Move;
use crate::piece::Color;

/// Default ply cap for one self-play game.
pub const DEFAULT_MAX_PLIES: usize = 512;

/// How a self-play game finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The game reached a terminal status.
    Finished(GameStatus),
    /// The ply cap was reached first.
    PlyLimit,
    /// A policy proposed a move the engine refused.
    Rejected { side: Color, mv: Move },
}

#[derive(Debug, Clone)]
pub struct GameRecord {
    pub start_sfen: String,
    pub moves: Vec<Move>,
    pub ending: Ending,
    pub final_position: GameEngine,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Color> {
        match self.ending {
            Ending::Finished(status) => status.winner(),
            Ending::Rejected { side, .. } => Some(side.opponent()),
            Ending::PlyLimit => None,
        }
    }

    /// Space-separated USI moves.
    pub fn move_list(&self) -> String {
        self.moves.iter().map(Move::to_string).collect::<Vec<_>>().join(" ")
    }
}

/// Play from `start` until the game ends or `max_plies` moves have been made.
pub fn play_game(
    start: GameEngine,
    black: &mut dyn Policy,
    white: &mut dyn Policy,
    max_plies: usize,
) -> GameRecord {
    let start_sfen = start.to_sfen();
    let mut game = start;
    let mut moves = Vec::new();

    let ending = loop {
        let status = game.status();
        if status.is_over() {
            break Ending::Finished(status);
        }
        if moves.len() >= max_plies {
            break Ending::PlyLimit;
        }

        let side = game.side_to_move();
        let policy: &mut dyn Policy = match side {
            Color::Black => &mut *black,
            Color::White => &mut *white,
        };
        // A non-terminal status guarantees at least one legal action.
        let Some(mv) = policy.choose(&game) else {
            break Ending::Finished(GameStatus::NoLegalMoves { loser: side });
        };
        if !game.apply(mv) {
            warn!("{} proposed illegal {mv} for {side}", policy.name());
            break Ending::Rejected { side, mv };
        }
        debug!("ply {}: {side} {mv}", moves.len() + 1);
        moves.push(mv);
    };

    GameRecord {
        start_sfen,
        moves,
        ending,
        final_position: game,
    }
}

/// Batch settings for [`run`].
#[derive(Debug, Clone)]
pub struct Config {
    pub games: usize,
    pub seed: u64,
    pub max_plies: usize,
    pub start: GameEngine,
    /// Policy both sides play with.
    pub policy: PolicyKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            games: 1,
            seed: 0,
            max_plies: DEFAULT_MAX_PLIES,
            start: GameEngine::new(),
            policy: PolicyKind::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub games: usize,
    pub black_wins: usize,
    pub white_wins: usize,
    pub draws: usize,
    pub unfinished: usize,
    pub total_plies: usize,
}

/// Play `config.games` games with `config.policy` on both sides. Game `i`
/// seeds Black with `seed + 2i` and White with `seed + 2i + 1`.
pub fn run(config: &Config) -> Summary {
    let mut summary = Summary::default();
    for i in 0..config.games {
        let base = config.seed.wrapping_add(2 * i as u64);
        let mut black = config.policy.build(Some(base));
        let mut white = config.policy.build(Some(base.wrapping_add(1)));
        let record =
            play_game(config.start.clone(), &mut *black, &mut *white, config.max_plies);

        summary.games += 1;
        summary.total_plies += record.moves.len();
        match (record.ending, record.winner()) {
            (Ending::PlyLimit, _) => summary.unfinished += 1,
            (_, Some(Color::Black)) => summary.black_wins += 1,
            (_, Some(Color::White)) => summary.white_wins += 1,
            (_, None) => summary.draws += 1,
        }
        info!(
            "game {} ({}): {:?} after {} plies",
            i + 1,
            config.policy,
            record.ending,
            record.moves.len()
        );
    }
    summary
}
