//! Move-choosing agents.
//!
//! The engine never picks moves itself; a [`Policy`] looks at a game and
//! proposes one. Only legality is guaranteed: a policy choosing from
//! [`GameEngine::legal_actions`] always gets its move accepted.
//! [`PolicyKind`] names the built-in policies for the CLI and [`crate::selfplay`].

use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::error::ShogiError;
use crate::game::GameEngine;
use crate::impasse::piece_points;
use crate::moves::Move;
use crate::piece::Piece;

pub trait Policy {
    /// Pick a move for the side to move, or `None` if there is nothing to play.
    fn choose(&mut self, game: &GameEngine) -> Option<Move>;

    fn name(&self) -> &str {
        "policy"
    }
}

/// Uniformly random over all legal actions.
pub struct RandomPolicy {
    rng: fastrand::Rng,
}

impl RandomPolicy {
    /// Deterministic for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose(&mut self, game: &GameEngine) -> Option<Move> {
        let actions = game.legal_actions();
        if actions.is_empty() {
            return None;
        }
        let mv = actions[self.rng.usize(..actions.len())];
        trace!("random pick {mv} out of {}", actions.len());
        Some(mv)
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Takes the most valuable piece it can capture, otherwise plays at random.
///
/// Still no lookahead; it just makes self-play games end sooner.
pub struct CapturePolicy {
    fallback: RandomPolicy,
}

impl CapturePolicy {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            fallback: RandomPolicy::with_seed(seed),
        }
    }
}

impl Default for CapturePolicy {
    fn default() -> Self {
        Self {
            fallback: RandomPolicy::default(),
        }
    }
}

impl Policy for CapturePolicy {
    fn choose(&mut self, game: &GameEngine) -> Option<Move> {
        let best = game
            .legal_actions()
            .into_iter()
            .filter_map(|mv| match mv {
                Move::Board { to, .. } => {
                    game.piece_at(to).map(|victim| (victim_value(victim), mv))
                }
                Move::Drop { .. } => None,
            })
            .max_by_key(|&(value, _)| value);
        match best {
            Some((_, mv)) => Some(mv),
            None => self.fallback.choose(game),
        }
    }

    fn name(&self) -> &str {
        "capture"
    }
}

fn victim_value(piece: Piece) -> u32 {
    let base = piece_points(piece.kind);
    if piece.promoted { base + 1 } else { base }
}

/// The built-in policies, selectable by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolicyKind {
    #[default]
    Random,
    Capture,
}

impl PolicyKind {
    /// Build the policy, seeded when `seed` is given.
    pub fn build(self, seed: Option<u64>) -> Box<dyn Policy> {
        match (self, seed) {
            (PolicyKind::Random, Some(seed)) => Box::new(RandomPolicy::with_seed(seed)),
            (PolicyKind::Random, None) => Box::new(RandomPolicy::default()),
            (PolicyKind::Capture, Some(seed)) => Box::new(CapturePolicy::with_seed(seed)),
            (PolicyKind::Capture, None) => Box::new(CapturePolicy::default()),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = ShogiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(PolicyKind::Random),
            "capture" => Ok(PolicyKind::Capture),
            _ => Err(ShogiError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Random => write!(f, "random"),
            PolicyKind::Capture => write!(f, "capture"),
        }
    }
}
