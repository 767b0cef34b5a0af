//! A single action: a board move or a drop, with USI text form.
//!
//! Promotion is never a choice, so the notation has no `+` suffix: `"7g7f"`
//! moves a piece, `"P*5e"` drops a pawn.

use std::fmt;
use std::str::FromStr;

use crate::error::ShogiError;
use crate::piece::PieceKind;
use crate::position::Position;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Board { from: Position, to: Position },
    Drop { kind: PieceKind, to: Position },
}

impl Move {
    pub fn to(&self) -> Position {
        match *self {
            Move::Board { to, .. } | Move::Drop { to, .. } => to,
        }
    }

    pub fn is_drop(&self) -> bool {
        matches!(self, Move::Drop { .. })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Board { from, to } => write!(f, "{from}{to}"),
            Move::Drop { kind, to } => write!(f, "{}*{to}", kind.letter()),
        }
    }
}

impl FromStr for Move {
    type Err = ShogiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((kind, to)) = s.split_once('*') {
            let kind: PieceKind = kind.parse()?;
            let to = to.parse().map_err(|_| ShogiError::InvalidMove(s.to_string()))?;
            return Ok(Move::Drop { kind, to });
        }
        if s.len() != 4 || !s.is_ascii() {
            return Err(ShogiError::InvalidMove(s.to_string()));
        }
        let from = s[..2].parse().map_err(|_| ShogiError::InvalidMove(s.to_string()))?;
        let to = s[2..].parse().map_err(|_| ShogiError::InvalidMove(s.to_string()))?;
        Ok(Move::Board { from, to })
    }
}
