//! Externalized game state for persistence.
//!
//! A [`Snapshot`] lists every piece with its location, either a board cell or
//! a hand, plus the side to move. [`GameEngine::restore`] validates the
//! snapshot before building a game from it; nothing here touches the
//! filesystem.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{Result, ShogiError};
use crate::game::GameEngine;
use crate::hand::Hand;
use crate::piece::{Color, Piece, PieceKind};
use crate::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "at", rename_all = "lowercase")]
pub enum Location {
    Board { row: u8, col: u8 },
    Hand { owner: Color },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRecord {
    pub kind: PieceKind,
    pub color: Color,
    #[serde(default)]
    pub promoted: bool,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub side_to_move: Color,
    pub pieces: Vec<PieceRecord>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode only; call [`GameEngine::restore`] to validate.
    pub fn from_json(text: &str) -> Result<Snapshot> {
        Ok(serde_json::from_str(text)?)
    }
}

impl GameEngine {
    /// Board pieces in row-major order, then Black's hand, then White's.
    pub fn snapshot(&self) -> Snapshot {
        let mut pieces: Vec<PieceRecord> = self
            .board()
            .pieces()
            .map(|(pos, piece)| PieceRecord {
                kind: piece.kind,
                color: piece.color,
                promoted: piece.promoted,
                location: Location::Board {
                    row: pos.row(),
                    col: pos.col(),
                },
            })
            .collect();

        for owner in Color::ALL {
            for (kind, n) in self.hand(owner).iter() {
                let record = PieceRecord {
                    kind,
                    color: owner,
                    promoted: false,
                    location: Location::Hand { owner },
                };
                pieces.extend(std::iter::repeat_n(record, n as usize));
            }
        }

        Snapshot {
            side_to_move: self.side_to_move(),
            pieces,
        }
    }

    /// Build a game from a snapshot, rejecting anything that could not arise
    /// from a real position.
    pub fn restore(snapshot: &Snapshot) -> Result<GameEngine> {
        let mut board = Board::empty();
        let mut hands = [Hand::new(), Hand::new()];

        for (i, record) in snapshot.pieces.iter().enumerate() {
            let invalid = |why: String| ShogiError::InvalidSnapshot(format!("piece {i}: {why}"));
            if record.promoted && !record.kind.can_promote() {
                return Err(invalid(format!("{} cannot be promoted", record.kind)));
            }
            match record.location {
                Location::Board { row, col } => {
                    let pos = Position::new(row, col)
                        .ok_or_else(|| invalid(format!("({row}, {col}) is off the board")))?;
                    if let Some(occupant) = board.get(pos) {
                        return Err(invalid(format!("{pos} already holds {occupant}")));
                    }
                    let piece = Piece {
                        kind: record.kind,
                        color: record.color,
                        promoted: record.promoted,
                    };
                    board.place(pos, Some(piece));
                }
                Location::Hand { owner } => {
                    if owner != record.color {
                        return Err(invalid(format!("{} piece in {owner}'s hand", record.color)));
                    }
                    if record.promoted {
                        return Err(invalid("promoted piece in hand".to_string()));
                    }
                    if record.kind == PieceKind::King {
                        return Err(invalid("a king cannot be held in hand".to_string()));
                    }
                    if !hands[owner.index()].add(record.kind) {
                        let supply = record.kind.supply();
                        return Err(invalid(format!("more than {supply} {} in hand", record.kind)));
                    }
                }
            }
        }

        let [black_hand, white_hand] = hands;
        let game = GameEngine::from_parts(board, black_hand, white_hand, snapshot.side_to_move);
        game.check_census().map_err(ShogiError::InvalidSnapshot)?;
        Ok(game)
    }
}
