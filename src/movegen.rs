//! Geometry-only move generation.
//!
//! Each kind computes its target squares from its owner, square, promotion
//! state and board occupancy. Nothing here knows about check, turn order or
//! hands. Rules are applied on top by [`crate::rules`] and
//! [`crate::game::GameEngine`].
//!
//! Offsets in [`crate::constants`] are written from Black's point of view
//! (forward = towards row 0); the row component is mirrored for White so
//! the same tables serve both sides.

use crate::board::Board;
use crate::constants::{BISHOP_RAYS, GOLD_STEPS, KING_STEPS, KNIGHT_JUMPS, ROOK_RAYS, SILVER_STEPS};
use crate::piece::{Piece, PieceKind};
use crate::position::Position;

/// Target squares for `piece` standing on `from`.
///
/// A square holding a piece of the mover's own color is never a target. The
/// result contains no duplicates.
pub fn candidates(board: &Board, from: Position, piece: Piece) -> Vec<Position> {
    let mut out = Vec::with_capacity(16);
    if piece.promoted {
        match piece.kind {
            PieceKind::Pawn | PieceKind::Lance | PieceKind::Knight | PieceKind::Silver => {
                steps(board, from, piece, &GOLD_STEPS, &mut out);
            }
            PieceKind::Bishop => {
                rays(board, from, piece, &BISHOP_RAYS, &mut out);
                steps(board, from, piece, &ROOK_RAYS, &mut out);
            }
            PieceKind::Rook => {
                rays(board, from, piece, &ROOK_RAYS, &mut out);
                steps(board, from, piece, &BISHOP_RAYS, &mut out);
            }
            // Never promoted; fall back to the base pattern.
            PieceKind::Gold => steps(board, from, piece, &GOLD_STEPS, &mut out),
            PieceKind::King => steps(board, from, piece, &KING_STEPS, &mut out),
        }
        return out;
    }

    match piece.kind {
        PieceKind::Pawn => pawn(board, from, piece, &mut out),
        PieceKind::Lance => rays(board, from, piece, &[(-1, 0)], &mut out),
        PieceKind::Knight => steps(board, from, piece, &KNIGHT_JUMPS, &mut out),
        PieceKind::Silver => steps(board, from, piece, &SILVER_STEPS, &mut out),
        PieceKind::Gold => steps(board, from, piece, &GOLD_STEPS, &mut out),
        PieceKind::Bishop => rays(board, from, piece, &BISHOP_RAYS, &mut out),
        PieceKind::Rook => rays(board, from, piece, &ROOK_RAYS, &mut out),
        PieceKind::King => steps(board, from, piece, &KING_STEPS, &mut out),
    }
    out
}

/// True if `target` is among the candidates of `piece` on `from`.
pub fn attacks(board: &Board, from: Position, piece: Piece, target: Position) -> bool {
    candidates(board, from, piece).contains(&target)
}

/// Not blocked by, and not able to land on, the mover's own color.
#[inline]
fn open_to(board: &Board, pos: Position, piece: Piece) -> bool {
    board.get(pos).is_none_or(|occupant| occupant.color != piece.color)
}

/// Pawns move one square straight ahead and never capture that way.
fn pawn(board: &Board, from: Position, piece: Piece, out: &mut Vec<Position>) {
    if let Some(to) = from.offset(piece.forward(), 0) {
        if board.is_empty_at(to) {
            out.push(to);
        }
    }
}

/// Single steps (or jumps) from a table of Black-relative offsets.
fn steps(board: &Board, from: Position, piece: Piece, table: &[(i8, i8)], out: &mut Vec<Position>) {
    let flip = -piece.forward();
    for &(dr, dc) in table {
        if let Some(to) = from.offset(dr * flip, dc) {
            if open_to(board, to, piece) && !out.contains(&to) {
                out.push(to);
            }
        }
    }
}

/// Sliding rays. Each ray ends at the first occupied square, which is
/// included only when it holds an opposing piece.
fn rays(board: &Board, from: Position, piece: Piece, dirs: &[(i8, i8)], out: &mut Vec<Position>) {
    let flip = -piece.forward();
    for &(dr, dc) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(dr * flip, dc) {
            match board.get(to) {
                None => {
                    if !out.contains(&to) {
                        out.push(to);
                    }
                }
                Some(occupant) => {
                    if occupant.color != piece.color && !out.contains(&to) {
                        out.push(to);
                    }
                    break;
                }
            }
            cur = to;
        }
    }
}
