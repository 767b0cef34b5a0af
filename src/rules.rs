//! Rule predicates over a [`Board`]: check, checkmate, promotion, and the
//! drop restrictions.
//!
//! Everything here reads the board it is given. The few predicates that have
//! to try a move first do so through a [`BoardProbe`], so the board is back
//! in its original state when they return.

use crate::board::{Board, BoardProbe};
use crate::constants::N;
use crate::movegen;
use crate::piece::{Color, Piece, PieceKind};
use crate::position::Position;

/// True if `color`'s King is attacked by any opposing piece.
///
/// A side without a King on the board is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let Some(king) = board.find_king(color) else {
        return false;
    };
    is_attacked(board, king, color.opponent())
}

/// True if some piece of `attacker` has `target` among its candidates.
pub fn is_attacked(board: &Board, target: Position, attacker: Color) -> bool {
    board
        .pieces_of(attacker)
        .any(|(from, piece)| movegen::attacks(board, from, piece, target))
}

pub fn king_missing(board: &Board, color: Color) -> bool {
    board.find_king(color).is_none()
}

/// Play `from -> to` on the board, test whether `color`'s King is safe, and
/// put everything back.
///
/// This one probe is what enforces pins and check evasion; there is no
/// separate pin analysis.
pub fn move_keeps_king_safe(board: &mut Board, from: Position, to: Position, color: Color) -> bool {
    let mut probe = BoardProbe::new(board);
    probe.relocate(from, to);
    !is_in_check(&probe, color)
}

/// True if `color` is in check and no board move of any of its pieces gets
/// it out.
///
/// Drops are not tried here. Interposing a drop is governed by the drop
/// pipeline; the full legal-action enumerator considers both.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    if !is_in_check(board, color) {
        return false;
    }
    let mut scratch = board.clone();
    for (from, piece) in board.pieces_of(color) {
        for to in movegen::candidates(board, from, piece) {
            if move_keeps_king_safe(&mut scratch, from, to, color) {
                return false;
            }
        }
    }
    true
}

/// Whether `piece`, having just moved `from -> to`, turns over.
///
/// Promotion is compulsory here: it happens whenever the origin or the
/// destination is in the mover's zone. The ranks where a pawn, lance or
/// knight would otherwise be stuck all lie inside the zone, so they need no
/// separate test.
pub fn promotes(piece: Piece, from: Position, to: Position) -> bool {
    if piece.promoted || !piece.kind.can_promote() {
        return false;
    }
    piece.color.in_promotion_zone(from.row()) || piece.color.in_promotion_zone(to.row())
}

/// True if an unpromoted `kind` of `color` standing on `row` could never move
/// again: a pawn or lance on the farthest rank, a knight on either of the
/// two farthest.
pub fn is_dead_end(kind: PieceKind, color: Color, row: u8) -> bool {
    color.rows_from_far_edge(row) < kind.dead_ranks()
}

/// True if `color` already has an unpromoted pawn somewhere on file `col`.
pub fn has_pawn_on_file(board: &Board, color: Color, col: u8) -> bool {
    (0..N as u8).any(|row| {
        board.get(Position::at(row, col)).is_some_and(|p| {
            p.kind == PieceKind::Pawn && p.color == color && !p.promoted
        })
    })
}
