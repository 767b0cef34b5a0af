//! King-race (impasse) scoring.
//!
//! Once a King has entered the opponent's camp, each side is scored on the
//! non-king pieces it has in that camp plus everything in its hand: 5 points
//! for a rook or bishop, 1 for anything else, promoted or not. A result is
//! only declared when both Kings are in.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::{
    IMPASSE_DRAW_POINTS, IMPASSE_WIN_POINTS, MAJOR_PIECE_POINTS, MINOR_PIECE_POINTS,
};
use crate::game::GameEngine;
use crate::hand::Hand;
use crate::piece::{Color, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImpasseResult {
    pub is_impasse: bool,
    /// `None` while undecided or when the race is drawn.
    pub winner: Option<Color>,
    pub black_points: u32,
    pub white_points: u32,
}

pub fn piece_points(kind: PieceKind) -> u32 {
    match kind {
        PieceKind::King => 0,
        PieceKind::Rook | PieceKind::Bishop => MAJOR_PIECE_POINTS,
        _ => MINOR_PIECE_POINTS,
    }
}

/// `color`'s score: its pieces inside the opponent's camp plus its hand.
pub fn points(board: &Board, hand: &Hand, color: Color) -> u32 {
    let on_board: u32 = board
        .pieces_of(color)
        .filter(|(pos, _)| color.in_promotion_zone(pos.row()))
        .map(|(_, piece)| piece_points(piece.kind))
        .sum();
    let in_hand: u32 = hand.iter().map(|(kind, n)| piece_points(kind) * n as u32).sum();
    on_board + in_hand
}

pub fn evaluate(board: &Board, black_hand: &Hand, white_hand: &Hand) -> ImpasseResult {
    let (Some(black_king), Some(white_king)) =
        (board.find_king(Color::Black), board.find_king(Color::White))
    else {
        return ImpasseResult::default();
    };

    let black_in = Color::Black.in_promotion_zone(black_king.row());
    let white_in = Color::White.in_promotion_zone(white_king.row());
    if !black_in && !white_in {
        return ImpasseResult::default();
    }

    let black_points = points(board, black_hand, Color::Black);
    let white_points = points(board, white_hand, Color::White);
    let undecided = ImpasseResult {
        is_impasse: false,
        winner: None,
        black_points,
        white_points,
    };
    if !(black_in && white_in) {
        return undecided;
    }

    let black_wins = black_points >= IMPASSE_WIN_POINTS;
    let white_wins = white_points >= IMPASSE_WIN_POINTS;
    let winner = match (black_wins, white_wins) {
        (true, true) => None,
        (true, false) => Some(Color::Black),
        (false, true) => Some(Color::White),
        (false, false) => {
            if black_points >= IMPASSE_DRAW_POINTS && white_points >= IMPASSE_DRAW_POINTS {
                None
            } else {
                return undecided;
            }
        }
    };
    ImpasseResult {
        is_impasse: true,
        winner,
        ..undecided
    }
}

impl GameEngine {
    /// Score the king race. See the module docs for when a result is declared.
    pub fn check_impasse(&self) -> ImpasseResult {
        let [black_hand, white_hand] = self.hands();
        evaluate(self.board(), black_hand, white_hand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;
    use crate::position::Position;

    fn at(s: &str) -> Position {
        s.parse().unwrap()
    }

    fn kings(black: &str, white: &str) -> Board {
        let mut board = Board::empty();
        board.place(at(black), Some(Piece::new(PieceKind::King, Color::Black)));
        board.place(at(white), Some(Piece::new(PieceKind::King, Color::White)));
        board
    }

    fn hand_of(kinds: &[(PieceKind, u8)]) -> Hand {
        let mut hand = Hand::new();
        for &(kind, n) in kinds {
            for _ in 0..n {
                hand.add(kind);
            }
        }
        hand
    }

    #[test]
    fn test_no_king_in_camp() {
        let board = Board::initial();
        assert_eq!(evaluate(&board, &Hand::new(), &Hand::new()), ImpasseResult::default());
    }

    #[test]
    fn test_one_king_in_reports_scores_only() {
        let mut board = kings("5b", "5a");
        board.place(at("1a"), Some(Piece::new_promoted(PieceKind::Rook, Color::Black)));
        let result = evaluate(&board, &hand_of(&[(PieceKind::Pawn, 3)]), &Hand::new());
        assert!(!result.is_impasse);
        assert_eq!(result.winner, None);
        assert_eq!(result.black_points, 8);
        assert_eq!(result.white_points, 0);
    }

    #[test]
    fn test_pieces_outside_camp_do_not_count() {
        let mut board = kings("5c", "5g");
        board.place(at("1d"), Some(Piece::new(PieceKind::Rook, Color::Black)));
        board.place(at("9f"), Some(Piece::new(PieceKind::Bishop, Color::White)));
        let result = evaluate(&board, &Hand::new(), &Hand::new());
        assert_eq!(result.black_points, 0);
        assert_eq!(result.white_points, 0);
    }

    #[test]
    fn test_both_in_and_one_side_wins() {
        let board = kings("5b", "5h");
        let black = hand_of(&[(PieceKind::Rook, 2), (PieceKind::Bishop, 2), (PieceKind::Pawn, 11)]);
        let white = hand_of(&[(PieceKind::Gold, 4), (PieceKind::Pawn, 16)]);
        let result = evaluate(&board, &black, &white);
        assert_eq!(
            result,
            ImpasseResult {
                is_impasse: true,
                winner: Some(Color::Black),
                black_points: 31,
                white_points: 20,
            }
        );
    }

    #[test]
    fn test_both_over_threshold_is_draw() {
        let board = kings("5b", "5h");
        let hand = hand_of(&[(PieceKind::Rook, 2), (PieceKind::Bishop, 2), (PieceKind::Pawn, 11)]);
        let result = evaluate(&board, &hand, &hand);
        assert!(result.is_impasse);
        assert_eq!(result.winner, None);
    }

    #[test]
    fn test_both_at_draw_threshold() {
        let board = kings("5b", "5h");
        let hand = hand_of(&[(PieceKind::Rook, 2), (PieceKind::Bishop, 2), (PieceKind::Pawn, 8)]);
        let result = evaluate(&board, &hand, &hand);
        assert_eq!(result.black_points, 28);
        assert!(result.is_impasse);
        assert_eq!(result.winner, None);
    }

    #[test]
    fn test_both_in_below_thresholds_is_undecided() {
        let board = kings("5b", "5h");
        let low = hand_of(&[(PieceKind::Pawn, 5)]);
        let high = hand_of(&[(PieceKind::Rook, 2), (PieceKind::Bishop, 2), (PieceKind::Pawn, 9)]);
        let result = evaluate(&board, &high, &low);
        assert!(!result.is_impasse);
        assert_eq!((result.black_points, result.white_points), (29, 5));
    }

    #[test]
    fn test_king_is_worth_nothing() {
        assert_eq!(piece_points(PieceKind::King), 0);
        assert_eq!(piece_points(PieceKind::Bishop), 5);
        assert_eq!(piece_points(PieceKind::Lance), 1);
    }
}
