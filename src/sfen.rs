//! SFEN text form of a whole position.
//!
//! `<board> <side> <hands> [<move number>]`, e.g. the standard opening
//! `lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1`.
//! Ranks run `a` to `i` top to bottom and files 9 to 1 left to right. The
//! move number is accepted and ignored on input and always written as `1`.

use crate::board::Board;
use crate::constants::N;
use crate::error::{Result, ShogiError};
use crate::game::GameEngine;
use crate::hand::Hand;
use crate::piece::{Color, Piece, PieceKind};
use crate::position::Position;

/// Parse an SFEN string into a game. A leading `sfen ` keyword is allowed.
///
/// Beyond the format, only piece counts are checked: a position with a
/// missing King or a side already in check is accepted.
pub fn parse(text: &str) -> Result<GameEngine> {
    let mut fields = text.split_whitespace();
    if text.trim_start().starts_with("sfen ") {
        fields.next();
    }
    let bad = |why: &str| ShogiError::InvalidSfen(format!("{why} in {text:?}"));

    let board = parse_board(fields.next().ok_or_else(|| bad("missing board"))?)
        .map_err(|why| bad(&why))?;
    let side = match fields.next() {
        Some("b") => Color::Black,
        Some("w") => Color::White,
        Some(other) => return Err(bad(&format!("bad side {other:?}"))),
        None => return Err(bad("missing side")),
    };
    let (black_hand, white_hand) = match fields.next() {
        Some(hands) => parse_hands(hands).map_err(|why| bad(&why))?,
        None => (Hand::new(), Hand::new()),
    };
    if let Some(ply) = fields.next() {
        ply.parse::<u32>()
            .map_err(|_| bad(&format!("bad move number {ply:?}")))?;
    }
    if fields.next().is_some() {
        return Err(bad("trailing fields"));
    }
    let game = GameEngine::from_parts(board, black_hand, white_hand, side);
    game.check_census().map_err(|why| bad(&why))?;
    Ok(game)
}

fn parse_board(field: &str) -> std::result::Result<Board, String> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != N {
        return Err(format!("expected {N} ranks, found {}", ranks.len()));
    }
    let mut board = Board::empty();
    for (row, rank) in ranks.iter().enumerate() {
        let mut col = 0usize;
        let mut promoted = false;
        for c in rank.chars() {
            if let Some(run) = c.to_digit(10) {
                if promoted || run == 0 {
                    return Err(format!("bad empty run {c:?}"));
                }
                col += run as usize;
                continue;
            }
            if c == '+' {
                if promoted {
                    return Err("doubled '+'".to_string());
                }
                promoted = true;
                continue;
            }
            let kind = PieceKind::from_letter(c).ok_or_else(|| format!("unknown piece {c:?}"))?;
            if promoted && !kind.can_promote() {
                return Err(format!("{kind} cannot be promoted"));
            }
            let color = if c.is_ascii_uppercase() { Color::Black } else { Color::White };
            let pos = Position::new(row as u8, col as u8)
                .ok_or_else(|| format!("rank {} is too wide", row + 1))?;
            board.place(pos, Some(Piece { kind, color, promoted }));
            promoted = false;
            col += 1;
        }
        if promoted {
            return Err("dangling '+'".to_string());
        }
        if col != N {
            return Err(format!("rank {} has width {col}", row + 1));
        }
    }
    Ok(board)
}

fn parse_hands(field: &str) -> std::result::Result<(Hand, Hand), String> {
    let mut black = Hand::new();
    let mut white = Hand::new();
    if field == "-" {
        return Ok((black, white));
    }
    let mut count: u32 = 0;
    for c in field.chars() {
        if let Some(d) = c.to_digit(10) {
            count = count * 10 + d;
            if count > 18 {
                return Err(format!("hand count {count} is too large"));
            }
            continue;
        }
        let kind = PieceKind::from_letter(c).ok_or_else(|| format!("unknown piece {c:?}"))?;
        if kind == PieceKind::King {
            return Err("a king cannot be held in hand".to_string());
        }
        let hand = if c.is_ascii_uppercase() { &mut black } else { &mut white };
        for _ in 0..count.max(1) {
            if !hand.add(kind) {
                return Err(format!("more than {} {kind} pieces in hand", kind.supply()));
            }
        }
        count = 0;
    }
    if count != 0 {
        return Err("hand count without a piece".to_string());
    }
    Ok((black, white))
}

impl GameEngine {
    /// Format this position as SFEN with move number 1.
    pub fn to_sfen(&self) -> String {
        let mut out = String::with_capacity(96);
        for row in 0..N as u8 {
            if row > 0 {
                out.push('/');
            }
            let mut empty = 0;
            for col in 0..N as u8 {
                match self.piece_at(Position::at(row, col)) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push_str(&piece.symbol());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
        }

        out.push(' ');
        out.push(self.side_to_move().sfen_char());
        out.push(' ');

        let black = self.hand(Color::Black);
        let white = self.hand(Color::White);
        if black.is_empty() && white.is_empty() {
            out.push('-');
        } else {
            for (hand, color) in [(black, Color::Black), (white, Color::White)] {
                for (kind, n) in hand.iter() {
                    if n > 1 {
                        out.push_str(&n.to_string());
                    }
                    out.push_str(&Piece::new(kind, color).symbol());
                }
            }
        }
        out.push_str(" 1");
        out
    }
}
