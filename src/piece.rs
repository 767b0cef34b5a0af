//! Colors, piece kinds, and the piece value type.
//!
//! A [`Piece`] carries no location of its own: on the board it is the
//! occupant of a cell, in hand it is a count in a [`crate::hand::Hand`].
//! That keeps the "never promoted while in hand" rule structural.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{KNIGHT_DEAD_RANKS, MAX_INDEX, PAWN_DEAD_RANKS, PROMOTION_ZONE_DEPTH};
use crate::error::ShogiError;

/// Side to move / piece owner. Black moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Row delta of one step forward: Black advances towards row 0.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Black => -1,
            Color::White => 1,
        }
    }

    /// Distance of `row` from this color's far edge (0 on the farthest rank).
    #[inline]
    pub const fn rows_from_far_edge(self, row: u8) -> u8 {
        match self {
            Color::Black => row,
            Color::White => MAX_INDEX - row,
        }
    }

    /// True if `row` is in this color's promotion zone, the three ranks of
    /// the opponent's camp. Impasse scoring uses the same ranks.
    #[inline]
    pub const fn in_promotion_zone(self, row: u8) -> bool {
        self.rows_from_far_edge(row) < PROMOTION_ZONE_DEPTH
    }

    /// SFEN side letter.
    pub const fn sfen_char(self) -> char {
        match self {
            Color::Black => 'b',
            Color::White => 'w',
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// The eight kinds of shogi piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PieceKind {
    King,
    Rook,
    Bishop,
    Gold,
    Silver,
    Knight,
    Lance,
    Pawn,
}

impl PieceKind {
    pub const ALL: [PieceKind; 8] = [
        PieceKind::King,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Gold,
        PieceKind::Silver,
        PieceKind::Knight,
        PieceKind::Lance,
        PieceKind::Pawn,
    ];

    /// Kinds that can sit in a hand, in conventional hand order.
    pub const DROPPABLE: [PieceKind; 7] = [
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Gold,
        PieceKind::Silver,
        PieceKind::Knight,
        PieceKind::Lance,
        PieceKind::Pawn,
    ];

    /// Gold and King never promote.
    #[inline]
    pub const fn can_promote(self) -> bool {
        !matches!(self, PieceKind::King | PieceKind::Gold)
    }

    /// Copies of this kind in a full set, both colors together.
    pub const fn supply(self) -> u8 {
        match self {
            PieceKind::King | PieceKind::Rook | PieceKind::Bishop => 2,
            PieceKind::Gold | PieceKind::Silver | PieceKind::Knight | PieceKind::Lance => 4,
            PieceKind::Pawn => 18,
        }
    }

    /// Uppercase one-letter token.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Gold => 'G',
            PieceKind::Silver => 'S',
            PieceKind::Knight => 'N',
            PieceKind::Lance => 'L',
            PieceKind::Pawn => 'P',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::King => "King",
            PieceKind::Rook => "Rook",
            PieceKind::Bishop => "Bishop",
            PieceKind::Gold => "Gold",
            PieceKind::Silver => "Silver",
            PieceKind::Knight => "Knight",
            PieceKind::Lance => "Lance",
            PieceKind::Pawn => "Pawn",
        }
    }

    /// Parse a one-letter token in either case.
    pub fn from_letter(c: char) -> Option<PieceKind> {
        Some(match c.to_ascii_uppercase() {
            'K' => PieceKind::King,
            'R' => PieceKind::Rook,
            'B' => PieceKind::Bishop,
            'G' => PieceKind::Gold,
            'S' => PieceKind::Silver,
            'N' => PieceKind::Knight,
            'L' => PieceKind::Lance,
            'P' => PieceKind::Pawn,
            _ => return None,
        })
    }

    /// Number of ranks at the far edge where a piece of this kind, dropped
    /// unpromoted, would have no move left.
    #[inline]
    pub const fn dead_ranks(self) -> u8 {
        match self {
            PieceKind::Pawn | PieceKind::Lance => PAWN_DEAD_RANKS,
            PieceKind::Knight => KNIGHT_DEAD_RANKS,
            _ => 0,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts one-letter tokens (`"P"`, `"r"`) and names (`"Pawn"`,
/// `"GoldGeneral"`), case-insensitively.
impl FromStr for PieceKind {
    type Err = ShogiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return PieceKind::from_letter(c).ok_or_else(|| ShogiError::InvalidPieceKind(s.into()));
        }
        let kind = match token.to_ascii_lowercase().as_str() {
            "king" => PieceKind::King,
            "rook" => PieceKind::Rook,
            "bishop" => PieceKind::Bishop,
            "gold" | "goldgeneral" => PieceKind::Gold,
            "silver" | "silvergeneral" => PieceKind::Silver,
            "knight" => PieceKind::Knight,
            "lance" => PieceKind::Lance,
            "pawn" => PieceKind::Pawn,
            _ => return Err(ShogiError::InvalidPieceKind(s.into())),
        };
        Ok(kind)
    }
}

impl TryFrom<String> for PieceKind {
    type Error = ShogiError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PieceKind> for String {
    fn from(kind: PieceKind) -> String {
        kind.name().to_string()
    }
}

/// A piece on the board: kind, owner, and promotion state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub promoted: bool,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            promoted: false,
        }
    }

    pub const fn new_promoted(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            promoted: true,
        }
    }

    /// Row delta of one step forward for this piece's owner.
    #[inline]
    pub const fn forward(&self) -> i8 {
        self.color.forward()
    }

    /// The form this piece takes once captured by `capturer`: unpromoted
    /// and recolored.
    #[inline]
    pub const fn captured_by(self, capturer: Color) -> Piece {
        Piece::new(self.kind, capturer)
    }

    /// Display symbol: uppercase for Black, lowercase for White, `+` prefix
    /// when promoted.
    pub fn symbol(&self) -> String {
        let letter = match self.color {
            Color::Black => self.kind.letter(),
            Color::White => self.kind.letter().to_ascii_lowercase(),
        };
        if self.promoted {
            format!("+{letter}")
        } else {
            letter.to_string()
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_opponent() {
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(!Color::White, Color::Black);
    }

    #[test]
    fn test_promotion_zone_rows() {
        let black: Vec<u8> = (0..9).filter(|&r| Color::Black.in_promotion_zone(r)).collect();
        let white: Vec<u8> = (0..9).filter(|&r| Color::White.in_promotion_zone(r)).collect();
        assert_eq!(black, vec![0, 1, 2]);
        assert_eq!(white, vec![6, 7, 8]);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(Piece::new(PieceKind::Pawn, Color::Black).symbol(), "P");
        assert_eq!(Piece::new(PieceKind::Pawn, Color::White).symbol(), "p");
        assert_eq!(Piece::new_promoted(PieceKind::Rook, Color::Black).symbol(), "+R");
        assert_eq!(Piece::new_promoted(PieceKind::Knight, Color::White).symbol(), "+n");
        assert_eq!(Piece::new(PieceKind::King, Color::White).symbol(), "k");
    }

    #[test]
    fn test_kind_tokens() {
        assert_eq!("P".parse::<PieceKind>().unwrap(), PieceKind::Pawn);
        assert_eq!("n".parse::<PieceKind>().unwrap(), PieceKind::Knight);
        assert_eq!("GoldGeneral".parse::<PieceKind>().unwrap(), PieceKind::Gold);
        assert_eq!("silver".parse::<PieceKind>().unwrap(), PieceKind::Silver);
        assert!(matches!(
            "Queen".parse::<PieceKind>(),
            Err(ShogiError::InvalidPieceKind(_))
        ));
        assert!("X".parse::<PieceKind>().is_err());
        assert!("".parse::<PieceKind>().is_err());
    }

    #[test]
    fn test_captured_piece_loses_promotion() {
        let tokin = Piece::new_promoted(PieceKind::Pawn, Color::White);
        let in_hand = tokin.captured_by(Color::Black);
        assert!(!in_hand.promoted);
        assert_eq!(in_hand.color, Color::Black);
        assert_eq!(in_hand.kind, PieceKind::Pawn);
    }

    #[test]
    fn test_only_gold_and_king_never_promote() {
        let fixed: Vec<_> = PieceKind::ALL.iter().filter(|k| !k.can_promote()).collect();
        assert_eq!(fixed, vec![&PieceKind::King, &PieceKind::Gold]);
    }
}
