//! Board coordinates and square notation.
//!
//! A [`Position`] is an immutable `(row, col)` pair with both indices in
//! `0..9`. Row 0 is the top rank as printed (White's camp) and column 0 is
//! the leftmost file, which shogi notation calls file 9.
//!
//! The text form follows USI: file digit then rank letter, so `(6, 2)` is
//! `"7g"` and `(0, 8)` is `"1a"`.

use std::fmt;
use std::str::FromStr;

use crate::constants::{MAX_INDEX, N};
use crate::error::ShogiError;

/// A cell on the 9x9 board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Create a position, or `None` if either index is off the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if row <= MAX_INDEX && col <= MAX_INDEX {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Create a position from indices known to be in range.
    ///
    /// # Panics
    /// Panics if `row` or `col` is greater than 8.
    pub const fn at(row: u8, col: u8) -> Self {
        assert!(row <= MAX_INDEX && col <= MAX_INDEX, "position out of range");
        Self { row, col }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Index into a row-major 81-cell array.
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * N + self.col as usize
    }

    /// The position `(d_row, d_col)` away, if it is still on the board.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i16 + d_row as i16;
        let col = self.col as i16 + d_col as i16;
        if (0..N as i16).contains(&row) && (0..N as i16).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// All 81 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..N as u8).flat_map(|row| (0..N as u8).map(move |col| Position { row, col }))
    }

    /// Shogi file number (9 on the left, 1 on the right).
    #[inline]
    pub const fn file(self) -> u8 {
        N as u8 - self.col
    }

    /// Rank letter, `'a'` for row 0 through `'i'` for row 8.
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'a' + self.row) as char
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank_char())
    }
}

/// Parse a square in USI notation, e.g. `"7g"`.
impl FromStr for Position {
    type Err = ShogiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ShogiError::InvalidSquare(s.to_string()));
        }
        let file = bytes[0];
        let rank = bytes[1].to_ascii_lowercase();
        if !(b'1'..=b'9').contains(&file) || !(b'a'..=b'i').contains(&rank) {
            return Err(ShogiError::InvalidSquare(s.to_string()));
        }
        let col = N as u8 - (file - b'0');
        let row = rank - b'a';
        Ok(Self { row, col })
    }
}
