use std::fmt;
use std::ops::Deref;

use crate::constants::{BOARDSIZE, N};
use crate::piece::{Color, Piece, PieceKind};
use crate::position::Position;

/// The 9x9 grid. Placement and removal only; every rule lives in
/// [`crate::game::GameEngine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; BOARDSIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            cells: [None; BOARDSIZE],
        }
    }

    /// The standard opening: White on rows 0-2, Black on rows 6-8.
    pub fn initial() -> Self {
        const BACK_RANK: [PieceKind; N] = [
            PieceKind::Lance,
            PieceKind::Knight,
            PieceKind::Silver,
            PieceKind::Gold,
            PieceKind::King,
            PieceKind::Gold,
            PieceKind::Silver,
            PieceKind::Knight,
            PieceKind::Lance,
        ];
        let mut board = Self::empty();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            board.place(Position::at(0, col), Some(Piece::new(kind, Color::White)));
            board.place(Position::at(8, col), Some(Piece::new(kind, Color::Black)));
            board.place(Position::at(2, col), Some(Piece::new(PieceKind::Pawn, Color::White)));
            board.place(Position::at(6, col), Some(Piece::new(PieceKind::Pawn, Color::Black)));
        }
        board.place(Position::at(1, 1), Some(Piece::new(PieceKind::Bishop, Color::White)));
        board.place(Position::at(1, 7), Some(Piece::new(PieceKind::Rook, Color::White)));
        board.place(Position::at(7, 1), Some(Piece::new(PieceKind::Rook, Color::Black)));
        board.place(Position::at(7, 7), Some(Piece::new(PieceKind::Bishop, Color::Black)));
        board
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.cells[pos.index()]
    }

    #[inline]
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Overwrite a cell unconditionally. `None` clears it.
    #[inline]
    pub fn place(&mut self, pos: Position, piece: Option<Piece>) {
        self.cells[pos.index()] = piece;
    }

    /// Move whatever stands on `from` to `to`, returning the previous
    /// occupant of `to`. An empty `from` leaves the board untouched.
    pub fn relocate(&mut self, from: Position, to: Position) -> Option<Piece> {
        let Some(moving) = self.get(from) else {
            return None;
        };
        let previous = self.get(to);
        self.place(to, Some(moving));
        self.place(from, None);
        previous
    }

    /// Occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(|pos| self.get(pos).map(|piece| (pos, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, p)| p.kind == PieceKind::King && p.color == color)
            .map(|(pos, _)| pos)
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..N {
            write!(f, " {:>2}", N - col)?;
        }
        writeln!(f)?;
        for row in 0..N as u8 {
            write!(f, "{} ", (b'a' + row) as char)?;
            for col in 0..N as u8 {
                match self.get(Position::at(row, col)) {
                    Some(piece) => write!(f, " {:>2}", piece.symbol())?,
                    None => write!(f, "  .")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Scoped board mutation for legality probes.
///
/// Every cell touched through the probe is recorded and put back, in
/// reverse order, when the probe is dropped. Reads go through `Deref`, so
/// rule predicates that take `&Board` run unchanged on the simulated
/// position.
pub struct BoardProbe<'a> {
    board: &'a mut Board,
    undo: Vec<(Position, Option<Piece>)>,
}

impl<'a> BoardProbe<'a> {
    pub fn new(board: &'a mut Board) -> Self {
        Self {
            board,
            undo: Vec::with_capacity(2),
        }
    }

    pub fn place(&mut self, pos: Position, piece: Option<Piece>) {
        self.undo.push((pos, self.board.get(pos)));
        self.board.place(pos, piece);
    }

    pub fn relocate(&mut self, from: Position, to: Position) -> Option<Piece> {
        let moving = self.board.get(from);
        let previous = self.board.get(to);
        if moving.is_some() {
            self.place(to, moving);
            self.place(from, None);
        }
        previous
    }
}

impl Deref for BoardProbe<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for BoardProbe<'_> {
    fn drop(&mut self) {
        while let Some((pos, piece)) = self.undo.pop() {
            self.board.place(pos, piece);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let board = Board::initial();
        assert_eq!(board.count(Color::Black), 20);
        assert_eq!(board.count(Color::White), 20);
        assert_eq!(board.find_king(Color::Black), Some(Position::at(8, 4)));
        assert_eq!(board.find_king(Color::White), Some(Position::at(0, 4)));
        assert_eq!(
            board.get(Position::at(7, 1)),
            Some(Piece::new(PieceKind::Rook, Color::Black))
        );
        assert_eq!(
            board.get(Position::at(1, 1)),
            Some(Piece::new(PieceKind::Bishop, Color::White))
        );
        assert!(board.is_empty_at(Position::at(4, 4)));
    }

    #[test]
    fn test_relocate_returns_previous_occupant() {
        let mut board = Board::empty();
        let rook = Piece::new(PieceKind::Rook, Color::Black);
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        board.place(Position::at(4, 4), Some(rook));
        board.place(Position::at(2, 4), Some(pawn));

        let captured = board.relocate(Position::at(4, 4), Position::at(2, 4));
        assert_eq!(captured, Some(pawn));
        assert_eq!(board.get(Position::at(2, 4)), Some(rook));
        assert!(board.is_empty_at(Position::at(4, 4)));
    }

    #[test]
    fn test_relocate_from_empty_is_noop() {
        let mut board = Board::initial();
        let before = board.clone();
        assert_eq!(board.relocate(Position::at(4, 4), Position::at(6, 0)), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_probe_restores_on_drop() {
        let mut board = Board::initial();
        let before = board.clone();
        {
            let mut probe = BoardProbe::new(&mut board);
            probe.relocate(Position::at(6, 4), Position::at(5, 4));
            probe.place(Position::at(4, 4), Some(Piece::new(PieceKind::Gold, Color::White)));
            assert!(probe.is_empty_at(Position::at(6, 4)));
            assert!(!probe.is_empty_at(Position::at(4, 4)));
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_probe_restores_on_early_return() {
        fn probe_and_bail(board: &mut Board) -> Option<()> {
            let mut probe = BoardProbe::new(board);
            probe.place(Position::at(8, 4), None);
            probe.find_king(Color::Black)?;
            Some(())
        }
        let mut board = Board::initial();
        let before = board.clone();
        assert!(probe_and_bail(&mut board).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_display_marks_empty_cells() {
        let text = Board::initial().to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[1].starts_with("a "));
        assert!(lines[5].contains('.'));
        assert!(lines[9].contains('K'));
    }
}
