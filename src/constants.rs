//! Constants for board geometry, zones, and impasse scoring.
//!
//! Rows are numbered from the top of the board as printed: row 0 is White's
//! back rank and row 8 is Black's back rank. Columns run left to right, so
//! column 0 is file 9 in shogi notation.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 9;

/// Number of cells on the board.
pub const BOARDSIZE: usize = N * N;

/// Largest valid row or column index.
pub const MAX_INDEX: u8 = (N - 1) as u8;

// =============================================================================
// Zones
// =============================================================================

/// Depth of the promotion zone, counted from the far edge.
///
/// The same three ranks form the entry zone used by impasse scoring.
pub const PROMOTION_ZONE_DEPTH: u8 = 3;

/// Ranks from the far edge on which a knight could no longer move.
pub const KNIGHT_DEAD_RANKS: u8 = 2;

/// Ranks from the far edge on which a pawn or lance could no longer move.
pub const PAWN_DEAD_RANKS: u8 = 1;

// =============================================================================
// Impasse (king race)
// =============================================================================

/// Points needed to win the king race outright.
pub const IMPASSE_WIN_POINTS: u32 = 31;

/// Points both sides need for the king race to be declared a draw.
pub const IMPASSE_DRAW_POINTS: u32 = 28;

/// Impasse value of a rook or bishop (promoted or not).
pub const MAJOR_PIECE_POINTS: u32 = 5;

/// Impasse value of every other non-king piece.
pub const MINOR_PIECE_POINTS: u32 = 1;

// =============================================================================
// Direction tables
// =============================================================================

/// One-step offsets as `(d_row, d_col)` with "forward" meaning negative rows,
/// i.e. seen from Black. Generators multiply the row part by the mover's
/// forward direction.
pub const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Gold general: forward, both forward diagonals, sideways, straight back.
pub const GOLD_STEPS: [(i8, i8); 6] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0)];

/// Silver general: forward, all four diagonals.
pub const SILVER_STEPS: [(i8, i8); 5] = [(-1, -1), (-1, 0), (-1, 1), (1, -1), (1, 1)];

/// Knight: two forward, one to either side.
pub const KNIGHT_JUMPS: [(i8, i8); 2] = [(-2, -1), (-2, 1)];

/// Orthogonal rays (rook).
pub const ROOK_RAYS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Diagonal rays (bishop).
pub const BISHOP_RAYS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

// =============================================================================
// Notation
// =============================================================================

/// SFEN of the standard opening position.
pub const STARTPOS_SFEN: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";
