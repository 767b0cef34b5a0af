//! The game engine: turn order, hands, and the legality pipelines for board
//! moves and drops.
//!
//! A rejected move or drop is a normal outcome, reported as `false` (or as an
//! [`IllegalMove`] / [`IllegalDrop`] reason through the `try_*` forms) and
//! leaving the game exactly as it was. Malformed input, such as an unknown
//! piece-kind token, is a [`ShogiError`] instead.

use log::debug;

use crate::board::{Board, BoardProbe};
use crate::error::ShogiError;
use crate::hand::Hand;
use crate::impasse::ImpasseResult;
use crate::movegen;
use crate::moves::Move;
use crate::piece::{Color, Piece, PieceKind};
use crate::position::Position;
use crate::rules;

/// Why a board move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    #[error("no piece on the origin square")]
    NoPiece,
    #[error("the piece belongs to the other side")]
    NotYourPiece,
    #[error("the piece cannot reach that square")]
    Unreachable,
    #[error("the move leaves the king in check")]
    LeavesKingInCheck,
    #[error("the king cannot be captured")]
    CapturesKing,
}

/// Why a drop was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalDrop {
    #[error("no such piece in hand")]
    NotInHand,
    #[error("the square is occupied")]
    Occupied,
    #[error("two unpromoted pawns on one file (nifu)")]
    Nifu,
    #[error("the piece would have no legal move from there")]
    DeadEnd,
    #[error("the drop does not answer the check")]
    StillInCheck,
    #[error("a pawn drop may not give checkmate")]
    PawnDropMate,
}

/// What an accepted board move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub captured: Option<PieceKind>,
    pub promoted: bool,
}

/// Where the game stands, from the side to move's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// A King is gone from the board. Unreachable in play; possible after
    /// restoring a hand-built position.
    KingLost { loser: Color },
    /// In check with no legal move or drop.
    Checkmate { loser: Color },
    /// Not in check, but no legal move or drop exists either.
    NoLegalMoves { loser: Color },
    /// Both Kings reached the far camp and the king race was decided.
    Impasse(ImpasseResult),
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }

    /// `None` for ongoing games and drawn impasses.
    pub fn winner(&self) -> Option<Color> {
        match *self {
            GameStatus::Ongoing => None,
            GameStatus::KingLost { loser }
            | GameStatus::Checkmate { loser }
            | GameStatus::NoLegalMoves { loser } => Some(loser.opponent()),
            GameStatus::Impasse(result) => result.winner,
        }
    }
}

/// One game of shogi. Owns the board and both hands exclusively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    hands: [Hand; 2],
    side_to_move: Color,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// The standard opening with Black to move.
    pub fn new() -> Self {
        Self::from_parts(Board::initial(), Hand::new(), Hand::new(), Color::Black)
    }

    /// Assemble a game from an arbitrary board, hands, and side to move.
    /// No rule validation is done here.
    pub fn from_parts(
        board: Board,
        black_hand: Hand,
        white_hand: Hand,
        side_to_move: Color,
    ) -> Self {
        Self {
            board,
            hands: [black_hand, white_hand],
            side_to_move,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn hand(&self, color: Color) -> &Hand {
        &self.hands[color.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.board.get(pos)
    }

    /// Geometric targets of whatever stands on `pos`, ignoring turn order and
    /// check. Meant for highlighting.
    pub fn legal_moves(&self, pos: Position) -> Vec<Position> {
        match self.board.get(pos) {
            Some(piece) => movegen::candidates(&self.board, pos, piece),
            None => Vec::new(),
        }
    }

    // =========================================================================
    // Board moves
    // =========================================================================

    pub fn make_move(&mut self, from: Position, to: Position) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Validate and play `from -> to` for the side to move.
    pub fn try_move(&mut self, from: Position, to: Position) -> Result<MoveOutcome, IllegalMove> {
        let side = self.side_to_move;
        let piece = check_move(&mut self.board, side, from, to).inspect_err(|err| {
            debug!("{side} {from}{to} rejected: {err}");
        })?;

        let captured = self.board.relocate(from, to);
        if let Some(victim) = captured {
            let in_hand = victim.captured_by(side);
            self.hands[side.index()].add(in_hand.kind);
        }

        let promoted = rules::promotes(piece, from, to);
        if promoted {
            self.board.place(to, Some(Piece { promoted: true, ..piece }));
        }

        self.side_to_move = side.opponent();
        Ok(MoveOutcome {
            captured: captured.map(|p| p.kind),
            promoted,
        })
    }

    /// Run the move pipeline without committing anything.
    pub fn validate_move(&self, from: Position, to: Position) -> Result<(), IllegalMove> {
        let mut scratch = self.board.clone();
        check_move(&mut scratch, self.side_to_move, from, to).map(|_| ())
    }

    // =========================================================================
    // Drops
    // =========================================================================

    pub fn drop_piece(&mut self, kind: PieceKind, to: Position) -> bool {
        self.try_drop(kind, to).is_ok()
    }

    /// Drop by kind token (`"P"`, `"Pawn"`, ...). An unknown token is an
    /// input error, not a rejected drop.
    pub fn drop_piece_named(&mut self, token: &str, to: Position) -> Result<bool, ShogiError> {
        let kind: PieceKind = token.parse()?;
        Ok(self.drop_piece(kind, to))
    }

    /// Validate and play a drop of `kind` onto `to` for the side to move.
    /// A dropped piece is always unpromoted and never promotes on this ply.
    pub fn try_drop(&mut self, kind: PieceKind, to: Position) -> Result<(), IllegalDrop> {
        let side = self.side_to_move;
        check_drop(&mut self.board, &self.hands[side.index()], side, kind, to).inspect_err(|err| {
            debug!("{side} {}*{to} rejected: {err}", kind.letter());
        })?;

        self.hands[side.index()].take(kind);
        self.board.place(to, Some(Piece::new(kind, side)));
        self.side_to_move = side.opponent();
        Ok(())
    }

    /// Run the drop pipeline without committing anything.
    pub fn validate_drop(&self, kind: PieceKind, to: Position) -> Result<(), IllegalDrop> {
        let side = self.side_to_move;
        let mut scratch = self.board.clone();
        check_drop(&mut scratch, self.hand(side), side, kind, to)
    }

    // =========================================================================
    // Actions
    // =========================================================================

    pub fn apply(&mut self, mv: Move) -> bool {
        match mv {
            Move::Board { from, to } => self.make_move(from, to),
            Move::Drop { kind, to } => self.drop_piece(kind, to),
        }
    }

    /// Every move and drop the side to move may legally play.
    ///
    /// Board moves come first, by origin in row-major order; then drops, by
    /// kind in hand order and target in row-major order.
    pub fn legal_actions(&self) -> Vec<Move> {
        let side = self.side_to_move;
        let mut scratch = self.board.clone();
        let mut actions = Vec::new();

        for (from, piece) in self.board.pieces_of(side) {
            for to in movegen::candidates(&self.board, from, piece) {
                if check_move(&mut scratch, side, from, to).is_ok() {
                    actions.push(Move::Board { from, to });
                }
            }
        }

        let hand = self.hand(side);
        for (kind, _) in hand.iter() {
            for to in Position::all() {
                if check_drop(&mut scratch, hand, side, kind, to).is_ok() {
                    actions.push(Move::Drop { kind, to });
                }
            }
        }
        actions
    }

    // =========================================================================
    // Check, checkmate, game end
    // =========================================================================

    pub fn is_in_check(&self, color: Color) -> bool {
        rules::is_in_check(&self.board, color)
    }

    /// In check with no escaping board move. Drops are not considered; see
    /// [`rules::is_checkmate`].
    pub fn is_checkmate(&self, color: Color) -> bool {
        rules::is_checkmate(&self.board, color)
    }

    /// True if `color`'s King is gone or `color` is checkmated.
    pub fn is_game_over(&self, color: Color) -> bool {
        rules::king_missing(&self.board, color) || self.is_checkmate(color)
    }

    /// Summarise how the game stands for the side to move.
    ///
    /// Unlike [`GameEngine::is_checkmate`], this counts drops as escapes: the
    /// game ends only when the enumerator finds nothing to play.
    pub fn status(&self) -> GameStatus {
        for color in [self.side_to_move, self.side_to_move.opponent()] {
            if rules::king_missing(&self.board, color) {
                return GameStatus::KingLost { loser: color };
            }
        }
        let side = self.side_to_move;
        if self.legal_actions().is_empty() {
            return if self.is_in_check(side) {
                GameStatus::Checkmate { loser: side }
            } else {
                GameStatus::NoLegalMoves { loser: side }
            };
        }
        let impasse = self.check_impasse();
        if impasse.is_impasse {
            return GameStatus::Impasse(impasse);
        }
        GameStatus::Ongoing
    }

    /// Number of pieces `color` owns, on the board and in hand.
    pub fn material(&self, color: Color) -> u32 {
        self.board.count(color) as u32 + self.hand(color).total()
    }

    pub(crate) fn hands(&self) -> &[Hand; 2] {
        &self.hands
    }

    /// Reject piece counts no game can reach: a second King of one color,
    /// or more copies of a kind than a full set holds. A missing King is
    /// allowed; [`GameEngine::status`] reports it as lost.
    pub(crate) fn check_census(&self) -> std::result::Result<(), String> {
        for color in Color::ALL {
            let kings = self
                .board
                .pieces_of(color)
                .filter(|(_, p)| p.kind == PieceKind::King)
                .count();
            if kings > 1 {
                return Err(format!("{color} has {kings} kings"));
            }
        }
        for kind in PieceKind::DROPPABLE {
            let on_board = self.board.pieces().filter(|(_, p)| p.kind == kind).count();
            let held: usize = self.hands.iter().map(|h| usize::from(h.count(kind))).sum();
            let total = on_board + held;
            if total > usize::from(kind.supply()) {
                return Err(format!("{total} {kind} pieces, a set has {}", kind.supply()));
            }
        }
        Ok(())
    }
}

/// Steps 1-4 of the move pipeline. Returns the moving piece.
fn check_move(
    board: &mut Board,
    side: Color,
    from: Position,
    to: Position,
) -> Result<Piece, IllegalMove> {
    let piece = board.get(from).ok_or(IllegalMove::NoPiece)?;
    if piece.color != side {
        return Err(IllegalMove::NotYourPiece);
    }
    if !movegen::attacks(board, from, piece, to) {
        return Err(IllegalMove::Unreachable);
    }
    if !rules::move_keeps_king_safe(board, from, to, side) {
        return Err(IllegalMove::LeavesKingInCheck);
    }
    if board.get(to).is_some_and(|target| target.kind == PieceKind::King) {
        return Err(IllegalMove::CapturesKing);
    }
    Ok(piece)
}

/// Steps 1-5 of the drop pipeline. The board is unchanged on return.
fn check_drop(
    board: &mut Board,
    hand: &Hand,
    side: Color,
    kind: PieceKind,
    to: Position,
) -> Result<(), IllegalDrop> {
    if !hand.contains(kind) {
        return Err(IllegalDrop::NotInHand);
    }
    if !board.is_empty_at(to) {
        return Err(IllegalDrop::Occupied);
    }
    if kind == PieceKind::Pawn && rules::has_pawn_on_file(board, side, to.col()) {
        return Err(IllegalDrop::Nifu);
    }
    if rules::is_dead_end(kind, side, to.row()) {
        return Err(IllegalDrop::DeadEnd);
    }

    let in_check = rules::is_in_check(board, side);
    if !in_check && kind != PieceKind::Pawn {
        return Ok(());
    }

    let mut probe = BoardProbe::new(board);
    probe.place(to, Some(Piece::new(kind, side)));
    if in_check && rules::is_in_check(&probe, side) {
        return Err(IllegalDrop::StillInCheck);
    }
    if kind == PieceKind::Pawn {
        let opponent = side.opponent();
        if rules::is_in_check(&probe, opponent) && rules::is_checkmate(&probe, opponent) {
            return Err(IllegalDrop::PawnDropMate);
        }
    }
    Ok(())
}
