//! Shogi-Rules: a legality engine for 9x9 shogi.
//!
//! The crate validates and plays board moves and drops, applies forced
//! promotion, detects check and checkmate, and scores the king-race
//! (impasse) ending. It does not search for good moves; move choice is
//! left to a pluggable [`agent::Policy`].
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, zone depths, impasse thresholds
//! - [`position`] - Board coordinates and USI square notation
//! - [`piece`] - Colors, piece kinds, and the piece value type
//! - [`board`] - The 9x9 grid and the scoped [`board::BoardProbe`]
//! - [`hand`] - Captured-piece reserves
//! - [`movegen`] - Geometry-only candidate generation per kind
//! - [`rules`] - Check, checkmate, promotion and drop predicates
//! - [`game`] - [`GameEngine`]: turn order and the move/drop pipelines
//! - [`impasse`] - King-race scoring
//! - [`moves`] - [`Move`] values and their text form
//! - [`sfen`] - SFEN parsing and formatting
//! - [`snapshot`] - Snapshot/restore and its JSON encoding
//! - [`agent`] - Move-choosing policies
//! - [`selfplay`] - Policy-vs-policy game driver
//! - [`protocol`] - Line-oriented command protocol
//!
//! ## Example
//!
//! ```
//! use shogi_rules::{GameEngine, Position};
//!
//! let mut game = GameEngine::new();
//! let from: Position = "7g".parse().unwrap();
//! let to: Position = "7f".parse().unwrap();
//! assert!(game.make_move(from, to));
//! assert_eq!(game.legal_actions().len(), 30);
//! ```

pub mod agent;
pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod hand;
pub mod impasse;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod position;
pub mod protocol;
pub mod rules;
pub mod selfplay;
pub mod sfen;
pub mod snapshot;

pub use error::{Result, ShogiError};
pub use game::{GameEngine, GameStatus, IllegalDrop, IllegalMove, MoveOutcome};
pub use impasse::ImpasseResult;
pub use moves::Move;
pub use piece::{Color, Piece, PieceKind};
pub use position::Position;
