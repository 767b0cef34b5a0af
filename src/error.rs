//! Invalid-input errors raised at parsing and deserialization boundaries.
//!
//! Rule rejections (an illegal move or drop) are not errors in this sense;
//! see [`crate::game::IllegalMove`] and [`crate::game::IllegalDrop`].

/// Errors for malformed input handed to the engine.
#[derive(Debug, thiserror::Error)]
pub enum ShogiError {
    #[error("unknown piece kind: {0:?}")]
    InvalidPieceKind(String),

    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("invalid move notation: {0:?}")]
    InvalidMove(String),

    #[error("unknown policy: {0:?} (expected random or capture)")]
    UnknownPolicy(String),

    #[error("invalid SFEN: {0}")]
    InvalidSfen(String),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("snapshot encoding failed")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShogiError>;
