use thiserror::Error;

use crate::types::{Position, Side};

/// Reasons a move is rejected or cannot be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("destination {0} is off the board")]
    OutOfBounds(Position),

    #[error("destination {0} is occupied")]
    OccupiedDestination(Position),

    #[error("pieces cannot move backward")]
    WrongDirection,

    #[error("move must be one or two diagonal squares")]
    InvalidGeometry,

    #[error("no opposing piece to capture at {0}")]
    NothingToCapture(Position),

    #[error("no legal move available for player {0}")]
    NoMoveAvailable(Side),

    #[error("no piece of yours at {0}")]
    NotYourPiece(Position),

    #[error("it is not player {0}'s turn")]
    NotYourTurn(Side),

    #[error("game is already over")]
    GameOver,
}

/// Malformed move text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("expected a move like 3a-4b, got {0:?}")]
    Format(String),

    #[error("invalid square {0:?}")]
    Square(String),
}
