use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::BOARD_SIZE;

/// One of the two competing players.
///
/// Side A starts on rows 5-7 and moves first, toward row 0.
/// Side B starts on rows 0-2 and moves toward row 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Row delta of a forward move.
    pub fn forward(self) -> i8 {
        match self {
            Self::A => -1,
            Self::B => 1,
        }
    }

    /// Board symbol used by the text UI.
    pub fn symbol(self) -> char {
        match self {
            Self::A => 'x',
            Self::B => 'o',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Piece(Side),
}

impl Cell {
    pub fn side(self) -> Option<Side> {
        match self {
            Self::Empty => None,
            Self::Piece(side) => Some(side),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    /// Snapshot encoding: 0=empty, 1=side A, 2=side B.
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Piece(Side::A) => 1,
            Self::Piece(Side::B) => 2,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "_"),
            Self::Piece(side) => write!(f, "{side}"),
        }
    }
}

/// A board coordinate.
///
/// Signed so a destination that falls off any edge is still representable
/// and can be rejected by the rules engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(self) -> bool {
        (0..BOARD_SIZE as i8).contains(&self.row) && (0..BOARD_SIZE as i8).contains(&self.col)
    }

    pub fn offset(self, d_row: i8, d_col: i8) -> Self {
        Self::new(self.row.saturating_add(d_row), self.col.saturating_add(d_col))
    }

    /// Row-major cell index. Caller contract: `self.is_on_board()`.
    pub fn index(self) -> usize {
        debug_assert!(self.is_on_board(), "position off board: {self:?}");
        self.row as usize * BOARD_SIZE + self.col as usize
    }
}

/// Geometric class of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    Step,
    Capture,
}

/// A candidate transition from one cell to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// Classifies the geometry, or `None` when it is neither a step nor a capture.
    pub fn kind(&self) -> Option<MoveKind> {
        let d_row = (self.to.row as i16 - self.from.row as i16).abs();
        let d_col = (self.to.col as i16 - self.from.col as i16).abs();
        match (d_row, d_col) {
            (1, 1) => Some(MoveKind::Step),
            (2, 2) => Some(MoveKind::Capture),
            _ => None,
        }
    }

    /// The jumped cell of a capture-shaped move.
    pub fn midpoint(&self) -> Position {
        Position::new(
            ((self.from.row as i16 + self.to.row as i16) / 2) as i8,
            ((self.from.col as i16 + self.to.col as i16) / 2) as i8,
        )
    }
}

/// Public game state returned from the session and WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major cells, 0=empty, 1=side A, 2=side B.
    pub board: Vec<u8>,
    pub current_side: Side,
    pub a_count: u8,
    pub b_count: u8,
    pub is_game_over: bool,
    pub winner: Option<Side>,
    /// Contract:
    /// - `None` before the first move.
    /// - Otherwise the most recently applied move.
    pub last_move: Option<Move>,
    /// Cell emptied by the last move's capture, if any.
    pub captured: Option<Position>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: Option<Side>,
    pub a_count: u8,
    pub b_count: u8,
}
