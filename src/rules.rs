//! Move legality, move application and terminal-state checks.
//!
//! Every caller (the game session, the opponent search, the text UI) goes
//! through [`validate_move`], so the rules cannot disagree with each other.

use tracing::{debug, instrument, trace};

use crate::board::Board;
use crate::config::CapturePolicy;
use crate::error::MoveError;
use crate::types::{Cell, Move, MoveKind, Position, Side};

/// Checks a move for `side` under `policy` and classifies it.
///
/// Checks run in order: destination on board, destination empty, forward
/// direction, step/capture geometry, then the jumped piece for captures.
#[instrument(level = "trace", skip(board))]
pub fn validate_move(
    board: &Board,
    side: Side,
    mv: Move,
    policy: CapturePolicy,
) -> Result<MoveKind, MoveError> {
    if !mv.from.is_on_board() {
        return Err(MoveError::OutOfBounds(mv.from));
    }
    if !mv.to.is_on_board() {
        return Err(MoveError::OutOfBounds(mv.to));
    }
    if !board.piece_at(mv.to).is_empty() {
        return Err(MoveError::OccupiedDestination(mv.to));
    }
    if (mv.to.row - mv.from.row).signum() != side.forward() {
        return Err(MoveError::WrongDirection);
    }

    let kind = mv.kind().ok_or(MoveError::InvalidGeometry)?;
    if kind == MoveKind::Capture && policy == CapturePolicy::Strict {
        let mid = mv.midpoint();
        if board.piece_at(mid) != Cell::Piece(side.opponent()) {
            return Err(MoveError::NothingToCapture(mid));
        }
    }

    trace!(?kind, "move accepted");
    Ok(kind)
}

/// Boolean form of [`validate_move`] under the strict capture policy.
pub fn is_valid_move(board: &Board, side: Side, from: Position, to: Position) -> bool {
    validate_move(board, side, Move::new(from, to), CapturePolicy::Strict).is_ok()
}

/// Applies an already validated move. Returns the captured cell, if any.
///
/// A capture-shaped move removes the jumped piece only when it belongs to the
/// opponent of the moving piece; the moving piece is relocated either way.
pub fn apply_move(board: &mut Board, mv: Move) -> Option<Position> {
    let piece = board.piece_at(mv.from);

    let mut captured = None;
    if mv.kind() == Some(MoveKind::Capture) {
        let mid = mv.midpoint();
        let jumped = board.piece_at(mid);
        if let (Some(mover), Some(victim)) = (piece.side(), jumped.side())
            && mover != victim
        {
            board.set_piece_at(mid, Cell::Empty);
            captured = Some(mid);
        }
    }

    board.set_piece_at(mv.from, Cell::Empty);
    board.set_piece_at(mv.to, piece);

    debug!(from = ?mv.from, to = ?mv.to, ?captured, "move applied");
    captured
}

/// Legal destinations of the piece on `from`, in probe order:
/// forward-left step, forward-right step, forward-left capture, forward-right capture.
///
/// Read-only. Empty when `from` holds no piece.
pub fn legal_destinations(board: &Board, from: Position, policy: CapturePolicy) -> Vec<Position> {
    let Some(side) = board.piece_at(from).side() else {
        return Vec::new();
    };
    let forward = side.forward();

    [
        (forward, -1),
        (forward, 1),
        (2 * forward, -2),
        (2 * forward, 2),
    ]
    .into_iter()
    .map(|(d_row, d_col)| from.offset(d_row, d_col))
    .filter(|&to| validate_move(board, side, Move::new(from, to), policy).is_ok())
    .collect()
}

/// Every legal move for `side`, scanning sources in row-major order.
pub fn legal_moves(board: &Board, side: Side, policy: CapturePolicy) -> Vec<Move> {
    board
        .cells()
        .filter(|&(_, cell)| cell == Cell::Piece(side))
        .flat_map(|(from, _)| {
            legal_destinations(board, from, policy)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

/// First piece of `side` in row-major order that has any legal destination.
pub fn first_movable_piece(board: &Board, side: Side, policy: CapturePolicy) -> Option<Position> {
    board
        .cells()
        .filter(|&(_, cell)| cell == Cell::Piece(side))
        .map(|(pos, _)| pos)
        .find(|&pos| !legal_destinations(board, pos, policy).is_empty())
}

pub fn has_legal_move(board: &Board, side: Side, policy: CapturePolicy) -> bool {
    first_movable_piece(board, side, policy).is_some()
}

/// True when `side` has no pieces left.
pub fn is_game_over(board: &Board, side: Side) -> bool {
    board.count_pieces(side) == 0
}
