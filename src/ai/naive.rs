//! Heuristic-free computer opponent.
//!
//! The first piece in row-major order that can move is always the one that
//! moves; only its destination is chosen at random.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::board::Board;
use crate::config::CapturePolicy;
use crate::error::MoveError;
use crate::game::MoveSelector;
use crate::rules::{first_movable_piece, legal_destinations};
use crate::types::{Move, Side};

/// Finds a legal move for `side` using the thread-local RNG.
pub fn choose_opponent_move(board: &Board, side: Side) -> Result<Move, MoveError> {
    choose_opponent_move_with(board, side, &mut rand::rng())
}

/// Finds a legal move for `side`: the first movable piece in row-major order,
/// to a destination drawn uniformly from its legal destinations.
///
/// Captures always require an opposing piece on the jumped cell here,
/// whatever policy the session plays under.
#[instrument(level = "debug", skip(board, rng))]
pub fn choose_opponent_move_with<R: Rng + ?Sized>(
    board: &Board,
    side: Side,
    rng: &mut R,
) -> Result<Move, MoveError> {
    let from = first_movable_piece(board, side, CapturePolicy::Strict)
        .ok_or(MoveError::NoMoveAvailable(side))?;
    let destinations = legal_destinations(board, from, CapturePolicy::Strict);
    let &to = destinations
        .choose(rng)
        .ok_or(MoveError::NoMoveAvailable(side))?;

    debug!(?from, ?to, options = destinations.len(), "opponent move chosen");
    Ok(Move::new(from, to))
}

/// Random-destination selector backed by a seedable RNG.
#[derive(Debug, Clone)]
pub struct NaiveSelector {
    rng: StdRng,
}

impl NaiveSelector {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for NaiveSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for NaiveSelector {
    fn select_move(&mut self, board: &Board, side: Side) -> Result<Move, MoveError> {
        choose_opponent_move_with(board, side, &mut self.rng)
    }
}

/// Deterministic selector: first destination of the first movable piece.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&mut self, board: &Board, side: Side) -> Result<Move, MoveError> {
        let from = first_movable_piece(board, side, CapturePolicy::Strict)
            .ok_or(MoveError::NoMoveAvailable(side))?;
        legal_destinations(board, from, CapturePolicy::Strict)
            .first()
            .map(|&to| Move::new(from, to))
            .ok_or(MoveError::NoMoveAvailable(side))
    }
}
