use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod notation;
pub mod rules;
pub mod turn;
pub mod types;
pub mod wasm;

pub use ai::choose_opponent_move;
pub use board::Board;
pub use config::{CapturePolicy, GameConfig, GameMode, RulesConfig};
pub use error::{MoveError, NotationError};
pub use game::{GameInstance, MoveSelector};
pub use rules::{apply_move, is_game_over, is_valid_move, validate_move};
pub use turn::TurnCoordinator;
pub use types::{Cell, GameResult, GameState, Move, MoveKind, Position, Side};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
