pub mod naive;

pub use naive::{FirstLegalMoveSelector, NaiveSelector, choose_opponent_move, choose_opponent_move_with};
