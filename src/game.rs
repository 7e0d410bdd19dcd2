use tracing::{debug, info, instrument};

use crate::ai::NaiveSelector;
use crate::board::Board;
use crate::config::{GameConfig, GameMode};
use crate::error::MoveError;
use crate::rules::{self, apply_move, validate_move};
use crate::turn::TurnCoordinator;
use crate::types::{Cell, GameResult, GameState, Move, Position, Side};

/// Picks a move for the computer-controlled side.
pub trait MoveSelector: Send + Sync {
    fn select_move(&mut self, board: &Board, side: Side) -> Result<Move, MoveError>;
}

/// One game: board, side to move, and the computer opponent.
///
/// Validation, application and the turn switch happen together here and
/// nowhere else, so a rejected move never changes the board or the turn.
pub struct GameInstance {
    board: Board,
    turn: TurnCoordinator,
    config: GameConfig,
    pub is_game_over: bool,
    pub winner: Option<Side>,
    pub last_move: Option<Move>,
    pub captured: Option<Position>,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(config: GameConfig, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::new(),
            turn: TurnCoordinator::new(),
            config,
            is_game_over: false,
            winner: None,
            last_move: None,
            captured: None,
            selector,
        }
    }

    /// Resumes a game from an arbitrary position with `side` to move.
    /// A position that is already decided starts out finished.
    pub fn with_position(
        config: GameConfig,
        selector: Box<dyn MoveSelector>,
        board: Board,
        side: Side,
    ) -> Self {
        let mut game = Self {
            board,
            turn: TurnCoordinator::starting_with(side),
            ..Self::new(config, selector)
        };
        game.update_game_over();
        game
    }

    pub fn new_with_default_selector(config: GameConfig) -> Self {
        let selector = match config.seed {
            Some(seed) => NaiveSelector::seeded(seed),
            None => NaiveSelector::new(),
        };
        Self::new(config, Box::new(selector))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_side(&self) -> Side {
        self.turn.current_side()
    }

    /// True when the side to move is played by the computer.
    pub fn is_computer_turn(&self) -> bool {
        self.config.is_computer(self.current_side())
    }

    /// Plays a human move for the side to move.
    /// Returns the captured cell, if any.
    #[instrument(level = "debug", skip(self))]
    pub fn play(&mut self, mv: Move) -> Result<Option<Position>, MoveError> {
        if self.is_game_over {
            return Err(MoveError::GameOver);
        }
        let side = self.current_side();
        if self.is_computer_turn() {
            return Err(MoveError::NotYourTurn(side));
        }
        if !mv.from.is_on_board() {
            return Err(MoveError::OutOfBounds(mv.from));
        }
        if self.board.piece_at(mv.from) != Cell::Piece(side) {
            return Err(MoveError::NotYourPiece(mv.from));
        }

        self.apply(mv, side)
    }

    /// Lets the computer play for the side to move.
    #[instrument(level = "debug", skip(self))]
    pub fn do_ai_move(&mut self) -> Result<Move, MoveError> {
        if self.is_game_over {
            return Err(MoveError::GameOver);
        }
        let side = self.current_side();
        if self.config.mode == GameMode::Computer && !self.is_computer_turn() {
            return Err(MoveError::NotYourTurn(side));
        }

        let mv = self.selector.select_move(&self.board, side)?;
        if self.board.piece_at(mv.from) != Cell::Piece(side) {
            return Err(MoveError::NotYourPiece(mv.from));
        }
        self.apply(mv, side)?;
        Ok(mv)
    }

    /// Legal moves of the side to move under the session's rules.
    pub fn legal_moves(&self) -> Vec<Move> {
        rules::legal_moves(
            &self.board,
            self.current_side(),
            self.config.rules.capture_policy,
        )
    }

    pub fn has_legal_moves_for_current(&self) -> bool {
        rules::has_legal_move(
            &self.board,
            self.current_side(),
            self.config.rules.capture_policy,
        )
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            board: self.board.to_array().to_vec(),
            current_side: self.current_side(),
            a_count: self.board.count_pieces(Side::A),
            b_count: self.board.count_pieces(Side::B),
            is_game_over: self.is_game_over,
            winner: self.winner,
            last_move: self.last_move,
            captured: self.captured,
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        GameResult {
            winner: self.winner,
            a_count: self.board.count_pieces(Side::A),
            b_count: self.board.count_pieces(Side::B),
        }
    }

    fn apply(&mut self, mv: Move, side: Side) -> Result<Option<Position>, MoveError> {
        if let Err(err) = validate_move(&self.board, side, mv, self.config.rules.capture_policy) {
            debug!(%err, ?mv, "move rejected");
            return Err(err);
        }

        let captured = apply_move(&mut self.board, mv);
        self.last_move = Some(mv);
        self.captured = captured;
        self.turn.switch_turn();
        self.update_game_over();

        Ok(captured)
    }

    /// The game ends as soon as either side is eliminated, or when the side
    /// to move is left without a legal move. The other side wins.
    fn update_game_over(&mut self) {
        let loser = [Side::A, Side::B]
            .into_iter()
            .find(|&side| rules::is_game_over(&self.board, side))
            .or_else(|| (!self.has_legal_moves_for_current()).then(|| self.current_side()));

        if let Some(loser) = loser {
            self.is_game_over = true;
            self.winner = Some(loser.opponent());
            info!(winner = %loser.opponent(), "game over");
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, side: Side) {
        self.board = board;
        self.turn = TurnCoordinator::starting_with(side);
        self.is_game_over = false;
        self.winner = None;
        self.last_move = None;
        self.captured = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FirstLegalMoveSelector;
    use crate::config::{CapturePolicy, RulesConfig};

    struct FixedMoveSelector {
        mv: Move,
    }

    impl MoveSelector for FixedMoveSelector {
        fn select_move(&mut self, _board: &Board, _side: Side) -> Result<Move, MoveError> {
            Ok(self.mv)
        }
    }

    fn pos(row: i8, col: i8) -> Position {
        Position::new(row, col)
    }

    fn two_player() -> GameInstance {
        let config = GameConfig {
            mode: GameMode::Players,
            ..GameConfig::default()
        };
        GameInstance::new(config, Box::new(FirstLegalMoveSelector))
    }

    fn vs_computer() -> GameInstance {
        GameInstance::new(GameConfig::default(), Box::new(FirstLegalMoveSelector))
    }

    #[test]
    fn initial_state_is_correct() {
        let game = vs_computer();
        let state = game.to_game_state();

        assert_eq!(state.current_side, Side::A);
        assert_eq!(state.a_count, 12);
        assert_eq!(state.b_count, 12);
        assert!(!state.is_game_over);
        assert_eq!(state.winner, None);
        assert_eq!(state.last_move, None);
        assert_eq!(game.legal_moves().len(), 7);
    }

    #[test]
    fn opening_step_is_applied_and_turn_switches() {
        let mut game = two_player();

        let captured = game.play(Move::new(pos(5, 0), pos(4, 1))).unwrap();

        assert_eq!(captured, None);
        assert_eq!(game.board().piece_at(pos(5, 0)), Cell::Empty);
        assert_eq!(game.board().piece_at(pos(4, 1)), Cell::Piece(Side::A));
        assert_eq!(game.current_side(), Side::B);
        assert_eq!(game.last_move, Some(Move::new(pos(5, 0), pos(4, 1))));
    }

    #[test]
    fn rejected_move_keeps_board_and_turn() {
        let mut game = two_player();
        let before = *game.board();

        assert_eq!(
            game.play(Move::new(pos(5, 0), pos(6, 1))),
            Err(MoveError::OccupiedDestination(pos(6, 1)))
        );
        assert_eq!(
            game.play(Move::new(pos(5, 2), pos(3, 4))),
            Err(MoveError::NothingToCapture(pos(4, 3)))
        );
        assert_eq!(
            game.play(Move::new(pos(2, 1), pos(3, 0))),
            Err(MoveError::NotYourPiece(pos(2, 1)))
        );
        assert_eq!(
            game.play(Move::new(pos(4, 1), pos(3, 0))),
            Err(MoveError::NotYourPiece(pos(4, 1)))
        );

        assert_eq!(*game.board(), before);
        assert_eq!(game.current_side(), Side::A);
        assert_eq!(game.last_move, None);
    }

    #[test]
    fn capture_removes_jumped_piece() {
        let mut game = two_player();
        game.set_board_for_test(
            Board::with_pieces(&[
                (pos(3, 2), Side::A),
                (pos(2, 3), Side::B),
                (pos(0, 7), Side::B),
                (pos(7, 0), Side::A),
            ]),
            Side::A,
        );

        let captured = game.play(Move::new(pos(3, 2), pos(1, 4))).unwrap();

        assert_eq!(captured, Some(pos(2, 3)));
        assert_eq!(game.board().piece_at(pos(2, 3)), Cell::Empty);
        assert_eq!(game.board().piece_at(pos(1, 4)), Cell::Piece(Side::A));
        assert_eq!(game.to_game_state().captured, Some(pos(2, 3)));
        assert!(!game.is_game_over);
    }

    #[test]
    fn resuming_without_pieces_for_side_to_move_is_finished() {
        let board = Board::with_pieces(&[(pos(2, 1), Side::B)]);
        let mut game = GameInstance::with_position(
            GameConfig {
                mode: GameMode::Players,
                ..GameConfig::default()
            },
            Box::new(FirstLegalMoveSelector),
            board,
            Side::A,
        );

        assert!(game.is_game_over);
        assert_eq!(game.winner, Some(Side::B));
        assert_eq!(
            game.play(Move::new(pos(5, 0), pos(4, 1))),
            Err(MoveError::GameOver)
        );
    }

    #[test]
    fn resuming_blocked_side_to_move_is_finished() {
        let board = Board::with_pieces(&[(pos(7, 4), Side::B), (pos(4, 1), Side::A)]);
        let game = GameInstance::with_position(
            GameConfig::default(),
            Box::new(FirstLegalMoveSelector),
            board,
            Side::B,
        );

        assert!(game.is_game_over);
        assert_eq!(game.to_game_result().winner, Some(Side::A));
    }

    #[test]
    fn resuming_open_position_is_not_finished() {
        let board = Board::with_pieces(&[(pos(3, 2), Side::A), (pos(2, 3), Side::B)]);
        let game = GameInstance::with_position(
            GameConfig::default(),
            Box::new(FirstLegalMoveSelector),
            board,
            Side::A,
        );

        assert!(!game.is_game_over);
        assert_eq!(game.winner, None);
    }

    #[test]
    fn eliminating_last_piece_ends_game() {
        let mut game = two_player();
        game.set_board_for_test(
            Board::with_pieces(&[(pos(3, 2), Side::A), (pos(2, 3), Side::B)]),
            Side::A,
        );

        game.play(Move::new(pos(3, 2), pos(1, 4))).unwrap();
        let result = game.to_game_result();

        assert!(game.is_game_over);
        assert_eq!(result.winner, Some(Side::A));
        assert_eq!(result.b_count, 0);
        assert_eq!(
            game.play(Move::new(pos(1, 4), pos(0, 5))),
            Err(MoveError::GameOver)
        );
    }

    #[test]
    fn side_without_moves_loses() {
        let mut game = two_player();
        // B's only piece sits on row 7 and has nowhere forward to go.
        game.set_board_for_test(
            Board::with_pieces(&[(pos(2, 1), Side::A), (pos(7, 4), Side::B)]),
            Side::A,
        );

        game.play(Move::new(pos(2, 1), pos(1, 2))).unwrap();

        assert!(game.is_game_over);
        assert_eq!(game.winner, Some(Side::A));
    }

    #[test]
    fn computer_replies_on_its_turn_only() {
        let mut game = vs_computer();

        assert_eq!(game.do_ai_move(), Err(MoveError::NotYourTurn(Side::A)));
        game.play(Move::new(pos(5, 0), pos(4, 1))).unwrap();
        assert!(game.is_computer_turn());
        assert_eq!(
            game.play(Move::new(pos(2, 1), pos(3, 2))),
            Err(MoveError::NotYourTurn(Side::B))
        );

        let mv = game.do_ai_move().unwrap();

        assert_eq!(mv, Move::new(pos(2, 1), pos(3, 0)));
        assert_eq!(game.current_side(), Side::A);
        assert_eq!(game.board().piece_at(pos(3, 0)), Cell::Piece(Side::B));
    }

    #[test]
    fn computer_capture_goes_through_shared_apply() {
        let mut game = vs_computer();
        game.set_board_for_test(
            Board::with_pieces(&[
                (pos(2, 1), Side::B),
                (pos(3, 0), Side::A),
                (pos(3, 2), Side::A),
                (pos(6, 7), Side::B),
            ]),
            Side::B,
        );

        let mv = game.do_ai_move().unwrap();

        assert_eq!(mv, Move::new(pos(2, 1), pos(4, 3)));
        assert_eq!(game.captured, Some(pos(3, 2)));
        assert_eq!(game.board().count_pieces(Side::A), 1);
    }

    #[test]
    fn illegal_selection_is_rejected() {
        let config = GameConfig {
            computer_side: Side::A,
            ..GameConfig::default()
        };
        let mv = Move::new(pos(5, 0), pos(6, 1));
        let mut game = GameInstance::new(config, Box::new(FixedMoveSelector { mv }));
        let before = *game.board();

        assert_eq!(
            game.do_ai_move(),
            Err(MoveError::OccupiedDestination(pos(6, 1)))
        );
        assert_eq!(*game.board(), before);
        assert_eq!(game.current_side(), Side::A);
    }

    #[test]
    fn lenient_rules_allow_jump_over_empty_cell() {
        let config = GameConfig {
            mode: GameMode::Players,
            rules: RulesConfig {
                capture_policy: CapturePolicy::Lenient,
            },
            ..GameConfig::default()
        };
        let mut game = GameInstance::new(config, Box::new(FirstLegalMoveSelector));

        let captured = game.play(Move::new(pos(5, 2), pos(3, 4))).unwrap();

        assert_eq!(captured, None);
        assert_eq!(game.board().piece_at(pos(3, 4)), Cell::Piece(Side::A));
        assert_eq!(game.board().count_pieces(Side::A), 12);
        assert_eq!(game.current_side(), Side::B);
    }
}
