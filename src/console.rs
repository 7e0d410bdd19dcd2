//! Text front end: board printing and the prompt loop.
//!
//! Input and output are injected so the loop runs the same against a
//! terminal or an in-memory buffer.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::board::{BOARD_SIZE, Board};
use crate::config::{GameConfig, GameMode};
use crate::game::GameInstance;
use crate::notation::parse_move;
use crate::types::{GameResult, Position};

const FILES: &str = "  a b c d e f g h";

/// Renders the board with ranks 8..1 down the left and files a..h underneath.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for row in 0..BOARD_SIZE {
        out.push_str(&format!("{}|", BOARD_SIZE - row));
        for col in 0..BOARD_SIZE {
            let cell = board.piece_at(Position::new(row as i8, col as i8));
            out.push_str(&format!("{cell}|"));
        }
        out.push('\n');
    }
    out.push_str(FILES);
    out.push('\n');
    out
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Asks for `P` (two players) or `C` (against the computer) until one is given.
    /// Returns `None` at end of input.
    pub fn choose_mode(&mut self) -> io::Result<Option<GameMode>> {
        loop {
            writeln!(
                self.output,
                "Begin Game. Enter 'P' to play against another player; enter 'C' to play against computer."
            )?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().chars().next() {
                Some('P') => {
                    writeln!(self.output, "Start game against player.")?;
                    return Ok(Some(GameMode::Players));
                }
                Some('C') => {
                    writeln!(self.output, "Start game against computer.")?;
                    return Ok(Some(GameMode::Computer));
                }
                _ => writeln!(self.output, "Invalid choice. Please enter 'P' or 'C'.")?,
            }
        }
    }

    /// Runs one game with `config`, asking for the mode first when `ask_mode` is set.
    pub fn run(&mut self, mut config: GameConfig, ask_mode: bool) -> io::Result<Option<GameResult>> {
        if ask_mode {
            let Some(mode) = self.choose_mode()? else {
                return Ok(None);
            };
            config.mode = mode;
        }
        let mut game = GameInstance::new_with_default_selector(config);
        self.play(&mut game)
    }

    /// Drives `game` until it ends or input runs out.
    pub fn play(&mut self, game: &mut GameInstance) -> io::Result<Option<GameResult>> {
        write!(self.output, "{}", render_board(game.board()))?;

        while !game.is_game_over {
            if game.is_computer_turn() {
                match game.do_ai_move() {
                    Ok(mv) => {
                        writeln!(self.output)?;
                        writeln!(self.output, "Computer plays {mv}")?;
                        write!(self.output, "{}", render_board(game.board()))?;
                    }
                    Err(err) => {
                        warn!(%err, "computer could not move");
                        writeln!(self.output, "Computer cannot move: {err}")?;
                        return Ok(None);
                    }
                }
                continue;
            }

            writeln!(
                self.output,
                "You are Player {}. It is your turn.",
                game.current_side()
            )?;
            writeln!(
                self.output,
                "Choose a cell position of piece to be moved and the new position. e.g., 3a-4b"
            )?;
            let Some(line) = self.read_line()? else {
                debug!("input closed before game end");
                return Ok(None);
            };

            let mv = match parse_move(&line) {
                Ok(mv) => mv,
                Err(_) => {
                    writeln!(self.output, "Invalid move format")?;
                    writeln!(self.output)?;
                    continue;
                }
            };
            match game.play(mv) {
                Ok(_) => {
                    writeln!(self.output)?;
                    write!(self.output, "{}", render_board(game.board()))?;
                }
                Err(err) => writeln!(self.output, "Invalid move: {err}")?,
            }
        }

        let result = game.to_game_result();
        if let Some(winner) = result.winner {
            writeln!(self.output, "Player {winner} Won the Game")?;
        }
        Ok(Some(result))
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::ai::FirstLegalMoveSelector;
    use crate::types::Side;

    fn run_game(input: &str, mut game: GameInstance) -> (Option<GameResult>, String) {
        let mut console = Console::new(Cursor::new(input.to_string()), Vec::new());
        let result = console.play(&mut game).unwrap();
        let output = String::from_utf8(console.into_output()).unwrap();
        (result, output)
    }

    fn config(mode: GameMode) -> GameConfig {
        GameConfig {
            mode,
            ..GameConfig::default()
        }
    }

    #[test]
    fn initial_board_renders_like_text_ui() {
        let expected = "\
8|_|o|_|o|_|o|_|o|
7|o|_|o|_|o|_|o|_|
6|_|o|_|o|_|o|_|o|
5|_|_|_|_|_|_|_|_|
4|_|_|_|_|_|_|_|_|
3|x|_|x|_|x|_|x|_|
2|_|x|_|x|_|x|_|x|
1|x|_|x|_|x|_|x|_|
  a b c d e f g h
";
        assert_eq!(render_board(&Board::new()), expected);
    }

    #[test]
    fn valid_move_is_applied_and_turn_passes() {
        let game = GameInstance::new(config(GameMode::Players), Box::new(FirstLegalMoveSelector));

        let (result, output) = run_game("3a-4b\n", game);

        assert_eq!(result, None);
        assert!(output.contains("4|_|x|_|_|_|_|_|_|"));
        assert!(output.contains("3|_|_|x|_|x|_|x|_|"));
        assert!(output.contains("You are Player x. It is your turn."));
        assert!(output.contains("You are Player o. It is your turn."));
    }

    #[test]
    fn bad_input_is_reported_and_turn_kept() {
        let game = GameInstance::new(config(GameMode::Players), Box::new(FirstLegalMoveSelector));

        let (_, output) = run_game("hello\n3a-2b\n", game);

        assert!(output.contains("Invalid move format"));
        assert!(output.contains("Invalid move: destination 2b is occupied"));
        assert!(!output.contains("You are Player o."));
    }

    #[test]
    fn computer_answers_human_move() {
        let game = GameInstance::new(config(GameMode::Computer), Box::new(FirstLegalMoveSelector));

        let (_, output) = run_game("3a-4b\n", game);

        assert!(output.contains("Computer plays 6b-5a"));
        assert!(output.contains("5|o|_|_|_|_|_|_|_|"));
        assert_eq!(output.matches("You are Player x.").count(), 2);
    }

    #[test]
    fn capturing_last_piece_announces_winner() {
        let board = Board::with_pieces(&[
            (Position::new(3, 2), Side::A),
            (Position::new(2, 3), Side::B),
        ]);
        let game = GameInstance::with_position(
            config(GameMode::Players),
            Box::new(FirstLegalMoveSelector),
            board,
            Side::A,
        );

        let (result, output) = run_game("5c-7e\n", game);

        let result = result.unwrap();
        assert_eq!(result.winner, Some(Side::A));
        assert_eq!(result.b_count, 0);
        assert!(output.ends_with("Player x Won the Game\n"));
    }

    #[test]
    fn resumed_finished_game_announces_winner_without_prompting() {
        let board = Board::with_pieces(&[(Position::new(2, 1), Side::B)]);
        let game = GameInstance::with_position(
            config(GameMode::Players),
            Box::new(FirstLegalMoveSelector),
            board,
            Side::A,
        );

        let (result, output) = run_game("3a-4b\n", game);

        assert_eq!(result.map(|r| r.winner), Some(Some(Side::B)));
        assert!(!output.contains("It is your turn."));
        assert!(output.ends_with("Player o Won the Game\n"));
    }

    #[test]
    fn mode_prompt_repeats_until_valid_choice() {
        let mut console = Console::new(Cursor::new("x\n\nC\n"), Vec::new());

        let mode = console.choose_mode().unwrap();
        let output = String::from_utf8(console.into_output()).unwrap();

        assert_eq!(mode, Some(GameMode::Computer));
        assert_eq!(output.matches("Invalid choice.").count(), 2);
        assert!(output.contains("Start game against computer."));
    }

    #[test]
    fn run_stops_cleanly_at_end_of_input() {
        let mut console = Console::new(Cursor::new("P\n"), Vec::new());

        let result = console.run(GameConfig::default(), true).unwrap();
        let output = String::from_utf8(console.into_output()).unwrap();

        assert_eq!(result, None);
        assert!(output.contains("Start game against player."));
        assert!(output.contains("You are Player x. It is your turn."));
    }
}
