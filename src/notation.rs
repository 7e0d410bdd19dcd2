//! Human move notation: `3a-4b`.
//!
//! The digit is the rank as printed beside the board (8 at the top, row 0),
//! the letter is the file (`a` is column 0).

use std::fmt;
use std::str::FromStr;

use crate::board::BOARD_SIZE;
use crate::error::NotationError;
use crate::types::{Move, Position};

pub fn parse_square(text: &str) -> Result<Position, NotationError> {
    let bytes = text.as_bytes();
    let [rank, file] = bytes else {
        return Err(NotationError::Square(text.to_string()));
    };
    if !(b'1'..=b'8').contains(rank) || !(b'a'..=b'h').contains(file) {
        return Err(NotationError::Square(text.to_string()));
    }

    let row = BOARD_SIZE as i8 - (rank - b'0') as i8;
    let col = (file - b'a') as i8;
    Ok(Position::new(row, col))
}

pub fn parse_move(text: &str) -> Result<Move, NotationError> {
    let text = text.trim();
    let (from, to) = text
        .split_once('-')
        .ok_or_else(|| NotationError::Format(text.to_string()))?;
    let from = parse_square(from).map_err(|_| NotationError::Format(text.to_string()))?;
    let to = parse_square(to).map_err(|_| NotationError::Format(text.to_string()))?;
    Ok(Move::new(from, to))
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_move(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_on_board() {
            return write!(f, "({}, {})", self.row, self.col);
        }
        let rank = BOARD_SIZE as i8 - self.row;
        let file = (b'a' + self.col as u8) as char;
        write!(f, "{rank}{file}")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}
