use crate::types::{Cell, Position, Side};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const STARTING_ROWS: usize = 3;

/// Checkers board: an 8x8 grid of cells, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; NUM_SQUARES],
}

impl Board {
    /// Creates the initial board:
    /// side B on the dark squares of rows 0-2, side A on the dark squares of rows 5-7.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for row in 0..BOARD_SIZE {
            let side = if row < STARTING_ROWS {
                Side::B
            } else if row >= BOARD_SIZE - STARTING_ROWS {
                Side::A
            } else {
                continue;
            };
            for col in 0..BOARD_SIZE {
                if is_dark_square(row, col) {
                    board.cells[row * BOARD_SIZE + col] = Cell::Piece(side);
                }
            }
        }
        board
    }

    /// Board with no pieces on it.
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; NUM_SQUARES],
        }
    }

    /// Empty board with the given pieces placed.
    pub fn with_pieces(pieces: &[(Position, Side)]) -> Self {
        let mut board = Self::empty();
        for &(pos, side) in pieces {
            board.set_piece_at(pos, Cell::Piece(side));
        }
        board
    }

    /// Caller contract: `pos` is on the board.
    pub fn piece_at(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// Caller contract: `pos` is on the board.
    pub fn set_piece_at(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.index()] = cell;
    }

    pub fn count_pieces(&self, side: Side) -> u8 {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Piece(side))
            .count() as u8
    }

    /// Iterates `(position, cell)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &cell)| (index_to_position(idx), cell))
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=side A, 2=side B.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut out = [0u8; NUM_SQUARES];
        for (slot, cell) in out.iter_mut().zip(self.cells.iter()) {
            *slot = cell.to_u8();
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn is_dark_square(row: usize, col: usize) -> bool {
    (row + col) % 2 == 1
}

fn index_to_position(idx: usize) -> Position {
    Position::new((idx / BOARD_SIZE) as i8, (idx % BOARD_SIZE) as i8)
}
