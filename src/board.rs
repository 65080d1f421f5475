use std::fmt;

use crate::types::{Cell, Player, Position};

pub const BOARD_SIZE: usize = 8;
const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// One direction's worth of a legal placement: the square where the new
/// stone goes plus every opponent stone that direction captures.
///
/// Several descriptors may share a placement (one per capturing direction);
/// they must all be applied together to realize the full capture set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveDescriptor {
    pub placement: Position,
    /// Never empty: a direction with no captures is not a legal move.
    pub captures: Vec<Position>,
}

/// Othello board state: an 8x8 grid of cells with value semantics.
///
/// Boards are never mutated in place; `apply` returns a fresh copy so
/// sibling search branches keep seeing the pre-move state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the initial board:
    /// (3,3)=light, (3,4)=dark, (4,3)=dark, (4,4)=light.
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        cells[3][3] = Cell::Light;
        cells[4][4] = Cell::Light;
        cells[3][4] = Cell::Dark;
        cells[4][3] = Cell::Dark;
        Self { cells }
    }

    pub fn from_cells(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Read-only cell accessor. Out-of-range coordinates are a programmer
    /// error and panic.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Enumerates every legal placement for `side` together with its
    /// capture set, one descriptor per capturing direction.
    ///
    /// Cells occupied by the opponent are scanned row-major; for each, all
    /// eight compass directions are checked independently. For an anchor
    /// `a` and direction `d` the placement square is `a + d` (must be
    /// empty) and the capture run walks `a, a - d, a - 2d, ...` through
    /// opponent stones until one of `side`'s stones terminates it. Hitting
    /// an empty square or the board edge invalidates the direction.
    pub fn legal_moves(&self, side: Player) -> Vec<MoveDescriptor> {
        let opponent_cell = side.opponent().cell();
        let mut moves = Vec::new();

        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.cells[row][col] != opponent_cell {
                    continue;
                }
                for (dr, dc) in DIRECTIONS {
                    if let Some(descriptor) =
                        self.scan_direction(row as i32, col as i32, dr, dc, side)
                    {
                        moves.push(descriptor);
                    }
                }
            }
        }

        moves
    }

    /// Whether `side` has any legal placement at all. An empty answer is a
    /// forced pass for that side, not an error.
    pub fn has_legal_move(&self, side: Player) -> bool {
        !self.legal_moves(side).is_empty()
    }

    /// Places `side`'s stone at `placement` and flips every capture of
    /// every descriptor in `moves` whose placement matches.
    ///
    /// Pure copy-on-write: the receiver is left untouched and the same
    /// inputs always produce the same board. Caller contract: `placement`
    /// must come from `legal_moves`; a placement with no matching
    /// descriptor places a stone without flipping anything.
    pub fn apply(&self, side: Player, placement: Position, moves: &[MoveDescriptor]) -> Board {
        let mut next = *self;
        for descriptor in moves {
            if descriptor.placement != placement {
                continue;
            }
            for capture in &descriptor.captures {
                next.cells[capture.row as usize][capture.col as usize] = side.cell();
            }
        }
        next.cells[placement.row as usize][placement.col as usize] = side.cell();
        next
    }

    /// Returns `(dark_count, light_count)`.
    pub fn count(&self) -> (u8, u8) {
        let mut dark = 0;
        let mut light = 0;
        for row in &self.cells {
            for cell in row {
                match cell {
                    Cell::Dark => dark += 1,
                    Cell::Light => light += 1,
                    Cell::Empty => {}
                }
            }
        }
        (dark, light)
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let (dark_count, light_count) = self.count();
        NUM_SQUARES as u8 - dark_count - light_count
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=dark, 2=light.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            *cell = self.cells[pos / BOARD_SIZE][pos % BOARD_SIZE].code();
        }
        board
    }

    fn scan_direction(
        &self,
        row: i32,
        col: i32,
        dr: i32,
        dc: i32,
        side: Player,
    ) -> Option<MoveDescriptor> {
        let placement_row = row + dr;
        let placement_col = col + dc;
        if !in_bounds(placement_row, placement_col) {
            return None;
        }
        if self.cells[placement_row as usize][placement_col as usize] != Cell::Empty {
            return None;
        }

        let opponent_cell = side.opponent().cell();
        let mut captures = vec![Position::new(row as u8, col as u8)];
        let mut r = row - dr;
        let mut c = col - dc;
        while in_bounds(r, c) {
            let cell = self.cells[r as usize][c as usize];
            if cell == opponent_cell {
                captures.push(Position::new(r as u8, c as u8));
            } else if cell == side.cell() {
                return Some(MoveDescriptor {
                    placement: Position::new(placement_row as u8, placement_col as u8),
                    captures,
                });
            } else {
                return None;
            }
            r -= dr;
            c -= dc;
        }
        None
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Dark => 'D',
                    Cell::Light => 'L',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Collapses duplicate placements across descriptors, keeping the first
/// occurrence order of `moves`.
pub fn unique_placements(moves: &[MoveDescriptor]) -> Vec<Position> {
    let mut placements: Vec<Position> = Vec::new();
    for descriptor in moves {
        if !placements.contains(&descriptor.placement) {
            placements.push(descriptor.placement);
        }
    }
    placements
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
