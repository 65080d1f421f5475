use crate::board::Board;
use crate::types::Player;

/// Positional weights, corner-anchored: corners dominate, the squares
/// touching a corner are poison, edges and center sit in between. Known
/// weakness: the table never adapts after a corner is secured.
const POSITION_WEIGHTS: [[i32; 8]; 8] = [
    [100000, -10000, 75, 25, 25, 75, -10000, 100000],
    [-10000, -10000, 75, 50, 50, 75, -10000, -10000],
    [75, 75, 75, 65, 65, 75, 75, 75],
    [25, 50, 65, 25, 25, 65, 50, 25],
    [25, 50, 65, 25, 25, 65, 50, 25],
    [75, 75, 75, 65, 65, 75, 75, 75],
    [-10000, -10000, 75, 50, 50, 75, -10000, -10000],
    [100000, -10000, 75, 25, 25, 75, -10000, 100000],
];

/// Static evaluation strategy, chosen once per engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// Counts the side's stones. Minimal signal, intentionally weak.
    TileCount,
    /// Sums fixed positional weights over the side's stones.
    Positional,
    /// Negated count of the opponent's capture opportunities.
    Mobility,
}

impl Heuristic {
    /// Maps a difficulty tag to a strategy: 1=tile count, 2=positional,
    /// 3=mobility. Unknown tags fall back to tile count.
    pub fn from_tag(tag: u8) -> Heuristic {
        match tag {
            2 => Heuristic::Positional,
            3 => Heuristic::Mobility,
            _ => Heuristic::TileCount,
        }
    }

    /// Scores `board` from `side`'s perspective. Scores are never
    /// sign-flipped per ply; `side` is always the engine's home side.
    pub fn evaluate(self, board: &Board, side: Player) -> i32 {
        match self {
            Heuristic::TileCount => tile_count(board, side),
            Heuristic::Positional => positional(board, side),
            Heuristic::Mobility => mobility_denial(board, side),
        }
    }
}

fn tile_count(board: &Board, side: Player) -> i32 {
    let (dark_count, light_count) = board.count();
    match side {
        Player::Dark => dark_count as i32,
        Player::Light => light_count as i32,
    }
}

fn positional(board: &Board, side: Player) -> i32 {
    let own = side.cell();
    let mut score = 0;
    for row in 0..8 {
        for col in 0..8 {
            if board.get(row, col) == own {
                score += POSITION_WEIGHTS[row][col];
            }
        }
    }
    score
}

/// Counts every cell the opponent could capture with their best-case
/// turn inventory (all descriptors, all directions) and negates it, so
/// boards that starve the opponent of captures score highest.
fn mobility_denial(board: &Board, side: Player) -> i32 {
    let opponent_moves = board.legal_moves(side.opponent());
    let capturable: usize = opponent_moves
        .iter()
        .map(|descriptor| descriptor.captures.len())
        .sum();
    -(capturable as i32)
}
