use serde::Serialize;

/// A side in the game. Dark moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    Dark,
    Light,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Dark => Player::Light,
            Player::Light => Player::Dark,
        }
    }

    /// The cell state occupied by this side's stones.
    pub fn cell(self) -> Cell {
        match self {
            Player::Dark => Cell::Dark,
            Player::Light => Cell::Light,
        }
    }

    /// Wire code used in serialized state: 1=dark, 2=light.
    pub fn code(self) -> u8 {
        match self {
            Player::Dark => 1,
            Player::Light => 2,
        }
    }
}

/// Contents of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Dark,
    Light,
}

impl Cell {
    /// Wire code used in serialized boards: 0=empty, 1=dark, 2=light.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Dark => 1,
            Cell::Light => 2,
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board: Vec<u8>,
    pub current_player: u8,
    pub dark_count: u8,
    pub light_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Contract:
    /// - Normal move: list of flipped cell indices (0..=63).
    /// - Pass: must be an empty list.
    pub flipped: Vec<u8>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: u8,
    pub dark_count: u8,
    pub light_count: u8,
}

/// Score a first-ply candidate placement would produce, for debug overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CandidateValue {
    pub position: Position,
    pub value: i32,
}
