use crate::ai::heuristic::Heuristic;
use crate::ai::search::SearchEngine;
use crate::board::{BOARD_SIZE, Board, unique_placements};
use crate::types::{CandidateValue, GameResult, GameState, Player, Position};

/// Seam for choosing the AI's placement, so tests can inject fixed or
/// trivial selectors in place of the full search engine.
pub trait MoveSelector {
    fn select_move(&self, board: &Board) -> Option<Position>;

    /// Scores for each candidate placement, for debug overlays.
    fn candidate_values(&self, _board: &Board) -> Vec<CandidateValue> {
        Vec::new()
    }
}

impl MoveSelector for SearchEngine {
    fn select_move(&self, board: &Board) -> Option<Position> {
        self.best_move(board)
    }

    fn candidate_values(&self, board: &Board) -> Vec<CandidateValue> {
        SearchEngine::candidate_values(self, board)
    }
}

/// Turn-control facade handed to the UI collaborator. The human plays
/// Dark, the selector answers as Light; pass detection and end-of-game
/// polling are driven by the caller.
pub struct GameInstance {
    board: Board,
    pub current_player: Player,
    pub is_game_over: bool,
    pub is_pass: bool,
    pub flipped: Vec<u8>,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    /// Builds a game against a minimax opponent searching to `depth` with
    /// the given evaluation strategy.
    pub fn new(depth: u8, heuristic: Heuristic) -> Self {
        Self::with_selector(Box::new(SearchEngine::new(Player::Light, depth, heuristic)))
    }

    pub fn with_selector(selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::Dark,
            is_game_over: false,
            is_pass: false,
            flipped: Vec::new(),
            selector,
        }
    }

    /// Read-only board snapshot for rendering.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn place(&mut self, row: u8, col: u8) -> Result<(), String> {
        if self.is_game_over {
            return Err("game is already over".to_string());
        }
        if self.current_player != Player::Dark {
            return Err("it is not the player's turn".to_string());
        }
        if row >= BOARD_SIZE as u8 || col >= BOARD_SIZE as u8 {
            return Err("row/col out of range".to_string());
        }

        self.apply_move(Position::new(row, col), Player::Dark)
    }

    pub fn has_legal_moves_for_current(&self) -> bool {
        self.board.has_legal_move(self.current_player)
    }

    pub fn pass(&mut self) {
        self.is_pass = true;
        self.flipped.clear();
        self.current_player = self.current_player.opponent();
    }

    pub fn end_game(&mut self) {
        self.is_game_over = true;
    }

    pub fn do_ai_move(&mut self) -> Result<(), String> {
        if self.is_game_over {
            return Err("game is already over".to_string());
        }
        if self.current_player != Player::Light {
            return Err("it is not AI's turn".to_string());
        }

        let legal = self.board.legal_moves(Player::Light);
        if legal.is_empty() {
            return Err("AI has no legal moves".to_string());
        }

        let selected = self
            .selector
            .select_move(&self.board)
            .ok_or_else(|| "AI could not select a move".to_string())?;

        if !legal
            .iter()
            .any(|descriptor| descriptor.placement == selected)
        {
            return Err("AI selected an illegal move".to_string());
        }

        self.apply_move(selected, Player::Light)
    }

    pub fn get_legal_moves(&self) -> Vec<Position> {
        unique_placements(&self.board.legal_moves(self.current_player))
    }

    /// Per-cell scores for the AI's candidate placements. Diagnostic
    /// overlay data; has no effect on play.
    pub fn candidate_values(&self) -> Vec<CandidateValue> {
        self.selector.candidate_values(&self.board)
    }

    pub fn to_game_state(&self) -> GameState {
        let (dark_count, light_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player.code(),
            dark_count,
            light_count,
            is_game_over: self.is_game_over,
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (dark_count, light_count) = self.board.count();
        GameResult {
            winner: if dark_count > light_count {
                Player::Dark.code()
            } else if light_count > dark_count {
                Player::Light.code()
            } else {
                0
            },
            dark_count,
            light_count,
        }
    }

    fn apply_move(&mut self, placement: Position, side: Player) -> Result<(), String> {
        let moves = self.board.legal_moves(side);
        let captures: Vec<Position> = moves
            .iter()
            .filter(|descriptor| descriptor.placement == placement)
            .flat_map(|descriptor| descriptor.captures.iter().copied())
            .collect();
        if captures.is_empty() {
            return Err("illegal move".to_string());
        }

        self.board = self.board.apply(side, placement, &moves);
        self.is_pass = false;
        self.flipped = captures
            .iter()
            .map(|capture| capture.row * BOARD_SIZE as u8 + capture.col)
            .collect();
        self.current_player = side.opponent();

        if self.board.empty_count() == 0 {
            self.end_game();
        }

        Ok(())
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Player) {
        self.board = board;
        self.current_player = current_player;
        self.is_game_over = false;
        self.is_pass = false;
        self.flipped.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    struct FixedMoveSelector {
        placement: Position,
    }

    impl MoveSelector for FixedMoveSelector {
        fn select_move(&self, _board: &Board) -> Option<Position> {
            Some(self.placement)
        }
    }

    fn almost_full_light_board() -> Board {
        // Everything light except an empty corner and one dark stone
        // beside it.
        let mut cells = [[Cell::Light; 8]; 8];
        cells[0][0] = Cell::Empty;
        cells[0][1] = Cell::Dark;
        Board::from_cells(cells)
    }

    #[test]
    fn initial_state_is_correct() {
        let game = GameInstance::new(3, Heuristic::Positional);
        let state = game.to_game_state();

        assert_eq!(state.current_player, Player::Dark.code());
        assert_eq!(state.dark_count, 2);
        assert_eq!(state.light_count, 2);
        assert!(!state.is_game_over);
        assert!(!state.is_pass);
        assert!(state.flipped.is_empty());
        assert_eq!(game.get_legal_moves().len(), 4);
    }

    #[test]
    fn t02_illegal_player_move_returns_error() {
        let mut game = GameInstance::new(1, Heuristic::TileCount);
        let err = game.place(0, 0).unwrap_err();

        assert!(err.contains("illegal move"));
    }

    #[test]
    fn out_of_range_player_move_returns_error() {
        let mut game = GameInstance::new(1, Heuristic::TileCount);
        let err = game.place(8, 0).unwrap_err();

        assert!(err.contains("out of range"));
    }

    #[test]
    fn player_move_flips_and_hands_turn_to_ai() {
        let mut game = GameInstance::new(1, Heuristic::TileCount);

        game.place(2, 3).unwrap();
        let state = game.to_game_state();

        assert_eq!(state.current_player, Player::Light.code());
        assert_eq!(state.dark_count, 4);
        assert_eq!(state.light_count, 1);
        assert_eq!(state.flipped, vec![3 * 8 + 3]);
        assert!(!state.is_pass);
    }

    #[test]
    fn t03_pass_occurrence_switches_turn() {
        let mut game = GameInstance::new(1, Heuristic::TileCount);
        game.set_board_for_test(almost_full_light_board(), Player::Dark);

        assert!(!game.has_legal_moves_for_current());
        game.pass();

        assert_eq!(game.current_player, Player::Light);
        assert!(game.is_pass);
        assert!(game.flipped.is_empty());
        assert!(!game.is_game_over);
        assert!(game.has_legal_moves_for_current());
    }

    #[test]
    fn t04_both_passes_end_game() {
        let mut game = GameInstance::new(1, Heuristic::TileCount);
        let mut cells = [[Cell::Dark; 8]; 8];
        cells[0][0] = Cell::Empty;
        game.set_board_for_test(Board::from_cells(cells), Player::Dark);

        assert!(!game.has_legal_moves_for_current());
        game.pass();
        assert_eq!(game.current_player, Player::Light);
        assert!(!game.has_legal_moves_for_current());

        game.end_game();
        assert!(game.is_game_over);
    }

    #[test]
    fn t05_full_board_after_move_sets_game_over() {
        let mut game = GameInstance::with_selector(Box::new(FixedMoveSelector {
            placement: Position::new(0, 0),
        }));
        game.set_board_for_test(almost_full_light_board(), Player::Light);

        game.do_ai_move().unwrap();
        let state = game.to_game_state();

        assert!(state.is_game_over);
        assert_eq!(state.current_player, Player::Dark.code());
        assert_eq!(state.dark_count, 0);
        assert_eq!(state.light_count, 64);
        assert_eq!(state.flipped, vec![1]);

        let result = game.to_game_result();
        assert_eq!(result.winner, Player::Light.code());
        assert_eq!(result.light_count, 64);
    }

    #[test]
    fn ai_turn_plays_a_legal_move_with_each_heuristic() {
        for heuristic in [
            Heuristic::TileCount,
            Heuristic::Positional,
            Heuristic::Mobility,
        ] {
            let mut game = GameInstance::new(2, heuristic);
            game.place(2, 3).unwrap();

            let legal_before = game.get_legal_moves();
            assert!(!legal_before.is_empty());
            game.do_ai_move().unwrap();

            let state = game.to_game_state();
            assert_eq!(state.current_player, Player::Dark.code());
            assert!(!state.flipped.is_empty());
            assert_eq!(
                state.dark_count + state.light_count,
                6,
                "two moves in, six stones on the board"
            );
        }
    }

    #[test]
    fn ai_selecting_illegal_move_is_rejected() {
        let mut game = GameInstance::with_selector(Box::new(FixedMoveSelector {
            placement: Position::new(7, 7),
        }));
        game.place(2, 3).unwrap();

        let err = game.do_ai_move().unwrap_err();
        assert!(err.contains("illegal"));
    }

    #[test]
    fn ai_without_legal_moves_reports_error() {
        let mut game = GameInstance::new(1, Heuristic::TileCount);
        // Mirror of the pass fixture: light is the stuck side.
        let mut cells = [[Cell::Dark; 8]; 8];
        cells[7][7] = Cell::Empty;
        cells[7][6] = Cell::Light;
        game.set_board_for_test(Board::from_cells(cells), Player::Light);

        let err = game.do_ai_move().unwrap_err();
        assert!(err.contains("no legal moves"));
    }

    #[test]
    fn candidate_values_surface_through_the_facade() {
        let mut game = GameInstance::new(1, Heuristic::TileCount);
        game.place(2, 3).unwrap();

        let candidates = game.candidate_values();
        let legal = game.get_legal_moves();
        assert_eq!(
            candidates.iter().map(|c| c.position).collect::<Vec<_>>(),
            legal
        );
    }
}
