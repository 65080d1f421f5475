use crate::ai::heuristic::Heuristic;
use crate::board::{Board, unique_placements};
use crate::types::{CandidateValue, Player, Position};

/// Depth-limited minimax engine with an asymmetric single-bound pruning
/// rule: each node maintains only the bound belonging to its own role
/// (alpha at maximizing nodes, beta at minimizing nodes), seeded from the
/// first child or a same-role ancestor, and hands the opposite bound down
/// untouched. Deliberately not textbook two-bound alpha-beta; the shape
/// of the pruned tree is part of the engine's observable behavior.
///
/// Side, depth limit and heuristic are fixed at construction and never
/// change during a game.
pub struct SearchEngine {
    side: Player,
    depth_limit: u8,
    heuristic: Heuristic,
}

impl SearchEngine {
    pub fn new(side: Player, depth_limit: u8, heuristic: Heuristic) -> Self {
        Self {
            side,
            depth_limit,
            heuristic,
        }
    }

    pub fn side(&self) -> Player {
        self.side
    }

    /// Picks the placement whose subtree scores highest for the engine's
    /// side, breaking ties toward the first candidate in enumeration
    /// order. Returns `None` when the side has no legal placement; the
    /// caller must treat that as a forced pass, not an error.
    pub fn best_move(&self, board: &Board) -> Option<Position> {
        let moves = board.legal_moves(self.side);
        let mut best: Option<(Position, i32)> = None;

        for placement in unique_placements(&moves) {
            let child = board.apply(self.side, placement, &moves);
            let value = self.search_value(
                false,
                best.map(|(_, value)| value),
                None,
                1,
                &child,
                self.side.opponent(),
            );
            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((placement, value));
            }
        }

        best.map(|(placement, _)| placement)
    }

    /// Scores every first-ply candidate placement without the root bound
    /// seeding, for debug overlays. Diagnostic only; never consulted by
    /// `best_move`.
    pub fn candidate_values(&self, board: &Board) -> Vec<CandidateValue> {
        let moves = board.legal_moves(self.side);
        unique_placements(&moves)
            .into_iter()
            .map(|placement| {
                let child = board.apply(self.side, placement, &moves);
                let value =
                    self.search_value(false, None, None, 1, &child, self.side.opponent());
                CandidateValue {
                    position: placement,
                    value,
                }
            })
            .collect()
    }

    fn search_value(
        &self,
        maximizing: bool,
        alpha: Option<i32>,
        beta: Option<i32>,
        ply: u8,
        board: &Board,
        to_move: Player,
    ) -> i32 {
        let moves = board.legal_moves(to_move);
        // A side with no legal move is a leaf regardless of remaining
        // depth budget.
        if moves.is_empty() {
            return self.heuristic.evaluate(board, self.side);
        }

        let children: Vec<Board> = unique_placements(&moves)
            .into_iter()
            .map(|placement| board.apply(to_move, placement, &moves))
            .collect();

        if ply >= self.depth_limit {
            // One ply beyond the nominal limit: fold the static score of
            // the immediate children instead of scoring this board.
            let scores = children
                .iter()
                .map(|child| self.heuristic.evaluate(child, self.side));
            return if maximizing {
                scores.fold(i32::MIN, i32::max)
            } else {
                scores.fold(i32::MAX, i32::min)
            };
        }

        let mut alpha = alpha;
        let mut beta = beta;
        let mut node_value: Option<i32> = None;

        for child in &children {
            let value =
                self.search_value(!maximizing, alpha, beta, ply + 1, child, to_move.opponent());
            if maximizing {
                // The parent minimizer cannot be forced below the bound,
                // so a child dipping under it ends this node.
                if let Some(bound) = alpha
                    && value < bound
                {
                    return bound;
                }
                if node_value.is_none_or(|best| value > best) {
                    node_value = Some(value);
                    alpha = Some(value);
                }
            } else {
                if let Some(bound) = beta
                    && value > bound
                {
                    return bound;
                }
                if node_value.is_none_or(|best| value < best) {
                    node_value = Some(value);
                    beta = Some(value);
                }
            }
        }

        match node_value {
            Some(value) => value,
            None => unreachable!("node with children scored no child"),
        }
    }
}
