use wasm_bindgen::prelude::*;

use crate::ai::heuristic::Heuristic;
use crate::game::GameInstance;

/// JS-facing wrapper around one game. The caller owns the instance; no
/// process-wide game state exists on the Rust side.
#[wasm_bindgen]
pub struct Game {
    inner: GameInstance,
}

#[wasm_bindgen]
impl Game {
    /// `depth` bounds the minimax search; `heuristic` selects the
    /// evaluator (1=tile count, 2=positional, 3=mobility).
    #[wasm_bindgen(constructor)]
    pub fn new(depth: u8, heuristic: u8) -> Game {
        Game {
            inner: GameInstance::new(depth, Heuristic::from_tag(heuristic)),
        }
    }

    /// Commits the human (dark) move and returns the new state.
    pub fn place(&mut self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        self.inner.place(row, col).map_err(js_err)?;
        self.state()
    }

    /// Forfeits the current side's turn. The caller decides when a pass
    /// is forced via `hasLegalMoves`.
    pub fn pass(&mut self) -> Result<JsValue, JsValue> {
        self.inner.pass();
        self.state()
    }

    /// Lets the engine (light) take its turn and returns the new state.
    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<JsValue, JsValue> {
        self.inner.do_ai_move().map_err(js_err)?;
        self.state()
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.get_legal_moves())
    }

    #[wasm_bindgen(js_name = hasLegalMoves)]
    pub fn has_legal_moves(&self) -> bool {
        self.inner.has_legal_moves_for_current()
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_game_state())
    }

    pub fn result(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_game_result())
    }

    /// Scores for the AI's candidate placements, for debug overlays.
    #[wasm_bindgen(js_name = candidateValues)]
    pub fn candidate_values(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.candidate_values())
    }

    #[wasm_bindgen(js_name = endGame)]
    pub fn end_game(&mut self) {
        self.inner.end_game();
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}
