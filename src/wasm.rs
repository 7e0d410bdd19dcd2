//! JavaScript bindings for a browser front end.

use std::fmt::Display;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::game::GameInstance;
use crate::notation::parse_move;
use crate::types::{Move, Position};

#[wasm_bindgen]
pub struct WasmGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl WasmGame {
    /// `config` is a `GameConfig`-shaped object; `undefined` uses the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsValue> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            inner: GameInstance::new_with_default_selector(config),
        })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_game_state())
    }

    pub fn result(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_game_result())
    }

    /// Plays a move written like `3a-4b` and returns the new state.
    pub fn play(&mut self, notation: &str) -> Result<JsValue, JsValue> {
        let mv = parse_move(notation).map_err(js_err)?;
        self.play_move(mv)
    }

    pub fn play_coords(
        &mut self,
        from_row: i8,
        from_col: i8,
        to_row: i8,
        to_col: i8,
    ) -> Result<JsValue, JsValue> {
        self.play_move(Move::new(
            Position::new(from_row, from_col),
            Position::new(to_row, to_col),
        ))
    }

    pub fn ai_move(&mut self) -> Result<JsValue, JsValue> {
        self.inner.do_ai_move().map_err(js_err)?;
        self.state()
    }

    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.legal_moves())
    }

    pub fn is_computer_turn(&self) -> bool {
        self.inner.is_computer_turn()
    }
}

impl WasmGame {
    fn play_move(&mut self, mv: Move) -> Result<JsValue, JsValue> {
        self.inner.play(mv).map_err(js_err)?;
        self.state()
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}

fn js_err(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
