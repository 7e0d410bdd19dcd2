use serde::{Deserialize, Serialize};

use crate::types::Side;

/// How capture-shaped moves are judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapturePolicy {
    /// A two-square jump needs an opposing piece on the jumped cell.
    #[default]
    Strict,
    /// Any two-square diagonal jump that passes the bounds, occupancy and
    /// direction checks is accepted; the jumped piece is only removed when it
    /// belongs to the opponent.
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub capture_policy: CapturePolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Two humans share the board.
    Players,
    #[default]
    Computer,
}

/// Settings for one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    /// Side played by the computer in [`GameMode::Computer`].
    pub computer_side: Side,
    pub rules: RulesConfig,
    /// Seed for the computer's move choice; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            computer_side: Side::B,
            rules: RulesConfig::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn is_computer(&self, side: Side) -> bool {
        self.mode == GameMode::Computer && self.computer_side == side
    }
}
