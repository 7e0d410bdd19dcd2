use crate::types::Side;

/// Tracks which side moves next. Side A opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnCoordinator {
    current: Side,
}

impl TurnCoordinator {
    pub fn new() -> Self {
        Self::starting_with(Side::A)
    }

    pub fn starting_with(side: Side) -> Self {
        Self { current: side }
    }

    /// Call exactly once per applied move.
    pub fn switch_turn(&mut self) {
        self.current = self.current.opponent();
    }

    pub fn current_side(&self) -> Side {
        self.current
    }
}

impl Default for TurnCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
