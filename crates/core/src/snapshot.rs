use serde::{Deserialize, Serialize};

use crate::catalog::Piece;
use crate::grid::Grid;
use crate::types::PIECES_PER_ROUND;

/// Everything an outer application persists to resume a session
///
/// Plain data: the engine never stores or loads it itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub grid: Grid,
    /// Round slots; `None` once a piece has been used or moved to the holding slot.
    pub pieces: [Option<Piece>; PIECES_PER_ROUND],
    /// Rotate-holding slot.
    pub hold: Option<Piece>,
    pub score: u32,
    pub combo: u32,
    pub completed_rounds: u32,
    pub round_had_clear: bool,
    pub game_over: bool,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over
    }

    /// Bar pieces still to place this round
    pub fn remaining_pieces(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_some()).count()
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            grid: Grid::new(),
            pieces: [None, None, None],
            hold: None,
            score: 0,
            combo: 0,
            completed_rounds: 0,
            round_had_clear: false,
            game_over: false,
        }
    }
}
