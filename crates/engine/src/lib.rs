//! Engine call surface used by game screens, bots and tests.
//!
//! The free functions below are the whole contract an outer application needs
//! for a drag-and-drop block puzzle: preview, commit, dealing and game-over
//! checks. None of them fail; illegal requests resolve to `false` or to a
//! result with `success == false`. Session-level actions with typed refusals
//! live in [`place`], and a greedy autoplayer in [`policy`].

pub mod place;
pub mod policy;

use blockfit_core::{Grid, Piece, PieceSet, PlacementResult, SimpleRng};
use blockfit_types::Position;

pub use place::{apply_hold, apply_place, PlaceError};
pub use policy::{apply_move, choose_move, GreedyPolicy, Move, Policy};

pub fn create_empty_grid() -> Grid {
    Grid::new()
}

/// Drag-preview check
pub fn can_place_piece(grid: &Grid, piece: &Piece, pos: Position) -> bool {
    grid.can_place(piece, pos)
}

pub fn process_placement(grid: &Grid, piece: &Piece, pos: Position, combo: u32) -> PlacementResult {
    blockfit_core::process_placement(grid, piece, pos, combo)
}

/// Game-over check over the bar pieces and the held piece
pub fn can_place_any_piece(grid: &Grid, pieces: &[Option<Piece>]) -> bool {
    grid.can_place_any_piece(pieces.iter().map(Option::as_ref))
}

pub fn generate_smart_piece_set(
    grid: &Grid,
    hold: Option<&Piece>,
    score: u32,
    rng: &mut SimpleRng,
) -> PieceSet {
    blockfit_core::generate_smart_piece_set(grid, hold, score, rng)
}

/// Same piece turned 90° clockwise
pub fn rotate_piece(piece: &Piece) -> Piece {
    blockfit_core::rotate_piece(piece)
}
