//! Greedy autoplay policy
//!
//! Ranks every legal placement of every remaining piece by lines cleared, then
//! points earned. Ties keep the first candidate in scan order (bar slots
//! before the holding slot, anchors row-major). Used by the binary and by
//! integration tests to drive whole sessions.

use blockfit_core::{process_placement, rotate_piece, Session, SessionSnapshot, TurnEvents};
use blockfit_types::{PieceSource, Position};

use crate::place::{apply_hold, apply_place, PlaceError};

/// One session action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Place { source: PieceSource, pos: Position },
    Hold { slot: usize },
}

/// Policy chooses the next action for the current state.
///
/// Returns `None` if no legal action exists.
pub trait Policy {
    fn choose_move(&mut self, state: &SessionSnapshot) -> Option<Move>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPolicy;

impl Policy for GreedyPolicy {
    fn choose_move(&mut self, state: &SessionSnapshot) -> Option<Move> {
        choose_move(state)
    }
}

/// Best move for `state`, or `None` when the game is over or nothing can be done
pub fn choose_move(state: &SessionSnapshot) -> Option<Move> {
    if !state.playable() {
        return None;
    }

    let sources = (0..state.pieces.len())
        .map(PieceSource::Slot)
        .chain(std::iter::once(PieceSource::Hold));

    let mut best: Option<(Move, (u32, u32))> = None;
    for source in sources {
        let piece = match source {
            PieceSource::Slot(i) => state.pieces[i].as_ref(),
            PieceSource::Hold => state.hold.as_ref(),
        };
        let Some(piece) = piece else { continue };

        for pos in state.grid.anchors() {
            let result = process_placement(&state.grid, piece, pos, state.combo);
            if !result.success {
                continue;
            }
            let key = (result.lines_cleared(), result.points_earned);
            if best.map_or(true, |(_, k)| key > k) {
                best = Some((Move::Place { source, pos }, key));
            }
        }
    }

    if let Some((mv, _)) = best {
        return Some(mv);
    }

    // Nothing fits as-is: park a piece whose rotation does.
    if state.hold.is_some() {
        return None;
    }
    state.pieces.iter().enumerate().find_map(|(slot, piece)| {
        let rotated = rotate_piece(piece.as_ref()?);
        state.grid.first_fit(&rotated).map(|_| Move::Hold { slot })
    })
}

/// Apply `mv` to `session`
pub fn apply_move(session: &mut Session, mv: Move) -> Result<TurnEvents, PlaceError> {
    match mv {
        Move::Place { source, pos } => apply_place(session, source, pos),
        Move::Hold { slot } => apply_hold(session, slot),
    }
}
