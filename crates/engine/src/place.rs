use blockfit_core::{Session, TurnEvents};
use blockfit_types::{PieceSource, Position, PIECES_PER_ROUND};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    NotPlayable,
    InvalidSlot,
    EmptySource,
    OutOfBounds,
    Blocked,
    HoldOccupied,
}

impl PlaceError {
    pub fn message(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "game is over",
            PlaceError::InvalidSlot => "slot index is outside the piece bar",
            PlaceError::EmptySource => "no piece at the requested source",
            PlaceError::OutOfBounds => "piece would extend past the grid edge",
            PlaceError::Blocked => "piece overlaps filled cells",
            PlaceError::HoldOccupied => "holding slot already holds a piece",
        }
    }
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for PlaceError {}

fn check_source(session: &Session, source: PieceSource) -> Result<(), PlaceError> {
    if session.game_over() {
        return Err(PlaceError::NotPlayable);
    }
    if let PieceSource::Slot(i) = source {
        if i >= PIECES_PER_ROUND {
            return Err(PlaceError::InvalidSlot);
        }
    }
    if session.piece_at(source).is_none() {
        return Err(PlaceError::EmptySource);
    }
    Ok(())
}

/// Place the piece at `source` with its top-left corner at `pos`
///
/// On error the session is left untouched.
pub fn apply_place(
    session: &mut Session,
    source: PieceSource,
    pos: Position,
) -> Result<TurnEvents, PlaceError> {
    check_source(session, source)?;
    let Some(piece) = session.piece_at(source) else {
        return Err(PlaceError::EmptySource);
    };

    let rows = session.grid().rows() as i32;
    let cols = session.grid().cols() as i32;
    let (row, col) = (pos.row as i32, pos.col as i32);
    if row < 0 || col < 0 || row + piece.height() as i32 > rows || col + piece.width() as i32 > cols
    {
        return Err(PlaceError::OutOfBounds);
    }
    if !session.grid().can_place(piece, pos) {
        return Err(PlaceError::Blocked);
    }

    // Validated above; a refusal here means the game ended in between.
    session.place(source, pos).ok_or(PlaceError::NotPlayable)
}

/// Move the piece of bar slot `slot` into the holding slot (rotated 90°)
pub fn apply_hold(session: &mut Session, slot: usize) -> Result<TurnEvents, PlaceError> {
    check_source(session, PieceSource::Slot(slot))?;
    if session.hold().is_some() {
        return Err(PlaceError::HoldOccupied);
    }
    session.move_to_hold(slot).ok_or(PlaceError::NotPlayable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfit_core::{Grid, Piece, RulesConfig, SessionSnapshot};
    use blockfit_types::{PieceColor, ShapeKind};

    fn session_with(pieces: [Option<ShapeKind>; 3], grid: Grid) -> Session {
        let mut state = SessionSnapshot::default();
        state.grid = grid;
        state.pieces = pieces.map(|k| k.map(|k| Piece::new(k, PieceColor::default(), 0)));
        Session::restore(state, 1, RulesConfig::default())
    }

    #[test]
    fn place_rejected_when_game_over() {
        let mut session = session_with([Some(ShapeKind::Single), None, None], Grid::new());
        let mut state = session.snapshot();
        state.game_over = true;
        session = Session::restore(state, 1, RulesConfig::default());

        let err = apply_place(&mut session, PieceSource::Slot(0), Position::new(0, 0)).unwrap_err();
        assert_eq!(err, PlaceError::NotPlayable);
        assert_eq!(err.to_string(), "game is over");
    }

    #[test]
    fn place_rejected_when_source_missing() {
        let mut session = session_with([Some(ShapeKind::Single), None, None], Grid::new());

        let err = apply_place(&mut session, PieceSource::Slot(7), Position::new(0, 0)).unwrap_err();
        assert_eq!(err, PlaceError::InvalidSlot);
        let err = apply_place(&mut session, PieceSource::Slot(1), Position::new(0, 0)).unwrap_err();
        assert_eq!(err, PlaceError::EmptySource);
        let err = apply_place(&mut session, PieceSource::Hold, Position::new(0, 0)).unwrap_err();
        assert_eq!(err, PlaceError::EmptySource);
    }

    #[test]
    fn place_rejected_when_out_of_bounds() {
        let mut session = session_with([Some(ShapeKind::TripleH), None, None], Grid::new());
        let before = session.snapshot();

        let err = apply_place(&mut session, PieceSource::Slot(0), Position::new(0, 6)).unwrap_err();
        assert_eq!(err, PlaceError::OutOfBounds);
        let err = apply_place(&mut session, PieceSource::Slot(0), Position::new(-1, 0)).unwrap_err();
        assert_eq!(err, PlaceError::OutOfBounds);
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn place_rejected_when_blocked() {
        let grid = Grid::new().with_cell(0, 1, true);
        let mut session = session_with([Some(ShapeKind::TripleH), None, None], grid);

        let err = apply_place(&mut session, PieceSource::Slot(0), Position::new(0, 0)).unwrap_err();
        assert_eq!(err, PlaceError::Blocked);
        assert_eq!(err.to_string(), "piece overlaps filled cells");
    }

    #[test]
    fn hold_rejected_when_occupied() {
        let mut session = session_with(
            [Some(ShapeKind::Single), Some(ShapeKind::DoubleH), Some(ShapeKind::Single)],
            Grid::new(),
        );

        apply_hold(&mut session, 1).expect("first hold");
        assert_eq!(apply_hold(&mut session, 0).unwrap_err(), PlaceError::HoldOccupied);
        assert_eq!(apply_hold(&mut session, 1).unwrap_err(), PlaceError::EmptySource);
    }

    #[test]
    fn place_commits_and_reports_events() {
        let mut session = session_with([Some(ShapeKind::QuadSquare), Some(ShapeKind::Single), None], Grid::new());

        let events = apply_place(&mut session, PieceSource::Slot(0), Position::new(6, 6)).unwrap();
        assert_eq!(events.points, 4);
        assert_eq!(session.grid().filled_count(), 4);
    }
}
