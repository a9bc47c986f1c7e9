//! Session module - the round loop around the engine
//!
//! A [`Session`] threads the persisted [`SessionSnapshot`] through the engine
//! calls in the order a game screen makes them: place or hold a piece, commit
//! the cleared grid, add points and bonuses, deal a new round once the bar is
//! empty, and detect game over. It performs no I/O; every action returns a
//! [`TurnEvents`] value that a UI can map to sounds, haptics or notifications.
//!
//! # Rules on top of the engine
//!
//! - **Full clear**: emptying the grid adds `full_clear_bonus`.
//! - **Combo warm-up**: the combo stays at zero until `combo_warmup_rounds`
//!   rounds are complete. After that, a round with no clear resets it.
//! - **Holding slot**: one piece can be parked there, rotated 90° on entry.
//!   Dealing a new round empties it.
//! - **Unique solution**: a dealt round with exactly one greedy-solvable
//!   ordering adds `unique_solution_bonus`.

use log::{debug, info};

use crate::catalog::{random_piece_set, rotate_piece, Piece};
use crate::config::RulesConfig;
use crate::generator::generate_smart_piece_set_with;
use crate::grid::Grid;
use crate::placement::process_placement;
use crate::rng::SimpleRng;
use crate::snapshot::SessionSnapshot;
use crate::types::{PieceSource, Position};

/// What happened during one session action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnEvents {
    /// Points added by this action, bonuses included.
    pub points: u32,
    pub lines_cleared: u32,
    pub full_clear: bool,
    /// The combo grew (only possible after the warm-up rounds).
    pub combo_increased: bool,
    pub round_completed: bool,
    pub unique_solution: bool,
    pub game_over: bool,
}

/// A running game
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionSnapshot,
    rng: SimpleRng,
    rules: RulesConfig,
}

impl Session {
    /// Start a new game: empty grid and three unbiased random pieces
    pub fn new(seed: u32, rules: RulesConfig) -> Self {
        let mut rng = SimpleRng::new(seed);
        let mut state = SessionSnapshot::default();
        state.pieces = random_piece_set(&mut rng).map(Some);
        Self { state, rng, rules }
    }

    /// Resume from persisted state; `seed` drives the rounds dealt from now on
    pub fn restore(state: SessionSnapshot, seed: u32, rules: RulesConfig) -> Self {
        Self {
            state,
            rng: SimpleRng::new(seed),
            rules,
        }
    }

    /// Resume exactly where [`Session::snapshot`] and [`Session::rng_state`] left off
    pub fn resume(state: SessionSnapshot, rng_state: u32, rules: RulesConfig) -> Self {
        Self {
            state,
            rng: SimpleRng::from_state(rng_state),
            rules,
        }
    }

    /// Copy of the persistable state
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.clone()
    }

    pub fn state(&self) -> &SessionSnapshot {
        &self.state
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn pieces(&self) -> &[Option<Piece>] {
        &self.state.pieces
    }

    pub fn hold(&self) -> Option<&Piece> {
        self.state.hold.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn combo(&self) -> u32 {
        self.state.combo
    }

    pub fn completed_rounds(&self) -> u32 {
        self.state.completed_rounds
    }

    pub fn game_over(&self) -> bool {
        self.state.game_over
    }

    /// RNG state, to persist alongside the snapshot for [`Session::resume`]
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Piece currently at `source`, if any
    pub fn piece_at(&self, source: PieceSource) -> Option<&Piece> {
        match source {
            PieceSource::Slot(i) => self.state.pieces.get(i)?.as_ref(),
            PieceSource::Hold => self.state.hold.as_ref(),
        }
    }

    /// Drag-preview check: would placing `source` at `pos` be accepted?
    pub fn can_place(&self, source: PieceSource, pos: Position) -> bool {
        !self.state.game_over
            && self
                .piece_at(source)
                .is_some_and(|piece| self.state.grid.can_place(piece, pos))
    }

    /// Place the piece at `source` with its top-left corner at `pos`
    ///
    /// Returns `None` and leaves the session untouched when the game is over,
    /// the source is empty, or the placement is illegal.
    pub fn place(&mut self, source: PieceSource, pos: Position) -> Option<TurnEvents> {
        if self.state.game_over {
            return None;
        }
        let piece = self.piece_at(source)?;
        let result = process_placement(&self.state.grid, piece, pos, self.state.combo);
        if !result.success {
            return None;
        }

        match source {
            PieceSource::Slot(i) => self.state.pieces[i] = None,
            PieceSource::Hold => self.state.hold = None,
        }

        self.state.grid = result.grid;
        let lines_cleared = result.lines_cleared();
        let full_clear = self.state.grid.is_empty();
        let bonus = if full_clear {
            self.rules.full_clear_bonus
        } else {
            0
        };
        let points = result.points_earned.saturating_add(bonus);
        self.state.score = self.state.score.saturating_add(points);
        self.state.round_had_clear |= lines_cleared > 0;

        let previous_combo = self.state.combo;
        self.state.combo = if self.state.completed_rounds < self.rules.combo_warmup_rounds {
            0
        } else {
            result.new_combo
        };

        let mut events = TurnEvents {
            points,
            lines_cleared,
            full_clear,
            combo_increased: self.state.combo > previous_combo,
            ..TurnEvents::default()
        };
        self.advance(&mut events);
        Some(events)
    }

    /// Park the piece of bar slot `slot` in the holding slot, rotated 90°
    ///
    /// Returns `None` when the game is over, the holding slot is taken, or the
    /// bar slot is empty.
    pub fn move_to_hold(&mut self, slot: usize) -> Option<TurnEvents> {
        if self.state.game_over || self.state.hold.is_some() {
            return None;
        }
        let piece = self.state.pieces.get_mut(slot)?.take()?;
        self.state.hold = Some(rotate_piece(&piece));

        let mut events = TurnEvents::default();
        self.advance(&mut events);
        Some(events)
    }

    /// Whether any remaining piece (bar or holding slot) fits anywhere in any rotation
    pub fn any_move_available(&self) -> bool {
        let bar = self.state.pieces.iter().map(Option::as_ref);
        self.state
            .grid
            .can_place_any_piece(bar.chain(std::iter::once(self.state.hold.as_ref())))
    }

    /// Deal a new round when the bar is empty, then check for game over
    fn advance(&mut self, events: &mut TurnEvents) {
        if self.state.pieces.iter().all(Option::is_none) {
            self.complete_round(events);
        }

        if !self.any_move_available() {
            self.state.game_over = true;
            events.game_over = true;
            info!(
                "game over: score={} rounds={}",
                self.state.score, self.state.completed_rounds
            );
        }
    }

    fn complete_round(&mut self, events: &mut TurnEvents) {
        if self.state.completed_rounds >= self.rules.combo_warmup_rounds
            && !self.state.round_had_clear
        {
            self.state.combo = 0;
        }

        let set = generate_smart_piece_set_with(
            &self.state.grid,
            self.state.hold.as_ref(),
            self.state.score,
            &mut self.rng,
            &self.rules.generator,
        );

        if set.is_unique_solution {
            let bonus = self.rules.unique_solution_bonus;
            self.state.score = self.state.score.saturating_add(bonus);
            events.points = events.points.saturating_add(bonus);
            events.unique_solution = true;
        }

        self.state.pieces = set.pieces.map(Some);
        self.state.hold = None;
        self.state.completed_rounds += 1;
        self.state.round_had_clear = false;
        events.round_completed = true;

        debug!(
            "round {} dealt: score={} combo={} unique={}",
            self.state.completed_rounds,
            self.state.score,
            self.state.combo,
            set.is_unique_solution
        );
    }
}
