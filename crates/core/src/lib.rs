//! Core puzzle logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the block-placement puzzle: the piece
//! catalog, the grid, scoring, the adaptive piece generator and the session
//! round loop. It has **no dependencies** on UI, storage, audio or I/O, making it:
//!
//! - **Deterministic**: the same seed deals the same pieces (for replays and tests)
//! - **Testable**: every rule is a plain function over plain values
//! - **Portable**: runs in a terminal, a GUI, a web worker or headless
//! - **Side-effect free**: grids are `Copy` values; previews never touch state
//!
//! # Module Structure
//!
//! - [`catalog`]: fifteen polyomino shapes, rotation, random pieces
//! - [`grid`]: 8x8 bitboard with placement checks and row/column clears
//! - [`scoring`]: placement, line and combo arithmetic
//! - [`generator`]: best-of-N three-piece sets and unique-solution detection
//! - [`placement`]: validate + place + clear + score in one call
//! - [`session`]: round loop, holding slot, bonuses and game over
//! - [`snapshot`]: the persistable session state
//! - [`config`]: generator and rule tunables
//! - [`rng`]: seedable random source
//!
//! # Game Rules
//!
//! - **Rounds**: three pieces are offered; once all three are placed a new set is dealt
//! - **Clears**: any full row or full column empties, both axes at once
//! - **Holding slot**: one piece can be parked there, rotated 90°
//! - **Game over**: no remaining piece fits anywhere in any rotation
//!
//! # Example
//!
//! ```
//! use blockfit_core::{RulesConfig, Session};
//! use blockfit_types::{PieceSource, Position};
//!
//! let mut session = Session::new(12345, RulesConfig::default());
//!
//! // Every piece fits on an empty grid at the top-left corner.
//! let events = session
//!     .place(PieceSource::Slot(0), Position::new(0, 0))
//!     .expect("legal placement");
//! assert!(events.points > 0);
//! assert_eq!(session.score(), events.points);
//! ```

pub mod catalog;
pub mod config;
pub mod generator;
pub mod grid;
pub mod placement;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfit_types as types;

// Re-export commonly used types for convenience
pub use catalog::{dimensions, random_piece, random_piece_set, rotate90, rotate_piece, Piece, Shape};
pub use config::{GeneratorConfig, RulesConfig};
pub use generator::{detect_unique_solution, generate_smart_piece_set, PieceSet};
pub use grid::{ClearResult, Grid};
pub use placement::{process_placement, PlacementResult};
pub use rng::SimpleRng;
pub use scoring::{calculate_score, ScoreResult};
pub use session::{Session, TurnEvents};
pub use snapshot::SessionSnapshot;
