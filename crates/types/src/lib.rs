//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond parsing and formatting,
//! making them usable in any context (engine, session orchestration, autoplay,
//! persistence by an outer application).
//!
//! # Grid Dimensions
//!
//! The playfield is a fixed square grid:
//!
//! - **Rows**: 8 (indexed 0-7, top to bottom)
//! - **Columns**: 8 (indexed 0-7, left to right)
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `POINTS_PER_BLOCK` | 1 | Points per placed cell |
//! | `POINTS_FIRST_LINE` | 10 | First cleared line of a placement |
//! | `POINTS_ADDITIONAL_LINE` | 5 | Each further line of the same placement |
//! | `COMBO_STEP` | 0.25 | Multiplier added per combo step |
//! | `FULL_CLEAR_BONUS` | 1000 | Flat bonus when a placement empties the grid |
//! | `UNIQUE_SOLUTION_BONUS` | 100 | Flat bonus for a unique-solution round |
//!
//! # Examples
//!
//! ```
//! use blockfit_types::{Rotation, ShapeKind, GRID_COLS, GRID_ROWS};
//!
//! let kind = ShapeKind::from_str("quad-t").unwrap();
//! assert_eq!(kind, ShapeKind::QuadT);
//! assert_eq!(kind.as_str(), "quad-t");
//!
//! assert_eq!(Rotation::R0.rotate_cw(), Rotation::R90);
//! assert_eq!(Rotation::R270.rotate_cw().degrees(), 0);
//!
//! assert_eq!(GRID_ROWS, 8);
//! assert_eq!(GRID_COLS, 8);
//! ```

use serde::{Deserialize, Serialize};

/// Grid height in cells (8 rows)
pub const GRID_ROWS: usize = 8;

/// Grid width in cells (8 columns)
pub const GRID_COLS: usize = 8;

/// Total number of cells on the grid
pub const GRID_CELLS: usize = GRID_ROWS * GRID_COLS;

/// Number of pieces offered each round
pub const PIECES_PER_ROUND: usize = 3;

/// Largest bounding box side of any catalog shape
pub const MAX_SHAPE_SIDE: usize = 5;

/// Points awarded per filled cell of a placed piece
pub const POINTS_PER_BLOCK: u32 = 1;

/// Points for the first line cleared by a placement
pub const POINTS_FIRST_LINE: u32 = 10;

/// Points for each additional line cleared by the same placement
pub const POINTS_ADDITIONAL_LINE: u32 = 5;

/// Combo multiplier step: multiplier = 1 + combo * COMBO_STEP
pub const COMBO_STEP: f64 = 0.25;

/// Flat bonus when a placement leaves the grid completely empty
pub const FULL_CLEAR_BONUS: u32 = 1000;

/// Flat bonus awarded when a round is dealt with exactly one solvable ordering
pub const UNIQUE_SOLUTION_BONUS: u32 = 100;

/// Number of completed rounds before combos start to count
pub const COMBO_WARMUP_ROUNDS: u32 = 2;

/// Display palette for pieces (hex RGB)
///
/// Pieces only store an index into this table, see [`PieceColor`].
pub const PIECE_COLORS: [&str; 13] = [
    "#667eea", "#f093fb", "#4facfe", "#43e97b", "#fa709a", "#fee140", "#30cfd0", "#a8edea",
    "#ff6b6b", "#feca57", "#48dbfb", "#ff9ff3", "#54a0ff",
];


/// Catalog identity of a piece shape
///
/// The fifteen polyominoes offered by the game, from a single cell up to
/// five-cell pentominoes. Horizontal and vertical bars are distinct kinds;
/// other shapes reach their other orientations only through rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Single,
    DoubleH,
    DoubleV,
    TripleH,
    TripleV,
    TripleL,
    QuadH,
    QuadV,
    QuadSquare,
    QuadL,
    QuadT,
    PentaH,
    PentaL,
    PentaT,
    PentaPlus,
}

impl ShapeKind {
    /// Every catalog kind in catalog order
    pub const ALL: [ShapeKind; 15] = [
        ShapeKind::Single,
        ShapeKind::DoubleH,
        ShapeKind::DoubleV,
        ShapeKind::TripleH,
        ShapeKind::TripleV,
        ShapeKind::TripleL,
        ShapeKind::QuadH,
        ShapeKind::QuadV,
        ShapeKind::QuadSquare,
        ShapeKind::QuadL,
        ShapeKind::QuadT,
        ShapeKind::PentaH,
        ShapeKind::PentaL,
        ShapeKind::PentaT,
        ShapeKind::PentaPlus,
    ];

    /// Parse shape kind from its catalog name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfit_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("single"), Some(ShapeKind::Single));
    /// assert_eq!(ShapeKind::from_str("Penta-Plus"), Some(ShapeKind::PentaPlus));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.as_str() == lower)
    }

    /// Catalog name
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Single => "single",
            ShapeKind::DoubleH => "double-h",
            ShapeKind::DoubleV => "double-v",
            ShapeKind::TripleH => "triple-h",
            ShapeKind::TripleV => "triple-v",
            ShapeKind::TripleL => "triple-l",
            ShapeKind::QuadH => "quad-h",
            ShapeKind::QuadV => "quad-v",
            ShapeKind::QuadSquare => "quad-square",
            ShapeKind::QuadL => "quad-l",
            ShapeKind::QuadT => "quad-t",
            ShapeKind::PentaH => "penta-h",
            ShapeKind::PentaL => "penta-l",
            ShapeKind::PentaT => "penta-t",
            ShapeKind::PentaPlus => "penta-plus",
        }
    }

    /// Size family: the catalog name up to the first `-`
    ///
    /// `quad-h`, `quad-t` and `quad-square` all belong to `quad`.
    pub fn family(&self) -> &'static str {
        let name = self.as_str();
        name.split('-').next().unwrap_or(name)
    }
}

/// Rotation angle of a piece relative to its catalog orientation
///
/// Informational only: the shape matrix carried by a piece is already rotated.
/// The cycle goes: R0 → R90 → R180 → R270 → R0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfit_types::Rotation;
    ///
    /// assert_eq!(Rotation::R0.rotate_cw(), Rotation::R90);
    /// assert_eq!(Rotation::R90.rotate_cw(), Rotation::R180);
    /// assert_eq!(Rotation::R180.rotate_cw(), Rotation::R270);
    /// assert_eq!(Rotation::R270.rotate_cw(), Rotation::R0);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }

    /// Angle in degrees (0, 90, 180 or 270)
    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    /// Parse from an angle in degrees; only exact quarter turns are accepted
    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::R0),
            90 => Some(Rotation::R90),
            180 => Some(Rotation::R180),
            270 => Some(Rotation::R270),
            _ => None,
        }
    }
}

impl From<Rotation> for u16 {
    fn from(value: Rotation) -> Self {
        value.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Rotation::from_degrees(value).ok_or_else(|| format!("invalid rotation angle: {value}"))
    }
}

/// Index into [`PIECE_COLORS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceColor(u8);

impl PieceColor {
    /// Create a color; indices past the palette wrap around
    pub fn new(index: usize) -> Self {
        Self((index % PIECE_COLORS.len()) as u8)
    }

    pub fn index(&self) -> usize {
        self.0 as usize % PIECE_COLORS.len()
    }

    /// Hex RGB string for display
    pub fn hex(&self) -> &'static str {
        PIECE_COLORS[self.index()]
    }
}

/// Anchor of a piece on the grid: the top-left cell of its bounding box
///
/// Signed so that out-of-range requests (for example a drag preview hanging
/// off the left edge) are representable and can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }
}

/// Where a piece being placed comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceSource {
    /// One of the three round slots (index 0..3)
    Slot(usize),
    /// The rotate-holding slot
    Hold,
}

impl PieceSource {
    /// Convert to lowercase string for logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceSource::Slot(0) => "slot0",
            PieceSource::Slot(1) => "slot1",
            PieceSource::Slot(2) => "slot2",
            PieceSource::Slot(_) => "slot?",
            PieceSource::Hold => "hold",
        }
    }
}
