//! Grid module - occupancy grid, placement legality and line clears
//!
//! The grid is an 8x8 matrix of empty/filled cells packed into a single `u64`
//! bitboard, row-major (`row * GRID_COLS + col`). It is a `Copy` value: every
//! operation returns a new grid, so previews and simulations never touch the
//! authoritative state.
//! Coordinates: (row, col) where row ranges 0..7 (top to bottom), col ranges 0..7 (left to right)

use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::catalog::{rotate_piece, Piece};
use crate::types::{Position, GRID_CELLS, GRID_COLS, GRID_ROWS};

const _: () = assert!(GRID_CELLS <= 64, "grid must fit in a u64 bitboard");

/// Mask of every cell on the grid
const FULL_MASK: u64 = u64::MAX >> (64 - GRID_CELLS);

/// Mask of row 0; shift by `row * GRID_COLS` for other rows
const ROW_MASK: u64 = (1u64 << GRID_COLS) - 1;

/// Mask of column 0; shift by `col` for other columns
const COL_MASK: u64 = {
    let mut mask = 0u64;
    let mut row = 0;
    while row < GRID_ROWS {
        mask |= 1u64 << (row * GRID_COLS);
        row += 1;
    }
    mask
};

/// Rows and columns found complete after a placement
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClearResult {
    pub rows: ArrayVec<u8, GRID_ROWS>,
    pub cols: ArrayVec<u8, GRID_COLS>,
}

impl ClearResult {
    /// Number of lines; a row and a column cleared together count as two
    pub fn total_cleared(&self) -> u32 {
        (self.rows.len() + self.cols.len()) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }
}

/// Error converting a 0/1 matrix into a [`Grid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridShapeError {
    RowCount(usize),
    ColCount { row: usize, len: usize },
    CellValue { row: usize, col: usize, value: u8 },
}

impl fmt::Display for GridShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridShapeError::RowCount(n) => write!(f, "expected {GRID_ROWS} rows, got {n}"),
            GridShapeError::ColCount { row, len } => {
                write!(f, "row {row}: expected {GRID_COLS} cells, got {len}")
            }
            GridShapeError::CellValue { row, col, value } => {
                write!(f, "cell ({row}, {col}): expected 0 or 1, got {value}")
            }
        }
    }
}

impl std::error::Error for GridShapeError {}

/// The puzzle grid - 8 rows x 8 columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Grid {
    bits: u64,
}

impl Grid {
    /// Create a new empty grid
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Calculate bit index from (row, col) coordinates
    #[inline(always)]
    fn index(row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row >= GRID_ROWS as i32 || col >= GRID_COLS as i32 {
            return None;
        }
        Some(row as usize * GRID_COLS + col as usize)
    }

    pub fn rows(&self) -> usize {
        GRID_ROWS
    }

    pub fn cols(&self) -> usize {
        GRID_COLS
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<bool> {
        Self::index(row, col).map(|i| self.bits & (1 << i) != 0)
    }

    /// Whether (row, col) is inside the grid and filled
    #[inline]
    pub fn is_filled(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(true))
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, filled: bool) -> bool {
        match Self::index(row, col) {
            Some(i) => {
                if filled {
                    self.bits |= 1 << i;
                } else {
                    self.bits &= !(1 << i);
                }
                true
            }
            None => false,
        }
    }

    /// Copy of this grid with one cell changed (out of bounds is ignored)
    pub fn with_cell(mut self, row: i32, col: i32, filled: bool) -> Self {
        self.set(row, col, filled);
        self
    }

    /// Whether every cell is empty
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn filled_count(&self) -> u32 {
        self.bits.count_ones()
    }

    pub fn empty_count(&self) -> u32 {
        GRID_CELLS as u32 - self.filled_count()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= GRID_ROWS {
            return false;
        }
        let mask = ROW_MASK << (row * GRID_COLS);
        self.bits & mask == mask
    }

    /// Check if a column is completely filled
    pub fn is_col_full(&self, col: usize) -> bool {
        if col >= GRID_COLS {
            return false;
        }
        let mask = COL_MASK << col;
        self.bits & mask == mask
    }

    /// Bitmask a piece would occupy at `pos`, or `None` if its bounding box leaves the grid
    fn piece_mask(piece: &Piece, pos: Position) -> Option<u64> {
        let (row, col) = (i32::from(pos.row), i32::from(pos.col));
        if row < 0 || col < 0 {
            return None;
        }
        if row as usize + piece.height() > GRID_ROWS || col as usize + piece.width() > GRID_COLS {
            return None;
        }

        let mut mask = 0u64;
        for (dr, dc) in piece.shape.cells() {
            mask |= 1 << ((row as usize + dr) * GRID_COLS + col as usize + dc);
        }
        Some(mask)
    }

    /// Whether `piece` fits at `pos`: inside the bounds and not overlapping a filled cell
    ///
    /// Pure; safe to call repeatedly during drag previews.
    pub fn can_place(&self, piece: &Piece, pos: Position) -> bool {
        match Self::piece_mask(piece, pos) {
            Some(mask) => self.bits & mask == 0,
            None => false,
        }
    }

    /// OR the piece's filled cells into a copy of the grid
    ///
    /// Does not check for collisions; callers validate with [`Grid::can_place`] first.
    /// Cells that would land outside the grid are dropped.
    pub fn place(&self, piece: &Piece, pos: Position) -> Grid {
        let mut next = *self;
        for (dr, dc) in piece.shape.cells() {
            next.set(
                i32::from(pos.row) + dr as i32,
                i32::from(pos.col) + dc as i32,
                true,
            );
        }
        next
    }

    /// Complete rows and columns, both checked against this same snapshot
    pub fn find_completed_lines(&self) -> ClearResult {
        let mut result = ClearResult::default();
        for row in 0..GRID_ROWS {
            if self.is_row_full(row) {
                result.rows.push(row as u8);
            }
        }
        for col in 0..GRID_COLS {
            if self.is_col_full(col) {
                result.cols.push(col as u8);
            }
        }
        result
    }

    /// Empty every listed row, then every listed column
    pub fn clear_lines(&self, clear: &ClearResult) -> Grid {
        let mut bits = self.bits;
        for &row in &clear.rows {
            if (row as usize) < GRID_ROWS {
                bits &= !(ROW_MASK << (row as usize * GRID_COLS));
            }
        }
        for &col in &clear.cols {
            if (col as usize) < GRID_COLS {
                bits &= !(COL_MASK << col as usize);
            }
        }
        Grid { bits }
    }

    /// Number of anchors where `piece` fits as-is
    pub fn count_placements(&self, piece: &Piece) -> u32 {
        self.anchors()
            .filter(|&pos| self.can_place(piece, pos))
            .count() as u32
    }

    /// First legal anchor in row-major scan order
    pub fn first_fit(&self, piece: &Piece) -> Option<Position> {
        self.anchors().find(|&pos| self.can_place(piece, pos))
    }

    /// Every anchor on the grid, row-major
    pub fn anchors(&self) -> impl Iterator<Item = Position> {
        (0..GRID_ROWS as i8)
            .flat_map(|row| (0..GRID_COLS as i8).map(move |col| Position::new(row, col)))
    }

    /// Whether any piece fits anywhere in any of its four rotations
    ///
    /// `None` entries (consumed slots) are skipped. Returning false is the
    /// terminal condition of a session.
    pub fn can_place_any_piece<'a, I>(&self, pieces: I) -> bool
    where
        I: IntoIterator<Item = Option<&'a Piece>>,
    {
        pieces.into_iter().flatten().any(|piece| {
            let mut current = piece.clone();
            for _ in 0..4 {
                if self.first_fit(&current).is_some() {
                    return true;
                }
                current = rotate_piece(&current);
            }
            false
        })
    }

    /// Matrix of 0/1 rows
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..GRID_ROWS as i32)
            .map(|r| {
                (0..GRID_COLS as i32)
                    .map(|c| u8::from(self.is_filled(r, c)))
                    .collect()
            })
            .collect()
    }

    /// Build a grid from 0/1 rows
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridShapeError> {
        if rows.len() != GRID_ROWS {
            return Err(GridShapeError::RowCount(rows.len()));
        }
        let mut grid = Grid::new();
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != GRID_COLS {
                return Err(GridShapeError::ColCount { row: r, len: row.len() });
            }
            for (c, &value) in row.iter().enumerate() {
                match value {
                    0 => {}
                    1 => {
                        grid.set(r as i32, c as i32, true);
                    }
                    _ => return Err(GridShapeError::CellValue { row: r, col: c, value }),
                }
            }
        }
        Ok(grid)
    }

    /// Build a grid from text rows: `#` or `1` is filled, anything else empty
    ///
    /// Short rows are padded with empty cells; extra rows and cells are ignored.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let mut grid = Grid::new();
        for (r, line) in rows.iter().enumerate().take(GRID_ROWS) {
            for (c, ch) in line.chars().enumerate().take(GRID_COLS) {
                if ch == '#' || ch == '1' {
                    grid.set(r as i32, c as i32, true);
                }
            }
        }
        grid
    }

    /// Grid with every cell filled
    pub fn full() -> Self {
        Self { bits: FULL_MASK }
    }
}

impl From<Grid> for Vec<Vec<u8>> {
    fn from(value: Grid) -> Self {
        value.to_rows()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = GridShapeError;

    fn try_from(value: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Grid::from_rows(&value)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..GRID_ROWS as i32 {
            for c in 0..GRID_COLS as i32 {
                f.write_str(if self.is_filled(r, c) { "#" } else { "." })?;
            }
            if r + 1 < GRID_ROWS as i32 {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}
