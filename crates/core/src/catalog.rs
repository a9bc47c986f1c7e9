//! Catalog module - polyomino shapes, pieces and rotation
//!
//! Shapes are small binary matrices (at most 5x5) stored as a row-major
//! bitmask. Every catalog matrix has a filled cell in its first row and its
//! first column, so the anchor of a piece is always the top-left corner of
//! its bounding box. Rotation keeps that property.

use serde::{Deserialize, Serialize};

use crate::rng::SimpleRng;
use crate::types::{PieceColor, Rotation, ShapeKind, MAX_SHAPE_SIDE, PIECE_COLORS};

/// Catalog matrices, 1 = filled
fn catalog_rows(kind: ShapeKind) -> &'static [&'static [u8]] {
    match kind {
        ShapeKind::Single => &[&[1]],
        ShapeKind::DoubleH => &[&[1, 1]],
        ShapeKind::DoubleV => &[&[1], &[1]],
        ShapeKind::TripleH => &[&[1, 1, 1]],
        ShapeKind::TripleV => &[&[1], &[1], &[1]],
        ShapeKind::TripleL => &[&[1, 0], &[1, 1]],
        ShapeKind::QuadH => &[&[1, 1, 1, 1]],
        ShapeKind::QuadV => &[&[1], &[1], &[1], &[1]],
        ShapeKind::QuadSquare => &[&[1, 1], &[1, 1]],
        ShapeKind::QuadL => &[&[1, 0], &[1, 0], &[1, 1]],
        ShapeKind::QuadT => &[&[1, 1, 1], &[0, 1, 0]],
        ShapeKind::PentaH => &[&[1, 1, 1, 1, 1]],
        ShapeKind::PentaL => &[&[1, 0], &[1, 0], &[1, 0], &[1, 1]],
        ShapeKind::PentaT => &[&[1, 1, 1], &[0, 1, 0], &[0, 1, 0]],
        ShapeKind::PentaPlus => &[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]],
    }
}

/// Width and height of a shape's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

/// Binary shape matrix of at most `MAX_SHAPE_SIDE` x `MAX_SHAPE_SIDE` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Shape {
    width: u8,
    height: u8,
    /// Row-major bits, `row * MAX_SHAPE_SIDE + col`
    bits: u32,
}

impl Shape {
    /// Build a shape from 0/1 rows
    ///
    /// Returns `None` for an empty, ragged or oversized matrix.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.as_ref().len();
        if height == 0 || width == 0 || height > MAX_SHAPE_SIDE || width > MAX_SHAPE_SIDE {
            return None;
        }

        let mut bits = 0u32;
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return None;
            }
            for (c, &cell) in row.iter().enumerate() {
                match cell {
                    0 => {}
                    1 => bits |= 1 << (r * MAX_SHAPE_SIDE + c),
                    _ => return None,
                }
            }
        }

        Some(Self {
            width: width as u8,
            height: height as u8,
            bits,
        })
    }

    /// Catalog shape for a kind
    pub fn of(kind: ShapeKind) -> Self {
        let rows = catalog_rows(kind);
        let mut bits = 0u32;
        for (r, row) in rows.iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                if cell == 1 {
                    bits |= 1 << (r * MAX_SHAPE_SIDE + c);
                }
            }
        }
        Self {
            width: rows[0].len() as u8,
            height: rows.len() as u8,
            bits,
        }
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    pub fn dimensions(&self) -> Dimensions {
        dimensions(self)
    }

    /// Whether the cell at (row, col) is filled; false outside the bounding box
    #[inline]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.height()
            && col < self.width()
            && self.bits & (1 << (row * MAX_SHAPE_SIDE + col)) != 0
    }

    /// Number of filled cells
    pub fn block_count(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Filled cells as (row, col) offsets, row-major
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height())
            .flat_map(move |r| (0..self.width()).map(move |c| (r, c)))
            .filter(move |&(r, c)| self.is_filled(r, c))
    }

    /// Matrix of 0/1 rows
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height())
            .map(|r| {
                (0..self.width())
                    .map(|c| u8::from(self.is_filled(r, c)))
                    .collect()
            })
            .collect()
    }
}

impl From<Shape> for Vec<Vec<u8>> {
    fn from(value: Shape) -> Self {
        value.to_rows()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Shape {
    type Error = String;

    fn try_from(value: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Shape::from_rows(&value)
            .ok_or_else(|| "shape must be a rectangular 0/1 matrix of at most 5x5".to_string())
    }
}

/// Rotate a shape 90° clockwise
///
/// Column `c` of the input becomes row `c` of the output, read bottom-to-top.
pub fn rotate90(shape: &Shape) -> Shape {
    let (h, w) = (shape.height(), shape.width());
    let mut bits = 0u32;
    for out_r in 0..w {
        for out_c in 0..h {
            if shape.is_filled(h - 1 - out_c, out_r) {
                bits |= 1 << (out_r * MAX_SHAPE_SIDE + out_c);
            }
        }
    }
    Shape {
        width: shape.height,
        height: shape.width,
        bits,
    }
}

/// Bounding box of a shape
pub fn dimensions(shape: &Shape) -> Dimensions {
    Dimensions {
        width: shape.width(),
        height: shape.height(),
    }
}

/// A piece offered to the player
///
/// Immutable value; rotating produces a new piece. `kind` plus `instance`
/// identify the piece within a round, but rotation does not preserve shape
/// equality, only identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: ShapeKind,
    pub instance: u32,
    pub shape: Shape,
    pub color: PieceColor,
    pub rotation: Rotation,
}

impl Piece {
    /// Catalog piece in its default orientation
    pub fn new(kind: ShapeKind, color: PieceColor, instance: u32) -> Self {
        Self {
            kind,
            instance,
            shape: Shape::of(kind),
            color,
            rotation: Rotation::R0,
        }
    }

    /// Catalog piece with a random color and instance token
    pub fn with_random_color(kind: ShapeKind, rng: &mut SimpleRng) -> Self {
        let color = PieceColor::new(rng.next_index(PIECE_COLORS.len()));
        let instance = rng.next_u32();
        Self::new(kind, color, instance)
    }

    pub fn width(&self) -> usize {
        self.shape.width()
    }

    pub fn height(&self) -> usize {
        self.shape.height()
    }

    pub fn block_count(&self) -> u32 {
        self.shape.block_count()
    }

    /// Identity token, e.g. `quad-t#1234`
    pub fn id(&self) -> String {
        format!("{}#{}", self.kind.as_str(), self.instance)
    }
}

/// Rotate a piece 90° clockwise, advancing its informational angle
pub fn rotate_piece(piece: &Piece) -> Piece {
    Piece {
        shape: rotate90(&piece.shape),
        rotation: piece.rotation.rotate_cw(),
        ..piece.clone()
    }
}

/// Uniform catalog kind
pub fn random_kind(rng: &mut SimpleRng) -> ShapeKind {
    ShapeKind::ALL[rng.next_index(ShapeKind::ALL.len())]
}

/// Uniform kind and an independent uniform color
pub fn random_piece(rng: &mut SimpleRng) -> Piece {
    let kind = random_kind(rng);
    Piece::with_random_color(kind, rng)
}

/// Three independent random pieces (no playability bias)
pub fn random_piece_set(rng: &mut SimpleRng) -> [Piece; 3] {
    [random_piece(rng), random_piece(rng), random_piece(rng)]
}
