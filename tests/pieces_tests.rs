//! Piece catalog and scoring tests

use blockfit::core::scoring::format_combo;
use blockfit::core::{calculate_score, dimensions, random_piece_set, rotate90, Piece, Shape, SimpleRng};
use blockfit::engine::rotate_piece;
use blockfit::types::{PieceColor, Rotation, ShapeKind, PIECE_COLORS};

// ============== Shape Tests ==============

#[test]
fn test_catalog_shapes() {
    assert_eq!(Shape::of(ShapeKind::Single).to_rows(), vec![vec![1]]);
    assert_eq!(Shape::of(ShapeKind::DoubleV).to_rows(), vec![vec![1], vec![1]]);
    assert_eq!(
        Shape::of(ShapeKind::TripleL).to_rows(),
        vec![vec![1, 0], vec![1, 1]]
    );
    assert_eq!(
        Shape::of(ShapeKind::PentaT).to_rows(),
        vec![vec![1, 1, 1], vec![0, 1, 0], vec![0, 1, 0]]
    );
}

#[test]
fn test_bars_have_both_orientations_in_catalog() {
    for (h, v) in [
        (ShapeKind::DoubleH, ShapeKind::DoubleV),
        (ShapeKind::TripleH, ShapeKind::TripleV),
        (ShapeKind::QuadH, ShapeKind::QuadV),
    ] {
        assert_eq!(rotate90(&Shape::of(h)), Shape::of(v));
    }
}

#[test]
fn test_dimensions_swap_on_rotation() {
    for kind in ShapeKind::ALL {
        let shape = Shape::of(kind);
        let d = dimensions(&shape);
        let r = dimensions(&rotate90(&shape));
        assert_eq!((d.width, d.height), (r.height, r.width), "{kind:?}");
        assert_eq!(shape.block_count(), rotate90(&shape).block_count());
    }
}

// ============== Piece Tests ==============

#[test]
fn test_rotate_piece_keeps_identity_and_color() {
    let piece = Piece::new(ShapeKind::PentaL, PieceColor::new(4), 9);
    let once = rotate_piece(&piece);

    assert_eq!(once.kind, piece.kind);
    assert_eq!(once.instance, piece.instance);
    assert_eq!(once.color, piece.color);
    assert_eq!(once.rotation, Rotation::R90);
    assert_eq!((once.width(), once.height()), (4, 2));

    let full = (0..3).fold(once, |p, _| rotate_piece(&p));
    assert_eq!(full.shape, piece.shape);
    assert_eq!(full.rotation, Rotation::R0);
}

#[test]
fn test_random_sets_use_palette_and_catalog() {
    let mut rng = SimpleRng::new(99);
    for _ in 0..50 {
        for piece in random_piece_set(&mut rng) {
            assert!(ShapeKind::ALL.contains(&piece.kind));
            assert!(PIECE_COLORS.contains(&piece.color.hex()));
            assert_eq!(piece.shape, Shape::of(piece.kind));
        }
    }
}

// ============== Scoring Tests ==============

#[test]
fn test_score_without_clear() {
    let result = calculate_score(4, 0, 2);
    assert_eq!(result.placement_points, 4);
    assert_eq!(result.line_clear_points, 0);
    assert_eq!(result.new_combo, 0);
    assert_eq!(result.score, 4);
}

#[test]
fn test_score_with_two_lines_and_combo() {
    let result = calculate_score(4, 2, 2);
    assert_eq!(result.line_clear_points, 15);
    assert_eq!(result.new_combo, 3);
    // floor(19 * 1.75)
    assert_eq!(result.score, 33);
}

#[test]
fn test_combo_text() {
    assert_eq!(format_combo(0), "");
    assert_eq!(format_combo(3), "×1.75");
}
