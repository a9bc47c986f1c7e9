//! Generator module - adaptive three-piece sets
//!
//! Each round the generator samples candidate sets sized toward a target
//! block count, scores them by how much placement freedom they leave on the
//! current grid, and keeps the best one. It then checks whether exactly one
//! ordering of the chosen set can be placed by a greedy first-fit simulation,
//! which marks a "unique solution" bonus round.
//!
//! # Target sizing
//!
//! | Empty cells | Base target | Score scaling |
//! |-------------|-------------|---------------|
//! | 40+ | 18 | yes |
//! | 25-39 | 14 | yes |
//! | 15-24 | 10 | yes |
//! | under 15 | 16 | no |
//!
//! Score scaling multiplies the base by `max(0.6, 1 - score / 500 * 0.4)`.
//!
//! The unique-solution check is a heuristic: first-fit can miss placements a
//! full search would find, so the flag is an engagement signal rather than a
//! proof. The scan order is row-major and must stay that way.

use std::collections::HashSet;

use log::{debug, trace};

use crate::catalog::{random_kind, rotate_piece, Piece, Shape};
use crate::config::GeneratorConfig;
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::types::{ShapeKind, PIECES_PER_ROUND};

/// The six orderings of three pieces
const PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// A generated round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceSet {
    pub pieces: [Piece; PIECES_PER_ROUND],
    pub is_unique_solution: bool,
}

/// Target total block count for a round
pub fn target_block_count(empty_cells: u32, score: u32) -> u32 {
    let base: u32 = match empty_cells {
        40.. => 18,
        25..=39 => 14,
        15..=24 => 10,
        _ => 16,
    };

    // Near-full grid: keep the game alive, ignore difficulty scaling.
    if empty_cells < 15 {
        return base;
    }

    let multiplier = (1.0 - (f64::from(score) / 500.0) * 0.4).max(0.6);
    (f64::from(base) * multiplier).round() as u32
}

/// Build one candidate set aimed at `target` blocks
pub fn build_candidate(
    target: u32,
    rng: &mut SimpleRng,
    config: &GeneratorConfig,
) -> [Piece; PIECES_PER_ROUND] {
    let mut total: i64 = 0;

    let first = pick_open_slot(i64::from(target) - total, PIECES_PER_ROUND, rng, config);
    total += i64::from(first.block_count());
    let second = pick_open_slot(i64::from(target) - total, PIECES_PER_ROUND - 1, rng, config);
    total += i64::from(second.block_count());
    let last = pick_closing_slot(i64::from(target) - total, rng, config);

    [first, second, last]
}

/// Uniform pick among shapes no larger than the per-slot share plus slack
fn pick_open_slot(
    remaining: i64,
    slots_left: usize,
    rng: &mut SimpleRng,
    config: &GeneratorConfig,
) -> Piece {
    let limit = remaining as f64 / slots_left as f64 + config.size_slack;
    let fitting: Vec<ShapeKind> = ShapeKind::ALL
        .into_iter()
        .filter(|kind| f64::from(Shape::of(*kind).block_count()) <= limit)
        .collect();

    let kind = match rng.choose(&fitting) {
        Some(kind) => *kind,
        None => random_kind(rng),
    };
    Piece::with_random_color(kind, rng)
}

/// Uniform pick among the catalog shapes closest in size to what is left
fn pick_closing_slot(remaining: i64, rng: &mut SimpleRng, config: &GeneratorConfig) -> Piece {
    let mut ranked: Vec<ShapeKind> = ShapeKind::ALL.to_vec();
    // Stable: ties keep catalog order.
    ranked.sort_by_key(|kind| {
        let blocks = i64::from(Shape::of(*kind).block_count());
        (blocks - remaining).abs()
    });

    let pool = config.last_slot_pool.clamp(1, ranked.len());
    let kind = ranked[rng.next_index(pool)];
    Piece::with_random_color(kind, rng)
}

/// Placement count per piece, optionally taking the better of the 90° rotated form
///
/// The rotated form only counts while the holding slot is empty, since moving
/// a piece into that slot is the only way to rotate it.
pub fn total_placements(pieces: &[Piece], grid: &Grid, hold: Option<&Piece>) -> u32 {
    pieces
        .iter()
        .map(|piece| {
            let normal = grid.count_placements(piece);
            if hold.is_none() {
                normal.max(grid.count_placements(&rotate_piece(piece)))
            } else {
                normal
            }
        })
        .sum()
}

/// Number of distinct size families in a set (`quad-h` and `quad-t` count once)
fn distinct_families(pieces: &[Piece]) -> usize {
    pieces.iter().map(|p| p.kind.family()).collect::<HashSet<_>>().len()
}

/// Score a candidate set; `config.reject_score` marks a set that is too constrained
pub fn evaluate_candidate(
    pieces: &[Piece],
    grid: &Grid,
    hold: Option<&Piece>,
    target: u32,
    config: &GeneratorConfig,
) -> i32 {
    let placements = total_placements(pieces, grid, hold);
    if placements < config.min_total_placements {
        return config.reject_score;
    }

    let blocks: i64 = pieces.iter().map(|p| i64::from(p.block_count())).sum();
    let deviation = (blocks - i64::from(target)).abs() as i32;

    placements as i32 * config.placement_weight - deviation * config.size_penalty
        + distinct_families(pieces) as i32 * config.diversity_weight
}

/// Greedy sequential placement of `order` starting from `grid`
///
/// Each piece goes to the first legal anchor in row-major order and completed
/// lines clear before the next piece. A piece that fits nowhere gets one retry
/// in its 90° rotated form if the holding slot is still free, which then
/// occupies the slot for the rest of the simulation.
pub fn can_place_sequentially(order: &[&Piece], grid: &Grid, hold: Option<&Piece>) -> bool {
    let mut current = *grid;
    let mut hold_free = hold.is_none();

    for piece in order {
        let rotated;
        let (candidate, pos) = match current.first_fit(piece) {
            Some(pos) => (*piece, pos),
            None if hold_free => {
                rotated = rotate_piece(piece);
                match current.first_fit(&rotated) {
                    Some(pos) => {
                        hold_free = false;
                        (&rotated, pos)
                    }
                    None => return false,
                }
            }
            None => return false,
        };

        let placed = current.place(candidate, pos);
        current = placed.clear_lines(&placed.find_completed_lines());
    }

    true
}

/// Whether exactly one of the six orderings survives the greedy simulation
pub fn detect_unique_solution(
    pieces: &[Piece; PIECES_PER_ROUND],
    grid: &Grid,
    hold: Option<&Piece>,
) -> bool {
    let mut solutions = 0;
    for perm in PERMUTATIONS {
        let order = perm.map(|i| &pieces[i]);
        if can_place_sequentially(&order, grid, hold) {
            solutions += 1;
            if solutions > 1 {
                return false;
            }
        }
    }
    solutions == 1
}

/// Generate the next round with default tunables
pub fn generate_smart_piece_set(
    grid: &Grid,
    hold: Option<&Piece>,
    score: u32,
    rng: &mut SimpleRng,
) -> PieceSet {
    generate_smart_piece_set_with(grid, hold, score, rng, &GeneratorConfig::default())
}

/// Generate the next round: best of `candidate_count` samples, then the unique-solution check
pub fn generate_smart_piece_set_with(
    grid: &Grid,
    hold: Option<&Piece>,
    score: u32,
    rng: &mut SimpleRng,
    config: &GeneratorConfig,
) -> PieceSet {
    let empty = grid.empty_count();
    let target = target_block_count(empty, score);

    let mut best: Option<([Piece; PIECES_PER_ROUND], i32)> = None;
    for i in 0..config.candidate_count.max(1) {
        let candidate = build_candidate(target, rng, config);
        let eval = evaluate_candidate(&candidate, grid, hold, target, config);
        trace!("candidate {i}: eval={eval}");
        // Strictly greater: the first-seen candidate wins ties.
        if best.as_ref().map_or(true, |(_, best_eval)| eval > *best_eval) {
            best = Some((candidate, eval));
        }
    }

    let (pieces, eval) = match best {
        Some(best) => best,
        // candidate_count is clamped to at least one above
        None => (build_candidate(target, rng, config), config.reject_score),
    };

    let is_unique_solution = detect_unique_solution(&pieces, grid, hold);
    debug!(
        "generated set [{}, {}, {}] target={} empty={} eval={} unique={}",
        pieces[0].kind.as_str(),
        pieces[1].kind.as_str(),
        pieces[2].kind.as_str(),
        target,
        empty,
        eval,
        is_unique_solution
    );

    PieceSet {
        pieces,
        is_unique_solution,
    }
}
