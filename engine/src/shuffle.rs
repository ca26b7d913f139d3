use crate::board::Board;
use crate::deadlock;
use crate::flood::{DIRECTIONS, GroupFinder};
use crate::session_rng::SessionRng;
use crate::types::{GridPosition, Placement, ShuffleResult};

/// Bounded-retry randomized repair: permute block positions, force one
/// candidate pair into existence, re-verify, repeat up to `max_attempts`.
/// `solved == false` means the bound was exhausted and the board is still
/// deadlocked; the caller decides the fallback.
pub fn shuffle_until_solvable(
    board: &mut Board,
    finder: &mut GroupFinder,
    minimum_match_size: usize,
    max_attempts: u32,
    rng: &mut SessionRng,
) -> ShuffleResult {
    let mut attempts = 0;
    let mut solved = false;

    while attempts < max_attempts {
        attempts += 1;

        permute_positions(board, rng);
        force_candidate_pair(board, rng);

        if !deadlock::is_deadlocked(board, finder, minimum_match_size) {
            solved = true;
            break;
        }
    }

    let placements = board
        .active_blocks()
        .map(|block| Placement {
            position: block.position,
            color: block.color,
        })
        .collect();

    ShuffleResult {
        solved,
        attempts,
        placements,
    }
}

/// Fisher–Yates over the occupied slots; colors travel with their blocks,
/// so the color multiset is untouched.
fn permute_positions(board: &mut Board, rng: &mut SessionRng) {
    let slots: Vec<GridPosition> = board.active_blocks().map(|block| block.position).collect();

    for i in (1..slots.len()).rev() {
        let j = rng.random_index(i + 1);
        board.swap_positions(slots[i], slots[j]);
    }
}

/// Recolors one random block to the color of its first active
/// 4-neighbor, guaranteeing a 2-group at that spot. A block with no
/// active neighbor (sparse boards) leaves the attempt unforced.
fn force_candidate_pair(board: &mut Board, rng: &mut SessionRng) {
    let occupied: Vec<GridPosition> = board.active_blocks().map(|block| block.position).collect();
    if occupied.len() < 2 {
        return;
    }

    let anchor = occupied[rng.random_index(occupied.len())];
    if let Some(color) = adjacent_active_color(board, anchor)
        && let Some(block) = board.get_mut(anchor)
    {
        block.color = color;
    }
}

fn adjacent_active_color(board: &Board, position: GridPosition) -> Option<u8> {
    for (d_row, d_column) in DIRECTIONS {
        let row = position.row as i32 + d_row;
        let column = position.column as i32 + d_column;
        if !board.is_valid_position(row, column) {
            continue;
        }
        if let Some(block) = board.get(GridPosition::new(row as usize, column as usize)) {
            return Some(block.color);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn color_counts(board: &Board) -> HashMap<u8, usize> {
        let mut counts = HashMap::new();
        for block in board.active_blocks() {
            *counts.entry(block.color).or_insert(0) += 1;
        }
        counts
    }

    fn checkerboard(rows: usize, columns: usize) -> Board {
        let colors: Vec<Option<u8>> = (0..rows * columns)
            .map(|index| {
                let row = index / columns;
                let column = index % columns;
                Some(((row + column) % 2) as u8)
            })
            .collect();
        Board::from_colors(columns, &colors)
    }

    #[test]
    fn test_shuffle_resolves_checkerboard_deadlock() {
        for seed in 0..50u64 {
            let mut board = checkerboard(5, 5);
            let mut finder = GroupFinder::new();
            let mut rng = SessionRng::new(seed);
            assert!(deadlock::is_deadlocked(&board, &mut finder, 2));

            let result = shuffle_until_solvable(&mut board, &mut finder, 2, 100, &mut rng);

            assert!(result.solved, "seed {seed}: shuffle failed");
            assert!(!deadlock::is_deadlocked(&board, &mut finder, 2));
        }
    }

    #[test]
    fn test_shuffle_conserves_colors_up_to_one_recolor() {
        let mut board = checkerboard(5, 5);
        let mut finder = GroupFinder::new();
        let mut rng = SessionRng::new(3);
        let before = color_counts(&board);
        let total_before: usize = before.values().sum();

        let result = shuffle_until_solvable(&mut board, &mut finder, 2, 1, &mut rng);
        assert_eq!(result.attempts, 1);

        let after = color_counts(&board);
        let total_after: usize = after.values().sum();
        assert_eq!(total_before, total_after);

        // A single attempt recolors at most one block: per-color counts
        // drift by at most 1.
        let mut drift = 0usize;
        for color in 0..2u8 {
            let b = before.get(&color).copied().unwrap_or(0);
            let a = after.get(&color).copied().unwrap_or(0);
            drift += b.abs_diff(a);
        }
        assert!(drift <= 2, "one recolor moves at most one block between colors");
    }

    #[test]
    fn test_shuffle_reports_exhaustion_on_unsolvable_board() {
        // Two blocks of different colors, minimum match 3: no permutation
        // or single recolor of these two can produce a 3-group... the
        // recolor makes a 2-group at best.
        #[rustfmt::skip]
        let mut board = Board::from_colors(2, &[
            Some(0), Some(1),
        ]);
        let mut finder = GroupFinder::new();
        let mut rng = SessionRng::new(8);

        let result = shuffle_until_solvable(&mut board, &mut finder, 3, 25, &mut rng);

        assert!(!result.solved);
        assert_eq!(result.attempts, 25);
        assert!(deadlock::is_deadlocked(&board, &mut finder, 3));
    }

    #[test]
    fn test_shuffle_keeps_board_consistent() {
        let mut board = checkerboard(6, 4);
        let mut finder = GroupFinder::new();
        let mut rng = SessionRng::new(21);

        shuffle_until_solvable(&mut board, &mut finder, 2, 100, &mut rng);

        for row in 0..6 {
            for column in 0..4 {
                let position = GridPosition::new(row, column);
                let block = board.get(position).unwrap();
                assert!(block.active);
                assert_eq!(block.position, position);
            }
        }
    }

    #[test]
    fn test_shuffle_only_touches_active_slots() {
        // Sparse board: empty slots must stay empty through the shuffle.
        #[rustfmt::skip]
        let mut board = Board::from_colors(3, &[
            Some(0), None,    Some(1),
            None,    Some(0), None,
            Some(1), None,    Some(0),
        ]);
        let mut finder = GroupFinder::new();
        let mut rng = SessionRng::new(4);

        shuffle_until_solvable(&mut board, &mut finder, 2, 100, &mut rng);

        assert_eq!(board.active_count(), 5);
        for position in [
            GridPosition::new(0, 1),
            GridPosition::new(1, 0),
            GridPosition::new(1, 2),
            GridPosition::new(2, 1),
        ] {
            assert!(board.get(position).is_none());
        }
    }

    #[test]
    fn test_placements_cover_every_active_block() {
        let mut board = checkerboard(4, 4);
        let mut finder = GroupFinder::new();
        let mut rng = SessionRng::new(17);

        let result = shuffle_until_solvable(&mut board, &mut finder, 2, 100, &mut rng);

        assert_eq!(result.placements.len(), 16);
        for placement in &result.placements {
            let block = board.get(placement.position).unwrap();
            assert_eq!(block.color, placement.color);
        }
    }
}
