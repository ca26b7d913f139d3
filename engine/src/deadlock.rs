use crate::board::Board;
use crate::flood::GroupFinder;
use crate::types::GridPosition;

/// First position whose group reaches `minimum_match_size`, scanning
/// bottom-up, left to right. Doubles as a hint source for drivers.
pub fn find_any_move(
    board: &Board,
    finder: &mut GroupFinder,
    minimum_match_size: usize,
) -> Option<GridPosition> {
    for row in 0..board.rows() {
        for column in 0..board.columns() {
            let position = GridPosition::new(row, column);
            let Some(block) = board.get(position) else {
                continue;
            };
            let group = finder.find_group(board, position, block.color);
            if group.len() >= minimum_match_size {
                return Some(position);
            }
        }
    }
    None
}

pub fn is_deadlocked(board: &Board, finder: &mut GroupFinder, minimum_match_size: usize) -> bool {
    find_any_move(board, finder, minimum_match_size).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard_is_deadlocked() {
        // No two same-colored blocks adjacent anywhere.
        #[rustfmt::skip]
        let board = Board::from_colors(4, &[
            Some(0), Some(1), Some(0), Some(1),
            Some(1), Some(0), Some(1), Some(0),
            Some(0), Some(1), Some(0), Some(1),
        ]);
        let mut finder = GroupFinder::new();

        assert!(is_deadlocked(&board, &mut finder, 2));
    }

    #[test]
    fn test_one_recolor_breaks_the_deadlock() {
        #[rustfmt::skip]
        let mut board = Board::from_colors(4, &[
            Some(0), Some(1), Some(0), Some(1),
            Some(1), Some(0), Some(1), Some(0),
            Some(0), Some(1), Some(0), Some(1),
        ]);
        let mut finder = GroupFinder::new();
        assert!(is_deadlocked(&board, &mut finder, 2));

        // Flip one block to match its right neighbor.
        board.get_mut(GridPosition::new(0, 0)).unwrap().color = 1;

        assert!(!is_deadlocked(&board, &mut finder, 2));
    }

    #[test]
    fn test_find_any_move_returns_a_matchable_position() {
        #[rustfmt::skip]
        let board = Board::from_colors(3, &[
            Some(0), Some(1), Some(2),
            Some(1), Some(2), Some(2),
        ]);
        let mut finder = GroupFinder::new();

        let position = find_any_move(&board, &mut finder, 2).unwrap();
        let block = board.get(position).unwrap();
        let group = finder.find_group(&board, position, block.color);

        assert!(group.len() >= 2);
    }

    #[test]
    fn test_minimum_match_size_above_largest_group() {
        #[rustfmt::skip]
        let board = Board::from_colors(2, &[
            Some(0), Some(0),
            Some(1), Some(2),
        ]);
        let mut finder = GroupFinder::new();

        assert!(!is_deadlocked(&board, &mut finder, 2));
        assert!(is_deadlocked(&board, &mut finder, 3));
    }

    #[test]
    fn test_empty_board_is_deadlocked() {
        let board = Board::from_colors(3, &[None; 9]);
        let mut finder = GroupFinder::new();

        assert!(is_deadlocked(&board, &mut finder, 2));
    }
}
