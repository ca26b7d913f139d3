use std::collections::{HashSet, VecDeque};

use crate::board::Board;
use crate::types::GridPosition;

/// 4-neighborhood offsets: up, down, left, right. Fixed order keeps
/// traversal (and therefore member order) reproducible.
pub const DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Breadth-first flood fill over same-colored active blocks. One finder
/// is shared by selection, icon refresh, and deadlock scans; its buffers
/// are reused across queries instead of reallocated per cell.
pub struct GroupFinder {
    queue: VecDeque<GridPosition>,
    visited: HashSet<GridPosition>,
    members: Vec<GridPosition>,
}

impl GroupFinder {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::with_capacity(100),
            visited: HashSet::with_capacity(100),
            members: Vec::with_capacity(100),
        }
    }

    /// Maximal 4-connected set of active blocks of `target_color`
    /// reachable from `start`. An out-of-bounds, empty, or
    /// color-mismatched start yields an empty slice.
    pub fn find_group(
        &mut self,
        board: &Board,
        start: GridPosition,
        target_color: u8,
    ) -> &[GridPosition] {
        self.queue.clear();
        self.visited.clear();
        self.members.clear();

        if start.row >= board.rows() || start.column >= board.columns() {
            return &self.members;
        }

        self.queue.push_back(start);
        self.visited.insert(start);

        while let Some(current) = self.queue.pop_front() {
            let matches = match board.get(current) {
                Some(block) => block.active && block.color == target_color,
                None => false,
            };
            if !matches {
                continue;
            }
            self.members.push(current);

            for (d_row, d_column) in DIRECTIONS {
                let row = current.row as i32 + d_row;
                let column = current.column as i32 + d_column;
                if !board.is_valid_position(row, column) {
                    continue;
                }
                let neighbor = GridPosition::new(row as usize, column as usize);
                if self.visited.insert(neighbor) {
                    self.queue.push_back(neighbor);
                }
            }
        }

        &self.members
    }
}

impl Default for GroupFinder {
    fn default() -> Self {
        Self::new()
    }
}
