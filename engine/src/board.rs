use crate::session_rng::SessionRng;
use crate::types::{Block, CellMovement, GridPosition, MovementKind};

/// Row-major grid of blocks, row 0 at the bottom. Every occupied slot
/// holds an active block whose stored position equals the slot; that
/// consistency is re-checked after each mutation in debug builds.
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Option<Block>>,
}

impl Board {
    pub fn generate(
        rows: usize,
        columns: usize,
        number_of_colors: u8,
        rng: &mut SessionRng,
    ) -> Self {
        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                let color = rng.random_color(number_of_colors);
                cells.push(Some(Block::new(color, GridPosition::new(row, column))));
            }
        }
        let board = Self {
            rows,
            columns,
            cells,
        };
        board.debug_check_consistency();
        board
    }

    /// Builds a board from per-slot colors, row 0 (bottom row) first.
    /// `None` leaves the slot empty.
    #[cfg(test)]
    pub fn from_colors(columns: usize, colors: &[Option<u8>]) -> Self {
        assert_eq!(colors.len() % columns, 0);
        let rows = colors.len() / columns;
        let cells = colors
            .iter()
            .enumerate()
            .map(|(index, color)| {
                color.map(|color| {
                    Block::new(color, GridPosition::new(index / columns, index % columns))
                })
            })
            .collect();
        let board = Self {
            rows,
            columns,
            cells,
        };
        board.debug_check_consistency();
        board
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_valid_position(&self, row: i32, column: i32) -> bool {
        row >= 0 && row < self.rows as i32 && column >= 0 && column < self.columns as i32
    }

    fn index(&self, position: GridPosition) -> usize {
        position.to_index(self.columns)
    }

    pub fn get(&self, position: GridPosition) -> Option<&Block> {
        if position.row >= self.rows || position.column >= self.columns {
            return None;
        }
        self.cells[self.index(position)].as_ref()
    }

    pub fn get_mut(&mut self, position: GridPosition) -> Option<&mut Block> {
        if position.row >= self.rows || position.column >= self.columns {
            return None;
        }
        let index = self.index(position);
        self.cells[index].as_mut()
    }

    pub fn active_blocks(&self) -> impl Iterator<Item = &Block> {
        self.cells.iter().flatten()
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Clears all listed slots as one indivisible step and hands the
    /// deactivated blocks back for pooling/animation.
    pub fn remove_group(&mut self, positions: &[GridPosition]) -> Vec<Block> {
        let mut removed = Vec::with_capacity(positions.len());
        for &position in positions {
            let index = self.index(position);
            if let Some(mut block) = self.cells[index].take() {
                block.active = false;
                removed.push(block);
            }
        }
        self.debug_check_consistency();
        removed
    }

    /// Per column: stable downward compaction of surviving blocks, then
    /// fresh random blocks in the rows left empty on top. Spawned
    /// movements report a source one row above the grid.
    pub fn apply_gravity(
        &mut self,
        number_of_colors: u8,
        rng: &mut SessionRng,
    ) -> Vec<CellMovement> {
        let mut movements = Vec::new();

        for column in 0..self.columns {
            let mut empty_row = 0;

            for row in 0..self.rows {
                let from_index = row * self.columns + column;
                if let Some(mut block) = self.cells[from_index].take() {
                    if empty_row != row {
                        let to = GridPosition::new(empty_row, column);
                        movements.push(CellMovement {
                            kind: MovementKind::Fall,
                            from: block.position,
                            to,
                            color: block.color,
                        });
                        block.position = to;
                    }
                    self.cells[empty_row * self.columns + column] = Some(block);
                    empty_row += 1;
                }
            }

            for row in empty_row..self.rows {
                let color = rng.random_color(number_of_colors);
                let to = GridPosition::new(row, column);
                movements.push(CellMovement {
                    kind: MovementKind::Spawn,
                    from: GridPosition::new(self.rows, column),
                    to,
                    color,
                });
                self.cells[row * self.columns + column] = Some(Block::new(color, to));
            }
        }

        self.debug_check_consistency();
        movements
    }

    /// Swaps the contents of two slots, keeping stored positions in sync.
    pub fn swap_positions(&mut self, a: GridPosition, b: GridPosition) {
        let index_a = self.index(a);
        let index_b = self.index(b);
        self.cells.swap(index_a, index_b);
        if let Some(block) = &mut self.cells[index_a] {
            block.position = a;
        }
        if let Some(block) = &mut self.cells[index_b] {
            block.position = b;
        }
    }

    fn debug_check_consistency(&self) {
        if cfg!(debug_assertions) {
            for row in 0..self.rows {
                for column in 0..self.columns {
                    let position = GridPosition::new(row, column);
                    if let Some(block) = &self.cells[self.index(position)] {
                        debug_assert!(block.active, "inactive block stored at {position:?}");
                        debug_assert_eq!(
                            block.position, position,
                            "block position desynced from its slot"
                        );
                    }
                }
            }
        }
    }
}
