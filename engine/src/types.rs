use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: usize,
    pub column: usize,
}

impl GridPosition {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Row-major index; injective for any board with `columns` columns.
    pub fn to_index(self, columns: usize) -> usize {
        self.row * columns + self.column
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IconTier {
    #[default]
    Default,
    Tier1,
    Tier2,
    Tier3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub color: u8,
    pub position: GridPosition,
    pub active: bool,
    pub icon: IconTier,
}

impl Block {
    pub fn new(color: u8, position: GridPosition) -> Self {
        Self {
            color,
            position,
            active: true,
            icon: IconTier::Default,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    Fall,
    Spawn,
}

/// One cell's logical relocation during gravity, consumed by fall animation.
/// Spawned cells report a source one row above the top of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMovement {
    pub kind: MovementKind,
    pub from: GridPosition,
    pub to: GridPosition,
    pub color: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalResult {
    pub positions: Vec<GridPosition>,
    pub color: u8,
    pub points: u32,
}

impl RemovalResult {
    pub fn size(&self) -> usize {
        self.positions.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub position: GridPosition,
    pub color: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffleResult {
    pub solved: bool,
    pub attempts: u32,
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GroupRemoved { removal: RemovalResult },
    BlocksFell { movements: Vec<CellMovement> },
    DeadlockDetected,
    BoardShuffled { result: ShuffleResult },
    ShuffleExhausted { attempts: u32 },
    LevelFinished { status: GameStatus, score: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_position_to_index_is_row_major() {
        assert_eq!(GridPosition::new(0, 0).to_index(8), 0);
        assert_eq!(GridPosition::new(0, 7).to_index(8), 7);
        assert_eq!(GridPosition::new(1, 0).to_index(8), 8);
        assert_eq!(GridPosition::new(2, 3).to_index(8), 19);
    }

    #[test]
    fn test_grid_position_to_index_injective_on_wide_board() {
        // Wider than any fixed hash multiplier assumption: no two cells collide.
        let columns = 10;
        let mut seen = std::collections::HashSet::new();
        for row in 0..10 {
            for column in 0..columns {
                assert!(seen.insert(GridPosition::new(row, column).to_index(columns)));
            }
        }
    }

    #[test]
    fn test_icon_tier_ordering() {
        assert!(IconTier::Default < IconTier::Tier1);
        assert!(IconTier::Tier1 < IconTier::Tier2);
        assert!(IconTier::Tier2 < IconTier::Tier3);
    }

    #[test]
    fn test_new_block_is_active_with_default_icon() {
        let block = Block::new(3, GridPosition::new(2, 5));
        assert!(block.active);
        assert_eq!(block.icon, IconTier::Default);
        assert_eq!(block.color, 3);
    }
}
