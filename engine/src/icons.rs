use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::flood::GroupFinder;
use crate::types::{GridPosition, IconTier};

/// Strictly ascending group-size thresholds for the three icon tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconThresholds {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

/// Highest exceeded threshold wins; sizes at a threshold stay below it.
pub fn tier_for_group_size(group_size: usize, thresholds: IconThresholds) -> IconTier {
    if group_size > thresholds.c {
        IconTier::Tier3
    } else if group_size > thresholds.b {
        IconTier::Tier2
    } else if group_size > thresholds.a {
        IconTier::Tier1
    } else {
        IconTier::Default
    }
}

/// Recomputes every active block's tier, flood-filling each connected
/// component once and sharing the size across its members.
pub struct IconRefresher {
    group_sizes: HashMap<GridPosition, usize>,
}

impl IconRefresher {
    pub fn new() -> Self {
        Self {
            group_sizes: HashMap::with_capacity(100),
        }
    }

    pub fn refresh(
        &mut self,
        board: &mut Board,
        finder: &mut GroupFinder,
        thresholds: IconThresholds,
    ) {
        self.group_sizes.clear();

        for row in 0..board.rows() {
            for column in 0..board.columns() {
                let position = GridPosition::new(row, column);
                let Some(block) = board.get(position) else {
                    continue;
                };
                let color = block.color;

                if !self.group_sizes.contains_key(&position) {
                    let group = finder.find_group(board, position, color);
                    let size = group.len();
                    for &member in group {
                        self.group_sizes.insert(member, size);
                    }
                }

                let tier = tier_for_group_size(self.group_sizes[&position], thresholds);
                if let Some(block) = board.get_mut(position) {
                    block.icon = tier;
                }
            }
        }
    }
}

impl Default for IconRefresher {
    fn default() -> Self {
        Self::new()
    }
}
