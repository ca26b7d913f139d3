use serde::{Deserialize, Serialize};

pub const DEFAULT_POINTS_PER_BLOCK: u32 = 10;
pub const DEFAULT_BONUS_THRESHOLDS: [usize; 4] = [5, 10, 15, 20];
pub const DEFAULT_BONUS_POINTS: [u32; 4] = [50, 100, 200, 500];

/// Per-group score: `size * points_per_block` plus the bonus of the
/// highest reached threshold. Parallel threshold/points arrays, the
/// thresholds strictly ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTable {
    pub points_per_block: u32,
    pub bonus_thresholds: Vec<usize>,
    pub bonus_points: Vec<u32>,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            points_per_block: DEFAULT_POINTS_PER_BLOCK,
            bonus_thresholds: DEFAULT_BONUS_THRESHOLDS.to_vec(),
            bonus_points: DEFAULT_BONUS_POINTS.to_vec(),
        }
    }
}

impl ScoreTable {
    pub fn validate(&self) -> Result<(), String> {
        if self.bonus_thresholds.len() != self.bonus_points.len() {
            return Err(format!(
                "Bonus thresholds ({}) and bonus points ({}) must have the same length",
                self.bonus_thresholds.len(),
                self.bonus_points.len()
            ));
        }
        if !self.bonus_thresholds.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err("Bonus thresholds must be strictly ascending".to_string());
        }
        Ok(())
    }

    pub fn bonus_for_group(&self, group_size: usize) -> u32 {
        for i in (0..self.bonus_thresholds.len()).rev() {
            if group_size >= self.bonus_thresholds[i] {
                return self.bonus_points[i];
            }
        }
        0
    }

    pub fn score_for_group(&self, group_size: usize) -> u32 {
        group_size as u32 * self.points_per_block + self.bonus_for_group(group_size)
    }
}
