use serde::{Deserialize, Serialize};

use crate::icons::IconThresholds;
use crate::scoring::ScoreTable;

pub const MIN_BOARD_SIDE: usize = 2;
pub const MAX_BOARD_SIDE: usize = 10;
pub const MIN_COLORS: u8 = 1;
pub const MAX_COLORS: u8 = 6;
pub const MIN_MATCH_SIZE: usize = 2;
pub const MAX_MATCH_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub rows: usize,
    pub columns: usize,
    pub number_of_colors: u8,
    pub minimum_match_size: usize,
    pub threshold_a: usize,
    pub threshold_b: usize,
    pub threshold_c: usize,
    pub enable_shuffle: bool,
    pub max_shuffle_attempts: u32,
    pub moves_per_level: u32,
    pub target_score: u32,
    pub target_score_increment: u32,
    pub score: ScoreTable,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            rows: 8,
            columns: 8,
            number_of_colors: 5,
            minimum_match_size: 2,
            threshold_a: 5,
            threshold_b: 10,
            threshold_c: 15,
            enable_shuffle: true,
            max_shuffle_attempts: 100,
            moves_per_level: 20,
            target_score: 500,
            target_score_increment: 300,
            score: ScoreTable::default(),
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&self.rows) {
            return Err(format!(
                "Rows must be between {} and {}",
                MIN_BOARD_SIDE, MAX_BOARD_SIDE
            ));
        }
        if !(MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&self.columns) {
            return Err(format!(
                "Columns must be between {} and {}",
                MIN_BOARD_SIDE, MAX_BOARD_SIDE
            ));
        }
        if !(MIN_COLORS..=MAX_COLORS).contains(&self.number_of_colors) {
            return Err(format!(
                "Number of colors must be between {} and {}",
                MIN_COLORS, MAX_COLORS
            ));
        }
        if !(MIN_MATCH_SIZE..=MAX_MATCH_SIZE).contains(&self.minimum_match_size) {
            return Err(format!(
                "Minimum match size must be between {} and {}",
                MIN_MATCH_SIZE, MAX_MATCH_SIZE
            ));
        }
        if self.max_shuffle_attempts < 1 {
            return Err("Max shuffle attempts must be at least 1".to_string());
        }
        let needed = self.number_of_colors as usize * 2;
        if self.total_cells() < needed {
            return Err(format!(
                "Grid too small ({}x{}) for {} colors, need at least {} cells",
                self.rows, self.columns, self.number_of_colors, needed
            ));
        }
        self.score.validate()?;
        Ok(())
    }

    /// Repairs the repairable before `validate`: non-ascending icon
    /// thresholds are bumped upward, the lower bounds on match size and
    /// shuffle attempts are enforced.
    pub fn normalized(&self) -> Self {
        let mut settings = self.clone();
        if settings.threshold_b <= settings.threshold_a {
            settings.threshold_b = settings.threshold_a + 1;
        }
        if settings.threshold_c <= settings.threshold_b {
            settings.threshold_c = settings.threshold_b + 1;
        }
        settings.minimum_match_size = settings.minimum_match_size.max(MIN_MATCH_SIZE);
        settings.max_shuffle_attempts = settings.max_shuffle_attempts.max(1);
        settings
    }

    pub fn total_cells(&self) -> usize {
        self.rows * self.columns
    }

    pub fn thresholds(&self) -> IconThresholds {
        IconThresholds {
            a: self.threshold_a,
            b: self.threshold_b,
            c: self.threshold_c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(GameSettings::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_board() {
        let settings = GameSettings {
            rows: 1,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = GameSettings {
            columns: 11,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_color_count() {
        let mut settings = GameSettings {
            number_of_colors: 0,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());

        settings.number_of_colors = 7;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_grid_too_small_for_colors() {
        let settings = GameSettings {
            rows: 2,
            columns: 2,
            number_of_colors: 3,
            ..GameSettings::default()
        };
        let error = settings.validate().unwrap_err();
        assert!(error.contains("Grid too small"));
    }

    #[test]
    fn test_normalized_repairs_thresholds() {
        let settings = GameSettings {
            threshold_a: 5,
            threshold_b: 5,
            threshold_c: 4,
            ..GameSettings::default()
        };
        let normalized = settings.normalized();
        assert_eq!(normalized.threshold_a, 5);
        assert_eq!(normalized.threshold_b, 6);
        assert_eq!(normalized.threshold_c, 7);
    }

    #[test]
    fn test_normalized_keeps_ascending_thresholds() {
        let settings = GameSettings::default().normalized();
        assert_eq!(settings.threshold_a, 5);
        assert_eq!(settings.threshold_b, 10);
        assert_eq!(settings.threshold_c, 15);
    }

    #[test]
    fn test_normalized_enforces_lower_bounds() {
        let settings = GameSettings {
            minimum_match_size: 0,
            max_shuffle_attempts: 0,
            ..GameSettings::default()
        };
        let normalized = settings.normalized();
        assert_eq!(normalized.minimum_match_size, 2);
        assert_eq!(normalized.max_shuffle_attempts, 1);
    }

    #[test]
    fn test_yaml_roundtrip_with_partial_file() {
        let yaml = "rows: 6\ncolumns: 5\nnumber_of_colors: 4\n";
        let settings: GameSettings = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(settings.rows, 6);
        assert_eq!(settings.columns, 5);
        assert_eq!(settings.number_of_colors, 4);
        // Unspecified fields keep their defaults.
        assert_eq!(settings.minimum_match_size, 2);
        assert!(settings.enable_shuffle);
        assert!(settings.validate().is_ok());
    }
}
