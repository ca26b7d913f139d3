use serde::{Deserialize, Serialize};

use crate::types::IconTier;

/// One color's sprite keys: a default plus up to three group-size tiers.
/// A missing tier falls back to the highest populated tier below it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub id: u8,
    pub default_sprite: String,
    pub tier1_sprite: Option<String>,
    pub tier2_sprite: Option<String>,
    pub tier3_sprite: Option<String>,
}

impl ColorSpec {
    pub fn numbered(id: u8) -> Self {
        Self {
            id,
            default_sprite: format!("block_{id}"),
            tier1_sprite: Some(format!("block_{id}_icon1")),
            tier2_sprite: Some(format!("block_{id}_icon2")),
            tier3_sprite: Some(format!("block_{id}_icon3")),
        }
    }

    pub fn sprite_for(&self, tier: IconTier) -> &str {
        if let Some(sprite) = &self.tier3_sprite
            && tier >= IconTier::Tier3
        {
            return sprite;
        }
        if let Some(sprite) = &self.tier2_sprite
            && tier >= IconTier::Tier2
        {
            return sprite;
        }
        if let Some(sprite) = &self.tier1_sprite
            && tier >= IconTier::Tier1
        {
            return sprite;
        }
        &self.default_sprite
    }
}

/// Owned, immutable color table. Ids are validated against their index at
/// construction so runtime lookups never see an out-of-range id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    colors: Vec<ColorSpec>,
}

impl ColorPalette {
    pub fn new(colors: Vec<ColorSpec>) -> Result<Self, String> {
        if colors.is_empty() {
            return Err("Palette must contain at least one color".to_string());
        }
        for (index, color) in colors.iter().enumerate() {
            if color.id as usize != index {
                return Err(format!(
                    "Palette color id {} does not match its index {}",
                    color.id, index
                ));
            }
        }
        Ok(Self { colors })
    }

    pub fn with_color_count(count: u8) -> Self {
        let colors = (0..count).map(ColorSpec::numbered).collect();
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Checked once at board construction, so `spec` can index directly.
    pub fn validate_for(&self, number_of_colors: u8) -> Result<(), String> {
        if self.len() < number_of_colors as usize {
            return Err(format!(
                "Palette has {} colors but the board needs {}",
                self.len(),
                number_of_colors
            ));
        }
        Ok(())
    }

    pub fn spec(&self, color: u8) -> &ColorSpec {
        debug_assert!((color as usize) < self.colors.len(), "color id out of palette range");
        &self.colors[color as usize]
    }
}
