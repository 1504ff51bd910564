use serde::{Deserialize, Serialize};

use crate::config::FieldConfig;

/// Available preset types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresetType {
    /// Full-bleed page backdrop: sparse grid, larger dots
    Hero,
    /// Framed callout panel: dense grid, brighter dots
    Beacon,
    /// Custom user configuration
    Custom,
}

impl Default for PresetType {
    fn default() -> Self {
        Self::Hero
    }
}

impl PresetType {
    pub fn all() -> Vec<PresetType> {
        vec![Self::Hero, Self::Beacon, Self::Custom]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Hero => "Hero",
            Self::Beacon => "Beacon",
            Self::Custom => "Custom",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Hero => "Sparse, larger dots for full-bleed hero backdrops",
            Self::Beacon => "Dense, brighter dots for framed callout panels",
            Self::Custom => "Custom user configuration",
        }
    }

    /// Constant set for this preset. `Custom` starts from the defaults and
    /// is then edited live in the settings panel.
    pub fn field_config(&self) -> FieldConfig {
        match self {
            Self::Hero => FieldConfig::hero(),
            Self::Beacon | Self::Custom => FieldConfig::beacon(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_carry_their_constant_sets() {
        let hero = PresetType::Hero.field_config();
        assert_eq!(hero.spacing, 40.0);
        assert_eq!(hero.opacity_min, 0.15);
        assert_eq!(hero.opacity_max, 0.30);
        assert_eq!(hero.base_radius, 1.5);
        assert_eq!(hero.radius_boost, 2.0);

        let beacon = PresetType::Beacon.field_config();
        assert_eq!(beacon.spacing, 30.0);
        assert_eq!(beacon.opacity_min, 0.25);
        assert_eq!(beacon.opacity_max, 0.40);
        assert_eq!(beacon.base_radius, 1.0);
        assert_eq!(beacon.radius_boost, 2.5);

        // Shared constants across both page variants.
        for config in [&hero, &beacon] {
            assert_eq!(config.interaction_radius, 150.0);
            assert_eq!(config.opacity_boost, 0.6);
        }
    }

    #[test]
    fn preset_names_are_unique() {
        let names: Vec<&str> = PresetType::all().iter().map(|p| p.name()).collect();
        let mut deduped = names.clone();
        deduped.dedup();
        assert_eq!(names, deduped);
    }
}
