//! Configuration System for Dot Field RS
//! Field constants, color handling, and on-disk persistence

use serde::{Deserialize, Serialize};

// ============================================================================
// Colors
// ============================================================================

/// Fallback dot color used when a configured color string fails to parse.
pub const DEFAULT_DOT_COLOR: [u8; 3] = [96, 164, 250];

/// Parse a CSS-style `rgb(...)` / `rgba(...)` string into an RGB triple.
///
/// The alpha channel is ignored: dot opacity is animated per frame, so only
/// the base triple matters. Returns `None` for anything unrecognizable.
pub fn parse_rgba(value: &str) -> Option<[u8; 3]> {
    let value = value.trim();
    let body = value
        .strip_prefix("rgba")
        .or_else(|| value.strip_prefix("rgb"))?
        .trim();
    let body = body.strip_prefix('(')?.strip_suffix(')')?;

    let mut channels = body.split(',').map(str::trim);
    let mut triple = [0u8; 3];
    for slot in &mut triple {
        *slot = channels.next()?.parse::<u8>().ok()?;
    }
    // Optional alpha: must at least look like a number if present.
    if let Some(alpha) = channels.next() {
        alpha.parse::<f32>().ok()?;
    }
    if channels.next().is_some() {
        return None;
    }
    Some(triple)
}

// ============================================================================
// Field Configuration
// ============================================================================

/// Constants describing one dot field instance.
///
/// Everything here is serializable so whole setups can be saved and
/// restored; the engine reads it as plain data and never mutates it.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct FieldConfig {
    /// Grid pitch between dot sites, in surface pixels.
    pub spacing: f32,
    /// Lower bound of the opacity oscillation.
    pub opacity_min: f32,
    /// Upper bound of the opacity oscillation.
    pub opacity_max: f32,
    /// Minimum render radius of a dot.
    pub base_radius: f32,
    /// Maximum pointer distance at which a dot reacts.
    pub interaction_radius: f32,
    /// Opacity added at full interaction strength.
    pub opacity_boost: f32,
    /// Radius added at full interaction strength.
    pub radius_boost: f32,
    /// Layout jitter as a fraction of `spacing` (0 = rigid lattice).
    pub jitter: f32,
    /// Dot color as a CSS-style string; parsed defensively at rebuild.
    pub base_color: String,
    /// Backdrop fill painted by the host behind the dots.
    pub background: [u8; 3],
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::beacon()
    }
}

impl FieldConfig {
    /// Sparse, larger dots for full-bleed hero backdrops.
    pub fn hero() -> Self {
        Self {
            spacing: 40.0,
            opacity_min: 0.15,
            opacity_max: 0.30,
            base_radius: 1.5,
            interaction_radius: 150.0,
            opacity_boost: 0.6,
            radius_boost: 2.0,
            jitter: 0.3,
            base_color: "rgba(96, 164, 250, 0.30)".to_string(),
            background: [13, 13, 13],
        }
    }

    /// Dense, brighter dots for framed callout panels.
    pub fn beacon() -> Self {
        Self {
            spacing: 30.0,
            opacity_min: 0.25,
            opacity_max: 0.40,
            base_radius: 1.0,
            interaction_radius: 150.0,
            opacity_boost: 0.6,
            radius_boost: 2.5,
            jitter: 0.3,
            base_color: "rgba(96, 164, 250, 0.40)".to_string(),
            background: [26, 26, 26],
        }
    }

    /// Spatial index cell edge, derived from the interaction radius.
    pub fn cell_size(&self) -> f32 {
        (self.interaction_radius / 1.5).floor().max(50.0)
    }

    /// Resolved dot color; malformed strings fall back to the stock blue.
    pub fn color(&self) -> [u8; 3] {
        parse_rgba(&self.base_color).unwrap_or(DEFAULT_DOT_COLOR)
    }
}

// ============================================================================
// Main App Configuration
// ============================================================================

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct AppConfig {
    pub hero: FieldConfig,
    pub beacon: FieldConfig,
    #[serde(default)]
    pub show_fps: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hero: FieldConfig::hero(),
            beacon: FieldConfig::beacon(),
            show_fps: true,
        }
    }
}

impl AppConfig {
    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgba_with_alpha() {
        assert_eq!(
            parse_rgba("rgba(96, 164, 250, 0.40)"),
            Some([96, 164, 250])
        );
    }

    #[test]
    fn parses_rgb_without_alpha() {
        assert_eq!(parse_rgba("rgb(255, 0, 10)"), Some([255, 0, 10]));
    }

    #[test]
    fn rejects_malformed_color_strings() {
        assert_eq!(parse_rgba("hsl(120, 50%, 50%)"), None);
        assert_eq!(parse_rgba("rgba(96, 164)"), None);
        assert_eq!(parse_rgba("rgba(96, 164, 250, 0.4, 9)"), None);
        assert_eq!(parse_rgba("rgba(300, 0, 0)"), None);
        assert_eq!(parse_rgba(""), None);
    }

    #[test]
    fn malformed_color_falls_back_to_default() {
        let config = FieldConfig {
            base_color: "not-a-color".to_string(),
            ..FieldConfig::default()
        };
        assert_eq!(config.color(), DEFAULT_DOT_COLOR);
    }

    #[test]
    fn cell_size_is_derived_from_interaction_radius() {
        let config = FieldConfig::default();
        assert_eq!(config.interaction_radius, 150.0);
        assert_eq!(config.cell_size(), 100.0);

        let tight = FieldConfig {
            interaction_radius: 60.0,
            ..FieldConfig::default()
        };
        // Never smaller than 50 px, regardless of the radius.
        assert_eq!(tight.cell_size(), 50.0);
    }

    #[test]
    fn app_config_round_trips_through_json() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hero, config.hero);
        assert_eq!(back.beacon, config.beacon);
    }
}
