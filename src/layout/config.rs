use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

pub const DEFAULT_FLOOR_HEIGHT: f64 = 3.0;
pub const DEFAULT_BUILDING_WIDTH: f64 = 14.0;
pub const DEFAULT_BUILDING_DEPTH: f64 = 12.0;
pub const DEFAULT_MARGIN: f64 = 1.0;

/// Geometry knobs for projecting a building graph into scene space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionConfig {
    /// Vertical spacing between consecutive floor levels.
    pub floor_height: f64,
    /// Footprint extent along `x`.
    pub building_width: f64,
    /// Footprint extent along `z`.
    pub building_depth: f64,
    /// Inset from every footprint edge before the grid is laid out.
    pub margin: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            floor_height: DEFAULT_FLOOR_HEIGHT,
            building_width: DEFAULT_BUILDING_WIDTH,
            building_depth: DEFAULT_BUILDING_DEPTH,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl ProjectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_floor_height(mut self, floor_height: f64) -> Self {
        self.floor_height = floor_height;
        self
    }

    pub fn with_building_width(mut self, building_width: f64) -> Self {
        self.building_width = building_width;
        self
    }

    pub fn with_building_depth(mut self, building_depth: f64) -> Self {
        self.building_depth = building_depth;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Apply every field that is set in `overrides`, keeping the rest.
    pub fn with_overrides(self, overrides: ConfigOverrides) -> Self {
        Self {
            floor_height: overrides.floor_height.unwrap_or(self.floor_height),
            building_width: overrides.building_width.unwrap_or(self.building_width),
            building_depth: overrides.building_depth.unwrap_or(self.building_depth),
            margin: overrides.margin.unwrap_or(self.margin),
        }
    }

    /// Defaults overlaid with a JSON object of optional fields.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let overrides: ConfigOverrides = serde_json::from_str(input)?;
        Ok(Self::default().with_overrides(overrides))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Usable width once the margin is removed from both sides.
    pub fn inner_width(&self) -> f64 {
        self.building_width - 2.0 * self.margin
    }

    /// Usable depth once the margin is removed from both sides.
    pub fn inner_depth(&self) -> f64 {
        self.building_depth - 2.0 * self.margin
    }

    /// Reject geometry that would produce non-positive cell sizes.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (field, value) in [
            ("floorHeight", self.floor_height),
            ("buildingWidth", self.building_width),
            ("buildingDepth", self.building_depth),
            ("margin", self.margin),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        if self.building_width <= 2.0 * self.margin {
            return Err(ConfigError::DegenerateWidth {
                width: self.building_width,
                margin: self.margin,
            });
        }
        if self.building_depth <= 2.0 * self.margin {
            return Err(ConfigError::DegenerateDepth {
                depth: self.building_depth,
                margin: self.margin,
            });
        }
        Ok(())
    }
}

/// Partial configuration; unset fields fall back to the base config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default, alias = "floor_height", skip_serializing_if = "Option::is_none")]
    pub floor_height: Option<f64>,
    #[serde(default, alias = "building_width", skip_serializing_if = "Option::is_none")]
    pub building_width: Option<f64>,
    #[serde(default, alias = "building_depth", skip_serializing_if = "Option::is_none")]
    pub building_depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<f64>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;

    #[test]
    fn defaults_match_reference_building() {
        let config = ProjectionConfig::default();
        assert_eq!(config.floor_height, 3.0);
        assert_eq!(config.building_width, 14.0);
        assert_eq!(config.building_depth, 12.0);
        assert_eq!(config.margin, 1.0);
        assert_eq!(config.inner_width(), 12.0);
        assert_eq!(config.inner_depth(), 10.0);
    }

    #[test]
    fn partial_json_keeps_unset_defaults() {
        let config = ProjectionConfig::from_json_str(r#"{"floorHeight": 4.5}"#).unwrap();
        assert_eq!(config.floor_height, 4.5);
        assert_eq!(config.building_width, DEFAULT_BUILDING_WIDTH);
        assert_eq!(config.margin, DEFAULT_MARGIN);
    }

    #[test]
    fn snake_case_aliases_are_accepted() {
        let config =
            ProjectionConfig::from_json_str(r#"{"building_width": 20, "margin": 2}"#).unwrap();
        assert_eq!(config.building_width, 20.0);
        assert_eq!(config.margin, 2.0);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = ProjectionConfig::from_json_str(r#"{"wallColor": "red"}"#).unwrap_err();
        assert!(matches!(err, LayoutError::Json(_)));
    }

    #[test]
    fn width_equal_to_margins_is_degenerate() {
        let config = ProjectionConfig::default()
            .with_building_width(2.0)
            .with_margin(1.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::DegenerateWidth {
                width: 2.0,
                margin: 1.0
            })
        );
    }

    #[test]
    fn depth_below_margins_is_degenerate() {
        let config = ProjectionConfig::default().with_building_depth(1.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DegenerateDepth { .. })
        ));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let config = ProjectionConfig::default().with_floor_height(f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "floorHeight",
                ..
            })
        ));
    }

    #[test]
    fn empty_overrides_are_identity() {
        let overrides = ConfigOverrides::default();
        assert!(overrides.is_empty());
        assert_eq!(
            ProjectionConfig::default().with_overrides(overrides),
            ProjectionConfig::default()
        );
    }
}
