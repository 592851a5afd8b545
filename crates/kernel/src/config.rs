//! Tunables for the movement controller and scene construction.
//!
//! Defaults reproduce the shipped scene. Files may be YAML (`.yaml`/`.yml`)
//! or JSON (`.json`); any omitted field keeps its default.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::Path;

use crate::aabb::ZOverlapRule;

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0:?} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Per-branch constants used by [`MovementController`](crate::MovementController).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Lateral speed factor; the vehicle moves `2 * fast_sensitivity * dt` per update.
    pub fast_sensitivity: f32,
    /// Candidate X positions beyond ±this are rejected outright.
    pub lateral_limit: f32,
    /// Vehicle box half-extents: `x` on X, `y` on Z.
    pub vehicle_half_extents: Vec2,
    /// Roll applied while turning, in degrees.
    pub bank_angle_degrees: f32,
    /// Celestial spin rate in radians per unit of `dt` (applied as a negative yaw).
    pub moon_angular_rate: f32,
    pub backdrop_step: f32,
    /// Backdrop Z that triggers a wrap. Compared with exact equality.
    pub backdrop_wrap_at: f32,
    pub backdrop_reset_to: f32,
    /// Inner iterations per obstacle update; each advances by `obstacle_step`.
    pub obstacle_substeps: u32,
    pub obstacle_step: f32,
    /// Obstacle Z that triggers recycling. Compared with exact equality.
    pub obstacle_wrap_at: f32,
    pub obstacle_reset_to: f32,
    pub z_overlap: ZOverlapRule,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            fast_sensitivity: 0.01,
            lateral_limit: 30.0,
            vehicle_half_extents: Vec2::new(2.7, 3.8),
            bank_angle_degrees: 30.0,
            moon_angular_rate: PI / 10_000.0,
            backdrop_step: 10.0,
            backdrop_wrap_at: -750.0,
            backdrop_reset_to: -1500.0,
            obstacle_substeps: 10,
            obstacle_step: 1.0,
            obstacle_wrap_at: 10.0,
            obstacle_reset_to: -1000.0,
            z_overlap: ZOverlapRule::AsObserved,
        }
    }
}

impl MovementConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("fast_sensitivity", self.fast_sensitivity),
            ("lateral_limit", self.lateral_limit),
            ("vehicle_half_extents.x", self.vehicle_half_extents.x),
            ("vehicle_half_extents.y", self.vehicle_half_extents.y),
            ("bank_angle_degrees", self.bank_angle_degrees),
            ("moon_angular_rate", self.moon_angular_rate),
            ("backdrop_step", self.backdrop_step),
            ("backdrop_wrap_at", self.backdrop_wrap_at),
            ("backdrop_reset_to", self.backdrop_reset_to),
            ("obstacle_step", self.obstacle_step),
            ("obstacle_wrap_at", self.obstacle_wrap_at),
            ("obstacle_reset_to", self.obstacle_reset_to),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is not finite"),
                });
            }
        }
        if self.lateral_limit <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "lateral_limit",
                reason: format!("{} must be positive", self.lateral_limit),
            });
        }
        if self.vehicle_half_extents.cmple(Vec2::ZERO).any() {
            return Err(ConfigError::Invalid {
                field: "vehicle_half_extents",
                reason: "half-extents must be positive".into(),
            });
        }
        if self.obstacle_substeps == 0 {
            return Err(ConfigError::Invalid {
                field: "obstacle_substeps",
                reason: "at least one substep is required".into(),
            });
        }
        Ok(())
    }
}

/// Scene construction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for skyscraper placement. Same seed, same scene.
    pub seed: u64,
    pub skyscraper_count: usize,
    pub movement: MovementConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            skyscraper_count: 9,
            movement: MovementConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Load and validate a config file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = std::fs::read_to_string(path)?;
        let config: Self = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&text)?,
            "json" => serde_json::from_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(ext)),
        };
        config.validate()?;
        tracing::debug!(path = %path.display(), seed = config.seed, "loaded scene config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.movement.validate()
    }
}
