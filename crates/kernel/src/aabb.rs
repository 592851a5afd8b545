use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// How the Z intervals of the vehicle and an obstacle are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZOverlapRule {
    /// `vehicle.z_max <= obstacle.z_min && vehicle.z_min > obstacle.z_min`.
    ///
    /// Both clauses compare against the obstacle's near edge, so a hit only
    /// registers while that edge lies inside the vehicle's Z span.
    #[default]
    AsObserved,
    /// `vehicle.z_max <= obstacle.z_min && vehicle.z_min >= obstacle.z_max`.
    Symmetric,
}

/// Axis-aligned box on the ground plane (X/Z only, no height test).
///
/// Forward is -Z, so the "min" Z edge is the near one: `z_min = z + half`,
/// `z_max = z - half`. Both boxes in a test use the same convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x_min: f32,
    pub z_min: f32,
    pub x_max: f32,
    pub z_max: f32,
}

impl Aabb {
    /// Box centered on `center` with half-extents `half.x` on X and `half.y` on Z.
    pub fn around(center: Vec3, half: Vec2) -> Self {
        Self {
            x_min: center.x - half.x,
            z_min: center.z + half.y,
            x_max: center.x + half.x,
            z_max: center.z - half.y,
        }
    }

    /// Whether this (vehicle) box hits `obstacle` under `rule`.
    pub fn hits(&self, obstacle: &Aabb, rule: ZOverlapRule) -> bool {
        let x = self.x_max >= obstacle.x_min && self.x_min <= obstacle.x_max;
        let z = match rule {
            ZOverlapRule::AsObserved => {
                self.z_max <= obstacle.z_min && self.z_min > obstacle.z_min
            }
            ZOverlapRule::Symmetric => {
                self.z_max <= obstacle.z_min && self.z_min >= obstacle.z_max
            }
        };
        x && z
    }
}
