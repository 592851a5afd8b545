//! Flight scene kernel: per-frame movement, collision, and the frame loop.
//!
//! # Invariants
//! - Every object's position and model matrix agree after every update.
//! - The collision flag only ever goes from false to true.
//! - Vehicles update before obstacles within a frame.

pub mod aabb;
pub mod config;
pub mod movement;
pub mod objects;
pub mod scene;

pub use aabb::{Aabb, ZOverlapRule};
pub use config::{ConfigError, MovementConfig, SceneConfig};
pub use movement::{MovementController, MovementError, MovementEvent, TurnDirection};
pub use objects::SceneObjects;
pub use scene::{FlightScene, FrameReport, SceneRng, VEHICLE, standard_objects};

pub fn crate_info() -> &'static str {
    "skyline-kernel v0.1.0"
}
