//! Developer Tooling: scene inspector.
//!
//! # Invariants
//! - Tools only read scene state.

mod inspector;

pub use inspector::{ObjectInfo, SceneInspector, SceneSummary};

pub fn crate_info() -> &'static str {
    "skyline-tools v0.1.0"
}
