//! Rendering Adapter: renderer-agnostic view of the flight scene.
//!
//! # Invariants
//! - Renderers cannot mutate scene state.
//! - Render output derives only from the scene objects and collision flag.
//!
//! GPU backends consume [`DrawCommand`]s; shader and mesh management live
//! on their side of the trait.

mod renderer;

pub use renderer::{DebugTextRenderer, DrawCommand, DrawListRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "skyline-render v0.1.0"
}
