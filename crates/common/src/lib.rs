//! Shared types for the skyline flight scene.
//!
//! # Invariants
//! - A `SceneObject`'s model matrix always equals T(position)·S(scale)·R(rotation).
//! - Only the object itself rebuilds its matrix; callers mutate through methods.

pub mod object;
pub mod types;

pub use object::{Material, MeshHandle, ObjectKind, SceneObject, TextureHandle};
pub use types::Transform;
