use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::Transform;

/// A handle referencing a mesh owned by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshHandle(pub u64);

/// A handle referencing a texture owned by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u64);

/// Phong material parameters uploaded alongside each object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub ambient: Vec3,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Vec3::splat(0.5),
            specular: Vec3::splat(0.5),
            ambient: Vec3::ZERO,
            shininess: 2.0,
        }
    }
}

/// Which per-frame behavior drives an object.
///
/// Attached once when the object is created; the movement controller
/// dispatches on this tag rather than on the object's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Player-steered aircraft. Owns the bounding box obstacles test against.
    Vehicle,
    /// Slowly spinning sky body.
    CelestialBody,
    /// Ground strip that scrolls toward the camera and loops.
    ScrollingBackdrop,
    /// Building that scrolls toward the camera, loops, and can be hit.
    Obstacle,
}

impl ObjectKind {
    /// Classify a legacy scene object name.
    ///
    /// Anything that is not one of the well-known names is an obstacle.
    pub fn classify(name: &str) -> Self {
        match name {
            "Jet" => Self::Vehicle,
            "moon" => Self::CelestialBody,
            "ground" | "grass1" | "grass2" => Self::ScrollingBackdrop,
            _ => Self::Obstacle,
        }
    }
}

/// A named scene object: transform plus everything the renderer needs.
///
/// The model matrix is cached and rebuilt from the transform on every
/// mutation, so position and matrix can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    kind: ObjectKind,
    transform: Transform,
    model_matrix: Mat4,
    pub tint: [f32; 4],
    pub mesh: MeshHandle,
    pub texture: TextureHandle,
    pub material: Material,
}

impl SceneObject {
    pub fn new(
        kind: ObjectKind,
        transform: Transform,
        mesh: MeshHandle,
        texture: TextureHandle,
        material: Material,
    ) -> Self {
        Self {
            kind,
            transform,
            model_matrix: transform.model_matrix(),
            tint: [1.0, 1.0, 1.0, 1.0],
            mesh,
            texture,
            material,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn scale(&self) -> Vec3 {
        self.transform.scale
    }

    pub fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.model_matrix
    }

    /// Move the object and rebuild its model matrix.
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
        self.sync();
    }

    /// Replace the orientation and rebuild the model matrix.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
        self.sync();
    }

    /// Post-multiply a rotation in the object's local frame.
    pub fn rotate_local(&mut self, rotation: Quat) {
        self.transform.rotation = (self.transform.rotation * rotation).normalize();
        self.sync();
    }

    fn sync(&mut self) {
        self.model_matrix = self.transform.model_matrix();
    }
}
