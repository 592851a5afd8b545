use glam::{Quat, Vec3};
use skyline_common::{Material, ObjectKind, SceneObject, Transform};
use skyline_input::KeyInput;
use std::f32::consts::PI;

use crate::config::SceneConfig;
use crate::movement::{MovementController, MovementError, MovementEvent};
use crate::objects::SceneObjects;

/// Mesh handles the rendering layer resolves.
pub mod meshes {
    use skyline_common::MeshHandle;

    pub const PLANE: MeshHandle = MeshHandle(0);
    pub const CUBE: MeshHandle = MeshHandle(1);
    pub const SPHERE: MeshHandle = MeshHandle(2);
    pub const JET: MeshHandle = MeshHandle(3);
}

/// Texture handles the rendering layer resolves.
pub mod textures {
    use skyline_common::TextureHandle;

    pub const ROAD: TextureHandle = TextureHandle(0);
    pub const GRASS: TextureHandle = TextureHandle(1);
    pub const JET: TextureHandle = TextureHandle(2);
    pub const SKYSCRAPER: TextureHandle = TextureHandle(3);
    pub const MOON: TextureHandle = TextureHandle(4);
}

pub const VEHICLE: &str = "Jet";

/// Outcome of one [`FlightScene::frame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub time: f32,
    pub collided: bool,
    /// True only for the frame in which the first collision happened.
    pub newly_collided: bool,
}

/// The flight scene: a movement controller plus the host-side frame loop.
///
/// Mirrors what the render loop does each frame: visit every object in
/// update order, fold the returned flags into a scene-level `collided`, and
/// pulse the vehicle tint red once a hit has happened. After the first hit
/// the scene stops calling the controller, which freezes the world in place.
#[derive(Debug)]
pub struct FlightScene<I> {
    controller: MovementController<I>,
    order: Vec<String>,
    collided: bool,
    time: f32,
    frame: u64,
}

impl<I: KeyInput> FlightScene<I> {
    /// Build the standard scene from `config`.
    pub fn build(config: &SceneConfig, input: I) -> Self {
        let objects = standard_objects(config.seed, config.skyscraper_count);
        Self::from_objects(objects, input, config)
    }

    /// Wrap an existing object set.
    pub fn from_objects(objects: SceneObjects, input: I, config: &SceneConfig) -> Self {
        let order = objects.update_order();
        tracing::debug!(objects = order.len(), seed = config.seed, "scene built");
        Self {
            controller: MovementController::with_config(objects, input, config.movement),
            order,
            collided: false,
            time: 0.0,
            frame: 0,
        }
    }

    pub fn controller(&self) -> &MovementController<I> {
        &self.controller
    }

    pub fn objects(&self) -> &SceneObjects {
        self.controller.objects()
    }

    pub fn input_mut(&mut self) -> &mut I {
        self.controller.input_mut()
    }

    /// Names in the order they are updated each frame.
    pub fn update_order(&self) -> &[String] {
        &self.order
    }

    pub fn is_collided(&self) -> bool {
        self.collided
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn drain_events(&mut self) -> Vec<MovementEvent> {
        self.controller.drain_events()
    }

    pub fn pending_events(&self) -> usize {
        self.controller.events().len()
    }

    /// Run one frame of `delta_time`.
    pub fn frame(&mut self, delta_time: f32) -> Result<FrameReport, MovementError> {
        let _span = tracing::info_span!("scene_frame", frame = self.frame).entered();
        self.time += delta_time;
        self.frame += 1;
        let was_collided = self.collided;

        for name in &self.order {
            if !self.collided {
                if let Some(hit) = self.controller.update(delta_time, name)? {
                    self.collided = hit;
                }
            }
            if self.collided {
                let time = self.time;
                if let Some(obj) = self.controller.objects_mut().get_mut(name) {
                    if obj.kind() == ObjectKind::Vehicle {
                        obj.tint = [(time.sin() + 1.0) / 2.0, 0.0, 0.0, 1.0];
                    }
                }
            }
        }

        tracing::trace!(frame = self.frame, time = self.time, collided = self.collided, "frame done");
        Ok(FrameReport {
            frame: self.frame,
            time: self.time,
            collided: self.collided,
            newly_collided: self.collided && !was_collided,
        })
    }

    /// Deterministic hash of the scene for comparing runs.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.frame.to_le_bytes());
        mix(&mut h, &[self.collided as u8]);
        for name in &self.order {
            let Some(obj) = self.objects().get(name) else {
                continue;
            };
            mix(&mut h, name.as_bytes());
            let t = obj.transform();
            for v in t
                .position
                .to_array()
                .into_iter()
                .chain(t.rotation.to_array())
                .chain(t.scale.to_array())
            {
                mix(&mut h, &v.to_le_bytes());
            }
        }
        h
    }
}

/// Build the standard object set: ground, two grass strips, moon, jet and
/// `skyscrapers` buildings placed from `seed`.
pub fn standard_objects(seed: u64, skyscrapers: usize) -> SceneObjects {
    let mut objects = SceneObjects::new();

    objects.insert(
        "ground",
        SceneObject::new(
            ObjectKind::ScrollingBackdrop,
            Transform::new(Vec3::new(0.0, 0.0, -1500.0), Vec3::new(30.0, 1.0, 1500.0)),
            meshes::PLANE,
            textures::ROAD,
            Material {
                diffuse: Vec3::splat(0.5),
                specular: Vec3::splat(0.4),
                ambient: Vec3::splat(0.05),
                shininess: 200.0,
            },
        ),
    );

    let grass = Material {
        diffuse: Vec3::splat(0.251),
        specular: Vec3::splat(0.4),
        ambient: Vec3::ZERO,
        shininess: 20.0,
    };
    for (name, x) in [("grass1", -230.0), ("grass2", 230.0)] {
        objects.insert(
            name,
            SceneObject::new(
                ObjectKind::ScrollingBackdrop,
                Transform::new(Vec3::new(x, 0.0, -1500.0), Vec3::new(200.0, 1.0, 1500.0)),
                meshes::PLANE,
                textures::GRASS,
                grass,
            ),
        );
    }

    objects.insert(
        "moon",
        SceneObject::new(
            ObjectKind::CelestialBody,
            Transform::new(Vec3::new(0.0, 190.0, -1000.0), Vec3::new(200.0, 190.0, 200.0)),
            meshes::SPHERE,
            textures::MOON,
            Material {
                diffuse: Vec3::ONE,
                specular: Vec3::splat(0.8),
                ambient: Vec3::splat(0.2),
                shininess: 20.0,
            },
        ),
    );

    // The jet model faces +Z; yaw it around to fly toward -Z.
    let mut jet = SceneObject::new(
        ObjectKind::Vehicle,
        Transform::new(Vec3::new(0.0, 10.0, -10.0), Vec3::ONE),
        meshes::JET,
        textures::JET,
        Material {
            diffuse: Vec3::splat(0.1),
            specular: Vec3::splat(0.5),
            ambient: Vec3::splat(0.1),
            shininess: 2.0,
        },
    );
    jet.set_rotation(Quat::from_rotation_y(-PI));
    objects.insert(VEHICLE, jet);

    let tower = Material {
        diffuse: Vec3::splat(0.1),
        specular: Vec3::splat(0.5),
        ambient: Vec3::ZERO,
        shininess: 2.0,
    };
    let mut rng = SceneRng::new(seed);
    for i in 0..skyscrapers {
        let side = if (rng.next_f32() * 10.0) as u32 % 2 == 0 { 1.0 } else { -1.0 };
        let x = side * 27.0 * rng.next_f32();
        let z = -130.0 * i as f32 - 500.0;
        objects.insert(
            format!("skyscraper{i}"),
            SceneObject::new(
                ObjectKind::Obstacle,
                Transform::new(Vec3::new(x, 0.0, z), Vec3::new(5.0, 35.0, 5.0)),
                meshes::CUBE,
                textures::SKYSCRAPER,
                tower,
            ),
        );
    }

    objects
}

/// Seeded generator for scene layout, stepped with splitmix64.
#[derive(Debug, Clone)]
pub struct SceneRng {
    state: u64,
}

impl SceneRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill an f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}
