//! Per-frame movement and collision for the flight scene.
//!
//! One [`MovementController`] exists per scene. The host calls
//! [`MovementController::update`] once per object per frame, vehicles first.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use skyline_common::{ObjectKind, SceneObject};
use skyline_input::{Key, KeyInput};

use crate::aabb::Aabb;
use crate::config::MovementConfig;
use crate::objects::SceneObjects;

/// Errors from movement updates.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MovementError {
    #[error("unknown object identifier: {0:?}")]
    UnknownObject(String),
}

/// Lateral turn state of the vehicle, which determines its bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnDirection {
    Right,
    Left,
    #[default]
    Neutral,
}

impl TurnDirection {
    /// Roll held in this state, in degrees. Right banks positive.
    fn bank(self, angle: f32) -> f32 {
        match self {
            Self::Right => angle,
            Self::Left => -angle,
            Self::Neutral => 0.0,
        }
    }
}

/// Something observable that happened during an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MovementEvent {
    /// Lateral move refused because the candidate X left the allowed band.
    BoundaryRejected { object: String, candidate_x: f32 },
    /// The vehicle changed turn state and rolled by `roll_degrees`.
    Banked {
        object: String,
        from: TurnDirection,
        to: TurnDirection,
        roll_degrees: f32,
    },
    /// A looping object jumped back from `from_z` to `to_z`.
    Wrapped { object: String, from_z: f32, to_z: f32 },
    /// The vehicle box hit an obstacle.
    Collided { obstacle: String },
}

/// Moves every scene object and detects vehicle/obstacle hits.
///
/// The controller owns the object map for the lifetime of the scene and is
/// the only thing that mutates positions. State carried between calls:
/// - `collided`: sticky, false until the first hit and never reset.
/// - `turn`: current bank state of the vehicle.
/// - `vehicle_bounds`: the vehicle box as of its last update, read by
///   obstacle updates later in the same frame.
#[derive(Debug)]
pub struct MovementController<I> {
    objects: SceneObjects,
    input: I,
    config: MovementConfig,
    collided: bool,
    turn: TurnDirection,
    vehicle_bounds: Option<Aabb>,
    events: Vec<MovementEvent>,
}

impl<I: KeyInput> MovementController<I> {
    pub fn new(objects: SceneObjects, input: I) -> Self {
        Self::with_config(objects, input, MovementConfig::default())
    }

    pub fn with_config(objects: SceneObjects, input: I, config: MovementConfig) -> Self {
        Self {
            objects,
            input,
            config,
            collided: false,
            turn: TurnDirection::Neutral,
            vehicle_bounds: None,
            events: Vec::new(),
        }
    }

    pub fn objects(&self) -> &SceneObjects {
        &self.objects
    }

    /// Mutable object access for hosts that tint objects between updates.
    pub fn objects_mut(&mut self) -> &mut SceneObjects {
        &mut self.objects
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn is_collided(&self) -> bool {
        self.collided
    }

    pub fn turn_direction(&self) -> TurnDirection {
        self.turn
    }

    /// Vehicle box cached by the most recent vehicle update, if any.
    pub fn vehicle_bounds(&self) -> Option<Aabb> {
        self.vehicle_bounds
    }

    /// Drain and return recorded events.
    pub fn drain_events(&mut self) -> Vec<MovementEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[MovementEvent] {
        &self.events
    }

    /// Advance the object `key` by one tick of `delta_time`.
    ///
    /// Returns the sticky collision flag, or `Ok(None)` when a vehicle's
    /// lateral move was refused at the boundary: that result carries no new
    /// collision information and the caller should keep its previous flag.
    pub fn update(&mut self, delta_time: f32, key: &str) -> Result<Option<bool>, MovementError> {
        let kind = lookup(&mut self.objects, key)?.kind();
        match kind {
            ObjectKind::Vehicle => return self.update_vehicle(delta_time, key),
            ObjectKind::CelestialBody => self.update_celestial(delta_time, key)?,
            ObjectKind::ScrollingBackdrop => self.update_backdrop(key)?,
            ObjectKind::Obstacle => self.update_obstacle(key)?,
        }
        Ok(Some(self.collided))
    }

    fn update_vehicle(&mut self, delta_time: f32, key: &str) -> Result<Option<bool>, MovementError> {
        let half = self.config.vehicle_half_extents;
        let bank_angle = self.config.bank_angle_degrees;
        let speed = 2.0 * self.config.fast_sensitivity * delta_time;
        let limit = self.config.lateral_limit;

        let steer = if self.input.is_key_down(Key::ArrowRight) {
            TurnDirection::Right
        } else if self.input.is_key_down(Key::ArrowLeft) {
            TurnDirection::Left
        } else {
            TurnDirection::Neutral
        };

        let object = lookup(&mut self.objects, key)?;
        let position = object.position();

        // The box reflects where the vehicle stood at the start of this update.
        self.vehicle_bounds = Some(Aabb::around(position, half));

        let target = match steer {
            TurnDirection::Neutral => {
                if self.turn == TurnDirection::Neutral {
                    return Ok(Some(self.collided));
                }
                TurnDirection::Neutral
            }
            dir => {
                let sign = if dir == TurnDirection::Right { 1.0 } else { -1.0 };
                let candidate_x = position.x + sign * speed;
                if candidate_x > limit || candidate_x < -limit {
                    tracing::debug!(object = key, candidate_x, "lateral move rejected");
                    self.events.push(MovementEvent::BoundaryRejected {
                        object: key.to_owned(),
                        candidate_x,
                    });
                    return Ok(None);
                }
                object.set_position(Vec3::new(candidate_x, position.y, position.z));
                dir
            }
        };

        if target != self.turn {
            // Neutral→turn and turn→neutral roll by one bank angle; reversing
            // straight from one side to the other rolls by two.
            let roll_degrees = target.bank(bank_angle) - self.turn.bank(bank_angle);
            object.rotate_local(Quat::from_rotation_z(roll_degrees.to_radians()));
            tracing::debug!(object = key, from = ?self.turn, to = ?target, roll_degrees, "bank");
            self.events.push(MovementEvent::Banked {
                object: key.to_owned(),
                from: self.turn,
                to: target,
                roll_degrees,
            });
            self.turn = target;
        }
        Ok(Some(self.collided))
    }

    fn update_celestial(&mut self, delta_time: f32, key: &str) -> Result<(), MovementError> {
        let angle = -self.config.moon_angular_rate * delta_time;
        lookup(&mut self.objects, key)?.rotate_local(Quat::from_rotation_y(angle));
        Ok(())
    }

    fn update_backdrop(&mut self, key: &str) -> Result<(), MovementError> {
        let step = self.config.backdrop_step;
        let wrap_at = self.config.backdrop_wrap_at;
        let reset_to = self.config.backdrop_reset_to;

        let object = lookup(&mut self.objects, key)?;
        let mut position = object.position();
        position.z += step;
        // Exact equality: a step that overshoots the threshold never wraps.
        let wrapped = position.z == wrap_at;
        if wrapped {
            position.z = reset_to;
        }
        object.set_position(position);

        if wrapped {
            self.record_wrap(key, wrap_at, reset_to);
        }
        Ok(())
    }

    fn update_obstacle(&mut self, key: &str) -> Result<(), MovementError> {
        let substeps = self.config.obstacle_substeps;
        let step = self.config.obstacle_step;
        let wrap_at = self.config.obstacle_wrap_at;
        let reset_to = self.config.obstacle_reset_to;
        let rule = self.config.z_overlap;

        for _ in 0..substeps {
            let object = lookup(&mut self.objects, key)?;
            let mut position = object.position();
            position.z += step;
            let wrapped = position.z == wrap_at;
            if wrapped {
                position.z = reset_to;
            }
            object.set_position(position);
            let half = object.scale();
            let bounds = Aabb::around(position, Vec2::new(half.x, half.z));

            if wrapped {
                self.record_wrap(key, wrap_at, reset_to);
            }

            let hit = self
                .vehicle_bounds
                .is_some_and(|vehicle| vehicle.hits(&bounds, rule));
            if hit {
                if !self.collided {
                    tracing::info!(obstacle = key, z = position.z, "vehicle collided");
                }
                self.collided = true;
                self.events.push(MovementEvent::Collided {
                    obstacle: key.to_owned(),
                });
                return Ok(());
            }
        }
        Ok(())
    }

    fn record_wrap(&mut self, key: &str, from_z: f32, to_z: f32) {
        tracing::debug!(object = key, from_z, to_z, "wrapped");
        self.events.push(MovementEvent::Wrapped {
            object: key.to_owned(),
            from_z,
            to_z,
        });
    }
}

fn lookup<'a>(objects: &'a mut SceneObjects, key: &str) -> Result<&'a mut SceneObject, MovementError> {
    objects
        .get_mut(key)
        .ok_or_else(|| MovementError::UnknownObject(key.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;
    use skyline_common::{Material, MeshHandle, TextureHandle, Transform};
    use skyline_input::KeyboardState;
    use std::f32::consts::PI;

    fn object(kind: ObjectKind, position: Vec3, scale: Vec3) -> SceneObject {
        SceneObject::new(
            kind,
            Transform::new(position, scale),
            MeshHandle(0),
            TextureHandle(0),
            Material::default(),
        )
    }

    fn jet_at(position: Vec3) -> SceneObject {
        let mut jet = object(ObjectKind::Vehicle, position, Vec3::ONE);
        jet.set_rotation(Quat::from_rotation_y(-PI));
        jet
    }

    fn tower_at(position: Vec3) -> SceneObject {
        object(ObjectKind::Obstacle, position, Vec3::new(5.0, 35.0, 5.0))
    }

    fn controller(objects: &[(&str, SceneObject)]) -> MovementController<KeyboardState> {
        let mut map = SceneObjects::new();
        for (name, obj) in objects {
            map.insert(*name, obj.clone());
        }
        MovementController::new(map, KeyboardState::new())
    }

    fn pos(c: &MovementController<KeyboardState>, name: &str) -> Vec3 {
        c.objects().get(name).unwrap().position()
    }

    fn hold(c: &mut MovementController<KeyboardState>, keys: &[Key]) {
        c.input_mut().set_held(keys);
    }

    /// Assert the jet's roll relative to its initial yaw, in degrees.
    fn assert_roll(c: &MovementController<KeyboardState>, degrees: f32) {
        let rotation = c.objects().get("Jet").unwrap().rotation();
        let expected = Quat::from_rotation_y(-PI) * Quat::from_rotation_z(degrees.to_radians());
        assert!(
            rotation.abs_diff_eq(expected, 1e-5) || rotation.abs_diff_eq(-expected, 1e-5),
            "expected roll {degrees}, got {rotation:?}"
        );
    }

    fn assert_matrix_consistent(c: &MovementController<KeyboardState>, name: &str) {
        let obj = c.objects().get(name).unwrap();
        assert_eq!(obj.model_matrix(), obj.transform().model_matrix());
        assert_eq!(obj.model_matrix().w_axis.truncate(), obj.position());
    }

    #[test]
    fn unknown_object_fails_fast() {
        let mut c = controller(&[("Jet", jet_at(Vec3::new(0.0, 10.0, -10.0)))]);
        assert_eq!(
            c.update(16.0, "airship"),
            Err(MovementError::UnknownObject("airship".into()))
        );
    }

    // --- vehicle ---

    #[test]
    fn right_arrow_moves_by_scaled_step() {
        let mut c = controller(&[("Jet", jet_at(Vec3::new(28.0, 10.0, -10.0)))]);
        hold(&mut c, &[Key::ArrowRight]);
        assert_eq!(c.update(1.0, "Jet"), Ok(Some(false)));
        assert!((pos(&c, "Jet").x - 28.02).abs() < 1e-5);
        assert_eq!(pos(&c, "Jet").y, 10.0);
        assert_eq!(pos(&c, "Jet").z, -10.0);
        assert_matrix_consistent(&c, "Jet");
    }

    #[test]
    fn move_past_boundary_is_ignored() {
        let mut c = controller(&[("Jet", jet_at(Vec3::new(29.99, 10.0, -10.0)))]);
        let before = c.objects().get("Jet").unwrap().clone();
        hold(&mut c, &[Key::ArrowRight]);

        assert_eq!(c.update(1.0, "Jet"), Ok(None));
        assert_eq!(c.objects().get("Jet").unwrap(), &before);
        assert_eq!(c.turn_direction(), TurnDirection::Neutral);
        assert!(matches!(
            c.events(),
            [MovementEvent::BoundaryRejected { candidate_x, .. }] if *candidate_x > 30.0
        ));
    }

    #[test]
    fn repeated_right_never_exceeds_limit() {
        let mut c = controller(&[("Jet", jet_at(Vec3::new(0.0, 10.0, -10.0)))]);
        hold(&mut c, &[Key::ArrowRight]);
        for _ in 0..40 {
            c.update(100.0, "Jet").unwrap();
            assert!(pos(&c, "Jet").x <= 30.0);
        }
        // Steps of 2.0 land exactly on the limit, which is still allowed.
        assert_eq!(pos(&c, "Jet").x, 30.0);

        let matrix = c.objects().get("Jet").unwrap().model_matrix();
        assert_eq!(c.update(100.0, "Jet"), Ok(None));
        assert_eq!(c.objects().get("Jet").unwrap().model_matrix(), matrix);
    }

    #[test]
    fn repeated_left_never_goes_below_limit() {
        let mut c = controller(&[("Jet", jet_at(Vec3::new(0.0, 10.0, -10.0)))]);
        hold(&mut c, &[Key::ArrowLeft]);
        for _ in 0..40 {
            c.update(160.0, "Jet").unwrap();
            assert!(pos(&c, "Jet").x >= -30.0);
        }
        let stuck = pos(&c, "Jet");
        assert_eq!(c.update(160.0, "Jet"), Ok(None));
        assert_eq!(pos(&c, "Jet"), stuck);
    }

    #[test]
    fn right_wins_when_both_arrows_held() {
        let mut c = controller(&[("Jet", jet_at(Vec3::new(0.0, 10.0, -10.0)))]);
        hold(&mut c, &[Key::ArrowLeft, Key::ArrowRight]);
        c.update(100.0, "Jet").unwrap();
        assert_eq!(pos(&c, "Jet").x, 2.0);
        assert_eq!(c.turn_direction(), TurnDirection::Right);
    }

    #[test]
    fn bank_state_machine() {
        let mut c = controller(&[("Jet", jet_at(Vec3::new(0.0, 10.0, -10.0)))]);
        assert_eq!(c.turn_direction(), TurnDirection::Neutral);

        hold(&mut c, &[Key::ArrowRight]);
        c.update(16.0, "Jet").unwrap();
        assert_eq!(c.turn_direction(), TurnDirection::Right);
        assert_roll(&c, 30.0);

        // Holding the same direction only translates.
        c.update(16.0, "Jet").unwrap();
        assert_roll(&c, 30.0);

        hold(&mut c, &[Key::ArrowLeft]);
        c.update(16.0, "Jet").unwrap();
        assert_eq!(c.turn_direction(), TurnDirection::Left);
        assert_roll(&c, -30.0);

        hold(&mut c, &[]);
        c.update(16.0, "Jet").unwrap();
        assert_eq!(c.turn_direction(), TurnDirection::Neutral);
        assert_roll(&c, 0.0);

        let rolls: Vec<f32> = c
            .events()
            .iter()
            .filter_map(|e| match e {
                MovementEvent::Banked { roll_degrees, .. } => Some(*roll_degrees),
                _ => None,
            })
            .collect();
        // Single correction, double correction on reversal, single to level.
        assert_eq!(rolls, vec![30.0, -60.0, 30.0]);
        assert_matrix_consistent(&c, "Jet");
    }

    #[test]
    fn idle_neutral_vehicle_is_untouched() {
        let mut c = controller(&[("Jet", jet_at(Vec3::new(0.0, 10.0, -10.0)))]);
        let before = c.objects().get("Jet").unwrap().clone();
        assert_eq!(c.update(16.0, "Jet"), Ok(Some(false)));
        assert_eq!(c.objects().get("Jet").unwrap(), &before);
        assert!(c.events().is_empty());
    }

    #[test]
    fn vehicle_bounds_taken_before_input() {
        let mut c = controller(&[("Jet", jet_at(Vec3::new(0.0, 10.0, -10.0)))]);
        assert!(c.vehicle_bounds().is_none());
        hold(&mut c, &[Key::ArrowRight]);
        c.update(500.0, "Jet").unwrap();
        assert_eq!(pos(&c, "Jet").x, 10.0);
        assert_eq!(c.vehicle_bounds().unwrap().x_min, -2.7);

        c.update(0.0, "Jet").unwrap();
        assert_eq!(c.vehicle_bounds().unwrap().x_min, 10.0 - 2.7);
    }

    // --- celestial ---

    #[test]
    fn moon_spins_about_vertical_axis() {
        let start = Vec3::new(0.0, 190.0, -1000.0);
        let scale = Vec3::new(200.0, 190.0, 200.0);
        let mut c = controller(&[("moon", object(ObjectKind::CelestialBody, start, scale))]);
        let legacy = Mat4::from_translation(start)
            * Mat4::from_scale(scale)
            * Mat4::from_rotation_y(-PI / 10_000.0 * 16.0);

        assert_eq!(c.update(16.0, "moon"), Ok(Some(false)));
        let moon = c.objects().get("moon").unwrap();
        assert_eq!(moon.position(), start);
        assert!(moon.model_matrix().abs_diff_eq(legacy, 1e-2));
    }

    // --- backdrop ---

    #[test]
    fn backdrop_scrolls_and_wraps_exactly() {
        let mut c = controller(&[(
            "ground",
            object(
                ObjectKind::ScrollingBackdrop,
                Vec3::new(0.0, 0.0, -1500.0),
                Vec3::new(30.0, 1.0, 1500.0),
            ),
        )]);
        for _ in 0..74 {
            c.update(16.0, "ground").unwrap();
        }
        assert_eq!(pos(&c, "ground").z, -760.0);
        c.update(16.0, "ground").unwrap();
        assert_eq!(pos(&c, "ground").z, -1500.0);
        assert_matrix_consistent(&c, "ground");
        assert!(matches!(
            c.events(),
            [MovementEvent::Wrapped { from_z, to_z, .. }] if *from_z == -750.0 && *to_z == -1500.0
        ));
    }

    #[test]
    fn backdrop_overshoot_does_not_wrap() {
        let mut c = controller(&[(
            "grass1",
            object(
                ObjectKind::ScrollingBackdrop,
                Vec3::new(-230.0, 0.0, -765.0),
                Vec3::new(200.0, 1.0, 1500.0),
            ),
        )]);
        c.update(16.0, "grass1").unwrap();
        assert_eq!(pos(&c, "grass1").z, -755.0);
        c.update(16.0, "grass1").unwrap();
        assert_eq!(pos(&c, "grass1").z, -745.0);
        assert!(c.events().is_empty());
    }

    /// The legacy recipe: scale out, translate, optionally jump, scale back in.
    fn legacy_backdrop(matrix: Mat4, scale: Vec3, step: f32, jump: Option<f32>) -> Mat4 {
        let mut m = matrix * Mat4::from_scale(scale.recip());
        m *= Mat4::from_translation(Vec3::new(0.0, 0.0, step));
        if let Some(z) = jump {
            m *= Mat4::from_translation(Vec3::new(0.0, 0.0, z));
        }
        m * Mat4::from_scale(scale)
    }

    #[test]
    fn backdrop_matrix_matches_legacy_recipe() {
        let scale = Vec3::new(200.0, 1.0, 1500.0);
        let start = Vec3::new(230.0, 0.0, -770.0);
        let mut c = controller(&[(
            "grass2",
            object(ObjectKind::ScrollingBackdrop, start, scale),
        )]);
        let mut legacy = Transform::new(start, scale).model_matrix();

        legacy = legacy_backdrop(legacy, scale, 10.0, None);
        c.update(16.0, "grass2").unwrap();
        let current = c.objects().get("grass2").unwrap().model_matrix();
        assert!(current.abs_diff_eq(legacy, 1e-2));

        // Crossing -750 jumps by the current Z on top of the step.
        legacy = legacy_backdrop(legacy, scale, 10.0, Some(-750.0));
        c.update(16.0, "grass2").unwrap();
        let current = c.objects().get("grass2").unwrap().model_matrix();
        assert!(current.abs_diff_eq(legacy, 1e-2));
        assert_eq!(pos(&c, "grass2").z, -1500.0);
    }

    // --- obstacles ---

    #[test]
    fn obstacle_advances_ten_substeps_per_update() {
        let mut c = controller(&[("skyscraper0", tower_at(Vec3::new(20.0, 0.0, -500.0)))]);
        assert_eq!(c.update(16.0, "skyscraper0"), Ok(Some(false)));
        assert_eq!(pos(&c, "skyscraper0").z, -490.0);
        assert_matrix_consistent(&c, "skyscraper0");
    }

    #[test]
    fn obstacle_recycles_mid_loop() {
        let mut c = controller(&[("skyscraper4", tower_at(Vec3::new(20.0, 0.0, 5.0)))]);
        c.update(16.0, "skyscraper4").unwrap();
        // 6, 7, 8, 9, 10 -> -1000, then five more substeps.
        assert_eq!(pos(&c, "skyscraper4").z, -995.0);
        assert_matrix_consistent(&c, "skyscraper4");
        assert!(matches!(
            c.events(),
            [MovementEvent::Wrapped { from_z, to_z, .. }] if *from_z == 10.0 && *to_z == -1000.0
        ));
    }

    #[test]
    fn obstacle_without_vehicle_box_never_hits() {
        // Sitting right on the vehicle, but no vehicle update has run yet.
        let mut c = controller(&[
            ("Jet", jet_at(Vec3::new(0.0, 10.0, -10.0))),
            ("skyscraper0", tower_at(Vec3::new(0.0, 0.0, -22.0))),
        ]);
        assert_eq!(c.update(16.0, "skyscraper0"), Ok(Some(false)));
        assert!(!c.is_collided());
    }

    #[test]
    fn collision_stops_the_inner_loop() {
        let mut c = controller(&[
            ("Jet", jet_at(Vec3::new(0.0, 10.0, -10.0))),
            ("skyscraper0", tower_at(Vec3::new(0.0, 0.0, -22.0))),
        ]);
        c.update(16.0, "Jet").unwrap();
        // Near edge goes -16, -15, ... and enters [-13.8, -6.2) at -13.
        assert_eq!(c.update(16.0, "skyscraper0"), Ok(Some(true)));
        assert_eq!(pos(&c, "skyscraper0").z, -18.0);
        assert!(c.is_collided());
        assert!(c
            .events()
            .contains(&MovementEvent::Collided { obstacle: "skyscraper0".into() }));
    }

    #[test]
    fn collision_is_sticky() {
        let mut c = controller(&[
            ("Jet", jet_at(Vec3::new(0.0, 10.0, -10.0))),
            ("ground", object(ObjectKind::ScrollingBackdrop, Vec3::new(0.0, 0.0, -1500.0), Vec3::ONE)),
            ("moon", object(ObjectKind::CelestialBody, Vec3::ZERO, Vec3::ONE)),
            ("skyscraper0", tower_at(Vec3::new(0.0, 0.0, -22.0))),
        ]);
        c.update(16.0, "Jet").unwrap();
        assert_eq!(c.update(16.0, "skyscraper0"), Ok(Some(true)));

        // Steer away and let the tower drift far past; nothing clears the flag.
        hold(&mut c, &[Key::ArrowLeft]);
        for _ in 0..20 {
            assert_eq!(c.update(16.0, "Jet"), Ok(Some(true)));
            assert_eq!(c.update(16.0, "ground"), Ok(Some(true)));
            assert_eq!(c.update(16.0, "moon"), Ok(Some(true)));
            assert_eq!(c.update(16.0, "skyscraper0"), Ok(Some(true)));
        }
        assert!(c.is_collided());
    }

    #[test]
    fn obstacle_sees_vehicle_box_from_current_frame_only_if_vehicle_runs_first() {
        let tower = tower_at(Vec3::new(20.0, 0.0, -22.0));
        let run = |vehicle_first: bool| {
            let mut c = controller(&[
                ("Jet", jet_at(Vec3::new(0.0, 10.0, -10.0))),
                ("skyscraper0", tower.clone()),
            ]);
            // Frame 1: steer right; the cached box still sits at x = 0.
            hold(&mut c, &[Key::ArrowRight]);
            c.update(1000.0, "Jet").unwrap();
            assert_eq!(pos(&c, "Jet").x, 20.0);
            hold(&mut c, &[]);

            // Frame 2: only the box recomputed this frame covers x = 20.
            if vehicle_first {
                c.update(16.0, "Jet").unwrap();
                c.update(16.0, "skyscraper0").unwrap()
            } else {
                let hit = c.update(16.0, "skyscraper0").unwrap();
                c.update(16.0, "Jet").unwrap();
                hit
            }
        };
        assert_eq!(run(false), Some(false));
        assert_eq!(run(true), Some(true));
    }

    #[test]
    fn symmetric_rule_is_opt_in() {
        // Jet Z span is [-13.8, -6.2]; this tower's near edge (-12) is inside it.
        let mut map = SceneObjects::new();
        map.insert("Jet", jet_at(Vec3::new(0.0, 10.0, -10.0)));
        map.insert(
            "skyscraper0",
            object(ObjectKind::Obstacle, Vec3::new(0.0, 0.0, -17.0), Vec3::new(5.0, 35.0, 5.0)),
        );
        let config = MovementConfig {
            obstacle_substeps: 1,
            obstacle_step: 0.0,
            ..MovementConfig::default()
        };

        let mut observed = MovementController::with_config(map, KeyboardState::new(), config);
        observed.update(16.0, "Jet").unwrap();
        assert_eq!(observed.update(16.0, "skyscraper0"), Ok(Some(true)));

        // Near edge (-2) has passed the jet while the body still covers it.
        let mut covered = SceneObjects::new();
        covered.insert("Jet", jet_at(Vec3::new(0.0, 10.0, -10.0)));
        covered.insert(
            "skyscraper0",
            object(ObjectKind::Obstacle, Vec3::new(0.0, 0.0, -7.0), Vec3::new(5.0, 35.0, 5.0)),
        );
        let mut c = MovementController::with_config(covered.clone(), KeyboardState::new(), config);
        c.update(16.0, "Jet").unwrap();
        assert_eq!(c.update(16.0, "skyscraper0"), Ok(Some(false)));

        let symmetric = MovementConfig {
            z_overlap: crate::ZOverlapRule::Symmetric,
            ..config
        };
        let mut c = MovementController::with_config(covered, KeyboardState::new(), symmetric);
        c.update(16.0, "Jet").unwrap();
        assert_eq!(c.update(16.0, "skyscraper0"), Ok(Some(true)));
    }
}
