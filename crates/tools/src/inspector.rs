use glam::EulerRot;
use skyline_common::ObjectKind;
use skyline_input::KeyInput;
use skyline_kernel::{FlightScene, TurnDirection};

/// Scene inspector for developer tooling.
///
/// Read-only queries against a running scene for debugging and CLI output.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene state.
    pub fn summary<I: KeyInput>(scene: &FlightScene<I>) -> SceneSummary {
        let controller = scene.controller();
        SceneSummary {
            frame: scene.frame_count(),
            time: scene.time(),
            collided: scene.is_collided(),
            turn: controller.turn_direction(),
            object_count: scene.objects().len(),
            obstacle_count: scene.objects().count_kind(ObjectKind::Obstacle),
            pending_events: scene.pending_events(),
        }
    }

    /// Detailed info about one named object.
    pub fn inspect_object<I: KeyInput>(scene: &FlightScene<I>, name: &str) -> Option<ObjectInfo> {
        scene.objects().get(name).map(|obj| {
            let p = obj.position();
            let s = obj.scale();
            let (yaw, pitch, roll) = obj.rotation().to_euler(EulerRot::YXZ);
            ObjectInfo {
                name: name.to_owned(),
                kind: obj.kind(),
                position: p.to_array(),
                scale: s.to_array(),
                euler_degrees: [yaw.to_degrees(), pitch.to_degrees(), roll.to_degrees()],
                tint: obj.tint,
            }
        })
    }

    /// All object names in update order.
    pub fn list_objects<I: KeyInput>(scene: &FlightScene<I>) -> Vec<String> {
        scene.update_order().to_vec()
    }
}

/// Summary of scene state for the inspector.
#[derive(Debug, Clone)]
pub struct SceneSummary {
    pub frame: u64,
    pub time: f32,
    pub collided: bool,
    pub turn: TurnDirection,
    pub object_count: usize,
    pub obstacle_count: usize,
    pub pending_events: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: frame={} time={:.1} collided={} turn={:?} objects={} obstacles={} pending_events={}",
            self.frame,
            self.time,
            self.collided,
            self.turn,
            self.object_count,
            self.obstacle_count,
            self.pending_events
        )
    }
}

/// Detailed info about a single object.
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    pub name: String,
    pub kind: ObjectKind,
    pub position: [f32; 3],
    pub scale: [f32; 3],
    /// Yaw, pitch, roll.
    pub euler_degrees: [f32; 3],
    pub tint: [f32; 4],
}

impl std::fmt::Display for ObjectInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{:?}] pos=({:.2}, {:.2}, {:.2}) scale=({:.2}, {:.2}, {:.2}) ypr=({:.1}, {:.1}, {:.1})",
            self.name,
            self.kind,
            self.position[0],
            self.position[1],
            self.position[2],
            self.scale[0],
            self.scale[1],
            self.scale[2],
            self.euler_degrees[0],
            self.euler_degrees[1],
            self.euler_degrees[2],
        )
    }
}
