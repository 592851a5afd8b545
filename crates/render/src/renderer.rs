use glam::Mat4;
use skyline_common::{Material, MeshHandle, TextureHandle};
use skyline_input::KeyInput;
use skyline_kernel::FlightScene;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the scene and produces output. It never mutates the
/// scene; the movement controller owns object state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the current scene state.
    fn render<I: KeyInput>(&self, scene: &FlightScene<I>) -> Self::Output;
}

/// Everything needed to draw one object: its uniforms and resources.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub name: String,
    /// Object-to-world matrix (`M`).
    pub model: Mat4,
    /// Inverse-transpose of `model` for transforming normals (`M_it`).
    pub normal_matrix: Mat4,
    pub tint: [f32; 4],
    pub mesh: MeshHandle,
    pub texture: TextureHandle,
    pub material: Material,
}

/// Produces one [`DrawCommand`] per object, in update order.
#[derive(Debug, Default)]
pub struct DrawListRenderer;

impl DrawListRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DrawListRenderer {
    type Output = Vec<DrawCommand>;

    fn render<I: KeyInput>(&self, scene: &FlightScene<I>) -> Vec<DrawCommand> {
        let objects = scene.objects();
        let commands: Vec<DrawCommand> = scene
            .update_order()
            .iter()
            .filter_map(|name| objects.get(name).map(|obj| (name, obj)))
            .map(|(name, obj)| {
                let model = obj.model_matrix();
                DrawCommand {
                    name: name.clone(),
                    model,
                    normal_matrix: model.inverse().transpose(),
                    tint: obj.tint,
                    mesh: obj.mesh,
                    texture: obj.texture,
                    material: obj.material,
                }
            })
            .collect();
        tracing::trace!(commands = commands.len(), "draw list built");
        commands
    }
}

/// Debug text renderer: a human-readable dump of the scene.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render<I: KeyInput>(&self, scene: &FlightScene<I>) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Flight Scene (frame={}, time={:.1}) ===\n",
            scene.frame_count(),
            scene.time()
        ));
        out.push_str(&format!(
            "Objects: {}  collided: {}\n",
            scene.objects().len(),
            scene.is_collided()
        ));

        for name in scene.update_order() {
            let Some(obj) = scene.objects().get(name) else {
                continue;
            };
            let p = obj.position();
            out.push_str(&format!(
                "  {:<12} {:<17} pos=({:.2}, {:.2}, {:.2}) tint=({:.2}, {:.2}, {:.2})\n",
                name,
                format!("{:?}", obj.kind()),
                p.x,
                p.y,
                p.z,
                obj.tint[0],
                obj.tint[1],
                obj.tint[2],
            ));
        }

        out
    }
}
