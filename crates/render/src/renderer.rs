use std::fmt::Write as _;
use std::sync::Arc;

use glam::{Mat4, Vec3};
use tinyengine_assets::{AssetId, Material, Mesh};

use crate::camera::Camera;
use crate::lighting::Lighting;

/// The drawing capability the scene submits to.
///
/// A frame is `clear`, any number of `draw_mesh` calls, then `present`.
pub trait Renderer {
    fn clear(&mut self);

    /// Draw every part of `mesh` with `world` as its model matrix.
    ///
    /// `materials` overrides the parts' own materials; see [`part_material`].
    fn draw_mesh(
        &mut self,
        mesh: &Mesh,
        materials: &[Arc<Material>],
        camera: &dyn Camera,
        world: Mat4,
    );

    fn present(&mut self);

    /// The output surface changed size, in physical pixels.
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Replace the scene lighting used from the next frame on.
    fn set_lighting(&mut self, _lighting: Lighting) {}
}

/// Material used for part `index` of `mesh`.
///
/// Resolution order: `supplied[index]`, else the last supplied material, else
/// the part's own material, else `fallback`.
pub fn part_material<'a>(
    mesh: &'a Mesh,
    index: usize,
    supplied: &'a [Arc<Material>],
    fallback: &'a Arc<Material>,
) -> &'a Arc<Material> {
    supplied
        .get(index)
        .or_else(|| supplied.last())
        .or_else(|| mesh.parts.get(index).and_then(|p| p.material.as_ref()))
        .unwrap_or(fallback)
}

/// One recorded `draw_mesh` call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub mesh: AssetId,
    pub mesh_name: String,
    pub world: Mat4,
    pub materials: Vec<String>,
    pub eye: Vec3,
}

/// Renderer that writes each frame as text.
///
/// Used by headless runs and tests: the draw calls of the frame in progress
/// are kept until the next `clear`, and `present` formats them into
/// [`DebugTextRenderer::frame_text`].
#[derive(Debug)]
pub struct DebugTextRenderer {
    default_material: Arc<Material>,
    draws: Vec<DrawRecord>,
    frame_text: String,
    frames_presented: u64,
    total_draws: u64,
    size: (u32, u32),
    lighting: Lighting,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self {
            default_material: Arc::new(Material::default()),
            draws: Vec::new(),
            frame_text: String::new(),
            frames_presented: 0,
            total_draws: 0,
            size: (0, 0),
            lighting: Lighting::default(),
        }
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls since the last `clear`.
    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }

    /// Text of the last presented frame.
    pub fn frame_text(&self) -> &str {
        &self.frame_text
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn total_draws(&self) -> u64 {
        self.total_draws
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }
}

impl Renderer for DebugTextRenderer {
    fn clear(&mut self) {
        self.draws.clear();
    }

    fn draw_mesh(
        &mut self,
        mesh: &Mesh,
        materials: &[Arc<Material>],
        camera: &dyn Camera,
        world: Mat4,
    ) {
        let names = (0..mesh.parts.len())
            .map(|i| part_material(mesh, i, materials, &self.default_material).name.clone())
            .collect();
        self.draws.push(DrawRecord {
            mesh: mesh.id,
            mesh_name: mesh.name.clone(),
            world,
            materials: names,
            eye: camera.eye(),
        });
        self.total_draws += 1;
    }

    fn present(&mut self) {
        self.frames_presented += 1;

        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Frame {} ({} draws) ===",
            self.frames_presented,
            self.draws.len()
        );
        if let Some(first) = self.draws.first() {
            let e = first.eye;
            let _ = writeln!(out, "Camera: eye=({:.1}, {:.1}, {:.1})", e.x, e.y, e.z);
        }
        let a = self.lighting.ambient;
        let _ = writeln!(
            out,
            "Lighting: {} lights, ambient=({:.2}, {:.2}, {:.2}, {:.2})",
            self.lighting.active_lights().count(),
            a.x,
            a.y,
            a.z,
            a.w
        );
        for draw in &self.draws {
            let p = draw.world.w_axis;
            let _ = writeln!(
                out,
                "  {} pos=({:.2}, {:.2}, {:.2}) materials=[{}]",
                draw.mesh_name,
                p.x,
                p.y,
                p.z,
                draw.materials.join(", ")
            );
        }
        self.frame_text = out;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn set_lighting(&mut self, lighting: Lighting) {
        tracing::debug!(
            lights = lighting.active_lights().count(),
            "lighting changed"
        );
        self.lighting = lighting;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::OrbitCamera;
    use tinyengine_assets::MeshPart;

    fn two_part_mesh(own: Option<Arc<Material>>) -> Mesh {
        let mut a = MeshPart::new(vec![0, 1, 2]);
        a.material = own.clone();
        let mut b = MeshPart::new(vec![0, 2, 3]);
        b.material = own;
        Mesh::new("quad", Vec::new(), vec![a, b])
    }

    fn named(name: &str) -> Arc<Material> {
        Arc::new(Material {
            name: name.into(),
            ..Material::default()
        })
    }

    #[test]
    fn supplied_material_wins_per_index() {
        let mesh = two_part_mesh(Some(named("own")));
        let supplied = [named("a"), named("b")];
        let fallback = named("fallback");
        assert_eq!(part_material(&mesh, 0, &supplied, &fallback).name, "a");
        assert_eq!(part_material(&mesh, 1, &supplied, &fallback).name, "b");
    }

    #[test]
    fn short_supply_repeats_last() {
        let mesh = two_part_mesh(Some(named("own")));
        let supplied = [named("only")];
        let fallback = named("fallback");
        assert_eq!(part_material(&mesh, 1, &supplied, &fallback).name, "only");
    }

    #[test]
    fn empty_supply_uses_part_then_fallback() {
        let fallback = named("fallback");
        let with_own = two_part_mesh(Some(named("own")));
        assert_eq!(part_material(&with_own, 1, &[], &fallback).name, "own");

        let bare = two_part_mesh(None);
        assert_eq!(part_material(&bare, 0, &[], &fallback).name, "fallback");
    }

    #[test]
    fn debug_renderer_records_frame() {
        let mut r = DebugTextRenderer::new();
        let cam = OrbitCamera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let mesh = two_part_mesh(None);

        r.clear();
        r.draw_mesh(&mesh, &[named("rock")], &cam, Mat4::from_translation(Vec3::X));
        r.present();

        assert_eq!(r.draws().len(), 1);
        assert_eq!(r.draws()[0].materials, vec!["rock", "rock"]);
        assert_eq!(r.frames_presented(), 1);
        assert!(r.frame_text().contains("Frame 1 (1 draws)"));
        assert!(r.frame_text().contains("quad pos=(1.00, 0.00, 0.00)"));
        assert!(r.frame_text().contains("eye=(0.0, 0.0, 5.0)"));

        r.clear();
        r.present();
        assert!(r.draws().is_empty());
        assert_eq!(r.total_draws(), 1);
        assert!(r.frame_text().contains("Frame 2 (0 draws)"));
    }

    #[test]
    fn lighting_is_reported() {
        use crate::lighting::DirectionalLight;
        use glam::Vec4;

        let mut r = DebugTextRenderer::new();
        let lighting = Lighting {
            lights: [
                DirectionalLight::new(Vec3::NEG_X, Vec4::new(1.0, 1.0, 1.0, 0.5)),
                DirectionalLight::new(Vec3::X, Vec4::new(0.0, 1.0, 1.0, 1.0)),
                DirectionalLight::OFF,
            ],
            ambient: Vec4::new(0.1, 0.1, 0.2, 0.5),
            clear_color: Vec4::new(0.1, 0.1, 0.2, 1.0),
        };
        r.set_lighting(lighting);
        assert_eq!(*r.lighting(), lighting);

        r.clear();
        r.present();
        assert!(
            r.frame_text()
                .contains("Lighting: 2 lights, ambient=(0.10, 0.10, 0.20, 0.50)")
        );
    }

    #[test]
    fn resize_is_recorded() {
        let mut r = DebugTextRenderer::new();
        r.resize(640, 480);
        assert_eq!(r.size(), (640, 480));
    }
}
