use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use tinyengine_assets::{AssetId, Material, Mesh, ShaderKind};
use tinyengine_render::{Camera, part_material};

/// Per-instance vertex data: model matrix columns and the part's colour.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    pub model_0: [f32; 4],
    pub model_1: [f32; 4],
    pub model_2: [f32; 4],
    pub model_3: [f32; 4],
    pub color: [f32; 4],
}

impl InstanceData {
    pub fn new(world: Mat4, material: &Material) -> Self {
        let cols = world.to_cols_array_2d();
        let d = material.diffuse;
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            color: [d.x, d.y, d.z, material.alpha()],
        }
    }
}

/// Render pass a part is drawn in. Passes draw in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Pass {
    Sky,
    Lit,
}

impl From<ShaderKind> for Pass {
    fn from(kind: ShaderKind) -> Self {
        match kind {
            ShaderKind::Skybox => Pass::Sky,
            ShaderKind::Default => Pass::Lit,
        }
    }
}

/// One instanced draw: a single part of a single mesh in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BatchKey {
    pub pass: Pass,
    pub mesh: AssetId,
    pub part: usize,
}

/// Everything submitted between `clear` and `present`, grouped for
/// instancing.
#[derive(Debug)]
pub struct FrameBatch {
    default_material: Arc<Material>,
    groups: BTreeMap<BatchKey, Vec<InstanceData>>,
    view_proj: Mat4,
    eye: Vec3,
    draws: usize,
}

impl Default for FrameBatch {
    fn default() -> Self {
        Self {
            default_material: Arc::new(Material::default()),
            groups: BTreeMap::new(),
            view_proj: Mat4::IDENTITY,
            eye: Vec3::ZERO,
            draws: 0,
        }
    }
}

impl FrameBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        for instances in self.groups.values_mut() {
            instances.clear();
        }
        self.draws = 0;
    }

    /// Add one instance per non-empty part of `mesh`. The frame is viewed
    /// through the camera of the most recent call.
    pub fn push(&mut self, mesh: &Mesh, materials: &[Arc<Material>], camera: &dyn Camera, world: Mat4) {
        self.view_proj = camera.view_projection();
        self.eye = camera.eye();
        self.draws += 1;

        for (index, part) in mesh.parts.iter().enumerate() {
            if part.indices.is_empty() {
                continue;
            }
            let material = part_material(mesh, index, materials, &self.default_material);
            let key = BatchKey {
                pass: material.shader.into(),
                mesh: mesh.id,
                part: index,
            };
            self.groups
                .entry(key)
                .or_default()
                .push(InstanceData::new(world, material));
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        self.view_proj
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// `draw_mesh` calls since the last clear.
    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn instance_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// All instances in draw order, and the instance range each batch uses.
    pub fn flatten(&self) -> (Vec<InstanceData>, Vec<(BatchKey, Range<u32>)>) {
        let mut instances = Vec::with_capacity(self.instance_count());
        let mut ranges = Vec::new();
        for (key, group) in &self.groups {
            if group.is_empty() {
                continue;
            }
            let start = instances.len() as u32;
            instances.extend_from_slice(group);
            ranges.push((*key, start..instances.len() as u32));
        }
        (instances, ranges)
    }
}
