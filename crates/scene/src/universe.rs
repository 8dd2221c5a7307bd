use std::sync::Arc;

use tinyengine_assets::{Material, Mesh};
use tinyengine_universe::{StarField, StarPlacement, UniverseConfig};

use crate::actor::MeshActor;

/// Actor whose children are the stars around the viewer.
///
/// The children are owned by the scene and replaced wholesale on every
/// regeneration; see [`Scene::generate_universe`](crate::Scene::generate_universe).
#[derive(Debug, Clone)]
pub struct UniverseActor {
    pub field: StarField,
    pub star_mesh: Arc<Mesh>,
    pub palette: Vec<Arc<Material>>,
}

impl UniverseActor {
    pub fn new(config: UniverseConfig, star_mesh: Arc<Mesh>, palette: Vec<Arc<Material>>) -> Self {
        if !palette.is_empty() && palette.len() != config.palette_size {
            tracing::warn!(
                configured = config.palette_size,
                supplied = palette.len(),
                "palette size differs from configuration; indices wrap"
            );
        }
        Self {
            field: StarField::new(config),
            star_mesh,
            palette,
        }
    }

    /// The mesh actor a placement turns into.
    pub(crate) fn star(&self, placement: &StarPlacement) -> MeshActor {
        let materials = if self.palette.is_empty() {
            Vec::new()
        } else {
            vec![self.palette[placement.material % self.palette.len()].clone()]
        };
        MeshActor::new(self.star_mesh.clone()).with_materials(materials)
    }
}
