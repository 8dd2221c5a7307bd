use std::sync::Arc;

use tinyengine_assets::{Material, Mesh, MeshAsset};
use tinyengine_common::{ActorId, Transform};

use crate::universe::UniverseActor;

/// What an actor does beyond carrying a transform.
#[derive(Debug, Clone)]
pub enum ActorKind {
    /// Grouping node: transforms its children, draws nothing.
    Plain,
    Mesh(MeshActor),
    Universe(Box<UniverseActor>),
}

impl ActorKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Plain => "actor",
            Self::Mesh(_) => "mesh",
            Self::Universe(_) => "universe",
        }
    }
}

/// Shared geometry plus per-part material overrides.
#[derive(Debug, Clone, Default)]
pub struct MeshActor {
    pub mesh: Option<Arc<Mesh>>,
    pub materials: Vec<Arc<Material>>,
}

impl MeshActor {
    pub fn new(mesh: Arc<Mesh>) -> Self {
        Self {
            mesh: Some(mesh),
            materials: Vec::new(),
        }
    }

    /// Mesh with the materials it was loaded with.
    pub fn from_asset(asset: &MeshAsset) -> Self {
        Self {
            mesh: Some(asset.mesh.clone()),
            materials: asset.materials.clone(),
        }
    }

    pub fn with_materials(mut self, materials: Vec<Arc<Material>>) -> Self {
        self.materials = materials;
        self
    }
}

/// One node of the scene tree.
///
/// Parent and child links are owned by the [`Scene`](crate::Scene) and only
/// change through its hierarchy operations.
#[derive(Debug, Clone)]
pub struct ActorNode {
    pub name: String,
    pub transform: Transform,
    pub kind: ActorKind,
    pub(crate) parent: Option<ActorId>,
    pub(crate) children: Vec<ActorId>,
}

impl ActorNode {
    pub fn new(name: impl Into<String>, kind: ActorKind) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn plain(name: impl Into<String>) -> Self {
        Self::new(name, ActorKind::Plain)
    }

    pub fn mesh(name: impl Into<String>, mesh: MeshActor) -> Self {
        Self::new(name, ActorKind::Mesh(mesh))
    }

    pub fn universe(name: impl Into<String>, universe: UniverseActor) -> Self {
        Self::new(name, ActorKind::Universe(Box::new(universe)))
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn parent(&self) -> Option<ActorId> {
        self.parent
    }

    pub fn children(&self) -> &[ActorId] {
        &self.children
    }
}
