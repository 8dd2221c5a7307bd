use std::fmt::Write as _;

use glam::Vec3;
use tinyengine_common::ActorId;
use tinyengine_scene::{ActorKind, Scene};

/// Read-only queries against a scene for debugging and tooling.
pub struct SceneInspector;

impl SceneInspector {
    pub fn summary(scene: &Scene) -> SceneSummary {
        let attached = scene.descendants(scene.root());
        let mut summary = SceneSummary {
            actors: scene.len(),
            attached: attached.len(),
            ..SceneSummary::default()
        };

        for (_, node) in scene.iter() {
            match &node.kind {
                ActorKind::Mesh(m) if m.mesh.is_some() => summary.meshes += 1,
                ActorKind::Universe(_) => summary.universes += 1,
                _ => {}
            }
        }
        summary.max_depth = attached
            .iter()
            .map(|id| depth(scene, *id))
            .max()
            .unwrap_or(0);
        summary
    }

    pub fn inspect_actor(scene: &Scene, id: ActorId) -> Option<ActorInfo> {
        let node = scene.get(id)?;
        let world = scene.world_matrix(id).ok()?;
        Some(ActorInfo {
            id,
            name: node.name.clone(),
            kind: node.kind.label(),
            parent: node.parent(),
            children: node.children().len(),
            local_position: node.transform.position,
            local_scale: node.transform.scale,
            world_position: world.transform_point3(Vec3::ZERO),
        })
    }

    /// Indented dump of the attached tree, at most `max_children` children
    /// listed per actor.
    pub fn tree(scene: &Scene, max_children: usize) -> String {
        let mut out = String::new();
        write_node(scene, scene.root(), 0, max_children, &mut out);
        tracing::debug!(lines = out.lines().count(), max_children, "scene tree dumped");
        out
    }
}

fn depth(scene: &Scene, id: ActorId) -> usize {
    let mut depth = 0;
    let mut current = scene.parent(id);
    while let Some(parent) = current {
        depth += 1;
        current = scene.parent(parent);
    }
    depth
}

fn write_node(scene: &Scene, id: ActorId, level: usize, max_children: usize, out: &mut String) {
    let Some(node) = scene.get(id) else {
        return;
    };
    let p = node.transform.position;
    let _ = writeln!(
        out,
        "{:indent$}{} [{}] {} pos=({:.2}, {:.2}, {:.2})",
        "",
        node.name,
        node.kind.label(),
        id,
        p.x,
        p.y,
        p.z,
        indent = level * 2
    );

    let children = node.children();
    for &child in children.iter().take(max_children) {
        write_node(scene, child, level + 1, max_children, out);
    }
    if children.len() > max_children {
        let _ = writeln!(
            out,
            "{:indent$}... {} more",
            "",
            children.len() - max_children,
            indent = (level + 1) * 2
        );
    }
}

/// Counts over the whole scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneSummary {
    /// Every actor, detached ones included.
    pub actors: usize,
    /// Actors reachable from the root, the root included.
    pub attached: usize,
    /// Mesh actors that actually reference a mesh.
    pub meshes: usize,
    pub universes: usize,
    pub max_depth: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: actors={} attached={} meshes={} universes={} depth={}",
            self.actors, self.attached, self.meshes, self.universes, self.max_depth
        )
    }
}

/// Detailed info about a single actor.
#[derive(Debug, Clone)]
pub struct ActorInfo {
    pub id: ActorId,
    pub name: String,
    pub kind: &'static str,
    pub parent: Option<ActorId>,
    pub children: usize,
    pub local_position: Vec3,
    pub local_scale: Vec3,
    pub world_position: Vec3,
}

impl std::fmt::Display for ActorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let w = self.world_position;
        let s = self.local_scale;
        write!(
            f,
            "{} [{}] {} world=({:.2}, {:.2}, {:.2}) scale=({:.2}, {:.2}, {:.2}) children={}",
            self.name, self.kind, self.id, w.x, w.y, w.z, s.x, s.y, s.z, self.children
        )
    }
}
