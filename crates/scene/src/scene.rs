use std::collections::BTreeMap;

use glam::{Mat4, Vec3};
use tinyengine_common::{ActorId, Transform};
use tinyengine_render::{Camera, Renderer};
use tinyengine_universe::CellCoord;

use crate::actor::{ActorKind, ActorNode};

/// Errors from scene hierarchy operations.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SceneError {
    #[error("actor {0} not found")]
    UnknownActor(ActorId),
    #[error("attaching {child} under {parent} would create a cycle")]
    Cycle { child: ActorId, parent: ActorId },
    #[error("the root actor cannot be {0}")]
    RootMutation(&'static str),
    #[error("actor {0} is not a universe")]
    NotAUniverse(ActorId),
}

/// Per-frame timing and viewpoint handed to the update traversal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UpdateContext {
    /// Seconds since the loop started.
    pub elapsed: f32,
    /// Seconds since the previous rendered frame.
    pub delta: f32,
    /// World-space eye of the active camera.
    pub eye: Vec3,
}

/// Arena-backed actor tree.
///
/// Every actor is reachable by id. Actors attached under the root are
/// updated and drawn; detached actors stay alive until they are re-attached
/// or destroyed.
#[derive(Debug, Clone)]
pub struct Scene {
    actors: BTreeMap<ActorId, ActorNode>,
    root: ActorId,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// An empty scene: just the root.
    pub fn new() -> Self {
        let root = ActorId::new();
        let mut actors = BTreeMap::new();
        actors.insert(root, ActorNode::plain("root"));
        Self { actors, root }
    }

    pub fn root(&self) -> ActorId {
        self.root
    }

    /// Number of actors, root and detached ones included.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    pub fn get(&self, id: ActorId) -> Option<&ActorNode> {
        self.actors.get(&id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut ActorNode> {
        self.actors.get_mut(&id)
    }

    /// All actors in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &ActorNode)> {
        self.actors.iter().map(|(id, node)| (*id, node))
    }

    pub fn parent(&self, id: ActorId) -> Option<ActorId> {
        self.actors.get(&id).and_then(|n| n.parent)
    }

    /// Children of `id` in insertion order; empty for unknown actors.
    pub fn children(&self, id: ActorId) -> &[ActorId] {
        self.actors.get(&id).map_or(&[], |n| n.children.as_slice())
    }

    /// `id` followed by all of its descendants, depth first.
    pub fn descendants(&self, id: ActorId) -> Vec<ActorId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.actors.get(&current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Is `id` connected to the root through parent links?
    pub fn is_attached(&self, id: ActorId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == self.root {
                return true;
            }
            current = self.parent(c);
        }
        false
    }

    /// Insert `node` as the last child of `parent`.
    pub fn spawn(&mut self, parent: ActorId, mut node: ActorNode) -> Result<ActorId, SceneError> {
        let parent_node = self
            .actors
            .get_mut(&parent)
            .ok_or(SceneError::UnknownActor(parent))?;
        let id = ActorId::new();
        parent_node.children.push(id);

        node.parent = Some(parent);
        node.children.clear();
        tracing::trace!(%id, %parent, name = %node.name, kind = node.kind.label(), "actor spawned");
        self.actors.insert(id, node);
        Ok(id)
    }

    pub fn set_transform(&mut self, id: ActorId, transform: Transform) -> Result<(), SceneError> {
        let node = self
            .actors
            .get_mut(&id)
            .ok_or(SceneError::UnknownActor(id))?;
        node.transform = transform;
        Ok(())
    }

    /// Move `child` under `new_parent`, or detach it with `None`.
    ///
    /// The child is unlinked from its old parent first, so it is never listed
    /// by two parents. Re-parenting under the current parent moves it to the
    /// end of the child list.
    pub fn set_parent(
        &mut self,
        child: ActorId,
        new_parent: Option<ActorId>,
    ) -> Result<(), SceneError> {
        if child == self.root {
            return Err(SceneError::RootMutation("re-parented"));
        }
        if !self.actors.contains_key(&child) {
            return Err(SceneError::UnknownActor(child));
        }
        if let Some(parent) = new_parent {
            if !self.actors.contains_key(&parent) {
                return Err(SceneError::UnknownActor(parent));
            }
            if self.is_ancestor_or_self(child, parent) {
                return Err(SceneError::Cycle { child, parent });
            }
        }

        self.unlink(child);
        if let Some(parent) = new_parent {
            if let Some(p) = self.actors.get_mut(&parent) {
                p.children.push(child);
            }
        }
        if let Some(c) = self.actors.get_mut(&child) {
            c.parent = new_parent;
        }
        Ok(())
    }

    /// Attach `child` as the last child of `parent`.
    pub fn add_child(&mut self, parent: ActorId, child: ActorId) -> Result<(), SceneError> {
        self.set_parent(child, Some(parent))
    }

    /// Detach `child` from `parent`. Returns false if it was not `parent`'s child.
    ///
    /// The child stays in the scene, detached, until re-attached or destroyed.
    pub fn remove_child(&mut self, parent: ActorId, child: ActorId) -> Result<bool, SceneError> {
        if !self.actors.contains_key(&parent) {
            return Err(SceneError::UnknownActor(parent));
        }
        if self.parent(child) != Some(parent) {
            return Ok(false);
        }
        self.set_parent(child, None)?;
        Ok(true)
    }

    /// Remove `id` and its whole subtree. Returns how many actors were removed.
    pub fn destroy(&mut self, id: ActorId) -> Result<usize, SceneError> {
        if id == self.root {
            return Err(SceneError::RootMutation("destroyed"));
        }
        if !self.actors.contains_key(&id) {
            return Err(SceneError::UnknownActor(id));
        }
        self.unlink(id);
        let removed = self.remove_subtree(id);
        tracing::debug!(%id, removed, "actor destroyed");
        Ok(removed)
    }

    /// Destroy every child of `id`, keeping `id` itself.
    pub fn destroy_children(&mut self, id: ActorId) -> Result<usize, SceneError> {
        let node = self
            .actors
            .get_mut(&id)
            .ok_or(SceneError::UnknownActor(id))?;
        let children = std::mem::take(&mut node.children);
        Ok(children.into_iter().map(|c| self.remove_subtree(c)).sum())
    }

    /// Local-to-world matrix: the parent chain's local matrices, root first.
    pub fn world_matrix(&self, id: ActorId) -> Result<Mat4, SceneError> {
        let node = self.actors.get(&id).ok_or(SceneError::UnknownActor(id))?;
        let mut world = node.transform.local_matrix();
        let mut current = node.parent;
        while let Some(parent) = current {
            let Some(p) = self.actors.get(&parent) else {
                break;
            };
            world = p.transform.local_matrix() * world;
            current = p.parent;
        }
        Ok(world)
    }

    /// Update traversal: each actor's own behaviour, then its children in order.
    pub fn update(&mut self, ctx: &UpdateContext) {
        tracing::trace!(elapsed = ctx.elapsed, delta = ctx.delta, "scene update");
        self.update_node(self.root, ctx);
    }

    /// Draw traversal: every attached mesh actor submits itself, parents first.
    /// Returns the number of draw calls made.
    pub fn draw(&self, renderer: &mut dyn Renderer, camera: &dyn Camera) -> usize {
        let mut draws = 0;
        self.draw_node(self.root, Mat4::IDENTITY, renderer, camera, &mut draws);
        draws
    }

    /// Replace a universe actor's children with the stars around `center`.
    /// Returns the number of stars spawned.
    pub fn generate_universe(
        &mut self,
        id: ActorId,
        center: CellCoord,
    ) -> Result<usize, SceneError> {
        let stars = {
            let node = self
                .actors
                .get_mut(&id)
                .ok_or(SceneError::UnknownActor(id))?;
            let ActorKind::Universe(universe) = &mut node.kind else {
                return Err(SceneError::NotAUniverse(id));
            };
            let placements = universe.field.generate(center);
            placements
                .iter()
                .map(|p| {
                    ActorNode::mesh(format!("star {}", p.cell), universe.star(p)).with_transform(
                        Transform::from_position(p.position).with_uniform_scale(p.scale),
                    )
                })
                .collect::<Vec<_>>()
        };

        self.destroy_children(id)?;
        let count = stars.len();
        for star in stars {
            self.spawn(id, star)?;
        }
        Ok(count)
    }

    fn update_node(&mut self, id: ActorId, ctx: &UpdateContext) {
        let regenerate = match self.actors.get(&id).map(|n| &n.kind) {
            None => return,
            Some(ActorKind::Universe(universe)) => {
                // Stars live in the universe's local space.
                let eye = self
                    .world_matrix(id)
                    .map(|m| m.inverse().transform_point3(ctx.eye))
                    .unwrap_or(ctx.eye);
                universe.field.should_regenerate(eye)
            }
            Some(ActorKind::Plain | ActorKind::Mesh(_)) => None,
        };

        if let Some(center) = regenerate {
            if let Err(e) = self.generate_universe(id, center) {
                tracing::warn!(%id, error = %e, "universe regeneration failed");
            }
        }

        let children = self.children(id).to_vec();
        for child in children {
            self.update_node(child, ctx);
        }
    }

    fn draw_node(
        &self,
        id: ActorId,
        parent_world: Mat4,
        renderer: &mut dyn Renderer,
        camera: &dyn Camera,
        draws: &mut usize,
    ) {
        let Some(node) = self.actors.get(&id) else {
            return;
        };
        let world = parent_world * node.transform.local_matrix();
        if let ActorKind::Mesh(mesh_actor) = &node.kind {
            if let Some(mesh) = &mesh_actor.mesh {
                renderer.draw_mesh(mesh, &mesh_actor.materials, camera, world);
                *draws += 1;
            }
        }
        for &child in &node.children {
            self.draw_node(child, world, renderer, camera, draws);
        }
    }

    fn is_ancestor_or_self(&self, ancestor: ActorId, id: ActorId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.parent(c);
        }
        false
    }

    fn unlink(&mut self, child: ActorId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(p) = self.actors.get_mut(&parent) {
            p.children.retain(|c| *c != child);
        }
        if let Some(c) = self.actors.get_mut(&child) {
            c.parent = None;
        }
    }

    fn remove_subtree(&mut self, id: ActorId) -> usize {
        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.actors.remove(&current) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::MeshActor;
    use crate::universe::UniverseActor;
    use glam::Quat;
    use std::sync::Arc;
    use tinyengine_assets::{Material, Mesh, MeshPart};
    use tinyengine_render::{DebugTextRenderer, OrbitCamera};
    use tinyengine_universe::UniverseConfig;

    /// Every listed child points back at its parent, every parented actor is
    /// listed exactly once, and following parents never loops.
    fn assert_tree(scene: &Scene) {
        for (id, node) in scene.iter() {
            for &child in node.children() {
                assert_eq!(scene.parent(child), Some(id), "child {child} of {id}");
            }
            if let Some(parent) = node.parent() {
                let listed = scene
                    .children(parent)
                    .iter()
                    .filter(|c| **c == id)
                    .count();
                assert_eq!(listed, 1, "{id} listed {listed} times by {parent}");
            }
            let mut steps = 0;
            let mut current = Some(id);
            while let Some(c) = current {
                current = scene.parent(c);
                steps += 1;
                assert!(steps <= scene.len(), "cycle through {id}");
            }
        }
        assert_eq!(scene.parent(scene.root()), None);
    }

    fn test_mesh() -> Arc<Mesh> {
        Arc::new(Mesh::new(
            "builtin:test",
            Vec::new(),
            vec![MeshPart::new(vec![0, 1, 2])],
        ))
    }

    fn plain(scene: &mut Scene, parent: ActorId, name: &str) -> ActorId {
        scene.spawn(parent, ActorNode::plain(name)).unwrap()
    }

    #[test]
    fn new_scene_has_only_root() {
        let scene = Scene::new();
        assert_eq!(scene.len(), 1);
        assert!(scene.children(scene.root()).is_empty());
        assert!(scene.is_attached(scene.root()));
    }

    #[test]
    fn spawn_under_unknown_parent_fails() {
        let mut scene = Scene::new();
        let ghost = ActorId::new();
        assert_eq!(
            scene.spawn(ghost, ActorNode::plain("x")),
            Err(SceneError::UnknownActor(ghost))
        );
    }

    #[test]
    fn set_parent_moves_between_parents() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = plain(&mut scene, root, "a");
        let b = plain(&mut scene, root, "b");
        let c = plain(&mut scene, a, "c");

        scene.set_parent(c, Some(b)).unwrap();
        assert!(scene.children(a).is_empty());
        assert_eq!(scene.children(b), &[c]);
        assert_eq!(scene.parent(c), Some(b));
        assert_tree(&scene);
    }

    #[test]
    fn cycles_are_rejected() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = plain(&mut scene, root, "a");
        let b = plain(&mut scene, a, "b");

        assert_eq!(
            scene.set_parent(a, Some(b)),
            Err(SceneError::Cycle {
                child: a,
                parent: b
            })
        );
        assert_eq!(
            scene.add_child(a, a),
            Err(SceneError::Cycle {
                child: a,
                parent: a
            })
        );
        assert_eq!(scene.parent(a), Some(root));
        assert_tree(&scene);
    }

    #[test]
    fn root_cannot_be_moved_or_destroyed() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = plain(&mut scene, root, "a");
        assert!(matches!(
            scene.set_parent(root, Some(a)),
            Err(SceneError::RootMutation(_))
        ));
        assert!(matches!(scene.destroy(root), Err(SceneError::RootMutation(_))));
    }

    #[test]
    fn remove_child_detaches_but_keeps_alive() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = plain(&mut scene, root, "a");
        let b = plain(&mut scene, root, "b");

        assert_eq!(scene.remove_child(b, a), Ok(false));
        assert_eq!(scene.remove_child(root, a), Ok(true));
        assert!(scene.contains(a));
        assert!(!scene.is_attached(a));
        assert_eq!(scene.parent(a), None);
        assert_eq!(scene.children(root), &[b]);
        assert_tree(&scene);

        scene.add_child(b, a).unwrap();
        assert!(scene.is_attached(a));
        assert_tree(&scene);
    }

    #[test]
    fn destroy_removes_subtree_and_detaches() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = plain(&mut scene, root, "a");
        let b = plain(&mut scene, a, "b");
        let c = plain(&mut scene, b, "c");
        let d = plain(&mut scene, root, "d");

        assert_eq!(scene.destroy(a), Ok(3));
        assert!(!scene.contains(a) && !scene.contains(b) && !scene.contains(c));
        assert_eq!(scene.children(root), &[d]);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.destroy(a), Err(SceneError::UnknownActor(a)));
        assert_tree(&scene);
    }

    #[test]
    fn tree_invariant_survives_mixed_operations() {
        let mut scene = Scene::new();
        let root = scene.root();
        let mut ids = vec![root];
        for i in 0..12 {
            let parent = ids[i / 2];
            ids.push(plain(&mut scene, parent, &format!("n{i}")));
        }

        // Deterministic pseudo-random sequence of operations; errors are fine,
        // the tree must stay consistent either way.
        let mut state = 17u64;
        for step in 0..200 {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let pick = |shift: u32| ids[((state >> shift) as usize) % ids.len()];
            let (x, y) = (pick(33), pick(45));
            let _ = match step % 4 {
                0 => scene.set_parent(x, Some(y)).map(|_| 0),
                1 => scene.add_child(y, x).map(|_| 0),
                2 => scene.remove_child(y, x).map(|_| 0),
                _ if step % 20 == 3 => scene.destroy(x),
                _ => scene.set_parent(x, None).map(|_| 0),
            };
            ids.retain(|id| scene.contains(*id));
            assert_tree(&scene);
        }
    }

    #[test]
    fn world_matrix_composes_three_levels() {
        let mut scene = Scene::new();
        let root = scene.root();
        let t1 = Transform::from_position(Vec3::new(10.0, 0.0, 0.0))
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let t2 = Transform::from_position(Vec3::new(0.0, 0.0, 5.0)).with_uniform_scale(2.0);
        let t3 = Transform::from_position(Vec3::new(1.0, 0.0, 0.0))
            .with_rotation(Quat::from_rotation_z(0.3))
            .with_scale(Vec3::new(1.0, 3.0, 1.0));

        let a = scene.spawn(root, ActorNode::plain("a").with_transform(t1)).unwrap();
        let b = scene.spawn(a, ActorNode::plain("b").with_transform(t2)).unwrap();
        let c = scene.spawn(b, ActorNode::plain("c").with_transform(t3)).unwrap();

        let expected = t1.local_matrix() * t2.local_matrix() * t3.local_matrix();
        assert!(scene.world_matrix(c).unwrap().abs_diff_eq(expected, 1e-5));

        // Origin of c: b's origin is (10,0,0) + R_y(90)(0,0,5) = (15,0,0);
        // then R_y(90) * 2 * (1,0,0) = (0,0,-2).
        let origin = scene.world_matrix(c).unwrap().transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(15.0, 0.0, -2.0), 1e-4));

        // Moving a parent is reflected on the next call.
        scene
            .set_transform(a, Transform::from_position(Vec3::new(0.0, 1.0, 0.0)))
            .unwrap();
        let moved = scene.world_matrix(c).unwrap().transform_point3(Vec3::ZERO);
        assert!(moved.abs_diff_eq(Vec3::new(2.0, 1.0, 5.0), 1e-4));
    }

    #[test]
    fn single_mesh_actor_draws_once_with_local_matrix() {
        let mut scene = Scene::new();
        let local = Transform::from_position(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation(Quat::from_rotation_x(0.5))
            .with_uniform_scale(0.25);
        scene
            .spawn(
                scene.root(),
                ActorNode::mesh("m", MeshActor::new(test_mesh())).with_transform(local),
            )
            .unwrap();

        let camera = OrbitCamera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let mut renderer = DebugTextRenderer::new();
        scene.update(&UpdateContext {
            elapsed: 0.1,
            delta: 0.1,
            eye: camera.eye(),
        });
        renderer.clear();
        let draws = scene.draw(&mut renderer, &camera);
        renderer.present();

        assert_eq!(draws, 1);
        assert_eq!(renderer.draws().len(), 1);
        assert_eq!(renderer.draws()[0].world, local.local_matrix());
        assert_eq!(renderer.draws()[0].materials, vec!["default"]);
    }

    #[test]
    fn draw_skips_meshless_and_detached_actors() {
        let mut scene = Scene::new();
        let root = scene.root();
        scene
            .spawn(root, ActorNode::mesh("empty", MeshActor::default()))
            .unwrap();
        let group = plain(&mut scene, root, "group");
        let drawn = scene
            .spawn(group, ActorNode::mesh("drawn", MeshActor::new(test_mesh())))
            .unwrap();
        let loose = scene
            .spawn(root, ActorNode::mesh("loose", MeshActor::new(test_mesh())))
            .unwrap();
        scene.remove_child(root, loose).unwrap();

        let camera = OrbitCamera::new(Vec3::Z, Vec3::ZERO);
        let mut renderer = DebugTextRenderer::new();
        assert_eq!(scene.draw(&mut renderer, &camera), 1);
        assert_eq!(renderer.draws()[0].mesh_name, "test");
        assert!(scene.contains(drawn));
    }

    #[test]
    fn draw_uses_world_matrix() {
        let mut scene = Scene::new();
        let root = scene.root();
        let parent = scene
            .spawn(
                root,
                ActorNode::plain("p").with_transform(
                    Transform::from_position(Vec3::X).with_rotation(Quat::from_rotation_y(1.0)),
                ),
            )
            .unwrap();
        let child = scene
            .spawn(
                parent,
                ActorNode::mesh("c", MeshActor::new(test_mesh()))
                    .with_transform(Transform::from_position(Vec3::Z).with_uniform_scale(3.0)),
            )
            .unwrap();

        let camera = OrbitCamera::new(Vec3::Z, Vec3::ZERO);
        let mut renderer = DebugTextRenderer::new();
        scene.draw(&mut renderer, &camera);
        assert!(renderer.draws()[0]
            .world
            .abs_diff_eq(scene.world_matrix(child).unwrap(), 1e-6));
    }

    fn universe_scene(config: UniverseConfig) -> (Scene, ActorId) {
        let mut scene = Scene::new();
        let palette = (0..config.palette_size)
            .map(|i| Arc::new(Material::with_diffuse(format!("star{i}"), Vec3::ONE)))
            .collect();
        let universe = UniverseActor::new(config, test_mesh(), palette);
        let id = scene
            .spawn(scene.root(), ActorNode::universe("universe", universe))
            .unwrap();
        (scene, id)
    }

    fn star_positions(scene: &Scene, universe: ActorId) -> Vec<Vec3> {
        scene
            .children(universe)
            .iter()
            .map(|c| scene.get(*c).unwrap().transform.position)
            .collect()
    }

    fn last_center(scene: &Scene, id: ActorId) -> Option<CellCoord> {
        match &scene.get(id).unwrap().kind {
            ActorKind::Universe(u) => u.field.last_center(),
            _ => None,
        }
    }

    #[test]
    fn universe_generates_on_first_update() {
        let (mut scene, id) = universe_scene(UniverseConfig::default());
        assert!(scene.children(id).is_empty());

        scene.update(&UpdateContext::default());
        let stars = scene.children(id).len();
        assert!(stars > 0);
        assert_eq!(scene.len(), 2 + stars);
        assert_eq!(last_center(&scene, id), Some(CellCoord::ORIGIN));

        for &star in scene.children(id) {
            let node = scene.get(star).unwrap();
            assert_eq!(node.transform.scale, Vec3::splat(0.1));
            let ActorKind::Mesh(m) = &node.kind else {
                panic!("star is not a mesh actor");
            };
            assert_eq!(m.materials.len(), 1);
            assert!(m.materials[0].name.starts_with("star"));
        }
        assert_tree(&scene);
    }

    #[test]
    fn universe_regeneration_is_deterministic() {
        let (mut scene, id) = universe_scene(UniverseConfig::default());
        scene.generate_universe(id, CellCoord::ORIGIN).unwrap();
        let first = star_positions(&scene, id);

        scene.generate_universe(id, CellCoord::new(40, -7, 3)).unwrap();
        let elsewhere = star_positions(&scene, id);
        assert_ne!(first, elsewhere);

        scene.generate_universe(id, CellCoord::ORIGIN).unwrap();
        assert_eq!(star_positions(&scene, id), first);
        // Old stars are gone, not accumulated.
        assert_eq!(scene.len(), 2 + first.len());
        assert_tree(&scene);
    }

    #[test]
    fn universe_retrigger_threshold() {
        let (mut scene, id) = universe_scene(UniverseConfig::default());
        let at = |x: f32| UpdateContext {
            eye: Vec3::new(x, 0.0, 0.0),
            ..UpdateContext::default()
        };

        scene.update(&at(0.0));
        let stars = scene.children(id).to_vec();

        // Distance is measured between floored cells: 1.5 floors to (1, 0, 0),
        // exactly 1.0 from the origin, which the strict `> 1.0` rule ignores.
        for x in [0.9, 1.2, 1.5] {
            scene.update(&at(x));
            assert_eq!(scene.children(id), stars.as_slice(), "regenerated at x={x}");
            assert_eq!(last_center(&scene, id), Some(CellCoord::ORIGIN));
        }

        scene.update(&at(2.1));
        assert_eq!(last_center(&scene, id), Some(CellCoord::new(2, 0, 0)));
        assert_ne!(scene.children(id), stars.as_slice());
    }

    #[test]
    fn universe_eye_is_taken_in_local_space() {
        let (mut scene, id) = universe_scene(UniverseConfig {
            extent: 2,
            ..UniverseConfig::default()
        });
        scene
            .set_transform(id, Transform::from_position(Vec3::new(100.0, 0.0, 0.0)))
            .unwrap();
        scene.update(&UpdateContext {
            eye: Vec3::new(100.5, 0.5, 0.5),
            ..UpdateContext::default()
        });
        assert_eq!(last_center(&scene, id), Some(CellCoord::ORIGIN));
    }

    #[test]
    fn generate_on_non_universe_fails() {
        let mut scene = Scene::new();
        let root = scene.root();
        assert_eq!(
            scene.generate_universe(root, CellCoord::ORIGIN),
            Err(SceneError::NotAUniverse(root))
        );
    }
}
