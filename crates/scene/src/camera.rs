use glam::{Mat4, Vec3};
use tinyengine_common::ActorId;
use tinyengine_event::{Event, Observer};
use tinyengine_render::{Camera, Lens};

use crate::scene::{Scene, SceneError};

/// Camera that looks out from an actor: its eye is the actor's world
/// position and it faces the actor's local -Z.
///
/// Scale in the actor chain is ignored for the view. Call [`ActorCamera::sync`]
/// after the scene update and before drawing.
#[derive(Debug, Clone)]
pub struct ActorCamera {
    actor: ActorId,
    pub lens: Lens,
    eye: Vec3,
    view: Mat4,
}

impl ActorCamera {
    pub fn new(actor: ActorId) -> Self {
        Self {
            actor,
            lens: Lens::default(),
            eye: Vec3::ZERO,
            view: Mat4::IDENTITY,
        }
    }

    pub fn actor(&self) -> ActorId {
        self.actor
    }

    /// Refresh eye and view from the actor's current world transform.
    pub fn sync(&mut self, scene: &Scene) -> Result<(), SceneError> {
        let world = scene.world_matrix(self.actor)?;
        let (_, rotation, translation) = world.to_scale_rotation_translation();
        self.eye = translation;
        self.view = Mat4::from_rotation_translation(rotation.normalize(), translation).inverse();
        Ok(())
    }
}

impl Camera for ActorCamera {
    fn eye(&self) -> Vec3 {
        self.eye
    }

    fn view(&self) -> Mat4 {
        self.view
    }

    fn projection(&self) -> Mat4 {
        self.lens.projection()
    }
}

impl Observer for ActorCamera {
    fn on_notify(&mut self, event: &Event) {
        self.lens.apply_resize(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorNode;
    use glam::Quat;
    use tinyengine_common::Transform;

    #[test]
    fn follows_actor_world_transform() {
        let mut scene = Scene::new();
        let root = scene.root();
        let pivot = scene
            .spawn(
                root,
                ActorNode::plain("pivot")
                    .with_transform(Transform::default().with_rotation(Quat::from_rotation_y(
                        std::f32::consts::FRAC_PI_2,
                    ))),
            )
            .unwrap();
        let probe = scene
            .spawn(
                pivot,
                ActorNode::plain("probe")
                    .with_transform(Transform::from_position(Vec3::new(0.0, 0.0, 4.0)).with_uniform_scale(5.0)),
            )
            .unwrap();

        let mut camera = ActorCamera::new(probe);
        camera.sync(&scene).unwrap();

        assert!(camera.eye().abs_diff_eq(Vec3::new(4.0, 0.0, 0.0), 1e-5));
        // The probe's eye maps to the view-space origin, unscaled.
        let at_eye = camera.view().transform_point3(camera.eye());
        assert!(at_eye.abs_diff_eq(Vec3::ZERO, 1e-5));
        // Local -Z of the probe is world -X after the pivot's turn.
        let ahead = camera.view().transform_point3(Vec3::new(3.0, 0.0, 0.0));
        assert!(ahead.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-4));
    }

    #[test]
    fn sync_on_destroyed_actor_fails() {
        let mut scene = Scene::new();
        let id = scene.spawn(scene.root(), ActorNode::plain("x")).unwrap();
        scene.destroy(id).unwrap();
        let mut camera = ActorCamera::new(id);
        assert_eq!(camera.sync(&scene), Err(SceneError::UnknownActor(id)));
    }
}
