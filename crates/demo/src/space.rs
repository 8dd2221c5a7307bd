use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use glam::{Quat, Vec3, Vec4};
use tinyengine_assets::{CUBE, Material, SKY_SPHERE, SPHERE};
use tinyengine_common::{ActorId, Transform};
use tinyengine_input::Key;
use tinyengine_render::{Camera, DirectionalLight, FlyCamera, Lighting, Renderer};
use tinyengine_runtime::{EngineError, FrameContext, Game, InitContext};
use tinyengine_scene::{ActorCamera, ActorNode, MeshActor, Scene, UniverseActor, UpdateContext};

const FLY_START: Vec3 = Vec3::new(0.0, 0.0, 12.0);
const SKY_SCALE: f32 = 500.0;
const PLANET_SCALE: f32 = 2.0;
/// Radians per second.
const PLANET_SPIN: f32 = 0.2;
const PROBE_ORBIT: f32 = 0.5;
const PROBE_RADIUS: f32 = 5.0;
const PROBE_SCALE: f32 = 0.3;

const STAR_COLORS: [[f32; 3]; 7] = [
    [1.0, 1.0, 0.95],
    [1.0, 0.95, 0.6],
    [1.0, 0.7, 0.35],
    [1.0, 0.4, 0.3],
    [0.6, 0.75, 1.0],
    [0.8, 0.9, 1.0],
    [0.75, 0.55, 1.0],
];

/// Which camera the game currently renders through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    /// Player-controlled free-fly camera.
    Fly,
    /// Camera riding the probe that orbits the planet.
    Probe,
}

#[derive(Debug, Clone, Copy)]
struct Layout {
    rig: ActorId,
    skybox: ActorId,
    planet: ActorId,
    pivot: ActorId,
    probe: ActorId,
    universe: ActorId,
}

/// The space explorer: a planet, a probe orbiting it, a skybox that follows
/// the viewer and an endless star field.
pub struct SpaceGame {
    scene: Scene,
    fly: Rc<RefCell<FlyCamera>>,
    probe_camera: Option<Rc<RefCell<ActorCamera>>>,
    mode: CameraMode,
    layout: Option<Layout>,
}

impl Default for SpaceGame {
    fn default() -> Self {
        Self::new()
    }
}

impl SpaceGame {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            fly: Rc::new(RefCell::new(FlyCamera::at(FLY_START))),
            probe_camera: None,
            mode: CameraMode::Fly,
            layout: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.mode
    }

    pub fn fly_camera(&self) -> Rc<RefCell<FlyCamera>> {
        Rc::clone(&self.fly)
    }

    /// The star field actor, once the scene is built.
    pub fn universe(&self) -> Option<ActorId> {
        self.layout.map(|l| l.universe)
    }

    pub fn skybox(&self) -> Option<ActorId> {
        self.layout.map(|l| l.skybox)
    }

    /// World-space eye of the active camera.
    pub fn active_eye(&self) -> Vec3 {
        match (&self.mode, &self.probe_camera) {
            (CameraMode::Probe, Some(probe)) => probe.borrow().eye(),
            _ => self.fly.borrow().eye(),
        }
    }

    fn toggle_camera(&mut self) {
        self.mode = match self.mode {
            CameraMode::Fly if self.probe_camera.is_some() => CameraMode::Probe,
            _ => CameraMode::Fly,
        };
        tracing::info!(mode = ?self.mode, "camera switched");
    }

    fn build_scene(&mut self, ctx: &mut InitContext<'_>) -> Result<Layout, EngineError> {
        let sky = ctx.assets.load_mesh(SKY_SPHERE)?;
        let sphere = ctx.assets.load_mesh(SPHERE)?;
        let cube = ctx.assets.load_mesh(CUBE)?;
        let root = self.scene.root();

        let rig = self.scene.spawn(
            root,
            ActorNode::plain("camera rig").with_transform(Transform::from_position(FLY_START)),
        )?;
        let skybox = self.scene.spawn(
            rig,
            ActorNode::mesh("skybox", MeshActor::from_asset(&sky))
                .with_transform(Transform::default().with_uniform_scale(SKY_SCALE)),
        )?;

        let planet_material = Arc::new(Material::with_diffuse(
            "planet",
            Vec3::new(0.85, 0.65, 0.35),
        ));
        let planet = self.scene.spawn(
            root,
            ActorNode::mesh(
                "planet",
                MeshActor::new(Arc::clone(&sphere.mesh)).with_materials(vec![planet_material]),
            )
            .with_transform(Transform::default().with_uniform_scale(PLANET_SCALE)),
        )?;

        let pivot = self.scene.spawn(root, ActorNode::plain("probe pivot"))?;
        let probe = self.scene.spawn(
            pivot,
            ActorNode::mesh("probe", MeshActor::from_asset(&cube)).with_transform(
                Transform::from_position(Vec3::new(0.0, 0.0, PROBE_RADIUS))
                    .with_uniform_scale(PROBE_SCALE),
            ),
        )?;

        let config = ctx.config.universe.clone();
        let palette = star_palette(config.palette_size);
        let universe = self.scene.spawn(
            root,
            ActorNode::universe(
                "universe",
                UniverseActor::new(config, Arc::clone(&sphere.mesh), palette),
            ),
        )?;

        Ok(Layout {
            rig,
            skybox,
            planet,
            pivot,
            probe,
            universe,
        })
    }

    fn set_rotation(&mut self, id: ActorId, rotation: Quat) {
        if let Some(node) = self.scene.get_mut(id) {
            node.transform.rotation = rotation;
        }
    }
}

/// A single half-strength sun from +X in black space.
pub fn space_lighting() -> Lighting {
    let ambient = Vec4::new(0.0, 0.0, 0.0, 1.0);
    Lighting {
        lights: [
            DirectionalLight::new(Vec3::NEG_X, Vec4::new(1.0, 1.0, 1.0, 0.5)),
            DirectionalLight::OFF,
            DirectionalLight::OFF,
        ],
        ambient,
        clear_color: ambient,
    }
}

/// One material per palette slot, cycling through the star colours.
fn star_palette(size: usize) -> Vec<Arc<Material>> {
    (0..size.max(1))
        .map(|i| {
            let [r, g, b] = STAR_COLORS[i % STAR_COLORS.len()];
            Arc::new(Material::with_diffuse(format!("star {i}"), Vec3::new(r, g, b)))
        })
        .collect()
}

impl Game for SpaceGame {
    fn on_init(&mut self, ctx: &mut InitContext<'_>) -> Result<(), EngineError> {
        let _span = tracing::info_span!("space_init").entered();
        let layout = self.build_scene(ctx)?;

        let (width, height) = ctx.size;
        let probe = Rc::new(RefCell::new(ActorCamera::new(layout.probe)));
        if width > 0 && height > 0 {
            let aspect = width as f32 / height as f32;
            self.fly.borrow_mut().lens.aspect = aspect;
            probe.borrow_mut().lens.aspect = aspect;
        }
        probe.borrow_mut().sync(&self.scene)?;
        ctx.renderer.set_lighting(space_lighting());

        ctx.subject.add_observer(&self.fly);
        ctx.subject.add_observer(&probe);
        self.probe_camera = Some(probe);
        self.layout = Some(layout);

        tracing::info!(actors = self.scene.len(), "space scene ready");
        Ok(())
    }

    fn on_update(&mut self, ctx: &FrameContext<'_>) {
        let Some(layout) = self.layout else {
            return;
        };

        if ctx.input.key_down(Key::Tab) {
            self.toggle_camera();
        }
        if self.mode == CameraMode::Fly {
            self.fly.borrow_mut().update(ctx.input, ctx.delta);
        }

        self.set_rotation(
            layout.planet,
            Quat::from_rotation_y(ctx.elapsed * PLANET_SPIN),
        );
        self.set_rotation(layout.pivot, Quat::from_rotation_y(ctx.elapsed * PROBE_ORBIT));

        if let Some(probe) = &self.probe_camera {
            if let Err(e) = probe.borrow_mut().sync(&self.scene) {
                tracing::warn!(error = %e, "probe camera lost its actor");
            }
        }

        let eye = self.active_eye();
        if let Some(rig) = self.scene.get_mut(layout.rig) {
            rig.transform.position = eye;
        }

        self.scene.update(&UpdateContext {
            elapsed: ctx.elapsed,
            delta: ctx.delta,
            eye,
        });
    }

    fn on_draw(&mut self, renderer: &mut dyn Renderer) {
        let draws = match (&self.mode, &self.probe_camera) {
            (CameraMode::Probe, Some(probe)) => self.scene.draw(renderer, &*probe.borrow()),
            _ => self.scene.draw(renderer, &*self.fly.borrow()),
        };
        tracing::trace!(draws, "space scene drawn");
    }

    fn on_shutdown(&mut self) {
        tracing::info!(actors = self.scene.len(), "space game shut down");
    }
}
