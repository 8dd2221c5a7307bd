use std::cell::RefCell;
use std::rc::Rc;

use glam::{Vec2, Vec3, Vec4};
use tinyengine_assets::{CUBE, SPHERE};
use tinyengine_common::{ActorId, Transform};
use tinyengine_input::{Input, Key};
use tinyengine_render::{DirectionalLight, Lighting, OrbitCamera, Renderer};
use tinyengine_runtime::{EngineError, FrameContext, Game, InitContext};
use tinyengine_scene::{ActorNode, MeshActor, Scene};
use tinyengine_universe::CellRng;

const CAMERA_DISTANCE: f32 = 50.0;
const PADDLE_X: f32 = 30.0;
const PADDLE_SIZE: Vec2 = Vec2::new(1.0, 4.0);
/// Paddle centres stay within `±PADDLE_LIMIT`.
const PADDLE_LIMIT: f32 = 15.0;
const PADDLE_SPEED: f32 = 25.0;
const BALL_SIZE: Vec2 = Vec2::ONE;
const BALL_SPEED: f32 = 25.0;
/// Top and bottom walls.
const WALL_Y: f32 = 17.0;
/// Past this the point is over and the ball is served again.
const OUT_X: f32 = 34.0;
const DEFAULT_SEED: u64 = 0x5eed_ba11;

/// Axis-aligned rectangle on the court plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Overlap with a non-zero area; touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Something on the court: a paddle or the ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position, self.size)
    }

    fn transform(&self) -> Transform {
        Transform::from_position(self.position.extend(0.0)).with_scale(self.size.extend(1.0))
    }
}

#[derive(Debug, Clone, Copy)]
struct Actors {
    ball: ActorId,
    left: ActorId,
    right: ActorId,
}

/// Two-player paddle game: W/S moves the left paddle, I/K the right one.
pub struct PaddleGame {
    scene: Scene,
    camera: Rc<RefCell<OrbitCamera>>,
    rng: CellRng,
    ball: Body,
    direction: Vec2,
    left: Body,
    right: Body,
    actors: Option<Actors>,
    serves: u64,
    paddle_hits: u64,
}

impl Default for PaddleGame {
    fn default() -> Self {
        Self::new()
    }
}

impl PaddleGame {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// A game whose serve directions are drawn from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        let paddle = |x: f32| Body {
            position: Vec2::new(x, 0.0),
            size: PADDLE_SIZE,
        };
        let mut game = Self {
            scene: Scene::new(),
            camera: Rc::new(RefCell::new(OrbitCamera::new(
                Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
                Vec3::ZERO,
            ))),
            rng: CellRng::new(seed),
            ball: Body {
                position: Vec2::ZERO,
                size: BALL_SIZE,
            },
            direction: Vec2::X,
            left: paddle(-PADDLE_X),
            right: paddle(PADDLE_X),
            actors: None,
            serves: 0,
            paddle_hits: 0,
        };
        game.serve();
        game
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn ball(&self) -> Body {
        self.ball
    }

    /// Unit direction the ball travels in.
    pub fn ball_direction(&self) -> Vec2 {
        self.direction
    }

    /// Vertical positions of the left and right paddles.
    pub fn paddles(&self) -> (f32, f32) {
        (self.left.position.y, self.right.position.y)
    }

    /// Times the ball was put in play, the opening serve included.
    pub fn serves(&self) -> u64 {
        self.serves
    }

    pub fn paddle_hits(&self) -> u64 {
        self.paddle_hits
    }

    fn serve(&mut self) {
        self.ball.position = Vec2::ZERO;
        let x = if self.rng.next_f32() < 0.5 { -1.0 } else { 1.0 };
        self.direction = Vec2::new(x, 0.0);
        self.serves += 1;
        tracing::debug!(serves = self.serves, x, "ball served");
    }

    fn step(&mut self, input: &Input, delta: f32) {
        move_paddle(&mut self.left, input, Key::W, Key::S, delta);
        move_paddle(&mut self.right, input, Key::I, Key::K, delta);

        let mut direction = self.direction.normalize_or(Vec2::X);
        let y = self.ball.position.y;
        if (y > WALL_Y && direction.y > 0.0) || (y < -WALL_Y && direction.y < 0.0) {
            direction.y = -direction.y;
        }

        let ball = self.ball.bounds();
        for paddle in [&self.left, &self.right] {
            if ball.intersects(&paddle.bounds()) {
                direction = (self.ball.position - paddle.position).normalize_or(-direction);
                self.paddle_hits += 1;
                tracing::trace!(hits = self.paddle_hits, "paddle hit");
            }
        }

        self.direction = direction;
        self.ball.position += direction * BALL_SPEED * delta;

        if self.ball.position.x.abs() > OUT_X {
            self.serve();
        }
    }

    fn sync_actors(&mut self) {
        let Some(actors) = self.actors else {
            return;
        };
        for (id, body) in [
            (actors.ball, self.ball),
            (actors.left, self.left),
            (actors.right, self.right),
        ] {
            if let Some(node) = self.scene.get_mut(id) {
                node.transform = body.transform();
            }
        }
    }
}

fn move_paddle(paddle: &mut Body, input: &Input, up: Key, down: Key, delta: f32) {
    let mut dir = 0.0;
    if input.key(up) {
        dir += 1.0;
    }
    if input.key(down) {
        dir -= 1.0;
    }
    let y = paddle.position.y + dir * PADDLE_SPEED * delta;
    paddle.position.y = y.clamp(-PADDLE_LIMIT, PADDLE_LIMIT);
}

/// Three coloured lights over a dim blue ambient.
pub fn paddle_lighting() -> Lighting {
    Lighting {
        lights: [
            DirectionalLight::new(Vec3::new(-1.0, 0.0, -1.0), Vec4::ONE),
            DirectionalLight::new(Vec3::new(1.0, 0.0, -1.0), Vec4::new(0.0, 1.0, 1.0, 1.0)),
            DirectionalLight::new(Vec3::new(-1.0, -2.0, 1.0), Vec4::new(1.0, 0.0, 1.0, 1.0)),
        ],
        ambient: Vec4::new(0.1, 0.1, 0.2, 0.5),
        clear_color: Vec4::new(0.1, 0.1, 0.2, 1.0),
    }
}

impl Game for PaddleGame {
    fn on_init(&mut self, ctx: &mut InitContext<'_>) -> Result<(), EngineError> {
        let _span = tracing::info_span!("paddle_init").entered();
        let sphere = ctx.assets.load_mesh(SPHERE)?;
        let cube = ctx.assets.load_mesh(CUBE)?;
        let root = self.scene.root();

        let ball = self.scene.spawn(
            root,
            ActorNode::mesh("ball", MeshActor::from_asset(&sphere)).with_transform(self.ball.transform()),
        )?;
        let left = self.scene.spawn(
            root,
            ActorNode::mesh("left paddle", MeshActor::from_asset(&cube))
                .with_transform(self.left.transform()),
        )?;
        let right = self.scene.spawn(
            root,
            ActorNode::mesh("right paddle", MeshActor::from_asset(&cube))
                .with_transform(self.right.transform()),
        )?;
        self.actors = Some(Actors { ball, left, right });

        let (width, height) = ctx.size;
        if width > 0 && height > 0 {
            self.camera.borrow_mut().lens.aspect = width as f32 / height as f32;
        }
        ctx.subject.add_observer(&self.camera);
        ctx.renderer.set_lighting(paddle_lighting());

        tracing::info!("paddle court ready");
        Ok(())
    }

    fn on_update(&mut self, ctx: &FrameContext<'_>) {
        self.step(ctx.input, ctx.delta);
        self.sync_actors();
    }

    fn on_draw(&mut self, renderer: &mut dyn Renderer) {
        let draws = self.scene.draw(renderer, &*self.camera.borrow());
        tracing::trace!(draws, "court drawn");
    }

    fn on_shutdown(&mut self) {
        tracing::info!(
            serves = self.serves,
            paddle_hits = self.paddle_hits,
            "paddle game shut down"
        );
    }
}
