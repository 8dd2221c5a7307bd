use std::cell::Cell;

use glam::{Mat4, Vec3};
use tinyengine_event::{Event, Observer};
use tinyengine_input::{Input, Key};

/// Anything the renderer can look through.
pub trait Camera {
    /// World-space eye position.
    fn eye(&self) -> Vec3;
    fn view(&self) -> Mat4;
    fn projection(&self) -> Mat4;

    fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov_y: 60.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

impl Lens {
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Track the window's aspect ratio. Minimised windows are ignored.
    pub fn apply_resize(&mut self, event: &Event) -> bool {
        match event.resize_aspect() {
            Some(aspect) => {
                self.aspect = aspect;
                true
            }
            None => false,
        }
    }
}

/// Fixed camera looking at a target point.
///
/// The view matrix is cached and rebuilt lazily after the eye or target moves.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    eye: Vec3,
    target: Vec3,
    up: Vec3,
    pub lens: Lens,
    view_cache: Cell<Option<Mat4>>,
}

impl OrbitCamera {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            lens: Lens::default(),
            view_cache: Cell::new(None),
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn set_eye(&mut self, eye: Vec3) {
        self.eye = eye;
        self.view_cache.set(None);
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.view_cache.set(None);
    }

    /// Rotate the eye about the target around world +Y.
    pub fn orbit(&mut self, angle: f32) {
        let offset = glam::Quat::from_rotation_y(angle) * (self.eye - self.target);
        self.set_eye(self.target + offset);
    }
}

impl Camera for OrbitCamera {
    fn eye(&self) -> Vec3 {
        self.eye
    }

    fn view(&self) -> Mat4 {
        if let Some(view) = self.view_cache.get() {
            return view;
        }
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        self.view_cache.set(Some(view));
        view
    }

    fn projection(&self) -> Mat4 {
        self.lens.projection()
    }
}

impl Observer for OrbitCamera {
    fn on_notify(&mut self, event: &Event) {
        self.lens.apply_resize(event);
    }
}

/// Free-flying camera: WASD to move, R/F for up/down, mouse to look.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub lens: Lens,
    /// Units per second.
    pub speed: f32,
    /// Radians per unit of mouse motion.
    pub sensitivity: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: -90.0_f32.to_radians(),
            pitch: 0.0,
            lens: Lens::default(),
            speed: 2.0,
            sensitivity: 0.003,
        }
    }
}

impl FlyCamera {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        let limit = 89.0_f32.to_radians();
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch - dy * self.sensitivity).clamp(-limit, limit);
    }

    /// Apply one frame of held keys and mouse motion.
    pub fn update(&mut self, input: &Input, delta: f32) {
        let mouse = input.mouse_delta();
        if mouse != glam::Vec2::ZERO {
            self.rotate(mouse.x, mouse.y);
        }

        let forward = self.forward();
        let right = self.right();
        let mut direction = Vec3::ZERO;
        for (key, axis) in [
            (Key::W, forward),
            (Key::S, -forward),
            (Key::D, right),
            (Key::A, -right),
            (Key::R, Vec3::Y),
            (Key::F, Vec3::NEG_Y),
        ] {
            if input.key(key) {
                direction += axis;
            }
        }
        self.position += direction * self.speed * delta;
    }
}

impl Camera for FlyCamera {
    fn eye(&self) -> Vec3 {
        self.position
    }

    fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    fn projection(&self) -> Mat4 {
        self.lens.projection()
    }
}

impl Observer for FlyCamera {
    fn on_notify(&mut self, event: &Event) {
        if self.lens.apply_resize(event) {
            tracing::trace!(aspect = self.lens.aspect, "fly camera aspect updated");
        }
    }
}
