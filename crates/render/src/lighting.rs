use glam::{Vec3, Vec4};

/// Number of directional lights a frame is lit by.
pub const MAX_LIGHTS: usize = 3;

/// A light infinitely far away, shining along `direction`.
///
/// `color.rgb` is the tint and `color.a` its intensity; a zero intensity
/// switches the light off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub color: Vec4,
}

impl DirectionalLight {
    /// Light shining along `direction` (normalized here).
    pub fn new(direction: Vec3, color: Vec4) -> Self {
        Self {
            direction: direction.normalize_or(Vec3::NEG_Y),
            color,
        }
    }

    pub const OFF: Self = Self {
        direction: Vec3::NEG_Y,
        color: Vec4::ZERO,
    };

    pub fn is_off(&self) -> bool {
        self.color.w <= 0.0
    }
}

/// Scene-wide lighting: a fixed set of directional lights, an ambient term
/// and the colour the frame is cleared to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub lights: [DirectionalLight; MAX_LIGHTS],
    /// `rgb` tint, `a` intensity.
    pub ambient: Vec4,
    pub clear_color: Vec4,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            lights: [
                DirectionalLight::new(Vec3::new(-1.0, -0.2, -0.3), Vec4::ONE),
                DirectionalLight::OFF,
                DirectionalLight::OFF,
            ],
            ambient: Vec4::new(1.0, 1.0, 1.0, 0.15),
            clear_color: Vec4::new(0.0, 0.0, 0.02, 1.0),
        }
    }
}

impl Lighting {
    /// Lights with a non-zero intensity.
    pub fn active_lights(&self) -> impl Iterator<Item = &DirectionalLight> {
        self.lights.iter().filter(|l| !l.is_off())
    }
}
