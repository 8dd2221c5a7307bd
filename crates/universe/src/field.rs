use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::cell::CellCoord;
use crate::rng::CellRng;

/// Star field tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseConfig {
    /// Edge length, in cells, of the generated cube around the centre.
    pub extent: i32,
    /// Probability that a cell holds a star.
    pub density: f32,
    /// Uniform scale of each star.
    pub star_scale: f32,
    /// Regenerate once the viewer's cell is farther than this from the last centre.
    pub retrigger_distance: f32,
    /// Number of material variants stars pick from.
    pub palette_size: usize,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            extent: 16,
            density: 0.1,
            star_scale: 0.1,
            retrigger_distance: 1.0,
            palette_size: 7,
        }
    }
}

impl UniverseConfig {
    /// Offsets along one axis: `[-extent/2, extent - extent/2)`.
    pub fn axis_offsets(&self) -> std::ops::Range<i32> {
        let extent = self.extent.max(0);
        let low = -(extent / 2);
        low..low + extent
    }

    /// Cells in the generated cube, saturating at `usize::MAX`.
    pub fn cell_count(&self) -> usize {
        let n = self.extent.max(0) as usize;
        n.saturating_mul(n).saturating_mul(n)
    }
}

/// Where one star goes and what it looks like.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarPlacement {
    pub cell: CellCoord,
    pub position: Vec3,
    pub scale: f32,
    /// Index into the material palette.
    pub material: usize,
}

/// The star for `cell`, if it has one. Depends only on `cell` and `config`.
///
/// Draw order from the cell's generator: occupancy, palette index, then
/// jitter along x, y and z.
pub fn place_star(cell: CellCoord, config: &UniverseConfig) -> Option<StarPlacement> {
    let mut rng = CellRng::from_hash(cell.spatial_hash());
    if rng.next_f32() > config.density {
        return None;
    }
    let material = rng.below(config.palette_size);
    let jitter = Vec3::new(
        rng.next_f32() - 0.5,
        rng.next_f32() - 0.5,
        rng.next_f32() - 0.5,
    );
    Some(StarPlacement {
        cell,
        position: cell.as_vec3() + jitter,
        scale: config.star_scale,
        material,
    })
}

/// Every star in the cube of cells around `center`, in x-major order.
pub fn plan(center: CellCoord, config: &UniverseConfig) -> Vec<StarPlacement> {
    let offsets = config.axis_offsets();
    let mut stars = Vec::with_capacity(
        (config.cell_count() as f32 * config.density.clamp(0.0, 1.0)) as usize + 1,
    );
    for dx in offsets.clone() {
        for dy in offsets.clone() {
            for dz in offsets.clone() {
                if let Some(star) = place_star(center.offset(dx, dy, dz), config) {
                    stars.push(star);
                }
            }
        }
    }
    stars
}

/// Regeneration bookkeeping for a star field that follows the viewer.
#[derive(Debug, Clone, Default)]
pub struct StarField {
    pub config: UniverseConfig,
    last_center: Option<CellCoord>,
    generations: u64,
}

impl StarField {
    pub fn new(config: UniverseConfig) -> Self {
        Self {
            config,
            last_center: None,
            generations: 0,
        }
    }

    /// Centre of the last generation, if any.
    pub fn last_center(&self) -> Option<CellCoord> {
        self.last_center
    }

    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// The cell to regenerate around, if the viewer at `eye` has moved far
    /// enough from the last centre (or nothing has been generated yet).
    pub fn should_regenerate(&self, eye: Vec3) -> Option<CellCoord> {
        let center = CellCoord::containing(eye);
        match self.last_center {
            None => Some(center),
            Some(last) if center.distance(last) > self.config.retrigger_distance => Some(center),
            Some(_) => None,
        }
    }

    /// Record a generation around `center` and return its stars.
    pub fn generate(&mut self, center: CellCoord) -> Vec<StarPlacement> {
        let _span = tracing::info_span!("universe_generate", %center).entered();
        self.last_center = Some(center);
        self.generations += 1;
        let stars = plan(center, &self.config);
        tracing::debug!(
            stars = stars.len(),
            generation = self.generations,
            "star field regenerated"
        );
        stars
    }
}
