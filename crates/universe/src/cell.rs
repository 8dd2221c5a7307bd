use glam::{IVec3, Vec3};

/// One unit cube of the integer world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellCoord {
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Cell containing `pos`, by flooring each component.
    pub fn containing(pos: Vec3) -> Self {
        let f = pos.floor();
        Self::new(f.x as i32, f.y as i32, f.z as i32)
    }

    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(
            self.x.wrapping_add(dx),
            self.y.wrapping_add(dy),
            self.z.wrapping_add(dz),
        )
    }

    /// Minimum corner of the cell in world space.
    pub fn as_vec3(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    /// Euclidean distance between cell corners.
    pub fn distance(self, other: Self) -> f32 {
        self.as_vec3().distance(other.as_vec3())
    }

    /// Spatial hash `(x << 16) + (y << 8) + z`, wrapping on overflow.
    ///
    /// Neighbouring cells can collide; placement only needs the value to be a
    /// pure function of the cell.
    pub fn spatial_hash(self) -> i32 {
        self.x
            .wrapping_shl(16)
            .wrapping_add(self.y.wrapping_shl(8))
            .wrapping_add(self.z)
    }
}

impl From<IVec3> for CellCoord {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<CellCoord> for IVec3 {
    fn from(c: CellCoord) -> Self {
        IVec3::new(c.x, c.y, c.z)
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containing_floors_toward_negative_infinity() {
        assert_eq!(CellCoord::containing(Vec3::new(0.9, 0.0, 0.0)), CellCoord::ORIGIN);
        assert_eq!(
            CellCoord::containing(Vec3::new(1.5, -0.1, 2.999)),
            CellCoord::new(1, -1, 2)
        );
        assert_eq!(
            CellCoord::containing(Vec3::new(-3.0, -3.5, 0.0)),
            CellCoord::new(-3, -4, 0)
        );
    }

    #[test]
    fn spatial_hash_matches_shift_formula() {
        assert_eq!(CellCoord::new(1, 2, 3).spatial_hash(), (1 << 16) + (2 << 8) + 3);
        assert_eq!(CellCoord::new(-1, 0, 0).spatial_hash(), -65536);
        assert_eq!(CellCoord::ORIGIN.spatial_hash(), 0);
    }

    #[test]
    fn spatial_hash_wraps_instead_of_overflowing() {
        let c = CellCoord::new(i32::MAX, i32::MAX, i32::MAX);
        let _ = c.spatial_hash();
    }

    #[test]
    fn distance_between_cells() {
        let a = CellCoord::ORIGIN;
        assert_eq!(a.distance(CellCoord::new(1, 0, 0)), 1.0);
        assert!((a.distance(CellCoord::new(1, 1, 0)) - 2f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn ivec3_conversion() {
        let c = CellCoord::new(4, -5, 6);
        let v: IVec3 = c.into();
        assert_eq!(CellCoord::from(v), c);
        assert_eq!(c.to_string(), "(4, -5, 6)");
    }
}
