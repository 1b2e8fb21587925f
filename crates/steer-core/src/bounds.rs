//! Rectangular world extents centred on the origin.
//!
//! Agents leaving the rectangle reappear on the opposite edge (toroidal
//! wrap, not a bounce).

use crate::{SteerError, SteerResult, Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldBounds {
    pub half_width:  f32,
    pub half_height: f32,
}

impl Default for WorldBounds {
    /// An 800 × 600 world.
    fn default() -> Self {
        Self { half_width: 400.0, half_height: 300.0 }
    }
}

impl WorldBounds {
    #[inline]
    pub fn new(half_width: f32, half_height: f32) -> Self {
        Self { half_width, half_height }
    }

    /// Build from full width and height.
    #[inline]
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(width * 0.5, height * 0.5)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.half_width * 2.0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.half_height * 2.0
    }

    /// Both extents must be finite and positive for wrapping to work.
    pub fn validate(&self) -> SteerResult<()> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.half_width) && ok(self.half_height) {
            Ok(())
        } else {
            Err(SteerError::InvalidBounds { width: self.width(), height: self.height() })
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.x.abs() <= self.half_width && p.y.abs() <= self.half_height
    }

    /// Teleport a coordinate past either half extent to the opposite edge.
    /// `z` is untouched.
    #[inline]
    pub fn wrap(&self, mut p: Vec3) -> Vec3 {
        if p.x > self.half_width {
            p.x = -self.half_width;
        } else if p.x < -self.half_width {
            p.x = self.half_width;
        }
        if p.y > self.half_height {
            p.y = -self.half_height;
        } else if p.y < -self.half_height {
            p.y = self.half_height;
        }
        p
    }
}
