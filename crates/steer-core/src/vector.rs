//! Three-component `f32` vector used for positions, velocities, and forces.
//!
//! Steering runs in the XY plane; `z` is carried through every operation so
//! hosts with a 3D scene can store positions without conversion.
//!
//! Division by a length is always guarded by [`EPSILON`]: normalizing a
//! zero vector yields the zero vector, never NaN.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Lengths at or below this are treated as zero.
pub const EPSILON: f32 = 1e-6;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const X:    Vec3 = Vec3 { x: 1.0, y: 0.0, z: 0.0 };
    pub const Y:    Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Planar constructor (`z = 0`).
    #[inline]
    pub const fn xy(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Unit vector at `radians` from the +X axis in the XY plane.
    #[inline]
    pub fn from_angle(radians: f32) -> Self {
        Self::xy(radians.cos(), radians.sin())
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn length_sq(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vec3) -> f32 {
        (self - other).length()
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.length_sq() <= EPSILON * EPSILON
    }

    /// Unit vector in the same direction, or `ZERO` for a zero-length input.
    #[inline]
    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len > EPSILON { self / len } else { Vec3::ZERO }
    }

    /// Same direction, magnitude `len`.  Zero input stays zero.
    #[inline]
    pub fn with_length(self, len: f32) -> Vec3 {
        self.normalized() * len
    }

    /// Clamp the magnitude to at most `max`.
    #[inline]
    pub fn limited(self, max: f32) -> Vec3 {
        let len_sq = self.length_sq();
        if len_sq > max * max && len_sq > EPSILON * EPSILON {
            self * (max / len_sq.sqrt())
        } else {
            self
        }
    }

    /// Counter-clockwise perpendicular in the XY plane: `(-y, x, z)`.
    #[inline]
    pub fn perp_ccw(self) -> Vec3 {
        Vec3::new(-self.y, self.x, self.z)
    }

    /// Clockwise perpendicular in the XY plane: `(y, -x, z)`.
    #[inline]
    pub fn perp_cw(self) -> Vec3 {
        Vec3::new(self.y, -self.x, self.z)
    }

    /// Angle of the XY projection from +X, in `(-π, π]`.
    #[inline]
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec3) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, s: f32) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl MulAssign<f32> for Vec3 {
    #[inline]
    fn mul_assign(&mut self, s: f32) {
        *self = *self * s;
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn div(self, s: f32) -> Vec3 {
        Vec3::new(self.x / s, self.y / s, self.z / s)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl std::iter::Sum for Vec3 {
    fn sum<I: Iterator<Item = Vec3>>(iter: I) -> Vec3 {
        iter.fold(Vec3::ZERO, Add::add)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}
