//! Decomposed 2D transform (scale, rotation, translation)
//!
//! Transforms are kept decomposed instead of as a matrix so that animations
//! can interpolate each component independently. A full turn of rotation is
//! therefore a real rotation and not the identity matrix.

use crate::geometry::Point;

/// A 2D transform applied around a view's center: scale, then rotate, then translate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale_x: f32,
    pub scale_y: f32,
    /// Rotation in radians, clockwise in screen space
    pub rotation: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale_x: 1.0,
        scale_y: 1.0,
        rotation: 0.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// Pure scale transform
    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            scale_x: sx,
            scale_y: sy,
            ..Self::IDENTITY
        }
    }

    /// Pure translation transform
    pub fn translation(tx: f32, ty: f32) -> Self {
        Self {
            translate_x: tx,
            translate_y: ty,
            ..Self::IDENTITY
        }
    }

    /// Pure rotation transform
    pub fn rotation(radians: f32) -> Self {
        Self {
            rotation: radians,
            ..Self::IDENTITY
        }
    }

    /// Multiply the scale components
    pub fn scaled(self, sx: f32, sy: f32) -> Self {
        Self {
            scale_x: self.scale_x * sx,
            scale_y: self.scale_y * sy,
            ..self
        }
    }

    /// Add to the rotation
    pub fn rotated(self, radians: f32) -> Self {
        Self {
            rotation: self.rotation + radians,
            ..self
        }
    }

    /// Component-wise interpolation; `t` may leave 0..1 for spring overshoot
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            scale_x: mix(self.scale_x, other.scale_x),
            scale_y: mix(self.scale_y, other.scale_y),
            rotation: mix(self.rotation, other.rotation),
            translate_x: mix(self.translate_x, other.translate_x),
            translate_y: mix(self.translate_y, other.translate_y),
        }
    }

    /// Apply to a point expressed relative to the anchor (view center)
    pub fn apply(&self, point: Point) -> Point {
        let [a, b, c, d, tx, ty] = self.to_affine();
        Point::new(a * point.x + c * point.y + tx, b * point.x + d * point.y + ty)
    }

    /// Affine matrix [a, b, c, d, tx, ty] such that
    /// x' = a*x + c*y + tx, y' = b*x + d*y + ty
    pub fn to_affine(&self) -> [f32; 6] {
        let (sin, cos) = self.rotation.sin_cos();
        [
            cos * self.scale_x,
            sin * self.scale_x,
            -sin * self.scale_y,
            cos * self.scale_y,
            self.translate_x,
            self.translate_y,
        ]
    }

    /// Check whether this is the identity within `epsilon`
    pub fn approx_identity(&self, epsilon: f32) -> bool {
        self.approx_eq(&Self::IDENTITY, epsilon)
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.scale_x - other.scale_x).abs() <= epsilon
            && (self.scale_y - other.scale_y).abs() <= epsilon
            && (self.rotation - other.rotation).abs() <= epsilon
            && (self.translate_x - other.translate_x).abs() <= epsilon
            && (self.translate_y - other.translate_y).abs() <= epsilon
    }
}

/// Affine matrix mapping (x, y) to (a*x + c*y + tx, b*x + d*y + ty)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn translation(tx: f32, ty: f32) -> Self {
        Self {
            tx,
            ty,
            ..Self::IDENTITY
        }
    }

    /// Apply `self` after `inner`: the result maps p to self(inner(p))
    pub fn compose(&self, inner: &Affine) -> Self {
        Self {
            a: self.a * inner.a + self.c * inner.b,
            b: self.b * inner.a + self.d * inner.b,
            c: self.a * inner.c + self.c * inner.d,
            d: self.b * inner.c + self.d * inner.d,
            tx: self.a * inner.tx + self.c * inner.ty + self.tx,
            ty: self.b * inner.tx + self.d * inner.ty + self.ty,
        }
    }

    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.c * point.y + self.tx,
            self.b * point.x + self.d * point.y + self.ty,
        )
    }

    /// Uniform scale factor (square root of the determinant's magnitude)
    pub fn scale_factor(&self) -> f32 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }

    /// Columns packed for a uniform buffer: [a, b, c, d], [tx, ty]
    pub fn to_columns(&self) -> ([f32; 4], [f32; 2]) {
        ([self.a, self.b, self.c, self.d], [self.tx, self.ty])
    }
}

impl From<Transform> for Affine {
    fn from(t: Transform) -> Self {
        let [a, b, c, d, tx, ty] = t.to_affine();
        Self { a, b, c, d, tx, ty }
    }
}
