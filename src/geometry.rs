//! Plane geometry used by the placement engine.
//!
//! Points and direction vectors share the [`Point2D`] type. Angles are in
//! radians; [`angle`] follows `atan2` and returns values in `(-π, π]`, while
//! [`positive_angle`] maps the same direction onto `[0, 2π)` for code that
//! compares sweep positions around a centre.

use std::f64::consts::PI;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Lengths below this are treated as zero when normalising.
pub const EPSILON: f64 = 1e-10;

/// A point (or free vector) in the depiction plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `theta` radians from the positive x axis.
    pub fn from_angle(theta: f64) -> Self {
        Self::new(theta.cos(), theta.sin())
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Point2D) -> f64 {
        (self - other).length()
    }

    /// Direction of this vector, see [`angle`].
    pub fn angle(self) -> f64 {
        angle(self.x, self.y)
    }

    /// Unsigned angle between two vectors, in `[0, π]`.
    pub fn angle_between(self, other: Point2D) -> f64 {
        let denom = self.length() * other.length();
        if denom < EPSILON {
            return 0.0;
        }
        let cos = (self.x * other.x + self.y * other.y) / denom;
        cos.clamp(-1.0, 1.0).acos()
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector.
    pub fn normalize(self) -> Option<Point2D> {
        let len = self.length();
        if len < EPSILON {
            None
        } else {
            Some(Point2D::new(self.x / len, self.y / len))
        }
    }

    /// Vector in the same direction with length `len`.
    pub fn scale_to(self, len: f64) -> Option<Point2D> {
        self.normalize().map(|unit| unit * len)
    }

    /// `self + t * (other - self)`.
    pub fn lerp(self, other: Point2D, t: f64) -> Point2D {
        self + (other - self) * t
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point2D {
    fn add_assign(&mut self, rhs: Point2D) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Point2D;

    fn mul(self, rhs: f64) -> Point2D {
        Point2D::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point2D {
    type Output = Point2D;

    fn neg(self) -> Point2D {
        Point2D::new(-self.x, -self.y)
    }
}

impl From<[f64; 2]> for Point2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Point2D::new(x, y)
    }
}

/// Direction of `(dx, dy)` in `(-π, π]`.
pub fn angle(dx: f64, dy: f64) -> f64 {
    let theta = dy.atan2(dx);
    // atan2 gives -π for a negative zero y
    if theta == -PI {
        PI
    } else {
        theta
    }
}

/// Direction of `(dx, dy)` in `[0, 2π)`.
pub fn positive_angle(dx: f64, dy: f64) -> f64 {
    wrap_angle(angle(dx, dy))
}

pub fn distance(p: Point2D, q: Point2D) -> f64 {
    p.distance(q)
}

/// Arithmetic mean of the points, `None` when there are none.
pub fn centroid<I>(points: I) -> Option<Point2D>
where
    I: IntoIterator<Item = Point2D>,
{
    let mut sum = Point2D::ORIGIN;
    let mut n = 0usize;
    for p in points {
        sum += p;
        n += 1;
    }
    if n == 0 {
        None
    } else {
        Some(sum * (1.0 / n as f64))
    }
}

pub fn normalize(v: Point2D) -> Option<Point2D> {
    v.normalize()
}

pub fn scale(v: Point2D, len: f64) -> Option<Point2D> {
    v.scale_to(len)
}

pub fn lerp(p: Point2D, q: Point2D, t: f64) -> Point2D {
    p.lerp(q, t)
}

/// Reduce an angle to `[0, 2π)`.
pub fn wrap_angle(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(2.0 * PI);
    // rem_euclid of a tiny negative value rounds up to exactly 2π
    if wrapped >= 2.0 * PI {
        0.0
    } else {
        wrapped
    }
}

/// Median of the given lengths, `None` for an empty input.
pub fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}
