//! Vector math and the cubic Hermite arc used for disc flights.

use serde::Serialize;
use std::ops::{Add, Mul, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const UP: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Scale to unit length. A zero vector is returned unchanged.
    pub fn normalized(self) -> Self {
        let length = self.length();
        if length == 0.0 {
            return self;
        }
        Self {
            x: self.x / length,
            y: self.y / length,
            z: self.z / length,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Cubic Hermite basis weights `(h0, h1, h2, h3)` at parameter `u`.
///
/// `h0`/`h1` weight the end points, `h2`/`h3` weight the end tangents.
pub fn hermite_basis(u: f64) -> [f64; 4] {
    let u2 = u * u;
    let u3 = u2 * u;
    [
        2.0 * u3 - 3.0 * u2 + 1.0,
        -2.0 * u3 + 3.0 * u2,
        u3 - 2.0 * u2 + u,
        u3 - u2,
    ]
}

/// Arched flight path between two rods.
///
/// Both end points sit at the clearance height `H`; the start tangent points
/// up with magnitude `2H` and the end tangent points down, so the path rises
/// to `1.5 H` at the midpoint regardless of the horizontal distance. The path
/// stays on the board centre line, so only x and z vary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcPath {
    pub p0: Vec3,
    pub p1: Vec3,
    pub t0: Vec3,
    pub t1: Vec3,
}

impl ArcPath {
    pub fn new(start: Vec3, dest: Vec3, center_y: f64, clearance: f64) -> Self {
        let mid_x = (start.x + dest.x) / 2.0;
        Self {
            p0: Vec3::new(start.x, center_y, clearance),
            p1: Vec3::new(dest.x, center_y, clearance),
            t0: Vec3::new(mid_x - start.x, 0.0, 2.0 * clearance),
            t1: Vec3::new(dest.x - mid_x, 0.0, -2.0 * clearance),
        }
    }

    pub fn point_at(&self, u: f64) -> Vec3 {
        // Clamp to the end points outside (0, 1).
        if u <= 0.0 {
            return self.p0;
        }
        if u >= 1.0 {
            return self.p1;
        }
        let [h0, h1, h2, h3] = hermite_basis(u);
        self.p0 * h0 + self.p1 * h1 + self.t0 * h2 + self.t1 * h3
    }
}
