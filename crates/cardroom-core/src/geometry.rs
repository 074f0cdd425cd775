//! Table geometry in world units (origin at the table center, y up).

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Point on the ellipse of the given full `width`/`height` centered at
/// `center`, at polar `angle` (radians, counter-clockwise from +x).
///
/// The radius comes from the polar form of the ellipse; the square roots
/// lose the sign, so x is negated in the left half-plane and y in the
/// lower half-plane. Exactly on an axis `tan` is 0 or huge and the
/// corresponding offset collapses to 0.
pub fn point_on_ellipse(center: Point, width: f64, height: f64, angle: f64) -> Point {
    let angle = angle.rem_euclid(TAU);
    let rx = width / 2.0;
    let ry = height / 2.0;
    let tan = angle.tan();

    let mut dx = rx * ry / (ry.powi(2) + rx.powi(2) * tan.powi(2)).sqrt();
    let mut dy = rx * ry / (rx.powi(2) + ry.powi(2) / tan.powi(2)).sqrt();

    if (FRAC_PI_2..PI + FRAC_PI_2).contains(&angle) {
        dx = -dx;
    }
    if (PI..TAU).contains(&angle) {
        dy = -dy;
    }

    Point::new(center.x + dx, center.y + dy)
}

/// Angle of seat `index` out of `count`, seats running clockwise from +x.
pub fn seat_angle(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    -TAU * index as f64 / count as f64
}
