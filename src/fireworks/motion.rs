//! Shared per-tick motion rule for rockets and sparks.

/// Canvas-space point in CSS pixels (y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Heading (radians) pointing from `self` toward `other`.
    pub fn angle_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

/// Fixed-length ring of recent positions, newest first. Only used to draw
/// the motion streak; the length never changes after construction.
#[derive(Clone, Debug)]
pub struct Trail<const N: usize> {
    points: [Point; N],
}

impl<const N: usize> Trail<N> {
    pub fn filled(p: Point) -> Self {
        Self { points: [p; N] }
    }

    /// Drop the oldest entry and put `p` at the front.
    pub fn push(&mut self, p: Point) {
        if N == 0 {
            return;
        }
        self.points.rotate_right(1);
        self.points[0] = p;
    }

    pub fn oldest(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn newest(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn len(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}

/// One integration step: advance `pos` along `angle` by `speed`, then add
/// `drift` to y (gravity for sparks, 0 for rockets).
pub fn step(pos: Point, angle: f64, speed: f64, drift: f64) -> Point {
    Point {
        x: pos.x + angle.cos() * speed,
        y: pos.y + angle.sin() * speed + drift,
    }
}

/// Uniform draw in `[min, max)`.
pub(crate) fn random_range(rng: &mut fastrand::Rng, min: f64, max: f64) -> f64 {
    rng.f64() * (max - min) + min
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn trail_keeps_fixed_length_and_drops_oldest() {
        let mut t: Trail<3> = Trail::filled(Point::new(0.0, 0.0));
        t.push(Point::new(1.0, 0.0));
        t.push(Point::new(2.0, 0.0));
        assert_eq!(t.len(), 3);
        assert_eq!(t.oldest(), Some(Point::new(0.0, 0.0)));
        t.push(Point::new(3.0, 0.0));
        assert_eq!(t.iter().count(), 3);
        assert_eq!(t.newest(), Some(Point::new(3.0, 0.0)));
        assert_eq!(t.oldest(), Some(Point::new(1.0, 0.0)));
    }

    #[test]
    fn step_applies_heading_and_drift() {
        let p = step(Point::new(10.0, 10.0), 0.0, 2.0, 0.5);
        assert!((p.x - 12.0).abs() < 1e-12);
        assert!((p.y - 10.5).abs() < 1e-12);

        let up = step(Point::new(0.0, 0.0), -FRAC_PI_2, 3.0, 0.0);
        assert!(up.x.abs() < 1e-12);
        assert!((up.y + 3.0).abs() < 1e-12);
    }

    #[test]
    fn angle_and_distance_between_points() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(-3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-12);
        assert!((Point::new(1.0, 0.0).angle_to(Point::new(0.0, 0.0)) - PI).abs() < 1e-12);
    }

    #[test]
    fn random_range_stays_in_bounds() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..1000 {
            let v = random_range(&mut rng, 0.015, 0.03);
            assert!((0.015..0.03).contains(&v));
        }
    }
}
