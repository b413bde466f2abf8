//! Closed intervals and axis-aligned bounds.
//!
//! Provides closed intervals [min, max] used as per-axis limits for the
//! primitive field.

use glam::Vec3A;

/// Closed interval [min, max] for range checking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Minimum value of the interval
    pub min: f32,
    /// Maximum value of the interval
    pub max: f32,
}

impl Interval {
    /// Create a new interval with given min and max values
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Check if the interval contains the given value (inclusive bounds)
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Clamp the given value to be within this interval's bounds
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }
}

/// Which side of an interval a value ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Value lies inside the interval (inclusive)
    Inside,
    /// Value is below `min`
    Below,
    /// Value is above `max`
    Above,
}

impl Interval {
    /// Classify `x` against the interval.
    pub fn side(&self, x: f32) -> Side {
        if x > self.max {
            Side::Above
        } else if x < self.min {
            Side::Below
        } else {
            Side::Inside
        }
    }
}

/// Axis-aligned box given as one independent interval per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Limits along X
    pub x: Interval,
    /// Limits along Y
    pub y: Interval,
    /// Limits along Z
    pub z: Interval,
}

impl Bounds {
    /// Create bounds from three per-axis intervals.
    pub const fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Per-axis intervals in x, y, z order.
    pub fn axes(&self) -> [Interval; 3] {
        [self.x, self.y, self.z]
    }

    /// Clamp every component of `p` into its axis interval.
    pub fn clamp(&self, p: Vec3A) -> Vec3A {
        Vec3A::new(self.x.clamp(p.x), self.y.clamp(p.y), self.z.clamp(p.z))
    }

    /// True if every component of `p` lies inside its axis interval.
    pub fn contains(&self, p: Vec3A) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_is_inclusive_at_both_ends() {
        let i = Interval::new(5.0, 15.0);
        assert_eq!(i.side(5.0), Side::Inside);
        assert_eq!(i.side(15.0), Side::Inside);
        assert_eq!(i.side(4.999), Side::Below);
        assert_eq!(i.side(15.001), Side::Above);
    }

    #[test]
    fn clamp_snaps_to_nearest_end() {
        let i = Interval::new(-10.0, 10.0);
        assert_eq!(i.clamp(10.03), 10.0);
        assert_eq!(i.clamp(-12.0), -10.0);
        assert_eq!(i.clamp(3.5), 3.5);
    }

    #[test]
    fn bounds_check_each_axis() {
        let b = Bounds::new(
            Interval::new(-1.0, 1.0),
            Interval::new(0.0, 2.0),
            Interval::new(-1.0, 1.0),
        );
        assert!(b.contains(Vec3A::new(0.0, 1.0, 0.0)));
        assert!(!b.contains(Vec3A::new(0.0, -0.5, 0.0)));
        assert_eq!(b.axes()[1], Interval::new(0.0, 2.0));
        assert_eq!(b.clamp(Vec3A::new(3.0, -0.5, 0.25)), Vec3A::new(1.0, 0.0, 0.25));
    }
}
