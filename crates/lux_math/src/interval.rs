/// A closed range of ray parameters `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Interval between two values given in any order.
    pub fn spanning(a: f32, b: f32) -> Self {
        Self::new(a.min(b), a.max(b))
    }

    /// Overlap of two intervals; `min > max` when they are disjoint.
    pub fn intersect(&self, other: &Interval) -> Interval {
        Interval::new(self.min.max(other.min), self.max.min(other.max))
    }
}
