//! Map-canvas coordinate type.
//!
//! Coordinates are cosmetic: they place city nodes on a 2-D canvas for
//! visualization and are never consulted by routing.  `f32` is plenty for
//! pixel-scale positions.  The origin doubles as the "unset" sentinel: a
//! freshly registered city sits at `(0, 0)` until a rebuild assigns it a
//! real position.

/// A 2-D canvas position stored as single-precision floats.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutPoint {
    pub x: f32,
    pub y: f32,
}

impl LayoutPoint {
    /// The "position not yet assigned" sentinel.
    pub const ORIGIN: LayoutPoint = LayoutPoint { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// `true` while the position is still the unset sentinel.
    #[inline]
    pub fn is_unset(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Euclidean distance to `other`, in canvas units.
    #[inline]
    pub fn distance(self, other: LayoutPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// `true` when both components are finite (no NaN/inf crept in).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for LayoutPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
