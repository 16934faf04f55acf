use gridstar_core::Point;

/// Euclidean (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    (dx * dx + dy * dy).sqrt()
}

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    let d = a.abs_delta(b);
    d.x + d.y
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    let d = a.abs_delta(b);
    d.x.max(d.y)
}

/// Distance estimate used to compute a cell's H score.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Sum of the axis distances.
    Manhattan,
    /// Largest axis distance ("chessboard" distance).
    Chebyshev,
}

impl Heuristic {
    /// Estimate the remaining cost from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Point, to: Point) -> f64 {
        match self {
            Self::Euclidean => euclidean(from, to),
            Self::Manhattan => f64::from(manhattan(from, to)),
            Self::Chebyshev => f64::from(chebyshev(from, to)),
        }
    }
}
