//! Polygon type and the pure geometric predicates used by the sampler.
//!
//! Polygons are implicitly closed: the last vertex connects back to the
//! first, and callers never repeat the first vertex at the end.

use pm_core::Point;

// ── Polygon ───────────────────────────────────────────────────────────────────

/// A simple closed polygon in map units.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Wrap a vertex list.  No validation happens here; the region builder
    /// rejects degenerate polygons.
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Axis-aligned rectangle with corners `min` and `max`.
    pub fn rect(min: Point, max: Point) -> Self {
        Self::new(vec![
            min,
            Point::new(max.x, min.y),
            max,
            Point::new(min.x, max.y),
        ])
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Every edge as a `(start, end)` pair, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |j| (self.vertices[j], self.vertices[(j + 1) % n]))
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        contains(&self.vertices, p)
    }

    /// Absolute shoelace area.
    pub fn area(&self) -> f64 {
        let twice: f64 = self
            .edges()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum();
        (twice * 0.5).abs()
    }

    /// Average of the vertices.  Table centers are defined this way.
    pub fn centroid(&self) -> Option<Point> {
        if self.vertices.is_empty() {
            return None;
        }
        let n = self.vertices.len() as f64;
        let (sx, sy) = self
            .vertices
            .iter()
            .fold((0.0, 0.0), |(sx, sy), v| (sx + v.x, sy + v.y));
        Some(Point::new(sx / n, sy / n))
    }

    /// `(min, max)` corners of the bounding box.
    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            (
                Point::new(lo.x.min(v.x), lo.y.min(v.y)),
                Point::new(hi.x.max(v.x), hi.y.max(v.y)),
            )
        }))
    }
}

// ── Predicates ────────────────────────────────────────────────────────────────

/// Even-odd ray-casting containment test.
///
/// Casts a ray toward `+x` from `p` and counts edge crossings.  Fewer than
/// three vertices never contain anything.
pub fn contains(polygon: &[Point], p: Point) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (polygon[i], polygon[j]);
        // The straddle test guarantees a.y != b.y, so the division is safe.
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Signed area of the triangle `(a, b, c)`, doubled.
#[inline]
fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// For a point already known to be collinear with `a → b`: is it within the
/// segment's extent?
#[inline]
fn within_extent(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Does segment `p1 → p2` intersect segment `q1 → q2`?
///
/// Inclusive: touching endpoints and collinear overlap both count.
pub fn segments_intersect(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let d1 = orientation(q1, q2, p1);
    let d2 = orientation(q1, q2, p2);
    let d3 = orientation(p1, p2, q1);
    let d4 = orientation(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && within_extent(q1, q2, p1))
        || (d2 == 0.0 && within_extent(q1, q2, p2))
        || (d3 == 0.0 && within_extent(p1, p2, q1))
        || (d4 == 0.0 && within_extent(p1, p2, q2))
}

/// `true` iff `from → to` intersects any edge of any restricted polygon.
///
/// Linear in the total number of restricted vertices.  [`RegionSet`] answers
/// the same question through an R-tree; this is the reference version.
///
/// [`RegionSet`]: crate::RegionSet
pub fn crosses_restricted(restricted: &[Polygon], from: Point, to: Point) -> bool {
    restricted
        .iter()
        .flat_map(Polygon::edges)
        .any(|(a, b)| segments_intersect(from, to, a, b))
}
