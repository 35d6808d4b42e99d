//! A single tick's movement instruction.

use pm_core::Point;

/// Speed plus the ordered waypoints to walk.
///
/// Build one with [`Path::anchored`] so the first waypoint is always the
/// agent's current position.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    speed:     f64,
    waypoints: Vec<Point>,
}

impl Path {
    /// A path starting at `current`.
    #[inline]
    pub fn anchored(speed: f64, current: Point) -> Self {
        let mut waypoints = Vec::with_capacity(3);
        waypoints.push(current);
        Self { speed, waypoints }
    }

    #[inline]
    pub fn add_waypoint(&mut self, p: Point) {
        self.waypoints.push(p);
    }

    /// Chaining form of [`add_waypoint`](Self::add_waypoint).
    #[inline]
    pub fn with_waypoint(mut self, p: Point) -> Self {
        self.waypoints.push(p);
        self
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// The starting position.
    pub fn start(&self) -> Point {
        self.waypoints.first().copied().unwrap_or_default()
    }

    /// Where the agent ends up once the path is walked.
    pub fn end(&self) -> Point {
        self.waypoints.last().copied().unwrap_or_default()
    }

    /// `true` when the path holds only the starting point.
    pub fn is_stationary(&self) -> bool {
        self.waypoints.len() <= 1
    }

    /// Total polyline length.
    pub fn length(&self) -> f64 {
        self.waypoints.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// Position after walking `distance` along the path, clamped to the end.
    ///
    /// Lets a renderer interpolate between ticks.
    pub fn point_at(&self, distance: f64) -> Point {
        let mut remaining = distance.max(0.0);
        for w in self.waypoints.windows(2) {
            let seg = w[0].distance(w[1]);
            if remaining <= seg {
                if seg == 0.0 {
                    return w[0];
                }
                let f = remaining / seg;
                return Point::new(w[0].x + (w[1].x - w[0].x) * f, w[0].y + (w[1].y - w[0].y) * f);
            }
            remaining -= seg;
        }
        self.end()
    }
}
