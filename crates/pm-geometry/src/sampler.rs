//! Bounded rejection sampling of waypoint candidates.
//!
//! Candidates are drawn uniformly over the simulation bounds from the
//! agent's own RNG and tested against a [`SampleConstraint`].  The loop is
//! bounded: after `max_attempts` rejections it returns
//! [`SampleError::Exhausted`] instead of spinning forever on geometry that
//! makes the constraint unsatisfiable.

use std::fmt;

use pm_core::{AgentRng, Point};

use crate::error::SampleError;
use crate::region::RegionSet;

/// Default attempt bound per sampling call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20_000;

// ── SampleConstraint ──────────────────────────────────────────────────────────

/// What a candidate must satisfy to be accepted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SampleConstraint {
    /// Inside the allowed zone.
    Free,
    /// Inside the allowed zone, and `from → c` crosses no restricted edge.
    FreeClear { from: Point },
    /// Inside the allowed zone, and no farther from `target` than `from` is.
    Directed { from: Point, target: Point },
    /// `Directed` plus no restricted crossing from `from`.
    DirectedClear { from: Point, target: Point },
    /// Inside the start region.
    StartRegion,
}

impl SampleConstraint {
    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            SampleConstraint::Free => "free",
            SampleConstraint::FreeClear { .. } => "free-clear",
            SampleConstraint::Directed { .. } => "directed",
            SampleConstraint::DirectedClear { .. } => "directed-clear",
            SampleConstraint::StartRegion => "start-region",
        }
    }

    /// Test one candidate.  Cheapest checks run first.
    pub fn accepts(&self, regions: &RegionSet, c: Point) -> bool {
        match *self {
            SampleConstraint::Free => regions.in_allowed_zone(c),
            SampleConstraint::FreeClear { from } => {
                regions.in_allowed_zone(c) && !regions.crosses_restricted(from, c)
            }
            SampleConstraint::Directed { from, target } => {
                c.distance(target) <= from.distance(target) && regions.in_allowed_zone(c)
            }
            SampleConstraint::DirectedClear { from, target } => {
                c.distance(target) <= from.distance(target)
                    && regions.in_allowed_zone(c)
                    && !regions.crosses_restricted(from, c)
            }
            SampleConstraint::StartRegion => regions.in_start_region(c),
        }
    }
}

impl fmt::Display for SampleConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── ConstrainedSampler ────────────────────────────────────────────────────────

/// Rejection sampler over a borrowed [`RegionSet`].
#[derive(Copy, Clone, Debug)]
pub struct ConstrainedSampler<'r> {
    regions:      &'r RegionSet,
    max_attempts: u32,
}

impl<'r> ConstrainedSampler<'r> {
    pub fn new(regions: &'r RegionSet, max_attempts: u32) -> Self {
        Self { regions, max_attempts }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Uniform candidate over `[0, width) × [0, height)`.
    #[inline]
    pub fn candidate(&self, rng: &mut AgentRng) -> Point {
        rng.point_in_bounds(self.regions.width(), self.regions.height())
    }

    /// Draw candidates until one satisfies `constraint`.
    pub fn sample(
        &self,
        rng: &mut AgentRng,
        constraint: SampleConstraint,
    ) -> Result<Point, SampleError> {
        for _ in 0..self.max_attempts {
            let c = self.candidate(rng);
            if constraint.accepts(self.regions, c) {
                return Ok(c);
            }
        }
        Err(SampleError::Exhausted {
            constraint: constraint.name(),
            attempts:   self.max_attempts,
        })
    }
}

// ── advance_toward ────────────────────────────────────────────────────────────

/// The point `step` units from `from` along the direction to `to`.
///
/// Returns `from` when the two coincide and `to` when it is within `step`,
/// so the result never overshoots.
pub fn advance_toward(from: Point, to: Point, step: f64) -> Point {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let len = dx.hypot(dy);
    if len == 0.0 {
        return from;
    }
    if len <= step {
        return to;
    }
    Point::new(from.x + dx / len * step, from.y + dy / len * step)
}
